use crate::models::Symbol;

/// SVG document: background rect plus one path of unit squares, in module
/// units scaled to `size` pixels
pub fn to_svg(symbol: &Symbol, size: u32, quiet_zone: usize) -> String {
    let dim = symbol.size() + 2 * quiet_zone;
    let n = symbol.size();

    let path = (0..n)
        .flat_map(|y| (0..n).map(move |x| (x, y)))
        .filter(|&(x, y)| symbol.is_dark(x, y))
        .map(|(x, y)| format!("M{},{}h1v1h-1z", x + quiet_zone, y + quiet_zone))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{size}" "#,
            r#"viewBox="0 0 {dim} {dim}" shape-rendering="crispEdges">"#,
            r##"<rect x="0" y="0" width="{dim}" height="{dim}" fill="#ffffff"/>"##,
            r##"<path fill="#000000" d="{path}"/>"##,
            "</svg>\n"
        ),
        size = size,
        dim = dim,
        path = path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeOptions, encode_text};

    #[test]
    fn test_svg_structure() {
        let symbol = encode_text("svg", &EncodeOptions::default()).unwrap();
        let svg = to_svg(&symbol, 300, 4);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("width=\"300\" height=\"300\""));
        assert!(svg.contains("viewBox=\"0 0 29 29\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        // Top-left finder corner sits just inside the quiet zone
        assert!(svg.contains("d=\"M4,4h1v1h-1z"));
    }

    #[test]
    fn test_one_square_per_dark_module() {
        let symbol = encode_text("count", &EncodeOptions::default()).unwrap();
        let svg = to_svg(&symbol, 100, 0);
        let squares = svg.matches("h1v1h-1z").count();
        assert_eq!(squares, symbol.modules().count_ones());
    }

    #[test]
    fn test_deterministic() {
        let symbol = encode_text("same", &EncodeOptions::default()).unwrap();
        assert_eq!(to_svg(&symbol, 64, 2), to_svg(&symbol, 64, 2));
    }
}
