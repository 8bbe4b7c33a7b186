use crate::models::Symbol;

const DARK: &str = "\u{2588}\u{2588}";
const LIGHT: &str = "  ";

/// One line per module row, two characters per module, quiet zone included
pub fn to_utf8(symbol: &Symbol, quiet_zone: usize) -> String {
    let size = symbol.size() as isize;
    let qz = quiet_zone as isize;
    let dim = symbol.size() + 2 * quiet_zone;
    let mut out = String::with_capacity(dim * (dim * DARK.len() + 1));

    for y in -qz..size + qz {
        for x in -qz..size + qz {
            let inside = (0..size).contains(&x) && (0..size).contains(&y);
            let dark = inside && symbol.is_dark(x as usize, y as usize);
            out.push_str(if dark { DARK } else { LIGHT });
        }
        out.push('\n');
    }
    out
}
