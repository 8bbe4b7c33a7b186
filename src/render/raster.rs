use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use crate::error::Result;
use crate::models::Symbol;

/// Grayscale raster, `module_px` pixels per module, black on white
pub fn to_luma_image(symbol: &Symbol, module_px: u32, quiet_zone: usize) -> GrayImage {
    let module_px = module_px.max(1);
    let qz = quiet_zone as u32;
    let dim = (symbol.size() as u32 + 2 * qz) * module_px;
    GrayImage::from_fn(dim, dim, |px, py| {
        let mx = (px / module_px) as i64 - qz as i64;
        let my = (py / module_px) as i64 - qz as i64;
        let size = symbol.size() as i64;
        let dark =
            (0..size).contains(&mx) && (0..size).contains(&my) && symbol.is_dark(mx as usize, my as usize);
        Luma([if dark { 0 } else { 255 }])
    })
}

/// Whole pixels per module so the image is at most `size` wide (minimum 1)
pub fn module_pixels(symbol: &Symbol, size: u32, quiet_zone: usize) -> u32 {
    let dim = (symbol.size() + 2 * quiet_zone) as u32;
    (size / dim).max(1)
}

/// PNG-encoded raster wrapped in a base64 data URL
pub fn to_data_url(symbol: &Symbol, size: u32, quiet_zone: usize) -> Result<String> {
    let img = to_luma_image(symbol, module_pixels(symbol, size, quiet_zone), quiet_zone);
    let mut png = Vec::new();
    DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
