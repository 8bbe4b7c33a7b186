//! Symbol serialization: SVG markup, PNG data URL and terminal text.
//!
//! Every renderer is a pure function of the symbol and the options.

pub mod raster;
pub mod svg;
pub mod text;

pub use raster::{to_data_url, to_luma_image};
pub use svg::to_svg;
pub use text::to_utf8;

use crate::error::Result;
use crate::models::Symbol;

/// Light modules required around the symbol by ISO/IEC 18004
pub const DEFAULT_QUIET_ZONE: usize = 4;

/// Output kind produced by [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<svg>` document with a single path
    #[default]
    Svg,
    /// `data:image/png;base64,...`
    DataUrl,
    /// Block characters, two per module
    Utf8,
}

/// Rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output kind (default SVG)
    pub format: OutputFormat,
    /// Target width and height in pixels (SVG and PNG only)
    pub size: u32,
    /// Light border in modules
    pub quiet_zone: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Svg,
            size: 256,
            quiet_zone: DEFAULT_QUIET_ZONE,
        }
    }
}

/// Render a symbol in the requested format
pub fn render(symbol: &Symbol, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Svg => Ok(to_svg(symbol, options.size, options.quiet_zone)),
        OutputFormat::DataUrl => to_data_url(symbol, options.size, options.quiet_zone),
        OutputFormat::Utf8 => Ok(to_utf8(symbol, options.quiet_zone)),
    }
}
