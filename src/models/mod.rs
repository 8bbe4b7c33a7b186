pub mod matrix;
pub mod mode;
pub mod pixel;
pub mod point;
pub mod qr_code;
pub mod symbol;

pub use matrix::BitMatrix;
pub use mode::Mode;
pub use pixel::{PixelBuffer, PixelFormat};
pub use point::Point;
pub use qr_code::{ECLevel, MaskPattern, QRCode, Version};
pub use symbol::Symbol;
