use crate::error::{QrError, Result};

/// Channel layout of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One luminance byte per pixel
    Luma8,
    /// Three bytes per pixel (R, G, B)
    Rgb8,
    /// Four bytes per pixel (R, G, B, A); alpha is ignored
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Raster image handed to the decoder, row-major without padding
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw pixel bytes, checking the length against the dimensions
    pub fn new(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * format.channels();
        if data.len() != expected {
            return Err(QrError::InvalidPixelBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Grayscale buffer shortcut
    pub fn luma(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, PixelFormat::Luma8, data)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel layout
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl From<image::GrayImage> for PixelBuffer {
    fn from(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            format: PixelFormat::Luma8,
            data: img.into_raw(),
        }
    }
}

impl From<image::RgbImage> for PixelBuffer {
    fn from(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            format: PixelFormat::Rgb8,
            data: img.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_checked() {
        assert!(PixelBuffer::new(2, 2, PixelFormat::Rgb8, vec![0; 12]).is_ok());
        let err = PixelBuffer::new(2, 2, PixelFormat::Rgba8, vec![0; 12]).unwrap_err();
        assert!(matches!(
            err,
            QrError::InvalidPixelBuffer {
                expected: 16,
                actual: 12
            }
        ));
    }

    #[test]
    fn test_from_gray_image() {
        let img = image::GrayImage::from_pixel(3, 2, image::Luma([7u8]));
        let buf = PixelBuffer::from(img);
        assert_eq!((buf.width(), buf.height()), (3, 2));
        assert_eq!(buf.format(), PixelFormat::Luma8);
        assert_eq!(buf.data(), &[7u8; 6]);
    }
}
