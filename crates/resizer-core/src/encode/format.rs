//! Choosing an encoder from the destination file name.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use super::{encode_jpeg_image, EncodeError};
use crate::decode::DecodedImage;

/// Quality used for every lossy output. Not user-configurable.
pub const OUTPUT_QUALITY: u8 = 95;

/// Output container, picked from the destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Gif,
}

impl OutputFormat {
    /// Format for a destination path, by extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnknownFormat` when the extension is missing or
    /// not one of the enabled encoders.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => Ok(OutputFormat::Jpeg),
            Ok(ImageFormat::Png) => Ok(OutputFormat::Png),
            Ok(ImageFormat::Bmp) => Ok(OutputFormat::Bmp),
            Ok(ImageFormat::Gif) => Ok(OutputFormat::Gif),
            _ => Err(EncodeError::UnknownFormat(path.display().to_string())),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Gif => ImageFormat::Gif,
        }
    }
}

/// Encode `image` into `format`.
///
/// `quality` applies to JPEG; the lossless formats ignore it.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    match format {
        OutputFormat::Jpeg => encode_jpeg_image(image, quality),
        other => {
            let dynamic = image.to_dynamic().ok_or(EncodeError::InvalidPixelData {
                expected: image.width as usize * image.height as usize * image.layout.channels(),
                actual: image.pixels.len(),
            })?;
            let mut buffer = Cursor::new(Vec::new());
            dynamic
                .write_to(&mut buffer, other.image_format())
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
            Ok(buffer.into_inner())
        }
    }
}

/// Encode `image` for the file at `destination`, at [`OUTPUT_QUALITY`].
pub fn encode_for_path(image: &DecodedImage, destination: &Path) -> Result<Vec<u8>, EncodeError> {
    let format = OutputFormat::from_path(destination)?;
    encode_image(image, format, OUTPUT_QUALITY)
}
