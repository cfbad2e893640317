//! Decoding image files from disk or memory.
//!
//! The container format is sniffed from the content, not the extension, so a
//! mislabelled file still decodes as long as the codec is enabled.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// Decode an image from raw file bytes.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes are not a decodable image,
/// or `DecodeError::EmptyImage` if the decoded image has a zero dimension.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    ensure_not_empty(DecodedImage::from_dynamic(img))
}

/// Read and decode the image at `path`.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read, otherwise the
/// same errors as [`decode_bytes`].
pub fn decode_file(path: &Path) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    decode_bytes(&bytes)
}

fn ensure_not_empty(image: DecodedImage) -> Result<DecodedImage, DecodeError> {
    if image.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }
    Ok(image)
}
