//! Image encoding for resized output.
//!
//! This module provides:
//! - JPEG encoding with an explicit quality
//! - Picking the encoder from the destination file extension
//!
//! # Examples
//!
//! ```ignore
//! use resizer_core::encode::encode_for_path;
//!
//! let bytes = encode_for_path(&image, Path::new("out/photo.jpg"))?;
//! std::fs::write("out/photo.jpg", bytes)?;
//! ```

mod format;
mod jpeg;

use thiserror::Error;

use crate::decode::PixelLayout;

pub use format::{encode_for_path, encode_image, OutputFormat, OUTPUT_QUALITY};
pub use jpeg::{encode_jpeg, encode_jpeg_image};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The target format cannot store this channel layout
    #[error("{format} cannot store {layout:?} pixels")]
    UnsupportedLayout {
        layout: PixelLayout,
        format: &'static str,
    },

    /// The destination extension does not name an enabled encoder
    #[error("No encoder for output file: {0}")]
    UnknownFormat(String),

    /// The encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
