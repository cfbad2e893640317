//! Image decoding for the resize pipeline.
//!
//! This module provides:
//! - Decoding image files (JPEG, PNG, BMP, GIF) into 8-bit pixel buffers
//! - Resampling to an exact size
//!
//! Alpha is kept when the source has it; every other colour type is widened
//! to RGB. No colour-space conversion is applied.
//!
//! # Examples
//!
//! ```ignore
//! use resizer_core::decode::decode_file;
//!
//! let image = decode_file(std::path::Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod file;
mod resize;
mod types;

pub use file::{decode_bytes, decode_file};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, PixelLayout};
