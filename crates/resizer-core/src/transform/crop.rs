//! Pixel-exact cropping.
//!
//! A crop is described by a [`CropWindow`] in pixel coordinates of the image
//! being cropped, with an exclusive right/bottom edge.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - `right` and `bottom` are one past the last kept column/row

use crate::decode::DecodedImage;
use thiserror::Error;

/// Errors from cropping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CropError {
    /// The window is empty or reaches past the image edge.
    #[error("Crop window {window:?} does not fit inside a {width}x{height} image")]
    OutOfBounds {
        window: CropWindow,
        width: u32,
        height: u32,
    },
}

/// A rectangular region of an image in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropWindow {
    /// Window of `width x height` centered in a `outer_width x outer_height` box.
    ///
    /// Odd margins are split with the extra pixel on the right/bottom
    /// (the offsets are floored). The outer box must be at least as large as
    /// the window on both axes.
    pub fn centered(outer_width: u32, outer_height: u32, width: u32, height: u32) -> Self {
        let left = outer_width.saturating_sub(width) / 2;
        let top = outer_height.saturating_sub(height) / 2;
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// The window as a `(left, top, right, bottom)` tuple.
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.left, self.top, self.right, self.bottom)
    }

    fn fits(&self, width: u32, height: u32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && self.right <= width
            && self.bottom <= height
    }
}

/// Copy the pixels inside `window` into a new image.
///
/// # Errors
///
/// Returns `CropError::OutOfBounds` if the window is empty or not fully
/// inside the image. Unlike a clamping crop, the output size is always exactly
/// the window size.
pub fn apply_crop(image: &DecodedImage, window: CropWindow) -> Result<DecodedImage, CropError> {
    if !window.fits(image.width, image.height) {
        return Err(CropError::OutOfBounds {
            window,
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: full-frame window returns a clone
    if window.left == 0
        && window.top == 0
        && window.right == image.width
        && window.bottom == image.height
    {
        return Ok(image.clone());
    }

    let channels = image.layout.channels();
    let src_stride = image.width as usize * channels;
    let row_len = window.width() as usize * channels;
    let out_height = window.height() as usize;

    let mut output = Vec::with_capacity(row_len * out_height);

    // Copy pixel data row by row
    for y in window.top as usize..window.bottom as usize {
        let start = y * src_stride + window.left as usize * channels;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(DecodedImage::with_layout(
        window.width(),
        window.height(),
        image.layout,
        output,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
