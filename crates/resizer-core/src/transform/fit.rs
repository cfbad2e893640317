//! Cover scaling followed by a center crop.
//!
//! The source is scaled, keeping its aspect ratio, until it covers the target
//! box on both axes. The overflow on the longer axis is then trimmed evenly
//! from both sides. The result never has letterbox bars and always has
//! exactly the target size.

use thiserror::Error;

use super::crop::{apply_crop, CropError, CropWindow};
use crate::decode::{resize, DecodeError, DecodedImage};
use crate::size::TargetSize;

/// Errors from [`fit_and_crop`].
#[derive(Debug, Error)]
pub enum TransformError {
    /// Source has a zero dimension, so it has no aspect ratio.
    #[error("Source image has no pixels ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    /// Covering the target would need a scaled image above [`MAX_RESIZED_PIXELS`].
    #[error("Scaled image would be too large ({width}x{height})")]
    TooLarge { width: u32, height: u32 },

    /// Resampling failed.
    #[error("Resize failed: {0}")]
    Resize(#[from] DecodeError),

    /// Crop window did not fit the resized image.
    #[error(transparent)]
    Crop(#[from] CropError),
}

/// Largest intermediate image `fit_and_crop` will allocate, in pixels.
///
/// Only extreme aspect ratios get near this: a 10000x1 strip covering a
/// 1200x628 box would scale to 6.28 million by 628.
pub const MAX_RESIZED_PIXELS: u64 = 100_000_000;

/// Resize box and crop window for one source/target pair.
///
/// Pure geometry: the same inputs always produce the same plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverPlan {
    /// Width after scaling, before cropping.
    pub resized_width: u32,
    /// Height after scaling, before cropping.
    pub resized_height: u32,
    /// Region of the scaled image that is kept.
    pub window: CropWindow,
}

impl CoverPlan {
    /// Compute the plan for a `src_width x src_height` source.
    ///
    /// When the source is relatively wider than the target, the height is
    /// pinned to the target height and the width follows the source ratio;
    /// otherwise (taller or equal) the width is pinned. The free axis is
    /// rounded to the nearest pixel and never drops below the target.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::EmptySource` if either source dimension is 0.
    pub fn compute(
        src_width: u32,
        src_height: u32,
        target: TargetSize,
    ) -> Result<Self, TransformError> {
        if src_width == 0 || src_height == 0 {
            return Err(TransformError::EmptySource {
                width: src_width,
                height: src_height,
            });
        }

        let img_ratio = src_width as f64 / src_height as f64;
        let (tw, th) = (target.width(), target.height());

        let (resized_width, resized_height) = if img_ratio > target.ratio() {
            let new_width = round_to_pixels(th as f64 * img_ratio);
            (new_width.max(tw), th)
        } else {
            let new_height = round_to_pixels(tw as f64 / img_ratio);
            (tw, new_height.max(th))
        };

        Ok(Self {
            resized_width,
            resized_height,
            window: CropWindow::centered(resized_width, resized_height, tw, th),
        })
    }
}

fn round_to_pixels(value: f64) -> u32 {
    // `as` saturates, so absurd ratios clamp instead of wrapping
    value.round() as u32
}

/// Scale `image` to cover `target` and center-crop it to exactly that size.
///
/// Resampling uses Lanczos3. The channel layout of the source is kept.
///
/// # Errors
///
/// Returns `TransformError::EmptySource` for a zero-sized source and
/// `TransformError::TooLarge` when the scaled image would exceed
/// [`MAX_RESIZED_PIXELS`]; resize and crop errors indicate a pixel buffer that
/// does not match its dimensions.
pub fn fit_and_crop(image: &DecodedImage, target: TargetSize) -> Result<DecodedImage, TransformError> {
    let plan = CoverPlan::compute(image.width, image.height, target)?;

    if plan.resized_width as u64 * plan.resized_height as u64 > MAX_RESIZED_PIXELS {
        return Err(TransformError::TooLarge {
            width: plan.resized_width,
            height: plan.resized_height,
        });
    }

    let resized = resize(image, plan.resized_width, plan.resized_height)?;

    Ok(apply_crop(&resized, plan.window)?)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
