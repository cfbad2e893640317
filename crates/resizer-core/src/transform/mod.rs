//! The resize-and-crop transform.
//!
//! # Pipeline
//!
//! 1. Compute a [`CoverPlan`]: the smallest aspect-preserving box that covers
//!    the target, and a centered window of the target size inside it.
//! 2. Resample the source to the box.
//! 3. Cut the window out.
//!
//! # Coordinate System
//!
//! - Crop windows are in pixels of the resized image
//! - Origin is top-left corner

mod crop;
mod fit;

pub use crop::{apply_crop, CropError, CropWindow};
pub use fit::{fit_and_crop, CoverPlan, TransformError, MAX_RESIZED_PIXELS};
