//! Resizer Core - batch resize-and-crop library
//!
//! This crate provides the image resizer's semantics: cover scaling with a
//! center crop to an exact target size, the batch protocol that writes
//! outputs and removes originals, and the persisted output folder.
//!
//! # Modules
//!
//! - `size` - Target dimensions and presets
//! - `decode` - Reading image files into pixel buffers
//! - `transform` - Cover geometry and cropping
//! - `encode` - Writing pixel buffers in the destination's format
//! - `batch` - The per-batch pipeline
//! - `config` - Output folder persistence

pub mod batch;
pub mod config;
pub mod decode;
pub mod encode;
pub mod size;
pub mod transform;

pub use batch::{process, FailureReason, Outcome, PendingBatch};
pub use config::{ConfigError, ConfigStore, OutputLocation};
pub use size::{Preset, SizeError, TargetSize};
pub use transform::{fit_and_crop, CoverPlan, CropWindow};
