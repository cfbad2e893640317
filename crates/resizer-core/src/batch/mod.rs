//! Batch processing: decode, fit, write, delete.
//!
//! Items run strictly one after another. A failing item is recorded and the
//! batch carries on; only an empty batch short-circuits. The output folder is
//! a plain argument, so a batch keeps the folder it started with.

mod processor;
mod types;

pub use processor::{destination_for, process, PendingBatch};
pub use types::{BatchReport, DeleteWarning, FailureReason, ItemFailure, ItemState, Outcome};
