//! Batch results.

use std::fmt;
use std::path::PathBuf;

use crate::size::TargetSize;

/// Why an item was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Source unreadable, not an image, or malformed.
    Decode,
    /// Output could not be encoded or written. The source is kept.
    Write,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Decode => f.write_str("DecodeError"),
            FailureReason::Write => f.write_str("WriteError"),
        }
    }
}

/// An item that stopped before its output was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub reason: FailureReason,
    /// Underlying error text.
    pub detail: String,
}

/// Output was written but the source could not be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteWarning {
    pub path: PathBuf,
    pub detail: String,
}

/// Where one item ended up.
///
/// `Pending → Decoded → Cropped → Written → (Deleted | DeleteFailed)`, or one
/// of the terminal failures `DecodeFailed` / `WriteFailed`. When the output
/// path is the source itself the item ends at `Replaced` and nothing is
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Decoded,
    Cropped,
    Written,
    Deleted,
    DeleteFailed,
    Replaced,
    DecodeFailed,
    WriteFailed,
}

impl ItemState {
    /// The item's output exists on disk.
    pub fn is_processed(self) -> bool {
        matches!(
            self,
            ItemState::Deleted | ItemState::DeleteFailed | ItemState::Replaced
        )
    }
}

/// Summary of a completed, non-empty batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// The size every output was produced at.
    pub target: TargetSize,
    /// Items whose output was written.
    pub processed: usize,
    /// Items that failed before writing, in input order.
    pub failures: Vec<ItemFailure>,
    /// Written items whose source is still on disk.
    pub delete_warnings: Vec<DeleteWarning>,
}

/// Result of [`process`](super::process).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The batch was empty; nothing was touched.
    NothingToDo,
    Completed(BatchReport),
}

impl Outcome {
    pub fn processed_count(&self) -> usize {
        match self {
            Outcome::NothingToDo => 0,
            Outcome::Completed(report) => report.processed,
        }
    }

    pub fn failures(&self) -> &[ItemFailure] {
        match self {
            Outcome::NothingToDo => &[],
            Outcome::Completed(report) => &report.failures,
        }
    }

    pub fn delete_warnings(&self) -> &[DeleteWarning] {
        match self {
            Outcome::NothingToDo => &[],
            Outcome::Completed(report) => &report.delete_warnings,
        }
    }

    pub fn report(&self) -> Option<&BatchReport> {
        match self {
            Outcome::NothingToDo => None,
            Outcome::Completed(report) => Some(report),
        }
    }
}
