//! User-facing status line.

use std::fmt;

use resizer_core::batch::Outcome;
use resizer_core::TargetSize;

/// What the front end should show after the last action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing queued yet, or the last batch finished.
    #[default]
    Waiting,
    /// Files are queued.
    Ready,
    /// A resize was requested with nothing queued.
    NoImages,
    /// Custom width/height text was rejected; the queue is untouched.
    InvalidInput,
    /// A batch finished.
    Processed {
        processed: usize,
        target: TargetSize,
        failed: usize,
        undeleted: usize,
    },
}

impl Status {
    /// Status for a batch outcome. An empty batch maps to `NoImages`.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome.report() {
            None => Status::NoImages,
            Some(report) => Status::Processed {
                processed: report.processed,
                target: report.target,
                failed: report.failures.len(),
                undeleted: report.delete_warnings.len(),
            },
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Waiting => f.write_str("Waiting for images..."),
            Status::Ready => f.write_str("Images ready to resize"),
            Status::NoImages => f.write_str("No images have been added!"),
            Status::InvalidInput => {
                f.write_str("Invalid input! Enter valid width and height values.")
            }
            Status::Processed {
                processed,
                target,
                failed,
                undeleted,
            } => {
                write!(f, "Processed {processed} images to {target}")?;
                if *failed > 0 {
                    write!(f, " ({failed} failed)")?;
                }
                if *undeleted > 0 {
                    write!(f, " ({undeleted} originals not deleted)")?;
                }
                f.write_str("! Waiting for images...")
            }
        }
    }
}
