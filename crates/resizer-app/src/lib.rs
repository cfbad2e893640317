//! Resizer App - session front end for resizer-core
//!
//! Holds the state a resizer window would hold (queued files, chosen size,
//! output folder, status line) without any widget code, so any front end can
//! drive it. The `image-resizer` binary is the command-line one.

mod session;
mod status;

pub use session::{BatchHandle, Session, SessionError};
pub use status::Status;
