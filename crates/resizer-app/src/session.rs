//! Headless session state: what the resizer window keeps between clicks.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::{info, warn};

use resizer_core::batch::{self, Outcome, PendingBatch};
use resizer_core::{ConfigError, ConfigStore, OutputLocation, Preset, TargetSize};

use crate::status::Status;

/// Errors from a background batch.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Batch worker panicked")]
    WorkerPanicked,
}

/// A batch running on a worker thread.
///
/// The worker owns its source list and a copy of the output folder taken when
/// it started.
#[derive(Debug)]
pub struct BatchHandle {
    output_folder: PathBuf,
    worker: JoinHandle<Outcome>,
}

impl BatchHandle {
    /// Folder this batch writes to.
    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    /// Block until the batch completes.
    pub fn wait(self) -> Result<Outcome, SessionError> {
        self.worker.join().map_err(|_| SessionError::WorkerPanicked)
    }
}

/// Pending files, target size, output folder and status line.
#[derive(Debug)]
pub struct Session {
    pending: PendingBatch,
    output: OutputLocation,
    target: TargetSize,
    status: Status,
    last_outcome: Option<Outcome>,
}

impl Session {
    /// Start a session, loading the output folder from `store`.
    pub fn new(store: ConfigStore) -> Self {
        let output = OutputLocation::load(store);
        info!("Output folder: {}", output.folder().display());
        Self {
            pending: PendingBatch::new(),
            output,
            target: TargetSize::default(),
            status: Status::Waiting,
            last_outcome: None,
        }
    }

    pub fn pending(&self) -> &PendingBatch {
        &self.pending
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Outcome of the most recent batch, with per-file failures.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Size used by the last resize request.
    pub fn target(&self) -> TargetSize {
        self.target
    }

    pub fn output_folder(&self) -> &Path {
        self.output.folder()
    }

    /// Queue dropped or browsed files. Duplicates are kept.
    pub fn add_files<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let before = self.pending.len();
        self.pending.extend(paths);
        if self.pending.len() > before {
            self.status = Status::Ready;
        }
    }

    /// Drop all queued files. The status line is left as is.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Change the output folder and persist it.
    ///
    /// On error the new folder is still used for the rest of the session.
    pub fn select_output_folder(&mut self, folder: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let result = self.output.select(folder);
        if let Err(e) = &result {
            warn!("Output folder not saved: {}", e);
        }
        result
    }

    /// Process the queue at `target` on the calling thread.
    pub fn resize_to(&mut self, target: TargetSize) -> &Status {
        self.target = target;
        let outcome = self.pending.run(target, self.output.folder());
        self.record(outcome)
    }

    pub fn resize_to_preset(&mut self, preset: Preset) -> &Status {
        self.resize_to(preset.size())
    }

    /// Process the queue at a size typed by the user.
    ///
    /// Invalid text leaves the queue and target untouched.
    pub fn resize_to_custom(&mut self, width: &str, height: &str) -> &Status {
        match TargetSize::parse(width, height) {
            Ok(target) => self.resize_to(target),
            Err(e) => {
                warn!("{}", e);
                self.status = Status::InvalidInput;
                &self.status
            }
        }
    }

    /// Hand the queue to a worker thread.
    ///
    /// The queue is emptied immediately. Returns `None` and sets `NoImages`
    /// if nothing is queued.
    pub fn start_batch(&mut self, target: TargetSize) -> Option<BatchHandle> {
        if self.pending.is_empty() {
            self.status = Status::NoImages;
            return None;
        }

        self.target = target;
        let sources = self.pending.take();
        let output_folder = self.output.folder().to_path_buf();
        let folder = output_folder.clone();
        let worker = std::thread::spawn(move || batch::process(&sources, target, &folder));

        Some(BatchHandle {
            output_folder,
            worker,
        })
    }

    /// Wait for a background batch and update the status line from it.
    pub fn finish_batch(&mut self, handle: BatchHandle) -> Result<&Status, SessionError> {
        let outcome = handle.wait()?;
        Ok(self.record(outcome))
    }

    fn record(&mut self, outcome: Outcome) -> &Status {
        self.status = Status::from_outcome(&outcome);
        self.last_outcome = Some(outcome);
        &self.status
    }
}
