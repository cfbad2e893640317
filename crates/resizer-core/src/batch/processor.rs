//! Sequential batch processing.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::{
    BatchReport, DeleteWarning, FailureReason, ItemFailure, ItemState, Outcome,
};
use crate::decode::decode_file;
use crate::encode::encode_for_path;
use crate::size::TargetSize;
use crate::transform::fit_and_crop;

/// Source paths waiting for the next run. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBatch {
    sources: Vec<PathBuf>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.sources.push(path.into());
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.sources.iter()
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Take every pending path, leaving the batch empty.
    pub fn take(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.sources)
    }

    /// Process all pending paths, then empty the batch.
    ///
    /// Failed items are dropped along with the rest; nothing is re-queued.
    pub fn run(&mut self, target: TargetSize, output_dir: &Path) -> Outcome {
        if self.is_empty() {
            return Outcome::NothingToDo;
        }
        let sources = self.take();
        process(&sources, target, output_dir)
    }
}

impl<P: Into<PathBuf>> Extend<P> for PendingBatch {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.sources.extend(iter.into_iter().map(Into::into));
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for PendingBatch {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

/// Destination for `source` inside `output_dir`: same file name.
///
/// Returns `None` when `source` has no file name (e.g. ends in `..`).
pub fn destination_for(source: &Path, output_dir: &Path) -> Option<PathBuf> {
    source.file_name().map(|name| output_dir.join(name))
}

/// Resize, crop, write and delete each source in order.
///
/// Per-item failures are recorded and the loop moves on. An empty `sources`
/// returns [`Outcome::NothingToDo`] without touching the filesystem.
pub fn process(sources: &[PathBuf], target: TargetSize, output_dir: &Path) -> Outcome {
    process_with(sources, target, output_dir, |path| std::fs::remove_file(path))
}

fn process_with<R>(
    sources: &[PathBuf],
    target: TargetSize,
    output_dir: &Path,
    mut remove_source: R,
) -> Outcome
where
    R: FnMut(&Path) -> io::Result<()>,
{
    if sources.is_empty() {
        debug!("Empty batch, nothing to do");
        return Outcome::NothingToDo;
    }

    info!(
        "Processing batch of {} images to {} in {}",
        sources.len(),
        target,
        output_dir.display()
    );

    let mut report = BatchReport {
        target,
        processed: 0,
        failures: Vec::new(),
        delete_warnings: Vec::new(),
    };

    for source in sources {
        let state = process_item(source, target, output_dir, &mut remove_source, &mut report);
        debug!("{} -> {:?}", source.display(), state);
        if state.is_processed() {
            report.processed += 1;
        }
    }

    if report.failures.is_empty() {
        info!("Batch completed: {} images processed", report.processed);
    } else {
        warn!(
            "Batch completed with {} failed images out of {}",
            report.failures.len(),
            sources.len()
        );
    }

    Outcome::Completed(report)
}

fn process_item<R>(
    source: &Path,
    target: TargetSize,
    output_dir: &Path,
    remove_source: &mut R,
    report: &mut BatchReport,
) -> ItemState
where
    R: FnMut(&Path) -> io::Result<()>,
{
    let mut fail = |reason: FailureReason, detail: String| {
        warn!("{} failed ({}): {}", source.display(), reason, detail);
        report.failures.push(ItemFailure {
            path: source.to_path_buf(),
            reason,
            detail,
        });
        match reason {
            FailureReason::Decode => ItemState::DecodeFailed,
            FailureReason::Write => ItemState::WriteFailed,
        }
    };

    let image = match decode_file(source) {
        Ok(image) => image,
        Err(e) => return fail(FailureReason::Decode, e.to_string()),
    };
    debug!("{} {:?} ({}x{})", source.display(), ItemState::Decoded, image.width, image.height);

    let cropped = match fit_and_crop(&image, target) {
        Ok(cropped) => cropped,
        Err(e) => return fail(FailureReason::Decode, e.to_string()),
    };
    debug!("{} {:?}", source.display(), ItemState::Cropped);

    let Some(destination) = destination_for(source, output_dir) else {
        return fail(FailureReason::Write, "source path has no file name".to_string());
    };

    // Checked before writing: afterwards the destination always exists.
    let in_place = is_same_file(source, &destination);

    let bytes = match encode_for_path(&cropped, &destination) {
        Ok(bytes) => bytes,
        Err(e) => return fail(FailureReason::Write, e.to_string()),
    };

    if let Err(e) = std::fs::write(&destination, bytes) {
        return fail(
            FailureReason::Write,
            format!("{}: {}", destination.display(), e),
        );
    }
    debug!("{} {:?} to {}", source.display(), ItemState::Written, destination.display());

    if in_place {
        debug!("{} {:?}, output replaced the source", source.display(), ItemState::Replaced);
        return ItemState::Replaced;
    }

    // The source must outlive a fully written output.
    match remove_source(source) {
        Ok(()) => ItemState::Deleted,
        Err(e) => {
            warn!("Error deleting file {}: {}", source.display(), e);
            report.delete_warnings.push(DeleteWarning {
                path: source.to_path_buf(),
                detail: e.to_string(),
            });
            ItemState::DeleteFailed
        }
    }
}

/// Both paths exist and resolve to the same file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use tempfile::TempDir;

    fn size(w: u32, h: u32) -> TargetSize {
        TargetSize::new(w, h).unwrap()
    }

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        });
        img.save(&path).unwrap();
        path
    }

    fn dirs() -> (TempDir, TempDir) {
        (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap())
    }

    fn dir_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_empty_batch_touches_nothing() {
        let (_input, output) = dirs();
        let outcome = process(&[], size(10, 10), output.path());

        assert_eq!(outcome, Outcome::NothingToDo);
        assert_eq!(outcome.processed_count(), 0);
        assert!(outcome.failures().is_empty());
        assert_eq!(dir_entries(output.path()), 0);
    }

    #[test]
    fn test_empty_batch_with_missing_output_dir() {
        let outcome = process(&[], size(10, 10), Path::new("/definitely/not/here"));
        assert_eq!(outcome, Outcome::NothingToDo);
    }

    #[test]
    fn test_all_valid_sources() {
        let (input, output) = dirs();
        let sources = vec![
            write_image(input.path(), "a.png", 80, 40),
            write_image(input.path(), "b.jpg", 30, 90),
            write_image(input.path(), "c.bmp", 64, 64),
        ];

        let outcome = process(&sources, size(32, 20), output.path());

        assert_eq!(outcome.processed_count(), 3);
        assert!(outcome.failures().is_empty());
        assert!(outcome.delete_warnings().is_empty());
        for source in &sources {
            assert!(!source.exists(), "{} should be deleted", source.display());
            let dest = output.path().join(source.file_name().unwrap());
            let written = image::open(&dest).unwrap();
            assert_eq!((written.width(), written.height()), (32, 20));
        }
    }

    #[test]
    fn test_corrupt_source_is_skipped() {
        let (input, output) = dirs();
        let corrupt = input.path().join("broken.jpg");
        std::fs::write(&corrupt, b"not an image at all").unwrap();
        let sources = vec![
            write_image(input.path(), "first.png", 50, 50),
            corrupt.clone(),
            write_image(input.path(), "third.png", 50, 50),
        ];

        let outcome = process(&sources, size(25, 25), output.path());

        assert_eq!(outcome.processed_count(), 2);
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].path, corrupt);
        assert_eq!(outcome.failures()[0].reason, FailureReason::Decode);
        assert!(corrupt.exists());
        assert!(!output.path().join("broken.jpg").exists());
        assert!(output.path().join("third.png").exists());
    }

    #[test]
    fn test_missing_source_is_decode_failure() {
        let (input, output) = dirs();
        let missing = input.path().join("gone.png");

        let outcome = process(&[missing.clone()], size(10, 10), output.path());

        assert_eq!(outcome.processed_count(), 0);
        assert_eq!(outcome.failures()[0].reason, FailureReason::Decode);
    }

    #[test]
    fn test_unwritable_destination_keeps_source() {
        let (input, output) = dirs();
        let source = write_image(input.path(), "keep.png", 20, 20);
        let missing_dir = output.path().join("does_not_exist");

        let outcome = process(&[source.clone()], size(10, 10), &missing_dir);

        assert_eq!(outcome.processed_count(), 0);
        assert_eq!(outcome.failures()[0].reason, FailureReason::Write);
        assert!(source.exists());
    }

    #[test]
    fn test_unknown_extension_is_write_failure() {
        let (input, output) = dirs();
        let path = input.path().join("photo.data");
        let img = image::RgbImage::from_pixel(20, 20, image::Rgb([1, 2, 3]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();

        let outcome = process(&[path.clone()], size(10, 10), output.path());

        assert_eq!(outcome.failures()[0].reason, FailureReason::Write);
        assert!(path.exists());
        assert_eq!(dir_entries(output.path()), 0);
    }

    #[test]
    fn test_alpha_into_jpeg_is_write_failure() {
        let (input, output) = dirs();
        // PNG content with RGBA under a .jpg name: decodes fine, cannot be stored as JPEG.
        let path = input.path().join("transparent.jpg");
        let img = image::RgbaImage::from_pixel(20, 20, image::Rgba([1, 2, 3, 4]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();

        let outcome = process(&[path.clone()], size(10, 10), output.path());

        assert_eq!(outcome.failures()[0].reason, FailureReason::Write);
        assert!(path.exists());
    }

    #[test]
    fn test_duplicate_paths_second_fails_decode() {
        let (input, output) = dirs();
        let source = write_image(input.path(), "twice.png", 20, 20);

        let outcome = process(&[source.clone(), source.clone()], size(10, 10), output.path());

        // First pass writes and deletes; the second finds nothing to read.
        assert_eq!(outcome.processed_count(), 1);
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].reason, FailureReason::Decode);
    }

    #[test]
    fn test_failures_keep_input_order() {
        let (input, output) = dirs();
        let a = input.path().join("a.png");
        let b = input.path().join("b.png");
        std::fs::write(&a, b"junk").unwrap();
        std::fs::write(&b, b"junk").unwrap();

        let outcome = process(&[b.clone(), a.clone()], size(10, 10), output.path());

        let paths: Vec<_> = outcome.failures().iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![b, a]);
    }

    #[test]
    fn test_report_echoes_target() {
        let (input, output) = dirs();
        let source = write_image(input.path(), "x.png", 40, 40);

        let outcome = process(&[source], size(12, 34), output.path());
        assert_eq!(outcome.report().unwrap().target, size(12, 34));
    }

    #[test]
    fn test_delete_failure_still_counts() {
        let (input, output) = dirs();
        let source = write_image(input.path(), "stuck.png", 30, 30);

        // Replace the source with a non-empty directory so removal fails for
        // any user, root included.
        let outcome = process_with(&[source.clone()], size(10, 10), output.path(), |path| {
            std::fs::remove_file(path)?;
            std::fs::create_dir(path)?;
            std::fs::write(path.join("keep"), b"x")?;
            std::fs::remove_file(path)
        });

        assert_eq!(outcome.processed_count(), 1);
        assert!(outcome.failures().is_empty());
        assert_eq!(outcome.delete_warnings().len(), 1);
        assert_eq!(outcome.delete_warnings()[0].path, source);
        assert!(output.path().join("stuck.png").exists());
    }

    #[test]
    fn test_output_dir_is_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_image(dir.path(), "photo.png", 40, 20);

        let outcome = process(&[source.clone()], size(10, 10), dir.path());

        assert_eq!(outcome.processed_count(), 1);
        assert!(outcome.failures().is_empty());
        assert!(outcome.delete_warnings().is_empty());
        let written = image::open(&source).unwrap();
        assert_eq!((written.width(), written.height()), (10, 10));
    }

    #[test]
    fn test_output_dir_is_source_dir_via_other_spelling() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let source = write_image(dir.path(), "photo.png", 40, 20);

        // Same folder reached through `sub/..`
        let outcome = process(&[source.clone()], size(10, 10), &dir.path().join("sub").join(".."));

        assert_eq!(outcome.processed_count(), 1);
        assert!(source.exists());
    }

    #[test]
    fn test_oversized_cover_is_decode_failure() {
        let (input, output) = dirs();
        // 10000x1 at 1200x628 would need a 6280000x628 intermediate
        let source = write_image(input.path(), "strip.png", 10_000, 1);

        let outcome = process(&[source.clone()], size(1200, 628), output.path());

        assert_eq!(outcome.processed_count(), 0);
        assert_eq!(outcome.failures()[0].reason, FailureReason::Decode);
        assert!(source.exists());
        assert_eq!(dir_entries(output.path()), 0);
    }

    #[test]
    fn test_pending_batch_run_clears() {
        let (input, output) = dirs();
        let mut batch: PendingBatch = vec![
            write_image(input.path(), "one.png", 20, 20),
            input.path().join("missing.png"),
        ]
        .into_iter()
        .collect();

        let outcome = batch.run(size(10, 10), output.path());

        assert_eq!(outcome.processed_count(), 1);
        assert_eq!(outcome.failures().len(), 1);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_pending_batch_keeps_duplicates() {
        let mut batch = PendingBatch::new();
        batch.push("/a.png");
        batch.extend(["/a.png", "/b.png"]);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.iter().filter(|p| p.ends_with("a.png")).count(), 2);

        batch.clear();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_empty_pending_batch_run() {
        let mut batch = PendingBatch::new();
        let outcome = batch.run(size(10, 10), Path::new("/nowhere"));
        assert_eq!(outcome, Outcome::NothingToDo);
    }

    #[test]
    fn test_destination_for() {
        assert_eq!(
            destination_for(Path::new("/in/photo.jpg"), Path::new("/out")),
            Some(PathBuf::from("/out/photo.jpg"))
        );
        assert_eq!(destination_for(Path::new("/in/.."), Path::new("/out")), None);
    }
}
