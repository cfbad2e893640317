//! Command-line front end.
//!
//! Queues the given files, resizes them to the chosen size into the saved
//! output folder, and prints the status line.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use resizer_app::{Session, Status};
use resizer_core::config::DEFAULT_CONFIG_FILE;
use resizer_core::{ConfigStore, Preset, TargetSize};

#[derive(Debug, Parser)]
#[command(
    name = "image-resizer",
    version,
    about = "Resize and center-crop images to an exact size, removing the originals",
    rename_all = "kebab-case"
)]
struct Arguments {
    /// File holding the saved output folder.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Select and save a new output folder before processing.
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Built-in size: link-preview (1200x628) or small (640x420).
    #[arg(long, short = 'p', value_name = "NAME", conflicts_with_all = ["size", "width", "height"])]
    preset: Option<Preset>,
    /// Exact size as WIDTHxHEIGHT.
    #[arg(long, short = 's', value_name = "WxH", conflicts_with_all = ["width", "height"])]
    size: Option<TargetSize>,
    /// Custom width; must be given with --height.
    #[arg(long, value_name = "PIXELS", requires = "height")]
    width: Option<String>,
    /// Custom height; must be given with --width.
    #[arg(long, value_name = "PIXELS", requires = "width")]
    height: Option<String>,
    /// Images to resize. Each is replaced by its resized copy in the output folder.
    files: Vec<PathBuf>,
}

/// How the batch size was chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SizeRequest {
    Preset(Preset),
    Exact(TargetSize),
    /// Unparsed `--width`/`--height` text, validated by the session.
    Custom { width: String, height: String },
}

impl Arguments {
    /// The size flags given, if any.
    fn size_request(&self) -> Option<SizeRequest> {
        match (self.preset, self.size, &self.width, &self.height) {
            (Some(preset), _, _, _) => Some(SizeRequest::Preset(preset)),
            (None, Some(size), _, _) => Some(SizeRequest::Exact(size)),
            (None, None, Some(width), Some(height)) => Some(SizeRequest::Custom {
                width: width.clone(),
                height: height.clone(),
            }),
            _ => None,
        }
    }
}

/// Run the queued files at the requested size, or the default preset.
fn resize(session: &mut Session, request: Option<SizeRequest>) -> &Status {
    match request {
        Some(SizeRequest::Preset(preset)) => session.resize_to_preset(preset),
        Some(SizeRequest::Exact(size)) => session.resize_to(size),
        Some(SizeRequest::Custom { width, height }) => session.resize_to_custom(&width, &height),
        None => session.resize_to(TargetSize::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Arguments::parse();
    let request = args.size_request();
    let mut session = Session::new(ConfigStore::new(&args.config));

    if let Some(dir) = &args.output_dir {
        // Still used for this run even if it could not be saved
        if let Err(e) = session.select_output_folder(dir) {
            warn!("{}", e);
        }
    }
    println!("Output Folder: {}", session.output_folder().display());

    // Only folder selection requested
    if args.files.is_empty() && request.is_none() {
        println!("{}", session.status());
        return Ok(());
    }

    session.add_files(args.files);
    let status = resize(&mut session, request).clone();

    if let Some(outcome) = session.last_outcome() {
        for failure in outcome.failures() {
            eprintln!("{}: {} ({})", failure.path.display(), failure.reason, failure.detail);
        }
        for warning in outcome.delete_warnings() {
            eprintln!("{}: not deleted ({})", warning.path.display(), warning.detail);
        }
    }
    println!("{status}");
    if status == Status::InvalidInput {
        bail!("invalid size input");
    }
    Ok(())
}
