//! Command-line interface for joining image files side by side

use crate::composition::CompositeOptions;
use crate::io::configuration::{DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_NAME, MAX_IMAGES, MIN_IMAGES};
use crate::io::error::{CompositionError, Result};
use crate::io::image::{load_all_with, save_composite};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::selection::ImageSelection;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "hconcat")]
#[command(
    author,
    version,
    about = "Join two or three images side by side at a common height"
)]
/// Command-line arguments for the composition tool
pub struct Cli {
    /// Images to join, left to right
    #[arg(value_name = "IMAGES", required = true)]
    pub images: Vec<PathBuf>,

    /// Where to write the JPEG composite
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// JPEG quality from 1 to 100
    #[arg(short = 'Q', long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Overwrite the output if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if an existing output should be left untouched
    pub const fn skip_existing(&self) -> bool {
        !self.force
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Runs one composition from the parsed command line
pub struct CompositionRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CompositionRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Decode, compose and write, returning the output path
    ///
    /// Returns `Ok(None)` when the output exists and overwriting was not requested.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two or more than three images are given
    /// - The quality is out of range
    /// - Any image cannot be decoded or composed
    /// - The output cannot be written
    pub fn run(&self) -> Result<Option<PathBuf>> {
        let count = self.cli.images.len();
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&count) {
            return Err(CompositionError::SelectionSize {
                count,
                min: MIN_IMAGES,
                max: MAX_IMAGES,
            });
        }

        let output_path = &self.cli.output;
        if self.cli.skip_existing() && output_path.exists() {
            log::warn!(
                "Skipping: {} already exists (use --force to overwrite)",
                output_path.display()
            );
            return Ok(None);
        }

        let options = CompositeOptions::with_quality(self.cli.quality)?;
        let start_time = Instant::now();

        if let Some(ref pm) = self.progress_manager {
            pm.initialize(count);
        }

        let images = load_all_with(&self.cli.images, |_, path| {
            if let Some(ref pm) = self.progress_manager {
                pm.image_decoded(path);
            }
        })?;
        let mut selection = ImageSelection::new();
        for (path, image) in self.cli.images.iter().zip(images) {
            selection.push(display_name(path), image)?;
        }
        let names = selection.names().join(", ");

        self.start_stage(Stage::Compose);
        let result = selection.compose(&options)?;
        self.complete_stage(Stage::Compose);

        self.start_stage(Stage::Write);
        save_composite(result, output_path)?;
        self.complete_stage(Stage::Write);

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        log::info!(
            "joined {names} into {} ({}x{}) in {:.2?}",
            output_path.display(),
            result.width(),
            result.height(),
            start_time.elapsed()
        );

        Ok(Some(output_path.clone()))
    }

    fn start_stage(&self, stage: Stage) {
        if let Some(ref pm) = self.progress_manager {
            pm.start_stage(stage);
        }
    }

    fn complete_stage(&self, stage: Stage) {
        if let Some(ref pm) = self.progress_manager {
            pm.complete_stage(stage);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
