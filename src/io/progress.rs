//! Step-by-step progress display for a composition run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Stages of a composition run after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Laying out, drawing and encoding
    Compose,
    /// Writing the encoded result
    Write,
}

impl Stage {
    const fn label(self) -> &'static str {
        match self {
            Self::Compose => "composing",
            Self::Write => "writing",
        }
    }
}

/// Single progress bar covering one decode step per image plus each [`Stage`]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no steps yet
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(STEP_STYLE.clone());
        Self { bar }
    }

    /// Size the bar for `image_count` decodes followed by the remaining stages
    pub fn initialize(&self, image_count: usize) {
        self.bar.set_length((image_count + 2) as u64);
        self.bar.set_position(0);
        self.bar.set_message(format!("decoding {image_count} images"));
    }

    /// Record that an image finished decoding
    ///
    /// Safe to call from decoder threads as each file completes.
    pub fn image_decoded(&self, path: &Path) {
        let display_name = path.file_name().unwrap_or_default().to_string_lossy();
        self.bar.set_message(format!("decoded {display_name}"));
        self.bar.inc(1);
    }

    /// Record the start of a stage
    pub fn start_stage(&self, stage: Stage) {
        self.bar.set_message(stage.label());
    }

    /// Record the end of a stage
    pub fn complete_stage(&self, stage: Stage) {
        log::trace!("finished {}", stage.label());
        self.bar.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Steps completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total steps expected
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}
