//! Progress display while parsing and identifying declarations
//!
//! Drawn on stderr with indicatif; disabled in quiet and JSON modes. Step
//! counts are kept either way and logged when a stage finishes.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

/// A step of the inspection workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Turning declarations into dependencies
    Parsing,
    /// Computing identifiers
    Identifying,
}

impl Stage {
    fn verb(self) -> &'static str {
        match self {
            Stage::Parsing => "Parsing",
            Stage::Identifying => "Identifying",
        }
    }
}

/// Counts for a finished stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTally {
    pub succeeded: u64,
    pub failed: u64,
}

/// Progress reporter for the inspection workflow
pub struct Progress {
    enabled: bool,
    stage: Option<Stage>,
    tally: StageTally,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stage: None,
            tally: StageTally::default(),
            bar: None,
        }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Begin a stage covering `total` declarations or dependencies
    pub fn start(&mut self, stage: Stage, total: u64) {
        self.finish();
        self.stage = Some(stage);

        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.set_message(stage.verb());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Record one finished item, naming it on the progress line
    pub fn step(&mut self, subject: &str, succeeded: bool) {
        if succeeded {
            self.tally.succeeded += 1;
        } else {
            self.tally.failed += 1;
        }

        if let (Some(bar), Some(stage)) = (&self.bar, self.stage) {
            bar.set_message(format!("{} {}", stage.verb(), subject));
            bar.inc(1);
        }
    }

    /// End the current stage, clearing the bar and returning its counts
    pub fn finish(&mut self) -> StageTally {
        let tally = std::mem::take(&mut self.tally);
        if let Some(stage) = self.stage.take() {
            debug!(
                stage = stage.verb(),
                succeeded = tally.succeeded,
                failed = tally.failed,
                "stage finished"
            );
        }
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        tally
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}
