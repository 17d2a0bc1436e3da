//! Progress display for the phases of a mosaic run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ({{elapsed}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per phase (tiles, cells, assignment)
///
/// Finished phases stay on screen until [`finish`](Self::finish).
pub struct ProgressManager {
    multi_progress: MultiProgress,
    phase_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active phase
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            phase_bar: None,
        }
    }

    /// Start a new phase of `len` units, finishing the previous one
    pub fn start_phase(&mut self, label: &str, len: usize) {
        self.finish_phase();
        let bar = ProgressBar::new(len as u64);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(200));
        self.phase_bar = Some(self.multi_progress.add(bar));
    }

    /// Advance the active phase
    pub fn advance(&self, units: u64) {
        if let Some(ref bar) = self.phase_bar {
            bar.inc(units);
        }
    }

    /// Mark the active phase as complete
    pub fn finish_phase(&mut self) {
        if let Some(bar) = self.phase_bar.take() {
            bar.finish();
        }
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_phase();
        let _ = self.multi_progress.clear();
    }
}
