use std::time::Duration;

use coreg_core::progress::{JobStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner showing the current job stage.
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        Self { pb }
    }

    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(message.to_string());
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: JobStage) {
        self.pb.set_message(stage.to_string());
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.abandon();
        }
    }
}
