use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinners shown on stderr while a run is in flight
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the current spinner with one showing `message`
    pub fn start(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        self.finish_and_clear();
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(pb);
    }

    pub fn finish_with_message(&mut self, message: &str) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_with_message(format!("✓ {message}"));
        }
    }

    pub fn finish_and_clear(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}
