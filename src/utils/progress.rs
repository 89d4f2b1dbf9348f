//! Step spinners shown while scaffolding

use core::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

/// A spinner for one scaffolding step
///
/// Hidden automatically when stderr is not a terminal.
pub struct Step {
    bar: ProgressBar,
    message: String,
}

impl Step {
    /// Start spinning with `message`
    #[must_use]
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            message: message.to_owned(),
        }
    }

    /// Finish with a check mark and the original message
    pub fn succeed(self) {
        let message = format!("\u{2713} {}", self.message);
        self.bar.finish_with_message(message);
    }

    /// Finish with a check mark and extra detail after the message
    pub fn succeed_with(self, detail: &str) {
        let message = format!("\u{2713} {} {}", self.message, detail);
        self.bar.finish_with_message(message);
    }
}

impl Drop for Step {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
