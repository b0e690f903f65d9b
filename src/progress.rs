use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while waiting on the explorer.
pub struct ApiProgress {
    bar: ProgressBar,
}

impl ApiProgress {
    fn spinner(template: &str, message: &str, tick: Duration) -> Self {
        let style = ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(tick);

        Self { bar }
    }

    pub fn new_upload() -> Self {
        Self::spinner(
            "🚀 {msg} {spinner:.green}",
            "Submitting source for verification...",
            Duration::from_millis(80),
        )
    }

    pub fn new_polling() -> Self {
        Self::spinner(
            "⏳ {msg} {spinner:.yellow}",
            "Waiting for the explorer to verify...",
            Duration::from_millis(120),
        )
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}
