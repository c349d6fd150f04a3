use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Shown while a single validation request is in flight
pub struct CheckSpinner {
    bar: ProgressBar,
}

impl CheckSpinner {
    pub fn start(domain: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(&["◐", "◓", "◑", "◒", "●"])
            .template("{spinner:.yellow} asking the validator about {msg} ({elapsed})")
        {
            bar.set_style(style);
        }
        bar.set_message(domain.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar }
    }

    pub fn stop(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for CheckSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
