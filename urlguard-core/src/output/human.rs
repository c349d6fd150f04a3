use colored::Colorize;

use super::OutputFormatter;
use crate::check::CheckStatus;
use crate::colors::PaletteExt;
use crate::monitor::{AlertOutcome, CycleSummary, DomainOutcome};

fn status_mark(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Normal => "✓",
        CheckStatus::Abnormal => "✗",
        CheckStatus::Unknown | CheckStatus::Failed => "⚠",
    }
}

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            PaletteExt::label(&text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn status(&self, status: CheckStatus, text: &str) -> String {
        if self.use_colors {
            text.for_status(status).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.use_colors {
            PaletteExt::muted(&text).to_string()
        } else {
            text.to_string()
        }
    }

    fn alert_line(&self, alert: &AlertOutcome) -> Option<String> {
        let line = match alert {
            AlertOutcome::NotNeeded => return None,
            AlertOutcome::Sent => self.status(CheckStatus::Normal, "sent"),
            AlertOutcome::Failed(reason) => {
                self.status(CheckStatus::Unknown, &format!("delivery failed ({})", reason))
            }
            AlertOutcome::Disabled => self.muted("no webhook configured"),
        };
        Some(format!("  {}: {}", self.label("Alert"), line))
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_outcome(&self, outcome: &DomainOutcome) -> String {
        let mut output = Vec::new();

        let headline = format!(
            "{} {}",
            status_mark(outcome.status),
            outcome.status.to_string().to_uppercase()
        );
        output.push(format!(
            "{}  {}",
            self.status(outcome.status, &headline),
            outcome.domain
        ));

        if !outcome.message.is_empty() {
            output.push(format!("  {}: {}", self.label("Message"), outcome.message));
        }

        if let Some(line) = self.alert_line(&outcome.alert) {
            output.push(line);
        }

        output.join("\n")
    }

    fn format_summary(&self, summary: &CycleSummary) -> String {
        let mut output = Vec::new();

        let title = if summary.interrupted {
            format!("Cycle {} (interrupted)", summary.timestamp)
        } else {
            format!("Cycle {}", summary.timestamp)
        };
        output.push(self.label(&title));
        output.push(format!(
            "  {} {}",
            self.status(CheckStatus::Normal, "normal:  "),
            summary.normal
        ));
        output.push(format!(
            "  {} {}",
            self.status(CheckStatus::Abnormal, "abnormal:"),
            summary.abnormal
        ));
        output.push(format!(
            "  {} {}",
            self.status(CheckStatus::Unknown, "unknown: "),
            summary.unknown
        ));

        if summary.notifications_sent + summary.notifications_failed > 0 {
            output.push(format!(
                "  {} {} sent, {} failed",
                self.label("alerts:  "),
                summary.notifications_sent,
                summary.notifications_failed
            ));
        }

        match summary.log_path {
            Some(ref path) => output.push(self.muted(&format!("  saved to {}", path.display()))),
            None if summary.checked > 0 => {
                output.push(self.status(CheckStatus::Unknown, "  journal not saved"))
            }
            None => {}
        }

        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(status: CheckStatus, message: &str, alert: AlertOutcome) -> DomainOutcome {
        DomainOutcome {
            domain: "b.example".to_string(),
            status,
            message: message.to_string(),
            result: None,
            alert,
            checked_at: None,
        }
    }

    #[test]
    fn test_outcome_plain_text() {
        let text = HumanFormatter::new()
            .without_colors()
            .format_outcome(&outcome(CheckStatus::Abnormal, "blocked", AlertOutcome::Sent));

        assert!(text.starts_with("✗ ABNORMAL  b.example"));
        assert!(text.contains("Message: blocked"));
        assert!(text.contains("Alert: sent"));
    }

    #[test]
    fn test_normal_outcome_has_no_alert_line() {
        let text = HumanFormatter::new()
            .without_colors()
            .format_outcome(&outcome(CheckStatus::Normal, "ok", AlertOutcome::NotNeeded));

        assert!(!text.contains("Alert"));
    }

    #[test]
    fn test_summary_plain_text() {
        let summary = CycleSummary {
            timestamp: "2026-03-14 09:00:00".to_string(),
            checked: 3,
            normal: 1,
            abnormal: 1,
            unknown: 1,
            notifications_sent: 1,
            log_path: Some(PathBuf::from("logs/2026-03-14.json")),
            ..CycleSummary::default()
        };

        let text = HumanFormatter::new().without_colors().format_summary(&summary);

        assert!(text.contains("Cycle 2026-03-14 09:00:00"));
        assert!(text.contains("abnormal: 1"));
        assert!(text.contains("1 sent, 0 failed"));
        assert!(text.contains("saved to logs/2026-03-14.json"));
    }
}
