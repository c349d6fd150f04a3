//! Terminal palette for check output.
//!
//! Uses standard ANSI bright colors so the output reads the same in any
//! terminal theme.

use colored::{ColoredString, Colorize};

use crate::check::CheckStatus;

/// Extension trait mapping output roles to colors
pub trait PaletteExt {
    fn ok(&self) -> ColoredString;
    fn alert(&self) -> ColoredString;
    fn caution(&self) -> ColoredString;
    fn accent(&self) -> ColoredString;
    fn label(&self) -> ColoredString;
    fn muted(&self) -> ColoredString;
    /// Color by check status
    fn for_status(&self, status: CheckStatus) -> ColoredString;
}

impl<S: AsRef<str>> PaletteExt for S {
    fn ok(&self) -> ColoredString {
        self.as_ref().bright_green()
    }

    fn alert(&self) -> ColoredString {
        self.as_ref().bright_red()
    }

    fn caution(&self) -> ColoredString {
        self.as_ref().bright_yellow()
    }

    fn accent(&self) -> ColoredString {
        self.as_ref().bright_purple()
    }

    fn label(&self) -> ColoredString {
        self.as_ref().bright_cyan()
    }

    fn muted(&self) -> ColoredString {
        self.as_ref().dimmed()
    }

    fn for_status(&self, status: CheckStatus) -> ColoredString {
        match status {
            CheckStatus::Normal => self.ok(),
            CheckStatus::Abnormal => self.alert(),
            CheckStatus::Unknown | CheckStatus::Failed => self.caution(),
        }
    }
}
