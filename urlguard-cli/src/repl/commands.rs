use urlguard_core::output::OutputFormat;
use urlguard_core::{CheckClient, WebhookNotifier};

pub struct CommandContext {
    pub output_format: OutputFormat,
    pub checker: CheckClient,
    /// `None` when no webhook is configured; abnormal results are then only printed
    pub notifier: Option<WebhookNotifier>,
}

impl CommandContext {
    pub fn new(
        output_format: OutputFormat,
        checker: CheckClient,
        notifier: Option<WebhookNotifier>,
    ) -> Self {
        Self {
            output_format,
            checker,
            notifier,
        }
    }
}

#[derive(Debug)]
pub enum CommandResult {
    Continue,
    Exit,
    Error(String),
}
