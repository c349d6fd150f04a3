//! Alert delivery for abnormal check results

mod webhook;

pub use webhook::{AlertPayload, AlertText, WebhookNotifier, WebhookReply};

use async_trait::async_trait;

use crate::error::Result;

/// Sends one alert for one abnormal domain.
///
/// Failures are returned for bookkeeping only; callers never retry them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, domain: &str, status_message: &str) -> Result<()>;
}
