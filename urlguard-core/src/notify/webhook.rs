use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::Notifier;
use crate::config::WebhookSettings;
use crate::error::{Result, UrlguardError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Group robot text message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub msgtype: String,
    pub text: AlertText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertText {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentioned_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentioned_mobile_list: Vec<String>,
}

/// Webhook reply body; `errcode` 0 means delivered
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookReply {
    pub errcode: Option<i64>,
    #[serde(default)]
    pub errmsg: Option<String>,
}

/// Posts alerts to a group robot webhook
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
    mentioned_list: Vec<String>,
    mentioned_mobile_list: Vec<String>,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            url: url.to_string(),
            mentioned_list: Vec::new(),
            mentioned_mobile_list: Vec::new(),
        })
    }

    /// Build a notifier from settings; `None` when no webhook URL is configured
    pub fn from_settings(settings: &WebhookSettings) -> Result<Option<Self>> {
        let Some(url) = settings.url.as_deref() else {
            return Ok(None);
        };

        let notifier = Self::with_timeout(url, settings.timeout())?.with_mentions(
            settings.mentioned_list.clone(),
            settings.mentioned_mobile_list.clone(),
        );
        Ok(Some(notifier))
    }

    pub fn with_mentions(mut self, users: Vec<String>, mobiles: Vec<String>) -> Self {
        self.mentioned_list = users;
        self.mentioned_mobile_list = mobiles;
        self
    }

    /// Build the alert for a domain at the current local time
    pub fn payload(&self, domain: &str, status_message: &str) -> AlertPayload {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        let content = format!(
            "🚨 Domain block alert\n\nThe validation service flagged a monitored domain:\nURL: {}\nStatus: {}\nTime: {}",
            domain, status_message, now
        );

        AlertPayload {
            msgtype: "text".to_string(),
            text: AlertText {
                content,
                mentioned_list: self.mentioned_list.clone(),
                mentioned_mobile_list: self.mentioned_mobile_list.clone(),
            },
        }
    }

    async fn deliver(&self, payload: &AlertPayload) -> Result<()> {
        let response = self.http.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UrlguardError::Notification(format!(
                "HTTP status {}",
                status.as_u16()
            )));
        }

        let reply: WebhookReply = response.json().await?;
        match reply.errcode {
            Some(0) => Ok(()),
            code => Err(UrlguardError::Notification(format!(
                "errcode {}: {}",
                code.map(|c| c.to_string()).unwrap_or_else(|| "missing".to_string()),
                reply.errmsg.unwrap_or_default()
            ))),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    #[instrument(skip(self, status_message), fields(domain = %domain))]
    async fn notify(&self, domain: &str, status_message: &str) -> Result<()> {
        let payload = self.payload(domain, status_message);

        match self.deliver(&payload).await {
            Ok(()) => {
                debug!("Alert delivered");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Alert delivery failed");
                Err(e)
            }
        }
    }
}
