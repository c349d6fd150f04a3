use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, instrument};

use super::types::RawCheckResult;
use crate::config::CheckerSettings;
use crate::error::Result;

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Anything that can ask the validation service about a domain.
///
/// Implementations never fail: transport and parse problems are `None`.
#[async_trait]
pub trait DomainChecker: Send + Sync {
    async fn check(&self, domain: &str) -> Option<RawCheckResult>;
}

/// Client for the external URL validation endpoint
#[derive(Debug, Clone)]
pub struct CheckClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CheckClient {
    pub fn from_settings(settings: &CheckerSettings) -> Result<Self> {
        Self::with_endpoint(&settings.endpoint, settings.timeout())
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    async fn fetch(&self, domain: &str) -> Result<Option<RawCheckResult>> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("url", domain)])
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Validation endpoint returned non-success status");
            return Ok(None);
        }

        // The endpoint does not always label its JSON correctly, so parse the text
        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(Some(RawCheckResult::new(value)))
    }
}

#[async_trait]
impl DomainChecker for CheckClient {
    #[instrument(skip(self), fields(domain = %domain))]
    async fn check(&self, domain: &str) -> Option<RawCheckResult> {
        if domain.trim().is_empty() {
            return None;
        }

        match self.fetch(domain).await {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "Validation request failed");
                None
            }
        }
    }
}
