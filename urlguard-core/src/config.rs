//! Runtime settings for the monitor and its collaborators.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `URLGUARD__*` environment variables. They are
//! loaded once at startup and handed to each component by value.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{Result, UrlguardError};

pub const DEFAULT_CONFIG_FILE: &str = "urlguard.toml";
pub const DEFAULT_CHECK_ENDPOINT: &str = "https://cgi.urlsec.qq.com/index.php?m=url&a=validUrl";

/// Top-level settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path of the monitored domain list
    pub domains_file: PathBuf,
    /// Directory holding one JSON journal per day
    pub logs_dir: PathBuf,
    /// Seconds to sleep between two cycles
    pub check_interval_secs: u64,
    /// Pause between two domain checks inside a cycle, in milliseconds
    pub request_spacing_ms: u64,
    pub checker: CheckerSettings,
    pub webhook: WebhookSettings,
}

/// Validation endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerSettings {
    /// Endpoint URL, the domain is appended as the `url` query parameter
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Alert webhook settings
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSettings {
    /// Group robot webhook URL
    pub url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User ids to mention in alerts
    #[serde(default)]
    pub mentioned_list: Vec<String>,
    /// Phone numbers to mention in alerts, for members without a user id
    #[serde(default)]
    pub mentioned_mobile_list: Vec<String>,
}

impl Settings {
    /// Load settings from `path` (optional unless explicitly requested) and
    /// the environment.
    ///
    /// When `path` is `None` the default `urlguard.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings: Settings = Self::builder()?
            .add_source(file)
            .add_source(Environment::with_prefix("URLGUARD").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from an in-memory TOML document layered over defaults.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings: Settings = Self::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("domains_file", "domains.txt")?
            .set_default("logs_dir", "logs")?
            .set_default("check_interval_secs", 60)?
            .set_default("request_spacing_ms", 500)?
            .set_default("checker.endpoint", DEFAULT_CHECK_ENDPOINT)?
            .set_default("checker.timeout_secs", 10)?
            .set_default("webhook.timeout_secs", 5)?)
    }

    fn validate(&self) -> Result<()> {
        if self.check_interval_secs == 0 {
            return Err(UrlguardError::Config(
                "check_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.checker.endpoint.trim().is_empty() {
            return Err(UrlguardError::Config(
                "checker.endpoint must not be empty".to_string(),
            ));
        }
        if let Some(url) = &self.webhook.url {
            if url.trim().is_empty() {
                return Err(UrlguardError::Config(
                    "webhook.url is set but empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The webhook URL, required before the monitor loop may start.
    pub fn require_webhook(&self) -> Result<&str> {
        self.webhook.url.as_deref().ok_or_else(|| {
            UrlguardError::Config(
                "webhook.url is required (set it in the config file or URLGUARD__WEBHOOK__URL)"
                    .to_string(),
            )
        })
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    pub fn request_spacing(&self) -> Duration {
        Duration::from_millis(self.request_spacing_ms)
    }
}

impl CheckerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl WebhookSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.domains_file, PathBuf::from("domains.txt"));
        assert_eq!(settings.logs_dir, PathBuf::from("logs"));
        assert_eq!(settings.check_interval(), Duration::from_secs(60));
        assert_eq!(settings.request_spacing(), Duration::from_millis(500));
        assert_eq!(settings.checker.endpoint, DEFAULT_CHECK_ENDPOINT);
        assert_eq!(settings.checker.timeout(), Duration::from_secs(10));
        assert_eq!(settings.webhook.timeout(), Duration::from_secs(5));
        assert!(settings.webhook.url.is_none());
        assert!(settings.webhook.mentioned_list.is_empty());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let settings = Settings::from_toml(
            r#"
check_interval_secs = 300
logs_dir = "/var/log/urlguard"

[webhook]
url = "https://hooks.example/send?key=abc"
mentioned_list = ["alice"]
mentioned_mobile_list = ["13800000000"]
"#,
        )
        .unwrap();

        assert_eq!(settings.check_interval_secs, 300);
        assert_eq!(settings.logs_dir, PathBuf::from("/var/log/urlguard"));
        assert_eq!(
            settings.require_webhook().unwrap(),
            "https://hooks.example/send?key=abc"
        );
        assert_eq!(settings.webhook.mentioned_list, vec!["alice"]);
        assert_eq!(settings.webhook.mentioned_mobile_list, vec!["13800000000"]);
    }

    #[test]
    fn test_missing_webhook_is_reported() {
        let settings = Settings::from_toml("").unwrap();
        assert!(matches!(
            settings.require_webhook(),
            Err(UrlguardError::Config(_))
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = Settings::from_toml("check_interval_secs = 0");
        assert!(matches!(result, Err(UrlguardError::Config(_))));
    }

    #[test]
    fn test_empty_webhook_rejected() {
        let result = Settings::from_toml("[webhook]\nurl = \"  \"");
        assert!(matches!(result, Err(UrlguardError::Config(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/urlguard.toml")));
        assert!(result.is_err());
    }
}
