use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UrlguardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Domain list not found, a template was written to {}", .0.display())]
    DomainListCreated(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Notification rejected: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, UrlguardError>;
