use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::RawCheckResult;

const CODE_NORMAL: i64 = -202;
const CODE_BLOCKED: i64 = -203;
const CODE_RISK: i64 = 0;

pub const RISK_BLOCKED_MESSAGE: &str = "risk URL blocked, link may contain unsafe content";
pub const REQUEST_FAILED_MESSAGE: &str = "request failed";

/// Outcome of one domain check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Normal,
    Abnormal,
    Unknown,
    Failed,
}

impl CheckStatus {
    /// Only abnormal results raise alerts
    pub fn is_alert(&self) -> bool {
        matches!(self, CheckStatus::Abnormal)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Normal => "normal",
            CheckStatus::Abnormal => "abnormal",
            CheckStatus::Unknown => "unknown",
            CheckStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: CheckStatus,
    pub message: String,
}

impl Classification {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Classify a raw validation response.
///
/// | `reCode`       | status   | message                      |
/// |----------------|----------|------------------------------|
/// | `-202`         | Normal   | `data`                       |
/// | `-203`         | Abnormal | `data`                       |
/// | `0`            | Abnormal | [`RISK_BLOCKED_MESSAGE`]     |
/// | other          | Unknown  | `reCode: <code>, msg: <data>`|
/// | none / absent  | Failed   | [`REQUEST_FAILED_MESSAGE`]   |
pub fn classify(raw: Option<&RawCheckResult>) -> Classification {
    let Some(raw) = raw else {
        return Classification::new(CheckStatus::Failed, REQUEST_FAILED_MESSAGE);
    };

    match raw.re_code() {
        Some(CODE_NORMAL) => Classification::new(CheckStatus::Normal, raw.data()),
        Some(CODE_BLOCKED) => Classification::new(CheckStatus::Abnormal, raw.data()),
        Some(CODE_RISK) => Classification::new(CheckStatus::Abnormal, RISK_BLOCKED_MESSAGE),
        Some(code) => Classification::new(
            CheckStatus::Unknown,
            format!("reCode: {}, msg: {}", code, raw.data()),
        ),
        // A body without a code is as useless as no body at all
        None => Classification::new(CheckStatus::Failed, REQUEST_FAILED_MESSAGE),
    }
}
