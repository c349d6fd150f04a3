//! Domain validation checks
//!
//! Provides the call to the external URL validation endpoint and the fixed
//! table that turns its raw answer into a [`CheckStatus`].

mod classify;
mod client;
mod types;

pub use classify::{
    classify, CheckStatus, Classification, REQUEST_FAILED_MESSAGE, RISK_BLOCKED_MESSAGE,
};
pub use client::{CheckClient, DomainChecker, BROWSER_USER_AGENT};
pub use types::RawCheckResult;
