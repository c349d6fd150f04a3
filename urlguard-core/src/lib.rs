pub mod check;
pub mod colors;
pub mod config;
pub mod domains;
pub mod error;
pub mod journal;
pub mod monitor;
pub mod notify;
pub mod output;

pub use error::{Result, UrlguardError};

pub use check::{classify, CheckClient, CheckStatus, Classification, DomainChecker, RawCheckResult};
pub use config::Settings;
pub use domains::{parse_domain_list, DomainList};
pub use journal::{BatchRecord, DomainCheckRecord, Journal};
pub use monitor::{
    inspect_domain, inspect_domains, AlertOutcome, CycleSummary, DomainOutcome, Monitor,
    MonitorCallback, MonitorConfig, MonitorEvent,
};
pub use notify::{Notifier, WebhookNotifier};
pub use output::{OutputFormat, OutputFormatter};
