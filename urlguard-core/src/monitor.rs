use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::check::{classify, CheckStatus, Classification, DomainChecker, RawCheckResult};
use crate::config::Settings;
use crate::domains::DomainList;
use crate::error::UrlguardError;
use crate::journal::{date_key, BatchRecord, DomainCheckRecord, Journal};
use crate::notify::Notifier;

/// Timing for the monitor loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between cycles
    pub interval: Duration,
    /// Pause between two domains inside a cycle
    pub request_spacing: Duration,
}

impl MonitorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.check_interval(),
            request_spacing: settings.request_spacing(),
        }
    }
}

/// What happened to the alert for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertOutcome {
    /// Status does not raise alerts
    NotNeeded,
    Sent,
    Failed(String),
    /// Abnormal, but no notifier is configured
    Disabled,
}

/// Classified result of checking one domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainOutcome {
    pub domain: String,
    pub status: CheckStatus,
    pub message: String,
    pub result: Option<RawCheckResult>,
    pub alert: AlertOutcome,
    #[serde(skip)]
    pub checked_at: Option<DateTime<Local>>,
}

impl DomainOutcome {
    pub fn classification(&self) -> Classification {
        Classification {
            status: self.status,
            message: self.message.clone(),
        }
    }
}

/// Check one domain, classify it and alert if abnormal.
///
/// Shared by the monitor loop and the one-shot front ends.
pub async fn inspect_domain(
    checker: &dyn DomainChecker,
    notifier: Option<&dyn Notifier>,
    domain: &str,
) -> DomainOutcome {
    let result = checker.check(domain).await;
    let checked_at = Local::now();
    let Classification { status, message } = classify(result.as_ref());

    let alert = if !status.is_alert() {
        AlertOutcome::NotNeeded
    } else if let Some(notifier) = notifier {
        match notifier.notify(domain, &message).await {
            Ok(()) => AlertOutcome::Sent,
            Err(e) => AlertOutcome::Failed(e.to_string()),
        }
    } else {
        AlertOutcome::Disabled
    };

    DomainOutcome {
        domain: domain.to_string(),
        status,
        message,
        result,
        alert,
        checked_at: Some(checked_at),
    }
}

/// Check several domains once, in order, pausing `spacing` between
/// requests. `on_outcome` sees each result as soon as it is classified.
pub async fn inspect_domains<F>(
    checker: &dyn DomainChecker,
    notifier: Option<&dyn Notifier>,
    domains: &[String],
    spacing: Duration,
    mut on_outcome: F,
) -> usize
where
    F: FnMut(&DomainOutcome),
{
    for (i, domain) in domains.iter().enumerate() {
        if i > 0 {
            pause(spacing, None).await;
        }
        let outcome = inspect_domain(checker, notifier, domain).await;
        on_outcome(&outcome);
    }
    domains.len()
}

/// Aggregate counters for one cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleSummary {
    pub date_key: String,
    pub timestamp: String,
    pub checked: usize,
    pub normal: usize,
    pub abnormal: usize,
    /// Unknown codes and failed requests
    pub unknown: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
    /// Journal file written, `None` when persisting failed
    pub log_path: Option<PathBuf>,
    /// Cancelled before every domain was checked
    pub interrupted: bool,
}

impl CycleSummary {
    fn record(&mut self, outcome: &DomainOutcome) {
        self.checked += 1;
        match outcome.status {
            CheckStatus::Normal => self.normal += 1,
            CheckStatus::Abnormal => self.abnormal += 1,
            CheckStatus::Unknown | CheckStatus::Failed => self.unknown += 1,
        }
        match outcome.alert {
            AlertOutcome::Sent => self.notifications_sent += 1,
            AlertOutcome::Failed(_) => self.notifications_failed += 1,
            AlertOutcome::NotNeeded | AlertOutcome::Disabled => {}
        }
    }
}

/// Progress reported while the monitor runs
#[derive(Debug)]
pub enum MonitorEvent<'a> {
    CycleStarted { domains: usize, timestamp: &'a str },
    NoDomains,
    DomainChecked(&'a DomainOutcome),
    CycleFinished(&'a CycleSummary),
    Sleeping(Duration),
}

/// Callback type for real-time progress updates
pub type MonitorCallback = Arc<dyn Fn(&MonitorEvent<'_>) + Send + Sync>;

/// Recurring domain monitor
pub struct Monitor {
    domains: DomainList,
    checker: Box<dyn DomainChecker>,
    notifier: Box<dyn Notifier>,
    journal: Journal,
    config: MonitorConfig,
    callback: Option<MonitorCallback>,
}

impl Monitor {
    pub fn new(
        domains: DomainList,
        checker: Box<dyn DomainChecker>,
        notifier: Box<dyn Notifier>,
        journal: Journal,
        config: MonitorConfig,
    ) -> Self {
        Self {
            domains,
            checker,
            notifier,
            journal,
            config,
            callback: None,
        }
    }

    pub fn with_callback(mut self, callback: MonitorCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    fn emit(&self, event: MonitorEvent<'_>) {
        if let Some(ref cb) = self.callback {
            cb(&event);
        }
    }

    fn load_domains(&self) -> Vec<String> {
        match self.domains.load() {
            Ok(domains) => domains,
            Err(UrlguardError::DomainListCreated(path)) => {
                warn!(path = %path.display(), "Domain list was missing, wrote a template");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load domain list");
                Vec::new()
            }
        }
    }

    /// Run one cycle. Returns `None` when there was nothing to check.
    #[instrument(skip(self, cancel_rx))]
    pub async fn run_cycle(&self, cancel_rx: Option<&watch::Receiver<bool>>) -> Option<CycleSummary> {
        let domains = self.load_domains();
        if domains.is_empty() {
            warn!(
                path = %self.domains.path().display(),
                "No domains to check"
            );
            self.emit(MonitorEvent::NoDomains);
            return None;
        }

        let started_at = Local::now();
        let mut batch = BatchRecord::new(started_at);
        let mut summary = CycleSummary {
            date_key: date_key(started_at),
            timestamp: batch.timestamp.clone(),
            ..CycleSummary::default()
        };

        info!(domains = domains.len(), "Starting check cycle");
        self.emit(MonitorEvent::CycleStarted {
            domains: domains.len(),
            timestamp: &summary.timestamp,
        });

        for (i, domain) in domains.iter().enumerate() {
            if is_cancelled(cancel_rx) {
                debug!("Cycle cancelled before {}", domain);
                summary.interrupted = true;
                break;
            }

            let outcome =
                inspect_domain(self.checker.as_ref(), Some(self.notifier.as_ref()), domain).await;
            debug!(domain = %domain, status = %outcome.status, "Domain checked");

            summary.record(&outcome);
            batch.push(DomainCheckRecord::new(
                domain,
                outcome.result.clone(),
                &outcome.classification(),
                outcome.checked_at.unwrap_or_else(Local::now),
            ));
            self.emit(MonitorEvent::DomainChecked(&outcome));

            if i + 1 < domains.len() && pause(self.config.request_spacing, cancel_rx).await {
                summary.interrupted = true;
                break;
            }
        }

        if !batch.is_empty() {
            match self.journal.append(&summary.date_key, &batch) {
                Ok(path) => summary.log_path = Some(path),
                Err(e) => error!(error = %e, "Failed to save check journal"),
            }
        }

        info!(
            normal = summary.normal,
            abnormal = summary.abnormal,
            unknown = summary.unknown,
            alerts_sent = summary.notifications_sent,
            alerts_failed = summary.notifications_failed,
            "Check cycle finished"
        );
        self.emit(MonitorEvent::CycleFinished(&summary));

        Some(summary)
    }

    /// Run cycles until `cancel_rx` turns true. Returns the number of
    /// cycles that checked at least one domain.
    pub async fn run(&self, cancel_rx: watch::Receiver<bool>) -> usize {
        let mut cycles = 0;

        info!(
            interval_secs = self.config.interval.as_secs(),
            list = %self.domains.path().display(),
            journal = %self.journal.dir().display(),
            "Monitor started"
        );

        loop {
            if is_cancelled(Some(&cancel_rx)) {
                break;
            }

            if let Some(summary) = self.run_cycle(Some(&cancel_rx)).await {
                cycles += 1;
                if summary.interrupted {
                    break;
                }
            }

            self.emit(MonitorEvent::Sleeping(self.config.interval));
            if pause(self.config.interval, Some(&cancel_rx)).await {
                break;
            }
        }

        info!(cycles, "Monitor stopped");
        cycles
    }
}

fn is_cancelled(cancel_rx: Option<&watch::Receiver<bool>>) -> bool {
    cancel_rx.map(|rx| *rx.borrow()).unwrap_or(false)
}

/// Sleep for `duration`; returns `true` if cancelled in the meantime
async fn pause(duration: Duration, cancel_rx: Option<&watch::Receiver<bool>>) -> bool {
    let Some(rx) = cancel_rx else {
        tokio::time::sleep(duration).await;
        return false;
    };
    if *rx.borrow() {
        return true;
    }

    let mut rx = rx.clone();
    let cancelled = async move {
        loop {
            if rx.changed().await.is_err() {
                // Sender gone, nobody can cancel anymore
                std::future::pending::<()>().await;
            }
            if *rx.borrow() {
                return;
            }
        }
    };

    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = cancelled => true,
    }
}
