//! Per-day check journal.
//!
//! Each calendar date owns one JSON file, `<dir>/<YYYY-MM-DD>.json`, holding
//! an array of batches in the order they were written. Appending rewrites the
//! whole file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::check::{Classification, CheckStatus, RawCheckResult};
use crate::error::Result;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Result of checking one domain within a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCheckRecord {
    pub domain: String,
    /// Raw validation response, `null` when the request failed
    pub result: Option<RawCheckResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Local check time, `HH:MM:SS`
    pub time: String,
}

impl DomainCheckRecord {
    pub fn new(
        domain: &str,
        result: Option<RawCheckResult>,
        classification: &Classification,
        checked_at: DateTime<Local>,
    ) -> Self {
        let error = match classification.status {
            CheckStatus::Failed => Some(classification.message.clone()),
            _ => None,
        };

        Self {
            domain: domain.to_string(),
            result,
            error,
            time: checked_at.format(TIME_FORMAT).to_string(),
        }
    }
}

/// All results of one monitor cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Local cycle time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub results: Vec<DomainCheckRecord>,
}

impl BatchRecord {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self {
            timestamp: started_at.format(TIMESTAMP_FORMAT).to_string(),
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, record: DomainCheckRecord) {
        self.results.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Date key for a local timestamp
pub fn date_key(at: DateTime<Local>) -> String {
    at.format(DATE_KEY_FORMAT).to_string()
}

/// Directory of daily journal files
#[derive(Debug, Clone)]
pub struct Journal {
    dir: PathBuf,
}

impl Journal {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date_key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", date_key))
    }

    /// Batches recorded for a date. Missing or unreadable files read as empty.
    pub fn load(&self, date_key: &str) -> Vec<BatchRecord> {
        let path = self.path_for(date_key);
        if !path.exists() {
            return Vec::new();
        }

        match read_batches(&path) {
            Ok(batches) => batches,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding unreadable journal");
                Vec::new()
            }
        }
    }

    /// Append a batch to the journal for `date_key`, keeping earlier batches.
    pub fn append(&self, date_key: &str, batch: &BatchRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(date_key);
        let mut batches = self.load(date_key);
        batches.push(batch.clone());

        // Staged write, then rename over the day file
        let json = serde_json::to_string_pretty(&batches)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;

        debug!(
            path = %path.display(),
            batches = batches.len(),
            "Journal written"
        );
        Ok(path)
    }
}

fn read_batches(path: &Path) -> Result<Vec<BatchRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::classify;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, h, m, s).unwrap()
    }

    fn batch(started: DateTime<Local>, domains: &[(&str, Option<serde_json::Value>)]) -> BatchRecord {
        let mut batch = BatchRecord::new(started);
        for (domain, value) in domains {
            let raw = value.clone().map(RawCheckResult::new);
            let classification = classify(raw.as_ref());
            batch.push(DomainCheckRecord::new(domain, raw, &classification, started));
        }
        batch
    }

    #[test]
    fn test_record_formats() {
        let b = batch(at(9, 5, 7), &[("a.example", Some(json!({"reCode": -202})))]);
        assert_eq!(b.timestamp, "2026-03-14 09:05:07");
        assert_eq!(b.results[0].time, "09:05:07");
        assert!(b.results[0].error.is_none());
        assert_eq!(date_key(at(23, 59, 59)), "2026-03-14");
    }

    #[test]
    fn test_failed_record_carries_error() {
        let b = batch(at(9, 0, 0), &[("a.example", None)]);
        let value = serde_json::to_value(&b.results[0]).unwrap();

        assert_eq!(value["result"], serde_json::Value::Null);
        assert_eq!(value["error"], "request failed");
        assert_eq!(value["domain"], "a.example");
    }

    #[test]
    fn test_ok_record_omits_error_key() {
        let b = batch(at(9, 0, 0), &[("a.example", Some(json!({"reCode": -202})))]);
        let value = serde_json::to_value(&b.results[0]).unwrap();
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_append_is_cumulative() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("logs"));

        let b1 = batch(at(9, 0, 0), &[("a.example", Some(json!({"reCode": -202})))]);
        let b2 = batch(at(9, 1, 0), &[("b.example", None)]);

        journal.append("2026-03-14", &b1).unwrap();
        let path = journal.append("2026-03-14", &b2).unwrap();

        assert_eq!(path, dir.path().join("logs").join("2026-03-14.json"));
        assert_eq!(journal.load("2026-03-14"), vec![b1, b2]);
    }

    #[test]
    fn test_dates_are_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path());

        let b1 = batch(at(9, 0, 0), &[("a.example", None)]);
        journal.append("2026-03-14", &b1).unwrap();
        journal.append("2026-03-15", &b1).unwrap();

        assert_eq!(journal.load("2026-03-14").len(), 1);
        assert_eq!(journal.load("2026-03-15").len(), 1);
        assert!(journal.load("2026-03-16").is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path());
        fs::write(journal.path_for("2026-03-14"), "{ not json").unwrap();

        let b = batch(at(9, 0, 0), &[("a.example", Some(json!({"reCode": 0})))]);
        journal.append("2026-03-14", &b).unwrap();

        assert_eq!(journal.load("2026-03-14"), vec![b]);
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path());

        let b = batch(
            at(9, 0, 0),
            &[("a.example", Some(json!({"reCode": -202, "data": "网址安全"})))],
        );
        let path = journal.append("2026-03-14", &b).unwrap();

        assert!(fs::read_to_string(path).unwrap().contains("网址安全"));
    }

    #[test]
    fn test_append_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path());
        let b1 = batch(at(9, 0, 0), &[("a.example", None)]);
        let b2 = batch(at(9, 1, 0), &[("b.example", None)]);

        journal.append("2026-03-14", &b1).unwrap();
        // Staging file left behind by a write that never finished
        fs::write(dir.path().join("2026-03-14.json.tmp"), "[{\"timest").unwrap();
        journal.append("2026-03-14", &b2).unwrap();

        assert_eq!(journal.load("2026-03-14"), vec![b1, b2]);
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["2026-03-14.json".to_string()]);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        // A file where the directory should be
        fs::write(&blocker, "").unwrap();

        let journal = Journal::new(&blocker);
        let b = batch(at(9, 0, 0), &[("a.example", None)]);
        assert!(journal.append("2026-03-14", &b).is_err());
    }
}
