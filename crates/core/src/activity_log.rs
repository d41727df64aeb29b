//! Two logging layers: the in-memory activity feed shown in the TUI and
//! the append-only NDJSON audit file.

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{default_audit_path, ConfigError};

pub const DEFAULT_LOG_CAPACITY: usize = 200;

/// Ring buffer of timestamped activity lines. Oldest entries are dropped
/// once the capacity is reached; the TUI renders the newest lines at the
/// bottom of the feed.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl ActivityLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, message: impl AsRef<str>) {
        let stamped = format!("[{}] {}", Local::now().format("%H:%M:%S"), message.as_ref());
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(stamped);
    }

    /// The most recent `count` lines, oldest first.
    #[must_use]
    pub fn tail(&self, count: usize) -> Vec<&str> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Succeeded,
    Failed,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp_unix_ms: u128,
    pub action: String,
    pub outcome: AuditOutcome,
    pub rows: Option<u64>,
    pub elapsed_ms: Option<u128>,
    pub error: Option<String>,
}

#[must_use]
pub fn unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Error)]
pub enum AuditTrailError {
    #[error("failed to resolve default audit path: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid audit trail path `{0}`")]
    InvalidPath(PathBuf),
    #[error("failed to create audit trail directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize audit record: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to append audit record at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only NDJSON file, one record per dispatched action.
#[derive(Debug, Clone)]
pub struct FileAuditTrail {
    path: PathBuf,
}

impl FileAuditTrail {
    pub fn load_default() -> Result<Self, AuditTrailError> {
        Ok(Self {
            path: default_audit_path()?,
        })
    }

    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &AuditRecord) -> Result<(), AuditTrailError> {
        let parent_dir = self
            .path
            .parent()
            .ok_or_else(|| AuditTrailError::InvalidPath(self.path.clone()))?;
        fs::create_dir_all(parent_dir).map_err(|source| AuditTrailError::CreateDir {
            path: parent_dir.to_path_buf(),
            source,
        })?;

        let rendered = serde_json::to_string(record)
            .map_err(|source| AuditTrailError::Serialize { source })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditTrailError::Write {
                path: self.path.clone(),
                source,
            })?;
        writeln!(file, "{rendered}").map_err(|source| AuditTrailError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{
        unix_timestamp_millis, ActivityLog, AuditOutcome, AuditRecord, FileAuditTrail,
    };

    #[test]
    fn log_lines_carry_a_clock_timestamp() {
        let mut log = ActivityLog::default();
        log.push("Connected to Vulcynyx");

        let lines = log.tail(5);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("] Connected to Vulcynyx"));
        assert_eq!(lines[0].as_bytes()[0], b'[');
        // "[HH:MM:SS] " prefix is exactly eleven characters.
        assert_eq!(&lines[0][9..11], "] ");
    }

    #[test]
    fn log_drops_oldest_lines_past_capacity() {
        let mut log = ActivityLog::with_capacity(3);
        for n in 1..=5 {
            log.push(format!("entry {n}"));
        }

        assert_eq!(log.len(), 3);
        let lines = log.tail(10);
        assert!(lines[0].ends_with("entry 3"));
        assert!(lines[2].ends_with("entry 5"));
    }

    #[test]
    fn tail_returns_newest_lines_oldest_first() {
        let mut log = ActivityLog::with_capacity(10);
        for n in 1..=4 {
            log.push(format!("entry {n}"));
        }

        let lines = log.tail(2);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("entry 3"));
        assert!(lines[1].ends_with("entry 4"));
    }

    #[test]
    fn appends_json_lines_to_file() {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let path = temp_dir.path().join("nested").join("audit.ndjson");
        let trail = FileAuditTrail::from_path(&path);

        let first = AuditRecord {
            timestamp_unix_ms: 1,
            action: "Low Stock".to_string(),
            outcome: AuditOutcome::Succeeded,
            rows: Some(3),
            elapsed_ms: Some(12),
            error: None,
        };
        trail.append(&first).expect("failed to append first record");

        let second = AuditRecord {
            timestamp_unix_ms: 2,
            action: "Add Product".to_string(),
            outcome: AuditOutcome::Failed,
            rows: None,
            elapsed_ms: Some(4),
            error: Some("statement failed: duplicate key".to_string()),
        };
        trail
            .append(&second)
            .expect("failed to append second record");

        let content = std::fs::read_to_string(path).expect("failed to read audit file");
        let mut lines = content.lines();

        let first_loaded: AuditRecord =
            serde_json::from_str(lines.next().expect("missing first line"))
                .expect("failed to parse first line");
        assert_eq!(first_loaded, first);

        let second_loaded: AuditRecord =
            serde_json::from_str(lines.next().expect("missing second line"))
                .expect("failed to parse second line");
        assert_eq!(second_loaded, second);

        assert!(
            lines.next().is_none(),
            "unexpected extra lines in audit file"
        );
    }

    #[test]
    fn timestamp_uses_unix_epoch_millis() {
        assert!(unix_timestamp_millis() > 0);
    }
}
