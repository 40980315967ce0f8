use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::AuditRecord;

/// Errors raised while appending to an audit log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to read audit log {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write audit log {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize audit record for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Append-only sink for audit records.
pub trait LogStore {
    fn append(&self, record: &AuditRecord) -> Result<(), LogError>;
}

/// A log persisted as one JSON array per file.
///
/// Every append reads the whole array, pushes one record and rewrites the
/// file. There is no locking: two processes appending at once can lose
/// one of the records.
#[derive(Debug, Clone)]
pub struct JsonArrayLog {
    path: PathBuf,
}

impl JsonArrayLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonArrayLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries. A missing or unparseable file reads as empty.
    pub fn entries(&self) -> Result<Vec<Value>, LogError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LogError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => Ok(entries),
            _ => {
                tracing::warn!(path = %self.path.display(), "audit log is not a JSON array, starting over");
                Ok(Vec::new())
            }
        }
    }
}

impl LogStore for JsonArrayLog {
    fn append(&self, record: &AuditRecord) -> Result<(), LogError> {
        let write_err = |source| LogError::Write {
            path: self.path.clone(),
            source,
        };
        let serialize_err = |source| LogError::Serialize {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut entries = self.entries()?;
        entries.push(serde_json::to_value(record).map_err(serialize_err)?);

        let json = serde_json::to_string_pretty(&entries).map_err(serialize_err)?;
        std::fs::write(&self.path, json).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "audit record appended");
        Ok(())
    }
}

/// In-process log, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: RefCell<Vec<AuditRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl LogStore for MemoryLog {
    fn append(&self, record: &AuditRecord) -> Result<(), LogError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{ToolResultRecord, ToolResultStatus};
    use tempfile::TempDir;

    fn record(tool_name: &str, session: &str) -> AuditRecord {
        ToolResultRecord {
            timestamp: Some(format!("ts-{session}")),
            session_id: Some(session.to_string()),
            tool_name: tool_name.to_string(),
            status: ToolResultStatus::Success,
        }
        .into()
    }

    #[test]
    fn append_creates_file_and_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let log = JsonArrayLog::new(dir.path().join("nested/logs/post_tool_use.json"));

        log.append(&record("Bash", "s1")).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["tool_name"], "Bash");
        assert_eq!(entries[0]["status"], "success");
    }

    #[test]
    fn appends_preserve_call_order() {
        let dir = TempDir::new().unwrap();
        let log = JsonArrayLog::new(dir.path().join("log.json"));

        for i in 0..5 {
            log.append(&record(&format!("tool-{i}"), &format!("s{i}")))
                .unwrap();
        }

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 5);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry["tool_name"], format!("tool-{i}"));
            assert_eq!(entry["session_id"], format!("s{i}"));
            assert_eq!(entry["timestamp"], format!("ts-s{i}"));
        }
    }

    #[test]
    fn corrupt_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "{ not json").unwrap();
        let log = JsonArrayLog::new(&path);

        log.append(&record("Bash", "s1")).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn non_array_document_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, r#"{"records": []}"#).unwrap();
        let log = JsonArrayLog::new(&path);

        log.append(&record("Bash", "s1")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn file_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let log = JsonArrayLog::new(dir.path().join("log.json"));
        log.append(&record("Bash", "s1")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("[\n  {"));
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let log = JsonArrayLog::new(dir.path().join("absent.json"));
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let log = JsonArrayLog::new(blocker.join("log.json"));

        let err = log.append(&record("Bash", "s1")).unwrap_err();
        assert!(matches!(err, LogError::Write { .. }));
    }

    #[test]
    fn memory_log_keeps_records() {
        let log = MemoryLog::new();
        assert!(log.is_empty());
        log.append(&record("Bash", "s1")).unwrap();
        log.append(&record("Read", "s2")).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[1], record("Read", "s2"));
    }
}
