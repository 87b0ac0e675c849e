//! File-backed submission ledger.

use super::SubmissionLedger;
use crate::shared::PaymentId;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Name of the ledger file inside its directory — the single namespaced key
/// under which the history lives.
pub const LEDGER_FILE_NAME: &str = "payment_history.json";

#[derive(Error, Debug)]
enum StorageError {
    #[error("ledger io: {0}")]
    Io(#[from] io::Error),

    #[error("ledger encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Ledger persisted as a JSON array of id strings, most-recent-first.
///
/// The process-local equivalent of browser local storage: one file, one
/// writer at a time within this process (guarded by the mutex). Two
/// processes sharing the file can race; that inconsistency is accepted
/// because the ledger is advisory.
pub struct JsonFileLedger {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Ledger at the conventional file name inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir.into().join(LEDGER_FILE_NAME))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_ids(&self) -> Result<Vec<PaymentId>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_ids(&self, ids: &[PaymentId]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(ids)?)?;
        Ok(())
    }
}

impl SubmissionLedger for JsonFileLedger {
    fn append(&self, id: &PaymentId) {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut ids = match self.read_ids() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "submission ledger unreadable, skipping append");
                return;
            }
        };
        if ids.contains(id) {
            return;
        }
        ids.insert(0, id.clone());
        if let Err(e) = self.write_ids(&ids) {
            tracing::warn!(error = %e, "submission ledger unwritable, skipping append");
        }
    }

    fn list(&self) -> Vec<PaymentId> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        match self.read_ids() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "submission ledger unreadable, returning empty history");
                Vec::new()
            }
        }
    }

    fn clear(&self) {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, "submission ledger could not be cleared");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_ledger(tag: &str) -> JsonFileLedger {
        let dir = std::env::temp_dir().join(format!(
            "corridor-ledger-{}-{}",
            std::process::id(),
            tag
        ));
        JsonFileLedger::in_dir(dir)
    }

    #[test]
    fn test_roundtrip_most_recent_first() {
        let ledger = temp_ledger("roundtrip");
        ledger.clear();
        ledger.append(&PaymentId::from("a"));
        ledger.append(&PaymentId::from("b"));
        ledger.append(&PaymentId::from("a"));
        assert_eq!(
            ledger.list(),
            vec![PaymentId::from("b"), PaymentId::from("a")]
        );
        ledger.clear();
        assert!(ledger.list().is_empty());
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let ledger = temp_ledger("missing");
        ledger.clear();
        assert!(ledger.list().is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let ledger = temp_ledger("corrupt");
        ledger.clear();
        fs::create_dir_all(ledger.path().parent().unwrap()).unwrap();
        fs::write(ledger.path(), "not json").unwrap();
        assert!(ledger.list().is_empty());
        // Appends are skipped rather than clobbering the unreadable file.
        ledger.append(&PaymentId::from("a"));
        assert!(ledger.list().is_empty());
        ledger.clear();
    }

    #[test]
    fn test_persists_across_instances() {
        let ledger = temp_ledger("persist");
        ledger.clear();
        ledger.append(&PaymentId::from("a"));
        let reopened = JsonFileLedger::new(ledger.path().clone());
        assert_eq!(reopened.list(), vec![PaymentId::from("a")]);
        ledger.clear();
    }
}
