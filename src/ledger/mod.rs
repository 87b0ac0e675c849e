//! Client-local submission ledger.
//!
//! The backend has no "list my payments" endpoint, so the client remembers
//! which payment ids it created. The ledger is advisory — the backend
//! payment record is authoritative — and is injected as a service so views
//! share one instance and tests can swap in the in-memory impl.

pub mod file;

pub use file::JsonFileLedger;

use crate::shared::PaymentId;

use std::sync::Mutex;

/// Ordered set of submitted payment ids, most-recent-first.
///
/// All operations degrade to a no-op/empty result when the backing store is
/// unavailable — history is a convenience, never worth failing a submission
/// over.
pub trait SubmissionLedger: Send + Sync {
    /// Insert `id` at the front if absent. Idempotent: a retried submission
    /// under one idempotency key may report the same id more than once.
    fn append(&self, id: &PaymentId);

    /// All ids, most-recent-first.
    fn list(&self) -> Vec<PaymentId>;

    /// Remove every id.
    fn clear(&self);
}

// ─── MemoryLedger ────────────────────────────────────────────────────────────

/// In-memory ledger for tests and storage-disabled contexts.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    ids: Mutex<Vec<PaymentId>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionLedger for MemoryLedger {
    fn append(&self, id: &PaymentId) {
        let mut ids = self.ids.lock().unwrap_or_else(|e| e.into_inner());
        if !ids.contains(id) {
            ids.insert(0, id.clone());
        }
    }

    fn list(&self) -> Vec<PaymentId> {
        self.ids
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) {
        self.ids.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}
