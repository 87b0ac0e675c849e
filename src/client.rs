//! High-level client — `CorridorClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the injected submission ledger, and the
//! accessor methods.

use crate::domain::fees::client::Fees;
use crate::domain::payment::client::Payments;
use crate::domain::quote::client::Quotes;
use crate::error::SdkError;
use crate::http::CorridorHttp;
use crate::ledger::{MemoryLedger, SubmissionLedger};

use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::fees::client::Fees as FeesClient;
pub use crate::domain::payment::client::Payments as PaymentsClient;
pub use crate::domain::quote::client::Quotes as QuotesClient;

/// Poll cadences used by the watch pollers.
#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    /// Single-payment watcher.
    pub payment: Duration,
    /// Multi-payment board (no termination, so kept short).
    pub board: Duration,
    /// Submission-history refresh.
    pub history: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            payment: Duration::from_secs(3),
            board: Duration::from_secs(3),
            history: Duration::from_secs(5),
        }
    }
}

/// The primary entry point for the Corridor SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.quotes()`, `client.payments()`, `client.fees()`.
pub struct CorridorClient {
    pub(crate) http: CorridorHttp,
    /// Client-local record of submitted payment ids, shared by the
    /// submission flow and the history views.
    pub(crate) ledger: Arc<dyn SubmissionLedger>,
    pub(crate) poll: PollIntervals,
}

impl CorridorClient {
    pub fn builder() -> CorridorClientBuilder {
        CorridorClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn quotes(&self) -> Quotes<'_> {
        Quotes { client: self }
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    pub fn fees(&self) -> Fees<'_> {
        Fees { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl Clone for CorridorClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            ledger: self.ledger.clone(),
            poll: self.poll,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CorridorClientBuilder {
    base_url: String,
    ledger: Option<Arc<dyn SubmissionLedger>>,
    poll: PollIntervals,
}

impl Default for CorridorClientBuilder {
    fn default() -> Self {
        Self {
            base_url: std::env::var(crate::network::API_URL_ENV)
                .unwrap_or_else(|_| crate::network::DEFAULT_API_URL.to_string()),
            ledger: None,
            poll: PollIntervals::default(),
        }
    }
}

impl CorridorClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Inject the submission ledger. Defaults to an in-memory ledger —
    /// storage-disabled contexts lose history on exit, nothing else.
    pub fn ledger(mut self, ledger: Arc<dyn SubmissionLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn poll_intervals(mut self, poll: PollIntervals) -> Self {
        self.poll = poll;
        self
    }

    pub fn build(self) -> Result<CorridorClient, SdkError> {
        Ok(CorridorClient {
            http: CorridorHttp::new(&self.base_url),
            ledger: self
                .ledger
                .unwrap_or_else(|| Arc::new(MemoryLedger::new())),
            poll: self.poll,
        })
    }
}
