//! # Corridor SDK
//!
//! A Rust client SDK for the Corridor cross-border payments API: lock an
//! exchange-rate quote, submit a payment against it with an idempotency key,
//! and watch the payment advance through the on-ramp/off-ramp settlement
//! pipeline by polling.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — shared newtypes, domain models, unified errors
//! 2. **HTTP API** — `CorridorHttp` with per-endpoint retry policies
//! 3. **Polling** — timer-driven watchers with termination + cancellation
//! 4. **High-Level Client** — `CorridorClient` with nested sub-clients and
//!    an injected submission ledger
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use corridor_sdk::prelude::*;
//!
//! let client = CorridorClient::builder()
//!     .base_url("https://api.corridorpay.io")
//!     .build()?;
//!
//! let quote = client.quotes().create(&QuoteRequest {
//!     from_currency: "USD".into(),
//!     to_currency: "EUR".into(),
//!     amount: 100_000,
//! }).await?;
//!
//! let key = IdempotencyKey::generate();
//! let ack = client.payments().submit(&request, &key).await?;
//! let tracker = client.payments().watch(&ack.payment_id);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: Polling ─────────────────────────────────────────────────────────

/// Timer-driven polling with termination predicates and cancellation.
pub mod poll;

/// Client-local submission ledger.
pub mod ledger;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CorridorClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{IdempotencyKey, PaymentId, QuoteId};

    // Domain types — quote
    pub use crate::domain::quote::{
        CountdownTick, FeeLines, Quote, QuoteCountdown, QuoteRequest,
    };

    // Domain types — payment
    pub use crate::domain::payment::{
        progress_percent, stage_mark, DisplayStage, Payment, PaymentAck, PaymentBoard,
        PaymentRequest, PaymentStatus, StageMark, StateTransition, DISPLAY_STAGES,
    };

    // Domain types — fees
    pub use crate::domain::fees::{
        recipient_amount, CustomerTier, FeeBreakdown, FeeQuote, FeeRequest, Priority,
        ProviderRoute,
    };

    // Errors
    pub use crate::error::{ErrorInfo, ErrorKind, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Polling
    pub use crate::poll::{PollHandle, Snapshot};

    // Ledger
    pub use crate::ledger::{JsonFileLedger, MemoryLedger, SubmissionLedger};

    // HTTP client + sub-clients
    pub use crate::client::{
        CorridorClient, CorridorClientBuilder, FeesClient, PaymentsClient, PollIntervals,
        QuotesClient,
    };
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
