//! Payment domain — backend-owned settlement state, observed by polling.

pub mod client;
mod convert;
pub mod progress;
pub mod state;
pub mod wire;

use crate::shared::{PaymentId, QuoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use convert::SnapshotError;
pub use progress::{progress_percent, stage_mark, DisplayStage, StageMark, DISPLAY_STAGES};
pub use state::PaymentBoard;

// ─── PaymentStatus ───────────────────────────────────────────────────────────

/// Backend settlement pipeline status.
///
/// `PENDING → ONRAMP_PENDING → ONRAMP_COMPLETE → OFFRAMP_PENDING → COMPLETED`,
/// with `FAILED` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    OnrampPending,
    OnrampComplete,
    OfframpPending,
    Completed,
    Failed,
}

impl PaymentStatus {
    /// Terminal states admit no further transitions — polling stops here.
    pub fn is_terminal(self) -> bool {
        matches!(self, PaymentStatus::Completed | PaymentStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::OnrampPending => "ONRAMP_PENDING",
            PaymentStatus::OnrampComplete => "ONRAMP_COMPLETE",
            PaymentStatus::OfframpPending => "OFFRAMP_PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── StateTransition ─────────────────────────────────────────────────────────

/// One recorded hop of the backend state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from_status: PaymentStatus,
    pub to_status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
}

// ─── Payment ─────────────────────────────────────────────────────────────────

/// An eventually-consistent snapshot of a backend payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub idempotency_key: String,
    pub quote_id: Option<QuoteId>,
    /// Source amount in cents.
    pub amount: i64,
    pub currency: String,
    pub source_account: String,
    pub destination_account: String,
    pub status: PaymentStatus,
    pub fee_amount: i64,
    pub fee_currency: String,
    pub guaranteed_payout_amount: Option<i64>,
    /// Ordered by timestamp; the final `to_status` equals `status`.
    pub state_history: Vec<StateTransition>,
    pub on_ramp_tx_id: Option<String>,
    pub on_ramp_poll_count: Option<u32>,
    pub off_ramp_tx_id: Option<String>,
    pub off_ramp_poll_count: Option<u32>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// When the payment first reached `status`, if the history records it.
    pub fn transition_time(&self, status: PaymentStatus) -> Option<DateTime<Utc>> {
        self.state_history
            .iter()
            .find(|t| t.to_status == status)
            .map(|t| t.timestamp)
    }
}

// ─── PaymentRequest ──────────────────────────────────────────────────────────

/// Request body for payment creation. The amount and currency must match the
/// quote being executed, not the payout side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentRequest {
    pub quote_id: QuoteId,
    pub amount: i64,
    pub currency: String,
    pub source_account: String,
    pub destination_account: String,
}

impl PaymentRequest {
    /// Client-side checks, run before any network call.
    pub fn validate(&self) -> Result<(), PaymentValidationError> {
        if self.amount <= 0 {
            return Err(PaymentValidationError::NonPositiveAmount(self.amount));
        }
        if self.source_account.trim().is_empty() {
            return Err(PaymentValidationError::MissingSourceAccount);
        }
        if self.destination_account.trim().is_empty() {
            return Err(PaymentValidationError::MissingDestinationAccount);
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaymentValidationError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(i64),

    #[error("source account is required")]
    MissingSourceAccount,

    #[error("destination account is required")]
    MissingDestinationAccount,
}

// ─── PaymentAck ──────────────────────────────────────────────────────────────

/// Acknowledgement of a creation request. The backend returns the same
/// `payment_id` for every submission carrying the same idempotency key.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAck {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::OnrampComplete.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        let s: PaymentStatus = serde_json::from_str("\"ONRAMP_PENDING\"").unwrap();
        assert_eq!(s, PaymentStatus::OnrampPending);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"ONRAMP_PENDING\"");
    }

    #[test]
    fn test_request_validation() {
        let mut req = PaymentRequest {
            quote_id: "q_1".into(),
            amount: 100_000,
            currency: "USD".to_string(),
            source_account: "user_12345".to_string(),
            destination_account: "merchant_67890".to_string(),
        };
        assert!(req.validate().is_ok());

        req.amount = -5;
        assert_eq!(
            req.validate(),
            Err(PaymentValidationError::NonPositiveAmount(-5))
        );

        req.amount = 100;
        req.destination_account = "  ".to_string();
        assert_eq!(
            req.validate(),
            Err(PaymentValidationError::MissingDestinationAccount)
        );
    }
}
