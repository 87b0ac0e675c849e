//! Quote domain — locked exchange-rate quotes and their expiry.

pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::QuoteId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use convert::QuoteDataError;
pub use state::{CountdownTick, QuoteCountdown};

// ─── QuoteRequest ────────────────────────────────────────────────────────────

/// Request body for quote creation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuoteRequest {
    pub from_currency: String,
    pub to_currency: String,
    /// Source amount in cents.
    pub amount: i64,
}

impl QuoteRequest {
    /// Client-side checks, run before any network call.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.amount <= 0 {
            return Err(QuoteValidationError::NonPositiveAmount(self.amount));
        }
        if self.from_currency.eq_ignore_ascii_case(&self.to_currency) {
            return Err(QuoteValidationError::SameCurrency(
                self.from_currency.clone(),
            ));
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuoteValidationError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(i64),

    #[error("source and destination currencies must differ, both are {0}")]
    SameCurrency(String),
}

// ─── Quote ───────────────────────────────────────────────────────────────────

/// Itemized fees locked into a quote, amounts in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLines {
    pub platform_fee: i64,
    pub onramp_fee: i64,
    pub offramp_fee: i64,
    pub total_fees: i64,
    pub currency: String,
}

/// A validated quote. Immutable once created: the client never mutates it,
/// only decides whether it has expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: QuoteId,
    /// Source amount in cents.
    pub amount: i64,
    pub currency: String,
    pub exchange_rate: Decimal,
    pub fees: FeeLines,
    /// Destination-currency amount in cents the backend commits to honoring.
    pub guaranteed_payout: i64,
    pub payout_currency: String,
    pub expires_at: DateTime<Utc>,
    pub valid_for_seconds: u64,
}

impl Quote {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Countdown tracker for this quote's validity window.
    pub fn countdown(&self) -> QuoteCountdown {
        QuoteCountdown::new(self.expires_at, self.valid_for_seconds)
    }
}
