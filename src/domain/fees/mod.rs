//! Fee engine domain — advisory fee quotes and payout arithmetic.
//!
//! The fee engine owns routing and pricing; this module only consumes its
//! answers. A fee quote is advisory and may be stale relative to the amount
//! the caller is currently working with.

pub mod client;
mod convert;
pub mod wire;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── FeeRequest ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Standard,
    Express,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Retail,
    Business,
    Enterprise,
}

/// Request body for fee calculation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeeRequest {
    /// Source amount in cents.
    pub amount: i64,
    pub from_currency: String,
    pub to_currency: String,
    pub destination_country: String,
    pub priority: Priority,
    pub customer_tier: CustomerTier,
}

impl FeeRequest {
    pub fn validate(&self) -> Result<(), FeeValidationError> {
        if self.amount <= 0 {
            return Err(FeeValidationError::NonPositiveAmount(self.amount));
        }
        if self.from_currency.eq_ignore_ascii_case(&self.to_currency) {
            return Err(FeeValidationError::SameCurrency(self.from_currency.clone()));
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeeValidationError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(i64),

    #[error("source and destination currencies must differ, both are {0}")]
    SameCurrency(String),
}

// ─── FeeQuote ────────────────────────────────────────────────────────────────

/// Itemized fee components, amounts in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub platform_fee: i64,
    pub onramp_fee: i64,
    pub offramp_fee: i64,
    pub volatility_premium: i64,
    pub risk_premium: Option<i64>,
}

/// Providers the engine recommends for this transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRoute {
    pub onramp: String,
    pub offramp: String,
    pub chain: Option<String>,
    pub reasoning: String,
}

/// The fee engine's answer. Not persisted; treated as advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Total fee in cents.
    pub total_fee: i64,
    pub fee_breakdown: FeeBreakdown,
    pub recommended_provider: ProviderRoute,
    pub fee_explanation: String,
    pub estimated_settlement_time: String,
    /// Engine confidence, clamped to [0, 1].
    pub confidence_score: f64,
    pub risk_factors: Vec<String>,
}

// ─── Payout arithmetic ───────────────────────────────────────────────────────

/// Destination-currency amount (cents) after fees, at the given rate.
///
/// `None` when the fee exceeds the amount: that pairing means the fee quote
/// is stale against a newly reduced amount, and the caller should show a
/// pending state and wait for fresher data rather than a negative figure.
pub fn recipient_amount(amount_cents: i64, fee: &FeeQuote, exchange_rate: Decimal) -> Option<i64> {
    let after_fees = amount_cents - fee.total_fee;
    if after_fees < 0 {
        return None;
    }
    (Decimal::from(after_fees) * exchange_rate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
