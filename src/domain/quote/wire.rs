//! Wire types for the quotes endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw quote as the backend sends it.
#[derive(Deserialize, Debug, Clone)]
pub struct QuoteRecord {
    pub quote_id: String,
    pub amount: i64,
    pub currency: String,
    pub exchange_rate: f64,
    pub fees: FeeLinesRecord,
    pub guaranteed_payout: i64,
    pub payout_currency: String,
    pub expires_at: DateTime<Utc>,
    pub valid_for_seconds: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeeLinesRecord {
    pub platform_fee: i64,
    pub onramp_fee: i64,
    pub offramp_fee: i64,
    pub total_fees: i64,
    pub currency: String,
}
