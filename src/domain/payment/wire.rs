//! Wire types for the payments endpoints.

use super::PaymentStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw payment as the backend sends it.
#[derive(Deserialize, Debug, Clone)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub idempotency_key: String,
    pub quote_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub source_account: String,
    pub destination_account: String,
    pub status: PaymentStatus,
    pub fee_amount: i64,
    pub fee_currency: String,
    pub guaranteed_payout_amount: Option<i64>,
    pub state_history: Option<Vec<TransitionRecord>>,
    pub on_ramp_tx_id: Option<String>,
    pub on_ramp_poll_count: Option<u32>,
    pub off_ramp_tx_id: Option<String>,
    pub off_ramp_poll_count: Option<u32>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TransitionRecord {
    pub from_status: PaymentStatus,
    pub to_status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
}

/// Creation acknowledgement.
#[derive(Deserialize, Debug, Clone)]
pub struct PaymentAckRecord {
    pub payment_id: String,
    pub status: PaymentStatus,
    pub message: String,
}
