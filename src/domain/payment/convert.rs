//! Conversion: PaymentRecord → Payment (TryFrom + invariant checks).

use super::wire;
use super::{Payment, PaymentAck, StateTransition};
use thiserror::Error;

/// A payment snapshot that violates its own invariants is rejected rather
/// than rendered — a poller holding a previous good snapshot keeps showing
/// that one instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("state history out of order at transition {index}")]
    HistoryOutOfOrder { index: usize },

    #[error("state history ends in {found} but payment status is {expected}")]
    HistoryTailMismatch { expected: String, found: String },
}

impl TryFrom<wire::PaymentRecord> for Payment {
    type Error = SnapshotError;

    fn try_from(source: wire::PaymentRecord) -> Result<Self, Self::Error> {
        let state_history: Vec<StateTransition> = source
            .state_history
            .unwrap_or_default()
            .into_iter()
            .map(|t| StateTransition {
                from_status: t.from_status,
                to_status: t.to_status,
                timestamp: t.timestamp,
                message: t.message,
            })
            .collect();

        for (index, pair) in state_history.windows(2).enumerate() {
            if pair[0].timestamp > pair[1].timestamp {
                return Err(SnapshotError::HistoryOutOfOrder { index: index + 1 });
            }
        }
        if let Some(last) = state_history.last() {
            if last.to_status != source.status {
                return Err(SnapshotError::HistoryTailMismatch {
                    expected: source.status.as_str().to_string(),
                    found: last.to_status.as_str().to_string(),
                });
            }
        }

        Ok(Payment {
            payment_id: source.payment_id.into(),
            idempotency_key: source.idempotency_key,
            quote_id: source.quote_id.map(Into::into),
            amount: source.amount,
            currency: source.currency,
            source_account: source.source_account,
            destination_account: source.destination_account,
            status: source.status,
            fee_amount: source.fee_amount,
            fee_currency: source.fee_currency,
            guaranteed_payout_amount: source.guaranteed_payout_amount,
            state_history,
            on_ramp_tx_id: source.on_ramp_tx_id,
            on_ramp_poll_count: source.on_ramp_poll_count,
            off_ramp_tx_id: source.off_ramp_tx_id,
            off_ramp_poll_count: source.off_ramp_poll_count,
            error_message: source.error_message,
            created_at: source.created_at,
            updated_at: source.updated_at,
            processed_at: source.processed_at,
        })
    }
}

impl From<wire::PaymentAckRecord> for PaymentAck {
    fn from(source: wire::PaymentAckRecord) -> Self {
        PaymentAck {
            payment_id: source.payment_id.into(),
            status: source.status,
            message: source.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn transition(
        from: PaymentStatus,
        to: PaymentStatus,
        secs: i64,
    ) -> wire::TransitionRecord {
        wire::TransitionRecord {
            from_status: from,
            to_status: to,
            timestamp: at(secs),
            message: None,
        }
    }

    fn record(
        status: PaymentStatus,
        history: Option<Vec<wire::TransitionRecord>>,
    ) -> wire::PaymentRecord {
        wire::PaymentRecord {
            payment_id: "pay_1".to_string(),
            idempotency_key: "key_1".to_string(),
            quote_id: Some("q_1".to_string()),
            amount: 100_000,
            currency: "USD".to_string(),
            source_account: "user_12345".to_string(),
            destination_account: "merchant_67890".to_string(),
            status,
            fee_amount: 1200,
            fee_currency: "USD".to_string(),
            guaranteed_payout_amount: Some(84_770),
            state_history: history,
            on_ramp_tx_id: None,
            on_ramp_poll_count: None,
            off_ramp_tx_id: None,
            off_ramp_poll_count: None,
            error_message: None,
            created_at: at(0),
            updated_at: at(10),
            processed_at: None,
        }
    }

    #[test]
    fn test_missing_history_converts_to_empty() {
        let payment = Payment::try_from(record(PaymentStatus::Pending, None)).unwrap();
        assert!(payment.state_history.is_empty());
    }

    #[test]
    fn test_consistent_history_accepted() {
        let history = vec![
            transition(PaymentStatus::Pending, PaymentStatus::OnrampPending, 1),
            transition(PaymentStatus::OnrampPending, PaymentStatus::OnrampComplete, 5),
        ];
        let payment =
            Payment::try_from(record(PaymentStatus::OnrampComplete, Some(history))).unwrap();
        assert_eq!(
            payment.transition_time(PaymentStatus::OnrampComplete),
            Some(at(5))
        );
    }

    #[test]
    fn test_out_of_order_history_rejected() {
        let history = vec![
            transition(PaymentStatus::Pending, PaymentStatus::OnrampPending, 9),
            transition(PaymentStatus::OnrampPending, PaymentStatus::OnrampComplete, 5),
        ];
        assert_eq!(
            Payment::try_from(record(PaymentStatus::OnrampComplete, Some(history))).unwrap_err(),
            SnapshotError::HistoryOutOfOrder { index: 1 }
        );
    }

    #[test]
    fn test_history_tail_must_match_status() {
        let history = vec![transition(
            PaymentStatus::Pending,
            PaymentStatus::OnrampPending,
            1,
        )];
        assert!(matches!(
            Payment::try_from(record(PaymentStatus::Completed, Some(history))).unwrap_err(),
            SnapshotError::HistoryTailMismatch { .. }
        ));
    }
}
