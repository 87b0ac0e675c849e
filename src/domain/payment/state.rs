//! Payment state containers — app-owned, SDK-provided update logic.

use super::Payment;
use crate::shared::PaymentId;
use std::collections::HashMap;

/// Latest known snapshot per payment, for multi-payment views.
///
/// The app owns instances of this type; pollers apply updates into it.
/// Snapshots may arrive out of order across cycles, so `apply` is
/// latest-wins keyed by the backend's `updated_at` — a stale snapshot never
/// overwrites a newer one.
#[derive(Debug, Clone, Default)]
pub struct PaymentBoard {
    payments: HashMap<PaymentId, Payment>,
}

impl PaymentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a snapshot. Ignored when an entry with a newer
    /// `updated_at` is already present.
    pub fn apply(&mut self, payment: Payment) {
        match self.payments.get(&payment.payment_id) {
            Some(existing) if existing.updated_at > payment.updated_at => {}
            _ => {
                self.payments.insert(payment.payment_id.clone(), payment);
            }
        }
    }

    pub fn get(&self, id: &PaymentId) -> Option<&Payment> {
        self.payments.get(id)
    }

    /// All snapshots, newest creation first.
    pub fn ordered(&self) -> Vec<&Payment> {
        let mut all: Vec<&Payment> = self.payments.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn remove(&mut self, id: &PaymentId) {
        self.payments.remove(id);
    }

    pub fn clear(&mut self) {
        self.payments.clear();
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn payment(id: &str, status: PaymentStatus, created: i64, updated: i64) -> Payment {
        Payment {
            payment_id: PaymentId::from(id),
            idempotency_key: format!("key_{id}"),
            quote_id: None,
            amount: 100_000,
            currency: "USD".to_string(),
            source_account: "user_12345".to_string(),
            destination_account: "merchant_67890".to_string(),
            status,
            fee_amount: 1200,
            fee_currency: "USD".to_string(),
            guaranteed_payout_amount: None,
            state_history: Vec::new(),
            on_ramp_tx_id: None,
            on_ramp_poll_count: None,
            off_ramp_tx_id: None,
            off_ramp_poll_count: None,
            error_message: None,
            created_at: at(created),
            updated_at: at(updated),
            processed_at: None,
        }
    }

    #[test]
    fn test_apply_inserts_and_updates() {
        let mut board = PaymentBoard::new();
        board.apply(payment("a", PaymentStatus::Pending, 0, 0));
        board.apply(payment("a", PaymentStatus::OnrampPending, 0, 5));
        assert_eq!(board.len(), 1);
        assert_eq!(
            board.get(&PaymentId::from("a")).unwrap().status,
            PaymentStatus::OnrampPending
        );
    }

    #[test]
    fn test_apply_ignores_stale_snapshot() {
        let mut board = PaymentBoard::new();
        board.apply(payment("a", PaymentStatus::OnrampPending, 0, 5));
        // A slow cycle delivers an older snapshot after a newer one landed.
        board.apply(payment("a", PaymentStatus::Pending, 0, 2));
        assert_eq!(
            board.get(&PaymentId::from("a")).unwrap().status,
            PaymentStatus::OnrampPending
        );
    }

    #[test]
    fn test_ordered_newest_creation_first() {
        let mut board = PaymentBoard::new();
        board.apply(payment("old", PaymentStatus::Completed, 0, 0));
        board.apply(payment("new", PaymentStatus::Pending, 100, 100));
        let ids: Vec<_> = board
            .ordered()
            .iter()
            .map(|p| p.payment_id.as_str().to_string())
            .collect();
        assert_eq!(ids, ["new", "old"]);
    }
}
