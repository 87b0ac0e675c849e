//! Cross-module flow tests: fee arithmetic, idempotent submission bookkeeping,
//! quote countdown, and payment watching with a scripted backend.

use corridor_sdk::prelude::*;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn fee_quote(total_fee: i64) -> FeeQuote {
    FeeQuote {
        total_fee,
        fee_breakdown: FeeBreakdown {
            platform_fee: 500,
            onramp_fee: 400,
            offramp_fee: 300,
            volatility_premium: 0,
            risk_premium: None,
        },
        recommended_provider: ProviderRoute {
            onramp: "circle".to_string(),
            offramp: "sepa-instant".to_string(),
            chain: Some("base".to_string()),
            reasoning: "lowest blended cost".to_string(),
        },
        fee_explanation: "flat platform fee plus provider costs".to_string(),
        estimated_settlement_time: "3-5 minutes".to_string(),
        confidence_score: 0.92,
        risk_factors: Vec::new(),
    }
}

fn payment(id: &str, status: PaymentStatus, updated: i64) -> Payment {
    Payment {
        payment_id: PaymentId::from(id),
        idempotency_key: "8f14e45f-ceea-4674-b8ee-7f0f1c8e9a21".to_string(),
        quote_id: Some(QuoteId::from("q_1")),
        amount: 100_000,
        currency: "USD".to_string(),
        source_account: "user_12345".to_string(),
        destination_account: "merchant_67890".to_string(),
        status,
        fee_amount: 1200,
        fee_currency: "USD".to_string(),
        guaranteed_payout_amount: Some(84_770),
        state_history: Vec::new(),
        on_ramp_tx_id: None,
        on_ramp_poll_count: None,
        off_ramp_tx_id: None,
        off_ramp_poll_count: None,
        error_message: None,
        created_at: at(0),
        updated_at: at(updated),
        processed_at: None,
    }
}

// ─── Fee arithmetic ──────────────────────────────────────────────────────────

#[test]
fn recipient_amount_for_usd_eur_transfer() {
    let rate = Decimal::try_from(0.858).unwrap();
    let fees = fee_quote(1200);

    // 100000 cents USD at total_fee 1200: round((100000 - 1200) * 0.858)
    assert_eq!(recipient_amount(100_000, &fees, rate), Some(84_770));
}

#[test]
fn reduced_amount_against_stale_fee_shows_pending_not_negative() {
    let rate = Decimal::try_from(0.858).unwrap();
    let stale = fee_quote(1200);

    // The user lowered the amount below the fee quoted for the old amount.
    assert_eq!(recipient_amount(900, &stale, rate), None);
}

// ─── Idempotent submission bookkeeping ───────────────────────────────────────

#[test]
fn retried_submission_records_one_history_entry() {
    let ledger = MemoryLedger::new();
    let key = IdempotencyKey::generate();

    // The backend answers a retry under the same key with the same id.
    let first_ack = PaymentId::from("pay_abc");
    let retry_ack = PaymentId::from("pay_abc");

    ledger.append(&first_ack);
    ledger.append(&retry_ack);

    assert_eq!(ledger.list(), vec![PaymentId::from("pay_abc")]);
    // The key itself never changed across the retry.
    assert_eq!(key.as_str(), key.clone().as_str());
}

#[test]
fn history_orders_most_recent_first_across_submissions() {
    let ledger = MemoryLedger::new();
    ledger.append(&PaymentId::from("a"));
    ledger.append(&PaymentId::from("b"));
    ledger.append(&PaymentId::from("a"));
    assert_eq!(
        ledger.list(),
        vec![PaymentId::from("b"), PaymentId::from("a")]
    );

    ledger.clear();
    assert!(ledger.list().is_empty());
    ledger.append(&PaymentId::from("c"));
    assert_eq!(ledger.list(), vec![PaymentId::from("c")]);
}

// ─── Quote countdown ─────────────────────────────────────────────────────────

#[test]
fn quote_countdown_decreases_to_zero_and_fires_once() {
    let quote = Quote {
        quote_id: QuoteId::from("q_1"),
        amount: 100_000,
        currency: "USD".to_string(),
        exchange_rate: Decimal::try_from(0.858).unwrap(),
        fees: FeeLines {
            platform_fee: 500,
            onramp_fee: 400,
            offramp_fee: 300,
            total_fees: 1200,
            currency: "USD".to_string(),
        },
        guaranteed_payout: 84_770,
        payout_currency: "EUR".to_string(),
        expires_at: at(30),
        valid_for_seconds: 30,
    };

    let mut countdown = quote.countdown();
    let mut expiries = 0;
    let mut previous = u64::MAX;
    for s in 0..=35 {
        let tick = countdown.tick(at(s));
        assert!(tick.remaining_seconds <= previous);
        if s <= 30 {
            assert_eq!(tick.remaining_seconds, (30 - s) as u64);
        }
        previous = tick.remaining_seconds;
        if tick.just_expired {
            expiries += 1;
            assert_eq!(s, 30);
        }
    }
    assert_eq!(expiries, 1);
    assert!(quote.is_expired_at(at(31)));
}

// ─── Watching a payment via the poller ───────────────────────────────────────

fn scripted_payments(
    steps: Vec<Result<Payment, ErrorInfo>>,
) -> (
    Arc<AtomicUsize>,
    impl FnMut() -> std::future::Ready<Result<Payment, ErrorInfo>> + Send,
) {
    let script = Arc::new(Mutex::new(VecDeque::from(steps)));
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = {
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            let next = script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted");
            std::future::ready(next)
        }
    };
    (calls, fetch)
}

#[tokio::test(start_paused = true)]
async fn watcher_follows_pipeline_and_stops_at_terminal() {
    let (calls, fetch) = scripted_payments(vec![
        Ok(payment("pay_abc", PaymentStatus::Pending, 0)),
        Ok(payment("pay_abc", PaymentStatus::OnrampPending, 3)),
        Ok(payment("pay_abc", PaymentStatus::Completed, 6)),
    ]);

    let handle = corridor_sdk::poll::spawn(Duration::from_secs(3), fetch, |p: &Payment| {
        p.status.is_terminal()
    });

    tokio::time::sleep(Duration::from_secs(60)).await;

    // No requests issued after COMPLETED was observed.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(handle.is_finished());

    let snap = handle.snapshot();
    let last = snap.data.unwrap();
    assert_eq!(last.status, PaymentStatus::Completed);
    assert_eq!(stage_mark(last.status, 3), StageMark::Done);
    assert_eq!(progress_percent(last.status), 100);
}

#[tokio::test(start_paused = true)]
async fn watcher_keeps_stale_snapshot_through_transient_failure() {
    let (calls, fetch) = scripted_payments(vec![
        Ok(payment("pay_abc", PaymentStatus::OnrampPending, 0)),
        Err(ErrorInfo::new(ErrorKind::Network, "connection reset")),
        Ok(payment("pay_abc", PaymentStatus::Completed, 6)),
    ]);

    let handle = corridor_sdk::poll::spawn(Duration::from_secs(3), fetch, |p: &Payment| {
        p.status.is_terminal()
    });

    // First cycle lands.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        handle.snapshot().data.unwrap().status,
        PaymentStatus::OnrampPending
    );

    // Failed cycle: error surfaced, data untouched, cadence unbroken.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.error.as_ref().map(|e| e.kind), Some(ErrorKind::Network));
    assert_eq!(snap.data.unwrap().status, PaymentStatus::OnrampPending);

    // Recovery cycle reaches the terminal state.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let snap = handle.snapshot();
    assert!(snap.error.is_none());
    assert_eq!(snap.data.unwrap().status, PaymentStatus::Completed);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

// ─── Display projection over a live snapshot ─────────────────────────────────

#[test]
fn onramp_complete_renders_in_offramp_slot() {
    let p = payment("pay_abc", PaymentStatus::OnrampComplete, 5);
    let stage = p.status.display_stage().unwrap();
    assert_eq!(stage, DisplayStage::OfframpPending);
    assert_eq!(stage.index(), 2);
    assert_eq!(DISPLAY_STAGES.len(), 4);
    assert_eq!(stage_mark(p.status, 2), StageMark::Active);
    assert_eq!(stage_mark(p.status, 1), StageMark::Done);
}
