//! Payments sub-client — submission, lookup, history, and watch pollers.

use crate::client::CorridorClient;
use crate::domain::payment::state::PaymentBoard;
use crate::domain::payment::{Payment, PaymentAck, PaymentRequest};
use crate::error::{ErrorInfo, SdkError};
use crate::http::CorridorHttp;
use crate::ledger::SubmissionLedger;
use crate::poll::{self, PollHandle};
use crate::shared::{IdempotencyKey, PaymentId};

use futures_util::future::join_all;
use std::sync::Arc;

/// Sub-client for payment operations.
pub struct Payments<'a> {
    pub(crate) client: &'a CorridorClient,
}

impl Payments<'_> {
    /// Submit a payment against a quote.
    ///
    /// Generate `key` once per logical submission and pass the same key to
    /// every retry — the backend deduplicates on it and returns the same
    /// `payment_id`. The id is recorded in the submission ledger, which is
    /// itself idempotent, so a retried submission records one entry.
    pub async fn submit(
        &self,
        request: &PaymentRequest,
        key: &IdempotencyKey,
    ) -> Result<PaymentAck, SdkError> {
        request
            .validate()
            .map_err(|e| SdkError::Validation(e.to_string()))?;
        let ack: PaymentAck = self.client.http.create_payment(request, key).await?.into();
        self.client.ledger.append(&ack.payment_id);
        Ok(ack)
    }

    /// Fetch one payment snapshot.
    pub async fn get(&self, id: &PaymentId) -> Result<Payment, SdkError> {
        let record = self.client.http.get_payment(id).await?;
        Payment::try_from(record).map_err(|e| SdkError::Validation(e.to_string()))
    }

    /// Fetch many payments in parallel, dropping the ones that fail.
    pub async fn list(&self, ids: &[PaymentId]) -> Vec<Payment> {
        let fetches = ids.iter().map(|id| self.get(id));
        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(payment) => Some(payment),
                Err(e) => {
                    tracing::debug!(error = %e, "dropping failed payment fetch from listing");
                    None
                }
            })
            .collect()
    }

    /// Ids of payments submitted from this client, most-recent-first.
    pub fn history(&self) -> Vec<PaymentId> {
        self.client.ledger.list()
    }

    /// Forget all locally recorded submissions.
    pub fn clear_history(&self) {
        self.client.ledger.clear()
    }

    /// Poll one payment until it reaches a terminal status.
    pub fn watch(&self, id: &PaymentId) -> PollHandle<Payment> {
        let http = self.client.http.clone();
        let id = id.clone();
        poll::spawn(
            self.client.poll.payment,
            move || {
                let http = http.clone();
                let id = id.clone();
                async move { fetch_one(&http, &id).await }
            },
            |payment: &Payment| payment.status.is_terminal(),
        )
    }

    /// Poll a fixed set of payments indefinitely.
    ///
    /// Each id is fetched independently per cycle; one failure neither
    /// blocks nor fails the others, and the board keeps the previous
    /// snapshot for any id whose fetch failed. No termination — entries may
    /// be in different lifecycle stages at once.
    pub fn watch_many(&self, ids: Vec<PaymentId>) -> PollHandle<PaymentBoard> {
        let http = self.client.http.clone();
        let board = Arc::new(async_lock::Mutex::new(PaymentBoard::new()));
        poll::spawn(
            self.client.poll.board,
            move || {
                let http = http.clone();
                let ids = ids.clone();
                let board = board.clone();
                async move { fetch_board(&http, &ids, &board).await }
            },
            |_: &PaymentBoard| false,
        )
    }

    /// Poll the submission-ledger history, most-recent-first.
    ///
    /// The ledger is re-read every cycle, so submissions made while the
    /// poller runs show up without restarting it.
    pub fn watch_history(&self) -> PollHandle<Vec<Payment>> {
        let http = self.client.http.clone();
        let ledger: Arc<dyn SubmissionLedger> = self.client.ledger.clone();
        poll::spawn(
            self.client.poll.history,
            move || {
                let http = http.clone();
                let ledger = ledger.clone();
                async move {
                    let ids = ledger.list();
                    let fetches = ids.iter().map(|id| fetch_one(&http, id));
                    let payments: Vec<Payment> = join_all(fetches)
                        .await
                        .into_iter()
                        .filter_map(Result::ok)
                        .collect();
                    Ok(payments)
                }
            },
            |_: &Vec<Payment>| false,
        )
    }
}

async fn fetch_one(http: &CorridorHttp, id: &PaymentId) -> Result<Payment, ErrorInfo> {
    let record = http
        .get_payment(id)
        .await
        .map_err(|e| ErrorInfo::from(&e))?;
    Payment::try_from(record).map_err(|e| ErrorInfo::validation(e.to_string()))
}

async fn fetch_board(
    http: &CorridorHttp,
    ids: &[PaymentId],
    board: &async_lock::Mutex<PaymentBoard>,
) -> Result<PaymentBoard, ErrorInfo> {
    let fetches = ids.iter().map(|id| async move { (id, fetch_one(http, id).await) });
    let results = join_all(fetches).await;

    let mut failures = Vec::new();
    let mut merged = board.lock().await;
    for (id, result) in results {
        match result {
            Ok(payment) => merged.apply(payment),
            Err(e) => {
                tracing::debug!(payment_id = %id, kind = ?e.kind, "payment fetch failed, keeping previous snapshot");
                failures.push(e);
            }
        }
    }

    // Partial results are expected; only a fully failed cycle surfaces.
    if !ids.is_empty() && failures.len() == ids.len() {
        return Err(failures.remove(0));
    }
    Ok(merged.clone())
}
