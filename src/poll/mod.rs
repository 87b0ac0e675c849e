//! Timer-driven polling with termination predicates and cancellation.
//!
//! The backend offers no push transport, so pollers stand in for
//! subscriptions: a background task fetches on a fixed cadence and publishes
//! snapshots through a `watch` channel. Consumers read the latest snapshot or
//! subscribe to the update stream; a future push-based transport can replace
//! the timer without changing either surface.

use crate::error::ErrorInfo;

use chrono::{DateTime, Utc};
use futures_util::Stream;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Latest known state of a polled resource.
///
/// On a failed cycle `error` is set and `data` keeps the previous value —
/// stale-but-present beats blanking the view while the backend resource may
/// still be advancing.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    /// True until the first cycle settles, success or failure.
    pub loading: bool,
    pub error: Option<ErrorInfo>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> Snapshot<T> {
    fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            last_updated: None,
        }
    }
}

/// Handle to a running poller. Dropping it cancels the poller.
pub struct PollHandle<T> {
    snapshot_rx: watch::Receiver<Snapshot<T>>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> PollHandle<T> {
    /// The latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot_rx.borrow().clone()
    }

    /// Stream of snapshots, starting from the current one.
    ///
    /// Ends when the poller stops (termination predicate hit or cancelled).
    /// Only the latest snapshot is retained: a slow consumer observes the
    /// newest state, not every intermediate one.
    pub fn updates(&self) -> impl Stream<Item = Snapshot<T>> + Send + 'static {
        let mut rx = self.snapshot_rx.clone();
        async_stream::stream! {
            loop {
                let snap = rx.borrow_and_update().clone();
                yield snap;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    }

    /// Stop scheduling further cycles.
    ///
    /// A fetch already in flight is allowed to complete; its result is
    /// discarded. No snapshot is published after cancellation.
    pub fn cancel(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Spawn a poller: fetch immediately, then on a fixed cadence, until `until`
/// returns true for a successful result or the handle is cancelled.
///
/// Failed cycles keep the previous `data` and do not stop the cadence.
/// Cycles run sequentially within the task, so snapshots are published in
/// issue order. Must be called within a tokio runtime.
pub fn spawn<T, F, Fut, P>(interval: Duration, mut fetch: F, until: P) -> PollHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ErrorInfo>> + Send,
    P: Fn(&T) -> bool + Send + 'static,
{
    let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::<T>::initial());
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        loop {
            let result = fetch().await;

            // Re-check after every await: a late response from a cancelled
            // poller must not mutate state a newer view may be watching.
            if *shutdown_rx.borrow() {
                return;
            }

            let now = Utc::now();
            let mut terminal = false;
            snapshot_tx.send_modify(|snap| {
                snap.loading = false;
                match result {
                    Ok(data) => {
                        terminal = until(&data);
                        snap.data = Some(data);
                        snap.error = None;
                        snap.last_updated = Some(now);
                    }
                    Err(err) => {
                        tracing::debug!(kind = ?err.kind, "poll cycle failed, keeping last snapshot");
                        snap.error = Some(err);
                    }
                }
            });

            if terminal {
                return;
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        return;
                    }
                }
            }
        }
    });

    PollHandle {
        snapshot_rx,
        shutdown_tx,
        task,
    }
}
