//! Quote countdown — app-owned expiry tracking.
//!
//! Pure wall-clock arithmetic against a fixed deadline; keeps working even
//! when the quote itself has not been re-fetched. The timer adapter in
//! `ticks()` is a thin wrapper over the pure `tick` state machine so tests
//! can drive it with synthetic clocks.

use chrono::{DateTime, Utc};
use futures_util::Stream;
use std::time::Duration;

/// One observation of the validity window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountdownTick {
    /// Whole seconds until the deadline, floored at zero.
    pub remaining_seconds: u64,
    /// Share of the validity window still remaining, 0.0–100.0.
    pub percent_remaining: f64,
    /// True on exactly one tick per deadline instance: the first to observe
    /// a zero remainder.
    pub just_expired: bool,
}

/// Tracks the remaining validity of a quote deadline.
#[derive(Debug, Clone)]
pub struct QuoteCountdown {
    expires_at: DateTime<Utc>,
    valid_for_seconds: u64,
    expiry_fired: bool,
}

impl QuoteCountdown {
    pub fn new(expires_at: DateTime<Utc>, valid_for_seconds: u64) -> Self {
        Self {
            expires_at,
            valid_for_seconds,
            expiry_fired: false,
        }
    }

    /// Whole-second remainder until the deadline, floored at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }

    pub fn percent_remaining(&self, now: DateTime<Utc>) -> f64 {
        if self.valid_for_seconds == 0 {
            return 0.0;
        }
        (self.remaining(now) as f64 / self.valid_for_seconds as f64) * 100.0
    }

    /// Whether the expiry event has already been reported.
    pub fn expiry_fired(&self) -> bool {
        self.expiry_fired
    }

    /// Observe the clock. Timer drift can land several ticks on a zero
    /// remainder; only the first reports `just_expired`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownTick {
        let remaining_seconds = self.remaining(now);
        let just_expired = remaining_seconds == 0 && !self.expiry_fired;
        if just_expired {
            self.expiry_fired = true;
        }
        CountdownTick {
            remaining_seconds,
            percent_remaining: self.percent_remaining(now),
            just_expired,
        }
    }

    /// One-second tick stream, ending after the expiry tick.
    pub fn ticks(mut self) -> impl Stream<Item = CountdownTick> + Send {
        async_stream::stream! {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let tick = self.tick(Utc::now());
                let expired = tick.just_expired;
                yield tick;
                if expired {
                    break;
                }
            }
        }
    }
}
