//! Display formatting helpers for amounts and timestamps.

use chrono::{DateTime, Utc};

/// Format integer cents as a currency string, e.g. `1234567 USD` → `"USD 12,345.67"`.
pub fn format_cents(amount_cents: i64, currency: &str) -> String {
    let negative = amount_cents < 0;
    let abs = amount_cents.unsigned_abs();
    let whole = group_thousands(abs / 100);
    let frac = abs % 100;
    if negative {
        format!("{} -{}.{:02}", currency, whole, frac)
    } else {
        format!("{} {}.{:02}", currency, whole, frac)
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let rest = value / 1000;
        if rest == 0 {
            groups.push(format!("{}", value % 1000));
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value = rest;
    }
    groups.reverse();
    groups.join(",")
}

/// Human-readable elapsed time, e.g. `"3 minutes ago"`.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        format!("{} minute{} ago", minutes, plural(minutes))
    } else if seconds < 86_400 {
        let hours = seconds / 3600;
        format!("{} hour{} ago", hours, plural(hours))
    } else {
        let days = seconds / 86_400;
        format!("{} day{} ago", days, plural(days))
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// Total processing duration, e.g. `"1m 23s"`.
///
/// Open-ended while the payment is still in flight: falls back to `now`
/// when no processed timestamp exists yet.
pub fn processing_time(
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let end = processed_at.unwrap_or(now);
    let seconds = (end - created_at).num_seconds().max(0);
    if seconds < 60 {
        format!("{}s", seconds)
    } else {
        format!("{}m {}s", seconds / 60, seconds % 60)
    }
}
