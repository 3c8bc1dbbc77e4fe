use chrono::{DateTime, Utc};

/// Human readable distance from `then` to `now`, e.g. "3 minutes ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds();
    if seconds < 1 {
        return "just now".to_string();
    }

    let (amount, unit) = match seconds {
        s if s < 60 => (s, "second"),
        s if s < 60 * 60 => (s / 60, "minute"),
        s if s < 24 * 60 * 60 => (s / (60 * 60), "hour"),
        s => (s / (24 * 60 * 60), "day"),
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}
