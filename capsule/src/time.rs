use chrono::{DateTime, SecondsFormat, Utc};
#[cfg(target_arch = "wasm32")]
use instant::SystemTime;
#[cfg(not(target_arch = "wasm32"))]
use std::time::SystemTime;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Seconds since the unix epoch; a clock set before the epoch reads as zero
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// ISO-8601 UTC rendering with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`
pub fn iso_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Countdown shown on an owned capsule
pub fn format_countdown(seconds: u64) -> String {
    if seconds == 0 {
        return "Ready to unlock!".into();
    }

    let days = seconds / DAY;
    let hours = (seconds % DAY) / HOUR;
    let minutes = (seconds % HOUR) / MINUTE;

    match (days, hours) {
        (0, 0) => format!("{minutes}m"),
        (0, _) => format!("{hours}h {minutes}m"),
        _ => format!("{days}d {hours}h {minutes}m"),
    }
}

/// Coarser countdown shown on feed posts
pub fn format_remaining(seconds: u64) -> String {
    if seconds == 0 {
        return "Unlocked".into();
    }

    let days = seconds / DAY;
    let hours = (seconds % DAY) / HOUR;

    match (days, hours) {
        (0, 0) => "Less than 1h remaining".into(),
        (0, _) => format!("{hours}h remaining"),
        _ => format!("{days}d {hours}h remaining"),
    }
}
