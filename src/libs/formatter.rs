//! Time formatting utilities for the clock display and lap records.
//!
//! This module converts raw millisecond durations into the strings shown on
//! the clock, stored in lap records, and written to CSV exports.
//!
//! ## Format Specifications
//!
//! ### Clock Format
//! - Below one hour: `MM:SS.mmm`
//! - One hour and above: `HH:MM:SS.mmm`
//! - Hours, minutes and seconds are zero-padded to 2 digits
//! - Milliseconds are zero-padded to 3 digits
//! - Values are truncated, never rounded
//!
//! ### Examples
//! - 0 ms → "00:00.000"
//! - 61 005 ms → "01:01.005"
//! - 3 661 000 ms → "01:01:01.000"
//!
//! ## Examples
//!
//! ```rust
//! use lapclock::libs::formatter::{format_time, format_seconds, format_signed_diff};
//!
//! assert_eq!(format_time(61_005), "01:01.005");
//! assert_eq!(format_seconds(1.5), "1.50");
//! assert_eq!(format_signed_diff(-0.3, true), "-0.30s");
//! ```

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Formats a millisecond duration as `MM:SS.mmm` or `HH:MM:SS.mmm`.
///
/// The hour field only appears once the duration reaches a full hour. Every
/// field is derived with integer division, so the result is a truncation of
/// the input and never rounds up into the next unit.
///
/// # Examples
///
/// ```rust
/// use lapclock::libs::formatter::format_time;
///
/// assert_eq!(format_time(0), "00:00.000");
/// assert_eq!(format_time(3_661_000), "01:01:01.000");
/// ```
pub fn format_time(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// Formats a seconds value with exactly two decimals (`1.5` → `"1.50"`).
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}

/// Formats a lap time difference for display, always with an explicit sign.
///
/// The sign comes from `faster`, not from the value: a lap a few
/// milliseconds faster rounds to `0.00` but is still shown as `-0.00s`, and
/// an equal lap is shown as `+0.00s`.
pub fn format_signed_diff(diff_seconds: f64, faster: bool) -> String {
    let sign = if faster { '-' } else { '+' };
    format!("{}{:.2}s", sign, diff_seconds.abs())
}

/// Rounds a millisecond value to seconds with two decimals.
///
/// Halves round away from zero, so `1505` ms becomes `1.51` and `-1505` ms
/// becomes `-1.51`.
pub fn ms_to_rounded_seconds(ms: i64) -> f64 {
    (ms as f64 / 10.0).round() / 100.0
}
