//! Readout formatting
//!
//! Pure string helpers behind every number on the dashboard.

use crate::consts::cli_consts::{MPS_TO_KMH, NOT_AVAILABLE};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Left-pads `value` with `0` up to `length` characters. Values that are
/// already long enough come back unchanged, never truncated.
pub fn pad_with_zeroes(value: impl ToString, length: usize) -> String {
    let value = value.to_string();
    let missing = length.saturating_sub(value.chars().count());
    let mut padded = "0".repeat(missing);
    padded.push_str(&value);
    padded
}

pub fn mps_to_kmh(speed: f64) -> f64 {
    speed * MPS_TO_KMH
}

/// Ground speed for display. Jitter below zero reads as standing still.
pub fn display_kmh(speed: f64) -> f64 {
    let kmh = mps_to_kmh(speed);
    if kmh > 0.0 { kmh } else { 0.0 }
}

/// Bearing rounded to whole degrees in `0..360`.
pub fn whole_degrees(bearing: f64) -> f64 {
    // adding zero clears a negative zero
    bearing.round().rem_euclid(360.0) + 0.0
}

/// `value` with `decimals` places, or `N/A`.
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Locale-style date and time, e.g. `5/1/2024, 2:00:00 PM`.
pub fn format_locale_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Epoch milliseconds rendered in the local time zone. `None` if the value is
/// out of chrono's range.
pub fn format_epoch_millis(timestamp: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(timestamp)
        .single()
        .map(|t| format_locale_timestamp(&t))
}

/// Splits on the first comma into (date, time). Without a comma the whole
/// string is the date.
pub fn split_timestamp(timestamp: &str) -> (String, String) {
    match timestamp.split_once(',') {
        Some((date, time)) => (date.trim().to_string(), time.trim().to_string()),
        None => (timestamp.trim().to_string(), String::new()),
    }
}

/// Eight-wind compass point nearest to `bearing`.
pub fn compass_point(bearing: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = (bearing.rem_euclid(360.0) / 45.0).round() as usize % POINTS.len();
    POINTS[index]
}
