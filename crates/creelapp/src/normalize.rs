//! # Value Normalization
//!
//! Catch data reaches the store from two directions, and each gets a different
//! parsing policy:
//!
//! - **Stored values** (rows read back from the table, edit prefills) are parsed
//!   leniently. Historical data must never block the log, so unparseable or missing
//!   values fall back to a usable default. The fallback is visible in the return
//!   type: every lenient parser returns a [`Parsed`] that says whether the value was
//!   read or defaulted. The table codec only keeps understood values
//!   ([`Parsed::ok`]); fallbacks are for prefilling an edit.
//! - **Entered values** are parsed strictly at commit time. [`parse_entered_time`]
//!   fails with [`CreelError::InvalidTimeFormat`] instead of persisting garbage.
//!
//! Canonical text forms: dates `YYYY-MM-DD`, times `HH:MM`, numbers as plain
//! decimal text.

use crate::error::{CreelError, Result};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const STORED_TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Result of a lenient parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    /// The input was understood.
    Value(T),
    /// The input was empty or unparseable; this is the fallback.
    Defaulted(T),
}

impl<T> Parsed<T> {
    pub fn value(&self) -> &T {
        match self {
            Parsed::Value(v) | Parsed::Defaulted(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Parsed::Value(v) | Parsed::Defaulted(v) => v,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Parsed::Defaulted(_))
    }

    /// The value only when the input was understood.
    pub fn ok(self) -> Option<T> {
        match self {
            Parsed::Value(v) => Some(v),
            Parsed::Defaulted(_) => None,
        }
    }
}

/// Parses a date, falling back to today's local date.
pub fn parse_date(text: &str) -> Parsed<NaiveDate> {
    parse_date_or(text, Local::now().date_naive())
}

pub fn parse_date_or(text: &str, fallback: NaiveDate) -> Parsed<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return Parsed::Defaulted(fallback);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(Parsed::Value)
        .unwrap_or(Parsed::Defaulted(fallback))
}

/// Parses a persisted time, falling back to the current wall-clock time.
pub fn parse_stored_time(text: &str) -> Parsed<NaiveTime> {
    parse_stored_time_or(text, truncate_to_minute(Local::now().time()))
}

pub fn parse_stored_time_or(text: &str, fallback: NaiveTime) -> Parsed<NaiveTime> {
    let s = text.trim();
    if s.is_empty() {
        return Parsed::Defaulted(fallback);
    }
    STORED_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .map(|t| Parsed::Value(truncate_to_minute(t)))
        .unwrap_or(Parsed::Defaulted(fallback))
}

/// Strictly parses a user-entered `HH:MM` time.
///
/// One-digit components are zero-padded first, so `7:5` reads as `07:05`.
pub fn parse_entered_time(text: &str) -> Result<NaiveTime> {
    let invalid = || CreelError::InvalidTimeFormat(text.to_string());
    let s = text.trim();

    let parts: Vec<&str> = s.split(':').collect();
    let [hour, minute] = parts.as_slice() else {
        return Err(invalid());
    };
    let is_component =
        |p: &str| (1..=2).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit());
    if !is_component(*hour) || !is_component(*minute) {
        return Err(invalid());
    }

    let normalized = format!("{:0>2}:{:0>2}", hour, minute);
    NaiveTime::parse_from_str(&normalized, "%H:%M").map_err(|_| invalid())
}

/// Parses a number, returning `default` for empty, non-numeric or non-finite input.
pub fn safe_number(text: &str, default: f64) -> Parsed<f64> {
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Parsed::Value(n),
        _ => Parsed::Defaulted(default),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Plain decimal text; whole numbers keep one decimal (`42` → `42.0`).
pub fn format_number(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || !value.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
