// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use time::macros::format_description;
use time::{Date, Time};

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub const TIME_LAYOUT: &str = "HH:MM";

/// Rejected draft input. Every variant names the form field it belongs to so
/// the dialog can render the message next to that field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field}: {value:?} is not a valid amount")]
    InvalidAmount { field: &'static str, value: String },
    #[error("{field}: amount cannot be negative")]
    NegativeAmount { field: &'static str },
    #[error("{field}: amount must be greater than zero")]
    ZeroAmount { field: &'static str },
    #[error("{field}: {value:?} is not a date; use {DATE_LAYOUT}")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field}: {value:?} is not a time; use {TIME_LAYOUT}")]
    InvalidTime { field: &'static str, value: String },
    #[error("{field}: {value:?} is not a whole number")]
    InvalidCount { field: &'static str, value: String },
    #[error("{field}: unknown budget category {value:?}")]
    UnknownCategory { field: &'static str, value: String },
}

impl ValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidAmount { field, .. }
            | Self::NegativeAmount { field }
            | Self::ZeroAmount { field }
            | Self::InvalidDate { field, .. }
            | Self::InvalidTime { field, .. }
            | Self::InvalidCount { field, .. }
            | Self::UnknownCategory { field, .. } => field,
        }
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn require_text(field: &'static str, input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_owned())
}

pub fn parse_required_cents(field: &'static str, input: &str) -> ValidationResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    parse_cents(field, trimmed)
}

pub fn parse_positive_cents(field: &'static str, input: &str) -> ValidationResult<i64> {
    let cents = parse_required_cents(field, input)?;
    if cents == 0 {
        return Err(ValidationError::ZeroAmount { field });
    }
    Ok(cents)
}

pub fn parse_required_date(field: &'static str, input: &str) -> ValidationResult<Date> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Date::parse(trimmed, &format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: trimmed.to_owned(),
        }
    })
}

pub fn parse_required_time(field: &'static str, input: &str) -> ValidationResult<Time> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    let invalid = || ValidationError::InvalidTime {
        field,
        value: trimmed.to_owned(),
    };
    let (hour, minute) = trimmed.split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(invalid());
    }
    let hour = hour.parse::<u8>().map_err(|_| invalid())?;
    let minute = minute.parse::<u8>().map_err(|_| invalid())?;
    Time::from_hms(hour, minute, 0).map_err(|_| invalid())
}

pub fn parse_optional_count(field: &'static str, input: &str) -> ValidationResult<u64> {
    let trimmed = input.trim().replace(',', "");
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidCount {
            field,
            value: input.trim().to_owned(),
        })
}

/// Splits comma-separated text into trimmed, non-empty entries.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn format_list(entries: &[String]) -> String {
    entries.join(", ")
}

pub fn format_date(value: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        value.year(),
        u8::from(value.month()),
        value.day()
    )
}

pub fn format_time(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

pub fn format_cents(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    let dollars = cents / 100;
    let remainder = cents % 100;
    format!("{sign}${}.{:02}", comma_format(dollars), remainder)
}

/// Plain decimal form used to pre-fill amount fields.
pub fn format_cents_plain(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

/// Cents in one of each unit, smallest first.
const COMPACT_UNITS: [(i128, &str); 3] = [
    (100_000, "k"),
    (100_000_000, "M"),
    (100_000_000_000, "B"),
];

/// Short money form for gauges: exact below $1,000, otherwise tenths of a
/// unit. Rounding up to 1000 of a unit carries into the next one, so
/// $999,950 reads `$1M`.
pub fn format_compact_cents(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    if cents < COMPACT_UNITS[0].0 as i64 {
        return format!("{sign}{}", format_cents(cents));
    }

    let cents = i128::from(cents);
    let tenths_of = |unit: usize| {
        let per_tenth = COMPACT_UNITS[unit].0 / 10;
        (cents + per_tenth / 2) / per_tenth
    };
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(per_unit, _)| cents >= *per_unit)
        .unwrap_or(0);
    let mut tenths = tenths_of(unit);
    if tenths >= 10_000 && unit + 1 < COMPACT_UNITS.len() {
        unit += 1;
        tenths = tenths_of(unit);
    }

    let suffix = COMPACT_UNITS[unit].1;
    let (whole, fraction) = (tenths / 10, tenths % 10);
    if fraction == 0 {
        format!("{sign}${whole}{suffix}")
    } else {
        format!("{sign}${whole}.{fraction}{suffix}")
    }
}

fn parse_cents(field: &'static str, input: &str) -> ValidationResult<i64> {
    let invalid = || ValidationError::InvalidAmount {
        field,
        value: input.to_owned(),
    };
    let clean = input.replace(',', "");
    if clean.starts_with('-') {
        return Err(ValidationError::NegativeAmount { field });
    }

    let clean = clean.strip_prefix('$').unwrap_or(&clean);
    if clean.is_empty() {
        return Err(invalid());
    }

    let parts = clean.split('.').collect::<Vec<_>>();
    if parts.len() > 2 {
        return Err(invalid());
    }

    let whole = parse_digits(parts[0], true).ok_or_else(invalid)?;
    if whole > i64::MAX / 100 {
        return Err(invalid());
    }

    let mut frac = 0i64;
    if parts.len() == 2 {
        if parts[1].len() > 2 {
            return Err(invalid());
        }
        frac = parse_digits(parts[1], false).ok_or_else(invalid)?;
        if parts[1].len() == 1 {
            frac *= 10;
        }
    }

    whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac))
        .ok_or_else(invalid)
}

fn parse_digits(input: &str, allow_empty: bool) -> Option<i64> {
    if input.is_empty() {
        return allow_empty.then_some(0);
    }
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    input.parse::<i64>().ok()
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut chars = digits.chars().collect::<Vec<_>>();
    let mut count = 0usize;
    while let Some(ch) = chars.pop() {
        if count == 3 {
            out.push(',');
            count = 0;
        }
        out.push(ch);
        count += 1;
    }
    out.chars().rev().collect()
}

fn normalize_sign(cents: i64) -> (&'static str, i64) {
    if cents >= 0 {
        return ("", cents);
    }
    if cents == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -cents)
    }
}
