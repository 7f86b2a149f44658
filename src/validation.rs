//! Field checks shared by every submission payload.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_QUANTITY: i64 = 1;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("email format is not valid")]
    InvalidEmail,
    #[error("customer name and phone are required")]
    MissingCustomer,
    #[error("at least one item is required")]
    EmptyItems,
    #[error("item {index} is invalid: {reason}")]
    InvalidItem { index: usize, reason: String },
    #[error("orders are only accepted on {0}")]
    OrderingClosed(&'static str),
    #[error("invalid JSON payload")]
    MalformedPayload,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Trimmed value, or `None` when absent or blank.
pub fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_quantity(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Quantity from a number or numeric string; anything else, or a value below
/// one, falls back to [`DEFAULT_QUANTITY`].
pub fn quantity_or_default(value: Option<&Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_quantity(s),
        _ => None,
    };
    parsed.filter(|q| *q > 0).unwrap_or(DEFAULT_QUANTITY)
}

/// Amount from a number or numeric string, `None` when absent or unparsable.
pub fn amount(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_amount(s),
        _ => None,
    }
}

pub fn amount_or_zero(value: Option<&Value>) -> f64 {
    amount(value).unwrap_or(0.0)
}
