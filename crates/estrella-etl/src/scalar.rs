//! Typed readers for plain text cells.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Markers treated as "no value", matching what spreadsheet and dataframe
/// exports write for nulls.
const NULL_MARKERS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null", "NULL", "None"];

/// A cell held text that could not be read as the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidScalar;

#[must_use]
pub fn is_missing(raw: &str) -> bool {
    NULL_MARKERS.contains(&raw.trim())
}

/// Text cell: `None` for null markers, otherwise the cell unchanged.
#[must_use]
pub fn text(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Decimal cell. Accepts a leading currency sign, thousands separators and
/// scientific notation (`"$1,299.00"`, `"1.2e3"`).
///
/// # Errors
///
/// Returns [`InvalidScalar`] when the text is not a number.
pub fn decimal(raw: &str) -> Result<Option<Decimal>, InvalidScalar> {
    if is_missing(raw) {
        return Ok(None);
    }
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(Some)
        .map_err(|_| InvalidScalar)
}

/// Integer cell. Whole-valued decimals such as `"12.0"` are accepted.
///
/// # Errors
///
/// Returns [`InvalidScalar`] for fractional or non-numeric text.
pub fn count(raw: &str) -> Result<Option<i64>, InvalidScalar> {
    if is_missing(raw) {
        return Ok(None);
    }
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Some(n));
    }
    match decimal(trimmed)? {
        Some(d) if d.fract().is_zero() => d.to_i64().map(Some).ok_or(InvalidScalar),
        _ => Err(InvalidScalar),
    }
}

/// Boolean cell: `true/false`, `1/0`, `yes/no`, case-insensitive.
///
/// # Errors
///
/// Returns [`InvalidScalar`] for any other text.
pub fn flag(raw: &str) -> Result<Option<bool>, InvalidScalar> {
    if is_missing(raw) {
        return Ok(None);
    }
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "1.0" | "yes" | "y" => Ok(Some(true)),
        "false" | "f" | "0" | "0.0" | "no" | "n" => Ok(Some(false)),
        _ => Err(InvalidScalar),
    }
}
