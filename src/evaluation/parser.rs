//! # Field Parser
//!
//! Normalizes raw vitals into optional numbers. Nothing here fails: a value
//! that cannot be read is `None`, and the quality evaluator decides what that
//! means.
//!
//! Numeric strings are read with leading-prefix semantics, so `"98.6F"` is
//! 98.6 and `"120 mmHg"` is 120, while `"abc"` and `""` are unreadable.

use serde::{Deserialize, Serialize};

use crate::constants::BLOOD_PRESSURE_SENTINELS;
use crate::models::RawField;

/// Systolic and diastolic readings, each independently optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
}

impl BloodPressureReading {
    /// Both sides present
    pub fn is_complete(&self) -> bool {
        self.systolic.is_some() && self.diastolic.is_some()
    }

    pub fn values(&self) -> Option<(f64, f64)> {
        self.systolic.zip(self.diastolic)
    }
}

/// Read the longest leading decimal number in `input`
///
/// Leading whitespace is skipped. Returns `None` when no digits are found.
pub fn parse_decimal_prefix(input: &str) -> Option<f64> {
    let candidate = input.trim_start();
    let len = decimal_prefix_len(candidate)?;
    candidate[..len].parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Byte length of `[+-]?(Infinity|digits[.digits][e[+-]digits])` at the start
/// of `s`, or `None` if the mantissa has no digit
fn decimal_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return Some(end + "Infinity".len());
    }

    let integer = digits_from(end);
    end += integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    Some(end)
}

/// Parse a `"<systolic>/<diastolic>"` reading
pub fn parse_blood_pressure(raw: Option<&RawField>) -> BloodPressureReading {
    let Some(RawField::Text(text)) = raw else {
        return BloodPressureReading::default();
    };

    let trimmed = text.trim();
    if trimmed.is_empty() || BLOOD_PRESSURE_SENTINELS.contains(&trimmed) {
        return BloodPressureReading::default();
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    let [systolic, diastolic] = parts.as_slice() else {
        return BloodPressureReading::default();
    };

    BloodPressureReading {
        systolic: parse_side(systolic),
        diastolic: parse_side(diastolic),
    }
}

fn parse_side(side: &str) -> Option<f64> {
    let side = side.trim();
    if side.is_empty() {
        None
    } else {
        parse_decimal_prefix(side)
    }
}

/// Parse a temperature given as a number or numeric string
pub fn parse_temperature(raw: Option<&RawField>) -> Option<f64> {
    parse_numeric(raw)
}

/// Parse an age given as a number or numeric string
///
/// No range checks: negative or implausible ages are returned as-is.
pub fn parse_age(raw: Option<&RawField>) -> Option<f64> {
    parse_numeric(raw)
}

fn parse_numeric(raw: Option<&RawField>) -> Option<f64> {
    match raw? {
        RawField::Number(n) if !n.is_nan() => Some(*n),
        RawField::Text(text) if !text.is_empty() => parse_decimal_prefix(text),
        _ => None,
    }
}
