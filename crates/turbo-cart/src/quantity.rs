//! Quantity values and the parsing rules applied to raw input text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line-item quantity. Always at least [`Quantity::MIN`]; no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct Quantity(i64);

impl Quantity {
    /// Smallest quantity a field may hold.
    pub const MIN: Quantity = Quantity(1);

    /// Create a quantity, clamping anything below the minimum up to it.
    pub fn new(value: i64) -> Self {
        Self(value.max(Self::MIN.0))
    }

    /// Interpret raw field text; unparseable input becomes the minimum.
    pub fn parse_lenient(raw: &str) -> Self {
        parse_leading_int(raw)
            .map(Self::new)
            .unwrap_or(Self::MIN)
    }

    /// Apply a signed delta, saturating on overflow and clamping at the minimum.
    pub fn step(self, delta: i64) -> Self {
        Self::new(self.0.saturating_add(delta))
    }

    /// The numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse the leading base-10 integer of `raw`.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit, so `"3abc"` is 3 and `"2.9"` is 2. Returns `None` when no
/// digit follows. Values beyond `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { magnitude.saturating_neg() } else { magnitude })
}

/// Parse `raw` with the browser's `Number(...)` grammar.
///
/// Accepted, after trimming whitespace:
/// - decimal literals with optional sign, fraction and exponent (`"2"`,
///   `"-0.5"`, `"1e3"`, `".5"`);
/// - unsigned `0x`, `0o` and `0b` integer literals;
/// - `Infinity` with an optional sign.
///
/// Everything else is non-numeric, including an empty field, trailing
/// garbage (`"3abc"`) and spellings such as `"inf"` or `"NaN"`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    match s {
        "" => return None,
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return None;
    }
    s.parse::<f64>().ok()
}
