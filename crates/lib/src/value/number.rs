//! Exact decimal numbers in canonical string form.
//!
//! DynamoDB transmits every number as a decimal string. `Number` keeps that
//! representation in-process so a value can travel application -> wire ->
//! application without ever passing through a binary float. Equality and
//! ordering are numeric, and the canonical form is unique per value, so the
//! string itself can double as a hash/equality key.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::value::errors::ValueError;

/// An exact decimal scalar stored in canonical string form.
///
/// The canonical form is: optional `-` sign, an integer part with no leading
/// zeros (`0` itself is allowed), and an optional fractional part with no
/// trailing zeros. No exponent, no `+` sign, no whitespace. Every
/// representable value has exactly one canonical form, which makes derived
/// string equality coincide with numeric equality.
///
/// ```
/// # use dynadoc::value::Number;
/// let n: Number = "-3.25".parse().unwrap();
/// assert_eq!(n.to_string(), "-3.25");
/// assert!("00".parse::<Number>().is_err());
/// assert!("1e5".parse::<Number>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Parse a canonical decimal string.
    ///
    /// Rejects anything that is not already in canonical form: leading
    /// zeros (`"00"`, `"042"`), trailing fractional zeros (`"1.50"`),
    /// exponents, explicit `+`, bare points (`".5"`, `"1."`), negative
    /// zero, and whitespace. Strictness here is what enforces the
    /// transparent-coercion rule for string-typed numeric input.
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        match split_canonical(input) {
            Some(_) => Ok(Number(input.to_string())),
            None => Err(ValueError::InvalidNumber {
                input: input.to_string(),
                reason: "not a canonical decimal string".to_string(),
            }),
        }
    }

    /// Build from a native integer. Integer display form is always canonical.
    pub fn from_i64(value: i64) -> Self {
        Number(value.to_string())
    }

    /// Build from a finite float via its shortest round-trip decimal form.
    ///
    /// Rust's float formatting emits the shortest string that re-parses to
    /// the same value, so the resulting `Number` re-reads as exactly the
    /// input float. Exponent forms produced for large or tiny magnitudes
    /// are expanded to plain decimals. Non-finite input is rejected.
    pub fn from_f64(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::InvalidNumber {
                input: value.to_string(),
                reason: "non-finite floats have no decimal form".to_string(),
            });
        }
        if value == 0.0 {
            // Also folds -0.0 into the single canonical zero.
            return Ok(Number("0".to_string()));
        }
        let repr = value.to_string();
        if split_canonical(&repr).is_some() {
            return Ok(Number(repr));
        }
        expand_exponent(&repr)
    }

    /// The canonical decimal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        !self.0.contains('.')
    }

    /// Narrow to `i64` when integral and in range.
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integral() {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// Nearest `f64`. Lossy for values beyond float precision; callers
    /// that need exactness keep the `Number` instead.
    pub fn to_f64(&self) -> f64 {
        // Canonical strings are always valid float syntax; out-of-range
        // magnitudes saturate to infinity per IEEE 754 parsing rules.
        self.0.parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Number {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::parse(s)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::from_i64(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::from_i64(value as i64)
    }
}

impl AsRef<str> for Number {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        // Canonical form is unique, so string equality already implies
        // numeric equality; this only has to order distinct values.
        let (a_neg, a_int, a_frac) = split_canonical(&self.0).unwrap_or((false, "0", ""));
        let (b_neg, b_int, b_frac) = split_canonical(&other.0).unwrap_or((false, "0", ""));
        match (a_neg, b_neg) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_magnitude(a_int, a_frac, b_int, b_frac),
            (true, true) => cmp_magnitude(a_int, a_frac, b_int, b_frac).reverse(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Split a canonical decimal string into (negative, integer digits,
/// fraction digits). Returns `None` when the input is not canonical.
fn split_canonical(s: &str) -> Option<(bool, &str, &str)> {
    let (neg, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    let (int_part, frac_part, has_point) = match rest.split_once('.') {
        Some((i, f)) => (i, f, true),
        None => (rest, "", false),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return None;
    }
    if has_point
        && (frac_part.is_empty()
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
            || frac_part.ends_with('0'))
    {
        return None;
    }
    // "-0" and "-0.0" style negative zeros are not canonical.
    if neg && int_part == "0" && frac_part.is_empty() {
        return None;
    }
    Some((neg, int_part, frac_part))
}

/// Compare two non-negative magnitudes given as integer/fraction digits.
fn cmp_magnitude(a_int: &str, a_frac: &str, b_int: &str, b_frac: &str) -> Ordering {
    a_int
        .len()
        .cmp(&b_int.len())
        .then_with(|| a_int.cmp(b_int))
        .then_with(|| cmp_fractions(a_frac, b_frac))
}

/// Compare fraction digit strings, right-padding the shorter with zeros.
fn cmp_fractions(a: &str, b: &str) -> Ordering {
    let mut a_digits = a.bytes();
    let mut b_digits = b.bytes();
    loop {
        match (a_digits.next(), b_digits.next()) {
            (None, None) => return Ordering::Equal,
            (da, db) => {
                let da = da.unwrap_or(b'0');
                let db = db.unwrap_or(b'0');
                if da != db {
                    return da.cmp(&db);
                }
            }
        }
    }
}

/// Expand a float's exponent form (`"1.2345e7"`, `"-5e-3"`) into a plain
/// canonical decimal string.
fn expand_exponent(repr: &str) -> Result<Number, ValueError> {
    let invalid = || ValueError::InvalidNumber {
        input: repr.to_string(),
        reason: "unrecognized float representation".to_string(),
    };
    let (mantissa, exponent) = repr.split_once(['e', 'E']).ok_or_else(invalid)?;
    let exponent: i64 = exponent.parse().map_err(|_| invalid())?;
    let (neg, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => (true, m),
        None => (false, mantissa),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty()
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let digits = format!("{int_part}{frac_part}");
    // Index of the decimal point within `digits` after applying the exponent.
    let point = int_part.len() as i64 + exponent;

    let (int_digits, frac_digits) = if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{zeros}{digits}"))
    } else if (point as usize) >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        (format!("{digits}{zeros}"), String::new())
    } else {
        let (i, f) = digits.split_at(point as usize);
        (i.to_string(), f.to_string())
    };

    Ok(make_canonical(neg, &int_digits, &frac_digits))
}

/// Assemble a canonical `Number` from raw digit strings, trimming redundant
/// zeros on both ends.
fn make_canonical(neg: bool, int_digits: &str, frac_digits: &str) -> Number {
    let int_trimmed = int_digits.trim_start_matches('0');
    let int_part = if int_trimmed.is_empty() { "0" } else { int_trimmed };
    let frac_part = frac_digits.trim_end_matches('0');

    if int_part == "0" && frac_part.is_empty() {
        return Number("0".to_string());
    }
    let sign = if neg { "-" } else { "" };
    if frac_part.is_empty() {
        Number(format!("{sign}{int_part}"))
    } else {
        Number(format!("{sign}{int_part}.{frac_part}"))
    }
}
