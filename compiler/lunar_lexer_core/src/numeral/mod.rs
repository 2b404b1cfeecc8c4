//! Numeral text to value conversion, and back.
//!
//! Integers are tried first: decimal integers that fit in an `i64` stay
//! integers, hexadecimal and octal integers wrap around. Anything else is
//! converted as a float. Every converter accepts leading and trailing
//! whitespace and an optional sign, and rejects any other trailing byte.
//!
//! Float conversion honors a configurable decimal point. Text with a `.`
//! that fails under another decimal point is retried with the `.`
//! replaced, so both spellings are accepted.

mod decimal;
mod format;
mod hex;

use std::fmt;

use memchr::{memchr, memchr2, memchr3};

use crate::chars::{hex_value, is_digit, is_hex_digit, is_octal_digit, is_space};

pub use format::{format_float, format_number};

/// Longest numeral retried under the alternate decimal point.
pub const MAX_NUMERAL_LEN: usize = 200;

/// A converted numeral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_number(*self))
    }
}

/// Skip leading whitespace and an optional sign.
///
/// Returns whether the sign was `-` and the offset of the first byte
/// after it.
fn skip_space_and_sign(s: &[u8]) -> (bool, usize) {
    let mut i = s.iter().take_while(|&&b| is_space(b)).count();
    let neg = match s.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    (neg, i)
}

/// Whether `s[from..]` is all whitespace.
fn only_space_after(s: &[u8], from: usize) -> bool {
    s[from..].iter().all(|&b| is_space(b))
}

/// Convert integer text.
///
/// Decimal text whose magnitude does not fit in an `i64` is rejected so the
/// caller can fall back to a float. `0x` and `0o` text wraps modulo 2^64.
pub fn str_to_int(s: &[u8]) -> Option<i64> {
    const MAX_BY_10: u64 = i64::MAX.unsigned_abs() / 10;
    const MAX_LAST_DIGIT: u64 = i64::MAX.unsigned_abs() % 10;

    let (neg, mut i) = skip_space_and_sign(s);
    let mut a: u64 = 0;
    let mut empty = true;
    let radix_prefix = match s.get(i..i + 2) {
        Some([b'0', p]) => Some(p.to_ascii_lowercase()),
        _ => None,
    };
    match radix_prefix {
        Some(b'x') => {
            i += 2;
            while let Some(&b) = s.get(i).filter(|&&b| is_hex_digit(b)) {
                a = a.wrapping_mul(16).wrapping_add(u64::from(hex_value(b)));
                empty = false;
                i += 1;
            }
        }
        Some(b'o') => {
            i += 2;
            while let Some(&b) = s.get(i).filter(|&&b| is_octal_digit(b)) {
                a = a.wrapping_mul(8).wrapping_add(u64::from(b - b'0'));
                empty = false;
                i += 1;
            }
        }
        _ => {
            while let Some(&b) = s.get(i).filter(|&&b| is_digit(b)) {
                let d = u64::from(b - b'0');
                if a >= MAX_BY_10 && (a > MAX_BY_10 || d > MAX_LAST_DIGIT + u64::from(neg)) {
                    return None;
                }
                a = a * 10 + d;
                empty = false;
                i += 1;
            }
        }
    }
    if empty || !only_space_after(s, i) {
        return None;
    }
    let a = if neg { a.wrapping_neg() } else { a };
    #[expect(
        clippy::cast_possible_wrap,
        reason = "two's complement wraparound is the intended result"
    )]
    let value = a as i64;
    Some(value)
}

/// Convert float text under the given decimal point.
///
/// Rejects `inf` and `nan` spellings. Hexadecimal floats (`0x1.8p3`) are
/// recognized when the first of `.xXnN` in the text is an `x`.
pub fn str_to_float(s: &[u8], decimal_point: u8) -> Option<f64> {
    let special = earliest_of(memchr3(b'.', b'x', b'X', s), memchr2(b'n', b'N', s));
    let mode = special.map(|i| s[i].to_ascii_lowercase());
    if mode == Some(b'n') {
        return None;
    }
    let hex = mode == Some(b'x');
    if let Some(v) = convert_float(s, hex, decimal_point) {
        return Some(v);
    }
    let dot = memchr(b'.', s)?;
    if s.len() > MAX_NUMERAL_LEN {
        return None;
    }
    let mut local = s.to_vec();
    local[dot] = decimal_point;
    convert_float(&local, hex, decimal_point)
}

/// Convert numeral text: integer if possible, float otherwise.
pub fn str_to_number(s: &[u8], decimal_point: u8) -> Option<Number> {
    str_to_int(s)
        .map(Number::Int)
        .or_else(|| str_to_float(s, decimal_point).map(Number::Float))
}

fn convert_float(s: &[u8], hex: bool, decimal_point: u8) -> Option<f64> {
    let (value, end) = if hex {
        hex::parse_prefix(s, decimal_point)?
    } else {
        decimal::parse_prefix(s, decimal_point)?
    };
    only_space_after(s, end).then_some(value)
}

/// Returns the earliest of two optional positions.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}
