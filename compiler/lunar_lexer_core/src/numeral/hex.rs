//! Hexadecimal float text (`0x1.8p3`).

use super::skip_space_and_sign;
use crate::chars::{hex_value, is_digit, is_hex_digit};

/// Digits beyond this many only move the exponent.
const MAX_SIG_DIGITS: usize = 30;

/// Parse the longest hexadecimal float at the start of `s`.
///
/// Leading zeros are not significant. Each digit after the point lowers the
/// binary exponent by four. The `p` exponent is decimal and counts powers
/// of two. Returns the value and the offset just past the numeral.
pub(super) fn parse_prefix(s: &[u8], decimal_point: u8) -> Option<(f64, usize)> {
    let (neg, mut i) = skip_space_and_sign(s);
    if !matches!(s.get(i..i + 2), Some([b'0', b'x' | b'X'])) {
        return None;
    }
    i += 2;

    let mut r = 0.0_f64;
    let mut sig_digits = 0_usize;
    let mut nosig_digits = 0_usize;
    // Exponent correction, in hex digits until scaled below.
    let mut e = 0_i32;
    let mut has_dot = false;
    while let Some(&b) = s.get(i) {
        if b == decimal_point {
            if has_dot {
                break;
            }
            has_dot = true;
        } else if is_hex_digit(b) {
            if sig_digits == 0 && b == b'0' {
                nosig_digits += 1;
            } else {
                sig_digits += 1;
                if sig_digits <= MAX_SIG_DIGITS {
                    r = r * 16.0 + f64::from(hex_value(b));
                } else {
                    e = e.saturating_add(1);
                }
            }
            if has_dot {
                e = e.saturating_sub(1);
            }
        } else {
            break;
        }
        i += 1;
    }
    if sig_digits + nosig_digits == 0 {
        return None;
    }
    e = e.saturating_mul(4);

    if matches!(s.get(i), Some(b'p' | b'P')) {
        let mut j = i + 1;
        let exp_neg = match s.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        if !s.get(j).is_some_and(|&b| is_digit(b)) {
            return None;
        }
        let mut exp: i32 = 0;
        while let Some(&b) = s.get(j).filter(|&&b| is_digit(b)) {
            exp = exp.saturating_mul(10).saturating_add(i32::from(b - b'0'));
            j += 1;
        }
        e = e.saturating_add(if exp_neg { -exp } else { exp });
        i = j;
    }

    if neg {
        r = -r;
    }
    Some((ldexp(r, e), i))
}

/// `x * 2^n` without intermediate overflow or double rounding.
pub(super) fn ldexp(x: f64, mut n: i32) -> f64 {
    let two_1023 = f64::from_bits(0x7fe0_0000_0000_0000);
    // 2^-1022 * 2^53
    let two_m969 = f64::from_bits(0x0360_0000_0000_0000);

    let mut y = x;
    if n > 1023 {
        y *= two_1023;
        n -= 1023;
        if n > 1023 {
            y *= two_1023;
            n = (n - 1023).min(1023);
        }
    } else if n < -1022 {
        y *= two_m969;
        n += 1022 - 53;
        if n < -1022 {
            y *= two_m969;
            n = (n + 1022 - 53).max(-1022);
        }
    }
    let biased = u64::from((0x3ff + n).unsigned_abs());
    y * f64::from_bits(biased << 52)
}
