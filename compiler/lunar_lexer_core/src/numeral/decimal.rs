//! Decimal float text.

use super::skip_space_and_sign;
use crate::chars::is_digit;

fn digit_run(s: &[u8], from: usize) -> usize {
    s.get(from..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| is_digit(b)).count())
}

fn push_ascii(text: &mut String, bytes: &[u8]) {
    text.extend(bytes.iter().map(|&b| char::from(b)));
}

/// Parse the longest decimal float at the start of `s`.
///
/// Accepts `[sign] digits [point digits] [e [sign] digits]` with at least
/// one mantissa digit. An exponent marker without digits is not consumed.
/// Returns the value and the offset just past the numeral.
pub(super) fn parse_prefix(s: &[u8], decimal_point: u8) -> Option<(f64, usize)> {
    let (neg, mut i) = skip_space_and_sign(s);
    let mut text = String::with_capacity(s.len() + 2);
    if neg {
        text.push('-');
    }

    let int_digits = digit_run(s, i);
    if int_digits == 0 {
        text.push('0');
    }
    push_ascii(&mut text, &s[i..i + int_digits]);
    i += int_digits;

    let mut frac_digits = 0;
    if s.get(i) == Some(&decimal_point) {
        frac_digits = digit_run(s, i + 1);
        if int_digits + frac_digits > 0 {
            text.push('.');
            push_ascii(&mut text, &s[i + 1..i + 1 + frac_digits]);
            if frac_digits == 0 {
                text.push('0');
            }
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(s.get(i), Some(b'e' | b'E')) {
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
        let exp_digits = digit_run(s, j);
        if exp_digits > 0 {
            text.push('e');
            if exp_neg {
                text.push('-');
            }
            push_ascii(&mut text, &s[j..j + exp_digits]);
            i = j + exp_digits;
        }
    }

    let value = text.parse::<f64>().ok()?;
    Some((value, i))
}
