//! Number to text, in the form the scanner reads back.

use super::Number;

/// Significant digits tried first.
const SHORT_PRECISION: usize = 14;
/// Significant digits that always read back exactly.
const FULL_PRECISION: usize = 17;

/// Format a number so that scanning the result yields the same value.
///
/// Integers print in decimal. Floats print with 14 significant digits, or
/// 17 when 14 do not read back to the same value, and get a `.0` suffix
/// when the digits alone would scan as an integer.
pub fn format_number(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::Float(f) => format_float(f),
    }
}

/// The float half of [`format_number`].
pub fn format_float(v: f64) -> String {
    let mut s = format_general(v, SHORT_PRECISION);
    if s.parse::<f64>().map(f64::to_bits) != Ok(v.to_bits()) {
        s = format_general(v, FULL_PRECISION);
    }
    if s.bytes().all(|b| b == b'-' || b.is_ascii_digit()) {
        s.push_str(".0");
    }
    s
}

/// C's `%.<precision>g`.
///
/// Uses exponent notation when the decimal exponent is below -4 or at
/// least `precision`, fixed notation otherwise. Trailing zeros of the
/// fraction are dropped in both.
fn format_general(v: f64, precision: usize) -> String {
    if v.is_nan() {
        return if v.is_sign_negative() { "-nan" } else { "nan" }.to_owned();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf" } else { "inf" }.to_owned();
    }

    let p = precision.max(1);
    let sci = format!("{:.*e}", p - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(x) = exp.parse::<i32>() else {
        return sci;
    };
    let p_i32 = i32::try_from(p).unwrap_or(i32::MAX);

    if x < -4 || x >= p_i32 {
        let sign = if x < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", strip_fraction_zeros(mantissa), x.unsigned_abs())
    } else {
        let decimals = usize::try_from(p_i32 - 1 - x).unwrap_or(0);
        strip_fraction_zeros(&format!("{v:.decimals$}")).to_owned()
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
