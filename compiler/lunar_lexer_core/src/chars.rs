//! Byte classes used by the scanner.
//!
//! Classification is by ASCII only. Bytes above `0x7F` belong to no class,
//! so they never start or continue a name.

/// Letter or underscore: may start a name.
#[inline]
pub const fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Letter, digit or underscore: may continue a name.
#[inline]
pub const fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[inline]
pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub const fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

/// Space, `\t`, `\n`, `\v`, `\f` or `\r`.
#[inline]
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t'..=b'\r')
}

/// Printable ASCII, space included.
#[inline]
pub const fn is_print(b: u8) -> bool {
    matches!(b, b' '..=b'~')
}

/// `\n` or `\r`.
#[inline]
pub const fn is_newline(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Value of a hex digit. Non-digits map to garbage; check first.
#[inline]
pub const fn hex_value(b: u8) -> u8 {
    if b.is_ascii_digit() {
        b - b'0'
    } else {
        (b | 0x20).wrapping_sub(b'a').wrapping_add(10)
    }
}
