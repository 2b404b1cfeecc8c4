//! Numeral literals.

use lunar_ir::{Reserved, TokenKind, TokenTag};
use lunar_lexer_core::chars::{is_alpha, is_hex_digit};
use lunar_lexer_core::{str_to_number, ByteSource, Number};

use super::{Result, Scanner};
use crate::LexErrorKind;

impl<S: ByteSource> Scanner<'_, S> {
    /// Read a numeral starting at the current byte.
    ///
    /// The text is gathered loosely (hex digits, dots, exponent marks with an
    /// optional sign) and then converted in one go, so anything odd shows up
    /// as a malformed number rather than a split token. A sign is only taken
    /// right after an exponent mark: `3-4` stays three tokens.
    pub(super) fn read_numeral(&mut self) -> Result<TokenKind> {
        let first = self.current;
        let mut exponent: &[u8] = b"Ee";
        self.save_and_advance()?;
        if first == Some(b'0') {
            if self.check_next_in(b"xX")? {
                exponent = b"Pp";
            } else if self.check_next_in(b"oO")? {
                exponent = b"";
            }
        }
        loop {
            if self.check_next_in(exponent)? {
                self.check_next_in(b"-+")?;
            } else if self.current.is_some_and(|c| is_hex_digit(c) || c == b'.') {
                self.save_and_advance()?;
            } else {
                break;
            }
        }
        // A letter glued to the numeral makes the whole thing malformed.
        if self.current.is_some_and(is_alpha) {
            self.save_and_advance()?;
        }
        match str_to_number(self.buffer.as_bytes(), self.config.decimal_point) {
            Some(Number::Int(value)) => Ok(TokenKind::Int(value)),
            Some(Number::Float(value)) => Ok(TokenKind::float(value)),
            None => Err(self.lex_error(
                LexErrorKind::MalformedNumber,
                "malformed number",
                Some(TokenTag::from_reserved(Reserved::Flt)),
            )),
        }
    }
}
