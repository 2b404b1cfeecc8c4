//! Quoted strings and escape sequences.
//!
//! While an escape is being read, its text stays in the buffer so that an
//! error can quote it. Once the escape is resolved that text is dropped and
//! the decoded bytes take its place.

use lunar_ir::{Reserved, TokenKind, TokenTag};
use lunar_lexer_core::chars::{hex_value, is_digit, is_hex_digit, is_octal_digit, is_space};
use lunar_lexer_core::{utf8_escape, ByteSource, MAX_UTF8_ESCAPE};

use super::{Result, Scanner};
use crate::{EscapeProblem, LexError, LexErrorKind};

/// What to do once an escape has been resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscapeAction {
    /// Skip the current byte, then replace the escape text with the byte.
    ReadSave(u8),
    /// Replace the escape text with the byte.
    OnlySave(u8),
    /// The escape already produced its output.
    NoSave,
}

impl<S: ByteSource> Scanner<'_, S> {
    /// Read a string delimited by `delim`, starting at the opening quote.
    pub(super) fn read_string(&mut self, delim: u8) -> Result<TokenKind> {
        let start_line = self.line;
        // The quote stays in the buffer for error messages.
        self.save_and_advance()?;
        while self.current != Some(delim) {
            match self.current {
                None => {
                    return Err(self.unfinished_string(TokenTag::EOS, start_line));
                }
                Some(b'\n' | b'\r') => {
                    let tag = TokenTag::from_reserved(Reserved::String);
                    return Err(self.unfinished_string(tag, start_line));
                }
                Some(b'\\') => {
                    self.save_and_advance()?;
                    let action = self.resolve_escape()?;
                    self.commit_escape(action)?;
                }
                Some(_) => self.save_and_advance()?,
            }
        }
        self.save_and_advance()?;
        let name = self.intern_buffer(1, 1)?;
        Ok(TokenKind::String(name))
    }

    #[cold]
    fn unfinished_string(&mut self, near: TokenTag, start_line: u32) -> LexError {
        self.lex_error_at(LexErrorKind::UnfinishedString, "unfinished string", Some(near), start_line)
    }

    /// Decode the escape whose `\` was just saved.
    fn resolve_escape(&mut self) -> Result<EscapeAction> {
        let Some(c) = self.current else {
            // The string loop reports the missing quote.
            return Ok(EscapeAction::NoSave);
        };
        let action = match c {
            b'a' => EscapeAction::ReadSave(0x07),
            b'b' => EscapeAction::ReadSave(0x08),
            b'f' => EscapeAction::ReadSave(0x0c),
            b'n' => EscapeAction::ReadSave(b'\n'),
            b'r' => EscapeAction::ReadSave(b'\r'),
            b't' => EscapeAction::ReadSave(b'\t'),
            b'v' => EscapeAction::ReadSave(0x0b),
            b'x' => EscapeAction::ReadSave(self.read_hex_escape()?),
            b'o' => EscapeAction::ReadSave(self.read_octal_escape()?),
            b'u' => {
                self.read_utf8_escape()?;
                EscapeAction::NoSave
            }
            b'\n' | b'\r' => {
                self.inc_line_number()?;
                EscapeAction::OnlySave(b'\n')
            }
            b'\\' | b'"' | b'\'' => EscapeAction::ReadSave(c),
            b'z' => {
                self.buffer.remove(1);
                self.advance();
                while let Some(c) = self.current.filter(|&c| is_space(c)) {
                    if c == b'\n' || c == b'\r' {
                        self.inc_line_number()?;
                    } else {
                        self.advance();
                    }
                }
                EscapeAction::NoSave
            }
            _ if is_digit(c) => EscapeAction::OnlySave(self.read_decimal_escape()?),
            _ => return Err(self.escape_error(EscapeProblem::InvalidSequence)),
        };
        Ok(action)
    }

    fn commit_escape(&mut self, action: EscapeAction) -> Result<()> {
        let byte = match action {
            EscapeAction::ReadSave(byte) => {
                self.advance();
                byte
            }
            EscapeAction::OnlySave(byte) => byte,
            EscapeAction::NoSave => return Ok(()),
        };
        // Drop the `\`.
        self.buffer.remove(1);
        self.save(byte)
    }

    /// Report a bad escape, quoting the offending byte as well.
    #[cold]
    fn escape_error(&mut self, problem: EscapeProblem) -> LexError {
        if let Err(err) = self.save_and_advance() {
            return err;
        }
        self.lex_error(
            LexErrorKind::InvalidEscape(problem),
            problem.message(),
            Some(TokenTag::from_reserved(Reserved::String)),
        )
    }

    /// Save the current byte, then require a digit accepted by `is_valid`
    /// and return its value. The digit itself is left current.
    fn escape_digit(
        &mut self,
        is_valid: fn(u8) -> bool,
        problem: EscapeProblem,
    ) -> Result<u8> {
        self.save_and_advance()?;
        match self.current.filter(|&c| is_valid(c)) {
            Some(c) => Ok(hex_value(c)),
            None => Err(self.escape_error(problem)),
        }
    }

    /// `\xHH`: exactly two hex digits.
    fn read_hex_escape(&mut self) -> Result<u8> {
        let high = self.escape_digit(is_hex_digit, EscapeProblem::HexDigitExpected)?;
        let low = self.escape_digit(is_hex_digit, EscapeProblem::HexDigitExpected)?;
        self.buffer.remove(2);
        Ok((high << 4) + low)
    }

    /// `\oOO`: exactly two octal digits.
    fn read_octal_escape(&mut self) -> Result<u8> {
        let high = self.escape_digit(is_octal_digit, EscapeProblem::OctalDigitExpected)?;
        let low = self.escape_digit(is_octal_digit, EscapeProblem::OctalDigitExpected)?;
        self.buffer.remove(2);
        Ok((high << 3) + low)
    }

    /// `\u{XXX}`: write the extended UTF-8 encoding of the code point.
    fn read_utf8_escape(&mut self) -> Result<()> {
        // `\u{X` is in the buffer by the time the loop starts.
        let mut saved = 4;
        self.save_and_advance()?;
        if self.current != Some(b'{') {
            return Err(self.escape_error(EscapeProblem::MissingOpenBrace));
        }
        let mut value = u32::from(self.escape_digit(is_hex_digit, EscapeProblem::HexDigitExpected)?);
        loop {
            self.save_and_advance()?;
            let Some(c) = self.current.filter(|&c| is_hex_digit(c)) else {
                break;
            };
            saved += 1;
            if value > MAX_UTF8_ESCAPE >> 4 {
                return Err(self.escape_error(EscapeProblem::Utf8ValueTooLarge));
            }
            value = (value << 4) + u32::from(hex_value(c));
        }
        if self.current != Some(b'}') {
            return Err(self.escape_error(EscapeProblem::MissingCloseBrace));
        }
        self.advance();
        self.buffer.remove(saved);
        self.buffer
            .extend(utf8_escape(value).as_bytes())
            .map_err(|err| self.buffer_error(err))
    }

    /// `\ddd`: up to three decimal digits, at most 255.
    fn read_decimal_escape(&mut self) -> Result<u8> {
        let mut value: u32 = 0;
        let mut digits = 0;
        while digits < 3 {
            let Some(c) = self.current.filter(|&c| is_digit(c)) else {
                break;
            };
            value = value * 10 + u32::from(c - b'0');
            self.save_and_advance()?;
            digits += 1;
        }
        let Ok(byte) = u8::try_from(value) else {
            return Err(self.escape_error(EscapeProblem::DecimalTooLarge));
        };
        self.buffer.remove(digits);
        Ok(byte)
    }
}
