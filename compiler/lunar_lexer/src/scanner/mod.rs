//! The token scanner.
//!
//! [`Scanner`] pulls one byte at a time from a [`ByteSource`] and produces
//! one [`Token`] per call to [`Scanner::next_token`]. Multi-byte literals
//! are staged in a [`ScratchBuffer`] and finished by the submodules:
//!
//! - `numeral`: integer and float literals
//! - `long_bracket`: `[==[ ... ]==]` strings and long comments
//! - `short_string`: quoted strings and their escape sequences
//!
//! Every scanning step returns `Result` and stops at the first error.

mod long_bracket;
mod numeral;
mod short_string;

use lunar_diagnostic::{chunk_id, format_message, FmtArg, MIN_SOURCE_ID_LEN};
use lunar_ir::{Name, Reserved, StringInterner, Token, TokenKind, TokenTag, ENV_NAME};
use lunar_lexer_core::chars::{is_alnum, is_alpha, is_digit, is_newline, is_print};
use lunar_lexer_core::{BufferError, ByteSource, ScratchBuffer, MIN_BUFFER_SIZE};
use tracing::{debug, trace};

use crate::{LexError, LexErrorKind, LexerConfig};

type Result<T> = std::result::Result<T, LexError>;

/// A chunk may not reach this many lines.
const MAX_LINES: u32 = i32::MAX.unsigned_abs();

/// Scanner state for one chunk.
///
/// The scanner owns its byte source and borrows the interner that
/// deduplicates names and string literals. It holds at most one token of
/// lookahead.
pub struct Scanner<'i, S: ByteSource> {
    interner: &'i StringInterner,
    source: S,
    /// Current byte; `None` once the source is exhausted.
    current: Option<u8>,
    line: u32,
    /// Line of the last token handed out by `next_token`.
    last_line: u32,
    buffer: ScratchBuffer,
    token: Token,
    lookahead: Option<Token>,
    source_name: Vec<u8>,
    /// Abbreviated `source_name`, as printed in messages.
    source_id: Vec<u8>,
    env_name: Name,
    break_name: Name,
    config: LexerConfig,
}

impl<'i, S: ByteSource> Scanner<'i, S> {
    /// Start scanning `source`, reading its first byte.
    ///
    /// `source_name` follows the usual chunk naming: `=name` is shown as is,
    /// `@path` is a file, anything else is the chunk text itself.
    pub fn new(
        interner: &'i StringInterner,
        mut source: S,
        source_name: &[u8],
        config: LexerConfig,
    ) -> Self {
        let current = source.next_byte();
        let mut buffer = ScratchBuffer::new(config.max_token_len);
        if let Err(err) = buffer.resize(MIN_BUFFER_SIZE.min(buffer.limit())) {
            debug!(%err, "could not presize scratch buffer");
        }
        let scanner = Scanner {
            interner,
            source,
            current,
            line: 1,
            last_line: 1,
            buffer,
            token: Token::new(TokenKind::EOS, 1),
            lookahead: None,
            source_name: source_name.to_vec(),
            source_id: chunk_id(source_name, config.source_id_len.max(MIN_SOURCE_ID_LEN)),
            env_name: interner.intern(ENV_NAME),
            break_name: interner.intern(Reserved::Break.spelling()),
            config,
        };
        debug!(
            source = %String::from_utf8_lossy(&scanner.source_id),
            global_is_reserved = config.global_is_reserved,
            "scanner created"
        );
        scanner
    }

    /// Advance to the next token and return it.
    ///
    /// At the end of the input this keeps returning `<eof>`.
    pub fn next_token(&mut self) -> Result<Token> {
        self.last_line = self.line;
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        self.token = token;
        Ok(token)
    }

    /// Peek at the token after the current one.
    ///
    /// The peeked token is scanned once and handed out by the following
    /// `next_token`.
    pub fn lookahead(&mut self) -> Result<TokenTag> {
        if let Some(token) = self.lookahead {
            return Ok(token.tag());
        }
        let token = self.scan()?;
        self.lookahead = Some(token);
        Ok(token.tag())
    }

    /// The token most recently returned by `next_token`.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Line the scanner is currently on.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn last_line(&self) -> u32 {
        self.last_line
    }

    pub fn source_name(&self) -> &[u8] {
        &self.source_name
    }

    /// The pre-interned `_ENV` name.
    pub fn env_name(&self) -> Name {
        self.env_name
    }

    /// The pre-interned `break` name.
    pub fn break_name(&self) -> Name {
        self.break_name
    }

    pub fn interner(&self) -> &'i StringInterner {
        self.interner
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Build a syntax error located at the current token.
    #[cold]
    pub fn syntax_error(&mut self, msg: &str) -> LexError {
        let tag = self.token.tag();
        let near = (tag.raw() != 0).then_some(tag);
        self.lex_error(LexErrorKind::Syntax, msg, near)
    }

    fn scan(&mut self) -> Result<Token> {
        self.buffer.reset();
        let kind = self.dispatch()?;
        let token = Token::new(kind, self.line);
        trace!(?token, "token");
        Ok(token)
    }

    fn dispatch(&mut self) -> Result<TokenKind> {
        loop {
            let Some(c) = self.current else {
                return self.end_of_stream();
            };
            match c {
                b'\n' | b'\r' => self.inc_line_number()?,
                b' ' | b'\x0c' | b'\t' | b'\x0b' => self.advance(),
                b'-' => {
                    self.advance();
                    if self.current != Some(b'-') {
                        return Ok(TokenKind::Char(b'-'));
                    }
                    self.advance();
                    self.skip_comment()?;
                }
                b'[' => {
                    let sep = self.skip_separator()?;
                    if sep >= 2 {
                        let name = self.read_long_string(sep)?;
                        return Ok(TokenKind::String(name));
                    } else if sep == 0 {
                        return Err(self.lex_error(
                            LexErrorKind::Syntax,
                            "invalid long string delimiter",
                            Some(TokenTag::from_reserved(Reserved::String)),
                        ));
                    }
                    return Ok(TokenKind::Char(b'['));
                }
                b'=' => return Ok(self.operator(c, &[(b'=', Reserved::Eq)])),
                b'<' => {
                    return Ok(self.operator(c, &[(b'=', Reserved::Le), (b'<', Reserved::Shl)]));
                }
                b'>' => {
                    return Ok(self.operator(c, &[(b'=', Reserved::Ge), (b'>', Reserved::Shr)]));
                }
                b'/' => return Ok(self.operator(c, &[(b'/', Reserved::IDiv)])),
                b'~' | b'!' => return Ok(self.operator(c, &[(b'=', Reserved::Ne)])),
                b':' => return Ok(self.operator(c, &[(b':', Reserved::DbColon)])),
                b'"' | b'\'' => return self.read_string(c),
                b'.' => {
                    self.save_and_advance()?;
                    if self.check_next1(b'.') {
                        if self.check_next1(b'.') {
                            return Ok(TokenKind::Reserved(Reserved::Dots));
                        }
                        return Ok(TokenKind::Reserved(Reserved::Concat));
                    }
                    if !self.current.is_some_and(is_digit) {
                        return Ok(TokenKind::Char(b'.'));
                    }
                    return self.read_numeral();
                }
                b'0'..=b'9' => return self.read_numeral(),
                _ if is_alpha(c) => return self.read_name(),
                _ => {
                    self.advance();
                    return Ok(TokenKind::Char(c));
                }
            }
        }
    }

    /// Consume `first` and, if the next byte matches one of `pairs`, that
    /// byte too.
    fn operator(&mut self, first: u8, pairs: &[(u8, Reserved)]) -> TokenKind {
        self.advance();
        for &(second, reserved) in pairs {
            if self.check_next1(second) {
                return TokenKind::Reserved(reserved);
            }
        }
        TokenKind::Char(first)
    }

    fn read_name(&mut self) -> Result<TokenKind> {
        loop {
            self.save_and_advance()?;
            if !self.current.is_some_and(is_alnum) {
                break;
            }
        }
        let name = self.intern_buffer(0, 0)?;
        Ok(match self.interner.reserved(name) {
            Some(Reserved::Global) if !self.config.global_is_reserved => TokenKind::Name(name),
            Some(word) => TokenKind::Reserved(word),
            None => TokenKind::Name(name),
        })
    }

    /// Skip the rest of a comment after its `--`.
    fn skip_comment(&mut self) -> Result<()> {
        if self.current == Some(b'[') {
            let sep = self.skip_separator()?;
            self.buffer.reset();
            if sep >= 2 {
                self.skip_long_comment(sep)?;
                self.buffer.reset();
                return Ok(());
            }
        }
        while self.current.is_some_and(|c| !is_newline(c)) {
            self.advance();
        }
        Ok(())
    }

    fn end_of_stream(&mut self) -> Result<TokenKind> {
        if let Some(err) = self.source.take_error() {
            let error = LexError::io(&err, self.source_id_text(), self.line);
            debug!(%error, "read failed");
            return Err(error);
        }
        Ok(TokenKind::EOS)
    }

    // === Byte-level helpers ===

    #[inline]
    fn advance(&mut self) {
        self.current = self.source.next_byte();
    }

    #[inline]
    fn save(&mut self, byte: u8) -> Result<()> {
        self.buffer.save(byte).map_err(|err| self.buffer_error(err))
    }

    /// Save the current byte (if any) and move past it.
    #[inline]
    fn save_and_advance(&mut self) -> Result<()> {
        if let Some(c) = self.current {
            self.save(c)?;
        }
        self.advance();
        Ok(())
    }

    /// Skip the current byte if it is `expected`. Nothing is saved.
    #[inline]
    fn check_next1(&mut self, expected: u8) -> bool {
        if self.current == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Save and skip the current byte if it is one of `set`.
    fn check_next_in(&mut self, set: &[u8]) -> Result<bool> {
        match self.current {
            Some(c) if set.contains(&c) => {
                self.save_and_advance()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Skip one line break. `\n\r` and `\r\n` count as a single break.
    fn inc_line_number(&mut self) -> Result<()> {
        let old = self.current;
        debug_assert!(old.is_some_and(is_newline));
        self.advance();
        if self.current.is_some_and(is_newline) && self.current != old {
            self.advance();
        }
        self.line += 1;
        if self.line >= MAX_LINES {
            return Err(self.lex_error(LexErrorKind::Syntax, "chunk has too many lines", None));
        }
        Ok(())
    }

    /// Intern the buffer with `front` and `back` bytes trimmed off.
    fn intern_buffer(&self, front: usize, back: usize) -> Result<Name> {
        let bytes = self.buffer.as_bytes();
        let end = bytes.len().saturating_sub(back).max(front);
        self.interner.try_intern(&bytes[front..end]).map_err(|err| {
            debug!(%err, "interning failed");
            LexError::out_of_memory(self.source_id_text(), self.line)
        })
    }

    // === Errors ===

    fn source_id_text(&self) -> String {
        String::from_utf8_lossy(&self.source_id).into_owned()
    }

    #[cold]
    fn buffer_error(&mut self, err: BufferError) -> LexError {
        match err {
            BufferError::TooLong => self.lex_error(LexErrorKind::Syntax, &err.to_string(), None),
            BufferError::OutOfMemory => {
                debug!("scratch buffer allocation failed");
                LexError::out_of_memory(self.source_id_text(), self.line)
            }
        }
    }

    /// Error located at the current line.
    #[cold]
    fn lex_error(&mut self, kind: LexErrorKind, msg: &str, near: Option<TokenTag>) -> LexError {
        self.lex_error_at(kind, msg, near, self.line)
    }

    /// Error whose construct started on `line`. The message itself names the
    /// current line.
    ///
    /// A pending read failure replaces the error: the input was cut short,
    /// so whatever the scanner saw last is not the real problem.
    #[cold]
    fn lex_error_at(
        &mut self,
        kind: LexErrorKind,
        msg: &str,
        near: Option<TokenTag>,
        line: u32,
    ) -> LexError {
        if let Some(err) = self.source.take_error() {
            let error = LexError::io(&err, self.source_id_text(), self.line);
            debug!(%error, "read failed");
            return error;
        }
        let current_line = FmtArg::Int(i32::try_from(self.line).unwrap_or(i32::MAX));
        let formatted = match near {
            Some(tag) => {
                let near_text = self.near_text(tag);
                format_message(
                    "%s:%d: %s near %s",
                    &[
                        FmtArg::Str(&self.source_id),
                        current_line,
                        msg.into(),
                        FmtArg::Str(&near_text),
                    ],
                )
            }
            None => format_message(
                "%s:%d: %s",
                &[FmtArg::Str(&self.source_id), current_line, msg.into()],
            ),
        };
        let error = match formatted {
            Ok(message) => {
                LexError::new(kind, message.to_string(), self.source_id_text(), line)
            }
            Err(_) => LexError::out_of_memory(self.source_id_text(), line),
        };
        debug!(%error, ?kind, line, "lexical error");
        error
    }

    /// How the offending token is shown after `near`.
    fn near_text(&self, tag: TokenTag) -> Vec<u8> {
        match tag.as_reserved() {
            Some(Reserved::Name | Reserved::String | Reserved::Flt | Reserved::Int) => {
                let text = self.buffer.as_bytes();
                let mut quoted = Vec::with_capacity(text.len() + 2);
                quoted.push(b'\'');
                quoted.extend_from_slice(text);
                quoted.push(b'\'');
                quoted
            }
            _ => token_to_str(tag).into_bytes(),
        }
    }
}

impl<S: ByteSource> std::fmt::Debug for Scanner<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("source_id", &String::from_utf8_lossy(&self.source_id))
            .field("line", &self.line)
            .field("current", &self.current)
            .field("token", &self.token)
            .field("lookahead", &self.lookahead)
            .finish_non_exhaustive()
    }
}

/// Display form of a token tag, as used in messages.
///
/// Printable single bytes are quoted (`'+'`), other bytes show their code
/// (`'<\10>'`), keywords and operators are quoted (`'while'`, `'..'`), and
/// the end-of-stream and literal classes are bare (`<eof>`, `<name>`).
pub fn token_to_str(tag: TokenTag) -> String {
    match tag.as_reserved() {
        Some(reserved) if reserved < Reserved::Eos => format!("'{}'", reserved.spelling()),
        Some(reserved) => reserved.spelling().to_owned(),
        None => {
            let byte = tag.as_char().unwrap_or_default();
            if is_print(byte) {
                format!("'{}'", char::from(byte))
            } else {
                format!("'<\\{byte}>'")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests use unwrap for brevity")]
mod tests;
