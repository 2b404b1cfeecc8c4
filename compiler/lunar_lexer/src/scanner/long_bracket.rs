//! Long brackets: `[[ ... ]]`, `[==[ ... ]==]` and the comments built on them.

use lunar_diagnostic::{format_message, FmtArg};
use lunar_ir::{Name, TokenTag};
use lunar_lexer_core::chars::is_newline;
use lunar_lexer_core::ByteSource;
use tracing::trace;

use super::{Result, Scanner};
use crate::{LexError, LexErrorKind};

/// What a long bracket encloses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LongLiteral {
    String,
    /// Content is skipped, only line breaks are tracked.
    Comment,
}

impl LongLiteral {
    fn describe(self) -> &'static str {
        match self {
            LongLiteral::String => "string",
            LongLiteral::Comment => "comment",
        }
    }

    fn unfinished(self, start_line: u32) -> LexErrorKind {
        match self {
            LongLiteral::String => LexErrorKind::UnfinishedLongString { start_line },
            LongLiteral::Comment => LexErrorKind::UnfinishedLongComment { start_line },
        }
    }
}

impl<S: ByteSource> Scanner<'_, S> {
    /// Read a `[=*[` or `]=*]` run, stopping on its last bracket.
    ///
    /// Returns the number of `=` plus 2 for a well-formed run, 1 for a lone
    /// bracket, and 0 for `=`s not followed by a second bracket.
    pub(super) fn skip_separator(&mut self) -> Result<usize> {
        let bracket = self.current;
        debug_assert!(matches!(bracket, Some(b'[' | b']')));
        self.save_and_advance()?;
        let mut count = 0;
        while self.current == Some(b'=') {
            self.save_and_advance()?;
            count += 1;
        }
        Ok(if self.current == bracket {
            count + 2
        } else if count == 0 {
            1
        } else {
            0
        })
    }

    /// Read a long string whose opener `skip_separator` measured as `sep`.
    pub(super) fn read_long_string(&mut self, sep: usize) -> Result<Name> {
        self.read_long_bracket(sep, LongLiteral::String)?;
        self.intern_buffer(sep, sep)
    }

    /// Skip a long comment whose opener measured `sep`.
    pub(super) fn skip_long_comment(&mut self, sep: usize) -> Result<()> {
        self.read_long_bracket(sep, LongLiteral::Comment)
    }

    /// Consume everything up to the closer of level `sep`.
    ///
    /// On return the buffer holds the whole literal including both
    /// delimiters, with every line break stored as a single `\n`.
    fn read_long_bracket(&mut self, sep: usize, literal: LongLiteral) -> Result<()> {
        let start_line = self.line;
        trace!(line = start_line, level = sep - 2, kind = literal.describe(), "long bracket opened");
        // Second opening bracket.
        self.save_and_advance()?;
        if self.current.is_some_and(is_newline) {
            self.inc_line_number()?;
        }
        loop {
            match self.current {
                None => return Err(self.unfinished_long(literal, start_line)),
                Some(b']') => {
                    if self.skip_separator()? == sep {
                        self.save_and_advance()?;
                        break;
                    }
                }
                Some(b'\n' | b'\r') => {
                    self.save(b'\n')?;
                    self.inc_line_number()?;
                    if literal == LongLiteral::Comment {
                        self.buffer.reset();
                    }
                }
                Some(_) => match literal {
                    LongLiteral::String => self.save_and_advance()?,
                    LongLiteral::Comment => self.advance(),
                },
            }
        }
        trace!(start_line, end_line = self.line, kind = literal.describe(), "long bracket closed");
        Ok(())
    }

    #[cold]
    fn unfinished_long(&mut self, literal: LongLiteral, start_line: u32) -> LexError {
        let message = format_message(
            "unfinished long %s (starting at line %d)",
            &[
                literal.describe().into(),
                FmtArg::Int(i32::try_from(start_line).unwrap_or(i32::MAX)),
            ],
        );
        match message {
            Ok(message) => self.lex_error_at(
                literal.unfinished(start_line),
                &message.to_string(),
                Some(TokenTag::EOS),
                start_line,
            ),
            Err(_) => LexError::out_of_memory(self.source_id_text(), start_line),
        }
    }
}
