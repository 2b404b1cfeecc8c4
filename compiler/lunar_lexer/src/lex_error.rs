//! Scanner error types.
//!
//! Every error carries its fully rendered message
//! (`<source id>:<line>: <what> near <token>`), the source id, and the line
//! of the construct that failed. For literals spanning several lines that
//! is the line the literal started on.

use std::fmt;

/// A scanner error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// Rendered message, ready for display.
    pub message: String,
    /// Source id the message was rendered with.
    pub source_id: String,
    /// Line of the offending construct.
    pub line: u32,
}

/// What kind of scanner error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// Unexpected input: invalid long bracket, token too long, too many
    /// lines, or a parser-reported syntax error.
    Syntax,
    /// Numeral text that converts to neither an integer nor a float.
    MalformedNumber,
    /// Short string cut off by a line break or the end of input.
    UnfinishedString,
    /// Long string with no closing bracket.
    UnfinishedLongString { start_line: u32 },
    /// Long comment with no closing bracket.
    UnfinishedLongComment { start_line: u32 },
    /// Bad escape sequence inside a short string.
    InvalidEscape(EscapeProblem),
    /// Allocation failed while scanning or rendering a message.
    OutOfMemory,
    /// The byte source failed.
    Io,
}

/// What was wrong with an escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EscapeProblem {
    /// `\x` not followed by two hex digits.
    HexDigitExpected,
    /// `\o` not followed by two octal digits.
    OctalDigitExpected,
    /// `\u` not followed by `{`.
    MissingOpenBrace,
    /// `\u{...` not closed by `}`.
    MissingCloseBrace,
    /// `\u{...}` above `0x7FFFFFFF`.
    Utf8ValueTooLarge,
    /// `\ddd` above 255.
    DecimalTooLarge,
    /// `\` followed by anything else.
    InvalidSequence,
}

impl EscapeProblem {
    pub fn message(self) -> &'static str {
        match self {
            EscapeProblem::HexDigitExpected => "hexadecimal digit expected",
            EscapeProblem::OctalDigitExpected => "octal digit expected",
            EscapeProblem::MissingOpenBrace => "missing '{'",
            EscapeProblem::MissingCloseBrace => "missing '}'",
            EscapeProblem::Utf8ValueTooLarge => "UTF-8 value too large",
            EscapeProblem::DecimalTooLarge => "decimal escape too large",
            EscapeProblem::InvalidSequence => "invalid escape sequence",
        }
    }
}

impl fmt::Display for EscapeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Coarse error classes, for callers that only branch on the family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    SyntaxError,
    MalformedNumberError,
    UnfinishedStringError,
    UnfinishedLongLiteralError,
    InvalidEscapeError,
    OutOfMemoryError,
    IoError,
}

impl LexErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            LexErrorKind::Syntax => ErrorCategory::SyntaxError,
            LexErrorKind::MalformedNumber => ErrorCategory::MalformedNumberError,
            LexErrorKind::UnfinishedString => ErrorCategory::UnfinishedStringError,
            LexErrorKind::UnfinishedLongString { .. }
            | LexErrorKind::UnfinishedLongComment { .. } => {
                ErrorCategory::UnfinishedLongLiteralError
            }
            LexErrorKind::InvalidEscape(_) => ErrorCategory::InvalidEscapeError,
            LexErrorKind::OutOfMemory => ErrorCategory::OutOfMemoryError,
            LexErrorKind::Io => ErrorCategory::IoError,
        }
    }
}

impl LexError {
    #[cold]
    pub fn new(
        kind: LexErrorKind,
        message: impl Into<String>,
        source_id: impl Into<String>,
        line: u32,
    ) -> Self {
        LexError {
            kind,
            message: message.into(),
            source_id: source_id.into(),
            line,
        }
    }

    /// Allocation failure. The message is fixed and carries no location.
    #[cold]
    pub fn out_of_memory(source_id: impl Into<String>, line: u32) -> Self {
        Self::new(LexErrorKind::OutOfMemory, "not enough memory", source_id, line)
    }

    /// The byte source failed with `err`.
    #[cold]
    pub fn io(err: &std::io::Error, source_id: impl Into<String>, line: u32) -> Self {
        let source_id = source_id.into();
        let message = format!("{source_id}:{line}: read error: {err}");
        Self::new(LexErrorKind::Io, message, source_id, line)
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}
