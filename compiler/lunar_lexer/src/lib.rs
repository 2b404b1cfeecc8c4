//! Scanner for the Lunar front end.
//!
//! Turns a byte stream into [`Token`]s. Literal values are decoded as they
//! are scanned: numerals become integers or floats, strings have their
//! escapes resolved, and names and strings are interned.
//!
//! # Usage
//!
//! ```
//! use lunar_ir::{StringInterner, TokenKind};
//! use lunar_lexer::{lex, LexerConfig};
//!
//! let interner = StringInterner::new();
//! let tokens = lex(&interner, b"x = 0x10", b"=demo", LexerConfig::default()).unwrap();
//! assert_eq!(tokens[2].kind, TokenKind::Int(16));
//! assert!(tokens[3].kind.is_eos());
//! ```
//!
//! For incremental scanning, or input that comes from a reader, build a
//! [`Scanner`] over any [`ByteSource`].

mod config;
mod lex_error;
mod scanner;

pub use config::LexerConfig;
pub use lex_error::{ErrorCategory, EscapeProblem, LexError, LexErrorKind};
pub use lunar_diagnostic::MIN_SOURCE_ID_LEN;
pub use lunar_lexer_core::{ByteSource, ReaderSource, SliceSource};
pub use scanner::{token_to_str, Scanner};

use lunar_ir::{StringInterner, Token};
use tracing::debug;

/// Scan a whole in-memory chunk.
///
/// The returned tokens end with the `<eof>` token.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(
    interner: &StringInterner,
    source: &[u8],
    source_name: &[u8],
    config: LexerConfig,
) -> Result<Vec<Token>, LexError> {
    lex_source(interner, SliceSource::new(source), source_name, config)
}

/// Scan everything `source` yields, up to and including `<eof>`.
pub fn lex_source<S: ByteSource>(
    interner: &StringInterner,
    source: S,
    source_name: &[u8],
    config: LexerConfig,
) -> Result<Vec<Token>, LexError> {
    let mut scanner = Scanner::new(interner, source, source_name, config);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        tokens.push(token);
        if token.kind.is_eos() {
            break;
        }
    }
    debug!(count = tokens.len(), lines = scanner.line(), "chunk scanned");
    Ok(tokens)
}
