//! Scanner configuration.

use lunar_diagnostic::DEFAULT_SOURCE_ID_LEN;
use lunar_lexer_core::ScratchBuffer;

/// Knobs that change how a [`Scanner`](crate::Scanner) reads its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Radix character accepted in decimal and hexadecimal floats, in
    /// addition to `.`. Must not be an ASCII letter or digit, which the
    /// numeral scanner would read as part of the number.
    pub decimal_point: u8,
    /// Ceiling for the scratch buffer. A literal whose text, delimiters
    /// included, is longer than two thirds of this is rejected as too long.
    pub max_token_len: usize,
    /// Longest source id printed at the front of error messages. Values
    /// below [`MIN_SOURCE_ID_LEN`](crate::MIN_SOURCE_ID_LEN) are raised to it.
    pub source_id_len: usize,
    /// Whether `global` scans as a keyword. With the `compat-global` feature
    /// the default is `false`.
    pub global_is_reserved: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            decimal_point: b'.',
            max_token_len: ScratchBuffer::DEFAULT_MAX_SIZE,
            source_id_len: DEFAULT_SOURCE_ID_LEN,
            global_is_reserved: !cfg!(feature = "compat-global"),
        }
    }
}
