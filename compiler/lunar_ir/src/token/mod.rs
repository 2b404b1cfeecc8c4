//! Token types for the Lunar scanner.
//!
//! A token is a [`TokenKind`] (classification plus payload) and the line it
//! ended on. [`TokenTag`] is the payload-free classification used for
//! lookahead and display, numbered so that single-byte tokens are their own
//! byte value and reserved tokens start at 256.

mod kind;
mod reserved;
mod tag;

pub use kind::TokenKind;
pub use reserved::Reserved;
pub use tag::TokenTag;

use std::fmt;

/// A scanned token with the line on which it was completed.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Token { kind, line }
    }

    #[inline]
    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ line {}", self.kind, self.line)
    }
}

// Tokens are buffered by value; keep them small.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Reserved, Token, TokenKind, TokenTag};
    // Largest payload is 8 bytes (Float / Int) plus discriminant.
    crate::static_assert_size!(TokenKind, 16);
    crate::static_assert_size!(Token, 24);
    crate::static_assert_size!(TokenTag, 2);
    crate::static_assert_size!(Reserved, 1);
}
