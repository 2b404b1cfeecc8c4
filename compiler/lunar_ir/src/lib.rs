//! Lunar IR - shared front-end types
//!
//! This crate contains the data structures every phase of the Lunar
//! front end agrees on:
//! - `Name` handles for interned byte strings
//! - `StringInterner` / `SharedInterner` for string deduplication
//! - `Reserved`, `TokenTag`, `TokenKind` and `Token` for scanner output
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals become `Name(u32)`
//! - **Bytes, not text**: source strings may hold any byte, so interned
//!   values are `[u8]`, never `str`
//! - **Copy tokens**: a token is a small value the parser can buffer freely
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod token;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup, ENV_NAME};
pub use name::Name;
pub use token::{Reserved, Token, TokenKind, TokenTag};
