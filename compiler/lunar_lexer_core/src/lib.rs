//! Low-level building blocks for the Lunar scanner.
//!
//! This crate holds everything the scanner needs that does not depend on
//! tokens or interning:
//!
//! - [`ByteSource`]: pull-one-byte input abstraction, with [`SliceSource`]
//!   for in-memory chunks and [`ReaderSource`] for any `io::Read`
//! - [`ScratchBuffer`]: growable staging area for the text of one literal
//! - [`chars`]: the byte classes the scanner dispatches on
//! - [`numeral`]: numeral text to value conversion and number formatting
//! - [`utf8_escape`]: encoder for `\u{...}` escapes
//!
//! # Design
//!
//! Source text is bytes, not UTF-8. Every function here works on `&[u8]`
//! and never assumes the input is valid text.

mod buffer;
pub mod chars;
pub mod numeral;
mod source;
mod utf8;

pub use buffer::{BufferError, ScratchBuffer, MIN_BUFFER_SIZE};
pub use numeral::{format_float, format_number, str_to_float, str_to_int, str_to_number, Number};
pub use source::{ByteSource, ReaderSource, SliceSource};
pub use utf8::{utf8_escape, Utf8Escape, MAX_UTF8_ESCAPE};
