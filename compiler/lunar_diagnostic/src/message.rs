//! Bounded printf-style message formatting.
//!
//! Supported conversions:
//!
//! | Spec | Argument              | Output                              |
//! |------|-----------------------|-------------------------------------|
//! | `%s` | [`FmtArg::Str`]       | the bytes as given                  |
//! | `%c` | [`FmtArg::Char`]      | one byte                            |
//! | `%d` | [`FmtArg::Int`]       | decimal                             |
//! | `%I` | [`FmtArg::Integer`]   | decimal                             |
//! | `%f` | [`FmtArg::Float`]     | shortest form that reads back       |
//! | `%p` | [`FmtArg::Pointer`]   | `0x`-prefixed hex                   |
//! | `%U` | [`FmtArg::CodePoint`] | extended UTF-8 encoding             |
//! | `%%` |                       | `%`                                 |
//!
//! Any other `%x` is copied through unchanged. A conversion whose argument
//! is missing or of the wrong kind renders as `(null)`.

use std::fmt;

use lunar_lexer_core::{format_float, utf8_escape, MAX_UTF8_ESCAPE};

/// Initial buffer size: room for a source id, a number and a short message.
pub const INITIAL_MESSAGE_SIZE: usize = 60 + 64 + 95;

/// Default cap on a formatted message.
pub const DEFAULT_MESSAGE_LIMIT: usize = isize::MAX.unsigned_abs() / 2;

const NULL_TEXT: &[u8] = b"(null)";
const ELLIPSIS: &[u8] = b"...";

/// One argument for [`format_message`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FmtArg<'a> {
    Str(&'a [u8]),
    Char(u8),
    Int(i32),
    Integer(i64),
    Float(f64),
    Pointer(usize),
    CodePoint(u32),
}

impl<'a> From<&'a str> for FmtArg<'a> {
    fn from(s: &'a str) -> Self {
        FmtArg::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for FmtArg<'a> {
    fn from(s: &'a [u8]) -> Self {
        FmtArg::Str(s)
    }
}

/// Formatting failed outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("not enough memory")]
    OutOfMemory,
}

/// A formatted message.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Message(Vec<u8>);

impl Message {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({:?})", String::from_utf8_lossy(&self.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BufferState {
    Ok,
    OutOfMemory,
    /// Hit the cap; nothing more is added.
    Truncated,
}

/// Accumulates message bytes up to a cap.
///
/// The buffer starts at [`INITIAL_MESSAGE_SIZE`] and grows to at least
/// double its size whenever an append does not fit. An append that would
/// push the message past the cap copies only what still fits in the
/// current buffer, and the last three of those bytes become `...`. After an
/// allocation failure or a truncation, appends are ignored.
#[derive(Debug)]
pub struct MessageBuffer {
    buf: Vec<u8>,
    /// Logical size; `buf.capacity()` may be larger.
    size: usize,
    limit: usize,
    state: BufferState,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MESSAGE_LIMIT)
    }

    /// A buffer whose message never exceeds `limit` bytes.
    ///
    /// Limits below [`INITIAL_MESSAGE_SIZE`] are raised to it.
    pub fn with_limit(limit: usize) -> Self {
        MessageBuffer {
            buf: Vec::new(),
            size: INITIAL_MESSAGE_SIZE,
            limit: limit.max(INITIAL_MESSAGE_SIZE),
            state: BufferState::Ok,
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        if self.state != BufferState::Ok {
            return;
        }
        let len = self.buf.len();
        let left = self.size - len;
        if bytes.len() > left {
            if bytes.len() > self.limit - len {
                if self.reserve(self.size).is_err() {
                    return;
                }
                self.buf.extend_from_slice(&bytes[..left]);
                self.state = BufferState::Truncated;
                return;
            }
            let new_size = (self.size * 2).max(len + bytes.len()).min(self.limit);
            if self.reserve(new_size).is_err() {
                return;
            }
            self.size = new_size;
        }
        if self.reserve(len + bytes.len()).is_err() {
            return;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Make sure the allocation holds `total` bytes.
    fn reserve(&mut self, total: usize) -> Result<(), ()> {
        let extra = total.saturating_sub(self.buf.len());
        self.buf.try_reserve(extra).map_err(|_| {
            self.state = BufferState::OutOfMemory;
        })
    }

    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.push_bytes(&[byte]);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish the message, marking a truncation with `...`.
    pub fn finish(mut self) -> Result<Message, FormatError> {
        match self.state {
            BufferState::OutOfMemory => Err(FormatError::OutOfMemory),
            BufferState::Truncated => {
                // A truncated buffer is full, and always longer than the marker.
                let len = self.buf.len();
                self.buf[len - ELLIPSIS.len()..].copy_from_slice(ELLIPSIS);
                Ok(Message(self.buf))
            }
            BufferState::Ok => Ok(Message(self.buf)),
        }
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `template` with `args` under the default cap.
///
/// # Example
///
/// ```
/// use lunar_diagnostic::{format_message, FmtArg};
///
/// let msg = format_message("%s:%d: %s", &["chunk".into(), FmtArg::Int(3), "oops".into()]);
/// assert_eq!(msg.unwrap().to_string(), "chunk:3: oops");
/// ```
pub fn format_message(template: &str, args: &[FmtArg<'_>]) -> Result<Message, FormatError> {
    format_message_with_limit(template, args, DEFAULT_MESSAGE_LIMIT)
}

/// Format `template` with `args`, truncating the result at `limit` bytes.
pub fn format_message_with_limit(
    template: &str,
    args: &[FmtArg<'_>],
    limit: usize,
) -> Result<Message, FormatError> {
    let mut out = MessageBuffer::with_limit(limit);
    let mut rest = template.as_bytes();
    let mut args = args.iter().copied();

    while let Some(pos) = memchr::memchr(b'%', rest) {
        out.push_bytes(&rest[..pos]);
        let Some(&spec) = rest.get(pos + 1) else {
            out.push_byte(b'%');
            rest = &[];
            break;
        };
        match spec {
            b's' | b'c' | b'd' | b'I' | b'f' | b'p' | b'U' => {
                push_conversion(&mut out, spec, args.next());
            }
            b'%' => out.push_byte(b'%'),
            _ => out.push_bytes(&rest[pos..pos + 2]),
        }
        rest = &rest[pos + 2..];
    }
    out.push_bytes(rest);
    out.finish()
}

fn push_conversion(out: &mut MessageBuffer, spec: u8, arg: Option<FmtArg<'_>>) {
    match (spec, arg) {
        (b's', Some(FmtArg::Str(s))) => out.push_bytes(s),
        (b'c', Some(FmtArg::Char(c))) => out.push_byte(c),
        (b'd' | b'I', Some(FmtArg::Int(i))) => out.push_bytes(i.to_string().as_bytes()),
        (b'd' | b'I', Some(FmtArg::Integer(i))) => out.push_bytes(i.to_string().as_bytes()),
        (b'f', Some(FmtArg::Float(v))) => out.push_bytes(format_float(v).as_bytes()),
        (b'p', Some(FmtArg::Pointer(p))) => out.push_bytes(format!("{p:#x}").as_bytes()),
        (b'U', Some(FmtArg::CodePoint(cp))) if cp <= MAX_UTF8_ESCAPE => {
            out.push_bytes(utf8_escape(cp).as_bytes());
        }
        _ => out.push_bytes(NULL_TEXT),
    }
}
