//! Encoder for `\u{...}` escapes.
//!
//! Escapes may name any value up to `0x7FFF_FFFF`, beyond the Unicode
//! range, so this uses the six-byte RFC 2279 form of UTF-8 rather than
//! `char::encode_utf8`.

/// Largest value a `\u{...}` escape may encode.
pub const MAX_UTF8_ESCAPE: u32 = 0x7FFF_FFFF;

const UTF8_BUF_SIZE: usize = 8;

/// The encoded bytes of one escape (one to six of them).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Utf8Escape {
    buf: [u8; UTF8_BUF_SIZE],
    start: usize,
}

impl Utf8Escape {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

impl std::fmt::Debug for Utf8Escape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Utf8Escape({:02x?})", self.as_bytes())
    }
}

/// Encode `x` with the extended UTF-8 scheme.
///
/// Values above [`MAX_UTF8_ESCAPE`] are a caller bug; the scanner rejects
/// them before calling.
#[expect(
    clippy::cast_possible_truncation,
    reason = "each byte is masked or bounded before narrowing"
)]
pub fn utf8_escape(mut x: u32) -> Utf8Escape {
    debug_assert!(x <= MAX_UTF8_ESCAPE);
    let mut buf = [0u8; UTF8_BUF_SIZE];
    let mut n = 1;
    if x < 0x80 {
        buf[UTF8_BUF_SIZE - 1] = x as u8;
    } else {
        // Bytes are written back to front.
        let mut max_first = 0x3f_u32;
        loop {
            buf[UTF8_BUF_SIZE - n] = 0x80 | (x & 0x3f) as u8;
            n += 1;
            x >>= 6;
            max_first >>= 1;
            if x <= max_first {
                break;
            }
        }
        buf[UTF8_BUF_SIZE - n] = ((!max_first << 1) | x) as u8;
    }
    Utf8Escape {
        buf,
        start: UTF8_BUF_SIZE - n,
    }
}
