//! Display form of a chunk name.
//!
//! A chunk name takes one of three shapes, told apart by its first byte:
//!
//! - `=name`: a literal name, shown without the `=` and cut at the limit
//! - `@path`: a file name, shown without the `@`; long paths keep their
//!   tail behind a leading `...`
//! - anything else: the chunk text itself, shown as `[string "text"]`
//!   with only its first line, and a `...` wherever text was left out

/// Longest rendered source id.
pub const DEFAULT_SOURCE_ID_LEN: usize = 59;

const ELLIPSIS: &[u8] = b"...";
const STRING_PREFIX: &[u8] = b"[string \"";
const STRING_SUFFIX: &[u8] = b"\"]";

/// Shortest limit that still fits `[string "..."]` whole.
pub const MIN_SOURCE_ID_LEN: usize = STRING_PREFIX.len() + ELLIPSIS.len() + STRING_SUFFIX.len();

/// Render `source` in at most `max_len` bytes.
///
/// Below [`MIN_SOURCE_ID_LEN`] an inline chunk no longer fits its brackets,
/// and the rendering is cut at `max_len` wherever that falls.
pub fn chunk_id(source: &[u8], max_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(max_len);
    match source.split_first() {
        Some((b'=', name)) => {
            out.extend_from_slice(&name[..name.len().min(max_len)]);
        }
        Some((b'@', path)) => {
            if path.len() <= max_len {
                out.extend_from_slice(path);
            } else {
                let keep = max_len.saturating_sub(ELLIPSIS.len());
                out.extend_from_slice(ELLIPSIS);
                out.extend_from_slice(&path[path.len() - keep..]);
            }
        }
        _ => {
            let room = max_len
                .saturating_sub(STRING_PREFIX.len() + ELLIPSIS.len() + STRING_SUFFIX.len());
            let newline = memchr::memchr(b'\n', source);
            out.extend_from_slice(STRING_PREFIX);
            if newline.is_none() && source.len() < room {
                out.extend_from_slice(source);
            } else {
                let end = newline.unwrap_or(source.len()).min(room);
                out.extend_from_slice(&source[..end]);
                out.extend_from_slice(ELLIPSIS);
            }
            out.extend_from_slice(STRING_SUFFIX);
        }
    }
    out.truncate(max_len);
    out
}
