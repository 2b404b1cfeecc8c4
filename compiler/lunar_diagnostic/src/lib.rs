//! Diagnostic text for the Lunar front end.
//!
//! Two pieces:
//! - [`format_message`]: a printf-style formatter restricted to a handful of
//!   conversions, writing into a [`MessageBuffer`] that grows up to a hard
//!   cap and truncates with `...` instead of failing
//! - [`chunk_id`]: the short display form of a chunk name used as the
//!   prefix of every scanner error
//!
//! Messages are bytes. A message may quote source text, which need not be
//! UTF-8; [`Message`] displays lossily.

mod chunk_id;
mod message;

pub use chunk_id::{chunk_id, DEFAULT_SOURCE_ID_LEN, MIN_SOURCE_ID_LEN};
pub use message::{
    format_message, format_message_with_limit, FmtArg, FormatError, Message, MessageBuffer,
    DEFAULT_MESSAGE_LIMIT, INITIAL_MESSAGE_SIZE,
};
