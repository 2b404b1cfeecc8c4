//! Command handlers for the `lunar` CLI.

mod lex;

pub use lex::{lex_command, parse_lex_options, write_tokens, LexInput, LexOptions};
