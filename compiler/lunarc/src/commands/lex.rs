//! `lunar lex`: scan a chunk and print its tokens.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use lunar_ir::{StringInterner, Token, TokenKind};
use lunar_lexer::{lex, lex_source, token_to_str, LexerConfig, ReaderSource, MIN_SOURCE_ID_LEN};
use lunar_lexer_core::{format_number, Number};
use tracing::debug;

/// Where the chunk to scan comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexInput {
    File(PathBuf),
    /// Chunk text given on the command line with `-e`.
    Chunk(String),
    /// Standard input, selected with `-`.
    Stdin,
}

/// Parsed options of `lunar lex`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOptions {
    pub input: LexInput,
    pub config: LexerConfig,
}

/// Parse the arguments that follow `lex`.
///
/// Recognized: `<file>`, `-` for stdin, `-e <chunk>`, `--compat-global`,
/// `--decimal-point=<c>` and `--source-id-len=<n>`.
pub fn parse_lex_options(args: &[String]) -> Result<LexOptions, String> {
    let mut config = LexerConfig::default();
    let mut input = None;
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-e" {
            let Some(chunk) = args.get(i + 1) else {
                return Err("-e needs a chunk argument".to_string());
            };
            input = Some(LexInput::Chunk(chunk.clone()));
            i += 2;
            continue;
        }
        if arg == "--compat-global" {
            config.global_is_reserved = false;
        } else if let Some(point) = arg.strip_prefix("--decimal-point=") {
            match point.as_bytes() {
                &[byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() => {
                    config.decimal_point = byte;
                }
                _ => {
                    return Err(format!(
                        "decimal point must be one ASCII character other than a letter or digit, got '{point}'"
                    ))
                }
            }
        } else if let Some(len) = arg.strip_prefix("--source-id-len=") {
            config.source_id_len = match len.parse() {
                Ok(len) if len >= MIN_SOURCE_ID_LEN => len,
                _ => {
                    return Err(format!(
                        "source id length must be a number of at least {MIN_SOURCE_ID_LEN}, got '{len}'"
                    ))
                }
            };
        } else if arg == "-" {
            input = Some(LexInput::Stdin);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if input.is_none() {
            input = Some(LexInput::File(PathBuf::from(arg)));
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
        i += 1;
    }
    let input = input.ok_or_else(|| "missing file path or -e <chunk>".to_string())?;
    Ok(LexOptions { input, config })
}

/// Run `lunar lex`, returning the process exit code.
pub fn lex_command(options: &LexOptions) -> i32 {
    let interner = StringInterner::new();
    let result = match &options.input {
        LexInput::Chunk(text) => lex(&interner, text.as_bytes(), text.as_bytes(), options.config),
        LexInput::Stdin => lex_source(
            &interner,
            ReaderSource::new(io::stdin().lock()),
            b"=stdin",
            options.config,
        ),
        LexInput::File(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("error: cannot read '{}': {err}", path.display());
                    return 1;
                }
            };
            let name = format!("@{}", path.display());
            lex_source(&interner, ReaderSource::new(file), name.as_bytes(), options.config)
        }
    };

    let tokens = match result {
        Ok(tokens) => tokens,
        Err(err) => {
            debug!(kind = ?err.kind, line = err.line, "scan failed");
            eprintln!("error: {err}");
            return 1;
        }
    };
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(err) = write_tokens(&mut out, &interner, &tokens).and_then(|()| out.flush()) {
        eprintln!("error: {err}");
        return 1;
    }
    0
}

/// Print one token per line: line number, token class, and the decoded
/// value for names and literals.
pub fn write_tokens<W: Write>(
    out: &mut W,
    interner: &StringInterner,
    tokens: &[Token],
) -> io::Result<()> {
    for token in tokens {
        let line = token.line;
        let tag = token_to_str(token.tag());
        match token.kind {
            TokenKind::Name(name) => {
                writeln!(out, "{line:>5}  {tag:<10} {}", interner.lookup_str(name))?;
            }
            TokenKind::String(name) => {
                writeln!(out, "{line:>5}  {tag:<10} {:?}", interner.lookup_str(name))?;
            }
            TokenKind::Int(value) => {
                writeln!(out, "{line:>5}  {tag:<10} {}", format_number(Number::Int(value)))?;
            }
            TokenKind::Float(bits) => {
                let value = Number::Float(f64::from_bits(bits));
                writeln!(out, "{line:>5}  {tag:<10} {}", format_number(value))?;
            }
            TokenKind::Char(_) | TokenKind::Reserved(_) => writeln!(out, "{line:>5}  {tag}")?,
        }
    }
    Ok(())
}
