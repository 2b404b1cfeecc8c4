//! Scanning from `io::Read` sources, including readers that fail part way.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::io::{self, Read};

use lunar_ir::{Reserved, SharedInterner, StringInterner, TokenKind};
use lunar_lexer::{lex, ErrorCategory, LexErrorKind, LexerConfig, ReaderSource, Scanner};
use pretty_assertions::assert_eq;

/// Yields `data`, then fails.
struct FailingReader {
    data: io::Cursor<Vec<u8>>,
}

impl FailingReader {
    fn new(data: &[u8]) -> Self {
        FailingReader {
            data: io::Cursor::new(data.to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::other("device unplugged")),
            n => Ok(n),
        }
    }
}

fn kinds_from_reader<R: Read>(interner: &StringInterner, reader: R) -> Vec<TokenKind> {
    let mut scanner = Scanner::new(
        interner,
        ReaderSource::new(reader),
        b"@script.lua",
        LexerConfig::default(),
    );
    let mut kinds = Vec::new();
    loop {
        let token = scanner.next_token().unwrap();
        if token.kind.is_eos() {
            return kinds;
        }
        kinds.push(token.kind);
    }
}

#[test]
fn reader_matches_slice() {
    let src = "local t = { [[long\nstring]], 'short', 0x1p4, 42 } -- done\n".repeat(400);
    let interner = StringInterner::new();
    let from_reader = kinds_from_reader(&interner, io::Cursor::new(src.clone().into_bytes()));
    let mut from_slice: Vec<TokenKind> = lex(&interner, src.as_bytes(), b"@script.lua", LexerConfig::default())
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(from_slice.pop(), Some(TokenKind::EOS));
    assert_eq!(from_reader, from_slice);
    assert_eq!(from_reader.len(), 400 * 12);
}

#[test]
fn read_failure_surfaces_at_end_of_input() {
    let interner = StringInterner::new();
    let mut scanner = Scanner::new(
        &interner,
        ReaderSource::new(FailingReader::new(b"x = 1")),
        b"=stdin",
        LexerConfig::default(),
    );
    assert_eq!(
        scanner.next_token().unwrap().kind,
        TokenKind::Name(interner.intern("x"))
    );
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Char(b'='));
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Int(1));
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::Io);
    assert_eq!(err.category(), ErrorCategory::IoError);
    assert_eq!(err.message, "stdin:1: read error: device unplugged");
}

#[test]
fn read_failure_wins_over_unfinished_literal() {
    let interner = StringInterner::new();
    let mut scanner = Scanner::new(
        &interner,
        ReaderSource::new(FailingReader::new(b"s = 'cut")),
        b"=stdin",
        LexerConfig::default(),
    );
    scanner.next_token().unwrap();
    scanner.next_token().unwrap();
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::Io);
}

#[test]
fn shared_interner_across_scanners() {
    let interner = SharedInterner::new();
    let first = lex(&interner, b"alpha 'beta'", b"=a", LexerConfig::default()).unwrap();
    let second = lex(&interner, b"beta alpha", b"=b", LexerConfig::default()).unwrap();
    let TokenKind::String(beta) = first[1].kind else {
        panic!("expected a string, got {:?}", first[1]);
    };
    assert_eq!(second[0].kind, TokenKind::Name(beta));
    assert_eq!(second[1].kind, first[0].kind);
}

#[test]
fn lex_stops_at_first_error() {
    let interner = StringInterner::new();
    let err = lex(&interner, b"a = 1\nb = 2x\nc", b"@main.lua", LexerConfig::default()).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MalformedNumber);
    assert_eq!(err.line, 2);
    assert_eq!(err.source_id, "main.lua");
    assert_eq!(err.to_string(), "main.lua:2: malformed number near '2x'");
}

#[test]
fn lex_ends_with_eos() {
    let interner = StringInterner::new();
    let tokens = lex(&interner, b"while true do end", b"=t", LexerConfig::default()).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Reserved(Reserved::While),
            TokenKind::Reserved(Reserved::True),
            TokenKind::Reserved(Reserved::Do),
            TokenKind::Reserved(Reserved::End),
            TokenKind::EOS,
        ]
    );
}
