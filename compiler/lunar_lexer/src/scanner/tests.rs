use super::*;
use lunar_lexer_core::SliceSource;
use pretty_assertions::assert_eq;

use crate::EscapeProblem;

const NAME: &[u8] = b"=test";

fn config() -> LexerConfig {
    LexerConfig {
        global_is_reserved: true,
        ..LexerConfig::default()
    }
}

fn scanner<'i>(interner: &'i StringInterner, src: &'i [u8]) -> Scanner<'i, SliceSource<'i>> {
    Scanner::new(interner, SliceSource::new(src), NAME, config())
}

/// Token kinds up to, not including, `<eof>`.
fn kinds(interner: &StringInterner, src: &[u8]) -> Vec<TokenKind> {
    let mut scanner = scanner(interner, src);
    let mut out = Vec::new();
    loop {
        let token = scanner.next_token().unwrap();
        if token.kind.is_eos() {
            return out;
        }
        out.push(token.kind);
    }
}

/// The bytes of the single string literal in `src`.
fn string(src: &[u8]) -> Vec<u8> {
    let interner = StringInterner::new();
    match kinds(&interner, src).as_slice() {
        [TokenKind::String(name)] => interner.lookup(*name).to_vec(),
        other => panic!("expected one string, got {other:?}"),
    }
}

fn error(src: &[u8]) -> LexError {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, src);
    loop {
        match scanner.next_token() {
            Ok(token) if token.kind.is_eos() => {
                panic!("no error in {:?}", String::from_utf8_lossy(src))
            }
            Ok(_) => {}
            Err(err) => return err,
        }
    }
}

fn reserved(r: Reserved) -> TokenKind {
    TokenKind::Reserved(r)
}

// === Operators and punctuation ===

#[test]
fn multi_byte_operators() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"== ~= != <= >= << >> // :: .. ..."),
        vec![
            reserved(Reserved::Eq),
            reserved(Reserved::Ne),
            reserved(Reserved::Ne),
            reserved(Reserved::Le),
            reserved(Reserved::Ge),
            reserved(Reserved::Shl),
            reserved(Reserved::Shr),
            reserved(Reserved::IDiv),
            reserved(Reserved::DbColon),
            reserved(Reserved::Concat),
            reserved(Reserved::Dots),
        ]
    );
}

#[test]
fn lone_bytes_are_char_tokens() {
    let interner = StringInterner::new();
    let expected: Vec<TokenKind> = b"=<>/~:!.+-*%^#&|(){}[];,"
        .iter()
        .map(|&b| TokenKind::Char(b))
        .collect();
    assert_eq!(kinds(&interner, b"= < > / ~ : ! . + - * % ^ # & | ( ) { } [ ] ; ,"), expected);
}

#[test]
fn odd_bytes_pass_through() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"\x00@\xff$"),
        vec![
            TokenKind::Char(0),
            TokenKind::Char(b'@'),
            TokenKind::Char(0xff),
            TokenKind::Char(b'$'),
        ]
    );
}

#[test]
fn greedy_operator_split() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"a<<=b"),
        vec![
            TokenKind::Name(interner.intern("a")),
            reserved(Reserved::Shl),
            TokenKind::Char(b'='),
            TokenKind::Name(interner.intern("b")),
        ]
    );
    assert_eq!(
        kinds(&interner, b"...."),
        vec![reserved(Reserved::Dots), TokenKind::Char(b'.')]
    );
}

// === Names and keywords ===

#[test]
fn keywords_and_names() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"while whiley _x9 global End"),
        vec![
            reserved(Reserved::While),
            TokenKind::Name(interner.intern("whiley")),
            TokenKind::Name(interner.intern("_x9")),
            reserved(Reserved::Global),
            TokenKind::Name(interner.intern("End")),
        ]
    );
}

#[test]
fn global_as_plain_name() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        global_is_reserved: false,
        ..LexerConfig::default()
    };
    let mut scanner = Scanner::new(&interner, SliceSource::new(b"global goto"), NAME, config);
    assert_eq!(
        scanner.next_token().unwrap().kind,
        TokenKind::Name(interner.intern("global"))
    );
    assert_eq!(scanner.next_token().unwrap().kind, reserved(Reserved::Goto));
}

#[test]
fn pre_interned_names() {
    let interner = StringInterner::new();
    let scanner = scanner(&interner, b"");
    assert_eq!(scanner.env_name(), interner.intern("_ENV"));
    assert_eq!(scanner.break_name(), interner.intern("break"));
    assert_eq!(scanner.source_name(), NAME);
}

// === Lines ===

#[test]
fn mixed_line_breaks_count_once() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"a\r\nb\n\rc\n\nd");
    let lines: Vec<u32> = std::iter::from_fn(|| {
        let token = scanner.next_token().unwrap();
        (!token.kind.is_eos()).then_some(token.line)
    })
    .collect();
    assert_eq!(lines, vec![1, 2, 3, 5]);
}

#[test]
fn last_line_tracks_previous_token() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"a\n\nb");
    scanner.next_token().unwrap();
    assert_eq!(scanner.last_line(), 1);
    scanner.next_token().unwrap();
    assert_eq!(scanner.last_line(), 1);
    assert_eq!(scanner.line(), 3);
    scanner.next_token().unwrap();
    assert_eq!(scanner.last_line(), 3);
}

#[test]
fn too_many_lines() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"\nx");
    scanner.line = MAX_LINES - 1;
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::Syntax);
    assert_eq!(err.message, "test:2147483647: chunk has too many lines");
}

// === Comments ===

#[test]
fn comments_are_skipped() {
    let interner = StringInterner::new();
    let mut scanner = scanner(
        &interner,
        b"-- line comment\nx --[[ long\ncomment ]] y --[==[ ]] ]==] z --[=no\nw",
    );
    let mut seen = Vec::new();
    loop {
        let token = scanner.next_token().unwrap();
        if token.kind.is_eos() {
            break;
        }
        seen.push((token.kind, token.line));
    }
    let name = |s: &str| TokenKind::Name(interner.intern(s));
    assert_eq!(
        seen,
        vec![(name("x"), 2), (name("y"), 3), (name("z"), 3), (name("w"), 4)]
    );
}

#[test]
fn comment_at_end_of_input() {
    let interner = StringInterner::new();
    assert_eq!(kinds(&interner, b"x --"), vec![TokenKind::Name(interner.intern("x"))]);
    assert_eq!(kinds(&interner, b"--["), Vec::<TokenKind>::new());
}

// === Long strings ===

#[test]
fn long_strings() {
    assert_eq!(string(b"[[\nhello]]"), b"hello");
    assert_eq!(string(b"[[]]"), b"");
    assert_eq!(string(b"[==[a]=]b]]c]==]"), b"a]=]b]]c");
    assert_eq!(string(b"[[a\r\nb\n\rc\rd]]"), b"a\nb\nc\nd");
    assert_eq!(string(b"[[\r\n\r\nx]]"), b"\nx");
    assert_eq!(string(b"[=[\\n \"q\"]=]"), b"\\n \"q\"");
}

#[test]
fn long_string_counts_lines() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"[[\na\nb]] x");
    assert_eq!(scanner.next_token().unwrap().line, 3);
    assert_eq!(scanner.next_token().unwrap().line, 3);
}

#[test]
fn invalid_long_delimiter() {
    let err = error(b"x = [=");
    assert_eq!(err.kind, LexErrorKind::Syntax);
    assert_eq!(err.message, "test:1: invalid long string delimiter near '[='");

    let err = error(b"[==x]==]");
    assert_eq!(err.message, "test:1: invalid long string delimiter near '[=='");
}

#[test]
fn unfinished_long_string_reports_start_line() {
    let err = error(b"x = [[abc\ndef");
    assert_eq!(err.kind, LexErrorKind::UnfinishedLongString { start_line: 1 });
    assert_eq!(err.line, 1);
    assert_eq!(
        err.message,
        "test:2: unfinished long string (starting at line 1) near <eof>"
    );
}

#[test]
fn unfinished_long_comment() {
    let err = error(b"\n--[==[ abc ]=]");
    assert_eq!(err.kind, LexErrorKind::UnfinishedLongComment { start_line: 2 });
    assert_eq!(
        err.message,
        "test:2: unfinished long comment (starting at line 2) near <eof>"
    );
}

// === Short strings ===

#[test]
fn simple_escapes() {
    assert_eq!(
        string(br#""\a\b\f\n\r\t\v\\\"\'""#),
        [7, 8, 12, 10, 13, 9, 11, b'\\', b'"', b'\'']
    );
    assert_eq!(string(b"'say \"hi\"'"), b"say \"hi\"");
}

#[test]
fn numeric_escapes() {
    assert_eq!(string(br#""\65\66\67""#), b"ABC");
    assert_eq!(string(br#"'\x41\x7a'"#), b"Az");
    assert_eq!(string(br#""\o101""#), b"\x081");
    assert_eq!(string(br#""\0001""#), b"\x001");
    assert_eq!(string(br#""\255""#), b"\xff");
}

#[test]
fn utf8_escapes() {
    assert_eq!(string(br#""\u{48}\u{49}""#), b"HI");
    assert_eq!(string(br#""\u{20AC}""#), "\u{20ac}".as_bytes());
    assert_eq!(string(br#""\u{0000000041}""#), b"A");
    assert_eq!(
        string(br#""\u{7FFFFFFF}""#),
        [0xfd, 0xbf, 0xbf, 0xbf, 0xbf, 0xbf]
    );
}

#[test]
fn line_continuations() {
    assert_eq!(string(b"\"a\\\nb\""), b"a\nb");
    assert_eq!(string(b"\"a\\\r\nb\""), b"a\nb");
    assert_eq!(string(b"\"a\\z  \n\t  b\""), b"ab");
    assert_eq!(string(b"\"a\\zb\""), b"ab");

    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"'a\\z\n\n b' c");
    scanner.next_token().unwrap();
    assert_eq!(scanner.next_token().unwrap().line, 3);
}

#[test]
fn unfinished_strings() {
    let err = error(b"x = \"abc");
    assert_eq!(err.kind, LexErrorKind::UnfinishedString);
    assert_eq!(err.message, "test:1: unfinished string near <eof>");

    let err = error(b"'abc\ndef'");
    assert_eq!(err.kind, LexErrorKind::UnfinishedString);
    assert_eq!(err.message, "test:1: unfinished string near ''abc'");

    let err = error(b"\"trailing\\");
    assert_eq!(err.message, "test:1: unfinished string near <eof>");
}

#[test]
fn string_error_reports_start_line() {
    let err = error(b"\n\"a\\\nb");
    assert_eq!(err.line, 2);
    assert_eq!(err.message, "test:3: unfinished string near <eof>");
}

#[test]
fn escape_errors_quote_the_escape() {
    let cases = [
        (r#""\q""#, EscapeProblem::InvalidSequence, r#"invalid escape sequence near '"\q'"#),
        (r#""\xZZ""#, EscapeProblem::HexDigitExpected, r#"hexadecimal digit expected near '"\xZ'"#),
        (r#""\x4""#, EscapeProblem::HexDigitExpected, r#"hexadecimal digit expected near '"\x4"'"#),
        (r#""\o9""#, EscapeProblem::OctalDigitExpected, r#"octal digit expected near '"\o9'"#),
        (r#""\256""#, EscapeProblem::DecimalTooLarge, r#"decimal escape too large near '"\256"'"#),
        (r#""\u48""#, EscapeProblem::MissingOpenBrace, r#"missing '{' near '"\u4'"#),
        (r#""\u{48""#, EscapeProblem::MissingCloseBrace, r#"missing '}' near '"\u{48"'"#),
        (r#""\u{}""#, EscapeProblem::HexDigitExpected, r#"hexadecimal digit expected near '"\u{}'"#),
        (
            r#""\u{80000000}""#,
            EscapeProblem::Utf8ValueTooLarge,
            r#"UTF-8 value too large near '"\u{80000000'"#,
        ),
    ];
    for (src, problem, message) in cases {
        let err = error(src.as_bytes());
        assert_eq!(err.kind, LexErrorKind::InvalidEscape(problem), "{message}");
        assert_eq!(err.message, format!("test:1: {message}"));
    }
}

#[test]
fn escape_error_at_end_of_input() {
    let err = error(b"\"\\x");
    assert_eq!(
        err.kind,
        LexErrorKind::InvalidEscape(EscapeProblem::HexDigitExpected)
    );
    assert_eq!(err.message, r#"test:1: hexadecimal digit expected near '"\x'"#);
}

// === Numerals ===

#[test]
fn numerals() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(
            &interner,
            b"3 345 0xff 0xBEBADA 3.0 3.1416 314.16e-2 0.31416E1 34e1 .5 5. 0o17"
        ),
        vec![
            TokenKind::Int(3),
            TokenKind::Int(345),
            TokenKind::Int(255),
            TokenKind::Int(0x00BE_BADA),
            TokenKind::float(3.0),
            TokenKind::float(3.1416),
            TokenKind::float(3.1416),
            TokenKind::float(3.1416),
            TokenKind::float(340.0),
            TokenKind::float(0.5),
            TokenKind::float(5.0),
            TokenKind::Int(15),
        ]
    );
}

#[test]
fn hex_floats() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"0x0.1E 0xA23p-4 0X1.921FB54442D18P+1 0x.8"),
        vec![
            TokenKind::float(0.117_187_5),
            TokenKind::float(162.1875),
            TokenKind::float(std::f64::consts::PI),
            TokenKind::float(0.5),
        ]
    );
}

#[test]
fn integer_limits() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"9223372036854775807 9223372036854775808 0xffffffffffffffff"),
        vec![
            TokenKind::Int(i64::MAX),
            TokenKind::float(9_223_372_036_854_775_808.0),
            TokenKind::Int(-1),
        ]
    );
}

#[test]
fn sign_only_after_exponent() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds(&interner, b"0xe+1"),
        vec![TokenKind::Int(14), TokenKind::Char(b'+'), TokenKind::Int(1)]
    );
    assert_eq!(
        kinds(&interner, b"3-4"),
        vec![TokenKind::Int(3), TokenKind::Char(b'-'), TokenKind::Int(4)]
    );
    assert_eq!(kinds(&interner, b"1e+1"), vec![TokenKind::float(10.0)]);
    assert_eq!(kinds(&interner, b"2E-1"), vec![TokenKind::float(0.2)]);
}

#[test]
fn malformed_numbers() {
    for src in ["3x", "0x", "1..2", "3e", "0x1p", "08z", "1e+"] {
        let err = error(src.as_bytes());
        assert_eq!(err.kind, LexErrorKind::MalformedNumber, "{src}");
        assert_eq!(err.message, format!("test:1: malformed number near '{src}'"));
    }
}

#[test]
fn alternate_decimal_point() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        decimal_point: b',',
        ..config()
    };
    let mut scanner = Scanner::new(&interner, SliceSource::new(b"2.5"), NAME, config);
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::float(2.5));
}

// === Lookahead ===

#[test]
fn lookahead_is_cached() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"a = 1");
    assert_eq!(
        scanner.next_token().unwrap().kind,
        TokenKind::Name(interner.intern("a"))
    );
    assert_eq!(scanner.lookahead().unwrap(), TokenTag::from_char(b'='));
    assert_eq!(scanner.lookahead().unwrap(), TokenTag::from_char(b'='));
    assert_eq!(scanner.token().kind, TokenKind::Name(interner.intern("a")));
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Char(b'='));
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Int(1));
    assert_eq!(scanner.lookahead().unwrap(), TokenTag::EOS);
    assert!(scanner.next_token().unwrap().kind.is_eos());
}

#[test]
fn end_of_stream_repeats() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"  \n ");
    for _ in 0..3 {
        let token = scanner.next_token().unwrap();
        assert!(token.kind.is_eos());
        assert_eq!(token.line, 2);
    }
}

// === Errors ===

#[test]
fn syntax_error_names_current_token() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"local x 42 'str' + end");

    assert_eq!(
        scanner.syntax_error("early").message,
        "test:1: early near <eof>"
    );
    let expected = [
        "test:1: unexpected near 'local'",
        "test:1: unexpected near 'x'",
        "test:1: unexpected near '42'",
        "test:1: unexpected near ''str''",
        "test:1: unexpected near '+'",
        "test:1: unexpected near 'end'",
    ];
    for message in expected {
        scanner.next_token().unwrap();
        let err = scanner.syntax_error("unexpected");
        assert_eq!(err.kind, LexErrorKind::Syntax);
        assert_eq!(err.message, message);
    }
}

#[test]
fn syntax_error_on_nul_token_has_no_near() {
    let interner = StringInterner::new();
    let mut scanner = scanner(&interner, b"\x00");
    scanner.next_token().unwrap();
    assert_eq!(scanner.syntax_error("bad").message, "test:1: bad");
}

#[test]
fn source_id_in_messages() {
    let interner = StringInterner::new();
    let mut scanner = Scanner::new(&interner, SliceSource::new(b"@"), b"@lib/util.lua", config());
    scanner.next_token().unwrap();
    let err = scanner.syntax_error("oops");
    assert_eq!(err.message, "lib/util.lua:1: oops near '@'");
    assert_eq!(err.source_id, "lib/util.lua");

    let mut scanner = Scanner::new(&interner, SliceSource::new(b"x"), b"x", config());
    scanner.next_token().unwrap();
    assert_eq!(
        scanner.syntax_error("oops").message,
        "[string \"x\"]:1: oops near 'x'"
    );
}

#[test]
fn tiny_source_id_len_keeps_brackets() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        source_id_len: 3,
        ..config()
    };
    let mut scanner = Scanner::new(&interner, SliceSource::new(b"2x"), b"2x", config);
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.source_id, "[string \"...\"]");
    assert_eq!(err.message, "[string \"...\"]:1: malformed number near '2x'");
}

#[test]
fn element_too_long() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        max_token_len: 90,
        ..config()
    };
    let name = "n".repeat(100);
    let mut scanner = Scanner::new(&interner, SliceSource::new(name.as_bytes()), NAME, config);
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.kind, LexErrorKind::Syntax);
    assert_eq!(err.message, "test:1: lexical element too long");

    let mut scanner = Scanner::new(&interner, SliceSource::new(b"short"), NAME, config);
    assert_eq!(
        scanner.next_token().unwrap().kind,
        TokenKind::Name(interner.intern("short"))
    );
}

#[test]
fn small_token_limit_counts_bytes() {
    let interner = StringInterner::new();
    let config = LexerConfig {
        max_token_len: 10,
        ..config()
    };
    let too_long: [&[u8]; 3] = [b"abcdefghijklmnopqrstuvwxyz01", b"abcdefg", b"'abcde'"];
    for src in too_long {
        let mut scanner = Scanner::new(&interner, SliceSource::new(src), NAME, config);
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.message, "test:1: lexical element too long");
    }

    let mut scanner = Scanner::new(&interner, SliceSource::new(b"abcdef 'abcd'"), NAME, config);
    assert_eq!(
        scanner.next_token().unwrap().kind,
        TokenKind::Name(interner.intern("abcdef"))
    );
    assert_eq!(
        scanner.next_token().unwrap().kind,
        TokenKind::String(interner.intern("abcd"))
    );
}

// === token_to_str ===

#[test]
fn token_display() {
    assert_eq!(token_to_str(TokenTag::from_char(b'+')), "'+'");
    assert_eq!(token_to_str(TokenTag::from_char(b'\n')), "'<\\10>'");
    assert_eq!(token_to_str(TokenTag::from_char(0xff)), "'<\\255>'");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::While)), "'while'");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::Concat)), "'..'");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::Ne)), "'!='");
    assert_eq!(token_to_str(TokenTag::EOS), "<eof>");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::Flt)), "<number>");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::Int)), "<integer>");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::Name)), "<name>");
    assert_eq!(token_to_str(TokenTag::from_reserved(Reserved::String)), "<string>");
}
