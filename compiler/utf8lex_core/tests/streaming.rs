//! Lexing input that arrives in pieces.
//!
//! Splitting the input across buffers, anywhere, including inside a UTF-8
//! sequence or a grapheme cluster, must produce the same tokens as lexing it
//! in one buffer.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

use common::{drain, lex_all, lex_chunked, registry, rules, TOKEN_RULES};
use pretty_assertions::assert_eq;
use utf8lex_core::{
    Buffer, Cat, ErrorCode, Lexer, Pattern, Registry, RuleSet, Settings, State, Token, Unit,
};

fn chunks(pieces: &[&[u8]]) -> Vec<Vec<u8>> {
    pieces.iter().map(|piece| piece.to_vec()).collect()
}

fn texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|token| token.text().into_owned()).collect()
}

// === Buffer boundaries ===

#[test]
fn open_end_waits_for_the_rest_of_a_number() {
    let registry = registry();
    let rules = rules(&registry, TOKEN_RULES);
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::partial("x = 4"));

    let (tokens, end) = drain(&lexer, &mut state);
    assert_eq!(texts(&tokens), ["x", " ", "=", " "]);
    assert_eq!(end, ErrorCode::More);
    assert_eq!(state.loc()[Unit::Byte].start, 4);

    state.append(Buffer::complete("2")).unwrap();
    let (tokens, end) = drain(&lexer, &mut state);
    assert_eq!(texts(&tokens), ["42"]);
    assert_eq!(tokens[0].loc[Unit::Byte].start, 4);
    assert_eq!(end, ErrorCode::Eof);
}

#[test]
fn token_over_several_buffers() {
    let registry = registry();
    let rules = rules(&registry, &["EXPRESSION"]);
    let lexer = Lexer::new(&registry, &rules);
    let input = "string     first_name===42";
    let pieces = chunks(&[b"stri", b"ng  ", b"   first", b"_name=", b"=", b"=4", b"2"]);

    let (whole, _) = lex_all(&registry, &rules, input);
    assert_eq!(lex_chunked(&lexer, &pieces).unwrap(), whole);
}

#[test]
fn split_utf8_sequence() {
    let registry = registry();
    let rules = rules(&registry, TOKEN_RULES);
    let lexer = Lexer::new(&registry, &rules);
    let pieces = chunks(&[b"1\xE2", b"\x85", b"\x92 "]);

    let tokens = lex_chunked(&lexer, &pieces).unwrap();
    assert_eq!(texts(&tokens), ["1\u{2152}", " "]);
    assert_eq!(tokens[0].loc.lengths(), [4, 2, 2, 0]);
}

#[test]
fn split_grapheme_cluster() {
    let mut registry = Registry::new();
    let mut rules = RuleSet::new();
    rules
        .define(
            &mut registry,
            "word",
            Pattern::class(Cat::LETTER, 1, None).unwrap(),
            "",
        )
        .unwrap();
    let lexer = Lexer::new(&registry, &rules);
    let pieces = chunks(&[b"ne", "\u{0301}e".as_bytes()]);

    let tokens = lex_chunked(&lexer, &pieces).unwrap();
    assert_eq!(texts(&tokens), ["ne\u{0301}e"]);
    assert_eq!(tokens[0].loc.lengths(), [5, 4, 3, 0]);
}

#[test]
fn empty_buffers_are_skipped() {
    let registry = registry();
    let rules = rules(&registry, TOKEN_RULES);
    let lexer = Lexer::new(&registry, &rules);
    let pieces = chunks(&[b"", b"x", b"", b" =", b""]);

    let tokens = lex_chunked(&lexer, &pieces).unwrap();
    assert_eq!(texts(&tokens), ["x", " ", "="]);
}

#[test]
fn iterator_resumes_after_more() {
    let registry = registry();
    let rules = rules(&registry, TOKEN_RULES);
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::partial("a+ "));

    let first: Vec<_> = lexer.tokens(&mut state).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first[0].as_ref().unwrap().text(), "a");
    assert_eq!(first[1].as_ref().unwrap().text(), "+");
    assert_eq!(first[2].as_ref().unwrap_err().code, ErrorCode::More);

    state.append(Buffer::complete(" b")).unwrap();
    let rest: Vec<_> = lexer.tokens(&mut state).map(Result::unwrap).collect();
    assert_eq!(texts(&rest), ["  ", "b"]);
}

#[test]
fn bad_byte_after_boundary_reports_absolute_offset() {
    let registry = registry();
    let rules = rules(&registry, TOKEN_RULES);
    let lexer = Lexer::new(&registry, &rules);
    let pieces = chunks(&[b"ab", b"c \xFF"]);

    let error = lex_chunked(&lexer, &pieces).unwrap_err();
    assert_eq!(error.code, ErrorCode::BadUtf8);
    assert_eq!(error.offset, Some(4));
}

// === Chain limits ===

#[test]
fn nothing_follows_end_of_input() {
    let mut state = State::new(Settings::default(), Buffer::complete("x"));
    assert_eq!(
        state.append(Buffer::partial("y")).unwrap_err().code,
        ErrorCode::ChainInsert
    );
}

#[test]
fn chain_length_is_bounded() {
    let settings = Settings::default().with_max_buffers(2);
    let mut state = State::new(settings, Buffer::partial("x"));
    state.append(Buffer::partial("y")).unwrap();
    assert_eq!(
        state.append(Buffer::complete("z")).unwrap_err().code,
        ErrorCode::ChainInsert
    );
    assert_eq!(state.chain().len(), 2);
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_chunking {
    use super::common::{lex_all, lex_chunked, registry, rules, TOKEN_RULES};
    use proptest::prelude::*;
    use utf8lex_core::Lexer;

    const WORDS: &[&str] = &[
        "x", "first_name", "h\u{e9}llo", "42", "7", "\u{2152}", "===", "=", "+", "-", " ",
        "   ", "\n", "\r\n",
    ];

    fn split(input: &[u8], mut cuts: Vec<usize>) -> Vec<Vec<u8>> {
        for cut in &mut cuts {
            *cut %= input.len() + 1;
        }
        cuts.sort_unstable();
        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = 0;
        for cut in cuts {
            pieces.push(input[start..cut].to_vec());
            start = cut;
        }
        pieces.push(input[start..].to_vec());
        pieces
    }

    proptest! {
        #[test]
        fn chunking_does_not_change_tokens(
            words in proptest::collection::vec(proptest::sample::select(WORDS), 0..16),
            cuts in proptest::collection::vec(any::<usize>(), 0..8),
        ) {
            let input = words.concat();
            let registry = registry();
            let rules = rules(&registry, TOKEN_RULES);
            let lexer = Lexer::new(&registry, &rules);

            let (whole, _) = lex_all(&registry, &rules, &input);
            let chunked = lex_chunked(&lexer, &split(input.as_bytes(), cuts)).unwrap();
            prop_assert_eq!(chunked, whole);
        }
    }
}
