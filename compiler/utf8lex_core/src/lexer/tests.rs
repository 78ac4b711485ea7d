use super::*;
use crate::buffer::Buffer;
use crate::cat::Cat;
use crate::definition::Pattern;
use crate::location::Unit;
use crate::rule::RuleId;
use crate::settings::Settings;
use pretty_assertions::assert_eq;

fn grammar() -> (Registry, RuleSet) {
    let mut registry = Registry::new();
    let mut rules = RuleSet::new();
    rules
        .define(&mut registry, "number", Pattern::regex("[0-9]+").unwrap(), "")
        .unwrap();
    rules
        .define(&mut registry, "id", Pattern::class(Cat::LETTER, 1, None).unwrap(), "")
        .unwrap();
    rules
        .define(
            &mut registry,
            "space",
            Pattern::class(Cat::WHITESPACE | Cat::NEWLINE, 1, None).unwrap(),
            "",
        )
        .unwrap();
    rules
        .define(&mut registry, "equals", Pattern::literal("=").unwrap(), "")
        .unwrap();
    registry.resolve().unwrap();
    (registry, rules)
}

fn names_and_texts(lexer: &Lexer<'_>, state: &mut State) -> Vec<(String, String)> {
    lexer
        .tokens(state)
        .map(|token| {
            let token = token.unwrap();
            (token.name.to_string(), token.text().into_owned())
        })
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(name, text)| ((*name).to_owned(), (*text).to_owned()))
        .collect()
}

// === Single buffer ===

#[test]
fn lexes_whole_buffer_then_eof() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("x = 42"));

    assert_eq!(
        names_and_texts(&lexer, &mut state),
        pairs(&[
            ("id", "x"),
            ("space", " "),
            ("equals", "="),
            ("space", " "),
            ("number", "42"),
        ])
    );
    assert_eq!(lexer.lex(&mut state).unwrap_err().code, ErrorCode::Eof);
    assert_eq!(state.loc().next_starts(), [6, 6, 6, 0]);
}

#[test]
fn earlier_rule_wins() {
    let mut registry = Registry::new();
    let mut rules = RuleSet::new();
    rules
        .define(&mut registry, "keyword", Pattern::literal("let").unwrap(), "")
        .unwrap();
    rules
        .define(&mut registry, "id", Pattern::class(Cat::LETTER, 1, None).unwrap(), "")
        .unwrap();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("letter"));

    let token = lexer.lex(&mut state).unwrap();
    assert_eq!((&*token.name, token.len()), ("keyword", 3));
}

#[test]
fn zero_length_match_falls_through() {
    let mut registry = Registry::new();
    let mut rules = RuleSet::new();
    rules
        .define(&mut registry, "maybe", Pattern::class(Cat::NUM, 0, None).unwrap(), "")
        .unwrap();
    rules
        .define(&mut registry, "id", Pattern::class(Cat::LETTER, 1, None).unwrap(), "")
        .unwrap();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("ab"));

    let token = lexer.lex(&mut state).unwrap();
    assert_eq!(&*token.name, "id");
    assert_eq!(token.rule, RuleId::new(1));
}

#[test]
fn tracks_lines_and_columns() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("ab\n  cd"));

    let tokens: Vec<Token> = lexer.tokens(&mut state).map(Result::unwrap).collect();
    let cd = &tokens[2];
    assert_eq!(cd.text(), "cd");
    assert_eq!(cd.loc[Unit::Byte].start, 5);
    assert_eq!(cd.loc[Unit::Char].start, 2);
    assert_eq!(cd.loc[Unit::Grapheme].start, 2);
    assert_eq!(cd.loc[Unit::Line].start, 1);
}

#[test]
fn action_is_reachable_from_token() {
    let mut registry = Registry::new();
    let mut rules = RuleSet::new();
    rules
        .define(&mut registry, "word", Pattern::class(Cat::LETTER, 1, None).unwrap(), "emit")
        .unwrap();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("w"));

    let token = lexer.lex(&mut state).unwrap();
    assert_eq!(rules.get(token.rule).unwrap().action, b"emit".to_vec());
}

// === Errors ===

#[test]
fn no_match_reports_absolute_offset() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("ab +"));

    lexer.lex(&mut state).unwrap();
    lexer.lex(&mut state).unwrap();
    let error = lexer.lex(&mut state).unwrap_err();
    assert_eq!(error.code, ErrorCode::NoMatch);
    assert_eq!(error.offset, Some(3));
    // Nothing was consumed by the failed call.
    assert_eq!(state.loc().next_starts()[0], 3);
}

#[test]
fn bad_utf8_reports_absolute_offset() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::partial("ab "));
    state.append(Buffer::complete(&b"\xFFcd"[..])).unwrap();

    assert_eq!(lexer.lex(&mut state).unwrap().text(), "ab");
    // The space ends at the bad byte instead of failing on it.
    assert_eq!(lexer.lex(&mut state).unwrap().text(), " ");
    let error = lexer.lex(&mut state).unwrap_err();
    assert_eq!(error.code, ErrorCode::BadUtf8);
    assert_eq!(error.offset, Some(3));
}

#[test]
fn cleared_state_is_state_error() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::complete("x"));
    state.clear();
    assert_eq!(lexer.lex(&mut state).unwrap_err().code, ErrorCode::State);
}

// === Buffer chain ===

#[test]
fn open_buffer_end_asks_for_more() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::partial("x = 4"));

    let mut seen = Vec::new();
    let error = loop {
        match lexer.lex(&mut state) {
            Ok(token) => seen.push(token.text().into_owned()),
            Err(error) => break error,
        }
    };
    assert_eq!(error.code, ErrorCode::More);
    assert_eq!(seen, vec!["x", " ", "=", " "]);

    state.append(Buffer::complete("2;")).unwrap();
    let token = lexer.lex(&mut state).unwrap();
    assert_eq!(token.text(), "42");
    assert_eq!(token.loc[Unit::Byte].start, 4);
    assert_eq!(
        lexer.lex(&mut state).unwrap_err().offset,
        Some(6),
        "`;` matches no rule"
    );
}

#[test]
fn token_spanning_queued_buffers_is_spliced() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::partial("fir"));
    state.append(Buffer::partial("st")).unwrap();
    state.append(Buffer::complete(" 7")).unwrap();

    let tokens: Vec<Token> = lexer.tokens(&mut state).map(Result::unwrap).collect();
    let texts: Vec<String> = tokens.iter().map(|t| t.text().into_owned()).collect();
    assert_eq!(texts, vec!["first", " ", "7"]);
    assert_eq!(tokens[2].loc[Unit::Byte].start, 6);

    let buffers: Vec<&[u8]> = state.chain().iter().map(Buffer::bytes).collect();
    assert_eq!(buffers, vec![&b""[..], &b""[..], &b"first 7"[..]]);
}

#[test]
fn exhausted_buffers_hand_over() {
    let (registry, rules) = grammar();
    let lexer = Lexer::new(&registry, &rules);
    let mut state = State::new(Settings::default(), Buffer::partial("ab "));
    state.append(Buffer::partial("")).unwrap();
    state.append(Buffer::complete("cd")).unwrap();

    assert_eq!(
        names_and_texts(&lexer, &mut state),
        pairs(&[("id", "ab"), ("space", " "), ("id", "cd")])
    );
    assert_eq!(state.chain().current_index(), 2);
}
