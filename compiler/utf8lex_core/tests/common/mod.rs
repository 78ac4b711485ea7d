//! Arithmetic grammar shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use utf8lex_core::{
    Buffer, Cat, ErrorCode, LexResult, Lexer, MultiKind, Pattern, Registry, RuleSet, Settings,
    State, Token,
};

/// Token-level rules, highest priority first.
pub const TOKEN_RULES: &[&str] = &[
    "NUMBER", "ID", "EQUALS3", "EQUALS", "PLUS", "MINUS", "SPACE",
];

/// Every definition of the arithmetic grammar, resolved.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .define("NUMBER", Pattern::class(Cat::NUM, 1, None).unwrap())
        .unwrap();
    registry
        .define("ID", Pattern::regex(r"[_\p{L}][_\p{L}\p{N}]*").unwrap())
        .unwrap();
    registry.define("EQUALS3", Pattern::literal("===").unwrap()).unwrap();
    registry.define("EQUALS", Pattern::literal("=").unwrap()).unwrap();
    registry.define("PLUS", Pattern::literal("+").unwrap()).unwrap();
    registry.define("MINUS", Pattern::literal("-").unwrap()).unwrap();
    registry.define("SPACE", Pattern::regex(r"[\s]+").unwrap()).unwrap();

    let multis: [(&str, MultiKind, &[&str]); 4] = [
        (
            "OPERATOR",
            MultiKind::Or,
            &["EQUALS3", "EQUALS", "PLUS", "MINUS"],
        ),
        ("DECLARATION", MultiKind::Sequence, &["ID", "SPACE", "ID"]),
        ("OPERAND", MultiKind::Or, &["NUMBER", "ID"]),
        (
            "EXPRESSION",
            MultiKind::Sequence,
            &["DECLARATION", "OPERATOR", "OPERAND"],
        ),
    ];
    for (name, kind, references) in multis {
        let multi = registry.define(name, Pattern::multi(kind)).unwrap();
        for reference in references {
            registry.add_reference(multi, reference, 1, Some(1)).unwrap();
        }
    }
    registry.resolve().unwrap();
    registry
}

/// Rules for the named top-level definitions, in the given order.
pub fn rules(registry: &Registry, names: &[&str]) -> RuleSet {
    let mut rules = RuleSet::new();
    for name in names {
        let definition = registry.find_by_name(name).unwrap().id;
        rules.add(name, definition, *name).unwrap();
    }
    rules
}

/// Lex all of `input` as one complete buffer. The trailing error is `EOF`
/// unless lexing stopped early.
pub fn lex_all(registry: &Registry, rules: &RuleSet, input: &str) -> (Vec<Token>, ErrorCode) {
    let lexer = Lexer::new(registry, rules);
    let mut state = State::new(Settings::default(), Buffer::complete(input));
    drain(&lexer, &mut state)
}

/// Lex until the first error.
pub fn drain(lexer: &Lexer<'_>, state: &mut State) -> (Vec<Token>, ErrorCode) {
    let mut tokens = Vec::new();
    loop {
        match lexer.lex(state) {
            Ok(token) => tokens.push(token),
            Err(error) => return (tokens, error.code),
        }
    }
}

/// Feed `chunks` one buffer at a time, appending the next one whenever the
/// lexer asks for more. The last chunk is marked as end of input.
pub fn lex_chunked(lexer: &Lexer<'_>, chunks: &[Vec<u8>]) -> LexResult<Vec<Token>> {
    let mut pending = chunks.iter().enumerate();
    let last = chunks.len().saturating_sub(1);
    let first = match pending.next() {
        Some((index, chunk)) => Buffer::new(chunk.clone(), index == last),
        None => Buffer::complete(""),
    };
    let mut state = State::new(Settings::default(), first);
    let mut tokens = Vec::new();
    loop {
        match lexer.lex(&mut state) {
            Ok(token) => tokens.push(token),
            Err(error) if error.is_eof() => return Ok(tokens),
            Err(error) if error.is_more() => {
                let (index, chunk) = pending.next().ok_or(error)?;
                state.append(Buffer::new(chunk.clone(), index == last))?;
            }
            Err(error) => return Err(error),
        }
    }
}
