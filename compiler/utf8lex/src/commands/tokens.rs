//! `utf8lex tokens`: lex inputs with the demonstration grammar.
//!
//! Input is fed to the lexer in chunks of [`Options::chunk_size`] bytes, one
//! buffer per chunk, so tokens that straddle chunk boundaries go through the
//! same `MORE` and append cycle as a streaming caller.

use std::fmt::Write;

use ariadne::{Config, Label, Report, ReportKind, Source};
use rayon::prelude::*;
use tracing::debug;
use utf8lex_core::{printable, Buffer, ErrorCode, LexError, PrintableFlags, State, Token};

use super::read_input;
use crate::grammar::Grammar;
use crate::options::Options;

/// Tokens read from one input, and the error that stopped lexing early.
#[derive(Debug)]
pub struct LexOutcome {
    pub tokens: Vec<Token>,
    pub error: Option<LexError>,
}

/// Lex all of `source`, appending one chunk whenever the lexer asks for more.
pub fn lex_source(grammar: &Grammar, source: &[u8], options: &Options) -> LexOutcome {
    let mut chunks = source.chunks(options.chunk_size());
    let first = chunks.next().unwrap_or_default();
    let mut state = State::new(
        options.settings(source.len()),
        Buffer::new(first, chunks.len() == 0),
    );
    let lexer = grammar.lexer();
    let mut tokens = Vec::new();

    let error = loop {
        match lexer.lex(&mut state) {
            Ok(token) => tokens.push(token),
            Err(error) if error.is_eof() => break None,
            Err(error) if error.is_more() => {
                let Some(chunk) = chunks.next() else {
                    break Some(error);
                };
                if let Err(error) = state.append(Buffer::new(chunk, chunks.len() == 0)) {
                    break Some(error);
                }
            }
            Err(error) => break Some(error),
        }
    };
    debug!(
        tokens = tokens.len(),
        buffers = state.chain().len(),
        "lexed input"
    );
    LexOutcome { tokens, error }
}

/// One line per token, sub-tokens indented below their parent.
pub fn render_tokens(tokens: &[Token], out: &mut String) {
    fn render(token: &Token, depth: usize, out: &mut String) {
        let text = printable(&token.bytes, PrintableFlags::DOUBLE_QUOTE);
        let _ = writeln!(
            out,
            "{:indent$}{} \"{text}\" ({})",
            "",
            token.name,
            token.loc,
            indent = depth * 2
        );
        for sub in &token.sub_tokens {
            render(sub, depth + 1, out);
        }
    }

    for token in tokens {
        render(token, 0, out);
    }
}

/// A source diagnostic pointing at the byte `error` refers to.
pub fn render_diagnostic(path: &str, source: &[u8], error: &LexError) -> String {
    let offset = error.offset.unwrap_or(source.len()).min(source.len());
    // Diagnostic spans count characters of the lossily decoded text.
    let start = String::from_utf8_lossy(&source[..offset]).chars().count();
    let end = if offset < source.len() { start + 1 } else { start };
    let label = match error.code {
        ErrorCode::NoMatch => "no rule matches here",
        ErrorCode::BadUtf8 => "invalid UTF-8",
        ErrorCode::More => "input ends inside a token",
        _ => "lexing stopped here",
    };

    let report = Report::build(ReportKind::Error, path, start)
        .with_config(Config::default().with_color(false))
        .with_code(error.code)
        .with_message(error.to_string())
        .with_label(Label::new((path, start..end)).with_message(label))
        .finish();
    let mut out = Vec::new();
    let text = String::from_utf8_lossy(source).into_owned();
    if report.write((path, Source::from(text)), &mut out).is_err() {
        return error.to_string();
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Lex every path in parallel and print the results in argument order.
///
/// Returns `false` if any input failed to read or lex.
pub fn lex_files(paths: &[String], options: &Options) -> bool {
    let grammar = match Grammar::demo() {
        Ok(grammar) => grammar,
        Err(error) => {
            eprintln!("error: demonstration grammar: {error}");
            return false;
        }
    };

    let results: Vec<Result<(Vec<u8>, LexOutcome), String>> = paths
        .par_iter()
        .map(|path| {
            let source = read_input(path)?;
            let outcome = lex_source(&grammar, &source, options);
            Ok((source, outcome))
        })
        .collect();

    let mut ok = true;
    for (path, result) in paths.iter().zip(results) {
        let (source, outcome) = match result {
            Ok(read) => read,
            Err(message) => {
                eprintln!("error: {message}");
                ok = false;
                continue;
            }
        };
        if !options.quiet {
            let mut out = String::new();
            if paths.len() > 1 {
                let _ = writeln!(out, "==> {path} <==");
            }
            render_tokens(&outcome.tokens, &mut out);
            print!("{out}");
        }
        if let Some(error) = &outcome.error {
            eprint!("{}", render_diagnostic(path, &source, error));
            ok = false;
        }
        println!("{path}: {} tokens", outcome.tokens.len());
    }
    ok
}
