//! utf8lex CLI
//!
//! Token dumps with the demonstration grammar, category expressions and
//! grapheme breakdowns.

use utf8lex::commands::{format_category, lex_files, read_input, render_graphemes};
use utf8lex::{init_tracing, parse_options};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "tokens" => {
            let (options, paths) = parse_options(&args[2..]);
            if paths.is_empty() {
                eprintln!("Usage: utf8lex tokens [options] <file|->...");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --chunk=<n>       Feed input in n-byte buffers (default: 64 KiB)");
                eprintln!("  --max-depth=<n>   Multi-definition nesting limit (default: 64)");
                eprintln!("  -q, --quiet       Print only errors and token counts");
                std::process::exit(1);
            }
            if !lex_files(&paths, &options) {
                std::process::exit(1);
            }
        }
        "cat" => {
            if args.len() < 3 {
                eprintln!("Usage: utf8lex cat <expr>");
                eprintln!();
                eprintln!("Example: utf8lex cat 'UPPER | LOWER | DECIMAL'");
                std::process::exit(1);
            }
            match format_category(&args[2..].join(" ")) {
                Ok(text) => println!("{text}"),
                Err(error) => {
                    eprintln!("error: {error}");
                    std::process::exit(1);
                }
            }
        }
        "graphemes" => {
            if args.len() < 3 {
                eprintln!("Usage: utf8lex graphemes <file|->");
                std::process::exit(1);
            }
            let source = match read_input(&args[2]) {
                Ok(source) => source,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            match render_graphemes(&source) {
                Ok(text) => print!("{text}"),
                Err(error) => {
                    eprintln!("error: {error}");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("utf8lex {}", env!("CARGO_PKG_VERSION")),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("utf8lex - Unicode-aware lexer");
    println!();
    println!("Usage: utf8lex <command> [args]");
    println!();
    println!("Commands:");
    println!("  tokens <file|->...   Lex with the demonstration grammar");
    println!("  cat <expr>           Normalize a category expression");
    println!("  graphemes <file|->   List grapheme clusters with their categories");
    println!("  help                 Show this message");
    println!("  version              Show version information");
    println!();
    println!("Set RUST_LOG=utf8lex_core=trace to trace matching.");
}
