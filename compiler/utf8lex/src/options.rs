//! Driver options shared by the commands.

use utf8lex_core::Settings;

/// Bytes per buffer when `--chunk` is not given.
pub const DEFAULT_CHUNK: usize = 64 * 1024;

/// Options collected from the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Bytes per appended buffer.
    pub chunk: Option<usize>,
    /// Override for [`Settings::max_stack_depth`].
    pub max_depth: Option<usize>,
    /// Print only errors and the summary line.
    pub quiet: bool,
}

impl Options {
    /// Bytes per buffer; never 0.
    pub fn chunk_size(&self) -> usize {
        self.chunk.filter(|&size| size > 0).unwrap_or(DEFAULT_CHUNK)
    }

    /// Lexer settings for an input of `len` bytes. The buffer chain is sized
    /// to hold every chunk.
    pub fn settings(&self, len: usize) -> Settings {
        let mut settings = Settings::default();
        if let Some(depth) = self.max_depth {
            settings = settings.with_max_stack_depth(depth);
        }
        let chunks = len / self.chunk_size() + 2;
        if chunks > settings.max_buffers {
            settings = settings.with_max_buffers(chunks);
        }
        settings
    }
}

/// Split `args` into options and positional arguments.
///
/// Unknown or malformed options are reported and ignored.
pub fn parse_options(args: &[String]) -> (Options, Vec<String>) {
    let mut options = Options::default();
    let mut positional = Vec::new();

    for arg in args {
        if let Some(size) = arg.strip_prefix("--chunk=") {
            match size.parse::<usize>() {
                Ok(size) if size > 0 => options.chunk = Some(size),
                _ => eprintln!("warning: invalid chunk size '{size}', using {DEFAULT_CHUNK}"),
            }
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            match depth.parse::<usize>() {
                Ok(depth) => options.max_depth = Some(depth),
                Err(_) => eprintln!("warning: invalid depth '{depth}', using the default"),
            }
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg == "-" || !arg.starts_with('-') {
            positional.push(arg.clone());
        } else {
            eprintln!("warning: unknown option '{arg}'");
        }
    }

    (options, positional)
}
