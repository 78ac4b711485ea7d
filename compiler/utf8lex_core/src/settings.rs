//! Per-session lexer configuration.

use crate::buffer::MAX_BUFFERS;

/// Default bound on multi-definition nesting during one match.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 64;

/// Default bound on repetitions of a single unbounded reference.
pub const DEFAULT_MAX_REPETITIONS: usize = 1 << 20;

/// Lexer settings, fixed for the lifetime of a [`State`](crate::State).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Multi-definitions nested deeper than this fail with `INFINITE_LOOP`.
    pub max_stack_depth: usize,
    /// Buffers beyond this fail to append with `CHAIN_INSERT`.
    pub max_buffers: usize,
    /// Hard stop for `(min, unbounded)` references inside sequences.
    pub max_repetitions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            max_buffers: MAX_BUFFERS,
            max_repetitions: DEFAULT_MAX_REPETITIONS,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_buffers(mut self, buffers: usize) -> Self {
        self.max_buffers = buffers;
        self
    }

    #[must_use]
    pub fn with_max_repetitions(mut self, repetitions: usize) -> Self {
        self.max_repetitions = repetitions;
        self
    }
}
