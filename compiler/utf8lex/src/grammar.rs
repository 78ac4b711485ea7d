//! Built-in demonstration grammar.
//!
//! Numbers, identifiers, a few operators and whitespace, plus multi-
//! definitions that combine them into `<type> <name> <op> <operand>`
//! expressions. The expression rule is tried first; everything else falls
//! back to single tokens.

use utf8lex_core::{Cat, LexResult, Lexer, MultiKind, Pattern, Registry, RuleSet};

/// A resolved registry and the rules over it.
#[derive(Clone, Debug)]
pub struct Grammar {
    registry: Registry,
    rules: RuleSet,
}

/// Top-level rules in priority order.
const RULES: &[&str] = &[
    "EXPRESSION",
    "NUMBER",
    "ID",
    "EQUALS3",
    "EQUALS",
    "PLUS",
    "MINUS",
    "SPACE",
];

const MULTIS: &[(&str, MultiKind, &[&str])] = &[
    ("OPERATOR", MultiKind::Or, &["EQUALS3", "EQUALS", "PLUS", "MINUS"]),
    ("DECLARATION", MultiKind::Sequence, &["ID", "SPACE", "ID"]),
    ("OPERAND", MultiKind::Or, &["NUMBER", "ID"]),
    (
        "EXPRESSION",
        MultiKind::Sequence,
        &["DECLARATION", "OPERATOR", "OPERAND"],
    ),
];

impl Grammar {
    pub fn demo() -> LexResult<Self> {
        let mut registry = Registry::new();
        registry.define("NUMBER", Pattern::class(Cat::NUM, 1, None)?)?;
        registry.define("ID", Pattern::regex(r"[_\p{L}][_\p{L}\p{N}]*")?)?;
        registry.define("EQUALS3", Pattern::literal("===")?)?;
        registry.define("EQUALS", Pattern::literal("=")?)?;
        registry.define("PLUS", Pattern::literal("+")?)?;
        registry.define("MINUS", Pattern::literal("-")?)?;
        registry.define("SPACE", Pattern::regex(r"[\s]+")?)?;

        for &(name, kind, references) in MULTIS {
            let multi = registry.define(name, Pattern::multi(kind))?;
            for reference in references {
                registry.add_reference(multi, reference, 1, Some(1))?;
            }
        }
        registry.resolve()?;

        let mut rules = RuleSet::new();
        for name in RULES {
            let definition = registry.find_by_name(name)?.id;
            rules.add(name, definition, name.to_ascii_lowercase())?;
        }
        Ok(Grammar { registry, rules })
    }

    pub fn lexer(&self) -> Lexer<'_> {
        Lexer::new(&self.registry, &self.rules)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
