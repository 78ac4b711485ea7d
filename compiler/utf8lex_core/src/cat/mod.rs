//! Unicode general categories as a 32-bit set.
//!
//! Bits 0-29 mirror the 30 general categories, bit 30 is the `NEWLINE`
//! extension set by the grapheme reader on line-break clusters. Groups
//! (`LETTER`, `NUM`, ...) are unions of base bits.
//!
//! # Textual form
//!
//! ```text
//! NUM | UPPER | NEWLINE
//! ```
//!
//! [`format_cat`] always emits the shortest expression: a group name replaces
//! its members whenever every member is present. [`parse_cat`] accepts any
//! mix of base and group names separated by `|`.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use smallvec::SmallVec;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::{ErrorCode, LexError, LexResult};

bitflags! {
    /// A set of Unicode general categories.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Cat: u32 {
        // === Letters ===
        const UPPER = 1 << 0;
        const LOWER = 1 << 1;
        const TITLE = 1 << 2;
        const MODIFIER_LETTER = 1 << 3;
        const OTHER_LETTER = 1 << 4;

        // === Marks ===
        const NON_SPACING = 1 << 5;
        /// Spacing combining mark (`Mc`).
        const SC = 1 << 6;
        /// Enclosing mark (`Me`).
        const ME = 1 << 7;

        // === Numbers ===
        const DECIMAL = 1 << 8;
        const NUM_LETTER = 1 << 9;
        const NUM_OTHER = 1 << 10;

        // === Punctuation ===
        const CONNECTOR = 1 << 11;
        const DASH = 1 << 12;
        const OPEN = 1 << 13;
        const CLOSE = 1 << 14;
        const QUOTE_OPEN = 1 << 15;
        const QUOTE_CLOSE = 1 << 16;
        const PUNCT_OTHER = 1 << 17;

        // === Symbols ===
        const MATH = 1 << 18;
        const CURRENCY = 1 << 19;
        const SYM_MODIFIER = 1 << 20;
        const SYM_OTHER = 1 << 21;

        // === Separators ===
        const SPACE = 1 << 22;
        const SEP_LINE = 1 << 23;
        const SEP_PARAGRAPH = 1 << 24;

        // === Other ===
        const CONTROL = 1 << 25;
        const FORMAT = 1 << 26;
        const SURROGATE = 1 << 27;
        const PRIVATE = 1 << 28;
        /// Unassigned (`Cn`).
        const NA = 1 << 29;

        // === Extension ===
        /// Any line-break grapheme: LF, CR, CRLF, NEL, LS, PS, FF, VT.
        const NEWLINE = 1 << 30;

        // === Groups ===
        const OTHER = Self::CONTROL.bits()
            | Self::FORMAT.bits()
            | Self::SURROGATE.bits()
            | Self::PRIVATE.bits()
            | Self::NA.bits();
        const LETTER = Self::UPPER.bits()
            | Self::LOWER.bits()
            | Self::TITLE.bits()
            | Self::MODIFIER_LETTER.bits()
            | Self::OTHER_LETTER.bits();
        const MARK = Self::NON_SPACING.bits() | Self::SC.bits() | Self::ME.bits();
        const NUM = Self::DECIMAL.bits() | Self::NUM_LETTER.bits() | Self::NUM_OTHER.bits();
        const PUNCT = Self::CONNECTOR.bits()
            | Self::DASH.bits()
            | Self::OPEN.bits()
            | Self::CLOSE.bits()
            | Self::QUOTE_OPEN.bits()
            | Self::QUOTE_CLOSE.bits()
            | Self::PUNCT_OTHER.bits();
        const SYM = Self::MATH.bits()
            | Self::CURRENCY.bits()
            | Self::SYM_MODIFIER.bits()
            | Self::SYM_OTHER.bits();
        const WHITESPACE = Self::SPACE.bits()
            | Self::SEP_LINE.bits()
            | Self::SEP_PARAGRAPH.bits();
    }
}

/// Base names in bit order.
const BASE_NAMES: [(&str, Cat); 31] = [
    ("UPPER", Cat::UPPER),
    ("LOWER", Cat::LOWER),
    ("TITLE", Cat::TITLE),
    ("MODIFIER_LETTER", Cat::MODIFIER_LETTER),
    ("OTHER_LETTER", Cat::OTHER_LETTER),
    ("NON_SPACING", Cat::NON_SPACING),
    ("SC", Cat::SC),
    ("ME", Cat::ME),
    ("DECIMAL", Cat::DECIMAL),
    ("NUM_LETTER", Cat::NUM_LETTER),
    ("NUM_OTHER", Cat::NUM_OTHER),
    ("CONNECTOR", Cat::CONNECTOR),
    ("DASH", Cat::DASH),
    ("OPEN", Cat::OPEN),
    ("CLOSE", Cat::CLOSE),
    ("QUOTE_OPEN", Cat::QUOTE_OPEN),
    ("QUOTE_CLOSE", Cat::QUOTE_CLOSE),
    ("PUNCT_OTHER", Cat::PUNCT_OTHER),
    ("MATH", Cat::MATH),
    ("CURRENCY", Cat::CURRENCY),
    ("SYM_MODIFIER", Cat::SYM_MODIFIER),
    ("SYM_OTHER", Cat::SYM_OTHER),
    ("SPACE", Cat::SPACE),
    ("SEP_LINE", Cat::SEP_LINE),
    ("SEP_PARAGRAPH", Cat::SEP_PARAGRAPH),
    ("CONTROL", Cat::CONTROL),
    ("FORMAT", Cat::FORMAT),
    ("SURROGATE", Cat::SURROGATE),
    ("PRIVATE", Cat::PRIVATE),
    ("NA", Cat::NA),
    ("NEWLINE", Cat::NEWLINE),
];

/// Group names, emitted before any base name when formatting.
const GROUP_NAMES: [(&str, Cat); 7] = [
    ("OTHER", Cat::OTHER),
    ("LETTER", Cat::LETTER),
    ("MARK", Cat::MARK),
    ("NUM", Cat::NUM),
    ("PUNCT", Cat::PUNCT),
    ("SYM", Cat::SYM),
    ("WHITESPACE", Cat::WHITESPACE),
];

/// Separator emitted between names by [`format_cat`].
const SEPARATOR: &str = " | ";

impl Cat {
    /// General category of a code point.
    pub fn of(c: char) -> Cat {
        category_of(c)
    }
}

/// General category of a code point, as a single-bit [`Cat`].
#[allow(
    unreachable_patterns,
    reason = "GeneralCategory may gain variants in future Unicode versions"
)]
pub fn category_of(c: char) -> Cat {
    match get_general_category(c) {
        GeneralCategory::UppercaseLetter => Cat::UPPER,
        GeneralCategory::LowercaseLetter => Cat::LOWER,
        GeneralCategory::TitlecaseLetter => Cat::TITLE,
        GeneralCategory::ModifierLetter => Cat::MODIFIER_LETTER,
        GeneralCategory::OtherLetter => Cat::OTHER_LETTER,
        GeneralCategory::NonspacingMark => Cat::NON_SPACING,
        GeneralCategory::SpacingMark => Cat::SC,
        GeneralCategory::EnclosingMark => Cat::ME,
        GeneralCategory::DecimalNumber => Cat::DECIMAL,
        GeneralCategory::LetterNumber => Cat::NUM_LETTER,
        GeneralCategory::OtherNumber => Cat::NUM_OTHER,
        GeneralCategory::ConnectorPunctuation => Cat::CONNECTOR,
        GeneralCategory::DashPunctuation => Cat::DASH,
        GeneralCategory::OpenPunctuation => Cat::OPEN,
        GeneralCategory::ClosePunctuation => Cat::CLOSE,
        GeneralCategory::InitialPunctuation => Cat::QUOTE_OPEN,
        GeneralCategory::FinalPunctuation => Cat::QUOTE_CLOSE,
        GeneralCategory::OtherPunctuation => Cat::PUNCT_OTHER,
        GeneralCategory::MathSymbol => Cat::MATH,
        GeneralCategory::CurrencySymbol => Cat::CURRENCY,
        GeneralCategory::ModifierSymbol => Cat::SYM_MODIFIER,
        GeneralCategory::OtherSymbol => Cat::SYM_OTHER,
        GeneralCategory::SpaceSeparator => Cat::SPACE,
        GeneralCategory::LineSeparator => Cat::SEP_LINE,
        GeneralCategory::ParagraphSeparator => Cat::SEP_PARAGRAPH,
        GeneralCategory::Control => Cat::CONTROL,
        GeneralCategory::Format => Cat::FORMAT,
        GeneralCategory::Surrogate => Cat::SURROGATE,
        GeneralCategory::PrivateUse => Cat::PRIVATE,
        GeneralCategory::Unassigned => Cat::NA,
        _ => Cat::NA,
    }
}

/// Render a category set as the shortest `A | B | C` expression.
///
/// Groups come first (in `OTHER, LETTER, MARK, NUM, PUNCT, SYM, WHITESPACE`
/// order), then leftover base names in bit order. The empty set renders as
/// an empty string.
pub fn format_cat(cat: Cat) -> String {
    let mut remaining = cat;
    let mut names: SmallVec<[&'static str; 8]> = SmallVec::new();

    for (name, group) in GROUP_NAMES {
        if remaining.contains(group) {
            names.push(name);
            remaining.remove(group);
        }
    }
    for (name, base) in BASE_NAMES {
        if remaining.contains(base) {
            names.push(name);
        }
    }

    names.join(SEPARATOR)
}

/// Parse an `A | B | C` category expression.
///
/// Names are case-sensitive. Empty expressions, empty operands (`A | | B`)
/// and trailing separators fail with `CAT`.
pub fn parse_cat(text: &str) -> LexResult<Cat> {
    if text.trim().is_empty() {
        return Err(LexError::with_detail(ErrorCode::Cat, "empty category expression"));
    }

    let mut cat = Cat::empty();
    for operand in text.split('|') {
        let name = operand.trim();
        if name.is_empty() {
            return Err(LexError::with_detail(
                ErrorCode::Cat,
                format!("missing category name in \"{text}\""),
            ));
        }
        cat |= lookup_name(name).ok_or_else(|| {
            LexError::with_detail(ErrorCode::Cat, format!("unknown category \"{name}\""))
        })?;
    }
    Ok(cat)
}

fn lookup_name(name: &str) -> Option<Cat> {
    GROUP_NAMES
        .iter()
        .chain(BASE_NAMES.iter())
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, cat)| cat)
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cat(*self))
    }
}

impl FromStr for Cat {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cat(s)
    }
}
