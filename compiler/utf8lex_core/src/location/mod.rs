//! Four-unit location records.
//!
//! Every token, buffer and state carries one [`Location`] per [`Unit`]:
//! bytes, code points, grapheme clusters and lines are tracked side by side.
//!
//! # `after`
//!
//! Char and grapheme positions restart at 0 after a line break. A record
//! that consumed a line break carries `after = Some(n)`, where `n` is the
//! number of chars (or graphemes) consumed since that line break. The next
//! record then starts at `after` instead of `start + length`.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{ErrorCode, LexError, LexResult};
use crate::grapheme::Grapheme;

/// Number of tracked units.
pub const UNIT_COUNT: usize = 4;

/// Position unit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Unit {
    Byte = 0,
    Char = 1,
    Grapheme = 2,
    Line = 3,
}

impl Unit {
    pub const ALL: [Unit; UNIT_COUNT] = [Unit::Byte, Unit::Char, Unit::Grapheme, Unit::Line];

    /// Index into a [`Locations`] array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Byte => "byte",
            Unit::Char => "char",
            Unit::Grapheme => "grapheme",
            Unit::Line => "line",
        }
    }
}

impl TryFrom<usize> for Unit {
    type Error = LexError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Unit::ALL
            .get(index)
            .copied()
            .ok_or_else(|| LexError::with_detail(ErrorCode::Unit, format!("no unit #{index}")))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position record in a single unit.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Location {
    /// First position covered (inclusive).
    pub start: usize,
    /// Number of units covered.
    pub length: usize,
    /// Effective start of whatever follows, when a line break reset it.
    pub after: Option<usize>,
    /// Wrapping sum over the consumed content.
    pub hash: u64,
}

impl Location {
    /// Zero-length record at `start`.
    #[inline]
    pub const fn at(start: usize) -> Self {
        Location {
            start,
            length: 0,
            after: None,
            hash: 0,
        }
    }

    /// Where the next record in this unit begins.
    #[inline]
    pub fn next_start(&self) -> usize {
        self.after.unwrap_or(self.start + self.length)
    }

    /// Check the record against the length of the text it indexes.
    pub fn validate(&self, limit: usize) -> LexResult<()> {
        if self.start > limit {
            return Err(LexError::at(ErrorCode::BadStart, self.start));
        }
        if self.start + self.length > limit {
            return Err(LexError::at(ErrorCode::BadLength, self.start + self.length));
        }
        Ok(())
    }

    fn add(&mut self, length: usize, hash: u64) {
        self.length += length;
        self.hash = self.hash.wrapping_add(hash);
        if let Some(after) = self.after.as_mut() {
            *after += length;
        }
    }

    /// Append a record that directly follows this one.
    fn extend(&mut self, next: &Location) {
        self.after = match (next.after, self.after) {
            (Some(after), _) => Some(after),
            (None, Some(after)) => Some(after + next.length),
            (None, None) => None,
        };
        self.length += next.length;
        self.hash = self.hash.wrapping_add(next.hash);
    }
}

/// One [`Location`] per [`Unit`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Locations([Location; UNIT_COUNT]);

impl Locations {
    /// All units zero-length at position 0.
    pub const ORIGIN: Locations = Locations([Location::at(0); UNIT_COUNT]);

    /// Zero-length records at the given per-unit starts.
    pub const fn starting_at(starts: [usize; UNIT_COUNT]) -> Self {
        Locations([
            Location::at(starts[0]),
            Location::at(starts[1]),
            Location::at(starts[2]),
            Location::at(starts[3]),
        ])
    }

    /// Zero-length records positioned right after these ones.
    pub fn following(&self) -> Locations {
        Locations::starting_at(self.next_starts())
    }

    /// Per-unit [`Location::next_start`].
    pub fn next_starts(&self) -> [usize; UNIT_COUNT] {
        [
            self.0[0].next_start(),
            self.0[1].next_start(),
            self.0[2].next_start(),
            self.0[3].next_start(),
        ]
    }

    /// Per-unit lengths.
    pub fn lengths(&self) -> [usize; UNIT_COUNT] {
        [
            self.0[0].length,
            self.0[1].length,
            self.0[2].length,
            self.0[3].length,
        ]
    }

    /// Per-unit hashes.
    pub fn hashes(&self) -> [u64; UNIT_COUNT] {
        [self.0[0].hash, self.0[1].hash, self.0[2].hash, self.0[3].hash]
    }

    /// Byte length, the unit used for slicing.
    #[inline]
    pub fn bytes(&self) -> usize {
        self.0[Unit::Byte.index()].length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes() == 0
    }

    /// Account for one grapheme cluster.
    ///
    /// Line-break clusters bump the line count and reset `after` for chars
    /// and graphemes to 0; every later cluster pushes a set `after` forward.
    pub fn record(&mut self, grapheme: &Grapheme) {
        let cp = u64::from(u32::from(grapheme.codepoint));
        let reset = grapheme.is_line_break();

        self[Unit::Byte].add(grapheme.bytes, grapheme.byte_sum);
        self[Unit::Char].add(grapheme.chars, grapheme.char_sum);
        self[Unit::Grapheme].add(1, cp);
        if reset {
            self[Unit::Char].after = Some(0);
            self[Unit::Grapheme].after = Some(0);
            self[Unit::Line].add(1, cp);
        }
    }

    /// Append records that directly follow these ones.
    pub fn extend(&mut self, next: &Locations) {
        for unit in Unit::ALL {
            self[unit].extend(&next[unit]);
        }
    }
}

impl Index<Unit> for Locations {
    type Output = Location;

    #[inline]
    fn index(&self, unit: Unit) -> &Location {
        &self.0[unit.index()]
    }
}

impl IndexMut<Unit> for Locations {
    #[inline]
    fn index_mut(&mut self, unit: Unit) -> &mut Location {
        &mut self.0[unit.index()]
    }
}

impl fmt::Display for Locations {
    /// `byte 3+2, char 3+2, grapheme 3+2, line 0+0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, unit) in Unit::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let loc = &self[*unit];
            write!(f, "{} {}+{}", unit, loc.start, loc.length)?;
            if let Some(after) = loc.after {
                write!(f, "->{after}")?;
            }
        }
        Ok(())
    }
}
