use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::constants::{FractionUnits, PRECISION_TABLE};

/// Sub-second precision requested by a fraction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Milli,
    Micro,
    Nano,
}

impl Precision {
    /// Maps a suffix character to its precision class.
    pub fn from_suffix(ch: char) -> Option<Self> {
        match ch {
            '3' => Some(Self::Milli),
            '6' => Some(Self::Micro),
            '9' => Some(Self::Nano),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Milli => 0,
            Self::Micro => 1,
            Self::Nano => 2,
        }
    }

    /// Number of digits the fraction is rendered with.
    pub fn width(self) -> usize {
        PRECISION_TABLE[self.index()].0
    }

    /// Divisor applied to the nanosecond value.
    pub fn divisor(self) -> u32 {
        PRECISION_TABLE[self.index()].1
    }

    pub fn unit(self) -> FractionUnits {
        match self {
            Self::Milli => FractionUnits::MILLISECOND,
            Self::Micro => FractionUnits::MICROSECOND,
            Self::Nano => FractionUnits::NANOSECOND,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Milli => "milli",
            Self::Micro => "micro",
            Self::Nano => "nano",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// Text handed to the calendar renderer untouched.
    Literal(&'a str),
    /// `%f` with an optional `3`, `6` or `9` suffix.
    Fraction(Precision),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind<'a>,
    /// Byte range of the segment in the source pattern.
    pub span: Range<usize>,
}

impl<'a> Segment<'a> {
    pub fn literal(text: &'a str, start: usize) -> Self {
        Self {
            kind: SegmentKind::Literal(text),
            span: start..start + text.len(),
        }
    }

    pub fn precision(&self) -> Option<Precision> {
        match self.kind {
            SegmentKind::Fraction(precision) => Some(precision),
            SegmentKind::Literal(_) => None,
        }
    }

    /// Source text covered by the segment.
    pub fn raw<'p>(&self, pattern: &'p str) -> &'p str {
        &pattern[self.span.clone()]
    }
}

/// A tokenized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern<'a> {
    pub pattern: &'a str,
    pub segments: Vec<Segment<'a>>,
    pub units: FractionUnits,
}

impl<'a> Pattern<'a> {
    pub fn has_fractions(&self) -> bool {
        !self.units.is_empty()
    }

    pub fn fractions(&self) -> impl Iterator<Item = Precision> + '_ {
        self.segments.iter().filter_map(Segment::precision)
    }
}
