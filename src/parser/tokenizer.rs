use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, rest, take_until};

use crate::constants::FRACTION_MARKER;

use super::model::{Precision, Segment, SegmentKind};

type ScanResult<T> = Result<T, ErrMode<ContextError>>;

/// Splits a pattern into literal runs and fraction tokens.
///
/// Scanning never fails: anything that is not a fraction token ends up in a
/// literal segment, including malformed suffixes such as `%fx` (which yields
/// a nano token followed by the literal `x`).
pub fn tokenize(pattern: &str) -> Vec<Segment<'_>> {
    let mut input = pattern;
    let mut segments: Vec<Segment<'_>> = Vec::new();

    while !input.is_empty() {
        let start = pattern.len() - input.len();
        let Ok(kind) = next_segment.parse_next(&mut input) else {
            segments.push(Segment::literal(input, start));
            break;
        };
        let end = pattern.len() - input.len();
        segments.push(Segment {
            kind,
            span: start..end,
        });
    }

    segments
}

fn next_segment<'a>(input: &mut &'a str) -> ScanResult<SegmentKind<'a>> {
    alt((
        fraction_token.map(SegmentKind::Fraction),
        literal_run.map(SegmentKind::Literal),
        rest.map(SegmentKind::Literal),
    ))
    .parse_next(input)
}

fn fraction_token(input: &mut &str) -> ScanResult<Precision> {
    preceded(FRACTION_MARKER, opt(one_of(['3', '6', '9'])))
        .map(|suffix: Option<char>| {
            suffix
                .and_then(Precision::from_suffix)
                .unwrap_or(Precision::Nano)
        })
        .parse_next(input)
}

fn literal_run<'a>(input: &mut &'a str) -> ScanResult<&'a str> {
    take_until(1.., FRACTION_MARKER).parse_next(input)
}
