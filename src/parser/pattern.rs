use crate::constants::FractionUnits;

use super::model::Pattern;
use super::tokenizer::tokenize;

pub fn parse_pattern(pattern: &str) -> Pattern<'_> {
    let segments = tokenize(pattern);
    let units = segments
        .iter()
        .filter_map(|segment| segment.precision())
        .fold(FractionUnits::empty(), |units, precision| {
            units | precision.unit()
        });

    Pattern {
        pattern,
        segments,
        units,
    }
}
