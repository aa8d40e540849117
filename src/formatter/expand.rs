use std::borrow::Cow;

use log::trace;

use crate::parser::{Pattern, Precision, SegmentKind, parse_pattern};

use super::pad::{max_for_width, zero_pad};

/// Sub-second digits for `nanos` at the given precision.
///
/// The value is rounded half away from zero. A result that would need one
/// digit more than the precision allows (999_999_999 ns at milli precision
/// rounds to 1000) is clamped to the widest value, `999`; the seconds
/// component is never touched.
pub fn fraction_digits(nanos: u32, precision: Precision) -> String {
    let divisor = u64::from(precision.divisor());
    let rounded = (u64::from(nanos) + divisor / 2) / divisor;
    let width = precision.width();
    zero_pad(rounded.min(max_for_width(width)), width)
}

/// Per-call memo of rendered fractions, one slot per precision class.
#[derive(Debug, Default)]
struct FractionCache {
    slots: [Option<String>; 3],
}

impl FractionCache {
    fn get(&mut self, nanos: u32, precision: Precision) -> &str {
        self.slots[precision.index()].get_or_insert_with(|| fraction_digits(nanos, precision))
    }
}

/// Replaces every fraction token in `pattern` with its digits.
///
/// A pattern without fraction tokens is returned borrowed.
pub fn expand_fractions(pattern: &str, nanos: u32) -> Cow<'_, str> {
    expand_pattern(&parse_pattern(pattern), nanos)
}

#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn expand_pattern<'a>(parsed: &Pattern<'a>, nanos: u32) -> Cow<'a, str> {
    if !parsed.has_fractions() {
        return Cow::Borrowed(parsed.pattern);
    }

    let mut cache = FractionCache::default();
    let mut expanded = String::with_capacity(parsed.pattern.len() + 16);
    for segment in &parsed.segments {
        match segment.kind {
            SegmentKind::Literal(text) => expanded.push_str(text),
            SegmentKind::Fraction(precision) => expanded.push_str(cache.get(nanos, precision)),
        }
    }

    trace!("expanded {:?} to {:?}", parsed.pattern, expanded);
    Cow::Owned(expanded)
}
