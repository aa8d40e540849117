use proptest::prelude::*;
use timefmt_rs::{
    ChronoCalendar, FormatterOptions, Precision, Timestamp, expand_fractions, format_with,
    fraction_digits,
};

fn arb_precision() -> impl Strategy<Value = Precision> {
    prop_oneof![
        Just(Precision::Milli),
        Just(Precision::Micro),
        Just(Precision::Nano),
    ]
}

fn suffix(precision: Precision) -> &'static str {
    match precision {
        Precision::Milli => "3",
        Precision::Micro => "6",
        Precision::Nano => "9",
    }
}

proptest! {
    #[test]
    fn digits_have_exact_width(nanos in 0u32..=999_999_999, precision in arb_precision()) {
        let digits = fraction_digits(nanos, precision);
        prop_assert_eq!(digits.len(), precision.width());
        prop_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn digits_match_rounded_quotient(nanos in 0u32..=999_999_999, precision in arb_precision()) {
        let divisor = precision.divisor() as f64;
        let max = 10u64.pow(precision.width() as u32) - 1;
        let expected = ((nanos as f64 / divisor).round() as u64).min(max);
        let digits = fraction_digits(nanos, precision);
        prop_assert_eq!(digits.parse::<u64>().unwrap(), expected);
    }

    #[test]
    fn token_expands_to_digits(nanos in 0u32..=999_999_999, precision in arb_precision()) {
        let pattern = format!("%f{}", suffix(precision));
        prop_assert_eq!(expand_fractions(&pattern, nanos), fraction_digits(nanos, precision));
    }

    #[test]
    fn repeated_tokens_share_value(nanos in 0u32..=999_999_999, precision in arb_precision(), count in 2usize..6) {
        let pattern = vec![format!("%f{}", suffix(precision)); count].join("|");
        let expanded = expand_fractions(&pattern, nanos);
        let parts: Vec<&str> = expanded.split('|').collect();
        prop_assert_eq!(parts.len(), count);
        prop_assert!(parts.iter().all(|part| *part == parts[0]));
    }

    #[test]
    fn pattern_without_marker_is_unchanged(pattern in "[^%]*(%[a-eg-zA-Z][^%]*)*", nanos in any::<u32>()) {
        prop_assert_eq!(expand_fractions(&pattern, nanos), pattern.as_str());
    }

    #[test]
    fn formatting_is_stable(secs in 0i64..=4_102_444_800, nanos in 0u32..=999_999_999) {
        let ts = Timestamp::new(secs, nanos).unwrap();
        let calendar = ChronoCalendar::utc();
        let options = FormatterOptions::default();
        let first = format_with(&calendar, ts, "%Y-%m-%dT%H:%M:%S.%f3", &options).unwrap();
        let second = format_with(&calendar, ts, "%Y-%m-%dT%H:%M:%S.%f3", &options).unwrap();
        prop_assert_eq!(first.len(), 23);
        prop_assert_eq!(first, second);
    }
}
