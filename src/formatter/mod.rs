use log::debug;

use crate::parser::parse_pattern;

pub mod calendar;
pub mod error;
mod expand;
pub mod options;
mod pad;
#[cfg(unix)]
mod strftime;
pub mod value;

pub use calendar::{Calendar, ChronoCalendar};
pub use error::FormatterError;
pub use expand::{expand_fractions, expand_pattern, fraction_digits};
pub use options::FormatterOptions;
#[cfg(unix)]
pub use strftime::LibcCalendar;
pub use value::{Timestamp, now_secs};

/// Local-time calendar for the build target.
#[cfg(unix)]
pub type SystemCalendar = LibcCalendar;
#[cfg(not(unix))]
pub type SystemCalendar = ChronoCalendar<chrono::Local>;

pub fn system_calendar() -> SystemCalendar {
    #[cfg(unix)]
    {
        LibcCalendar
    }
    #[cfg(not(unix))]
    {
        ChronoCalendar::local()
    }
}

/// Breaks `secs` into local calendar fields.
pub fn localtime(secs: i64) -> Result<<SystemCalendar as Calendar>::Tm, FormatterError> {
    system_calendar().breakdown(secs)
}

/// Formats `secs` plus `nanos` in local time.
///
/// `%f3`, `%f6` and `%f9` expand to milli-, micro- and nanosecond digits; a
/// bare `%f` is nanoseconds. Every other directive goes to the calendar.
pub fn format(secs: i64, nanos: u32, pattern: &str) -> Result<String, FormatterError> {
    run(
        &system_calendar(),
        secs,
        nanos,
        pattern,
        &FormatterOptions::default(),
    )
}

/// Formats whole seconds in local time. Fraction tokens render as zeros.
pub fn format_secs(secs: i64, pattern: &str) -> Result<String, FormatterError> {
    run(
        &system_calendar(),
        secs,
        0,
        pattern,
        &FormatterOptions::default(),
    )
}

pub fn format_timestamp(timestamp: Timestamp, pattern: &str) -> Result<String, FormatterError> {
    format_with_options(timestamp, pattern, FormatterOptions::default())
}

pub fn format_with_options(
    timestamp: Timestamp,
    pattern: &str,
    options: FormatterOptions,
) -> Result<String, FormatterError> {
    format_with(&system_calendar(), timestamp, pattern, &options)
}

/// Formats against an arbitrary calendar, e.g. `ChronoCalendar::utc()`.
pub fn format_with<C: Calendar>(
    calendar: &C,
    timestamp: Timestamp,
    pattern: &str,
    options: &FormatterOptions,
) -> Result<String, FormatterError> {
    run(
        calendar,
        timestamp.secs(),
        timestamp.nanos(),
        pattern,
        options,
    )
}

#[cfg_attr(feature = "hotpath", hotpath::measure)]
fn run<C: Calendar>(
    calendar: &C,
    secs: i64,
    nanos: u32,
    pattern: &str,
    options: &FormatterOptions,
) -> Result<String, FormatterError> {
    let parsed = parse_pattern(pattern);
    let expanded = expand_pattern(&parsed, nanos);

    let result = calendar
        .breakdown(secs)
        .and_then(|tm| calendar.render(&tm, &expanded));

    match result {
        Ok(rendered) => Ok(rendered),
        Err(err) if options.throws => {
            debug!("formatting {secs} with {pattern:?} failed: {err}");
            Err(err)
        }
        Err(err) => {
            debug!("formatting {secs} with {pattern:?} failed, using {:?}: {err}", options.invalid);
            Ok(options.invalid.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(secs: i64, nanos: u32, pattern: &str) -> Result<String, FormatterError> {
        let ts = Timestamp::new(secs, nanos).unwrap();
        format_with(
            &ChronoCalendar::utc(),
            ts,
            pattern,
            &FormatterOptions::default(),
        )
    }

    #[test]
    fn fraction_and_conventional_tokens() {
        assert_eq!(
            utc(1_000_000_000, 123_456_789, "%Y-%m-%d %H:%M:%S.%f3").unwrap(),
            "2001-09-09 01:46:40.123"
        );
    }

    #[test]
    fn render_failure_is_an_error() {
        assert!(matches!(
            utc(0, 0, "%f3 %Q"),
            Err(FormatterError::Render { pattern }) if pattern == "000 %Q"
        ));
    }

    #[test]
    fn invalid_replaces_failure_when_not_throwing() {
        let options = FormatterOptions::default()
            .with_throws(false)
            .with_invalid("n/a");
        let out = format_with(
            &ChronoCalendar::utc(),
            Timestamp::from_secs(0),
            "%Q",
            &options,
        )
        .unwrap();
        assert_eq!(out, "n/a");
    }

    #[test]
    fn breakdown_failure_propagates() {
        assert_eq!(
            utc(i64::MAX, 0, "%Y"),
            Err(FormatterError::OutOfRange(i64::MAX))
        );
    }

    #[test]
    fn system_calendar_renders_epoch_seconds() {
        assert_eq!(format(1_000_000_000, 5, "%s.%f9").unwrap(), "1000000000.000000005");
        assert_eq!(format_secs(1_000_000_000, "%s.%f3").unwrap(), "1000000000.000");
    }

    #[test]
    fn localtime_matches_format() {
        let tm = localtime(1_000_000_000).unwrap();
        let calendar = system_calendar();
        assert_eq!(
            calendar.render(&tm, "%Y%m%d%H%M%S").unwrap(),
            format_secs(1_000_000_000, "%Y%m%d%H%M%S").unwrap()
        );
    }
}
