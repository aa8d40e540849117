use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

use super::error::FormatterError;

/// Breaks epoch seconds into calendar fields and renders strftime patterns
/// against them.
///
/// Implementations must be reentrant. `render` only ever sees patterns whose
/// fraction tokens have already been expanded, and must report failure as an
/// error rather than as an empty string.
pub trait Calendar {
    type Tm;

    fn breakdown(&self, secs: i64) -> Result<Self::Tm, FormatterError>;

    fn render(&self, tm: &Self::Tm, pattern: &str) -> Result<String, FormatterError>;
}

/// Calendar backed by chrono's strftime implementation.
///
/// Unknown or malformed directives are rejected with
/// `FormatterError::Render` instead of being passed through.
#[derive(Debug, Clone, Copy)]
pub struct ChronoCalendar<Tz = Local> {
    tz: Tz,
}

impl<Tz: TimeZone> ChronoCalendar<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl ChronoCalendar<Local> {
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl ChronoCalendar<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl ChronoCalendar<FixedOffset> {
    /// Calendar at a fixed offset east of UTC, in seconds.
    pub fn fixed(offset_secs: i32) -> Result<Self, FormatterError> {
        FixedOffset::east_opt(offset_secs)
            .map(Self::new)
            .ok_or_else(|| FormatterError::InvalidArgument(format!("offset {offset_secs}")))
    }
}

impl<Tz> Calendar for ChronoCalendar<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    type Tm = DateTime<Tz>;

    fn breakdown(&self, secs: i64) -> Result<Self::Tm, FormatterError> {
        self.tz
            .timestamp_opt(secs, 0)
            .single()
            .ok_or(FormatterError::OutOfRange(secs))
    }

    fn render(&self, tm: &Self::Tm, pattern: &str) -> Result<String, FormatterError> {
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(FormatterError::render(pattern));
        }

        let mut rendered = String::with_capacity(pattern.len() * 2);
        write!(rendered, "{}", tm.format_with_items(items.iter()))
            .map_err(|_| FormatterError::render(pattern))?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_utc(secs: i64, pattern: &str) -> Result<String, FormatterError> {
        let calendar = ChronoCalendar::utc();
        let tm = calendar.breakdown(secs)?;
        calendar.render(&tm, pattern)
    }

    #[test]
    fn renders_conventional_tokens() {
        assert_eq!(
            render_utc(1_000_000_000, "%Y/%m/%d %H:%M:%S").unwrap(),
            "2001/09/09 01:46:40"
        );
    }

    #[test]
    fn empty_pattern_is_not_a_failure() {
        assert_eq!(render_utc(0, "").unwrap(), "");
    }

    #[test]
    fn unknown_directive_fails() {
        assert_eq!(
            render_utc(0, "%Y %Q"),
            Err(FormatterError::Render {
                pattern: "%Y %Q".to_string()
            })
        );
    }

    #[test]
    fn fixed_offset_shifts_fields() {
        let calendar = ChronoCalendar::fixed(2 * 3600).unwrap();
        let tm = calendar.breakdown(0).unwrap();
        assert_eq!(calendar.render(&tm, "%H:%M %z").unwrap(), "02:00 +0200");
    }

    #[test]
    fn fixed_offset_rejects_a_day() {
        assert!(ChronoCalendar::fixed(86_400).is_err());
    }

    #[test]
    fn breakdown_out_of_range() {
        assert_eq!(
            ChronoCalendar::utc().breakdown(i64::MAX).unwrap_err(),
            FormatterError::OutOfRange(i64::MAX)
        );
    }
}
