use std::ffi::CString;

use log::debug;

use crate::constants::MAX_RENDER_BUFFER;

use super::calendar::Calendar;
use super::error::FormatterError;

/// Sentinel byte prepended to every format string, so that a successful
/// `strftime` call always writes at least one byte and a zero return can
/// only mean the buffer was too small.
const SENTINEL: u8 = b' ';

/// Local-time calendar on top of the C library's `localtime_r` and
/// `strftime`.
///
/// Conventional tokens behave as the host libc defines them; glibc passes
/// unknown directives through verbatim.
///
/// Output is capped at `MAX_RENDER_BUFFER` bytes (or 16 times the pattern
/// length, if larger). A valid pattern whose output exceeds the cap, such
/// as `%70000Y`, fails with `FormatterError::Render`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibcCalendar;

impl Calendar for LibcCalendar {
    type Tm = libc::tm;

    fn breakdown(&self, secs: i64) -> Result<Self::Tm, FormatterError> {
        let time = libc::time_t::try_from(secs).map_err(|_| FormatterError::OutOfRange(secs))?;
        // SAFETY: `tm` is plain data and `localtime_r` only writes through
        // the pointers it is handed.
        let mut tm = unsafe { std::mem::zeroed::<libc::tm>() };
        let result = unsafe { libc::localtime_r(&time, &mut tm) };
        if result.is_null() {
            return Err(FormatterError::OutOfRange(secs));
        }
        Ok(tm)
    }

    fn render(&self, tm: &Self::Tm, pattern: &str) -> Result<String, FormatterError> {
        let mut format = Vec::with_capacity(pattern.len() + 1);
        format.push(SENTINEL);
        format.extend_from_slice(pattern.as_bytes());
        let format = CString::new(format).map_err(|_| FormatterError::render(pattern))?;

        let ceiling = MAX_RENDER_BUFFER.max(pattern.len() * 16);
        let mut capacity = (pattern.len() * 4).max(64);
        loop {
            let mut buffer = vec![0u8; capacity];
            // SAFETY: the buffer is `capacity` bytes long and `format` is
            // NUL-terminated.
            let written = unsafe {
                libc::strftime(
                    buffer.as_mut_ptr().cast(),
                    buffer.len(),
                    format.as_ptr(),
                    tm,
                )
            };
            if written > 0 {
                buffer.truncate(written);
                return Ok(String::from_utf8_lossy(&buffer[1..]).into_owned());
            }
            if capacity >= ceiling {
                debug!("strftime output for {pattern:?} exceeds {ceiling} bytes");
                return Err(FormatterError::render(pattern));
            }
            capacity = (capacity * 2).min(ceiling);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(secs: i64, pattern: &str) -> Result<String, FormatterError> {
        let tm = LibcCalendar.breakdown(secs)?;
        LibcCalendar.render(&tm, pattern)
    }

    #[test]
    fn empty_pattern_renders_empty() {
        assert_eq!(render(0, "").unwrap(), "");
    }

    #[test]
    fn epoch_seconds_round_trip() {
        assert_eq!(render(1_000_000_000, "%s").unwrap(), "1000000000");
    }

    #[test]
    fn literal_text_is_kept() {
        assert_eq!(render(0, "at 100%% ok").unwrap(), "at 100% ok");
    }

    #[test]
    fn long_output_grows_buffer() {
        let pattern = "%c".repeat(100);
        let rendered = render(1_000_000_000, &pattern).unwrap();
        assert_eq!(rendered.len(), 2400);
    }

    #[test]
    fn interior_nul_fails() {
        assert!(matches!(
            render(0, "a\0b"),
            Err(FormatterError::Render { .. })
        ));
    }

    #[test]
    fn output_past_ceiling_fails() {
        let result = render(1_000_000_000, "%70000Y");
        assert_eq!(
            result,
            Err(FormatterError::Render {
                pattern: "%70000Y".to_string()
            })
        );
    }

    #[test]
    fn breakdown_out_of_range() {
        assert_eq!(
            LibcCalendar.breakdown(i64::MAX).unwrap_err(),
            FormatterError::OutOfRange(i64::MAX)
        );
    }

    #[test]
    fn fields_agree_with_chrono_local() {
        use crate::formatter::calendar::ChronoCalendar;

        let chrono = ChronoCalendar::local();
        let tm = chrono.breakdown(1_000_000_000).unwrap();
        let expected = chrono.render(&tm, "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(render(1_000_000_000, "%Y-%m-%d %H:%M:%S").unwrap(), expected);
    }
}
