pub mod constants;
pub mod formatter;
pub mod parser;

#[cfg(feature = "typst-plugin")]
pub mod typst_plugin;
pub mod wasm;

pub use formatter::{
    Calendar, ChronoCalendar, FormatterError, FormatterOptions, SystemCalendar, Timestamp,
    expand_fractions, format, format_secs, format_timestamp, format_with, format_with_options,
    fraction_digits, localtime, now_secs, system_calendar,
};
#[cfg(unix)]
pub use formatter::LibcCalendar;
pub use parser::{Precision, parse_pattern, tokenize};
