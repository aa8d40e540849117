use serde_json::Value;
use std::str;
use typst_wasm_protocol::wasm_export;

use crate::wasm::{describe_pattern, secs_from_f64};
use crate::{ChronoCalendar, FormatterOptions, Timestamp};

/// Typst entry point for the `format` function.
/// Args: format string, timestamp (`{"secs": .., "nanos": ..}` or bare
/// seconds), options JSON (may be empty)
#[wasm_export(export_rename = "format")]
pub fn typst_format(
    format_string_bytes: &[u8],
    timestamp_bytes: &[u8],
    options_bytes: &[u8],
) -> Result<Vec<u8>, String> {
    let format_str = str::from_utf8(format_string_bytes)
        .map_err(|e| format!("Format string UTF-8 error: {}", e))?;
    let timestamp = parse_timestamp(timestamp_bytes)?;
    let options = parse_formatter_options(options_bytes)?;

    // Typst documents have no meaningful local zone; render in UTC
    let result = crate::format_with(&ChronoCalendar::utc(), timestamp, format_str, &options)
        .map_err(|e| format!("Format error: {}", e))?;

    Ok(result.into_bytes())
}

/// Typst entry point for the `expand` function.
#[wasm_export(export_rename = "expand")]
pub fn typst_expand(format_string_bytes: &[u8], nanos_bytes: &[u8]) -> Result<Vec<u8>, String> {
    let format_str = str::from_utf8(format_string_bytes)
        .map_err(|e| format!("Format string UTF-8 error: {}", e))?;
    let nanos = str::from_utf8(nanos_bytes)
        .map_err(|e| format!("Nanoseconds UTF-8 error: {}", e))?
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("Nanoseconds parse error: {}", e))?;

    Ok(crate::expand_fractions(format_str, nanos)
        .into_owned()
        .into_bytes())
}

/// Typst entry point for the `getFormatInfo` function.
/// Returns the pattern's segments as JSON
#[wasm_export(export_rename = "get-format-info")]
pub fn typst_get_format_info(format_string_bytes: &[u8]) -> Result<Vec<u8>, String> {
    let format_str = str::from_utf8(format_string_bytes)
        .map_err(|e| format!("Format string UTF-8 error: {}", e))?;

    serde_json::to_vec(&describe_pattern(format_str))
        .map_err(|e| format!("JSON serialization error: {}", e))
}

fn parse_timestamp(bytes: &[u8]) -> Result<Timestamp, String> {
    let text = str::from_utf8(bytes).map_err(|e| format!("Timestamp UTF-8 error: {}", e))?;
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| format!("Timestamp JSON parse error: {}", e))?;

    match value {
        Value::Number(n) => {
            let secs = match (n.as_i64(), n.as_f64()) {
                (Some(secs), _) => secs,
                (None, Some(secs)) => secs_from_f64(secs).map_err(|e| e.to_string())?,
                (None, None) => return Err(format!("Invalid timestamp: {}", n)),
            };
            Ok(Timestamp::from_secs(secs))
        }
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| format!("Invalid timestamp: {}", e))
        }
        other => Err(format!("Invalid timestamp: {}", other)),
    }
}

/// Parse formatter options
/// If options is empty, return default options
fn parse_formatter_options(options: &[u8]) -> Result<FormatterOptions, String> {
    let options_str = str::from_utf8(options).map_err(|e| format!("Options UTF-8 error: {}", e))?;

    if options_str.trim().is_empty() {
        return Ok(FormatterOptions::default());
    }

    serde_json::from_str(options_str).map_err(|e| format!("Options JSON parse error: {}", e))
}
