use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::FormatterError;
use crate::parser::{Precision, SegmentKind, tokenize};

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    pub error: Option<String>,
    pub segments: Vec<SegmentInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub kind: String,
    pub value: String,
    pub precision: Option<Precision>,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResult {
    pub success: bool,
    pub error: Option<String>,
    pub result: Option<String>,
}

impl From<Result<String, FormatterError>> for FormatResult {
    fn from(value: Result<String, FormatterError>) -> Self {
        match value {
            Ok(result) => FormatResult {
                success: true,
                error: None,
                result: Some(result),
            },
            Err(e) => FormatResult {
                success: false,
                error: Some(e.to_string()),
                result: None,
            },
        }
    }
}

pub(crate) fn describe_pattern(pattern: &str) -> ParseResult {
    let segments = tokenize(pattern)
        .into_iter()
        .map(|segment| {
            let (kind, value) = match segment.kind {
                SegmentKind::Literal(text) => ("Literal".to_string(), text.to_string()),
                SegmentKind::Fraction(precision) => {
                    (format!("Fraction({precision})"), segment.raw(pattern).to_string())
                }
            };
            SegmentInfo {
                kind,
                value,
                precision: segment.precision(),
                start: segment.span.start,
                end: segment.span.end,
            }
        })
        .collect();

    ParseResult {
        success: true,
        error: None,
        segments,
    }
}

/// JavaScript numbers carry epoch seconds as `f64`.
pub(crate) fn secs_from_f64(secs: f64) -> Result<i64, FormatterError> {
    if !secs.is_finite() || secs.fract() != 0.0 || secs.abs() >= i64::MAX as f64 {
        return Err(FormatterError::InvalidArgument(format!("seconds {secs}")));
    }
    Ok(secs as i64)
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn parse_format(pattern: &str) -> JsValue {
    to_js(&describe_pattern(pattern))
}

#[wasm_bindgen]
pub fn expand_time_pattern(pattern: &str, nanos: u32) -> String {
    crate::expand_fractions(pattern, nanos).into_owned()
}

#[wasm_bindgen]
pub fn format_time(pattern: &str, secs: f64, nanos: u32) -> JsValue {
    let result = secs_from_f64(secs).and_then(|secs| {
        if nanos >= crate::constants::NANOS_PER_SEC {
            return Err(FormatterError::InvalidNanos(u64::from(nanos)));
        }
        crate::format(secs, nanos, pattern)
    });
    to_js(&FormatResult::from(result))
}

#[wasm_bindgen]
pub fn format_time_secs(pattern: &str, secs: f64) -> JsValue {
    let result = secs_from_f64(secs).and_then(|secs| crate::format_secs(secs, pattern));
    to_js(&FormatResult::from(result))
}
