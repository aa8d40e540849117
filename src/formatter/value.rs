use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::constants::NANOS_PER_SEC;

use super::error::FormatterError;

/// An instant as whole seconds since the Unix epoch plus a sub-second
/// nanosecond part in `[0, 999_999_999]`.
///
/// Instants before the epoch keep `nanos` non-negative: half a second
/// before the epoch is `secs = -1, nanos = 500_000_000`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "TimestampParts")]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
}

#[derive(Deserialize)]
struct TimestampParts {
    secs: i64,
    #[serde(default)]
    nanos: u64,
}

impl TryFrom<TimestampParts> for Timestamp {
    type Error = FormatterError;

    fn try_from(parts: TimestampParts) -> Result<Self, Self::Error> {
        u32::try_from(parts.nanos)
            .ok()
            .and_then(|nanos| Timestamp::new(parts.secs, nanos))
            .ok_or(FormatterError::InvalidNanos(parts.nanos))
    }
}

impl Timestamp {
    pub fn new(secs: i64, nanos: u32) -> Option<Self> {
        if nanos >= NANOS_PER_SEC {
            return None;
        }
        Some(Self { secs, nanos })
    }

    pub fn from_secs(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    pub fn secs(&self) -> i64 {
        self.secs
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }
}

/// Current wall-clock time in whole seconds.
pub fn now_secs() -> i64 {
    Timestamp::now().secs()
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self {
                secs: i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                nanos: after.subsec_nanos(),
            },
            Err(err) => {
                let before = err.duration();
                let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                match before.subsec_nanos() {
                    0 => Self {
                        secs: -secs,
                        nanos: 0,
                    },
                    nanos => Self {
                        secs: -secs - 1,
                        nanos: NANOS_PER_SEC - nanos,
                    },
                }
            }
        }
    }
}

impl TryFrom<Timestamp> for SystemTime {
    type Error = FormatterError;

    fn try_from(ts: Timestamp) -> Result<Self, Self::Error> {
        let out_of_range = || FormatterError::OutOfRange(ts.secs);
        let whole = Duration::from_secs(ts.secs.unsigned_abs());
        let base = if ts.secs >= 0 {
            UNIX_EPOCH.checked_add(whole)
        } else {
            UNIX_EPOCH.checked_sub(whole)
        }
        .ok_or_else(out_of_range)?;
        base.checked_add(Duration::from_nanos(u64::from(ts.nanos)))
            .ok_or_else(out_of_range)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}
