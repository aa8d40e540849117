use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_INVALID;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatterOptions {
    /// Return render and breakdown failures as errors. Clearing it is the
    /// caller opting in to receive `invalid` in place of a failure; the
    /// formatter never substitutes a value on its own.
    pub throws: bool,
    pub invalid: String,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            throws: true,
            invalid: DEFAULT_INVALID.to_string(),
        }
    }
}

impl FormatterOptions {
    pub fn with_throws(mut self, throws: bool) -> Self {
        self.throws = throws;
        self
    }

    pub fn with_invalid(mut self, invalid: impl Into<String>) -> Self {
        self.invalid = invalid.into();
        self
    }
}
