//! Timestamp formatting
//!
//! A [`TimeFormat`] is a `chrono` strftime pattern validated once, when it
//! is configured. The empty pattern disables timestamps altogether.

use crate::core::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Validated strftime pattern used to render record timestamps.
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::TimeFormat;
///
/// let format = TimeFormat::new("%H:%M:%S").unwrap();
/// assert!(format.is_enabled());
///
/// assert!(TimeFormat::new("%Q").is_err());
/// assert!(!TimeFormat::disabled().is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFormat(String);

impl TimeFormat {
    /// `2025/01/08 10:30`
    pub const DEFAULT: &'static str = "%Y/%m/%d %H:%M";
    /// `2025-01-08T10:30:45+01:00`
    pub const RFC3339: &'static str = "%Y-%m-%dT%H:%M:%S%:z";
    /// `2025-01-08T10:30:45.123+01:00`
    pub const ISO8601_MILLIS: &'static str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

    /// Validate `pattern`. Any unknown or incomplete specifier is rejected.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::invalid_time_format(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn disabled() -> Self {
        Self(String::new())
    }

    pub fn rfc3339() -> Self {
        Self(Self::RFC3339.to_string())
    }

    pub fn iso8601_millis() -> Self {
        Self(Self::ISO8601_MILLIS.to_string())
    }

    pub fn is_enabled(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append the rendered timestamp to `out`. Nothing is written when the
    /// format is disabled.
    pub fn write_to(&self, out: &mut String, datetime: &DateTime<Local>) {
        if self.is_enabled() {
            // Patterns are validated up front; a failure here would only
            // leave a partial timestamp behind.
            let _ = write!(out, "{}", datetime.format(&self.0));
        }
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        let mut out = String::new();
        self.write_to(&mut out, datetime);
        out
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimeFormat {
    type Error = LoggerError;

    fn try_from(pattern: String) -> Result<Self> {
        Self::new(pattern)
    }
}

impl TryFrom<&str> for TimeFormat {
    type Error = LoggerError;

    fn try_from(pattern: &str) -> Result<Self> {
        Self::new(pattern)
    }
}

impl From<TimeFormat> for String {
    fn from(format: TimeFormat) -> Self {
        format.0
    }
}
