//! Loadable logger settings

use super::formatter::FormatOptions;
use super::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Logger settings as stored in a JSON document.
///
/// Every field is optional; missing fields keep the builder's value.
///
/// ```
/// use rust_leveled_logger::{Logger, LoggerSettings, LogLevel};
///
/// let settings = LoggerSettings::from_json(
///     r#"{ "level": "debug", "prefix": "api: ", "time_format": "" }"#,
/// ).unwrap();
///
/// let logger = Logger::builder().settings(&settings).unwrap().build();
/// assert_eq!(logger.level(), LogLevel::DEBUG);
/// assert!(!logger.time_format().is_enabled());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSettings {
    /// Level name, e.g. `"warn"`
    pub level: Option<String>,
    pub prefix: Option<String>,
    /// strftime pattern; `""` disables timestamps
    pub time_format: Option<String>,
    pub stacktrace_limit: Option<i32>,
    pub new_line: Option<bool>,
    /// Name of the active formatter
    pub format: Option<String>,
    /// Options of the active formatter
    pub format_options: Option<serde_json::Map<String, serde_json::Value>>,
}

impl LoggerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn format_options(&self) -> FormatOptions {
        self.format_options
            .clone()
            .map(FormatOptions::from)
            .unwrap_or_default()
    }
}
