//! Log level definitions
//!
//! Levels are plain ordered numbers so that applications can register
//! their own levels above the built-in range. Display metadata for every
//! level lives in one process-wide [`LevelTable`], reached through
//! [`levels()`].

use crate::printer::{rich, RichOption};
use colored::Color;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(u32);

impl LogLevel {
    /// Disables all leveled output; unleveled prints still go through.
    pub const DISABLE: LogLevel = LogLevel(0);
    /// Always printed, then the process exits.
    pub const FATAL: LogLevel = LogLevel(1);
    pub const ERROR: LogLevel = LogLevel(2);
    pub const WARN: LogLevel = LogLevel(3);
    pub const INFO: LogLevel = LogLevel(4);
    pub const DEBUG: LogLevel = LogLevel(5);

    /// First value available for custom levels.
    pub const FIRST_CUSTOM: u32 = 6;

    pub const fn new(value: u32) -> Self {
        LogLevel(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_CUSTOM
    }

    /// Gating rule: a logger configured at `self` emits a record at
    /// `record` iff `self >= record`. Fatal records bypass the gate.
    pub fn enables(self, record: LogLevel) -> bool {
        record == LogLevel::FATAL || self >= record
    }

    /// Resolve a level by name; unknown names resolve to [`LogLevel::DISABLE`].
    pub fn parse(name: &str) -> Self {
        levels().find(name).unwrap_or(LogLevel::DISABLE)
    }

    /// Registered name of this level, or its number when unregistered.
    pub fn name(self) -> String {
        match levels().get(self) {
            Some(metadata) => metadata.name.clone(),
            None => self.0.to_string(),
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::INFO
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Strict parsing: unlike [`LogLevel::parse`], unknown names are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        levels()
            .find(s)
            .ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}

impl From<u32> for LogLevel {
    fn from(value: u32) -> Self {
        LogLevel(value)
    }
}

/// Display metadata of a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMetadata {
    /// Name used by `parse` and `Display`, e.g. `"info"`
    pub name: String,
    /// Extra names resolving to the same level, e.g. `"warning"`
    pub aliases: Vec<String>,
    /// Plain tag written in front of a record, e.g. `"[INFO]"`
    pub title: String,
    /// Pre-rendered styled tag; when unset the title is styled from
    /// `color` and `styles`
    pub colorful_text: Option<String>,
    pub color: Color,
    pub styles: Vec<RichOption>,
}

impl LevelMetadata {
    pub fn new(name: impl Into<String>, title: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            title: title.into(),
            colorful_text: None,
            color,
            styles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RichOption) -> Self {
        self.styles.push(style);
        self
    }

    #[must_use]
    pub fn with_colorful_text(mut self, text: impl Into<String>) -> Self {
        self.colorful_text = Some(text.into());
        self
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }

    /// The tag in its styled encoding.
    pub fn rich_title(&self) -> Cow<'_, str> {
        match &self.colorful_text {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Owned(rich(&self.title, self.color, &self.styles)),
        }
    }
}

/// Process-wide level metadata, keyed by level value.
///
/// Entries are only ever added or replaced, never removed.
pub struct LevelTable {
    entries: RwLock<HashMap<LogLevel, Arc<LevelMetadata>>>,
}

impl LevelTable {
    fn with_builtins() -> Self {
        let builtins = [
            (
                LogLevel::FATAL,
                LevelMetadata::new("fatal", "[FTAL]", Color::Red).with_style(RichOption::Bold),
            ),
            (
                LogLevel::ERROR,
                LevelMetadata::new("error", "[ERRO]", Color::Red),
            ),
            (
                LogLevel::WARN,
                LevelMetadata::new("warn", "[WARN]", Color::Magenta).with_alias("warning"),
            ),
            (
                LogLevel::INFO,
                LevelMetadata::new("info", "[INFO]", Color::Cyan),
            ),
            (
                LogLevel::DEBUG,
                LevelMetadata::new("debug", "[DBUG]", Color::Yellow),
            ),
        ];

        let mut entries: HashMap<LogLevel, Arc<LevelMetadata>> = builtins
            .into_iter()
            .map(|(level, metadata)| (level, Arc::new(metadata)))
            .collect();
        // "disable" carries no tag, it only needs to resolve by name.
        entries.insert(
            LogLevel::DISABLE,
            Arc::new(LevelMetadata::new("disable", "", Color::White)),
        );

        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Register (or replace) the metadata of `level`.
    pub fn register(&self, level: LogLevel, metadata: LevelMetadata) {
        self.entries.write().insert(level, Arc::new(metadata));
    }

    pub fn get(&self, level: LogLevel) -> Option<Arc<LevelMetadata>> {
        self.entries.read().get(&level).cloned()
    }

    /// Find a level by name or alias. Names are case-sensitive.
    pub fn find(&self, name: &str) -> Option<LogLevel> {
        self.entries
            .read()
            .iter()
            .find(|(_, metadata)| metadata.matches(name))
            .map(|(level, _)| *level)
    }

    /// Change the tag and color of an existing level. Returns false when
    /// the level was never registered.
    pub fn set_text(&self, level: LogLevel, title: impl Into<String>, color: Color) -> bool {
        let mut entries = self.entries.write();
        match entries.get_mut(&level) {
            Some(metadata) => {
                let mut updated = LevelMetadata::clone(metadata);
                updated.title = title.into();
                updated.color = color;
                updated.colorful_text = None;
                *metadata = Arc::new(updated);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// The process-wide level table, created with the built-in levels on
/// first use.
pub fn levels() -> &'static LevelTable {
    static TABLE: OnceLock<LevelTable> = OnceLock::new();
    TABLE.get_or_init(LevelTable::with_builtins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ordering() {
        assert!(LogLevel::DISABLE < LogLevel::ERROR);
        assert!(LogLevel::ERROR < LogLevel::WARN);
        assert!(LogLevel::WARN < LogLevel::INFO);
        assert!(LogLevel::INFO < LogLevel::DEBUG);
        assert!(LogLevel::DEBUG < LogLevel::new(LogLevel::FIRST_CUSTOM));
    }

    #[test]
    fn test_gating() {
        assert!(LogLevel::INFO.enables(LogLevel::ERROR));
        assert!(LogLevel::INFO.enables(LogLevel::INFO));
        assert!(!LogLevel::INFO.enables(LogLevel::DEBUG));
        assert!(!LogLevel::DISABLE.enables(LogLevel::ERROR));
        assert!(LogLevel::DISABLE.enables(LogLevel::FATAL));
        assert!(LogLevel::DISABLE.enables(LogLevel::DISABLE));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(LogLevel::parse("error"), LogLevel::ERROR);
        assert_eq!(LogLevel::parse("warn"), LogLevel::WARN);
        assert_eq!(LogLevel::parse("warning"), LogLevel::WARN);
        assert_eq!(LogLevel::parse("info"), LogLevel::INFO);
        assert_eq!(LogLevel::parse("debug"), LogLevel::DEBUG);
        assert_eq!(LogLevel::parse("fatal"), LogLevel::FATAL);
        assert_eq!(LogLevel::parse("disable"), LogLevel::DISABLE);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(LogLevel::parse("INFO"), LogLevel::DISABLE);
        assert_eq!(LogLevel::parse("verbose"), LogLevel::DISABLE);
        assert!("INFO".parse::<LogLevel>().is_err());
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::DEBUG));
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(LogLevel::WARN.to_string(), "warn");
        assert_eq!(LogLevel::new(4242).to_string(), "4242");
    }

    #[test]
    fn test_register_custom_level() {
        let success = LogLevel::new(42);
        levels().register(
            success,
            LevelMetadata::new("success-test", "[SUCC]", Color::Green)
                .with_colorful_text("\x1b[32m[SUCC]\x1b[0m"),
        );

        assert_eq!(LogLevel::parse("success-test"), success);
        let metadata = levels().get(success).unwrap();
        assert_eq!(metadata.title, "[SUCC]");
        assert_eq!(metadata.rich_title(), "\x1b[32m[SUCC]\x1b[0m");
        assert!(!success.is_builtin());
    }

    #[test]
    fn test_set_text_unknown_level() {
        assert!(!levels().set_text(LogLevel::new(4243), "[NOPE]", Color::Blue));
    }
}
