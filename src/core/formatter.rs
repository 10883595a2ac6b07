//! Named formatting strategies
//!
//! Every logger owns a [`FormatterRegistry`]: the formatters it knows by
//! name, the logger-wide active one and per-level overrides. A logger
//! without an active formatter writes records with the default composer.

use super::log_level::LogLevel;
use super::record::Record;
use super::{LoggerError, Result};
use crate::formatters::{JsonFormatter, TextFormatter};
use crate::printer::{Printer, WriteReport};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Options passed when a formatter is selected, e.g. `{"indent": 2}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatOptions {
    values: Map<String, Value>,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get(key).and_then(Value::as_u64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for FormatOptions {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// A formatting strategy converting a record into written output.
pub trait Formatter: Send + Sync {
    /// Name the formatter is registered and selected under.
    fn name(&self) -> &str;

    /// A configured copy of this formatter. Unknown options are ignored.
    fn with_options(&self, options: &FormatOptions) -> Arc<dyn Formatter>;

    /// Write `record` to `printer`. `Some` carries the outcome of the write
    /// and means the default composer must not run; `None` hands the record
    /// back to it.
    fn format(&self, printer: &Printer, record: &Record) -> Option<WriteReport>;
}

#[derive(Clone)]
pub struct FormatterRegistry {
    available: HashMap<String, Arc<dyn Formatter>>,
    active: Option<Arc<dyn Formatter>>,
    per_level: HashMap<LogLevel, Arc<dyn Formatter>>,
}

impl FormatterRegistry {
    /// Registry knowing the `"text"` and `"json"` formatters, none active.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            available: HashMap::new(),
            active: None,
            per_level: HashMap::new(),
        };
        registry.register(Arc::new(TextFormatter::new()));
        registry.register(Arc::new(JsonFormatter::new()));
        registry
    }

    /// Register (or replace) a formatter under its own name.
    pub fn register(&mut self, formatter: Arc<dyn Formatter>) {
        self.available
            .insert(formatter.name().to_string(), formatter);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        self.available.get(name).cloned()
    }

    fn configured(&self, name: &str, options: &FormatOptions) -> Result<Arc<dyn Formatter>> {
        self.available
            .get(name)
            .map(|formatter| formatter.with_options(options))
            .ok_or_else(|| LoggerError::unknown_formatter(name))
    }

    /// Make `name` the logger-wide formatter.
    pub fn set_active(&mut self, name: &str, options: &FormatOptions) -> Result<()> {
        self.active = Some(self.configured(name, options)?);
        Ok(())
    }

    /// Go back to the default composer for levels without an override.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn set_level(
        &mut self,
        level: LogLevel,
        name: &str,
        options: &FormatOptions,
    ) -> Result<()> {
        let formatter = self.configured(name, options)?;
        self.per_level.insert(level, formatter);
        Ok(())
    }

    pub fn clear_level(&mut self, level: LogLevel) {
        self.per_level.remove(&level);
    }

    /// The formatter responsible for `level`: its override, else the
    /// active one.
    pub fn resolve(&self, level: LogLevel) -> Option<Arc<dyn Formatter>> {
        self.per_level
            .get(&level)
            .or(self.active.as_ref())
            .cloned()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref().map(|formatter| formatter.name())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.available.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("available", &self.names())
            .field("active", &self.active_name())
            .field("per_level", &self.per_level.keys().collect::<Vec<_>>())
            .finish()
    }
}
