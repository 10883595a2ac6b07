//! JSON record layout
//!
//! Writes each record as one JSON document (JSON Lines when not indented)
//! so output can be consumed by log aggregation tools.

use crate::core::formatter::{FormatOptions, Formatter};
use crate::core::{LoggerError, Record, Result};
use crate::printer::{Printer, WriteReport};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Formatter registered as `"json"`.
///
/// Option `indent` selects indented output, either as a number of spaces
/// or as the literal indent string.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    indent: Option<String>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        let indent = indent.into();
        self.indent = (!indent.is_empty()).then_some(indent);
        self
    }

    /// Build the JSON object of a record.
    pub fn to_value(record: &Record) -> Value {
        let mut object = Map::new();
        if let Some(time) = record.time() {
            object.insert("timestamp".to_string(), json!(time.to_rfc3339()));
        }
        object.insert("level".to_string(), json!(record.level().name()));
        if !record.prefix().is_empty() {
            object.insert("prefix".to_string(), json!(record.prefix()));
        }
        object.insert("message".to_string(), json!(record.message()));

        if !record.fields().is_empty() {
            let fields: Map<String, Value> = record
                .fields()
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json_value()))
                .collect();
            object.insert("fields".to_string(), Value::Object(fields));
        }

        if !record.stacktrace().is_empty() {
            let frames: Vec<Value> = record
                .stacktrace()
                .iter()
                .map(|frame| {
                    json!({
                        "function": frame.function,
                        "file": frame.file,
                        "line": frame.line,
                    })
                })
                .collect();
            object.insert("stacktrace".to_string(), Value::Array(frames));
        }

        Value::Object(object)
    }

    /// Serialize a record, newline terminated.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        let value = Self::to_value(record);
        let mut buf = Vec::with_capacity(128);
        match &self.indent {
            Some(indent) => {
                let formatter = PrettyFormatter::with_indent(indent.as_bytes());
                let mut serializer = Serializer::with_formatter(&mut buf, formatter);
                value.serialize(&mut serializer)?;
            }
            None => serde_json::to_writer(&mut buf, &value)?,
        }
        buf.push(b'\n');
        Ok(buf)
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn with_options(&self, options: &FormatOptions) -> Arc<dyn Formatter> {
        let indent = match options.get("indent") {
            Some(Value::Number(width)) => {
                " ".repeat(width.as_u64().unwrap_or(0) as usize)
            }
            Some(Value::String(indent)) => indent.clone(),
            _ => String::new(),
        };
        Arc::new(self.clone().with_indent(indent))
    }

    fn format(&self, printer: &Printer, record: &Record) -> Option<WriteReport> {
        match self.encode(record) {
            Ok(buf) => Some(printer.write(&buf)),
            Err(err) => {
                let err = LoggerError::formatter("json", err.to_string());
                eprintln!("[LOGGER WARNING] {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use crate::destinations::BufferDestination;

    fn sample_record() -> Record {
        Record {
            level: LogLevel::INFO,
            message: "User logged in".to_string(),
            fields: Fields::new()
                .with_field("user_id", 123)
                .with_field("action", "login"),
            new_line: true,
            ..Record::default()
        }
    }

    #[test]
    fn test_json_single_line() -> Result<()> {
        let buffer = BufferDestination::new();
        let printer = Printer::new(buffer.clone());

        assert!(JsonFormatter::new().format(&printer, &sample_record()).is_some());

        let content = buffer.contents();
        assert_eq!(content.lines().count(), 1);
        let parsed: Value = serde_json::from_str(content.trim_end())?;
        assert_eq!(parsed["message"], "User logged in");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["fields"]["user_id"], 123);
        assert!(parsed.get("timestamp").is_none());
        Ok(())
    }

    #[test]
    fn test_json_indent_option() -> Result<()> {
        let formatter = JsonFormatter::new().with_options(&FormatOptions::new().with("indent", 2));
        let buffer = BufferDestination::new();
        let printer = Printer::new(buffer.clone());

        assert!(formatter.format(&printer, &sample_record()).is_some());

        let content = buffer.contents();
        assert!(content.contains("\n  \"level\": \"info\""));
        let parsed: Value = serde_json::from_str(&content)?;
        assert_eq!(parsed["fields"]["action"], "login");
        Ok(())
    }
}
