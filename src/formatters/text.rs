//! Plain text record layout
//!
//! `[TAG] <time> <prefix><message> key=value ...` followed by a newline for
//! line-oriented records. The tag is styled on rich destinations only.

use crate::core::formatter::{FormatOptions, Formatter};
use crate::core::{levels, LogLevel, Record};
use crate::printer::{Printer, RichLine, WriteReport};
use std::fmt::Write as _;
use std::sync::Arc;

/// Compose `record` into one line, with a styled encoding when `with_rich`.
pub fn compose(record: &Record, with_rich: bool) -> RichLine {
    let mut line = RichLine::new(with_rich);

    if record.level() != LogLevel::DISABLE {
        if let Some(metadata) = levels().get(record.level()) {
            if with_rich {
                line.push_pair(&metadata.title, &metadata.rich_title());
            } else {
                line.push(&metadata.title);
            }
            line.push(" ");
        }
    }

    if let Some(time) = record.formatted_time() {
        line.push(&time);
        line.push(" ");
    }

    line.push(record.prefix());
    line.push(record.message());

    for (key, value) in record.fields() {
        let _ = write!(line, " {}={}", key, value);
    }

    if record.new_line() {
        line.push("\n");
    }
    line
}

/// Compose and write `record` in one fan-out.
pub fn write_record(printer: &Printer, record: &Record) -> WriteReport {
    let line = compose(record, printer.has_rich_destination());
    printer.write_line(&line)
}

/// The default composer as a selectable formatter.
#[derive(Debug, Clone, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn with_options(&self, _options: &FormatOptions) -> Arc<dyn Formatter> {
        Arc::new(self.clone())
    }

    fn format(&self, printer: &Printer, record: &Record) -> Option<WriteReport> {
        Some(write_record(printer, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, TimeFormat};
    use crate::destinations::BufferDestination;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_compose_order() {
        let record = Record {
            level: LogLevel::INFO,
            message: "hi".to_string(),
            fields: Fields::new().with_field("a", 1),
            new_line: true,
            ..Record::default()
        };

        let line = compose(&record, false);
        assert_eq!(line.plain(), "[INFO] hi a=1\n");
        assert!(line.rich().is_none());
    }

    #[test]
    fn test_compose_time_and_prefix() {
        let record = Record {
            time: Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 0).single(),
            level: LogLevel::WARN,
            message: "slow query".to_string(),
            prefix: "db: ".to_string(),
            time_format: TimeFormat::new("%H:%M").unwrap(),
            ..Record::default()
        };

        let line = compose(&record, false);
        assert_eq!(line.plain(), "[WARN] 10:30 db: slow query");
    }

    #[test]
    fn test_unleveled_record_has_no_tag() {
        let record = Record {
            level: LogLevel::DISABLE,
            message: "raw".to_string(),
            ..Record::default()
        };
        assert_eq!(compose(&record, false).plain(), "raw");
    }

    #[test]
    fn test_text_formatter_writes() {
        let buffer = BufferDestination::new();
        let printer = Printer::new(buffer.clone());
        let record = Record {
            level: LogLevel::ERROR,
            message: "failed".to_string(),
            new_line: true,
            ..Record::default()
        };

        assert!(TextFormatter::new().format(&printer, &record).is_some());
        assert_eq!(buffer.contents(), "[ERRO] failed\n");
    }
}
