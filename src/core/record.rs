//! Log record structure
//!
//! A [`Record`] carries one log event through the print path. Records come
//! from a [`RecordPool`](super::record_pool::RecordPool) and go back to it
//! as soon as the print call finishes; handlers and formatters only ever
//! see a borrowed record and must not keep data from it past their call.

use super::fields::Fields;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::time_format::TimeFormat;
use chrono::{DateTime, Local};
use std::backtrace::Backtrace;
use std::fmt;

/// One frame of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)?;
        if let Some(file) = &self.file {
            write!(f, "\n\t{}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Record {
    pub(crate) time: Option<DateTime<Local>>,
    pub(crate) level: LogLevel,
    pub(crate) message: String,
    pub(crate) fields: Fields,
    pub(crate) new_line: bool,
    pub(crate) stacktrace: Vec<Frame>,
    pub(crate) prefix: String,
    pub(crate) time_format: TimeFormat,
    pub(crate) logger: Option<Logger>,
}

impl Record {
    /// Wall-clock time of the call; only captured when the logger has a
    /// time format configured.
    pub fn time(&self) -> Option<&DateTime<Local>> {
        self.time.as_ref()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// True for line-oriented calls (`println` and every leveled call on a
    /// logger with the newline default on), false for `print`.
    pub fn new_line(&self) -> bool {
        self.new_line
    }

    pub fn stacktrace(&self) -> &[Frame] {
        &self.stacktrace
    }

    /// Prefix of the emitting logger at the time of the call.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn time_format(&self) -> &TimeFormat {
        &self.time_format
    }

    /// Timestamp rendered with the emitting logger's time format, if any.
    pub fn formatted_time(&self) -> Option<String> {
        match &self.time {
            Some(time) if self.time_format.is_enabled() => Some(self.time_format.format(time)),
            _ => None,
        }
    }

    /// The logger that emitted this record.
    pub fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    /// Clear every field while keeping allocated capacity.
    pub(crate) fn reset(&mut self) {
        self.time = None;
        self.level = LogLevel::DISABLE;
        self.message.clear();
        self.fields.clear();
        self.new_line = false;
        self.stacktrace.clear();
        self.prefix.clear();
        self.logger = None;
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("time", &self.time)
            .field("level", &self.level)
            .field("message", &self.message)
            .field("fields", &self.fields)
            .field("new_line", &self.new_line)
            .field("stacktrace", &self.stacktrace.len())
            .field("prefix", &self.prefix)
            .finish()
    }
}

const SKIPPED_FRAME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "rust_begin_unwind",
    "__rust",
];

// Logger entry points between the caller and the capture.
const LOGGER_FRAME_PATHS: &[&str] = &[
    "rust_leveled_logger::core::",
    "rust_leveled_logger::global::",
];

fn is_internal_frame(function: &str) -> bool {
    let name = function.trim_start_matches('<');
    SKIPPED_FRAME_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
        || LOGGER_FRAME_PATHS.iter().any(|path| name.contains(path))
}

/// Parse the `at path:line:col` location line of a rendered backtrace.
fn parse_location(location: &str) -> (Option<String>, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next();
    let line = parts.next().and_then(|line| line.parse().ok());
    match (line, parts.next()) {
        (Some(line), Some(file)) => (Some(file.to_string()), Some(line)),
        _ => (Some(location.to_string()), None),
    }
}

/// Capture the caller's stack into `frames`.
///
/// `limit` of 0 keeps every frame, a negative limit captures nothing and a
/// positive one keeps at most that many. Frames of the standard library and
/// of the logger itself are left out.
pub(crate) fn capture_stacktrace(limit: i32, frames: &mut Vec<Frame>) {
    if limit < 0 {
        return;
    }
    let max = if limit == 0 {
        usize::MAX
    } else {
        limit as usize
    };

    let rendered = Backtrace::force_capture().to_string();
    let mut current: Option<Frame> = None;
    for raw in rendered.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = current.as_mut() {
                if frame.file.is_none() {
                    let (file, line) = parse_location(location);
                    frame.file = file;
                    frame.line = line;
                }
            }
            continue;
        }

        let Some((index, function)) = line.split_once(": ") else {
            continue;
        };
        if index.parse::<usize>().is_err() {
            continue;
        }

        if let Some(frame) = current.take() {
            frames.push(frame);
            if frames.len() >= max {
                return;
            }
        }
        if !is_internal_frame(function) {
            current = Some(Frame {
                function: function.to_string(),
                file: None,
                line: None,
            });
        }
    }

    if let Some(frame) = current {
        if frames.len() < max {
            frames.push(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_limit_captures_nothing() {
        let mut frames = Vec::new();
        capture_stacktrace(-1, &mut frames);
        assert!(frames.is_empty());
    }

    #[test]
    fn test_limit_bounds_frame_count() {
        let mut frames = Vec::new();
        capture_stacktrace(2, &mut frames);
        assert!(frames.len() <= 2);
    }

    #[test]
    fn test_internal_frames_are_skipped() {
        assert!(is_internal_frame("std::rt::lang_start"));
        assert!(is_internal_frame("<core::ops::function::FnOnce>::call_once"));
        assert!(is_internal_frame(
            "rust_leveled_logger::core::logger::Logger::debug"
        ));
        assert!(is_internal_frame("rust_leveled_logger::global::debug"));
        assert!(!is_internal_frame("my_app::handlers::checkout"));
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            parse_location("./src/main.rs:10:5"),
            (Some("./src/main.rs".to_string()), Some(10))
        );
        assert_eq!(parse_location("unknown"), (Some("unknown".to_string()), None));
    }

    #[test]
    fn test_reset_clears_record() {
        let mut record = Record {
            level: LogLevel::WARN,
            message: "disk low".to_string(),
            new_line: true,
            prefix: "db: ".to_string(),
            ..Record::default()
        };
        record.fields.insert("free_mb", 12);

        record.reset();

        assert_eq!(record.level(), LogLevel::DISABLE);
        assert!(record.message().is_empty());
        assert!(record.fields().is_empty());
        assert!(record.prefix().is_empty());
        assert!(!record.new_line());
        assert!(record.logger().is_none());
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame {
            function: "app::run".to_string(),
            file: Some("src/app.rs".to_string()),
            line: Some(42),
        };
        assert_eq!(frame.to_string(), "app::run\n\tsrc/app.rs:42");
    }
}
