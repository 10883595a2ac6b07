//! Logging macros for ergonomic log message formatting.
//!
//! These macros format like `format!` straight into the pooled record, and
//! accept an optional field list after a `;`.
//!
//! # Examples
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//! use rust_leveled_logger::{info, warn};
//!
//! let logger = Logger::builder().output(BufferDestination::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! warn!(logger, "Slow request {}", "/api"; "elapsed_ms" => 1200, "retry" => true);
//! ```

/// Build a [`Fields`](crate::Fields) map.
///
/// ```
/// use rust_leveled_logger::fields;
///
/// let fields = fields! { "user_id" => 42, "action" => "login" };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with_field($key, $value))+
    };
}

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferDestination::new()).build();
/// use rust_leveled_logger::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::ERROR, "Error code: {}", 500);
/// log!(logger, LogLevel::WARN, "Retrying"; "attempt" => 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.log_fmt(
            $level,
            format_args!($fmt $(, $arg)*),
            Some($crate::fields!($($key => $value),+)),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, format_args!($($arg)+), None)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferDestination::new()).build();
/// # logger.set_level(LogLevel::DEBUG);
/// use rust_leveled_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferDestination::new()).build();
/// use rust_leveled_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100; "batch" => 7);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferDestination::new()).build();
/// use rust_leveled_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}", 500; "retryable" => false);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

/// Log a fatal message and exit the process with status 1.
///
/// The message is written regardless of the configured level.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {{
        $crate::log!($logger, $crate::LogLevel::FATAL, $($arg)+);
        unreachable!("fatal records exit the process")
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, TimeFormat};
    use crate::destinations::BufferDestination;

    fn buffered() -> (Logger, BufferDestination) {
        let buffer = BufferDestination::new();
        let logger = Logger::builder()
            .level(LogLevel::DEBUG)
            .stacktrace_limit(-1)
            .time_format(TimeFormat::disabled())
            .output(buffer.clone())
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_level_macros() {
        let (logger, buffer) = buffered();

        error!(logger, "e{}", 1);
        warn!(logger, "w");
        info!(logger, "i {} {}", "a", 2);
        debug!(logger, "d");

        assert_eq!(
            buffer.lines(),
            vec!["[ERRO] e1", "[WARN] w", "[INFO] i a 2", "[DBUG] d"]
        );
    }

    #[test]
    fn test_field_arm() {
        let (logger, buffer) = buffered();

        info!(logger, "user {}", "bob"; "id" => 7);
        log!(logger, LogLevel::WARN, "plain"; "ok" => true,);

        assert_eq!(buffer.lines(), vec!["[INFO] user bob id=7", "[WARN] plain ok=true"]);
    }

    #[test]
    fn test_fields_macro() {
        let empty = fields!();
        assert!(empty.is_empty());

        let fields = fields! { "a" => 1, "b" => "two", };
        assert_eq!(fields.format_fields().len(), "a=1 b=two".len());
    }
}
