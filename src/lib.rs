//! # Rust Leveled Logger
//!
//! A leveled logging library: records go through an optional handler chain
//! and a pluggable formatter to a fan-out [`Printer`] that writes every
//! record to all of its destinations at once.
//!
//! ## Features
//!
//! - **Fan-out Output**: One printer, many destinations, colored only where
//!   the destination is a terminal
//! - **Child Loggers**: Keyed children with inherited, extended prefixes
//! - **Pluggable Formatting**: Text and JSON built in, custom formatters
//!   per logger or per level
//! - **Integration**: Route records to external loggers, including `tracing`
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//!
//! let buffer = BufferDestination::new();
//! let logger = Logger::builder()
//!     .time_format(TimeFormat::disabled())
//!     .output(buffer.clone())
//!     .build();
//!
//! logger.child("db").info_with_fields("connected", fields! { "pool" => 4 });
//! assert_eq!(buffer.contents(), "[INFO] db: connected pool=4\n");
//! ```

pub mod core;
pub mod destinations;
pub mod formatters;
pub mod global;
pub mod integration;
pub mod macros;
pub mod printer;

pub mod prelude {
    pub use crate::core::{
        levels, ChildKey, FieldValue, Fields, FormatOptions, Formatter, LevelMetadata, LogArg,
        LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerSettings, Record,
        Result, ScanHandle, TimeFormat,
    };
    pub use crate::destinations::{
        BufferDestination, ConsoleDestination, Destination, FileDestination, NopDestination,
    };
    pub use crate::fields;
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::integration::{
        Integrable, Integration, LeveledLogger, StdLogger, StructuredLevel, StructuredLogger,
    };
    pub use crate::printer::{Printer, RichOption, WriteReport};
}

pub use core::{
    levels, split_args, ChildKey, ChildRegistry, FieldValue, Fields, FormatOptions, Formatter,
    FormatterRegistry, Frame, Handler, HandlerChain, LevelMetadata, LevelTable, LogArg, LogLevel,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerSettings, PooledRecord, Record,
    RecordPool, Result, ScanHandle, TimeFormat, DEFAULT_MAX_IDLE, DEFAULT_STACKTRACE_LIMIT,
};
pub use destinations::{
    BufferDestination, ConsoleDestination, Destination, FileDestination, NopDestination,
};
pub use integration::{Integrable, Integration, IntegrationKind};
pub use printer::{Printer, RichLine, RichOption, WriteReport};
