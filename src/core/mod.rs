//! Core logger types and traits

pub mod args;
pub mod children;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod record_pool;
pub mod scan;
pub mod settings;
pub mod time_format;

pub use args::{split_args, LogArg};
pub use children::{ChildKey, ChildRegistry};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::{FormatOptions, Formatter, FormatterRegistry};
pub use handler::{Handler, HandlerChain};
pub use log_level::{levels, LevelMetadata, LevelTable, LogLevel};
pub use logger::{Logger, LoggerBuilder, DEFAULT_STACKTRACE_LIMIT};
pub use metrics::LoggerMetrics;
pub use record::{Frame, Record};
pub use record_pool::{PooledRecord, RecordPool, DEFAULT_MAX_IDLE};
pub use scan::ScanHandle;
pub use settings::LoggerSettings;
pub use time_format::TimeFormat;
