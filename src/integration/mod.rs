//! External logger integration
//!
//! An external logger is adapted into a [`Handler`] that receives every
//! record instead of the logger's own printer. Three shapes are supported:
//!
//! - [`StructuredLogger`]: leveled calls with key/value attributes
//! - [`LeveledLogger`]: `print`/`println` plus one method per level
//! - [`StdLogger`]: `printf`/`print`/`println` only
//!
//! Values are matched to a shape through [`Integrable`]; anything that
//! reports no shape is rejected when installed.

#[cfg(feature = "tracing")]
pub mod tracing_bridge;

#[cfg(feature = "tracing")]
pub use tracing_bridge::TracingBridge;

use crate::core::{Fields, Handler, LogLevel, Record};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Level scale of structured external loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuredLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for StructuredLevel {
    /// Nearest external level; anything without a counterpart maps to the
    /// most verbose one.
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::FATAL | LogLevel::ERROR => StructuredLevel::Error,
            LogLevel::WARN => StructuredLevel::Warn,
            LogLevel::INFO => StructuredLevel::Info,
            _ => StructuredLevel::Debug,
        }
    }
}

pub trait StructuredLogger: Send + Sync {
    fn log(&self, level: StructuredLevel, message: &str, fields: &Fields);
}

pub trait LeveledLogger: Send + Sync {
    fn print(&self, message: &str);
    fn println(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
}

pub trait StdLogger: Send + Sync {
    fn printf(&self, args: fmt::Arguments<'_>);
    fn print(&self, message: &str);
    fn println(&self, message: &str);
}

// Shared handles, so the caller can keep using an installed logger.

impl<T: StructuredLogger + ?Sized> StructuredLogger for Arc<T> {
    fn log(&self, level: StructuredLevel, message: &str, fields: &Fields) {
        (**self).log(level, message, fields)
    }
}

impl<T: LeveledLogger + ?Sized> LeveledLogger for Arc<T> {
    fn print(&self, message: &str) {
        (**self).print(message)
    }

    fn println(&self, message: &str) {
        (**self).println(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn debug(&self, message: &str) {
        (**self).debug(message)
    }
}

impl<T: StdLogger + ?Sized> StdLogger for Arc<T> {
    fn printf(&self, args: fmt::Arguments<'_>) {
        (**self).printf(args)
    }

    fn print(&self, message: &str) {
        (**self).print(message)
    }

    fn println(&self, message: &str) {
        (**self).println(message)
    }
}

/// Shape tag of an [`Integration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationKind {
    Structured,
    Leveled,
    Std,
}

/// An external logger together with its recognized shape.
#[derive(Clone)]
pub enum Integration {
    Structured(Arc<dyn StructuredLogger>),
    Leveled(Arc<dyn LeveledLogger>),
    Std(Arc<dyn StdLogger>),
}

impl Integration {
    pub fn structured<T: StructuredLogger + 'static>(logger: T) -> Self {
        Integration::Structured(Arc::new(logger))
    }

    pub fn leveled<T: LeveledLogger + 'static>(logger: T) -> Self {
        Integration::Leveled(Arc::new(logger))
    }

    pub fn std<T: StdLogger + 'static>(logger: T) -> Self {
        Integration::Std(Arc::new(logger))
    }

    pub fn kind(&self) -> IntegrationKind {
        match self {
            Integration::Structured(_) => IntegrationKind::Structured,
            Integration::Leveled(_) => IntegrationKind::Leveled,
            Integration::Std(_) => IntegrationKind::Std,
        }
    }

    /// A handler forwarding every record to the external logger once.
    pub fn into_handler(self) -> Handler {
        match self {
            Integration::Structured(logger) => Arc::new(move |record: &Record| {
                logger.log(
                    StructuredLevel::from(record.level()),
                    record.message(),
                    record.fields(),
                );
                true
            }),
            Integration::Leveled(logger) => Arc::new(move |record: &Record| {
                let message = record.message();
                match record.level() {
                    LogLevel::ERROR => logger.error(message),
                    LogLevel::WARN => logger.warn(message),
                    LogLevel::INFO => logger.info(message),
                    LogLevel::DEBUG => logger.debug(message),
                    _ if record.new_line() => logger.println(message),
                    _ => logger.print(message),
                }
                true
            }),
            Integration::Std(logger) => Arc::new(move |record: &Record| {
                if record.new_line() {
                    logger.println(record.message());
                } else {
                    logger.print(record.message());
                }
                true
            }),
        }
    }
}

impl fmt::Debug for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Integration").field(&self.kind()).finish()
    }
}

/// Capability probe for values offered to [`Logger::install`](crate::Logger::install).
pub trait Integrable {
    /// The recognized shape, or `None` when the value fits none.
    fn integration(self) -> Option<Integration>;

    /// Human readable description used in error messages.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl Integrable for Integration {
    fn integration(self) -> Option<Integration> {
        Some(self)
    }
}

impl Integrable for Arc<dyn StructuredLogger> {
    fn integration(self) -> Option<Integration> {
        Some(Integration::Structured(self))
    }
}

impl Integrable for Arc<dyn LeveledLogger> {
    fn integration(self) -> Option<Integration> {
        Some(Integration::Leveled(self))
    }
}

impl Integrable for Arc<dyn StdLogger> {
    fn integration(self) -> Option<Integration> {
        Some(Integration::Std(self))
    }
}

/// Type-erased values are probed for a wrapped [`Integration`] or one of
/// the shared logger shapes.
impl Integrable for Box<dyn Any + Send + Sync> {
    fn integration(self) -> Option<Integration> {
        let value = match self.downcast::<Integration>() {
            Ok(integration) => return Some(*integration),
            Err(value) => value,
        };
        let value = match value.downcast::<Arc<dyn StructuredLogger>>() {
            Ok(logger) => return Some(Integration::Structured(*logger)),
            Err(value) => value,
        };
        let value = match value.downcast::<Arc<dyn LeveledLogger>>() {
            Ok(logger) => return Some(Integration::Leveled(*logger)),
            Err(value) => value,
        };
        value
            .downcast::<Arc<dyn StdLogger>>()
            .ok()
            .map(|logger| Integration::Std(*logger))
    }

    fn describe(&self) -> String {
        "type-erased value without a logger shape".to_string()
    }
}

/// Marks a [`StructuredLogger`] for installation.
#[derive(Debug, Clone)]
pub struct Structured<T>(pub T);

/// Marks a [`LeveledLogger`] for installation.
#[derive(Debug, Clone)]
pub struct Leveled<T>(pub T);

/// Marks a [`StdLogger`] for installation.
#[derive(Debug, Clone)]
pub struct Std<T>(pub T);

impl<T: StructuredLogger + 'static> Integrable for Structured<T> {
    fn integration(self) -> Option<Integration> {
        Some(Integration::structured(self.0))
    }
}

impl<T: LeveledLogger + 'static> Integrable for Leveled<T> {
    fn integration(self) -> Option<Integration> {
        Some(Integration::leveled(self.0))
    }
}

impl<T: StdLogger + 'static> Integrable for Std<T> {
    fn integration(self) -> Option<Integration> {
        Some(Integration::std(self.0))
    }
}
