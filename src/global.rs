//! Process-wide default logger
//!
//! The default logger is created on first use, writing to stdout. It is
//! only ever replaced through [`reset`].

use crate::core::{ChildKey, Fields, LogLevel, Logger, Record, Result, ScanHandle};
use crate::destinations::Destination;
use crate::integration::Integrable;
use parking_lot::RwLock;
use std::io::Read;
use std::sync::OnceLock;

fn slot() -> &'static RwLock<Logger> {
    static DEFAULT: OnceLock<RwLock<Logger>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(Logger::new()))
}

/// Handle of the current default logger.
pub fn default_logger() -> Logger {
    slot().read().clone()
}

/// Replace the default logger, returning the previous one.
pub fn reset(logger: Logger) -> Logger {
    std::mem::replace(&mut *slot().write(), logger)
}

pub fn set_output<D: Destination + 'static>(destination: D) {
    default_logger().set_output(destination);
}

pub fn add_output<D: Destination + 'static>(destination: D) {
    default_logger().add_output(destination);
}

pub fn set_prefix(prefix: impl Into<String>) {
    default_logger().set_prefix(prefix);
}

pub fn set_time_format(pattern: &str) -> Result<()> {
    default_logger().set_time_format(pattern)?;
    Ok(())
}

pub fn set_level(level: LogLevel) {
    default_logger().set_level(level);
}

pub fn set_level_name(name: &str) {
    default_logger().set_level_name(name);
}

pub fn set_stacktrace_limit(limit: i32) {
    default_logger().set_stacktrace_limit(limit);
}

pub fn print(message: impl AsRef<str>) {
    default_logger().print(message);
}

pub fn println(message: impl AsRef<str>) {
    default_logger().println(message);
}

pub fn log(level: LogLevel, message: impl AsRef<str>) {
    default_logger().log(level, message);
}

pub fn log_with_fields(level: LogLevel, message: impl AsRef<str>, fields: Fields) {
    default_logger().log_with_fields(level, message, fields);
}

pub fn error(message: impl AsRef<str>) {
    default_logger().error(message);
}

pub fn warn(message: impl AsRef<str>) {
    default_logger().warn(message);
}

pub fn info(message: impl AsRef<str>) {
    default_logger().info(message);
}

pub fn debug(message: impl AsRef<str>) {
    default_logger().debug(message);
}

pub fn fatal(message: impl AsRef<str>) -> ! {
    default_logger().fatal(message)
}

pub fn handle<F>(handler: F)
where
    F: Fn(&Record) -> bool + Send + Sync + 'static,
{
    default_logger().handle(handler);
}

/// # Panics
///
/// When `external` exposes none of the supported logger shapes.
pub fn install<T: Integrable>(external: T) {
    default_logger().install(external);
}

pub fn try_install<T: Integrable>(external: T) -> Result<()> {
    default_logger().try_install(external)?;
    Ok(())
}

pub fn scan<R: Read + Send + 'static>(reader: R) -> ScanHandle {
    default_logger().scan(reader)
}

pub fn child(key: impl Into<ChildKey>) -> Logger {
    default_logger().child(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeFormat;
    use crate::destinations::BufferDestination;

    #[test]
    fn test_reset_swaps_default_logger() {
        let buffer = BufferDestination::new();
        let replacement = Logger::builder()
            .time_format(TimeFormat::disabled())
            .output(buffer.clone())
            .build();

        let previous = reset(replacement.clone());
        info("through the default");
        let db = child("db");

        assert!(default_logger().ptr_eq(&replacement));
        assert!(db.ptr_eq(&replacement.child("db")));
        assert_eq!(buffer.contents(), "[INFO] through the default\n");

        reset(previous);
    }
}
