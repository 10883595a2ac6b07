//! Main logger implementation

use super::args::{split_args, LogArg};
use super::children::{ChildKey, ChildRegistry};
use super::fields::Fields;
use super::formatter::{FormatOptions, Formatter, FormatterRegistry};
use super::handler::{Handler, HandlerChain};
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use super::record::{capture_stacktrace, Record};
use super::record_pool::RecordPool;
use super::scan::ScanHandle;
use super::settings::LoggerSettings;
use super::time_format::TimeFormat;
use super::{LoggerError, Result};
use crate::destinations::{ConsoleDestination, Destination};
use crate::formatters::text;
use crate::integration::Integrable;
use crate::printer::{Printer, WriteReport};
use chrono::Local;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::io::Read;
use std::sync::Arc;

/// Stacktrace limit used when none is configured: keep every frame.
pub const DEFAULT_STACKTRACE_LIMIT: i32 = 0;

#[derive(Clone)]
struct LoggerConfig {
    prefix: String,
    level: LogLevel,
    time_format: TimeFormat,
    stacktrace_limit: i32,
    new_line: bool,
    level_outputs: HashMap<LogLevel, Arc<Printer>>,
    formatters: FormatterRegistry,
    handlers: HandlerChain,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            level: LogLevel::INFO,
            time_format: TimeFormat::default(),
            stacktrace_limit: DEFAULT_STACKTRACE_LIMIT,
            new_line: true,
            level_outputs: HashMap::new(),
            formatters: FormatterRegistry::with_builtins(),
            handlers: HandlerChain::new(),
        }
    }
}

struct LoggerInner {
    printer: Arc<Printer>,
    config: RwLock<LoggerConfig>,
    children: ChildRegistry,
    pool: Arc<RecordPool>,
    metrics: LoggerMetrics,
}

/// Leveled logger.
///
/// `Logger` is a handle: cloning it yields the same logger. Use
/// [`Logger::fork`] for an independent copy writing to the same printer.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Logger writing to stdout at `info` level.
    pub fn new() -> Self {
        Self::from_parts(
            Arc::new(Printer::new(ConsoleDestination::stdout())),
            LoggerConfig::default(),
            Arc::new(RecordPool::new()),
        )
    }

    fn from_parts(printer: Arc<Printer>, config: LoggerConfig, pool: Arc<RecordPool>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                printer,
                config: RwLock::new(config),
                children: ChildRegistry::new(),
                pool,
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    /// Copy this logger's configuration into a new logger.
    ///
    /// The copy shares the printer, the record pool and the handler chain;
    /// prefix, level, time format, per-level outputs and formatters are its
    /// own from here on. Children are not copied.
    pub fn fork(&self) -> Logger {
        let config = self.inner.config.read().clone();
        Self::from_parts(
            Arc::clone(&self.inner.printer),
            config,
            Arc::clone(&self.inner.pool),
        )
    }

    /// Whether both handles refer to the same logger.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn printer(&self) -> &Arc<Printer> {
        &self.inner.printer
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    pub fn record_pool(&self) -> &RecordPool {
        &self.inner.pool
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.printer.flush()?;
        let outputs: Vec<Arc<Printer>> =
            self.inner.config.read().level_outputs.values().cloned().collect();
        for printer in outputs {
            printer.flush()?;
        }
        Ok(())
    }

    // Configuration

    /// Replace every destination of the shared printer.
    pub fn set_output<D: Destination + 'static>(&self, destination: D) -> &Self {
        self.inner.printer.set_destination(destination);
        self
    }

    /// Add a destination to the shared printer.
    pub fn add_output<D: Destination + 'static>(&self, destination: D) -> &Self {
        self.inner.printer.add_destination(destination);
        self
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) -> &Self {
        self.inner.config.write().prefix = prefix.into();
        self
    }

    /// Append `prefix` to the current prefix instead of replacing it.
    ///
    /// The appended part always ends with `": "`, and a space separates it
    /// from a non-empty existing prefix.
    pub fn set_child_prefix(&self, prefix: &str) -> &Self {
        if prefix.is_empty() {
            return self;
        }

        let mut config = self.inner.config.write();
        if !config.prefix.is_empty() && !config.prefix.ends_with(' ') {
            config.prefix.push(' ');
        }
        config.prefix.push_str(prefix);
        if !prefix.ends_with(": ") {
            config.prefix.push_str(": ");
        }
        self
    }

    pub fn prefix(&self) -> String {
        self.inner.config.read().prefix.clone()
    }

    pub fn set_level(&self, level: LogLevel) -> &Self {
        self.inner.config.write().level = level;
        self
    }

    /// Set the level by name; unknown names disable leveled output.
    pub fn set_level_name(&self, name: &str) -> &Self {
        self.set_level(LogLevel::parse(name))
    }

    pub fn level(&self) -> LogLevel {
        self.inner.config.read().level
    }

    /// Set the strftime pattern of record timestamps; `""` disables them.
    pub fn set_time_format(&self, pattern: &str) -> Result<&Self> {
        let format = TimeFormat::new(pattern)?;
        self.inner.config.write().time_format = format;
        Ok(self)
    }

    pub fn time_format(&self) -> TimeFormat {
        self.inner.config.read().time_format.clone()
    }

    /// Frames kept on `debug` records: 0 keeps all, a negative limit
    /// disables capture.
    pub fn set_stacktrace_limit(&self, limit: i32) -> &Self {
        self.inner.config.write().stacktrace_limit = limit;
        self
    }

    pub fn stacktrace_limit(&self) -> i32 {
        self.inner.config.read().stacktrace_limit
    }

    /// Whether leveled records end with a newline.
    pub fn set_new_line(&self, new_line: bool) -> &Self {
        self.inner.config.write().new_line = new_line;
        self
    }

    pub fn new_line(&self) -> bool {
        self.inner.config.read().new_line
    }

    /// Send records of `level` to `destination` instead of the shared
    /// printer.
    pub fn set_level_output<D: Destination + 'static>(&self, level: LogLevel, destination: D) -> &Self {
        self.set_level_printer(level, Arc::new(Printer::new(destination)))
    }

    pub fn set_level_printer(&self, level: LogLevel, printer: Arc<Printer>) -> &Self {
        self.inner.config.write().level_outputs.insert(level, printer);
        self
    }

    pub fn remove_level_output(&self, level: LogLevel) -> &Self {
        self.inner.config.write().level_outputs.remove(&level);
        self
    }

    /// The printer records of `level` are written to.
    pub fn level_output(&self, level: LogLevel) -> Arc<Printer> {
        self.inner
            .config
            .read()
            .level_outputs
            .get(&level)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.inner.printer))
    }

    pub fn register_formatter(&self, formatter: Arc<dyn Formatter>) -> &Self {
        self.inner.config.write().formatters.register(formatter);
        self
    }

    /// Format every level without an override with the formatter `name`.
    pub fn set_format(&self, name: &str, options: &FormatOptions) -> Result<&Self> {
        self.inner.config.write().formatters.set_active(name, options)?;
        Ok(self)
    }

    pub fn set_level_format(
        &self,
        level: LogLevel,
        name: &str,
        options: &FormatOptions,
    ) -> Result<&Self> {
        self.inner
            .config
            .write()
            .formatters
            .set_level(level, name, options)?;
        Ok(self)
    }

    /// Back to the default text layout for levels without an override.
    pub fn clear_format(&self) -> &Self {
        self.inner.config.write().formatters.clear_active();
        self
    }

    pub fn active_format(&self) -> Option<String> {
        self.inner
            .config
            .read()
            .formatters
            .active_name()
            .map(str::to_string)
    }

    /// Append a handler. Handlers run in registration order until one
    /// returns `true`.
    pub fn handle<F>(&self, handler: F) -> &Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.handle_shared(Arc::new(handler))
    }

    pub fn handle_shared(&self, handler: Handler) -> &Self {
        self.inner.config.write().handlers.push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.inner.config.read().handlers.len()
    }

    /// Route every record to an external logger.
    ///
    /// # Panics
    ///
    /// When `external` exposes none of the supported logger shapes.
    pub fn install<T: Integrable>(&self, external: T) -> &Self {
        if let Err(err) = self.try_install(external) {
            panic!("{}", err);
        }
        self
    }

    pub fn try_install<T: Integrable>(&self, external: T) -> Result<&Self> {
        let description = external.describe();
        let integration = external
            .integration()
            .ok_or_else(|| LoggerError::unsupported_integration(description))?;
        Ok(self.handle_shared(integration.into_handler()))
    }

    // Printing

    /// Print `message` without level tag; no newline is added.
    pub fn print(&self, message: impl AsRef<str>) {
        self.dispatch(LogLevel::DISABLE, Some(false), None, format_args!("{}", message.as_ref()));
    }

    /// Print `message` without level tag, ending the line.
    pub fn println(&self, message: impl AsRef<str>) {
        self.dispatch(LogLevel::DISABLE, Some(true), None, format_args!("{}", message.as_ref()));
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.dispatch(level, None, None, format_args!("{}", message.as_ref()));
    }

    pub fn log_with_fields(&self, level: LogLevel, message: impl AsRef<str>, fields: Fields) {
        self.dispatch(level, None, Some(fields), format_args!("{}", message.as_ref()));
    }

    /// Log preformatted arguments; used by the logging macros.
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>, fields: Option<Fields>) {
        self.dispatch(level, None, fields, args);
    }

    /// Log mixed operands: field maps are merged into the record, the rest
    /// forms the message.
    pub fn log_args<I>(&self, level: LogLevel, args: I)
    where
        I: IntoIterator<Item = LogArg>,
    {
        if !self.enabled(level) {
            self.inner.metrics.record_gated();
            return;
        }
        let (message, fields) = split_args(args);
        let fields = (!fields.is_empty()).then_some(fields);
        self.dispatch(level, None, fields, format_args!("{}", message));
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::ERROR, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::WARN, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::INFO, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::DEBUG, message);
    }

    pub fn error_with_fields(&self, message: impl AsRef<str>, fields: Fields) {
        self.log_with_fields(LogLevel::ERROR, message, fields);
    }

    pub fn warn_with_fields(&self, message: impl AsRef<str>, fields: Fields) {
        self.log_with_fields(LogLevel::WARN, message, fields);
    }

    pub fn info_with_fields(&self, message: impl AsRef<str>, fields: Fields) {
        self.log_with_fields(LogLevel::INFO, message, fields);
    }

    pub fn debug_with_fields(&self, message: impl AsRef<str>, fields: Fields) {
        self.log_with_fields(LogLevel::DEBUG, message, fields);
    }

    /// Log at `fatal` regardless of the configured level, then exit the
    /// process with status 1.
    pub fn fatal(&self, message: impl AsRef<str>) -> ! {
        self.dispatch(LogLevel::FATAL, None, None, format_args!("{}", message.as_ref()));
        unreachable!("fatal records exit the process")
    }

    pub fn fatal_with_fields(&self, message: impl AsRef<str>, fields: Fields) -> ! {
        self.dispatch(LogLevel::FATAL, None, Some(fields), format_args!("{}", message.as_ref()));
        unreachable!("fatal records exit the process")
    }

    /// Whether a record at `level` would pass the level gate.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.inner.config.read().level.enables(level)
    }

    /// The print path: gate, fill a pooled record, run handlers, format and
    /// write, release. `new_line` of `None` uses the logger's default.
    fn dispatch(
        &self,
        level: LogLevel,
        new_line: Option<bool>,
        fields: Option<Fields>,
        message: fmt::Arguments<'_>,
    ) {
        let config = self.inner.config.read();
        if !config.level.enables(level) {
            drop(config);
            self.inner.metrics.record_gated();
            return;
        }

        let mut record = self.inner.pool.acquire();
        if config.time_format.is_enabled() {
            record.time = Some(Local::now());
        }
        record.time_format.clone_from(&config.time_format);
        record.prefix.push_str(&config.prefix);
        record.new_line = new_line.unwrap_or(config.new_line);

        let stacktrace_limit = config.stacktrace_limit;
        let handlers = config.handlers.clone();
        let formatter = config.formatters.resolve(level);
        let output = config.level_outputs.get(&level).cloned();
        // Handlers may call back into this logger.
        drop(config);

        record.level = level;
        let _ = record.message.write_fmt(message);
        if let Some(fields) = fields {
            record.fields.merge(fields);
        }
        if level == LogLevel::DEBUG {
            capture_stacktrace(stacktrace_limit, &mut record.stacktrace);
        }
        record.logger = Some(self.clone());

        if handlers.dispatch(&record) {
            self.inner.metrics.record_handled();
        } else {
            let printer = output.as_deref().unwrap_or(&self.inner.printer);
            let report = formatter
                .as_ref()
                .and_then(|formatter| formatter.format(printer, &record))
                .unwrap_or_else(|| text::write_record(printer, &record));
            self.note_write(&report);
            self.inner.metrics.record_logged();
        }

        drop(record);

        if level == LogLevel::FATAL {
            let _ = self.flush();
            std::process::exit(1);
        }
    }

    /// Account for the outcome of a fan-out write.
    pub(crate) fn note_write(&self, report: &WriteReport) {
        if let Some(err) = &report.error {
            let failed = self.inner.metrics.record_failed_write();
            // Alert on the first failure and periodically thereafter
            if failed == 0 || (failed + 1) % 1000 == 0 {
                eprintln!(
                    "[LOGGER WARNING] Write to log destination failed ({} failures so far): {}",
                    failed + 1,
                    err
                );
            }
        }
    }

    /// Copy `reader` line by line to the shared printer on a background
    /// thread, until the stream ends or the scan is cancelled.
    pub fn scan<R: Read + Send + 'static>(&self, reader: R) -> ScanHandle {
        ScanHandle::spawn(self.clone(), reader)
    }

    // Children

    /// The child registered under `key`, created on first use.
    ///
    /// A new child is a [`fork`](Logger::fork) whose prefix is extended with
    /// the key's display text.
    pub fn child(&self, key: impl Into<ChildKey>) -> Logger {
        self.inner.children.get_or_create(key.into(), |key| {
            let child = self.fork();
            if let Some(text) = key.display_text() {
                child.set_child_prefix(text);
            }
            child
        })
    }

    pub fn get_child(&self, key: impl Into<ChildKey>) -> Option<Logger> {
        self.inner.children.get(&key.into())
    }

    pub fn last_child(&self) -> Option<Logger> {
        self.inner.children.last()
    }

    pub fn remove_child(&self, key: impl Into<ChildKey>) -> bool {
        self.inner.children.remove(&key.into())
    }

    pub fn clear_children(&self) {
        self.inner.children.clear();
    }

    pub fn child_count(&self) -> usize {
        self.inner.children.count()
    }

    /// Child keys in creation order.
    pub fn child_keys(&self) -> Vec<ChildKey> {
        self.inner.children.keys()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.inner.config.read();
        f.debug_struct("Logger")
            .field("prefix", &config.prefix)
            .field("level", &config.level)
            .field("time_format", &config.time_format)
            .field("stacktrace_limit", &config.stacktrace_limit)
            .field("new_line", &config.new_line)
            .field("printer", &self.inner.printer)
            .field("formatters", &config.formatters)
            .field("handlers", &config.handlers)
            .field("children", &self.inner.children)
            .finish()
    }
}

/// Builder for [`Logger`]
///
/// # Example
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::DEBUG)
///     .prefix("api: ")
///     .time_format(TimeFormat::rfc3339())
///     .output(BufferDestination::new())
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::DEBUG);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    outputs: Vec<Box<dyn Destination>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            outputs: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimeFormat) -> Self {
        self.config.time_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stacktrace_limit(mut self, limit: i32) -> Self {
        self.config.stacktrace_limit = limit;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn new_line(mut self, new_line: bool) -> Self {
        self.config.new_line = new_line;
        self
    }

    /// Add a destination of the shared printer. Without any, the logger
    /// writes to stdout.
    #[must_use = "builder methods return a new value"]
    pub fn output<D: Destination + 'static>(mut self, destination: D) -> Self {
        self.outputs.push(Box::new(destination));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_output<D: Destination + 'static>(mut self, level: LogLevel, destination: D) -> Self {
        self.config
            .level_outputs
            .insert(level, Arc::new(Printer::new(destination)));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.config.formatters.register(formatter);
        self
    }

    /// Select the active formatter; it must be built in or registered
    /// through [`LoggerBuilder::formatter`] first.
    pub fn format(mut self, name: &str, options: &FormatOptions) -> Result<Self> {
        self.config.formatters.set_active(name, options)?;
        Ok(self)
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.config.handlers.push(Arc::new(handler));
        self
    }

    /// Apply loaded settings; fields missing from `settings` keep their
    /// current value.
    pub fn settings(mut self, settings: &LoggerSettings) -> Result<Self> {
        if let Some(level) = &settings.level {
            self.config.level = level
                .parse()
                .map_err(|message: String| LoggerError::config("level", message))?;
        }
        if let Some(prefix) = &settings.prefix {
            self.config.prefix = prefix.clone();
        }
        if let Some(pattern) = &settings.time_format {
            self.config.time_format = TimeFormat::new(pattern.as_str())?;
        }
        if let Some(limit) = settings.stacktrace_limit {
            self.config.stacktrace_limit = limit;
        }
        if let Some(new_line) = settings.new_line {
            self.config.new_line = new_line;
        }
        if let Some(format) = &settings.format {
            self = self.format(format, &settings.format_options())?;
        }
        Ok(self)
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut outputs = self.outputs.into_iter();
        let printer = match outputs.next() {
            Some(first) => {
                let printer = Printer::from_boxed(first);
                printer.add_destinations(outputs);
                printer
            }
            None => Printer::new(ConsoleDestination::stdout()),
        };

        Logger::from_parts(Arc::new(printer), self.config, Arc::new(RecordPool::new()))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destinations::BufferDestination;

    fn buffered() -> (Logger, BufferDestination) {
        let buffer = BufferDestination::new();
        let logger = Logger::builder()
            .time_format(TimeFormat::disabled())
            .output(buffer.clone())
            .build();
        (logger, buffer)
    }

    #[test]
    fn test_builder_basic() {
        let logger = Logger::builder().level(LogLevel::DEBUG).build();
        assert_eq!(logger.level(), LogLevel::DEBUG);
        assert_eq!(logger.metrics().total_logged(), 0);
    }

    #[test]
    fn test_level_gate() {
        let (logger, buffer) = buffered();
        logger.set_level(LogLevel::WARN);

        logger.info("hidden");
        logger.warn("shown");
        logger.error("also shown");

        assert_eq!(buffer.contents(), "[WARN] shown\n[ERRO] also shown\n");
        assert_eq!(logger.metrics().gated_count(), 1);
        assert_eq!(logger.metrics().total_logged(), 2);
    }

    #[test]
    fn test_disable_still_prints_unleveled() {
        let (logger, buffer) = buffered();
        logger.set_level_name("disable");

        logger.error("nope");
        logger.print("raw");
        logger.println(" line");

        assert_eq!(buffer.contents(), "raw line\n");
    }

    #[test]
    fn test_new_line_default_off() {
        let (logger, buffer) = buffered();
        logger.set_new_line(false);

        logger.info("a");
        logger.info("b");

        assert_eq!(buffer.contents(), "[INFO] a[INFO] b");
    }

    #[test]
    fn test_child_prefix_is_appended() {
        let (logger, buffer) = buffered();
        logger.set_prefix("app");

        let db = logger.child("db");
        assert_eq!(db.prefix(), "app db: ");
        db.info("connected");

        let pool = db.child("pool");
        assert_eq!(pool.prefix(), "app db: pool: ");

        assert_eq!(buffer.contents(), "[INFO] app db: connected\n");
        assert_eq!(logger.prefix(), "app");
    }

    #[test]
    fn test_child_configuration_is_independent() {
        let (logger, buffer) = buffered();
        let child = logger.child(ChildKey::Id(1));
        child.set_level(LogLevel::ERROR);

        child.info("child info");
        logger.info("parent info");

        assert_eq!(child.prefix(), "");
        assert_eq!(buffer.contents(), "[INFO] parent info\n");
    }

    #[test]
    fn test_level_output_override() {
        let (logger, shared) = buffered();
        let errors = BufferDestination::new();
        logger.set_level_output(LogLevel::ERROR, errors.clone());

        logger.error("bad");
        logger.info("fine");

        assert_eq!(errors.contents(), "[ERRO] bad\n");
        assert_eq!(shared.contents(), "[INFO] fine\n");
    }

    #[test]
    fn test_handler_short_circuits_output() {
        let (logger, buffer) = buffered();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger.handle(move |record| {
            sink.lock().push(record.message().to_string());
            true
        });

        logger.info("intercepted");

        assert!(buffer.is_empty());
        assert_eq!(*seen.lock(), vec!["intercepted".to_string()]);
        assert_eq!(logger.metrics().handled_count(), 1);
    }

    #[test]
    fn test_handler_may_log_through_same_logger() {
        let (logger, buffer) = buffered();
        logger.handle(|record| {
            if record.message() == "outer" {
                if let Some(owner) = record.logger() {
                    owner.info("inner");
                }
            }
            false
        });

        logger.info("outer");

        assert_eq!(buffer.contents(), "[INFO] inner\n[INFO] outer\n");
    }

    #[test]
    fn test_unknown_format_is_error() {
        let (logger, _) = buffered();
        let err = logger.set_format("yaml", &FormatOptions::new()).unwrap_err();
        assert!(matches!(err, LoggerError::UnknownFormatter { .. }));
        assert!(logger.active_format().is_none());
    }

    #[test]
    fn test_log_args_splits_fields() {
        let (logger, buffer) = buffered();

        logger.log_args(
            LogLevel::INFO,
            vec![
                LogArg::from("took "),
                LogArg::from(Fields::new().with_field("ms", 12)),
                LogArg::from(12),
            ],
        );

        assert_eq!(buffer.contents(), "[INFO] took 12 ms=12\n");
    }

    #[test]
    fn test_invalid_time_format_keeps_previous() {
        let (logger, _) = buffered();
        assert!(logger.set_time_format("%Q").is_err());
        assert!(!logger.time_format().is_enabled());
    }

    #[test]
    fn test_records_are_returned_to_pool() {
        let (logger, _) = buffered();
        for i in 0..100 {
            logger.info(format!("message {}", i));
        }
        assert_eq!(logger.record_pool().allocated(), 1);
        assert_eq!(logger.record_pool().idle(), 1);
    }
}
