//! Thread-safe fan-out writer
//!
//! A [`Printer`] owns an ordered list of destinations and, in parallel, one
//! rich-text capability flag per destination. Every write goes to all
//! destinations under a single lock, so concurrent records never interleave
//! on any of them. A failing destination does not stop the fan-out: the
//! remaining destinations are still written and the last error is reported.

pub mod rich;

pub use rich::{colors_enabled, rich, supports_rich, RichLine, RichOption};

use crate::destinations::Destination;
use colored::Color;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Outcome of one fan-out write.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Largest byte count reported by any destination
    pub written: usize,
    /// Last error seen during the fan-out, if any
    pub error: Option<io::Error>,
}

impl WriteReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> io::Result<usize> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }

    fn record(&mut self, result: io::Result<usize>) {
        match result {
            Ok(written) => self.written = self.written.max(written),
            Err(err) => self.error = Some(err),
        }
    }
}

struct PrinterState {
    destinations: Vec<Box<dyn Destination>>,
    rich: Vec<bool>,
}

impl PrinterState {
    fn resync_rich(&mut self) {
        self.rich = self
            .destinations
            .iter()
            .map(|destination| supports_rich(destination.as_ref()))
            .collect();
    }
}

/// Write to one destination, turning a panic inside it into an error so
/// the rest of the fan-out still runs.
fn isolated_write(destination: &mut Box<dyn Destination>, data: &[u8]) -> io::Result<usize> {
    match catch_unwind(AssertUnwindSafe(|| destination.write_all(data))) {
        Ok(Ok(())) => Ok(data.len()),
        Ok(Err(err)) => Err(err),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(io::Error::other(format!("destination panicked: {}", panic_msg)))
        }
    }
}

pub struct Printer {
    state: Mutex<PrinterState>,
}

impl Printer {
    pub fn new<D: Destination + 'static>(destination: D) -> Self {
        Self::from_boxed(Box::new(destination))
    }

    pub fn from_boxed(destination: Box<dyn Destination>) -> Self {
        let mut state = PrinterState {
            destinations: vec![destination],
            rich: Vec::new(),
        };
        state.resync_rich();

        Self {
            state: Mutex::new(state),
        }
    }

    /// Replace every destination with `destination`.
    pub fn set_destination<D: Destination + 'static>(&self, destination: D) {
        self.set_boxed_destination(Box::new(destination));
    }

    pub fn set_boxed_destination(&self, destination: Box<dyn Destination>) {
        let mut state = self.state.lock();
        state.destinations = vec![destination];
        state.resync_rich();
    }

    pub fn add_destination<D: Destination + 'static>(&self, destination: D) {
        self.add_destinations(std::iter::once(Box::new(destination) as Box<dyn Destination>));
    }

    /// Append destinations and recompute the capability flag of every
    /// destination, old and new.
    pub fn add_destinations<I>(&self, destinations: I)
    where
        I: IntoIterator<Item = Box<dyn Destination>>,
    {
        let mut state = self.state.lock();
        state.destinations.extend(destinations);
        state.resync_rich();
    }

    pub fn len(&self) -> usize {
        self.state.lock().destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().destinations.is_empty()
    }

    /// Capability flags, index-aligned with the destinations.
    pub fn rich_flags(&self) -> Vec<bool> {
        self.state.lock().rich.clone()
    }

    pub fn has_rich_destination(&self) -> bool {
        self.state.lock().rich.iter().any(|rich| *rich)
    }

    /// Write `data` to every destination in order.
    pub fn write(&self, data: &[u8]) -> WriteReport {
        let mut report = WriteReport::default();
        if data.is_empty() {
            return report;
        }

        let mut state = self.state.lock();
        for destination in state.destinations.iter_mut() {
            report.record(isolated_write(destination, data));
        }
        report
    }

    pub fn write_str(&self, text: &str) -> WriteReport {
        self.write(text.as_bytes())
    }

    /// Write `text` styled to rich destinations and plain to the others.
    /// The styled encoding is rendered at most once.
    pub fn write_rich(&self, text: &str, color: Color, options: &[RichOption]) -> WriteReport {
        let mut report = WriteReport::default();
        if text.is_empty() {
            return report;
        }

        let mut styled: Option<String> = None;
        let mut state = self.state.lock();
        let PrinterState { destinations, rich } = &mut *state;
        for (destination, supports) in destinations.iter_mut().zip(rich.iter()) {
            let data = if *supports {
                styled
                    .get_or_insert_with(|| self::rich(text, color, options))
                    .as_str()
            } else {
                text
            };
            report.record(isolated_write(destination, data.as_bytes()));
        }
        report
    }

    /// Write a composed line, choosing the encoding per destination.
    ///
    /// A line composed without a styled encoding is written plain
    /// everywhere.
    pub fn write_line(&self, line: &RichLine) -> WriteReport {
        let mut report = WriteReport::default();
        if line.is_empty() {
            return report;
        }

        let plain = line.plain().as_bytes();
        let mut state = self.state.lock();
        let PrinterState { destinations, rich } = &mut *state;
        for (destination, supports) in destinations.iter_mut().zip(rich.iter()) {
            let data = match line.rich() {
                Some(styled) if *supports => styled.as_bytes(),
                _ => plain,
            };
            report.record(isolated_write(destination, data));
        }
        report
    }

    pub fn flush(&self) -> io::Result<()> {
        let mut last_err = None;
        let mut state = self.state.lock();
        for destination in state.destinations.iter_mut() {
            if let Err(err) = destination.flush() {
                last_err = Some(err);
            }
        }
        match last_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Write for &Printer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Printer::write(*self, buf).into_result()
    }

    fn flush(&mut self) -> io::Result<()> {
        Printer::flush(*self)
    }
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Printer")
            .field("destinations", &state.destinations.len())
            .field("rich", &state.rich)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destinations::{BufferDestination, NopDestination};

    struct FailingDestination;

    impl Write for FailingDestination {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Destination for FailingDestination {}

    struct PanickingDestination;

    impl Write for PanickingDestination {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            panic!("disk on fire")
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Destination for PanickingDestination {}

    #[test]
    fn test_write_reaches_every_destination() {
        let first = BufferDestination::new();
        let second = BufferDestination::new();
        let printer = Printer::new(first.clone());
        printer.add_destination(second.clone());

        let report = printer.write(b"hello\n");

        assert!(report.is_ok());
        assert_eq!(report.written, 6);
        assert_eq!(first.contents(), "hello\n");
        assert_eq!(second.contents(), "hello\n");
    }

    #[test]
    fn test_failure_does_not_stop_fan_out() {
        let healthy = BufferDestination::new();
        let printer = Printer::new(FailingDestination);
        printer.add_destination(healthy.clone());

        let report = printer.write(b"record\n");

        assert_eq!(healthy.contents(), "record\n");
        let err = report.error.expect("failure should be reported");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_panicking_destination_is_isolated() {
        let healthy = BufferDestination::new();
        let printer = Printer::new(PanickingDestination);
        printer.add_destination(healthy.clone());

        let err = printer.write(b"still here\n").into_result().unwrap_err();

        assert!(err.to_string().contains("disk on fire"));
        assert_eq!(healthy.contents(), "still here\n");
    }

    #[test]
    fn test_rich_flags_follow_destinations() {
        let printer = Printer::new(NopDestination);
        assert_eq!(printer.rich_flags(), vec![false]);

        printer.add_destination(BufferDestination::new());
        printer.add_destination(BufferDestination::new());
        assert_eq!(printer.rich_flags(), vec![false, false, false]);
        assert_eq!(printer.len(), 3);

        printer.set_destination(BufferDestination::new());
        assert_eq!(printer.rich_flags(), vec![false]);
        assert_eq!(printer.len(), 1);
    }

    #[test]
    fn test_write_rich_plain_for_non_terminal() {
        let buffer = BufferDestination::new();
        let printer = Printer::new(buffer.clone());

        printer.write_rich("[WARN]", Color::Magenta, &[RichOption::Bold]);

        assert_eq!(buffer.contents(), "[WARN]");
    }

    #[test]
    fn test_write_rich_styles_terminal_destinations() {
        colored::control::set_override(true);

        let first = BufferDestination::terminal();
        let second = BufferDestination::terminal();
        let plain = BufferDestination::new();
        let printer = Printer::new(first.clone());
        printer.add_destinations([
            Box::new(plain.clone()) as Box<dyn Destination>,
            Box::new(second.clone()),
        ]);
        assert_eq!(printer.rich_flags(), vec![true, false, true]);

        let report = printer.write_rich("[WARN]", Color::Magenta, &[RichOption::Bold]);
        let expected = rich("[WARN]", Color::Magenta, &[RichOption::Bold]);

        colored::control::unset_override();

        assert!(report.is_ok());
        assert_eq!(report.written, expected.len());
        assert!(expected.starts_with("\x1b["), "{:?}", expected);
        assert_eq!(first.contents(), expected);
        assert_eq!(second.contents(), expected);
        assert_eq!(plain.contents(), "[WARN]");
    }

    #[test]
    fn test_empty_write_is_skipped() {
        let buffer = BufferDestination::new();
        let printer = Printer::new(buffer.clone());

        let report = printer.write(b"");

        assert_eq!(report.written, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_printer_as_io_write() {
        let buffer = BufferDestination::new();
        let printer = Printer::new(buffer.clone());

        writeln!(&printer, "{} items", 3).unwrap();

        assert_eq!(buffer.contents(), "3 items\n");
    }
}
