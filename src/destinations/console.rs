//! Console destination implementation

use super::Destination;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes to the process stdout or stderr.
///
/// Each write locks the standard stream for its duration so a record is
/// never split by other writers of the same stream.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleDestination {
    stream: Stream,
}

impl ConsoleDestination {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    pub fn is_stderr(&self) -> bool {
        self.stream == Stream::Stderr
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Write for ConsoleDestination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write(buf),
            Stream::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(buf),
            Stream::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}

impl Destination for ConsoleDestination {
    fn is_terminal(&self) -> bool {
        match self.stream {
            Stream::Stdout => IsTerminal::is_terminal(&io::stdout()),
            Stream::Stderr => IsTerminal::is_terminal(&io::stderr()),
        }
    }
}
