//! In-memory destination
//!
//! Useful to capture output in tests or to collect log lines for later
//! inspection. Cloning the destination yields another handle to the same
//! buffer.

use super::Destination;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct BufferDestination {
    buffer: Arc<Mutex<Vec<u8>>>,
    terminal: bool,
}

impl BufferDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer that claims to be a terminal, so the printer routes the
    /// styled encoding to it whenever colors are enabled.
    pub fn terminal() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
            terminal: true,
        }
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Write for BufferDestination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Destination for BufferDestination {
    fn is_terminal(&self) -> bool {
        self.terminal
    }
}
