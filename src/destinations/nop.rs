//! Destination that discards all output

use super::Destination;
use std::io::{self, Write};

/// Discards every write and reports the full length as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopDestination;

impl Write for NopDestination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Destination for NopDestination {
    fn is_nop(&self) -> bool {
        true
    }
}
