//! Output destinations
//!
//! A destination is anything that accepts bytes. The [`Printer`](crate::Printer)
//! fans each write out to all of its destinations and asks every one of
//! them whether it is a no-op sink or attached to a terminal, which feeds
//! the rich-text capability check.

pub mod console;
pub mod file;
pub mod memory;
pub mod nop;

pub use console::ConsoleDestination;
pub use file::FileDestination;
pub use memory::BufferDestination;
pub use nop::NopDestination;

use std::fs::File;
use std::io::{self, IsTerminal, Write};

/// A byte sink the printer can write to.
pub trait Destination: Write + Send {
    /// True for sinks that discard everything.
    fn is_nop(&self) -> bool {
        false
    }

    /// True when the sink is attached to a terminal.
    fn is_terminal(&self) -> bool {
        false
    }
}

impl Destination for io::Stdout {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Destination for io::Stderr {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Destination for File {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Destination for io::Sink {
    fn is_nop(&self) -> bool {
        true
    }
}

impl Destination for Vec<u8> {}

impl<D: Destination + ?Sized> Destination for Box<D> {
    fn is_nop(&self) -> bool {
        Destination::is_nop(&**self)
    }

    fn is_terminal(&self) -> bool {
        Destination::is_terminal(&**self)
    }
}
