//! Stream scanning
//!
//! [`Logger::scan`](super::Logger::scan) copies a byte stream line by line
//! to the logger's printer on a dedicated thread.

use super::logger::Logger;
use chrono::Local;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::io::{BufRead, BufReader, Read};
use std::thread::{self, JoinHandle};

/// Handle of a running scan.
///
/// Cancellation takes effect before the next line is written; a read that
/// is already blocked finishes first.
pub struct ScanHandle {
    cancel: Mutex<Option<Sender<()>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ScanHandle {
    pub(crate) fn spawn<R>(logger: Logger, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let worker = thread::Builder::new()
            .name("logger-scan".to_string())
            .spawn(move || scan_lines(&logger, reader, &cancel_rx));

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to spawn scan thread: {}", e);
                None
            }
        };

        Self {
            cancel: Mutex::new(Some(cancel_tx)),
            worker: Mutex::new(worker),
        }
    }

    /// Stop the scan. Safe to call any number of times, also after the
    /// stream has ended.
    ///
    /// Dropping the handle does not cancel: the scan then runs until the
    /// stream ends.
    pub fn cancel(&self) {
        if let Some(cancel_tx) = self.cancel.lock().take() {
            // Disconnected once the worker has exited; nothing left to stop.
            let _ = cancel_tx.try_send(());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.lock().is_none()
    }

    /// True once the worker has exited.
    pub fn is_finished(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the worker to exit.
    pub fn join(&self) {
        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            if worker.join().is_err() {
                eprintln!("[LOGGER ERROR] Scan thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for ScanHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanHandle")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}

// Only an explicit signal counts; a disconnect means the handle was dropped.
fn cancelled(cancel_rx: &Receiver<()>) -> bool {
    cancel_rx.try_recv().is_ok()
}

fn scan_lines<R: Read>(logger: &Logger, reader: R, cancel_rx: &Receiver<()>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(256);
    let mut line = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {}
            Err(e) => {
                eprintln!("[LOGGER WARNING] Scan stopped on read error: {}", e);
                return;
            }
        }
        if cancelled(cancel_rx) {
            return;
        }

        let content = trim_line_ending(&buf);
        if content.is_empty() {
            continue;
        }

        line.clear();
        let time_format = logger.time_format();
        if time_format.is_enabled() {
            line.extend_from_slice(time_format.format(&Local::now()).as_bytes());
            line.push(b' ');
        }
        line.extend_from_slice(content);
        line.push(b'\n');

        let report = logger.printer().write(&line);
        logger.note_write(&report);
    }
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending(b"abc\r\n"), b"abc");
        assert_eq!(trim_line_ending(b"abc\n"), b"abc");
        assert_eq!(trim_line_ending(b"abc"), b"abc");
        assert_eq!(trim_line_ending(b"\n"), b"");
    }
}
