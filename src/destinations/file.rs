//! File destination implementation

use super::Destination;
use crate::core::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Appends to a file, creating it when missing.
///
/// With locking enabled (feature `file`) every write takes an exclusive
/// advisory lock, so several processes can append to the same file
/// without interleaving partial records.
#[derive(Debug)]
pub struct FileDestination {
    file: File,
    path: PathBuf,
    locking: bool,
}

impl FileDestination {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            file,
            path,
            locking: false,
        })
    }

    /// Take an exclusive file lock around each write. Without the `file`
    /// feature the flag only switches to whole-buffer writes.
    #[must_use]
    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(feature = "file")]
    fn locked_write(&mut self, buf: &[u8]) -> io::Result<usize> {
        use fs2::FileExt;

        self.file.lock_exclusive()?;
        let result = self.file.write_all(buf).map(|_| buf.len());
        let unlocked = FileExt::unlock(&self.file);
        let written = result?;
        unlocked?;
        Ok(written)
    }

    #[cfg(not(feature = "file"))]
    fn locked_write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf).map(|_| buf.len())
    }
}

impl Write for FileDestination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.locking {
            self.locked_write(buf)
        } else {
            self.file.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Destination for FileDestination {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(&self.file)
    }
}
