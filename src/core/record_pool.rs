//! Free list of reusable records
//!
//! Records are boxed so a released record keeps its string and map
//! capacity for the next call. The pool keeps at most `max_idle` records;
//! anything released beyond that is dropped.

use super::record::Record;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of idle records kept for reuse.
pub const DEFAULT_MAX_IDLE: usize = 64;

#[derive(Debug)]
pub struct RecordPool {
    free: Mutex<Vec<Box<Record>>>,
    max_idle: usize,
    allocated: AtomicUsize,
}

impl RecordPool {
    pub fn new() -> Self {
        Self::with_max_idle(DEFAULT_MAX_IDLE)
    }

    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            allocated: AtomicUsize::new(0),
        }
    }

    /// Take a cleared record, reusing an idle one when available. The
    /// record goes back to the pool when the guard drops.
    pub fn acquire(&self) -> PooledRecord<'_> {
        let record = match self.free.lock().pop() {
            Some(record) => record,
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Box::default()
            }
        };

        PooledRecord {
            pool: self,
            record: Some(record),
        }
    }

    fn release(&self, mut record: Box<Record>) {
        // Reset outside the lock; this also drops the owning logger handle.
        record.reset();
        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push(record);
        }
    }

    /// Records currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Records allocated over the pool's lifetime.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }
}

impl Default for RecordPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A record on loan from a [`RecordPool`].
pub struct PooledRecord<'a> {
    pool: &'a RecordPool,
    record: Option<Box<Record>>,
}

impl Deref for PooledRecord<'_> {
    type Target = Record;

    fn deref(&self) -> &Record {
        // Only taken in Drop.
        self.record.as_deref().unwrap_or_else(|| unreachable!())
    }
}

impl DerefMut for PooledRecord<'_> {
    fn deref_mut(&mut self) -> &mut Record {
        self.record.as_deref_mut().unwrap_or_else(|| unreachable!())
    }
}

impl Drop for PooledRecord<'_> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.pool.release(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_released_record_is_reused_and_cleared() {
        let pool = RecordPool::new();
        {
            let mut record = pool.acquire();
            record.level = LogLevel::ERROR;
            record.message.push_str("boom");
        }
        assert_eq!(pool.idle(), 1);

        let record = pool.acquire();
        assert_eq!(pool.allocated(), 1);
        assert!(record.message().is_empty());
        assert_eq!(record.level(), LogLevel::DISABLE);
    }

    #[test]
    fn test_idle_records_are_bounded() {
        let pool = RecordPool::with_max_idle(4);
        let held: Vec<_> = (0..10).map(|_| pool.acquire()).collect();
        assert_eq!(pool.allocated(), 10);
        drop(held);

        assert_eq!(pool.idle(), 4);
    }
}
