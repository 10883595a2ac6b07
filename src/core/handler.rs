//! Record interception
//!
//! A handler sees every record that passed the level gate before any
//! formatting happens. Returning `true` means the record is fully handled
//! and nothing else is written for it.

use super::record::Record;
use std::fmt;
use std::sync::Arc;

pub type Handler = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Ordered handler list.
///
/// Forked loggers share the list; adding a handler to one of them
/// detaches it from the others.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Arc<Vec<Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handler: Handler) {
        Arc::make_mut(&mut self.handlers).push(handler);
    }

    /// Run handlers in order until one handles the record.
    pub fn dispatch(&self, record: &Record) -> bool {
        self.handlers.iter().any(|handler| handler(record))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether both chains are the very same list.
    pub fn shares_with(&self, other: &HandlerChain) -> bool {
        Arc::ptr_eq(&self.handlers, &other.handlers)
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_first_handling_handler_stops_chain() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain = HandlerChain::new();

        let counter = Arc::clone(&calls);
        chain.push(Arc::new(move |_: &Record| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        }));
        chain.push(Arc::new(|_: &Record| true));
        let counter = Arc::clone(&calls);
        chain.push(Arc::new(move |_: &Record| {
            counter.fetch_add(100, Ordering::SeqCst);
            true
        }));

        assert!(chain.dispatch(&Record::default()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_push_detaches_shared_chain() {
        let mut parent = HandlerChain::new();
        parent.push(Arc::new(|_: &Record| false));

        let mut child = parent.clone();
        assert!(child.shares_with(&parent));

        child.push(Arc::new(|_: &Record| true));
        assert!(!child.shares_with(&parent));
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
    }
}
