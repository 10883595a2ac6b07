//! Child logger registry
//!
//! Children are kept by key together with their insertion order, so the
//! most recently created surviving child can always be found.

use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// Key a child logger is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChildKey {
    /// Textual key, also used as the child's prefix
    Text(String),
    /// Opaque numeric key; the child gets no extra prefix
    Id(u64),
    /// Numeric identity with a display label used as prefix
    Labeled(u64, String),
}

impl ChildKey {
    /// Text appended to the parent's prefix, if the key has one.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            ChildKey::Text(text) | ChildKey::Labeled(_, text) => Some(text.as_str()),
            ChildKey::Id(_) => None,
        }
    }
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKey::Text(text) => write!(f, "{}", text),
            ChildKey::Id(id) => write!(f, "#{}", id),
            ChildKey::Labeled(id, label) => write!(f, "{}#{}", label, id),
        }
    }
}

impl From<&str> for ChildKey {
    fn from(text: &str) -> Self {
        ChildKey::Text(text.to_string())
    }
}

impl From<String> for ChildKey {
    fn from(text: String) -> Self {
        ChildKey::Text(text)
    }
}

impl From<&String> for ChildKey {
    fn from(text: &String) -> Self {
        ChildKey::Text(text.clone())
    }
}

impl From<u64> for ChildKey {
    fn from(id: u64) -> Self {
        ChildKey::Id(id)
    }
}

impl From<u32> for ChildKey {
    fn from(id: u32) -> Self {
        ChildKey::Id(id as u64)
    }
}

impl From<usize> for ChildKey {
    fn from(id: usize) -> Self {
        ChildKey::Id(id as u64)
    }
}

#[derive(Default)]
struct Children {
    items: HashMap<ChildKey, Logger>,
    order: Vec<ChildKey>,
}

/// Concurrent, insertion-ordered map of child loggers.
#[derive(Default)]
pub struct ChildRegistry {
    inner: RwLock<Children>,
}

impl ChildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the child under `key`, creating it with `create` when missing.
    ///
    /// Concurrent callers with the same key all receive the same child;
    /// `create` runs at most once per key.
    pub fn get_or_create<F>(&self, key: ChildKey, create: F) -> Logger
    where
        F: FnOnce(&ChildKey) -> Logger,
    {
        if let Some(child) = self.inner.read().items.get(&key) {
            return child.clone();
        }

        let mut inner = self.inner.write();
        // Another thread may have won the race between the two locks.
        if let Some(child) = inner.items.get(&key) {
            return child.clone();
        }

        let child = create(&key);
        inner.order.push(key.clone());
        inner.items.insert(key, child.clone());
        child
    }

    pub fn get(&self, key: &ChildKey) -> Option<Logger> {
        self.inner.read().items.get(key).cloned()
    }

    /// Remove `key`; returns whether it existed.
    pub fn remove(&self, key: &ChildKey) -> bool {
        let mut inner = self.inner.write();
        if inner.items.remove(key).is_none() {
            return false;
        }
        inner.order.retain(|existing| existing != key);
        true
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.items.clear();
        inner.order.clear();
    }

    /// Most recently created child that still exists.
    pub fn last(&self) -> Option<Logger> {
        let inner = self.inner.read();
        inner
            .order
            .last()
            .and_then(|key| inner.items.get(key))
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<ChildKey> {
        self.inner.read().order.clone()
    }
}

impl fmt::Debug for ChildRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destinations::NopDestination;

    fn make(_: &ChildKey) -> Logger {
        Logger::builder().output(NopDestination).build()
    }

    #[test]
    fn test_get_or_create_returns_same_child() {
        let registry = ChildRegistry::new();
        let first = registry.get_or_create("x".into(), make);
        let second = registry.get_or_create("x".into(), |_| unreachable!());

        assert!(first.ptr_eq(&second));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_remove_then_create_gives_new_child() {
        let registry = ChildRegistry::new();
        let first = registry.get_or_create("x".into(), make);

        assert!(registry.remove(&"x".into()));
        assert!(!registry.remove(&"x".into()));

        let second = registry.get_or_create("x".into(), make);
        assert!(!first.ptr_eq(&second));
    }

    #[test]
    fn test_last_follows_compacted_order() {
        let registry = ChildRegistry::new();
        let a = registry.get_or_create("a".into(), make);
        let _b = registry.get_or_create("b".into(), make);
        let c = registry.get_or_create(ChildKey::Id(3), make);

        assert!(registry.last().unwrap().ptr_eq(&c));
        registry.remove(&ChildKey::Id(3));
        registry.remove(&"b".into());
        assert!(registry.last().unwrap().ptr_eq(&a));
        assert_eq!(registry.keys(), vec![ChildKey::from("a")]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let registry = ChildRegistry::new();
        registry.get_or_create("a".into(), make);
        registry.get_or_create("b".into(), make);

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.last().is_none());
        assert!(registry.keys().is_empty());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(ChildKey::from("db").display_text(), Some("db"));
        assert_eq!(ChildKey::Id(7).display_text(), None);
        assert_eq!(ChildKey::Labeled(7, "worker".into()).display_text(), Some("worker"));
    }
}
