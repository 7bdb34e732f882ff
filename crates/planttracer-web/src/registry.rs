//! Page-level registry keeping live sessions reachable.
//!
//! A JavaScript caller may drop the handle returned by `analyze_movie`; the
//! registry holds its own reference so the canvas stays interactive until
//! the session is explicitly detached or replaced.

use std::collections::HashMap;
use std::rc::Rc;

/// Sessions keyed by the DOM id of the element they are bound to.
#[derive(Debug)]
pub struct Registry<T> {
    entries: HashMap<String, Rc<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`, returning the session it replaces.
    pub fn register(&mut self, key: impl Into<String>, value: Rc<T>) -> Option<Rc<T>> {
        self.entries.insert(key.into(), value)
    }

    /// Remove `key` if it still maps to `value`. A handle to a session that
    /// was already replaced leaves the newer one alone.
    pub fn release(&mut self, key: &str, value: &Rc<T>) -> bool {
        match self.entries.get(key) {
            Some(current) if Rc::ptr_eq(current, value) => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Rc<T>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_session_alive_after_handle_dropped() {
        let mut registry = Registry::new();
        let handle = Rc::new("session");
        let weak = Rc::downgrade(&handle);
        registry.register("c1", handle.clone());

        drop(handle);
        assert!(weak.upgrade().is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces_previous() {
        let mut registry = Registry::new();
        let first = Rc::new(1);
        let second = Rc::new(2);
        assert!(registry.register("c1", first.clone()).is_none());

        let replaced = registry.register("c1", second.clone()).unwrap();
        assert!(Rc::ptr_eq(&replaced, &first));
        assert!(registry.get("c1").is_some_and(|s| Rc::ptr_eq(s, &second)));
    }

    #[test]
    fn test_release_ignores_stale_handle() {
        let mut registry = Registry::new();
        let stale = Rc::new(1);
        let current = Rc::new(2);
        registry.register("c1", stale.clone());
        registry.register("c1", current.clone());

        assert!(!registry.release("c1", &stale));
        assert_eq!(registry.len(), 1);
        assert!(registry.release("c1", &current));
        assert!(registry.is_empty());
        assert!(!registry.release("c1", &current));
    }

    #[test]
    fn test_release_drops_last_reference() {
        let mut registry = Registry::new();
        let session = Rc::new(String::from("editor"));
        let weak = Rc::downgrade(&session);
        registry.register("c1", session.clone());

        registry.release("c1", &session);
        drop(session);
        assert!(weak.upgrade().is_none());
    }
}
