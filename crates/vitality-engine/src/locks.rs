//! Per-relationship locks serializing read-modify-write of learned fields.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct RelationshipLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RelationshipLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for a relationship, created on first use.
    pub fn handle(&self, relationship_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(relationship_id.to_string())
            .or_default()
            .clone()
    }

    /// Number of relationships that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Acquire a handle's guard. A poisoned lock only means another update
/// panicked; the unit value it guards cannot be inconsistent.
pub fn acquire(handle: &Mutex<()>) -> MutexGuard<'_, ()> {
    handle.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_shares_one_lock() {
        let locks = RelationshipLocks::new();
        let a = locks.handle("a");
        let again = locks.handle("a");
        let b = locks.handle("b");
        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 2);
    }
}
