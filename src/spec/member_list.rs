// Copyright 2025 Cowboy AI, LLC.

//! Member lists replaced as a whole

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use crate::memo::Memo;

/// An ordered member list with a cached immutable snapshot
///
/// Writers replace or extend the list under the lock and clear the snapshot
/// inside the same critical section, so a reader sees either the old list
/// or the new one, never a partial rebuild.
pub struct MemberList<T> {
    items: Mutex<Vec<Arc<T>>>,
    snapshot: Memo<Vec<Arc<T>>>,
}

impl<T> MemberList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            snapshot: Memo::new(),
        }
    }

    /// Replace every member
    pub fn replace(&self, members: Vec<Arc<T>>) {
        let mut items = self.items.lock();
        *items = members;
        self.snapshot.clear();
    }

    /// Append members
    pub fn extend(&self, members: impl IntoIterator<Item = Arc<T>>) {
        let mut items = self.items.lock();
        items.extend(members);
        self.snapshot.clear();
    }

    /// The current members
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        let items = self.items.lock();
        self.snapshot.get_or_compute(|| items.clone())
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether there are no members
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T> Default for MemberList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MemberList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_cached_until_replaced() {
        let list = MemberList::new();
        list.replace(vec![Arc::new(1), Arc::new(2)]);
        let first = list.snapshot();
        assert!(Arc::ptr_eq(&first, &list.snapshot()));

        list.extend([Arc::new(3)]);
        let second = list.snapshot();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 3);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_concurrent_readers_see_whole_lists() {
        let list = Arc::new(MemberList::new());
        let writer = {
            let list = Arc::clone(&list);
            std::thread::spawn(move || {
                for round in 0..200usize {
                    list.replace((0..10).map(|i| Arc::new(round * 10 + i)).collect());
                }
            })
        };
        for _ in 0..200 {
            let snapshot = list.snapshot();
            assert!(snapshot.is_empty() || snapshot.len() == 10);
        }
        writer.join().unwrap();
    }
}
