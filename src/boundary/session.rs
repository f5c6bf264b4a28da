//! A map from session identifier to an independently synchronized tree.
//!
//! Re-architected from a process that hosts one tree per connection in a
//! process-wide mapping: here the mapping is ordinary synchronous code,
//! each session's tree guarded by its own mutex so concurrent sessions
//! never contend with each other and introduces no async runtime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::rtree::RTree;

/// Owns one [`RTree`] per session identifier.
///
/// Acquiring a session's lock, mutating or querying its tree, and
/// releasing the lock is the whole of this type's logic: it does not
/// retry, does not queue, and does not introduce any async runtime.
pub struct Sessions<T> {
    trees: Mutex<HashMap<String, Arc<Mutex<RTree<T>>>>>,
}

impl<T> Default for Sessions<T>
where
    T: PartialEq,
{
    fn default() -> Self {
        Sessions::new()
    }
}

impl<T> Sessions<T>
where
    T: PartialEq,
{
    pub fn new() -> Self {
        Sessions {
            trees: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the tree for `session_id`, creating an empty one with the
    /// default fan-out if this is the first time the session is seen.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<RTree<T>>> {
        let mut trees = self.trees.lock().expect("session map poisoned");
        trees
            .entry(session_id.to_owned())
            .or_insert_with(|| {
                #[cfg(feature = "tracing")]
                tracing::debug!(session_id, "creating new session tree");
                Arc::new(Mutex::new(RTree::new()))
            })
            .clone()
    }
}

impl<T> Sessions<T> {
    /// Drops a session's tree entirely. A subsequent `get_or_create` for
    /// the same identifier starts over with a fresh empty tree.
    pub fn remove(&self, session_id: &str) -> bool {
        let mut trees = self.trees.lock().expect("session map poisoned");
        trees.remove(session_id).is_some()
    }

    /// The number of sessions currently tracked.
    pub fn session_count(&self) -> usize {
        self.trees.lock().expect("session map poisoned").len()
    }
}
