//! The public `RTree` type: construction, mutation, and query.

use crate::algorithm::{bulk_load, insertion, removal, search};
use crate::envelope::Envelope;
use crate::error::RTreeError;
use crate::node::{Entry, ParentNode, RNode};
use crate::params::Params;

/// A two-dimensional R*-tree spatial index.
///
/// # R-trees
///
/// An R-tree stores axis-aligned rectangles (their *envelopes*) together
/// with an opaque payload, clustering nearby envelopes into a balanced
/// tree so that window queries only need to descend into the branches
/// whose bounding rectangle could possibly contain a match.
///
/// Inserting one entry at a time uses the R*-tree heuristics for choosing
/// a subtree and for resolving overflow, which keep the tree well-shaped
/// at the cost of doing more work per insertion than a plain R-tree.
/// [`RTree::load`] bulk loads many entries at once using an
/// Overlap-Minimizing Top-down (OMT) packing, which is both faster and
/// produces a better-shaped tree than inserting the same entries one by
/// one — prefer it whenever the full set of entries is known up front.
///
/// ## Example
/// ```
/// use omt_rtree::RTree;
///
/// let mut tree = RTree::new();
/// tree.insert(0.0, 0.0, 1.0, 1.0, "a").unwrap();
/// tree.insert(2.0, 2.0, 3.0, 3.0, "b").unwrap();
///
/// let found = tree.search(&omt_rtree::Envelope::new(0.0, 0.0, 1.5, 1.5).unwrap()).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(*found[0].1, "a");
/// assert_eq!(tree.len(), 2);
/// ```
///
/// The live tree is not `Serialize` — it holds a payload-equality closure
/// that has no serializable representation. The `serde` feature instead
/// makes [`Envelope`] and the types in [`crate::boundary`] serializable,
/// which is what an external observer actually needs.
pub struct RTree<T> {
    root: ParentNode<T>,
    size: usize,
    params: Params,
    equals: Box<dyn Fn(&T, &T) -> bool>,
}

impl<T> Default for RTree<T>
where
    T: PartialEq,
{
    fn default() -> Self {
        RTree::new()
    }
}

impl<T> RTree<T>
where
    T: PartialEq,
{
    /// Creates an empty tree with the default fan-out (`maxEntries = 9`)
    /// and payload equality from [`PartialEq`].
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }
}

impl<T> RTree<T> {
    /// Creates an empty tree with a given fan-out configuration, using
    /// [`PartialEq`] for payload equality in [`RTree::remove`].
    ///
    /// `params.max_entries()` below 4 is impossible to construct — see
    /// [`Params::new`], which clamps rather than rejects.
    pub fn with_params(params: Params) -> Self
    where
        T: PartialEq,
    {
        Self::with_params_and_equality(params, |a, b| a == b)
    }

    /// Creates an empty tree with a given fan-out configuration and a
    /// caller-supplied payload equality comparator, used by
    /// [`RTree::remove`] instead of requiring `T: PartialEq`.
    pub fn with_params_and_equality(
        params: Params,
        equals: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        RTree {
            root: ParentNode::new_empty_root(),
            size: 0,
            params,
            equals: Box::new(equals),
        }
    }

    /// The fan-out configuration this tree was constructed with.
    pub fn params(&self) -> Params {
        self.params
    }

    /// The number of entries currently stored.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Read-only access to the root node, for structural traversal (e.g.
    /// the boundary adapter's structural dump).
    pub fn root(&self) -> &ParentNode<T> {
        &self.root
    }

    /// Resets the tree to empty, discarding all entries.
    pub fn clear(&mut self) {
        self.root = ParentNode::new_empty_root();
        self.size = 0;
    }

    /// Inserts `payload` bound by `envelope`.
    ///
    /// Returns [`RTreeError::InvalidEnvelope`] (leaving the tree
    /// unmodified) if `envelope`'s corners are not well-formed — this
    /// method exists alongside [`Envelope::new`] purely for callers who
    /// want to pass raw coordinates without an intermediate `Result`.
    pub fn insert(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        payload: T,
    ) -> Result<(), RTreeError> {
        let envelope = Envelope::new(x1, y1, x2, y2)?;
        self.insert_node(RNode::Leaf(Entry::new(envelope, payload)));
        Ok(())
    }

    /// Inserts a pre-built entry node. Infallible: the envelope was
    /// already validated when it was constructed.
    pub fn insert_node(&mut self, entry: RNode<T>) {
        debug_assert!(
            matches!(entry, RNode::Leaf(_)),
            "insert_node accepts leaf entries; use load() for whole subtrees"
        );
        if let Some(sibling) = insertion::insert_node(&mut self.root, entry, &self.params) {
            #[cfg(feature = "tracing")]
            tracing::trace!(new_height = self.root.height() + 1, "root split on insert");
            self.grow_root(sibling);
        }
        self.size += 1;
    }

    /// Bulk loads `entries` into the tree using OMT packing, merging with
    /// whatever the tree already contains.
    ///
    /// On an empty tree this is equivalent to, but substantially faster
    /// than, inserting each entry individually. On a non-empty tree the
    /// freshly built subtree is merged in at the appropriate level rather
    /// than replacing the existing contents.
    pub fn load(&mut self, entries: Vec<(Envelope, T)>) {
        let added = entries.len();
        let entries: Vec<Entry<T>> = entries
            .into_iter()
            .map(|(envelope, payload)| Entry::new(envelope, payload))
            .collect();

        if added < self.params.min_entries() {
            for entry in entries {
                self.insert_node(RNode::Leaf(entry));
            }
            return;
        }

        let built = bulk_load::build(entries, &self.params);
        self.size += added;

        if self.is_empty_root() {
            self.root = built;
            return;
        }

        match self.root.height().cmp(&built.height()) {
            std::cmp::Ordering::Equal => self.grow_root(built),
            // The existing tree is taller: merge the freshly built subtree
            // in as a single child, at whatever level `choose_subtree`
            // lands on for a node of its height.
            std::cmp::Ordering::Greater => {
                if let Some(sibling) =
                    insertion::insert_node(&mut self.root, RNode::Parent(Box::new(built)), &self.params)
                {
                    self.grow_root(sibling);
                }
            }
            // The freshly built subtree is taller: it becomes the new
            // host, with the old root merged into it the same way.
            std::cmp::Ordering::Less => {
                let mut new_root = built;
                let old_root = std::mem::replace(&mut self.root, ParentNode::new_empty_root());
                let sibling =
                    insertion::insert_node(&mut new_root, RNode::Parent(Box::new(old_root)), &self.params);
                self.root = match sibling {
                    Some(sibling) => split_root(new_root, sibling),
                    None => new_root,
                };
            }
        }
    }

    fn is_empty_root(&self) -> bool {
        self.root.children().is_empty()
    }

    fn grow_root(&mut self, sibling: ParentNode<T>) {
        let old_root = std::mem::replace(&mut self.root, ParentNode::new_empty_root());
        self.root = split_root(old_root, sibling);
    }

    /// Returns the matching entries for a window query, or
    /// [`RTreeError::InvalidEnvelope`] if `window` is malformed.
    pub fn search(&self, window: &Envelope) -> Result<Vec<(Envelope, &T)>, RTreeError> {
        sanity_check_window(window)?;
        let mut found = Vec::new();
        search::search(&self.root, window, &mut found);
        Ok(found
            .into_iter()
            .map(|entry| (entry.envelope(), entry.payload()))
            .collect())
    }

    /// Removes the first entry whose payload equals `payload` (per this
    /// tree's equality comparator) and whose containing leaf lies within
    /// `hint`. A non-matching `hint` — or no matching payload at all — is
    /// a silent no-op, not an error.
    ///
    /// Returns [`RTreeError::InvalidEnvelope`] if `hint` is malformed.
    pub fn remove(&mut self, payload: &T, hint: &Envelope) -> Result<Option<T>, RTreeError> {
        sanity_check_window(hint)?;
        let equals = &self.equals;
        let mut is_match = |candidate: &T| equals(candidate, payload);
        let removed = removal::remove(&mut self.root, hint, &mut is_match);
        if removed.is_some() {
            self.size -= 1;
            if self.root.children().is_empty() {
                // Condensation emptied the root: reset it to the canonical
                // empty-root shape rather than leaving a stale internal
                // node behind with the wrong `is_leaf`/`height`.
                self.root = ParentNode::new_empty_root();
            }
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!("remove found no matching entry; no-op");
        }
        Ok(removed)
    }
}

fn sanity_check_window(envelope: &Envelope) -> Result<(), RTreeError> {
    if envelope.x1() > envelope.x2() || envelope.y1() > envelope.y2() {
        return Err(RTreeError::InvalidEnvelope {
            x1: envelope.x1(),
            y1: envelope.y1(),
            x2: envelope.x2(),
            y2: envelope.y2(),
        });
    }
    Ok(())
}

/// Builds a new root with `a` and `b` as its two children.
fn split_root<T>(a: ParentNode<T>, b: ParentNode<T>) -> ParentNode<T> {
    debug_assert_eq!(a.height(), b.height());
    let children = vec![RNode::Parent(Box::new(a)), RNode::Parent(Box::new(b))].into();
    ParentNode::from_children(children, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(x1: f64, y1: f64, x2: f64, y2: f64) -> Envelope {
        Envelope::new(x1, y1, x2, y2).unwrap()
    }

    #[test]
    fn scenario_1_minimal() {
        let mut tree = RTree::with_params(Params::new(4));
        tree.insert(0.0, 0.0, 1.0, 1.0, "a").unwrap();
        tree.insert(2.0, 2.0, 3.0, 3.0, "b").unwrap();
        tree.insert(4.0, 0.0, 5.0, 1.0, "c").unwrap();

        let found = tree.search(&env(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(*found[0].1, "a");

        let found_all = tree.search(&env(0.0, 0.0, 5.0, 5.0)).unwrap();
        assert_eq!(found_all.len(), 3);

        assert_eq!(tree.root().height(), 1);
        assert_eq!(tree.root().children().len(), 3);
    }

    #[test]
    fn scenario_2_overflow() {
        let mut tree = RTree::with_params(Params::new(4));
        for i in 0..5 {
            tree.insert(i as f64, i as f64, i as f64 + 1.0, i as f64 + 1.0, i)
                .unwrap();
        }
        assert_eq!(tree.root().height(), 2);
        assert_eq!(tree.root().children().len(), 2);
        for child in tree.root().children() {
            let child = child.as_parent().unwrap();
            assert!(child.is_leaf());
            assert!(child.children().len() >= 2 && child.children().len() <= 4);
        }
    }

    #[test]
    fn scenario_7_rejected_input_leaves_tree_unchanged() {
        let mut tree = RTree::<u32>::new();
        tree.insert(0.0, 0.0, 1.0, 1.0, 1).unwrap();
        assert!(tree.insert(1.0, 0.0, 0.0, 1.0, 2).is_err());
        assert_eq!(tree.len(), 1);
        assert!(tree.search(&env(0.0, 0.0, 0.0, -1.0)).is_err());
    }

    #[test]
    fn scenario_8_configuration_clamp() {
        let mut tree = RTree::with_params(Params::new(1));
        assert_eq!(tree.params().max_entries(), 4);
        assert_eq!(tree.params().min_entries(), 2);
        for i in 0..6 {
            tree.insert(i as f64, 0.0, i as f64 + 1.0, 1.0, i).unwrap();
        }
        assert!(tree
            .root()
            .check_invariants(tree.params().min_entries(), tree.params().max_entries()));
    }

    #[test]
    fn remove_then_search_excludes_removed_entry() {
        let mut tree = RTree::with_params(Params::new(4));
        for i in 0..4 {
            tree.insert(i as f64, 0.0, i as f64 + 1.0, 1.0, i).unwrap();
        }
        let removed = tree.remove(&1u32, &env(0.0, 0.0, 5.0, 1.0)).unwrap();
        assert_eq!(removed, Some(1));
        assert_eq!(tree.len(), 3);
        let found = tree.search(&env(0.0, 0.0, 5.0, 1.0)).unwrap();
        assert!(found.iter().all(|(_, p)| **p != 1));
    }

    #[test]
    fn remove_of_absent_payload_is_noop() {
        let mut tree = RTree::with_params(Params::new(4));
        tree.insert(0.0, 0.0, 1.0, 1.0, 1u32).unwrap();
        let removed = tree.remove(&99u32, &env(0.0, 0.0, 5.0, 5.0)).unwrap();
        assert_eq!(removed, None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn removing_every_entry_from_a_tall_tree_condenses_root_to_empty_shape() {
        let mut tree = RTree::with_params(Params::new(4));
        for i in 0..5 {
            tree.insert(i as f64, i as f64, i as f64 + 1.0, i as f64 + 1.0, i)
                .unwrap();
        }
        assert_eq!(tree.root().height(), 2);

        for i in 0..5 {
            let x = i as f64;
            tree.remove(&i, &env(x, x, x + 1.0, x + 1.0)).unwrap();
        }
        assert_eq!(tree.len(), 0);
        assert!(tree.root().children().is_empty());
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().height(), 1);

        // A stale non-leaf, height-2 root would have made this panic: see
        // `insertion::choose_subtree` indexing into an empty children list.
        tree.insert(0.0, 0.0, 1.0, 1.0, 99).unwrap();
        assert_eq!(tree.len(), 1);
        let found = tree.search(&env(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(*found[0].1, 99);
    }

    #[test]
    fn clear_resets_to_empty_height_one() {
        let mut tree = RTree::with_params(Params::new(4));
        for i in 0..10 {
            tree.insert(i as f64, 0.0, i as f64 + 1.0, 1.0, i).unwrap();
        }
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root().height(), 1);
        assert!(tree.root().children().is_empty());
    }

    #[test]
    fn load_on_empty_tree_matches_sequential_insert() {
        let entries: Vec<(Envelope, u32)> = (0..200)
            .map(|i| {
                let x = (i % 20) as f64;
                let y = (i / 20) as f64;
                (env(x, y, x + 0.5, y + 0.5), i)
            })
            .collect();

        let mut loaded = RTree::with_params(Params::new(9));
        loaded.load(entries.clone());

        let mut inserted = RTree::with_params(Params::new(9));
        for (e, p) in &entries {
            inserted.insert_node(RNode::Leaf(Entry::new(*e, *p)));
        }

        let window = env(0.0, 0.0, 10.0, 10.0);
        let mut loaded_set: Vec<u32> = loaded
            .search(&window)
            .unwrap()
            .into_iter()
            .map(|(_, p)| *p)
            .collect();
        let mut inserted_set: Vec<u32> = inserted
            .search(&window)
            .unwrap()
            .into_iter()
            .map(|(_, p)| *p)
            .collect();
        loaded_set.sort();
        inserted_set.sort();
        assert_eq!(loaded_set, inserted_set);
    }

    #[test]
    fn load_merges_into_an_existing_tree() {
        let mut tree = RTree::with_params(Params::new(9));
        for i in 0..1000u32 {
            let x = (i % 40) as f64;
            let y = (i / 40) as f64;
            tree.insert(x, y, x + 0.5, y + 0.5, i).unwrap();
        }
        let extra: Vec<(Envelope, u32)> = (1000..1005)
            .map(|i| (env(i as f64, 0.0, i as f64 + 0.5, 0.5), i))
            .collect();
        tree.load(extra);
        assert_eq!(tree.len(), 1005);
        let found = tree.search(&env(0.0, 0.0, 2000.0, 2000.0)).unwrap();
        assert_eq!(found.len(), 1005);
    }
}
