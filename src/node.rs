//! Tree nodes: leaf entries and internal parent nodes.

use smallvec::SmallVec;

use crate::envelope::Envelope;

/// Small-vector inline capacity for a node's children, tuned for the
/// default `maxEntries = 9` so a freshly split node rarely spills to the
/// heap.
pub(crate) type Children<T> = SmallVec<[RNode<T>; 8]>;

/// A leaf-level entry: an envelope plus the opaque payload it bounds.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    envelope: Envelope,
    payload: T,
}

impl<T> Entry<T> {
    pub fn new(envelope: Envelope, payload: T) -> Self {
        Entry { envelope, payload }
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// A node in the tree: either a leaf-level entry or an internal node with
/// its own children.
///
/// This mirrors the teacher crate's `RTreeNode::{Leaf, Parent}` split, kept
/// as the idiom for representing "this child is either data or another
/// level of structure" without a runtime tag check beyond the enum
/// discriminant itself.
#[derive(Debug, Clone)]
pub enum RNode<T> {
    Leaf(Entry<T>),
    Parent(Box<ParentNode<T>>),
}

impl<T> RNode<T> {
    pub fn envelope(&self) -> Envelope {
        match self {
            RNode::Leaf(entry) => entry.envelope(),
            RNode::Parent(node) => node.envelope,
        }
    }

    pub fn is_leaf_entry(&self) -> bool {
        matches!(self, RNode::Leaf(_))
    }

    pub(crate) fn as_parent(&self) -> Option<&ParentNode<T>> {
        match self {
            RNode::Parent(node) => Some(node),
            RNode::Leaf(_) => None,
        }
    }

    pub(crate) fn as_parent_mut(&mut self) -> Option<&mut ParentNode<T>> {
        match self {
            RNode::Parent(node) => Some(node),
            RNode::Leaf(_) => None,
        }
    }
}

/// An internal node: an envelope covering all of `children`, a height,
/// and whether the children are entries or further nodes.
///
/// A `ParentNode` with `is_leaf = true` holds [`RNode::Leaf`] children
/// exclusively; with `is_leaf = false` it holds [`RNode::Parent`] children
/// exclusively. The core never mixes the two within one node.
#[derive(Debug, Clone)]
pub struct ParentNode<T> {
    pub(crate) envelope: Envelope,
    pub(crate) height: usize,
    pub(crate) is_leaf: bool,
    pub(crate) children: Children<T>,
}

impl<T> ParentNode<T> {
    /// An empty root: height 1, leaf, no children.
    pub(crate) fn new_empty_root() -> Self {
        ParentNode {
            envelope: Envelope::new_empty(),
            height: 1,
            is_leaf: true,
            children: Children::new(),
        }
    }

    /// Builds a parent node from already-collected children, recomputing
    /// its envelope and height from them.
    pub(crate) fn from_children(children: Children<T>, is_leaf: bool) -> Self {
        let envelope = envelope_for_children(&children);
        let height = if is_leaf {
            1
        } else {
            1 + children
                .iter()
                .map(|c| c.as_parent().map(|p| p.height).unwrap_or(0))
                .max()
                .unwrap_or(0)
        };
        ParentNode {
            envelope,
            height,
            is_leaf,
            children,
        }
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn children(&self) -> &[RNode<T>] {
        &self.children
    }

    /// Recomputes `self.envelope` from the current children. Called after
    /// any mutation of `children` that could change the covering
    /// rectangle.
    pub(crate) fn refresh_envelope(&mut self) {
        self.envelope = envelope_for_children(&self.children);
    }

    /// Depth-first invariant check: every leaf at the same depth, every
    /// non-root node within `[min_entries, max_entries]` children, every
    /// envelope the exact MBR of its children (within floating-point
    /// tolerance). `true` if every invariant held.
    ///
    /// Exposed publicly (not just under `#[cfg(test)]`) since a caller
    /// doing its own stress testing against this crate needs the same
    /// check this crate's own tests use.
    pub fn check_invariants(&self, min_entries: usize, max_entries: usize) -> bool {
        self.check_invariants_at(min_entries, max_entries, true).is_ok()
    }

    fn check_invariants_at(
        &self,
        min_entries: usize,
        max_entries: usize,
        is_root: bool,
    ) -> Result<usize, ()> {
        if self.children.is_empty() {
            return if is_root { Ok(self.height) } else { Err(()) };
        }
        if !is_root && self.children.len() < min_entries {
            return Err(());
        }
        if self.children.len() > max_entries {
            return Err(());
        }
        if self.is_leaf != self.children.iter().all(|c| c.is_leaf_entry()) {
            return Err(());
        }

        let mut expected = Envelope::new_empty();
        let mut leaf_depth = None;
        for child in &self.children {
            expected.extend(&child.envelope());
            match child {
                RNode::Leaf(_) => {
                    if !self.is_leaf {
                        return Err(());
                    }
                }
                RNode::Parent(data) => {
                    if self.is_leaf || data.height + 1 != self.height {
                        return Err(());
                    }
                    let child_depth = data.check_invariants_at(min_entries, max_entries, false)?;
                    match leaf_depth {
                        Some(expected_depth) if expected_depth != child_depth => return Err(()),
                        Some(_) => {}
                        None => leaf_depth = Some(child_depth),
                    }
                }
            }
        }

        const EPS: f64 = 1e-9;
        let observed = self.envelope;
        if (observed.x1() - expected.x1()).abs() >= EPS
            || (observed.y1() - expected.y1()).abs() >= EPS
            || (observed.x2() - expected.x2()).abs() >= EPS
            || (observed.y2() - expected.y2()).abs() >= EPS
        {
            return Err(());
        }

        Ok(leaf_depth.unwrap_or(self.height))
    }
}

/// The minimum bounding rectangle of a slice of children.
pub(crate) fn envelope_for_children<T>(children: &[RNode<T>]) -> Envelope {
    let mut result = Envelope::new_empty();
    for child in children {
        result.extend(&child.envelope());
    }
    result
}
