//! Remove-by-identity with ancestor condense.

use crate::envelope::Envelope;
use crate::node::{ParentNode, RNode};

/// Removes the first entry in the subtree rooted at `node` whose payload
/// satisfies `is_match` and whose containing leaf's envelope lies within
/// `envelope` (a covering search, per invariant 3: the entry's ancestors
/// all bound it).
///
/// Returns the removed payload, or `None` if no match was found. `node`'s
/// own envelope is refreshed along the way whenever a descendant changes.
pub(crate) fn remove<T>(
    node: &mut ParentNode<T>,
    envelope: &Envelope,
    is_match: &mut dyn FnMut(&T) -> bool,
) -> Option<T> {
    if !node.envelope().contains(envelope) {
        return None;
    }

    if node.is_leaf {
        let position = node.children.iter().position(|child| match child {
            RNode::Leaf(entry) => is_match(entry.payload()),
            RNode::Parent(_) => false,
        })?;
        let removed = node.children.remove(position);
        node.refresh_envelope();
        return match removed {
            RNode::Leaf(entry) => Some(entry.into_payload()),
            RNode::Parent(_) => unreachable!("leaf nodes hold only entry children"),
        };
    }

    for i in 0..node.children.len() {
        let child = node.children[i]
            .as_parent_mut()
            .expect("non-leaf node holds only parent children");
        if let Some(removed) = remove(child, envelope, is_match) {
            if child.children().is_empty() {
                node.children.remove(i);
            }
            node.refresh_envelope();
            return Some(removed);
        }
    }

    None
}
