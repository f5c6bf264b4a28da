//! Window search: depth-first traversal with a contained-subtree fast path.

use crate::envelope::Envelope;
use crate::node::{Entry, ParentNode, RNode};

/// Collects every entry in the subtree rooted at `node` whose envelope
/// intersects `window`, appending them to `out` in depth-first pre-order.
///
/// When a child's envelope is fully contained in `window`, every entry
/// beneath it is emitted without further intersection tests — the "fast
/// path" that makes a window covering a whole clustered region cheap.
pub(crate) fn search<'a, T>(node: &'a ParentNode<T>, window: &Envelope, out: &mut Vec<&'a Entry<T>>) {
    if !node.envelope().intersects(window) {
        return;
    }
    for child in node.children() {
        match child {
            RNode::Leaf(entry) => {
                #[cfg(test)]
                test_support::count_leaf_intersect_test();
                if entry.envelope().intersects(window) {
                    out.push(entry);
                }
            }
            RNode::Parent(subtree) => {
                let child_env = subtree.envelope();
                if !child_env.intersects(window) {
                    continue;
                }
                if window.contains(&child_env) {
                    collect_all(subtree, out);
                } else {
                    search(subtree, window, out);
                }
            }
        }
    }
}

/// Appends every entry beneath `node`, unconditionally.
fn collect_all<'a, T>(node: &'a ParentNode<T>, out: &mut Vec<&'a Entry<T>>) {
    for child in node.children() {
        match child {
            RNode::Leaf(entry) => out.push(entry),
            RNode::Parent(subtree) => collect_all(subtree, out),
        }
    }
}
