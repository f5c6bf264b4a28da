//! Single-entry and whole-subtree insertion, with the R*-tree ChooseSubtree
//! heuristic and overflow split cascade.

use crate::algorithm::split::split;
use crate::node::{ParentNode, RNode};
use crate::params::Params;

/// Inserts `new_child` into the subtree rooted at `node`, descending until
/// `node` is the immediate parent level for `new_child`'s height, and
/// cascading overflow splits back up.
///
/// Returns `Some(sibling)` if `node` itself overflowed and had to split;
/// the caller is responsible for attaching the sibling to `node`'s own
/// parent (or growing a new root, at the top of the tree).
pub(crate) fn insert_node<T>(
    node: &mut ParentNode<T>,
    new_child: RNode<T>,
    params: &Params,
) -> Option<ParentNode<T>> {
    let child_height = match &new_child {
        RNode::Leaf(_) => 0,
        RNode::Parent(p) => p.height(),
    };

    if node.height == child_height + 1 {
        node.children.push(new_child);
        node.refresh_envelope();
        return split_if_overflowing(node, params);
    }

    let index = choose_subtree(node, &new_child);
    let chosen = node.children[index]
        .as_parent_mut()
        .expect("non-leaf node above the target level holds only parent children");
    let sibling = insert_node(chosen, new_child, params);
    node.refresh_envelope();

    if let Some(sibling) = sibling {
        node.children.push(RNode::Parent(Box::new(sibling)));
        return split_if_overflowing(node, params);
    }
    None
}

fn split_if_overflowing<T>(node: &mut ParentNode<T>, params: &Params) -> Option<ParentNode<T>> {
    if node.children.len() > params.max_entries() {
        Some(split(node, params))
    } else {
        None
    }
}

/// Picks the child of `node` that should host `new_child`: the one with the
/// smallest enlargement of its envelope to cover `new_child`'s, breaking
/// ties by the child's own (pre-enlargement) area.
fn choose_subtree<T>(node: &ParentNode<T>, new_child: &RNode<T>) -> usize {
    let new_env = new_child.envelope();
    let mut best_index = 0;
    let mut best_enlargement = f64::INFINITY;
    let mut best_area = f64::INFINITY;

    for (i, child) in node.children.iter().enumerate() {
        let child_env = child.envelope();
        let enlargement = child_env.enlarged_area(&new_env) - child_env.area();
        let area = child_env.area();
        if enlargement < best_enlargement
            || (enlargement == best_enlargement && area < best_area)
        {
            best_enlargement = enlargement;
            best_area = area;
            best_index = i;
        }
    }

    best_index
}
