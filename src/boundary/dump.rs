//! Structural dump of a tree's internal nodes, for external observers.

use crate::boundary::geometry::unproject;
use crate::node::{ParentNode, RNode};

/// One internal node's entry in a structural dump: its DFS-assigned
/// identifier, height, and inverse-projected bounding rectangle in
/// longitude/latitude degrees.
///
/// Entries (leaf payload holders) are never dumped — only the nodes that
/// organize them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDump {
    pub id: usize,
    pub height: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Depth-first dump of every node in the subtree rooted at `root`,
/// assigning identifiers by DFS visit order as it goes — the core itself
/// never stores or threads identifiers.
pub fn dump<T>(root: &ParentNode<T>) -> Vec<NodeDump> {
    let mut out = Vec::new();
    let mut next_id = 0;
    dump_node(root, &mut next_id, &mut out);
    out
}

fn dump_node<T>(node: &ParentNode<T>, next_id: &mut usize, out: &mut Vec<NodeDump>) {
    let id = *next_id;
    *next_id += 1;

    let envelope = node.envelope();
    let min = unproject(envelope.x1(), envelope.y1());
    let max = unproject(envelope.x2(), envelope.y2());
    out.push(NodeDump {
        id,
        height: node.height(),
        min_x: min.x,
        min_y: min.y,
        max_x: max.x,
        max_y: max.y,
    });

    for child in node.children() {
        if let RNode::Parent(child) = child {
            dump_node(child, next_id, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::insertion::insert_node;
    use crate::envelope::Envelope;
    use crate::node::Entry;
    use crate::params::Params;

    #[test]
    fn dump_skips_entries_and_covers_every_node() {
        let params = Params::new(4);
        let mut root = ParentNode::new_empty_root();
        for i in 0..10u32 {
            let x = i as f64;
            let envelope = Envelope::new_unchecked(x, 0.0, x + 1.0, 1.0);
            insert_node(&mut root, RNode::Leaf(Entry::new(envelope, i)), &params);
        }

        let dumped = dump(&root);
        assert!(!dumped.is_empty());
        assert!(dumped.iter().any(|n| n.height == root.height()));

        let ids: Vec<usize> = dumped.iter().map(|n| n.id).collect();
        let mut sorted_ids = ids.clone();
        sorted_ids.sort();
        sorted_ids.dedup();
        assert_eq!(ids.len(), sorted_ids.len());
    }

    #[test]
    fn dump_of_empty_root_has_one_entry() {
        let root: ParentNode<u32> = ParentNode::new_empty_root();
        let dumped = dump(&root);
        assert_eq!(dumped.len(), 1);
        assert_eq!(dumped[0].id, 0);
    }
}
