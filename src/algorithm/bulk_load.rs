//! Overlap-Minimizing Top-down (OMT) bulk loading.

use crate::node::{Children, Entry, ParentNode, RNode};
use crate::params::Params;

/// Builds a balanced subtree over `entries` from scratch, axis-alternating
/// at each level so clusters separate along both X and Y instead of just
/// the one sort axis a plain sort-and-slice (STR) packing would use.
///
/// Callers with fewer than `params.min_entries()` items are expected to
/// fall back to repeated single insertion instead of calling this.
pub(crate) fn build<T>(entries: Vec<Entry<T>>, params: &Params) -> ParentNode<T> {
    let n = entries.len();
    let m = params.max_entries();
    let items: Vec<RNode<T>> = entries.into_iter().map(RNode::Leaf).collect();

    if n <= m {
        return ParentNode::from_children(items.into(), true);
    }

    // Target height and the root-level fan-out that maximizes fill: rather
    // than let every level cap at `m`, the top slice uses a larger
    // effective M so the tree doesn't end up needlessly tall.
    let height = (n as f64).log(m as f64).ceil().max(1.0) as u32;
    let top_m = ((n as f64) / (m as f64).powi(height as i32 - 1))
        .ceil()
        .max(1.0) as usize;

    build_one_level(items, 0, top_m, params)
}

fn build_one_level<T>(
    mut items: Vec<RNode<T>>,
    level: usize,
    top_m: usize,
    params: &Params,
) -> ParentNode<T> {
    let n = items.len();
    let m = params.max_entries();

    if n <= m {
        let is_leaf = items.iter().all(RNode::is_leaf_entry);
        return ParentNode::from_children(items.into(), is_leaf);
    }

    let effective_m = if level == 0 { top_m } else { m };
    let axis = level % 2; // 0 = X, 1 = Y; alternates every level.
    sort_by_axis(&mut items, axis);

    let slices_per_group = (effective_m as f64).sqrt().ceil() as usize;
    let n1 = div_ceil(n, effective_m) * slices_per_group.max(1);
    let n2 = div_ceil(n, effective_m);

    let mut children: Children<T> = Children::new();
    let chunk_size = n1.max(1);
    let sub_chunk_size = n2.max(1);
    let mut remaining = items;
    while !remaining.is_empty() {
        let take = chunk_size.min(remaining.len());
        let mut chunk: Vec<RNode<T>> = remaining.drain(0..take).collect();
        sort_by_axis(&mut chunk, axis);

        while !chunk.is_empty() {
            let sub_take = sub_chunk_size.min(chunk.len());
            let sub_items: Vec<RNode<T>> = chunk.drain(0..sub_take).collect();
            let child = build_one_level(sub_items, level + 1, top_m, params);
            children.push(RNode::Parent(Box::new(child)));
        }
    }

    ParentNode::from_children(children, false)
}

fn axis_low<T>(node: &RNode<T>, axis: usize) -> f64 {
    let envelope = node.envelope();
    if axis == 0 {
        envelope.x1()
    } else {
        envelope.y1()
    }
}

fn sort_by_axis<T>(items: &mut [RNode<T>], axis: usize) {
    items.sort_by(|a, b| {
        axis_low(a, axis)
            .partial_cmp(&axis_low(b, axis))
            .expect("envelope coordinates are always finite")
    });
}

fn div_ceil(a: usize, b: usize) -> usize {
    if b == 0 {
        0
    } else {
        (a + b - 1) / b
    }
}
