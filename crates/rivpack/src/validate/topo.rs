//! Graph algorithms over parent links.
//!
//! Parent links form a single-successor function, so a cycle is found by
//! walking each chain until it ends, leaves the batch, or revisits a node.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::LocalId;

/// A node of the graph: its id and optional parent id.
pub type Link = (LocalId, Option<LocalId>);

/// Returns the nodes of the first cycle found, in parent order starting at
/// the node where the walk re-entered it.
///
/// Walks start from each node in input order. Nodes finished by an earlier
/// walk are not walked again.
pub fn find_cycle(links: &[Link]) -> Option<Vec<LocalId>> {
    let parents: FxHashMap<LocalId, Option<LocalId>> = links.iter().copied().collect();
    let mut finished: FxHashSet<LocalId> = FxHashSet::default();

    for &(start, _) in links {
        if finished.contains(&start) {
            continue;
        }
        let mut path: Vec<LocalId> = Vec::new();
        let mut position: FxHashMap<LocalId, usize> = FxHashMap::default();
        let mut cursor = Some(start);
        while let Some(node) = cursor {
            if finished.contains(&node) {
                break;
            }
            if let Some(&at) = position.get(&node) {
                return Some(path[at..].to_vec());
            }
            position.insert(node, path.len());
            path.push(node);
            cursor = parents.get(&node).copied().flatten();
        }
        finished.extend(path);
    }
    None
}

/// Result of a stable topological sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorted {
    /// Input indices in output order.
    pub order: Vec<usize>,
    /// Input indices never reached from a parentless node.
    pub unreachable: Vec<usize>,
    /// Nodes emitted after a node that followed them in the input.
    pub reordered: usize,
}

/// Orders nodes so every node follows its parent.
///
/// Kahn's algorithm with the ready set ordered by input index, so input that
/// is already ordered comes out unchanged. Parentless nodes are the sources;
/// nodes whose parent is absent or on a cycle are never ready and are
/// reported as unreachable. Ids are assumed unique.
pub fn stable_sort(links: &[Link]) -> Sorted {
    let mut children: FxHashMap<LocalId, Vec<usize>> = FxHashMap::default();
    let mut ready: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
    for (index, (_, parent)) in links.iter().enumerate() {
        match parent {
            Some(parent) => children.entry(*parent).or_default().push(index),
            None => ready.push(Reverse(index)),
        }
    }

    let mut order = Vec::with_capacity(links.len());
    let mut emitted = vec![false; links.len()];
    while let Some(Reverse(index)) = ready.pop() {
        order.push(index);
        emitted[index] = true;
        if let Some(kids) = children.get(&links[index].0) {
            ready.extend(kids.iter().map(|&kid| Reverse(kid)));
        }
    }

    let mut reordered = 0;
    let mut highest: Option<usize> = None;
    for &index in &order {
        if highest.is_some_and(|h| index < h) {
            reordered += 1;
        }
        highest = Some(highest.map_or(index, |h| h.max(index)));
    }

    let unreachable = (0..links.len()).filter(|&i| !emitted[i]).collect();
    Sorted {
        order,
        unreachable,
        reordered,
    }
}
