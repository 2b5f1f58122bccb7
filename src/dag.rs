//! # Dependency Graph
//!
//! A directed acyclic graph over library instances. An edge `parent -> child`
//! means `parent` consumes a library class that `child` produces, so children
//! are the direct dependencies of their parent.
//!
//! The graph is kept acyclic at all times: an edge that would close a cycle
//! is rejected with [`Error::CircularDependency`] and never inserted.
//!
//! Storage is a `petgraph` [`DiGraphMap`] keyed by a slot number handed out
//! when a node is first added. Slots are never reused, so walking them in
//! order gives node insertion order even after removals. [`Dag::leaves`] and
//! [`Dag::leaf_batches`] report nodes in that order, which is what makes the
//! ordering deterministic.
//!
//! All traversals are iterative, so graph depth is bounded by memory rather
//! than by the call stack.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use petgraph::algo::{astar, has_path_connecting};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction::{Incoming, Outgoing};

use crate::error::{Error, Result};

/// Insertion-order key of a node inside the graph map.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
struct Slot(usize);

/// Directed acyclic graph keyed by node identity.
#[derive(Debug, Clone)]
pub struct Dag<N> {
    graph: DiGraphMap<Slot, ()>,
    /// Node stored at each slot; `None` once removed
    slots: Vec<Option<N>>,
    index: HashMap<N, Slot>,
}

impl<N> Default for Dag<N> {
    fn default() -> Self {
        Self {
            graph: DiGraphMap::new(),
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<N> Dag<N>
where
    N: Clone + Eq + Hash + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `node` with no children. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.index.contains_key(&node) {
            return false;
        }
        let slot = Slot(self.slots.len());
        self.slots.push(Some(node.clone()));
        self.index.insert(node, slot);
        self.graph.add_node(slot);
        true
    }

    /// Add the edge `parent -> child`.
    ///
    /// Fails with [`Error::CircularDependency`] when `child` already depends
    /// on `parent` (directly or transitively), or when `parent == child`. The
    /// error lists the full cycle path and the graph is left unchanged.
    /// Adding an edge that already exists is a no-op.
    pub fn add_edge(&mut self, parent: &N, child: &N) -> Result<()> {
        if parent == child {
            return Err(Error::CircularDependency {
                cycle: format!("{} -> {}", parent, child),
            });
        }
        if let (Some(p), Some(c)) = (self.slot(parent), self.slot(child)) {
            if self.graph.contains_edge(p, c) {
                return Ok(());
            }
            // Only a node something depends on can be reached from `child`
            let has_parents = self.graph.neighbors_directed(p, Incoming).next().is_some();
            if has_parents {
                if let Some(path) = self.slot_path(c, p) {
                    let cycle = std::iter::once(parent.to_string())
                        .chain(
                            path.into_iter()
                                .filter_map(|s| self.node_at(s))
                                .map(ToString::to_string),
                        )
                        .collect::<Vec<_>>()
                        .join(" -> ");
                    return Err(Error::CircularDependency { cycle });
                }
            }
        }

        self.insert_edge(parent, child);
        Ok(())
    }

    /// Insert an edge without the cycle check, to build broken graphs in tests.
    #[cfg(test)]
    pub(crate) fn add_edge_unchecked(&mut self, parent: &N, child: &N) {
        self.insert_edge(parent, child);
    }

    fn insert_edge(&mut self, parent: &N, child: &N) {
        self.add_node(parent.clone());
        self.add_node(child.clone());
        if let (Some(p), Some(c)) = (self.slot(parent), self.slot(child)) {
            self.graph.add_edge(p, c, ());
        }
    }

    fn slot(&self, node: &N) -> Option<Slot> {
        self.index.get(node).copied()
    }

    fn node_at(&self, slot: Slot) -> Option<&N> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    /// Live nodes with their slots, in insertion order.
    fn live(&self) -> impl Iterator<Item = (Slot, &N)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.as_ref().map(|node| (Slot(idx), node)))
    }

    /// Shortest path `from -> ... -> to` over slots, at least one edge long.
    fn slot_path(&self, from: Slot, to: Slot) -> Option<Vec<Slot>> {
        if from == to {
            return None;
        }
        astar(&self.graph, from, |s| s == to, |_| 1usize, |_| 0).map(|(_, path)| path)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Direct children of `node`, in edge insertion order. Empty for unknown nodes.
    pub fn children(&self, node: &N) -> Vec<N> {
        match self.slot(node) {
            Some(slot) => self
                .graph
                .neighbors_directed(slot, Outgoing)
                .filter_map(|s| self.node_at(s).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `child` is a direct child of `parent`.
    pub fn direct_depends(&self, parent: &N, child: &N) -> bool {
        match (self.slot(parent), self.slot(child)) {
            (Some(p), Some(c)) => self.graph.contains_edge(p, c),
            _ => false,
        }
    }

    /// Whether `parent` reaches `child` through one or more edges.
    ///
    /// Unknown nodes simply have no dependencies.
    pub fn depends(&self, parent: &N, child: &N) -> bool {
        match (self.slot(parent), self.slot(child)) {
            (Some(p), Some(c)) if p != c => has_path_connecting(&self.graph, p, c, None),
            _ => false,
        }
    }

    /// A path `from -> ... -> to` of at least one edge, if one exists.
    pub fn path(&self, from: &N, to: &N) -> Option<Vec<N>> {
        let path = self.slot_path(self.slot(from)?, self.slot(to)?)?;
        Some(
            path.into_iter()
                .filter_map(|s| self.node_at(s).cloned())
                .collect(),
        )
    }

    /// Nodes not in `exclude` whose children are all in `exclude`.
    ///
    /// Results follow node insertion order.
    pub fn leaves(&self, exclude: &HashSet<N>) -> Vec<N> {
        self.live()
            .filter(|(_, node)| !exclude.contains(*node))
            .filter(|(slot, _)| {
                self.graph
                    .neighbors_directed(*slot, Outgoing)
                    .all(|child| self.node_at(child).is_some_and(|c| exclude.contains(c)))
            })
            .map(|(_, node)| node.clone())
            .collect()
    }

    /// Peel the whole graph into successive leaf batches.
    ///
    /// Batch `k + 1` holds the nodes whose last unplaced child was placed in
    /// batch `k`. Each batch follows node insertion order. Nodes on a cycle
    /// never become leaves and are missing from the result.
    pub fn leaf_batches(&self) -> Vec<Vec<N>> {
        let mut pending: HashMap<Slot, usize> = self
            .live()
            .map(|(slot, _)| (slot, self.graph.neighbors_directed(slot, Outgoing).count()))
            .collect();

        let mut current: Vec<Slot> = self
            .live()
            .map(|(slot, _)| slot)
            .filter(|slot| pending.get(slot) == Some(&0))
            .collect();
        let mut batches = Vec::new();

        while !current.is_empty() {
            let mut next = Vec::new();
            for &slot in &current {
                for parent in self.graph.neighbors_directed(slot, Incoming) {
                    if let Some(count) = pending.get_mut(&parent) {
                        *count -= 1;
                        if *count == 0 {
                            next.push(parent);
                        }
                    }
                }
            }
            next.sort_unstable();
            batches.push(
                current
                    .iter()
                    .filter_map(|&s| self.node_at(s).cloned())
                    .collect(),
            );
            current = next;
        }

        batches
    }

    /// Remove `node` and every edge touching it. Returns `false` if absent.
    pub fn remove(&mut self, node: &N) -> bool {
        let Some(slot) = self.index.remove(node) else {
            return false;
        };
        self.graph.remove_node(slot);
        self.slots[slot.0] = None;
        true
    }

    /// Remove every node in `nodes`.
    pub fn remove_all<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        for node in nodes {
            self.remove(node);
        }
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> Vec<N> {
        self.live().map(|(_, node)| node.clone()).collect()
    }

    /// Nodes that no other node depends on, in insertion order.
    pub fn roots(&self) -> Vec<N> {
        self.live()
            .filter(|(slot, _)| {
                self.graph
                    .neighbors_directed(*slot, Incoming)
                    .next()
                    .is_none()
            })
            .map(|(_, node)| node.clone())
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
