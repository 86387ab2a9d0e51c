//! Row assignment: longest simple path from the root.
//!
//! A depth-first walk carries the set of vertices on the active path. A
//! vertex reached deeper than its current row is promoted, unless it is on
//! the path (the walk just closed a cycle), in which case the walk stops
//! there. Back edges therefore never push a loop header down.
//!
//! A vertex revisited off the path without promotion is walked again only
//! when a cycle is reachable from it; below such a vertex the path set can
//! change the outcome. Acyclic regions are therefore walked once per
//! promotion, while reconvergent branches inside loops still cost one walk
//! per simple path. The walk uses an explicit stack of enter/exit steps
//! instead of recursion.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, trace};

use super::types::{LayoutNode, RowTable};
use crate::graph::HostGraph;

/// Output of the row stage: node arena, vertex → node id, and the row table.
#[derive(Debug, Clone)]
pub struct RowAssignment<V> {
    pub nodes: Vec<LayoutNode<V>>,
    pub node_of: HashMap<V, usize>,
    pub rows: RowTable,
}

enum Step<V> {
    Enter(V, usize),
    Exit(V),
}

pub struct RowAssigner<'g, G: HostGraph> {
    graph: &'g G,
    nodes: Vec<LayoutNode<G::Vertex>>,
    node_of: HashMap<G::Vertex, usize>,
    rows: RowTable,
    on_path: HashSet<G::Vertex>,
    /// Vertices from which no cycle is reachable.
    acyclic: HashSet<G::Vertex>,
}

impl<'g, G: HostGraph> RowAssigner<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            nodes: Vec::new(),
            node_of: HashMap::new(),
            rows: RowTable::new(),
            on_path: HashSet::new(),
            acyclic: acyclic_below(graph),
        }
    }

    pub fn run(mut self, root: G::Vertex) -> RowAssignment<G::Vertex> {
        let mut stack = vec![Step::Enter(root, 0)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(v, row) => self.enter(v, row, &mut stack),
                Step::Exit(v) => {
                    self.on_path.remove(&v);
                }
            }
        }
        debug!(
            nodes = self.nodes.len(),
            rows = self.rows.depth(),
            "rows assigned"
        );
        RowAssignment {
            nodes: self.nodes,
            node_of: self.node_of,
            rows: self.rows,
        }
    }

    fn enter(&mut self, v: G::Vertex, row: usize, stack: &mut Vec<Step<G::Vertex>>) {
        if self.on_path.contains(&v) {
            return;
        }
        match self.node_of.get(&v) {
            Some(&id) if self.nodes[id].row < row => self.promote(id, row),
            // Already walked at this depth or deeper, and nothing below can
            // close a cycle onto the current path.
            Some(_) if self.acyclic.contains(&v) => return,
            Some(_) => {}
            None => {
                let id = self.nodes.len();
                self.nodes.push(LayoutNode::new(v, row));
                self.node_of.insert(v, id);
                self.rows.insert(row, id);
            }
        }

        self.on_path.insert(v);
        stack.push(Step::Exit(v));
        // Reversed so the smallest successor is walked first.
        for s in self.graph.successors(v).into_iter().rev() {
            stack.push(Step::Enter(s, row + 1));
        }
    }

    fn promote(&mut self, id: usize, row: usize) {
        let from = self.nodes[id].row;
        let removed = self.rows.remove(from, id);
        assert!(
            removed,
            "row table out of sync: {:?} missing from row {from}",
            self.nodes[id].vertex
        );
        self.rows.insert(row, id);
        self.nodes[id].row = row;
        trace!(vertex = ?self.nodes[id].vertex, from, to = row, "promoted");
    }
}

/// Vertices whose whole reachable subgraph is free of cycles.
fn acyclic_below<G: HostGraph>(graph: &G) -> HashSet<G::Vertex> {
    let mut map: DiGraphMap<G::Vertex, ()> = DiGraphMap::new();
    for v in graph.vertices() {
        map.add_node(v);
        for s in graph.successors(v) {
            map.add_edge(v, s, ());
        }
    }
    let mut acyclic = HashSet::new();
    // Components arrive in reverse topological order, successors first.
    for scc in tarjan_scc(&map) {
        if let [v] = scc.as_slice() {
            if map.neighbors(*v).all(|s| acyclic.contains(&s)) {
                acyclic.insert(*v);
            }
        }
    }
    acyclic
}

/// Assign rows to every vertex reachable from `root`.
pub fn assign_rows<G: HostGraph>(graph: &G, root: G::Vertex) -> RowAssignment<G::Vertex> {
    RowAssigner::new(graph).run(root)
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_rows.rs"]
mod tests;
