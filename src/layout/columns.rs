//! Column assignment: subtree scores, then per-row sort and centering.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::rows::RowAssignment;
use crate::graph::HostGraph;

/// Contribution of a successor that is still on the active path.
pub const CYCLE_PENALTY: i64 = -1000;

// ─── Scoring ─────────────────────────────────────────────────────────────────

struct Frame<V> {
    vertex: V,
    base: i64,
    subnodes: i64,
    successors: Vec<V>,
    next: usize,
}

/// Post-order walk computing `score[v] = base + subnodes + 1`.
///
/// A visited successor contributes 0, or [`CYCLE_PENALTY`] while it is still
/// on the path; an unvisited one contributes its own `subnodes`. Each
/// successor is called with `base + subnodes + 1` as accumulated so far.
pub struct ScoreWalker<'g, G: HostGraph> {
    graph: &'g G,
    visited: HashSet<G::Vertex>,
    on_path: HashSet<G::Vertex>,
    scores: HashMap<G::Vertex, i64>,
}

impl<'g, G: HostGraph> ScoreWalker<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
            on_path: HashSet::new(),
            scores: HashMap::new(),
        }
    }

    pub fn run(mut self, root: G::Vertex) -> HashMap<G::Vertex, i64> {
        let mut stack: Vec<Frame<G::Vertex>> = Vec::new();
        if let Some(frame) = self.open(root, 0) {
            stack.push(frame);
        }

        while let Some(top) = stack.last_mut() {
            if top.next < top.successors.len() {
                let s = top.successors[top.next];
                top.next += 1;
                let base = top.base + top.subnodes + 1;
                match self.visited_contribution(s) {
                    Some(contribution) => top.subnodes += contribution,
                    None => {
                        if let Some(frame) = self.open(s, base) {
                            stack.push(frame);
                        }
                    }
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            self.scores
                .insert(done.vertex, done.base + done.subnodes + 1);
            self.on_path.remove(&done.vertex);
            if let Some(parent) = stack.last_mut() {
                parent.subnodes += done.subnodes;
            }
        }
        self.scores
    }

    fn visited_contribution(&self, v: G::Vertex) -> Option<i64> {
        if !self.visited.contains(&v) {
            return None;
        }
        Some(if self.on_path.contains(&v) {
            CYCLE_PENALTY
        } else {
            0
        })
    }

    fn open(&mut self, v: G::Vertex, base: i64) -> Option<Frame<G::Vertex>> {
        if !self.visited.insert(v) {
            return None;
        }
        self.on_path.insert(v);
        Some(Frame {
            vertex: v,
            base,
            subnodes: 0,
            successors: self.graph.successors(v),
            next: 0,
        })
    }
}

pub fn score_vertices<G: HostGraph>(graph: &G, root: G::Vertex) -> HashMap<G::Vertex, i64> {
    ScoreWalker::new(graph).run(root)
}

// ─── Ordering and centering ──────────────────────────────────────────────────

/// Sort every row by score and center it against the widest row.
///
/// Returns the largest column assigned, or -1 when there are no nodes.
pub fn assign_columns<V: Copy + Eq + std::hash::Hash + std::fmt::Debug>(
    assignment: &mut RowAssignment<V>,
    scores: &HashMap<V, i64>,
) -> i32 {
    let max_row_len = assignment.rows.max_len();
    let nodes = &mut assignment.nodes;
    let mut max_col: i32 = -1;

    for (_, members) in assignment.rows.iter_mut() {
        // Stable: equal scores keep row insertion order.
        members.sort_by_key(|&id| score_of(scores, nodes[id].vertex));

        let offset = (max_row_len - members.len()) / 2;
        for (i, &id) in members.iter().enumerate() {
            let col = offset + i;
            nodes[id].col = col;
            max_col = max_col.max(col as i32);
        }
    }

    debug!(max_row_len, max_col, "columns assigned");
    max_col
}

fn score_of<V: Eq + std::hash::Hash + std::fmt::Debug>(scores: &HashMap<V, i64>, v: V) -> i64 {
    match scores.get(&v) {
        Some(&s) => s,
        None => panic!("{v:?} has a row but was never scored"),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_columns.rs"]
mod tests;
