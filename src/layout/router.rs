//! Orthogonal edge routing on the doubled grid.
//!
//! Descending edges leave through the corridor below the source and enter the
//! destination from the corridor above it. Edges spanning several rows detour
//! around the right of the widest column in the row range, or around the left
//! of the destination when another edge's incoming path would cut across that
//! detour. Back edges (ascending or same-row) always take the left detour.

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use super::types::{
    Direction, EdgeRoute, GridPoint, LayoutNode, bottom_corridor, cell, left_corridor,
    right_corridor, top_corridor,
};
use crate::cancel::TaskMonitor;
use crate::error::Result;

/// An edge resolved to its endpoint nodes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEnds<E> {
    pub edge: E,
    pub src: usize,
    pub dst: usize,
}

pub struct EdgeRouter<'a, V, E> {
    nodes: &'a [LayoutNode<V>],
    /// Edges in the global order.
    edges: Vec<EdgeEnds<E>>,
    back_edge_emphasis: f64,
}

impl<'a, V, E> EdgeRouter<'a, V, E>
where
    V: Copy + Eq + Hash,
    E: Copy + Ord,
{
    pub fn new(
        nodes: &'a [LayoutNode<V>],
        node_of: &HashMap<V, usize>,
        edges: impl IntoIterator<Item = (E, V, V)>,
        back_edge_emphasis: f64,
    ) -> Self {
        let mut resolved: Vec<EdgeEnds<E>> = edges
            .into_iter()
            .filter_map(|(edge, a, b)| {
                let src = *node_of.get(&a)?;
                let dst = *node_of.get(&b)?;
                Some(EdgeEnds { edge, src, dst })
            })
            .collect();
        resolved.sort_by(|a, b| compare_edges(nodes, a, b));
        Self {
            nodes,
            edges: resolved,
            back_edge_emphasis,
        }
    }

    /// Edges in routing order.
    pub fn edges(&self) -> &[EdgeEnds<E>] {
        &self.edges
    }

    /// Route every edge, checking for cancellation before each one.
    pub fn route_all<M: TaskMonitor + ?Sized>(&self, monitor: &M) -> Result<Vec<EdgeRoute<E>>> {
        let mut routes = Vec::with_capacity(self.edges.len());
        for ends in &self.edges {
            monitor.check_cancelled()?;
            routes.push(self.route(ends));
        }
        debug!(
            edges = routes.len(),
            back_edges = routes.iter().filter(|r| r.is_back_edge()).count(),
            "edges routed"
        );
        Ok(routes)
    }

    pub fn route(&self, ends: &EdgeEnds<E>) -> EdgeRoute<E> {
        let start = &self.nodes[ends.src];
        let end = &self.nodes[ends.dst];
        let mut horizontal = Direction::horizontal(start.col, end.col);
        let vertical = Direction::vertical(start.row, end.row);

        let mut junctions = vec![GridPoint::new(cell(start.col), bottom_corridor(start.row))];
        let emphasis = if vertical == Direction::Down {
            if end.row - start.row > 1 {
                let detour_x = if self.detect_edge_clash(ends) {
                    trace!(src_row = start.row, src_col = start.col, "clash, detour left");
                    left_corridor(end.col)
                } else {
                    right_corridor(self.max_col_in_range(start.row, end.row))
                };
                junctions.push(GridPoint::new(detour_x, bottom_corridor(start.row)));
                junctions.push(GridPoint::new(detour_x, top_corridor(end.row)));
            }
            None
        } else {
            // Back edges always ascend on the left of their destination.
            horizontal = Direction::Left;
            junctions.push(GridPoint::new(left_corridor(end.col), bottom_corridor(start.row)));
            junctions.push(GridPoint::new(left_corridor(end.col), top_corridor(end.row)));
            Some(self.back_edge_emphasis)
        };
        junctions.push(GridPoint::new(cell(end.col), top_corridor(end.row)));

        EdgeRoute {
            edge: ends.edge,
            horizontal,
            vertical,
            src_cell: start.cell(),
            dst_cell: end.cell(),
            junctions,
            emphasis,
        }
    }

    /// True if another edge starts above this edge's source (or on its row,
    /// further right) and lands one row below the source, at or left of the
    /// source column: its incoming path would cross the right-side detour.
    ///
    /// Linear in the number of edges.
    pub fn detect_edge_clash(&self, ends: &EdgeEnds<E>) -> bool {
        let me = &self.nodes[ends.src];
        self.edges.iter().any(|other| {
            let src = &self.nodes[other.src];
            let dst = &self.nodes[other.dst];
            let above_or_right = src.row < me.row || (src.row == me.row && src.col > me.col);
            above_or_right && dst.row == me.row + 1 && dst.col <= me.col
        })
    }

    /// Widest column among nodes whose row lies in `[row_min, row_max]`.
    ///
    /// Linear in the number of nodes; starts from column 0.
    pub fn max_col_in_range(&self, row_min: usize, row_max: usize) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.row >= row_min && n.row <= row_max)
            .map(|n| n.col)
            .fold(0, usize::max)
    }
}

/// Global edge order: destination row ascending, source row descending,
/// destination column ascending, source column ascending, then edge id.
pub fn compare_edges<V, E: Ord>(
    nodes: &[LayoutNode<V>],
    a: &EdgeEnds<E>,
    b: &EdgeEnds<E>,
) -> Ordering {
    let key = |e: &EdgeEnds<E>| {
        let src = &nodes[e.src];
        let dst = &nodes[e.dst];
        (dst.row, Reverse(src.row), dst.col, src.col)
    };
    key(a).cmp(&key(b)).then_with(|| a.edge.cmp(&b.edge))
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_router.rs"]
mod tests;
