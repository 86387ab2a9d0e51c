//! Wide layout pipeline.
//!
//! Stages, each consuming the previous one's output:
//!   1. rows      : longest simple path from the root
//!   2. columns   : subtree scores, per-row sort, centering
//!   3. router    : junction paths with clash avoidance
//!   4. lanes     : per-line lane offsets
//!   5. translate : grid → drawing space
//!
//! Stages 1–4 run in [`WideLayout::compute`], stage 5 in
//! [`WideLayout::translate`]. All intermediate state lives in a
//! `LayoutContext` built for one call and dropped at its end.

pub mod columns;
pub mod lanes;
pub mod router;
pub mod rows;
pub mod translate;
pub mod types;

use std::collections::HashMap;

use tracing::{debug, info_span, warn};

pub use lanes::{Axis, LanePadding};
pub use translate::{CellGrid, GridSpace};
pub use types::{
    Direction, EdgeRoute, GridLayout, GridPoint, LayoutNode, Point2, RowTable, SpaceEdge,
    SpaceLayout, SpaceVertex,
};

use crate::cancel::TaskMonitor;
use crate::config::{LayoutConfig, UnreachablePolicy};
use crate::error::{LayoutError, Result};
use crate::graph::HostGraph;

// ─── WideLayout ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct WideLayout {
    config: LayoutConfig,
}

impl WideLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Rows, columns, junction paths and lanes for `graph`.
    ///
    /// The root is the smallest vertex. An empty graph yields an empty layout.
    pub fn compute<G, M>(&self, graph: &G, monitor: &M) -> Result<GridLayout<G::Vertex, G::Edge>>
    where
        G: HostGraph,
        M: TaskMonitor + ?Sized,
    {
        let Some(root) = graph.root() else {
            return Ok(GridLayout::empty());
        };
        let _span = info_span!("wide_layout", root = ?root).entered();

        let mut ctx = LayoutContext::new(graph, &self.config);
        ctx.assign_rows(root);
        ctx.check_reachability()?;
        ctx.assign_cols(root);
        ctx.route_edges(monitor)?;
        ctx.pad_lanes();
        Ok(ctx.finish())
    }

    /// Translate a grid layout into drawing space.
    pub fn translate<V, E, S, M>(
        &self,
        layout: &GridLayout<V, E>,
        space: &S,
        monitor: &M,
    ) -> Result<SpaceLayout<V, E>>
    where
        V: Copy + Eq + std::hash::Hash,
        E: Copy + Eq + std::hash::Hash + std::fmt::Debug,
        S: GridSpace + ?Sized,
        M: TaskMonitor + ?Sized,
    {
        translate::translate(layout, space, monitor)
    }
}

// ─── LayoutContext ───────────────────────────────────────────────────────────

/// Derived state of one layout pass.
struct LayoutContext<'g, G: HostGraph> {
    graph: &'g G,
    config: &'g LayoutConfig,
    assignment: rows::RowAssignment<G::Vertex>,
    max_col: i32,
    unreachable: Vec<G::Vertex>,
    routes: Vec<EdgeRoute<G::Edge>>,
    lanes: LanePadding<G::Edge>,
}

impl<'g, G: HostGraph> LayoutContext<'g, G> {
    fn new(graph: &'g G, config: &'g LayoutConfig) -> Self {
        Self {
            graph,
            config,
            assignment: rows::RowAssignment {
                nodes: Vec::new(),
                node_of: HashMap::new(),
                rows: RowTable::new(),
            },
            max_col: -1,
            unreachable: Vec::new(),
            routes: Vec::new(),
            lanes: LanePadding::default(),
        }
    }

    fn assign_rows(&mut self, root: G::Vertex) {
        self.assignment = rows::assign_rows(self.graph, root);
    }

    fn check_reachability(&mut self) -> Result<()> {
        let missing: Vec<G::Vertex> = self
            .graph
            .vertices()
            .into_iter()
            .filter(|v| !self.assignment.node_of.contains_key(v))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        match self.config.unreachable {
            UnreachablePolicy::Reject => Err(LayoutError::Unreachable {
                count: missing.len(),
                vertices: missing.iter().map(|v| format!("{v:?}")).collect(),
            }),
            UnreachablePolicy::Exclude => {
                warn!(
                    count = missing.len(),
                    "excluding vertices unreachable from the root"
                );
                self.unreachable = missing;
                Ok(())
            }
        }
    }

    fn assign_cols(&mut self, root: G::Vertex) {
        let scores = columns::score_vertices(self.graph, root);
        self.max_col = columns::assign_columns(&mut self.assignment, &scores);
    }

    fn route_edges<M: TaskMonitor + ?Sized>(&mut self, monitor: &M) -> Result<()> {
        let graph = self.graph;
        let edges = graph.edges().into_iter().map(|e| {
            let (a, b) = graph.endpoints(e);
            (e, a, b)
        });
        let router = router::EdgeRouter::new(
            &self.assignment.nodes,
            &self.assignment.node_of,
            edges,
            self.config.back_edge_emphasis,
        );
        self.routes = router.route_all(monitor)?;
        Ok(())
    }

    fn pad_lanes(&mut self) {
        self.lanes =
            LanePadding::compute(&self.routes, self.config.lane_padding, self.config.lane_step);
    }

    fn finish(self) -> GridLayout<G::Vertex, G::Edge> {
        debug!(
            nodes = self.assignment.nodes.len(),
            routes = self.routes.len(),
            max_col = self.max_col,
            "grid layout done"
        );
        GridLayout::new(
            self.assignment.nodes,
            self.routes,
            self.lanes,
            self.max_col,
            self.unreachable,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_pipeline.rs"]
mod tests;
