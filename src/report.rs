//! JSON report of a finished layout.
//!
//! Joins the grid result, the drawing-space result and the block metadata of
//! the [`FlowGraph`] into one serializable document.

use petgraph::graph::EdgeIndex;
use serde::Serialize;

use crate::graph::{BlockAddr, EdgeKind, FlowGraph};
use crate::layout::{GridLayout, GridPoint, Point2, SpaceLayout};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockReport {
    pub addr: BlockAddr,
    pub label: String,
    pub row: usize,
    pub col: usize,
    pub center: Point2,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeReport {
    pub from: BlockAddr,
    pub to: BlockAddr,
    pub kind: EdgeKind,
    pub junctions: Vec<GridPoint>,
    pub points: Vec<Point2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<f64>,
    pub back_edge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub width: f64,
    pub height: f64,
    pub max_col: i32,
    pub blocks: Vec<BlockReport>,
    /// Edges in routing order.
    pub edges: Vec<EdgeReport>,
    pub unreachable: Vec<BlockAddr>,
}

impl LayoutReport {
    /// Build a report; `size_of` gives the drawing size of a block.
    pub fn build(
        graph: &FlowGraph,
        grid: &GridLayout<BlockAddr, EdgeIndex>,
        space: &SpaceLayout<BlockAddr, EdgeIndex>,
        size_of: impl Fn(BlockAddr) -> (f64, f64),
        (width, height): (f64, f64),
    ) -> Self {
        let blocks = space
            .vertices
            .iter()
            .filter_map(|v| {
                let node = grid.node(v.vertex)?;
                let label = graph
                    .block(v.vertex)
                    .map(|b| b.label.clone())
                    .unwrap_or_else(|| v.vertex.to_string());
                let (w, h) = size_of(v.vertex);
                Some(BlockReport {
                    addr: v.vertex,
                    label,
                    row: node.row,
                    col: node.col,
                    center: v.center,
                    width: w,
                    height: h,
                })
            })
            .collect();

        let edges = space
            .edges
            .iter()
            .filter_map(|e| {
                let route = grid.route(e.edge)?;
                let (a, b) = graph.digraph.edge_endpoints(e.edge)?;
                let kind = graph.edge(e.edge).map(|w| w.kind).unwrap_or_default();
                Some(EdgeReport {
                    from: graph.digraph[a].addr,
                    to: graph.digraph[b].addr,
                    kind,
                    junctions: route.junctions.clone(),
                    points: e.points.clone(),
                    emphasis: e.emphasis,
                    back_edge: route.is_back_edge(),
                })
            })
            .collect();

        Self {
            width,
            height,
            max_col: grid.max_col,
            blocks,
            edges,
            unreachable: grid.unreachable.clone(),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
