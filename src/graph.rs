//! Host graph seam and the petgraph-backed control-flow graph.
//!
//! The layout core only talks to [`HostGraph`]. [`FlowGraph`] is the host
//! used by the parsers, the CLI and the tests: a `DiGraph` of basic blocks
//! keyed by start address, plus a `HashMap<BlockAddr, NodeIndex>` for O(1)
//! lookup.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::layout::GridLayout;

// ─── HostGraph ───────────────────────────────────────────────────────────────

/// What the layout pipeline needs from the graph it lays out.
pub trait HostGraph {
    /// Totally ordered identity; the smallest vertex is the layout root.
    type Vertex: Copy + Ord + Hash + fmt::Debug;
    type Edge: Copy + Ord + Hash + fmt::Debug;

    fn vertices(&self) -> Vec<Self::Vertex>;

    /// Distinct successors of `v`, in ascending order.
    fn successors(&self, v: Self::Vertex) -> Vec<Self::Vertex>;

    fn edges(&self) -> Vec<Self::Edge>;

    /// `(start, end)` of an edge.
    fn endpoints(&self, e: Self::Edge) -> (Self::Vertex, Self::Vertex);

    fn root(&self) -> Option<Self::Vertex> {
        self.vertices().into_iter().min()
    }
}

// ─── Data types ──────────────────────────────────────────────────────────────

/// Start address of a basic block.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockAddr(pub u64);

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for BlockAddr {
    type Err = String;

    /// Accepts `0x`-prefixed hex or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(BlockAddr)
            .map_err(|e| format!("invalid block address '{s}': {e}"))
    }
}

/// How control reaches the edge's destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Fallthrough,
    #[default]
    Jump,
    Conditional,
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fallthrough" | "fall" => Ok(Self::Fallthrough),
            "jump" | "jmp" => Ok(Self::Jump),
            "conditional" | "cond" => Ok(Self::Conditional),
            other => Err(format!(
                "unknown edge kind '{other}'; use fallthrough, jump or conditional"
            )),
        }
    }
}

/// Node metadata stored in the directed graph.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockData {
    pub addr: BlockAddr,
    pub label: String,
    /// Drawing size; `None` falls back to the configured default.
    pub size: Option<(f64, f64)>,
}

/// Edge metadata stored in the directed graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub kind: EdgeKind,
    /// Style hint set by the layout (reduced for back edges).
    pub emphasis: Option<f64>,
}

// ─── FlowGraph ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub digraph: DiGraph<BlockData, FlowEdge>,
    /// Maps block address → petgraph NodeIndex.
    pub node_index: HashMap<BlockAddr, NodeIndex>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block, or refine a block created implicitly by an edge.
    ///
    /// A later declaration of the same address replaces label and size.
    pub fn add_block(&mut self, addr: BlockAddr, label: Option<&str>, size: Option<(f64, f64)>) {
        let idx = self.ensure_block(addr);
        let data = &mut self.digraph[idx];
        if let Some(label) = label {
            data.label = label.to_string();
        }
        if size.is_some() {
            data.size = size;
        }
    }

    /// Ensure a block exists. If absent, creates one labelled with its address.
    pub fn ensure_block(&mut self, addr: BlockAddr) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&addr) {
            return idx;
        }
        let idx = self.digraph.add_node(BlockData {
            addr,
            label: addr.to_string(),
            size: None,
        });
        self.node_index.insert(addr, idx);
        idx
    }

    /// Add a directed edge; missing endpoints are created on demand.
    pub fn add_edge(&mut self, from: BlockAddr, to: BlockAddr, kind: EdgeKind) -> EdgeIndex {
        let a = self.ensure_block(from);
        let b = self.ensure_block(to);
        self.digraph.add_edge(
            a,
            b,
            FlowEdge {
                kind,
                emphasis: None,
            },
        )
    }

    pub fn block(&self, addr: BlockAddr) -> Option<&BlockData> {
        self.node_index.get(&addr).map(|&idx| &self.digraph[idx])
    }

    pub fn edge(&self, e: EdgeIndex) -> Option<&FlowEdge> {
        self.digraph.edge_weight(e)
    }

    /// Drawing size of a block, falling back to the configured default.
    pub fn block_size(&self, addr: BlockAddr, config: &LayoutConfig) -> (f64, f64) {
        self.block(addr)
            .and_then(|b| b.size)
            .unwrap_or((config.block_width, config.block_height))
    }

    pub fn block_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// Copy the layout's emphasis hints onto the edges.
    ///
    /// Edges the layout did not route keep their current hint.
    pub fn apply_emphasis(&mut self, layout: &GridLayout<BlockAddr, EdgeIndex>) {
        for route in &layout.routes {
            if let Some(weight) = self.digraph.edge_weight_mut(route.edge) {
                weight.emphasis = route.emphasis;
            }
        }
    }
}

impl HostGraph for FlowGraph {
    type Vertex = BlockAddr;
    type Edge = EdgeIndex;

    fn vertices(&self) -> Vec<BlockAddr> {
        let mut addrs: Vec<BlockAddr> = self.node_index.keys().copied().collect();
        addrs.sort();
        addrs
    }

    fn successors(&self, v: BlockAddr) -> Vec<BlockAddr> {
        let Some(&idx) = self.node_index.get(&v) else {
            return vec![];
        };
        let mut result: Vec<BlockAddr> = self
            .digraph
            .neighbors(idx)
            .map(|n| self.digraph[n].addr)
            .collect();
        result.sort();
        result.dedup();
        result
    }

    fn edges(&self) -> Vec<EdgeIndex> {
        self.digraph.edge_indices().collect()
    }

    fn endpoints(&self, e: EdgeIndex) -> (BlockAddr, BlockAddr) {
        match self.digraph.edge_endpoints(e) {
            Some((a, b)) => (self.digraph[a].addr, self.digraph[b].addr),
            None => panic!("edge {e:?} does not belong to this graph"),
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_graph.rs"]
mod tests;
