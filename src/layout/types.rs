//! Layout types: LayoutNode, RowTable, GridPoint, EdgeRoute, GridLayout,
//! SpaceLayout.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;

use super::lanes::LanePadding;

// ─── Grid coordinates ────────────────────────────────────────────────────────
//
// The grid is doubled: vertex cells sit at odd coordinates, edge corridors at
// even ones, so a corridor always separates two neighbouring cells.

/// Grid index of the cell holding vertex row/column `i`.
pub fn cell(i: usize) -> i32 {
    2 * i as i32 + 1
}

/// Corridor row just below vertex row `row`.
pub fn bottom_corridor(row: usize) -> i32 {
    2 * row as i32 + 2
}

/// Corridor row just above vertex row `row`.
pub fn top_corridor(row: usize) -> i32 {
    2 * row as i32
}

/// Corridor column right of vertex column `col`.
pub fn right_corridor(col: usize) -> i32 {
    2 * col as i32 + 2
}

/// Corridor column left of vertex column `col`.
pub fn left_corridor(col: usize) -> i32 {
    2 * col as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Drawing-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ─── Direction ───────────────────────────────────────────────────────────────

/// Displacement of an edge along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Still,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Horizontal displacement from column `from` to column `to`.
    pub fn horizontal(from: usize, to: usize) -> Self {
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => Self::Still,
            std::cmp::Ordering::Less => Self::Right,
            std::cmp::Ordering::Greater => Self::Left,
        }
    }

    /// Vertical displacement from row `from` to row `to`.
    pub fn vertical(from: usize, to: usize) -> Self {
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => Self::Still,
            std::cmp::Ordering::Less => Self::Down,
            std::cmp::Ordering::Greater => Self::Up,
        }
    }
}

// ─── LayoutNode / RowTable ───────────────────────────────────────────────────

/// A vertex with its assigned row and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode<V> {
    pub vertex: V,
    pub row: usize,
    pub col: usize,
}

impl<V> LayoutNode<V> {
    pub fn new(vertex: V, row: usize) -> Self {
        Self { vertex, row, col: 0 }
    }

    /// Grid coordinates of the vertex cell.
    pub fn cell(&self) -> GridPoint {
        GridPoint::new(cell(self.col), cell(self.row))
    }
}

/// Row index → node ids (indices into the node arena) in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    rows: BTreeMap<usize, Vec<usize>>,
}

impl RowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: usize, node: usize) {
        self.rows.entry(row).or_default().push(node);
    }

    /// Remove `node` from `row`; returns `false` if the row did not hold it.
    pub fn remove(&mut self, row: usize, node: usize) -> bool {
        let Some(members) = self.rows.get_mut(&row) else {
            return false;
        };
        match members.iter().position(|&n| n == node) {
            Some(pos) => {
                members.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> &[usize] {
        self.rows.get(&row).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.rows.iter().map(|(&r, v)| (r, v.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Vec<usize>)> {
        self.rows.iter_mut().map(|(&r, v)| (r, v))
    }

    /// Size of the widest row (0 when empty).
    pub fn max_len(&self) -> usize {
        self.rows.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of non-empty rows.
    pub fn depth(&self) -> usize {
        self.rows.values().filter(|v| !v.is_empty()).count()
    }
}

// ─── EdgeRoute ───────────────────────────────────────────────────────────────

/// An edge with its junction path on the doubled grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRoute<E> {
    pub edge: E,
    /// Column displacement; `Left` for every back edge, which detours left.
    pub horizontal: Direction,
    pub vertical: Direction,
    /// Cells of the source and destination vertices.
    pub src_cell: GridPoint,
    pub dst_cell: GridPoint,
    pub junctions: Vec<GridPoint>,
    /// Reduced emphasis for back edges; `None` leaves the host default.
    pub emphasis: Option<f64>,
}

impl<E> EdgeRoute<E> {
    /// Ascending or same-row edges are back edges.
    pub fn is_back_edge(&self) -> bool {
        self.vertical != Direction::Down
    }
}

// ─── GridLayout ──────────────────────────────────────────────────────────────

/// Result of the grid stages: rows, columns, junction paths and lanes.
#[derive(Debug, Clone)]
pub struct GridLayout<V, E> {
    /// Nodes ordered by (row, col).
    pub nodes: Vec<LayoutNode<V>>,
    /// Routes in the global edge order.
    pub routes: Vec<EdgeRoute<E>>,
    pub lanes: LanePadding<E>,
    /// Largest column in use; -1 for an empty layout.
    pub max_col: i32,
    /// Vertices left out because the root cannot reach them.
    pub unreachable: Vec<V>,
    node_of: HashMap<V, usize>,
    route_of: HashMap<E, usize>,
}

impl<V: Copy + Eq + Hash, E: Copy + Eq + Hash> GridLayout<V, E> {
    pub fn new(
        mut nodes: Vec<LayoutNode<V>>,
        routes: Vec<EdgeRoute<E>>,
        lanes: LanePadding<E>,
        max_col: i32,
        unreachable: Vec<V>,
    ) -> Self {
        nodes.sort_by_key(|n| (n.row, n.col));
        let node_of = nodes.iter().enumerate().map(|(i, n)| (n.vertex, i)).collect();
        let route_of = routes.iter().enumerate().map(|(i, r)| (r.edge, i)).collect();
        Self {
            nodes,
            routes,
            lanes,
            max_col,
            unreachable,
            node_of,
            route_of,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), LanePadding::default(), -1, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, v: V) -> Option<&LayoutNode<V>> {
        self.node_of.get(&v).map(|&i| &self.nodes[i])
    }

    pub fn route(&self, e: E) -> Option<&EdgeRoute<E>> {
        self.route_of.get(&e).map(|&i| &self.routes[i])
    }

    /// Number of rows in use.
    pub fn row_count(&self) -> usize {
        self.nodes.iter().map(|n| n.row + 1).max().unwrap_or(0)
    }

    /// Nodes of one row, left to right.
    pub fn row(&self, row: usize) -> Vec<&LayoutNode<V>> {
        self.nodes.iter().filter(|n| n.row == row).collect()
    }
}

// ─── SpaceLayout ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceVertex<V> {
    pub vertex: V,
    pub center: Point2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceEdge<E> {
    pub edge: E,
    /// Polyline from the source center row to the destination center row.
    pub points: Vec<Point2>,
    pub emphasis: Option<f64>,
}

/// Drawing-space result handed back to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceLayout<V, E> {
    pub vertices: Vec<SpaceVertex<V>>,
    pub edges: Vec<SpaceEdge<E>>,
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
