//! Grid → drawing space.
//!
//! [`GridSpace`] answers "where is the center of grid row/column i". The
//! translator places each vertex at the center of its cell and each junction
//! at the center of its corridor crossing, shifted by the edge's lane
//! offsets. Each polyline then gets an extra point at either end, level with
//! the source and destination centers, so strokes end flush with the blocks.

use std::hash::Hash;

use tracing::debug;

use super::lanes::Axis;
use super::types::{GridLayout, Point2, SpaceEdge, SpaceLayout, SpaceVertex, cell};
use crate::cancel::TaskMonitor;
use crate::config::LayoutConfig;
use crate::error::Result;

pub trait GridSpace {
    fn col_center(&self, grid_x: i32) -> f64;
    fn row_center(&self, grid_y: i32) -> f64;
}

// ─── CellGrid ────────────────────────────────────────────────────────────────

/// Grid sized from block dimensions.
///
/// Odd (cell) columns are as wide as their widest block and odd rows as tall
/// as their tallest block; even (corridor) tracks use the configured corridor
/// sizes. Tracks are laid out cumulatively from the margin.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    col_starts: Vec<f64>,
    col_widths: Vec<f64>,
    row_starts: Vec<f64>,
    row_heights: Vec<f64>,
    corridor_width: f64,
    corridor_height: f64,
}

impl CellGrid {
    pub fn build<V, E, F>(layout: &GridLayout<V, E>, size_of: F, config: &LayoutConfig) -> Self
    where
        V: Copy + Eq + Hash,
        E: Copy + Eq + Hash,
        F: Fn(V) -> (f64, f64),
    {
        let mut cols = 0i32;
        let mut rows = 0i32;
        for n in &layout.nodes {
            cols = cols.max(cell(n.col) + 2);
            rows = rows.max(cell(n.row) + 2);
        }
        for p in layout.routes.iter().flat_map(|r| &r.junctions) {
            cols = cols.max(p.x + 2);
            rows = rows.max(p.y + 2);
        }

        let mut col_widths = corridor_track(cols, config.corridor_width);
        let mut row_heights = corridor_track(rows, config.corridor_height);
        for n in &layout.nodes {
            let (w, h) = size_of(n.vertex);
            let c = cell(n.col) as usize;
            let r = cell(n.row) as usize;
            col_widths[c] = col_widths[c].max(w);
            row_heights[r] = row_heights[r].max(h);
        }

        Self {
            col_starts: starts(&col_widths, config.margin),
            col_widths,
            row_starts: starts(&row_heights, config.margin),
            row_heights,
            corridor_width: config.corridor_width,
            corridor_height: config.corridor_height,
        }
    }

    /// Total drawing width, margins included.
    pub fn width(&self, margin: f64) -> f64 {
        self.col_starts.last().copied().unwrap_or(margin)
            + self.col_widths.last().copied().unwrap_or(0.0)
            + margin
    }

    pub fn height(&self, margin: f64) -> f64 {
        self.row_starts.last().copied().unwrap_or(margin)
            + self.row_heights.last().copied().unwrap_or(0.0)
            + margin
    }
}

fn corridor_track(len: i32, corridor: f64) -> Vec<f64> {
    // Odd tracks start empty and grow to fit their blocks.
    (0..len.max(0))
        .map(|i| if i % 2 == 0 { corridor } else { 0.0 })
        .collect()
}

fn starts(sizes: &[f64], margin: f64) -> Vec<f64> {
    let mut acc = margin;
    sizes
        .iter()
        .map(|s| {
            let start = acc;
            acc += s;
            start
        })
        .collect()
}

fn center_of(starts: &[f64], sizes: &[f64], i: i32, corridor: f64) -> f64 {
    match usize::try_from(i) {
        Ok(i) if i < starts.len() => starts[i] + sizes[i] / 2.0,
        // Past the last track: continue with corridor-sized tracks.
        _ => {
            let end = starts.last().copied().unwrap_or(0.0) + sizes.last().copied().unwrap_or(0.0);
            let extra = i64::from(i) - starts.len() as i64;
            end + extra as f64 * corridor + corridor / 2.0
        }
    }
}

impl GridSpace for CellGrid {
    fn col_center(&self, grid_x: i32) -> f64 {
        center_of(&self.col_starts, &self.col_widths, grid_x, self.corridor_width)
    }

    fn row_center(&self, grid_y: i32) -> f64 {
        center_of(&self.row_starts, &self.row_heights, grid_y, self.corridor_height)
    }
}

// ─── Translation ─────────────────────────────────────────────────────────────

pub fn translate<V, E, S, M>(
    layout: &GridLayout<V, E>,
    space: &S,
    monitor: &M,
) -> Result<SpaceLayout<V, E>>
where
    V: Copy + Eq + Hash,
    E: Copy + Eq + Hash + std::fmt::Debug,
    S: GridSpace + ?Sized,
    M: TaskMonitor + ?Sized,
{
    let vertices: Vec<SpaceVertex<V>> = layout
        .nodes
        .iter()
        .map(|n| {
            let c = n.cell();
            SpaceVertex {
                vertex: n.vertex,
                center: Point2::new(space.col_center(c.x), space.row_center(c.y)),
            }
        })
        .collect();

    // Routes are stored in the global edge order.
    let mut edges = Vec::with_capacity(layout.routes.len());
    for route in &layout.routes {
        monitor.check_cancelled()?;

        let mut points: Vec<Point2> = route
            .junctions
            .iter()
            .map(|j| {
                let dx = lane_offset(layout, Axis::Vertical, j.x, route.edge);
                let dy = lane_offset(layout, Axis::Horizontal, j.y, route.edge);
                Point2::new(space.col_center(j.x) + dx, space.row_center(j.y) + dy)
            })
            .collect();

        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            points.insert(0, Point2::new(first.x, space.row_center(route.src_cell.y)));
            points.push(Point2::new(last.x, space.row_center(route.dst_cell.y)));
        }

        edges.push(SpaceEdge {
            edge: route.edge,
            points,
            emphasis: route.emphasis,
        });
    }

    debug!(
        vertices = vertices.len(),
        edges = edges.len(),
        "layout translated"
    );
    Ok(SpaceLayout { vertices, edges })
}

fn lane_offset<V, E>(layout: &GridLayout<V, E>, axis: Axis, line: i32, edge: E) -> f64
where
    V: Copy + Eq + Hash,
    E: Copy + Eq + Hash + std::fmt::Debug,
{
    match layout.lanes.offset(axis, line, edge) {
        Some(offset) => offset,
        None => panic!("edge {edge:?} has a junction on line {line} but no lane there"),
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_translate.rs"]
mod tests;
