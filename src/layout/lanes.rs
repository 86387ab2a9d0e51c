//! Lane padding for edges sharing a grid line.
//!
//! Each vertical line (fixed x) and horizontal line (fixed y) is handled on
//! its own. Edges touching a line are taken in the global edge order; an
//! edge's span on the line is the interval covered by its own junctions
//! there. The edge gets one lane above the highest lane already taken inside
//! its span, and then takes that lane over the whole span. Greedy: lanes can
//! be higher than strictly needed, but overlapping spans never share a lane.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use tracing::debug;

use super::types::{EdgeRoute, GridPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A vertical line, keyed by x; its offset shifts x.
    Vertical,
    /// A horizontal line, keyed by y; its offset shifts y.
    Horizontal,
}

impl Axis {
    fn line_of(self, p: GridPoint) -> i32 {
        match self {
            Self::Vertical => p.x,
            Self::Horizontal => p.y,
        }
    }

    fn along(self, p: GridPoint) -> i32 {
        match self {
            Self::Vertical => p.y,
            Self::Horizontal => p.x,
        }
    }
}

/// `(grid line, edge) → lane` for both axes, plus the pixel conversion.
#[derive(Debug, Clone)]
pub struct LanePadding<E> {
    vertical: HashMap<(i32, E), u32>,
    horizontal: HashMap<(i32, E), u32>,
    padding: f64,
    step: f64,
}

impl<E> Default for LanePadding<E> {
    fn default() -> Self {
        Self {
            vertical: HashMap::new(),
            horizontal: HashMap::new(),
            padding: 25.0,
            step: 5.0,
        }
    }
}

impl<E: Copy + Eq + Hash> LanePadding<E> {
    /// Compute lanes for routes given in the global edge order.
    pub fn compute(routes: &[EdgeRoute<E>], padding: f64, step: f64) -> Self {
        let vertical = assign_axis(routes, Axis::Vertical);
        let horizontal = assign_axis(routes, Axis::Horizontal);
        debug!(
            vertical_slots = vertical.len(),
            horizontal_slots = horizontal.len(),
            "lanes assigned"
        );
        Self {
            vertical,
            horizontal,
            padding,
            step,
        }
    }

    pub fn lane(&self, axis: Axis, line: i32, edge: E) -> Option<u32> {
        let map = match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        };
        map.get(&(line, edge)).copied()
    }

    /// Pixel offset `-padding + lane * step`.
    pub fn offset(&self, axis: Axis, line: i32, edge: E) -> Option<f64> {
        self.lane(axis, line, edge)
            .map(|lane| -self.padding + f64::from(lane) * self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

fn assign_axis<E: Copy + Eq + Hash>(routes: &[EdgeRoute<E>], axis: Axis) -> HashMap<(i32, E), u32> {
    // line → route indices, already in global order.
    let mut per_line: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, route) in routes.iter().enumerate() {
        for p in &route.junctions {
            let members = per_line.entry(axis.line_of(*p)).or_default();
            if members.last() != Some(&i) {
                members.push(i);
            }
        }
    }

    let mut lanes = HashMap::new();
    for (line, members) in per_line {
        let mut taken: HashMap<i32, u32> = HashMap::new();
        for i in members {
            let route = &routes[i];
            let Some((lo, hi)) = span_on_line(&route.junctions, axis, line) else {
                continue;
            };
            let lane = 1 + (lo..=hi)
                .map(|u| taken.get(&u).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            for u in lo..=hi {
                taken.insert(u, lane);
            }
            lanes.insert((line, route.edge), lane);
        }
    }
    lanes
}

fn span_on_line(junctions: &[GridPoint], axis: Axis, line: i32) -> Option<(i32, i32)> {
    junctions
        .iter()
        .filter(|p| axis.line_of(**p) == line)
        .map(|p| axis.along(*p))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_lanes.rs"]
mod tests;
