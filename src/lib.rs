//! wide-layout: wide, grid-based layout for control-flow graphs.
//!
//! The root block sits on the first row and every other block is pushed down
//! to the end of its longest simple path from the root. Rows are ordered by
//! subtree score and centered, edges are routed orthogonally through the
//! corridors between cells, and edges sharing a corridor line get distinct
//! lanes.
//!
//! Modules:
//!   error         : LayoutError, Result
//!   config        : LayoutConfig, UnreachablePolicy, OutputFormat
//!   cancel        : TaskMonitor, NeverCancel, CancelFlag
//!   graph         : HostGraph trait, FlowGraph (petgraph)
//!   parser        : text and JSON graph input
//!   layout        : rows, columns, router, lanes, translate
//!   report        : JSON layout report
//!   svg_renderer  : SVG output
//!
//! [`layout_text`] wires parse → grid layout → drawing space → output.

pub mod cancel;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod parser;
pub mod report;
pub mod svg_renderer;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cancel::{CancelFlag, NeverCancel, TaskMonitor};
pub use config::{LayoutConfig, OutputFormat, UnreachablePolicy};
pub use error::{LayoutError, Result};
pub use graph::{BlockAddr, EdgeKind, FlowGraph, HostGraph};
pub use layout::{CellGrid, GridLayout, GridSpace, SpaceLayout, WideLayout};
pub use report::LayoutReport;

use tracing::debug;

/// Lay out a parsed graph and collect the result into a report.
///
/// Stores the back-edge emphasis hints on `graph` as a side effect.
pub fn layout_graph<M: TaskMonitor + ?Sized>(
    graph: &mut FlowGraph,
    config: &LayoutConfig,
    monitor: &M,
) -> Result<LayoutReport> {
    config.validate()?;
    let engine = WideLayout::new(config.clone());
    let grid = engine.compute(&*graph, monitor)?;
    graph.apply_emphasis(&grid);
    let graph: &FlowGraph = graph;

    let size_of = |addr: BlockAddr| graph.block_size(addr, config);
    let cells = CellGrid::build(&grid, &size_of, config);
    let space = engine.translate(&grid, &cells, monitor)?;
    let extent = (cells.width(config.margin), cells.height(config.margin));
    Ok(LayoutReport::build(graph, &grid, &space, size_of, extent))
}

/// Parse a graph document (text or JSON), lay it out and render it.
pub fn layout_text(src: &str, config: &LayoutConfig, format: OutputFormat) -> Result<String> {
    let mut graph = parser::parse(src)?;
    debug!(
        blocks = graph.block_count(),
        edges = graph.edge_count(),
        "graph parsed"
    );
    let report = layout_graph(&mut graph, config, &NeverCancel)?;
    match format {
        OutputFormat::Json => report.to_json(),
        OutputFormat::Svg => Ok(svg_renderer::render(&report)),
    }
}
