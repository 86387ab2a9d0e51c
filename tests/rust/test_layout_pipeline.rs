use super::*;
use crate::cancel::{CancelAfter, NeverCancel};
use crate::graph::{BlockAddr, EdgeKind, FlowGraph};

fn cfg(edges: &[(u64, u64)]) -> FlowGraph {
    let mut g = FlowGraph::new();
    for &(a, b) in edges {
        g.add_edge(BlockAddr(a), BlockAddr(b), EdgeKind::Jump);
    }
    g
}

fn gp(list: &[(i32, i32)]) -> Vec<GridPoint> {
    list.iter().map(|&(x, y)| GridPoint::new(x, y)).collect()
}

fn endpoints(g: &FlowGraph, layout: &GridLayout<BlockAddr, petgraph::graph::EdgeIndex>) -> Vec<(u64, u64)> {
    layout
        .routes
        .iter()
        .map(|r| {
            let (a, b) = g.endpoints(r.edge);
            (a.0, b.0)
        })
        .collect()
}

#[test]
fn test_diamond() {
    let g = cfg(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let layout = WideLayout::default().compute(&g, &NeverCancel).unwrap();

    let placed: Vec<(u64, usize, usize)> = layout
        .nodes
        .iter()
        .map(|n| (n.vertex.0, n.row, n.col))
        .collect();
    assert_eq!(placed, vec![(1, 0, 0), (2, 1, 0), (3, 1, 1), (4, 2, 0)]);
    assert_eq!(layout.max_col, 1);

    assert_eq!(endpoints(&g, &layout), vec![(1, 2), (1, 3), (2, 4), (3, 4)]);
    let junctions: Vec<Vec<GridPoint>> =
        layout.routes.iter().map(|r| r.junctions.clone()).collect();
    assert_eq!(
        junctions,
        vec![
            gp(&[(1, 2), (1, 2)]),
            gp(&[(1, 2), (3, 2)]),
            gp(&[(1, 4), (1, 4)]),
            gp(&[(3, 4), (1, 4)]),
        ]
    );
    assert!(layout.routes.iter().all(|r| r.emphasis.is_none()));
}

#[test]
fn test_diamond_lanes() {
    let g = cfg(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let layout = WideLayout::default().compute(&g, &NeverCancel).unwrap();
    let e = |i: usize| layout.routes[i].edge;
    let lanes = &layout.lanes;

    assert_eq!(lanes.lane(Axis::Vertical, 1, e(0)), Some(1));
    assert_eq!(lanes.lane(Axis::Vertical, 1, e(1)), Some(2));
    assert_eq!(lanes.lane(Axis::Vertical, 1, e(2)), Some(1));
    assert_eq!(lanes.lane(Axis::Vertical, 1, e(3)), Some(2));
    assert_eq!(lanes.lane(Axis::Vertical, 3, e(1)), Some(1));
    assert_eq!(lanes.lane(Axis::Horizontal, 2, e(0)), Some(1));
    assert_eq!(lanes.lane(Axis::Horizontal, 2, e(1)), Some(2));
    assert_eq!(lanes.lane(Axis::Horizontal, 4, e(3)), Some(2));
}

#[test]
fn test_two_block_loop() {
    let g = cfg(&[(1, 2), (2, 1)]);
    let layout = WideLayout::default().compute(&g, &NeverCancel).unwrap();
    assert_eq!(layout.node(BlockAddr(1)).map(|n| n.row), Some(0));
    assert_eq!(layout.node(BlockAddr(2)).map(|n| n.row), Some(1));

    assert_eq!(endpoints(&g, &layout), vec![(2, 1), (1, 2)]);
    let back = &layout.routes[0];
    assert_eq!(back.vertical, Direction::Up);
    assert_eq!(back.junctions, gp(&[(1, 4), (0, 4), (0, 0), (1, 0)]));
    assert_eq!(back.emphasis, Some(0.2));
    assert_eq!(layout.routes[1].emphasis, None);
}

#[test]
fn test_configured_back_edge_emphasis() {
    let g = cfg(&[(1, 2), (2, 1)]);
    let config = LayoutConfig {
        back_edge_emphasis: 0.5,
        ..LayoutConfig::default()
    };
    let layout = WideLayout::new(config).compute(&g, &NeverCancel).unwrap();
    assert_eq!(layout.routes[0].emphasis, Some(0.5));
}

#[test]
fn test_empty_graph() {
    let g = FlowGraph::new();
    let layout = WideLayout::default().compute(&g, &NeverCancel).unwrap();
    assert!(layout.is_empty());
    assert!(layout.routes.is_empty());
    assert_eq!(layout.max_col, -1);
}

#[test]
fn test_unreachable_rejected_by_default() {
    let g = cfg(&[(1, 2), (3, 4)]);
    match WideLayout::default().compute(&g, &NeverCancel) {
        Err(LayoutError::Unreachable { count, vertices }) => {
            assert_eq!(count, 2);
            assert_eq!(vertices, vec!["0x3".to_string(), "0x4".to_string()]);
        }
        other => panic!("expected Unreachable, got {other:?}"),
    }
}

#[test]
fn test_unreachable_excluded() {
    let g = cfg(&[(1, 2), (3, 4)]);
    let config = LayoutConfig {
        unreachable: UnreachablePolicy::Exclude,
        ..LayoutConfig::default()
    };
    let layout = WideLayout::new(config).compute(&g, &NeverCancel).unwrap();
    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(layout.unreachable, vec![BlockAddr(3), BlockAddr(4)]);
    assert_eq!(endpoints(&g, &layout), vec![(1, 2)]);
}

#[test]
fn test_cancel_during_routing() {
    let g = cfg(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let err = WideLayout::default()
        .compute(&g, &CancelAfter::new(3))
        .unwrap_err();
    assert!(matches!(err, LayoutError::Cancelled));
}

#[test]
fn test_translate_delegates() {
    let g = cfg(&[(1, 2)]);
    let engine = WideLayout::default();
    let layout = engine.compute(&g, &NeverCancel).unwrap();
    let cells = CellGrid::build(&layout, |_| (160.0, 60.0), engine.config());
    let space = engine.translate(&layout, &cells, &NeverCancel).unwrap();
    assert_eq!(space.vertices.len(), 2);
    assert_eq!(space.edges.len(), 1);
    assert_eq!(space.edges[0].points.len(), 4);
}
