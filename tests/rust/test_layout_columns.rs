use super::*;
use crate::graph::{BlockAddr, EdgeKind, FlowGraph};
use crate::layout::rows::assign_rows;

fn cfg(edges: &[(u64, u64)]) -> FlowGraph {
    let mut g = FlowGraph::new();
    for &(a, b) in edges {
        g.add_edge(BlockAddr(a), BlockAddr(b), EdgeKind::Jump);
    }
    g
}

/// Rows and columns from vertex 1; returns (assignment, max_col).
fn place(g: &FlowGraph) -> (RowAssignment<BlockAddr>, i32) {
    let root = BlockAddr(1);
    let mut a = assign_rows(g, root);
    let scores = score_vertices(g, root);
    let max_col = assign_columns(&mut a, &scores);
    (a, max_col)
}

fn pos(a: &RowAssignment<BlockAddr>, v: u64) -> (usize, usize) {
    let n = &a.nodes[a.node_of[&BlockAddr(v)]];
    (n.row, n.col)
}

#[test]
fn test_scores_diamond() {
    let g = cfg(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let s = score_vertices(&g, BlockAddr(1));
    assert_eq!(s[&BlockAddr(1)], 1);
    assert_eq!(s[&BlockAddr(2)], 2);
    assert_eq!(s[&BlockAddr(3)], 2);
    assert_eq!(s[&BlockAddr(4)], 3);
}

#[test]
fn test_scores_cycle_penalty() {
    // 3 loops back to the root, which is still on the path.
    let g = cfg(&[(1, 2), (1, 3), (3, 1)]);
    let s = score_vertices(&g, BlockAddr(1));
    assert_eq!(s[&BlockAddr(2)], 2);
    assert_eq!(s[&BlockAddr(3)], 1 + CYCLE_PENALTY + 1);
    assert_eq!(s[&BlockAddr(1)], CYCLE_PENALTY + 1);
}

#[test]
fn test_penalty_propagates_to_later_siblings() {
    let g = cfg(&[(1, 2), (2, 1), (1, 3)]);
    let s = score_vertices(&g, BlockAddr(1));
    assert_eq!(s[&BlockAddr(2)], 1 + CYCLE_PENALTY + 1);
    // 3 starts from the root's accumulated (penalised) subtotal.
    assert_eq!(s[&BlockAddr(3)], CYCLE_PENALTY + 1 + 1);
}

#[test]
fn test_diamond_columns() {
    let (a, max_col) = place(&cfg(&[(1, 2), (1, 3), (2, 4), (3, 4)]));
    assert_eq!(pos(&a, 1), (0, 0));
    assert_eq!(pos(&a, 2), (1, 0));
    assert_eq!(pos(&a, 3), (1, 1));
    assert_eq!(pos(&a, 4), (2, 0));
    assert_eq!(max_col, 1);
}

#[test]
fn test_loop_child_sorts_left() {
    let (a, _) = place(&cfg(&[(1, 2), (1, 3), (3, 1)]));
    assert_eq!(pos(&a, 3), (1, 0));
    assert_eq!(pos(&a, 2), (1, 1));
}

#[test]
fn test_centering() {
    let (a, max_col) = place(&cfg(&[(1, 2), (1, 3), (1, 4), (2, 5)]));
    assert_eq!(pos(&a, 1), (0, 1));
    assert_eq!(pos(&a, 2), (1, 0));
    assert_eq!(pos(&a, 3), (1, 1));
    assert_eq!(pos(&a, 4), (1, 2));
    assert_eq!(pos(&a, 5), (2, 1));
    assert_eq!(max_col, 2);
}

#[test]
fn test_columns_unique_per_row() {
    let (a, max_col) = place(&cfg(&[
        (1, 2),
        (1, 3),
        (1, 4),
        (2, 5),
        (3, 5),
        (4, 6),
        (5, 7),
        (6, 7),
        (7, 1),
    ]));
    for (_, members) in a.rows.iter() {
        let mut cols: Vec<usize> = members.iter().map(|&id| a.nodes[id].col).collect();
        let n = cols.len();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(cols.len(), n);
    }
    let widest = a.nodes.iter().map(|n| n.col).max().unwrap();
    assert_eq!(max_col, widest as i32);
}

#[test]
fn test_empty_assignment() {
    let mut a = RowAssignment::<BlockAddr> {
        nodes: vec![],
        node_of: HashMap::new(),
        rows: crate::layout::RowTable::new(),
    };
    assert_eq!(assign_columns(&mut a, &HashMap::new()), -1);
}

#[test]
#[should_panic(expected = "never scored")]
fn test_unscored_vertex_panics() {
    let g = cfg(&[(1, 2), (1, 3)]);
    let mut a = assign_rows(&g, BlockAddr(1));
    assign_columns(&mut a, &HashMap::new());
}
