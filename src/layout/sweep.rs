//! Phase 2: per-row active-edge positioning (spec §4.3).
//!
//! This is the dominant phase by line share (spec §2 budget: ~40%): the
//! comparator and the active-edge bookkeeping that keeps columns gap-free
//! and first-parent chains pinned to their lane.

use std::collections::HashMap;

use super::edges::Edge;
use super::visibility::VisibilityThresholds;

/// A node's or edge's projection onto the four fields the comparator reads.
/// For a node, `up_li == down_li` and `up_row == down_row` (spec §4.3: "For
/// a node both `up_*` and `down_*` equal the row's data").
#[derive(Clone, Copy)]
struct Proj {
    up_li: u32,
    down_li: u32,
    up_row: usize,
    down_row: usize,
}

impl Proj {
    fn virtual_node(li: u32, row: usize) -> Proj {
        Proj {
            up_li: li,
            down_li: li,
            up_row: row,
            down_row: row,
        }
    }
}

#[derive(Clone, Copy)]
enum Element {
    Node,
    Edge(usize),
}

/// `compare_edge_node` from spec §4.3: positive places the edge right of
/// the node.
fn compare_edge_node(edge: Proj, node: Proj) -> i64 {
    let max_edge_li = edge.up_li.max(edge.down_li) as i64;
    let node_up_li = node.up_li as i64;
    if max_edge_li != node_up_li {
        max_edge_li - node_up_li
    } else {
        edge.up_row as i64 - node.up_row as i64
    }
}

/// General comparator, reduced to edge-vs-node per spec §4.3.
fn compare(lhs: (Element, Proj), rhs: (Element, Proj)) -> i64 {
    match (lhs.0, rhs.0) {
        (Element::Node, Element::Node) => 0, // never occurs: one node per row
        (Element::Edge(_), Element::Node) => compare_edge_node(lhs.1, rhs.1),
        (Element::Node, Element::Edge(_)) => -compare_edge_node(rhs.1, lhs.1),
        (Element::Edge(_), Element::Edge(_)) => {
            let (l, r) = (lhs.1, rhs.1);
            if l.up_row == r.up_row {
                if l.down_row < r.down_row {
                    let vn = Proj::virtual_node(l.down_li, l.down_row);
                    -compare_edge_node(r, vn)
                } else {
                    let vn = Proj::virtual_node(r.down_li, r.down_row);
                    compare_edge_node(l, vn)
                }
            } else if l.up_row < r.up_row {
                let vn = Proj::virtual_node(r.up_li, r.up_row);
                compare_edge_node(l, vn)
            } else {
                let vn = Proj::virtual_node(l.up_li, l.up_row);
                -compare_edge_node(r, vn)
            }
        }
    }
}

/// The result of the per-row column sweep.
pub struct ColumnLayout {
    /// `node_column[row]` is the commit dot's column at that row.
    pub node_column: Vec<usize>,
    /// Column of an edge at a specific intermediate row, present only for
    /// rows where the edge is active *and* visible (spec §4.4).
    pub edge_column_at: HashMap<(usize, usize), usize>,
}

/// Run the sweep over every row.
///
/// `edges` must already be filtered to `child_row < parent_row` (see
/// `layout::edges::collect`). Edges with no intermediate row at all (span
/// 1, i.e. `child_row + 1 == parent_row`) never enter `active` and so never
/// occupy a column — they are drawn node-to-node directly in Phase 3.
pub fn compute(
    row_count: usize,
    edges: &[Edge],
    layout_index: &[u32],
    thresholds: VisibilityThresholds,
) -> ColumnLayout {
    let mut edges_starting_at: Vec<Vec<usize>> = vec![Vec::new(); row_count];
    let mut edges_ending_at: Vec<Vec<usize>> = vec![Vec::new(); row_count];
    for (idx, e) in edges.iter().enumerate() {
        let first_intermediate = e.child_row + 1;
        let last_intermediate = e.parent_row.wrapping_sub(1);
        if first_intermediate < e.parent_row {
            edges_starting_at[first_intermediate].push(idx);
            edges_ending_at[last_intermediate].push(idx);
        }
    }

    // Insertion-ordered active set: a plain Vec preserves the tie-break
    // order spec §4.3 requires ("stable sort... or break ties by edge
    // insertion sequence") without needing a separate sequence counter.
    let mut active: Vec<usize> = Vec::new();

    let mut node_column = vec![0usize; row_count];
    let mut edge_column_at = HashMap::new();

    for row in 0..row_count {
        active.extend(edges_starting_at[row].iter().copied());

        let mut elements: Vec<(Element, Proj)> = Vec::with_capacity(active.len() + 1);
        elements.push((Element::Node, Proj::virtual_node(layout_index[row], row)));
        for &edge_idx in &active {
            let e = &edges[edge_idx];
            let span = (e.parent_row - e.child_row) as u64;
            let up_offset = (row - e.child_row) as u64;
            let down_offset = (e.parent_row - row) as u64;
            if thresholds.is_visible(span, up_offset, down_offset) {
                elements.push((
                    Element::Edge(edge_idx),
                    Proj {
                        up_li: e.up_layout_index,
                        down_li: e.down_layout_index,
                        up_row: e.child_row,
                        down_row: e.parent_row,
                    },
                ));
            }
        }

        elements.sort_by(|a, b| compare(*a, *b).cmp(&0));

        for (column, (element, _)) in elements.iter().enumerate() {
            match *element {
                Element::Node => node_column[row] = column,
                Element::Edge(idx) => {
                    edge_column_at.insert((idx, row), column);
                }
            }
        }

        active.retain(|idx| !edges_ending_at[row].contains(idx));
    }

    ColumnLayout {
        node_column,
        edge_column_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(child_row: usize, parent_row: usize, up_li: u32, down_li: u32, color: u32) -> Edge {
        Edge {
            child_row,
            parent_row,
            parent_index: 0,
            up_layout_index: up_li,
            down_layout_index: down_li,
            color_index: color,
        }
    }

    #[test]
    fn linear_chain_all_column_zero() {
        // No intermediate rows at all for spans of 1.
        let edges = vec![edge(0, 1, 1, 1, 0), edge(1, 2, 1, 1, 0)];
        let li = vec![1, 1, 1];
        let layout = compute(3, &edges, &li, VisibilityThresholds::EXPANDED);
        assert_eq!(layout.node_column, vec![0, 0, 0]);
        assert!(layout.edge_column_at.is_empty());
    }

    #[test]
    fn side_branch_edge_occupies_column_one() {
        // Edge from row 0 (li=2, side branch) to row 2 (li=1, main chain),
        // active (and visible, since span=2 < arrow_edge) at row 1 only.
        // Row 1's own node is li=1 (main chain), so the edge (max li = 2)
        // must sort to the right of it.
        let edges = vec![edge(0, 2, 2, 1, 1)];
        let li = vec![2, 1, 1];
        let layout = compute(3, &edges, &li, VisibilityThresholds::EXPANDED);
        assert_eq!(layout.edge_column_at.get(&(0, 1)), Some(&1));
        assert_eq!(layout.node_column[1], 0);
    }

    #[test]
    fn columns_have_no_gaps() {
        // Two side-branch edges both active at row 2, plus the row's node.
        let edges = vec![edge(0, 4, 2, 1, 1), edge(1, 3, 3, 1, 2)];
        let li = vec![2, 3, 1, 1, 1];
        let layout = compute(5, &edges, &li, VisibilityThresholds::EXPANDED);
        let mut columns_at_row2: Vec<usize> = vec![layout.node_column[2]];
        columns_at_row2.extend(
            [0usize, 1]
                .iter()
                .filter_map(|&idx| layout.edge_column_at.get(&(idx, 2)).copied()),
        );
        columns_at_row2.sort();
        assert_eq!(columns_at_row2, vec![0, 1, 2]);
    }

    #[test]
    fn long_edge_disappears_from_middle_rows() {
        let edges = vec![edge(0, 49, 2, 1, 1)];
        let mut li = vec![1u32; 50];
        li[0] = 2;
        let layout = compute(50, &edges, &li, VisibilityThresholds::COLLAPSED);
        // span 49 >= long_edge(30): only visible near either endpoint
        // within visible_part=1.
        assert!(layout.edge_column_at.get(&(0, 25)).is_none());
        assert!(layout.edge_column_at.get(&(0, 1)).is_some());
        assert!(layout.edge_column_at.get(&(0, 48)).is_some());
    }
}
