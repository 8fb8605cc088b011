//! Parent-row resolution and the edge collector (spec §4.1 dangling-parent
//! handling, §4.2 edge coloring, §7 out-of-order-parent normalization).

use std::collections::HashMap;

use crate::model::{CommitId, CommitRecord};

/// An internal child→parent edge (spec §3 "Edge").
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub child_row: usize,
    pub parent_row: usize,
    /// 0 for the first parent, ≥1 for a merge source.
    pub parent_index: usize,
    pub up_layout_index: u32,
    pub down_layout_index: u32,
    pub color_index: u32,
}

/// A parent reference whose target id is not present in the input (spec
/// §4.1 failure semantics: "dangling parents... become edges whose parent
/// is off the bottom"). These never enter Phase 1 (no row to walk to) or
/// Phase 2 (no second endpoint to bound an active span), so they carry
/// only what Phase 3 needs to draw a one-row stub running off the bottom
/// of the loaded window.
#[derive(Debug, Clone, Copy)]
pub struct DanglingEdge {
    pub child_row: usize,
    pub parent_index: usize,
    pub color_index: u32,
}

/// Find every parent reference that does not resolve to a row in the input.
pub fn collect_dangling(
    commits: &[CommitRecord],
    id_to_row: &HashMap<CommitId, usize>,
    color_index: &[u32],
) -> Vec<DanglingEdge> {
    let mut dangling = Vec::new();
    for (row, commit) in commits.iter().enumerate() {
        let mut seen = std::collections::HashSet::new();
        for (parent_index, id) in commit.parents.iter().enumerate() {
            if !seen.insert(id) {
                continue;
            }
            if !id_to_row.contains_key(id) {
                dangling.push(DanglingEdge {
                    child_row: row,
                    parent_index,
                    color_index: color_index[row],
                });
            }
        }
    }
    dangling
}

/// Resolve each commit's declared parents to row indices, in declared order,
/// with duplicates collapsed (first occurrence wins, per the Open Question
/// in spec §9) and dangling parents (not present in `id_to_row`) dropped.
///
/// This feeds Phase 1, which needs every traversable parent regardless of
/// whether it appears before or after its child in row order; the stricter
/// `child_row < parent_row` invariant is enforced later, only for edges
/// that will actually be drawn (see `collect`).
pub fn resolve_parent_rows(
    commits: &[CommitRecord],
    id_to_row: &HashMap<CommitId, usize>,
) -> Vec<Vec<usize>> {
    commits
        .iter()
        .map(|commit| {
            let mut seen = std::collections::HashSet::new();
            commit
                .parents
                .iter()
                .filter(|id| seen.insert(*id))
                .filter_map(|id| id_to_row.get(id).copied())
                .collect()
        })
        .collect()
}

/// Build the drawable edge list.
///
/// Out-of-order parents (`parent_row <= child_row`, i.e. the parent was
/// listed before its child in the newest-first input) are silently dropped
/// here, per spec §7 — they never reached the DFS as a problem, but they
/// cannot be drawn as a downward edge.
///
/// Edge color (spec §4.2): a first-parent edge (`parent_index == 0`)
/// inherits the child's color; a merge edge (`parent_index >= 1`) inherits
/// the parent's color.
pub fn collect(
    parent_rows: &[Vec<usize>],
    layout_index: &[u32],
    color_index: &[u32],
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (child_row, parents) in parent_rows.iter().enumerate() {
        for (parent_index, &parent_row) in parents.iter().enumerate() {
            if parent_row <= child_row {
                tracing::warn!(
                    child_row,
                    parent_row,
                    "dropping out-of-order parent edge (parent does not follow child in row order)"
                );
                continue;
            }
            let color = if parent_index == 0 {
                color_index[child_row]
            } else {
                color_index[parent_row]
            };
            edges.push(Edge {
                child_row,
                parent_row,
                parent_index,
                up_layout_index: layout_index[child_row],
                down_layout_index: layout_index[parent_row],
                color_index: color,
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommitRecord;

    fn id_map(ids: &[&str]) -> HashMap<CommitId, usize> {
        ids.iter()
            .enumerate()
            .map(|(row, id)| (CommitId::parse(id), row))
            .collect()
    }

    #[test]
    fn drops_dangling_parent() {
        let commits = vec![CommitRecord::new("aa", vec![CommitId::parse("ffffffffff")])];
        let map = id_map(&["aa"]);
        let resolved = resolve_parent_rows(&commits, &map);
        assert!(resolved[0].is_empty());
    }

    #[test]
    fn dangling_parent_is_reported_for_phase_three() {
        let commits = vec![CommitRecord::new("aa", vec![CommitId::parse("ffffffffff")])];
        let map = id_map(&["aa"]);
        let dangling = collect_dangling(&commits, &map, &[0]);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].child_row, 0);
    }

    #[test]
    fn collapses_duplicate_parents() {
        let commits = vec![CommitRecord::new(
            "aa",
            vec![CommitId::parse("bb"), CommitId::parse("bb")],
        )];
        let map = id_map(&["aa", "bb"]);
        let resolved = resolve_parent_rows(&commits, &map);
        assert_eq!(resolved[0], vec![1]);
    }

    #[test]
    fn drops_out_of_order_parent_edge() {
        // Row 1 lists row 0 as a parent, which is "above" it (newer) —
        // nonsensical, so no edge should be produced for it.
        let parent_rows = vec![vec![], vec![0]];
        let li = vec![1, 2];
        let color = vec![0, 1];
        let edges = collect(&parent_rows, &li, &color);
        assert!(edges.is_empty());
    }

    #[test]
    fn merge_edge_inherits_parent_color() {
        let parent_rows = vec![vec![1, 2], vec![], vec![]];
        let li = vec![1, 1, 2];
        let color = vec![0, 0, 5];
        let edges = collect(&parent_rows, &li, &color);
        let merge_edge = edges.iter().find(|e| e.parent_index == 1).unwrap();
        assert_eq!(merge_edge.color_index, 5);
        let first_edge = edges.iter().find(|e| e.parent_index == 0).unwrap();
        assert_eq!(first_edge.color_index, 0);
    }
}
