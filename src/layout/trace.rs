//! In-memory layout trace, gated behind the `debug_trace` feature.
//!
//! The reference implementation this pass is modeled on wrote per-row
//! debugging state to a file on disk for manual inspection; here the same
//! information is collected into a plain struct instead, so a caller (or a
//! test) can assert on it directly without touching the filesystem.

use std::collections::HashMap;

use super::sweep::ColumnLayout;

#[derive(Debug, Clone)]
pub struct DebugTrace {
    pub row_count: usize,
    pub parent_rows: Vec<Vec<usize>>,
    pub layout_index: Vec<u32>,
    pub color_index: Vec<u32>,
    pub node_column: Vec<usize>,
    pub active_edge_columns: HashMap<(usize, usize), usize>,
}

impl DebugTrace {
    pub fn build(
        row_count: usize,
        parent_rows: &[Vec<usize>],
        layout_index: &[u32],
        color_index: &[u32],
        columns: &ColumnLayout,
    ) -> Self {
        DebugTrace {
            row_count,
            parent_rows: parent_rows.to_vec(),
            layout_index: layout_index.to_vec(),
            color_index: color_index.to_vec(),
            node_column: columns.node_column.clone(),
            active_edge_columns: columns.edge_column_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_copies_every_field() {
        let columns = ColumnLayout {
            node_column: vec![0, 1],
            edge_column_at: HashMap::new(),
        };
        let trace = DebugTrace::build(2, &[vec![], vec![0]], &[1, 1], &[0, 0], &columns);
        assert_eq!(trace.row_count, 2);
        assert_eq!(trace.node_column, vec![0, 1]);
    }
}
