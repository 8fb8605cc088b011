//! Phase 3: segment and arrow generation (spec §4.5).

use crate::model::LayoutConfig;

use super::edges::{DanglingEdge, Edge};
use super::sweep::ColumnLayout;
use super::visibility::VisibilityThresholds;

/// A line segment local to one row's vertical strip (spec §3, §6).
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub x_top: f64,
    pub y_top: f64,
    pub x_bottom: f64,
    pub y_bottom: f64,
    pub color_index: u32,
}

/// An arrow indicator where a long edge is visually truncated (spec §4.5, §6).
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub x: f64,
    pub y: f64,
    pub color_index: u32,
    pub is_down: bool,
}

/// Per-row segments and arrows, indexed by row.
pub struct RowDrawing {
    pub segments: Vec<Vec<Segment>>,
    pub arrows: Vec<Vec<Arrow>>,
}

/// Walk every edge's anchor list and emit segments plus both arrow rule
/// sets (spec §4.5). `row_count` doubles as "last loaded row + 1": every
/// edge in `edges` already satisfies `parent_row < row_count` (construction
/// only ever resolves a parent id that is present in the input), so the
/// `min(parent_row, last_loaded_row)` clause of spec §4.5 step 1 is a no-op
/// in a single-batch pass and is not threaded through as a parameter.
pub fn generate(
    row_count: usize,
    edges: &[Edge],
    dangling: &[DanglingEdge],
    columns: &ColumnLayout,
    thresholds: VisibilityThresholds,
    config: &LayoutConfig,
) -> RowDrawing {
    let mut segments: Vec<Vec<Segment>> = vec![Vec::new(); row_count];
    let mut arrows: Vec<Vec<Arrow>> = vec![Vec::new(); row_count];

    for (idx, e) in edges.iter().enumerate() {
        let mut anchors: Vec<(usize, f64)> = Vec::new();
        anchors.push((e.child_row, config.x(columns.node_column[e.child_row])));
        for row in (e.child_row + 1)..e.parent_row {
            if let Some(&col) = columns.edge_column_at.get(&(idx, row)) {
                anchors.push((row, config.x(col)));
            }
        }
        anchors.push((e.parent_row, config.x(columns.node_column[e.parent_row])));

        for pair in anchors.windows(2) {
            let (row_a, x_a) = pair[0];
            let (row_b, x_b) = pair[1];
            if row_b != row_a + 1 {
                // Truncation gap: no segment, arrows below communicate
                // continuation (spec §4.5 step 3).
                continue;
            }
            let x_mid = (x_a + x_b) / 2.0;
            segments[row_a].push(Segment {
                x_top: x_a,
                y_top: config.row_height / 2.0,
                x_bottom: x_mid,
                y_bottom: config.row_height,
                color_index: e.color_index,
            });
            segments[row_b].push(Segment {
                x_top: x_mid,
                y_top: 0.0,
                x_bottom: x_b,
                y_bottom: config.row_height / 2.0,
                color_index: e.color_index,
            });
        }

        let span = (e.parent_row - e.child_row) as u64;

        let column_at = |row: usize| -> Option<f64> {
            if row == e.child_row {
                Some(config.x(columns.node_column[e.child_row]))
            } else if row == e.parent_row {
                Some(config.x(columns.node_column[e.parent_row]))
            } else {
                columns
                    .edge_column_at
                    .get(&(idx, row))
                    .map(|&col| config.x(col))
            }
        };

        if span >= thresholds.long_edge {
            let down_row = e.child_row + thresholds.visible_part as usize;
            if down_row < row_count {
                if let Some(x) = column_at(down_row) {
                    arrows[down_row].push(Arrow {
                        x,
                        y: config.row_height,
                        color_index: e.color_index,
                        is_down: true,
                    });
                }
            }
            if let Some(up_row) = e.parent_row.checked_sub(thresholds.visible_part as usize) {
                if up_row < row_count {
                    if let Some(x) = column_at(up_row) {
                        arrows[up_row].push(Arrow {
                            x,
                            y: 0.0,
                            color_index: e.color_index,
                            is_down: false,
                        });
                    }
                }
            }
        }

        if span >= thresholds.arrow_edge {
            let down_row = e.child_row + 1;
            if down_row < row_count && down_row < e.parent_row {
                if let Some(x) = column_at(down_row) {
                    arrows[down_row].push(Arrow {
                        x,
                        y: config.row_height / 2.0,
                        color_index: e.color_index,
                        is_down: true,
                    });
                }
            }
            if e.parent_row > e.child_row + 1 {
                let up_row = e.parent_row - 1;
                if up_row < row_count {
                    if let Some(x) = column_at(up_row) {
                        arrows[up_row].push(Arrow {
                            x,
                            y: config.row_height / 2.0,
                            color_index: e.color_index,
                            is_down: false,
                        });
                    }
                }
            }
        }
    }

    for d in dangling {
        let x = config.x(columns.node_column[d.child_row]);
        segments[d.child_row].push(Segment {
            x_top: x,
            y_top: config.row_height / 2.0,
            x_bottom: x,
            y_bottom: config.row_height,
            color_index: d.color_index,
        });
    }

    RowDrawing { segments, arrows }
}
