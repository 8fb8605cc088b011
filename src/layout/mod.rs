pub mod color;
pub mod edges;
pub mod index;
pub mod render;
pub mod sweep;
pub mod visibility;

#[cfg(feature = "debug_trace")]
pub mod trace;

use std::collections::{HashMap, HashSet};

use crate::error::LayoutError;
use crate::model::{CommitId, CommitRecord, LayoutConfig, LayoutRecord};

#[cfg(feature = "debug_trace")]
use trace::DebugTrace;

#[cfg(feature = "debug_trace")]
type TraceOutput = DebugTrace;
#[cfg(not(feature = "debug_trace"))]
type TraceOutput = ();

/// Run the full three-phase layout pass over one input snapshot (spec §2,
/// §5: "all layout records are produced in one batch pass per input
/// snapshot"). Returns one `LayoutRecord` per input commit, in input order.
pub fn compute_layout(
    commits: &[CommitRecord],
    main_chain: &HashSet<CommitId>,
    config: LayoutConfig,
) -> Result<Vec<LayoutRecord>, LayoutError> {
    let (records, _trace) = compute_layout_impl(commits, main_chain, config)?;
    Ok(records)
}

#[cfg(feature = "debug_trace")]
pub fn compute_layout_with_trace(
    commits: &[CommitRecord],
    main_chain: &HashSet<CommitId>,
    config: LayoutConfig,
) -> Result<(Vec<LayoutRecord>, DebugTrace), LayoutError> {
    compute_layout_impl(commits, main_chain, config)
}

fn compute_layout_impl(
    commits: &[CommitRecord],
    main_chain: &HashSet<CommitId>,
    config: LayoutConfig,
) -> Result<(Vec<LayoutRecord>, TraceOutput), LayoutError> {
    let _span = tracing::debug_span!("compute_layout", commits = commits.len()).entered();

    if config.lane_width <= 0.0 {
        return Err(LayoutError::InvalidConfiguration("lane_width must be positive"));
    }
    if config.row_height <= 0.0 {
        return Err(LayoutError::InvalidConfiguration("row_height must be positive"));
    }

    let row_count = commits.len();

    let mut id_to_row: HashMap<CommitId, usize> = HashMap::with_capacity(row_count);
    for (row, commit) in commits.iter().enumerate() {
        if let Some(&first_row) = id_to_row.get(&commit.id) {
            return Err(LayoutError::DuplicateIdentity {
                id: commit.id.to_string(),
                first_row,
                second_row: row,
            });
        }
        id_to_row.insert(commit.id.clone(), row);
    }

    let mut is_main_chain = vec![false; row_count];
    for id in main_chain {
        match id_to_row.get(id) {
            Some(&row) => is_main_chain[row] = true,
            None => tracing::warn!(%id, "main_chain id not present in commits, ignoring"),
        }
    }

    let parent_rows = edges::resolve_parent_rows(commits, &id_to_row);

    let layout_index = index::assign(row_count, &parent_rows);
    let color_index = color::assign(&layout_index, &is_main_chain);

    let drawable_edges = edges::collect(&parent_rows, &layout_index, &color_index);
    let dangling = edges::collect_dangling(commits, &id_to_row, &color_index);

    tracing::trace!(
        edges = drawable_edges.len(),
        dangling = dangling.len(),
        "edge collection complete"
    );

    let thresholds = visibility::VisibilityThresholds::for_mode(config.show_long_edges);
    let columns = sweep::compute(row_count, &drawable_edges, &layout_index, thresholds);
    let drawing = render::generate(row_count, &drawable_edges, &dangling, &columns, thresholds, &config);

    #[cfg(feature = "debug_trace")]
    let trace: TraceOutput = DebugTrace::build(row_count, &parent_rows, &layout_index, &color_index, &columns);
    #[cfg(not(feature = "debug_trace"))]
    let trace: TraceOutput = ();

    let mut records = Vec::with_capacity(row_count);
    let RowDrawingParts { mut segments, mut arrows } = RowDrawingParts::from(drawing);
    for row in 0..row_count {
        records.push(LayoutRecord {
            layout_index: layout_index[row],
            column: columns.node_column[row],
            color_index: color_index[row],
            segments: std::mem::take(&mut segments[row]),
            arrows: std::mem::take(&mut arrows[row]),
        });
    }

    Ok((records, trace))
}

struct RowDrawingParts {
    segments: Vec<Vec<render::Segment>>,
    arrows: Vec<Vec<render::Arrow>>,
}

impl From<render::RowDrawing> for RowDrawingParts {
    fn from(d: render::RowDrawing) -> Self {
        RowDrawingParts {
            segments: d.segments,
            arrows: d.arrows,
        }
    }
}
