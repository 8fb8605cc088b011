//! Edge visibility and long-edge truncation thresholds (spec §4.4).

/// The three constants that gate an edge's visibility at a given row,
/// selected by the `show_long_edges` mode flag.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityThresholds {
    pub long_edge: u64,
    pub visible_part: u64,
    pub arrow_edge: u64,
}

impl VisibilityThresholds {
    pub const EXPANDED: VisibilityThresholds = VisibilityThresholds {
        long_edge: 1000,
        visible_part: 250,
        arrow_edge: 30,
    };

    pub const COLLAPSED: VisibilityThresholds = VisibilityThresholds {
        long_edge: 30,
        visible_part: 1,
        arrow_edge: u64::MAX,
    };

    pub fn for_mode(show_long_edges: bool) -> VisibilityThresholds {
        if show_long_edges {
            VisibilityThresholds::EXPANDED
        } else {
            VisibilityThresholds::COLLAPSED
        }
    }

    /// Is an edge of span `s` visible at a row whose offsets from the
    /// child/parent endpoints are `up_offset`/`down_offset`?
    pub fn is_visible(&self, span: u64, up_offset: u64, down_offset: u64) -> bool {
        if span >= self.long_edge {
            up_offset <= self.visible_part || down_offset <= self.visible_part
        } else if span >= self.arrow_edge {
            up_offset <= 1 || down_offset <= 1
        } else {
            true
        }
    }
}
