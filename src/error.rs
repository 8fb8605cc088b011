use thiserror::Error;

/// Fatal errors that abort a layout pass with no partial output (spec §7).
///
/// `BadMainChain` is deliberately absent: per spec §7 it is recovered
/// locally (the dangling id is ignored and color-0 assignment proceeds for
/// the matched members), so it never reaches `Result::Err`. A `tracing::warn!`
/// is emitted at the point of recovery instead; see `layout::color`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("duplicate commit identity {id} at rows {first_row} and {second_row}")]
    DuplicateIdentity {
        id: String,
        first_row: usize,
        second_row: usize,
    },

    #[error("invalid layout configuration: {0}")]
    InvalidConfiguration(&'static str),
}
