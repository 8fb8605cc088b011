//! Column layout engine for version-control commit graphs, in the style of
//! the JetBrains IDE commit graph: a DFS pass assigns each commit a stable
//! "layout index" (its branch identity across rows), a per-row sweep packs
//! active edges into gap-free columns, and a final pass emits the drawable
//! segments and arrows, truncating edges that span very long ranges.
//!
//! The crate is organized as one batch entry point, [`layout::compute_layout`],
//! over [`model::CommitRecord`] input. See that module for the three-phase
//! breakdown.

pub mod error;
pub mod layout;
pub mod model;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use error::LayoutError;
pub use layout::compute_layout;
pub use model::{CommitId, CommitRecord, LayoutConfig, LayoutRecord};
