use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque commit identity.
///
/// Stored as raw bytes rather than a `String` (DESIGN NOTES §9): a 20-byte
/// hash beats a hex string as a map key in both hashing cost and allocation.
/// Callers may still hand us hex strings at the boundary; `CommitId::parse`
/// decodes them, and anything that doesn't look like hex is kept verbatim as
/// its own UTF-8 bytes so opaque non-hash identities still round-trip.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CommitId(Box<[u8]>);

impl CommitId {
    /// Build an id from raw bytes, hex-decoding when the input looks like an
    /// even-length hex string (the common case: 40-char SHA-1 or 64-char
    /// SHA-256 hex). Anything else is kept as opaque bytes.
    pub fn parse(raw: &str) -> Self {
        if raw.len() % 2 == 0 && !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            let mut bytes = Vec::with_capacity(raw.len() / 2);
            let mut chars = raw.as_bytes().chunks_exact(2);
            for pair in &mut chars {
                let hi = (pair[0] as char).to_digit(16).unwrap() as u8;
                let lo = (pair[1] as char).to_digit(16).unwrap() as u8;
                bytes.push((hi << 4) | lo);
            }
            CommitId(bytes.into_boxed_slice())
        } else {
            CommitId(raw.as_bytes().to_vec().into_boxed_slice())
        }
    }

    pub fn from_bytes(raw: impl Into<Box<[u8]>>) -> Self {
        CommitId(raw.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId(")?;
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for CommitId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CommitId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(CommitId::parse(&raw))
    }
}

impl From<&str> for CommitId {
    fn from(value: &str) -> Self {
        CommitId::parse(value)
    }
}

impl From<String> for CommitId {
    fn from(value: String) -> Self {
        CommitId::parse(&value)
    }
}

/// A single input commit: an identity, its ordered parent identities, and
/// opaque display metadata the layout core never inspects.
///
/// Input is newest-first: for any edge, `child_row < parent_row` in the
/// slice this record lives in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: CommitId,
    /// Declared parent order matters: index 0 is the first parent and
    /// continues the current layout index; index ≥ 1 are merge sources.
    pub parents: Vec<CommitId>,
    /// Passthrough metadata (subject, author, timestamp, ...). The core
    /// never reads this; it exists so callers can round-trip their own
    /// commit payload through the layout pass without a side table.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl CommitRecord {
    pub fn new(id: impl Into<CommitId>, parents: Vec<CommitId>) -> Self {
        CommitRecord {
            id: id.into(),
            parents,
            metadata: serde_json::Value::Null,
        }
    }
}

/// Caller-supplied layout constants (spec §6 `layout_config`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub lane_width: f64,
    pub row_height: f64,
    pub left_margin: f64,
    /// Selects the `expanded`/`collapsed` long-edge constant tuple (§4.4).
    pub show_long_edges: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            lane_width: 16.0,
            row_height: 24.0,
            left_margin: 8.0,
            show_long_edges: true,
        }
    }
}

impl LayoutConfig {
    /// Compute the x coordinate of a column's center line (spec §4.5).
    pub fn x(&self, column: usize) -> f64 {
        column as f64 * self.lane_width + self.lane_width / 2.0 + self.left_margin
    }
}

/// One output record per input commit (spec §3 "Layout record", §6 output
/// structure).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub layout_index: u32,
    pub column: usize,
    pub color_index: u32,
    pub segments: Vec<crate::layout::render::Segment>,
    pub arrows: Vec<crate::layout::render::Arrow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_id() {
        let id = CommitId::parse("deadbeef");
        assert_eq!(id.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(id.to_string(), "deadbeef");
    }

    #[test]
    fn keeps_opaque_non_hex_id() {
        let id = CommitId::parse("not-hex!");
        assert_eq!(id.as_bytes(), b"not-hex!");
    }

    #[test]
    fn x_includes_margin_and_half_lane() {
        let cfg = LayoutConfig {
            lane_width: 10.0,
            row_height: 20.0,
            left_margin: 5.0,
            show_long_edges: true,
        };
        assert_eq!(cfg.x(0), 10.0);
        assert_eq!(cfg.x(1), 20.0);
    }
}
