//! WASM boundary: a single stateless JSON-in/JSON-out entry point.
//!
//! Unlike the handle-store API this crate's teacher exposed for its
//! incremental-append use case, layout here is always recomputed from a
//! complete snapshot (§5: "all layout records are produced in one batch
//! pass per input snapshot"), so there is no server-side state to manage
//! across calls — the caller owns the commit list and resubmits it whole.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::model::{CommitId, CommitRecord, LayoutConfig, LayoutRecord};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutRequest {
    commits: Vec<CommitRecord>,
    #[serde(default)]
    main_chain: Vec<CommitId>,
    #[serde(default)]
    layout_config: Option<LayoutConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutResponse {
    records: Vec<LayoutRecord>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_error(msg: impl std::fmt::Display) -> String {
    serde_json::to_string(&ErrorResponse {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{msg}\"}}"))
}

/// Compute a layout from a JSON request of the form
/// `{ "commits": [...], "mainChain": [...], "layoutConfig": {...} }` and
/// return `{ "records": [...] }`, or `{ "error": "..." }` on failure.
#[wasm_bindgen]
pub fn compute_layout_json(request: &str) -> String {
    let request: LayoutRequest = match serde_json::from_str(request) {
        Ok(r) => r,
        Err(e) => return json_error(format!("invalid request: {e}")),
    };

    let main_chain: HashSet<CommitId> = request.main_chain.into_iter().collect();
    let config = request.layout_config.unwrap_or_default();

    match crate::layout::compute_layout(&request.commits, &main_chain, config) {
        Ok(records) => serde_json::to_string(&LayoutResponse { records })
            .unwrap_or_else(|e| json_error(format!("serialization error: {e}"))),
        Err(e) => json_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_error_for_malformed_request() {
        let result = compute_layout_json("not json");
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert!(parsed.get("error").is_some());
    }

    #[test]
    fn computes_layout_for_a_minimal_request() {
        let request = r#"{"commits":[{"id":"aa","parents":[]}],"mainChain":["aa"]}"#;
        let result = compute_layout_json(request);
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["records"].as_array().unwrap().len(), 1);
    }
}
