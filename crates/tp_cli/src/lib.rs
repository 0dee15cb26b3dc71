//! Scenario runner library.
//!
//! File-level wrapper around the `tp_core` JSON scenario API, shared by the
//! CLI binary and integration tooling.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Aggregate view of a scenario response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScenarioSummary {
    /// Ticks processed.
    pub ticks: usize,
    /// Ticks that staged a duplicate command.
    pub staged_commits: usize,
    /// Ticks that committed a nonzero tick shift.
    pub shifted_sends: usize,
}

/// Run a scenario file through a fresh pipeline, returning the response JSON.
pub fn run_scenario_file(input: &Path) -> Result<String> {
    let request_json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read scenario file: {}", input.display()))?;
    tp_core::run_scenario_json(&request_json)
        .with_context(|| format!("Scenario failed: {}", input.display()))
}

/// Parse a scenario file without running it.
pub fn validate_scenario_file(input: &Path) -> Result<usize> {
    let request_json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read scenario file: {}", input.display()))?;
    let request: tp_core::ScenarioRequest = serde_json::from_str(&request_json)
        .with_context(|| format!("Invalid scenario JSON: {}", input.display()))?;
    Ok(request.ticks.len())
}

/// Summarize a response produced by [`run_scenario_file`].
pub fn summarize(response_json: &str) -> Result<ScenarioSummary> {
    let response: serde_json::Value =
        serde_json::from_str(response_json).context("Invalid response JSON")?;
    let ticks = response["ticks"]
        .as_array()
        .context("Response has no ticks array")?;

    let staged_commits = ticks.iter().filter(|t| t.get("staged").is_some()).count();
    let shifted_sends = ticks
        .iter()
        .filter(|t| t["tick_shift"].as_u64().unwrap_or(0) > 0)
        .count();

    Ok(ScenarioSummary {
        ticks: ticks.len(),
        staged_commits,
        shifted_sends,
    })
}
