//! JSON scenario API: drive the pipeline from a scripted tick sequence.
//!
//! This is the host-integration surface: the host (or a test harness) hands
//! over the sampled command plus the external query values for every tick,
//! and gets back the mutated command and the scheduler outputs per tick.
//! Deterministic: the same request always produces the same response.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::command::{ButtonMask, Command, CommandHistory};
use crate::engine::config::PipelineConfig;
use crate::engine::inputs::TickInputs;
use crate::engine::pipeline::CommandPipeline;
use crate::error::{PipelineError, Result};
use crate::SCHEMA_VERSION;

/// One scripted tick: the sampled command and the host facts for that tick.
#[derive(Debug, Clone, Deserialize)]
pub struct TickScript {
    pub command: Command,
    #[serde(default)]
    pub inputs: TickInputs,
}

/// Scenario request.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub config: PipelineConfig,
    pub ticks: Vec<TickScript>,
}

/// Staged duplicate command summary.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StagedCommand {
    pub sequence: u32,
    pub tick_base: u32,
}

/// Per-tick report: the command after mutation plus the scheduler outputs.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub sequence: u32,
    pub tick_base: u32,
    pub buttons: ButtonMask,
    pub forward_move: f32,
    pub side_move: f32,
    pub ticks_allowed: u32,
    pub next_tick_shift: u32,
    pub tick_shift: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staged: Option<StagedCommand>,
}

/// Scenario response.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResponse {
    pub schema_version: u8,
    pub ticks: Vec<TickReport>,
}

/// Run a scripted scenario through a fresh pipeline.
pub fn run_scenario(request: ScenarioRequest) -> Result<ScenarioResponse> {
    if request.schema_version != SCHEMA_VERSION {
        warn!(
            found = request.schema_version,
            expected = SCHEMA_VERSION,
            "rejecting scenario with unsupported schema version"
        );
        return Err(PipelineError::UnsupportedSchema {
            expected: SCHEMA_VERSION,
            found: request.schema_version,
        });
    }
    if request.ticks.is_empty() {
        return Err(PipelineError::EmptyScenario);
    }

    let mut pipeline = CommandPipeline::new(request.config);
    let mut history = CommandHistory::new();
    let mut reports = Vec::with_capacity(request.ticks.len());

    for script in request.ticks {
        let mut cmd = script.command;
        history.store(cmd);
        let outcome = pipeline.process(&mut cmd, &mut history, &script.inputs);
        history.store(cmd);

        let staged = outcome.staged_sequence.map(|sequence| {
            let staged_cmd = history.get(sequence);
            StagedCommand {
                sequence,
                tick_base: staged_cmd.tick_base,
            }
        });

        reports.push(TickReport {
            sequence: cmd.sequence,
            tick_base: cmd.tick_base,
            buttons: cmd.buttons,
            forward_move: cmd.forward_move,
            side_move: cmd.side_move,
            ticks_allowed: outcome.outputs.ticks_allowed,
            next_tick_shift: outcome.outputs.next_tick_shift,
            tick_shift: outcome.outputs.tick_shift,
            staged,
        });
    }

    Ok(ScenarioResponse {
        schema_version: SCHEMA_VERSION,
        ticks: reports,
    })
}

/// JSON-in, JSON-out wrapper around [`run_scenario`].
pub fn run_scenario_json(request_json: &str) -> Result<String> {
    let request: ScenarioRequest = serde_json::from_str(request_json)?;
    let response = run_scenario(request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario(ticks: serde_json::Value) -> String {
        json!({
            "schema_version": 1,
            "config": {
                "double_commit": { "enabled": true, "key": 16 }
            },
            "ticks": ticks
        })
        .to_string()
    }

    #[test]
    fn test_rejects_wrong_schema_version() {
        let request = json!({ "schema_version": 9, "ticks": [] }).to_string();
        let err = run_scenario_json(&request).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnsupportedSchema { expected: 1, found: 9 }
        ));
    }

    #[test]
    fn test_rejects_empty_scenario() {
        let request = json!({ "schema_version": 1, "ticks": [] }).to_string();
        let err = run_scenario_json(&request).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyScenario));
    }

    #[test]
    fn test_commit_tick_reports_staged_command() {
        let request = scenario(json!([{
            "command": {
                "sequence": 100,
                "tick_base": 640,
                "buttons": "ATTACK"
            },
            "inputs": {
                "keys": { "held": [16] },
                "send_packet": true,
                "current_tick": 640
            }
        }]));

        let response = run_scenario_json(&request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        let tick = &parsed["ticks"][0];
        assert_eq!(tick["sequence"], 100);
        assert_eq!(tick["staged"]["sequence"], 101);
        assert_eq!(tick["staged"]["tick_base"], 640 + 16);
    }

    #[test]
    fn test_scenario_is_deterministic() {
        let request = scenario(json!([
            {
                "command": { "sequence": 1, "tick_base": 10, "buttons": "ATTACK" },
                "inputs": { "keys": { "held": [16] }, "current_tick": 10 }
            },
            {
                "command": { "sequence": 2, "tick_base": 11 },
                "inputs": { "keys": { "held": [16] }, "current_tick": 11 }
            }
        ]));

        let first = run_scenario_json(&request).unwrap();
        let second = run_scenario_json(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_json_is_deserialization_error() {
        let err = run_scenario_json("{not json").unwrap_err();
        assert!(matches!(err, PipelineError::DeserializationError(_)));
    }
}
