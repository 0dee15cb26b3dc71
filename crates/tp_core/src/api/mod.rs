pub mod json_api;

pub use json_api::{
    run_scenario, run_scenario_json, ScenarioRequest, ScenarioResponse, StagedCommand,
    TickReport, TickScript,
};
