//! Application service layer for IAQP sizing.
//!
//! Shared by the CLI: scenario files in, sizing results and batch reports out.

pub mod error;
pub mod run_service;
pub mod scenario_service;

pub use error::{AppError, AppResult};
pub use run_service::{
    BatchEntry, BatchOutcome, BatchReport, SizingTables, run_batch, run_scenario,
};
pub use scenario_service::{ScenarioFile, load_scenarios, parse_scenarios_yaml};
