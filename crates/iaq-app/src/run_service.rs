//! Scenario sizing service: one scenario, or many in parallel.

use iaq_catalog::{CleanerEfficiencyTable, ContaminantCatalog};
use iaq_solver::{RawParams, ResolverDefaults, SizingResult, SolverError, solve_raw};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::AppResult;
use crate::scenario_service::ScenarioFile;

/// Reference tables a run is sized against.
#[derive(Debug, Clone)]
pub struct SizingTables {
    pub catalog: ContaminantCatalog,
    pub cleaners: CleanerEfficiencyTable,
}

impl SizingTables {
    /// Built-in occupancy, compound and cleaner tables.
    pub fn standard() -> AppResult<Self> {
        Ok(Self {
            catalog: ContaminantCatalog::standard()?,
            cleaners: CleanerEfficiencyTable::standard(),
        })
    }
}

/// Size a single scenario.
pub fn run_scenario(
    raw: &RawParams,
    defaults: &ResolverDefaults,
    tables: &SizingTables,
) -> AppResult<SizingResult> {
    Ok(solve_raw(raw, defaults, &tables.catalog, &tables.cleaners)?)
}

/// Outcome of one scenario in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub label: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Sized { result: SizingResult },
    Infeasible { report: iaq_solver::InfeasibilityReport },
    Failed { error: String },
}

impl BatchOutcome {
    fn from_solve(outcome: Result<SizingResult, SolverError>) -> Self {
        match outcome {
            Ok(result) => Self::Sized { result },
            Err(SolverError::Infeasible(report)) => Self::Infeasible { report },
            Err(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Results of a batch, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn sized(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Sized { .. }))
    }

    pub fn infeasible(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Infeasible { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, BatchOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&BatchOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// Size every scenario of a file in parallel.
///
/// Scenarios are independent; one failing does not stop the others.
pub fn run_batch(file: &ScenarioFile, tables: &SizingTables) -> BatchReport {
    let entries: Vec<BatchEntry> = file
        .scenarios
        .par_iter()
        .enumerate()
        .map(|(i, raw)| BatchEntry {
            label: file.label(i),
            outcome: BatchOutcome::from_solve(solve_raw(
                raw,
                &file.defaults,
                &tables.catalog,
                &tables.cleaners,
            )),
        })
        .collect();

    let report = BatchReport { entries };
    tracing::info!(
        scenarios = report.entries.len(),
        sized = report.sized(),
        infeasible = report.infeasible(),
        failed = report.failed(),
        "batch finished"
    );
    report
}
