//! Error types for the iaq-app service layer.

use std::path::PathBuf;

use iaq_catalog::CatalogError;
use iaq_solver::SolverError;

/// Unified error for the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse scenario file {path}: {message}")]
    ScenarioParse { path: PathBuf, message: String },

    #[error("Unsupported scenario file format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Sizing error: {0}")]
    Solver(#[from] SolverError),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Result type for iaq-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True when the underlying sizing found no feasible airflow.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Self::Solver(err) if err.is_infeasible())
    }
}
