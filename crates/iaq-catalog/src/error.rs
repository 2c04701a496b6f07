//! Catalog lookup errors.

use iaq_core::CoreError;
use thiserror::Error;

/// Result type for catalog queries.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the contaminant / occupancy / cleaner tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Occupancy category not present in the ventilation-rate table.
    #[error("Unknown occupancy category '{name}'")]
    UnknownOccupancy { name: String },

    /// Compound not present in the design-limit table.
    #[error("Unknown compound '{name}'")]
    UnknownCompound { name: String },

    /// A record violates a table invariant (limit <= 0, negative rate, ...).
    #[error("Invalid catalog record for '{name}': {what}")]
    InvalidRecord { name: String, what: &'static str },

    /// Unit conversion failed while normalising a tabulated value.
    #[error("Unit conversion failed: {0}")]
    Unit(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_key() {
        let err = CatalogError::UnknownOccupancy {
            name: "Moon base".into(),
        };
        assert!(err.to_string().contains("Moon base"));

        let err = CatalogError::UnknownCompound {
            name: "radon".into(),
        };
        assert!(err.to_string().contains("radon"));
    }
}
