//! iaq-core: shared foundation for the IAQP sizing workspace.
//!
//! Contains:
//! - units (uom area / airflow types + constructors, concentration conversion)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
