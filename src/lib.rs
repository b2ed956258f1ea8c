//! Road-maintenance planning optimizer.
//!
//! Selects which maintenance actions to fund under a fixed budget
//! (resurfacing of road segments, or local spot repair of individual
//! distresses), maximizing restored pavement condition while keeping total
//! spend within budget and chosen resurfacing extents overlap-free. The
//! constrained 0/1 selection problem is solved heuristically by a genetic
//! algorithm; results are good, not provably optimal.
//!
//! # Modules
//!
//! - **[`models`]**: domain types — `Action`, `Distress`, `Catalog`,
//!   `MaintenancePlan`
//! - **[`ga`]**: the optimization engine — problem definition, chromosome
//!   encoding and operators, tournament selection, feasibility repair, and
//!   the generational runner
//! - **[`loader`]**: CSV catalog ingestion
//! - **[`dataset`]**: the published case-study catalog
//!
//! # Example
//!
//! ```
//! use roadworks::ga::{GaConfig, GaRunner, MaintenanceProblem};
//! use roadworks::models::{Action, Catalog, Distress};
//!
//! let catalog = Catalog::new(vec![
//!     Action::segment("S1", 0.0, 300.0, 9000.0),
//!     Action::segment("S2", 300.0, 700.0, 14000.0),
//! ])
//! .with_distresses(vec![
//!     Distress::new("D1", 100.0, 20.0, 400.0),
//!     Distress::new("D2", 400.0, 15.0, 350.0),
//! ]);
//!
//! let problem = MaintenanceProblem::new(catalog, 25_000.0);
//! let config = GaConfig::default().with_seed(42);
//! let result = GaRunner::run(&problem, &config).unwrap();
//!
//! // Both distresses end up repaired one way or the other
//! assert_eq!(result.total_benefit, 35.0);
//! assert!(result.total_cost <= 25_000.0);
//! ```

pub mod dataset;
pub mod error;
pub mod ga;
pub mod loader;
pub mod models;

pub use error::{Error, Result};
pub use ga::{GaConfig, GaResult, GaRunner, MaintenanceProblem};
