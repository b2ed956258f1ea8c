//! Road-maintenance domain models.
//!
//! Core data types for the planning problem and its solutions:
//!
//! - [`Action`]: a candidate maintenance operation — a resurfacing segment
//!   with a spatial [`Extent`], or a whole-road rehabilitation
//! - [`Distress`]: a localized pavement defect with a deduction value and a
//!   local spot-repair cost
//! - [`Catalog`]: the read-only set of candidates for one optimization run
//! - [`MaintenancePlan`]: the decoded result — chosen actions, per-distress
//!   [`RepairMethod`], and cost/benefit aggregates

mod action;
mod catalog;
mod distress;
mod plan;

pub use action::{Action, Extent};
pub use catalog::Catalog;
pub use distress::Distress;
pub use plan::{ActionChoice, DistressStatus, MaintenancePlan, RepairMethod};
