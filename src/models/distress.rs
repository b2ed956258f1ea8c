//! Pavement distress model.

use serde::{Deserialize, Serialize};

/// A localized pavement distress.
///
/// A distress is repaired either implicitly, when a selected resurfacing
/// segment covers its location, or explicitly through its local-repair bit
/// in the chromosome. Repair is idempotent: the deduction is restored once
/// no matter how many segments cover the location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distress {
    /// Unique distress identifier.
    pub id: String,
    /// Position along the road (m).
    pub location: f64,
    /// Condition deduction restored when the distress is repaired.
    pub deduction: f64,
    /// Cost of a dedicated local (spot) repair.
    pub cost_local: f64,
}

impl Distress {
    /// Creates a new distress record.
    pub fn new(id: impl Into<String>, location: f64, deduction: f64, cost_local: f64) -> Self {
        Self {
            id: id.into(),
            location,
            deduction,
            cost_local,
        }
    }
}
