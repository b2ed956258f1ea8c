//! Decoded maintenance plan: the domain-level view of a chromosome.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Extent;

/// How a distress ends up being handled by a plan.
///
/// Segment coverage takes precedence: a distress inside a chosen segment's
/// extent is classified [`Resurfacing`](RepairMethod::Resurfacing) even when
/// its explicit repair bit is also set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairMethod {
    /// Covered by a chosen resurfacing segment.
    Resurfacing,
    /// Repaired through its dedicated local-repair bit.
    LocalRepair,
    /// Left unrepaired.
    NotRepaired,
}

impl fmt::Display for RepairMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepairMethod::Resurfacing => "resurfacing",
            RepairMethod::LocalRepair => "local repair",
            RepairMethod::NotRepaired => "not repaired",
        };
        f.write_str(label)
    }
}

/// An action chosen by the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionChoice {
    /// Action identifier.
    pub id: String,
    /// Extent for resurfacing segments; `None` for whole roads.
    pub extent: Option<Extent>,
    /// Action cost.
    pub cost: f64,
}

impl ActionChoice {
    /// Segment length in meters, when the action has an extent.
    pub fn length(&self) -> Option<f64> {
        self.extent.map(|e| e.length())
    }
}

/// Per-distress outcome of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistressStatus {
    /// Distress identifier.
    pub id: String,
    /// Position along the road (m).
    pub location: f64,
    /// Deduction restored when repaired.
    pub deduction: f64,
    /// Cost of a dedicated local repair.
    pub cost_local: f64,
    /// Classification under the plan.
    pub method: RepairMethod,
}

impl DistressStatus {
    /// Whether the distress is repaired at all under the plan.
    pub fn is_repaired(&self) -> bool {
        self.method != RepairMethod::NotRepaired
    }
}

/// A decoded maintenance plan.
///
/// Produced from the best chromosome of a run by
/// [`MaintenanceProblem::decode`](crate::ga::MaintenanceProblem::decode).
/// The aggregates reproduce exactly the evaluator's cost/benefit arithmetic,
/// so they agree with the reported fitness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenancePlan {
    /// Chosen actions, in catalog order.
    pub actions: Vec<ActionChoice>,
    /// Status of every distress, in catalog order.
    pub distresses: Vec<DistressStatus>,
    /// Total cost of chosen actions.
    pub resurfacing_cost: f64,
    /// Total local-repair cost incurred.
    pub local_repair_cost: f64,
    /// `resurfacing_cost + local_repair_cost`.
    pub total_cost: f64,
    /// Total restored condition.
    pub total_benefit: f64,
}

impl MaintenancePlan {
    /// Number of distresses classified under `method`.
    pub fn count(&self, method: RepairMethod) -> usize {
        self.distresses
            .iter()
            .filter(|d| d.method == method)
            .count()
    }
}
