//! Candidate catalog: the read-only input to one optimization run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{Action, Distress};

/// The catalog of candidate maintenance actions and, optionally, the
/// distresses they may repair.
///
/// The catalog is read-only for the duration of a run and determines the
/// chromosome length: one bit per action, plus one explicit-repair bit per
/// distress when a distress model is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Candidate actions, in chromosome bit order.
    pub actions: Vec<Action>,
    /// Distresses, in chromosome bit order after the actions. May be empty,
    /// in which case benefit comes from the actions' intrinsic gains.
    pub distresses: Vec<Distress>,
}

impl Catalog {
    /// Creates a catalog of actions with no distress model.
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            distresses: Vec::new(),
        }
    }

    /// Attaches a distress model.
    pub fn with_distresses(mut self, distresses: Vec<Distress>) -> Self {
        self.distresses = distresses;
        self
    }

    /// Chromosome length for this catalog.
    pub fn genome_length(&self) -> usize {
        self.actions.len() + self.distresses.len()
    }

    /// Whether a distress model is in play.
    pub fn has_distress_model(&self) -> bool {
        !self.distresses.is_empty()
    }

    /// Validates the catalog, failing fast on the first defect found.
    ///
    /// Checks: non-empty action list, finite non-negative costs and
    /// deductions, extents with `end >= start`, finite locations, and
    /// unique IDs within each list.
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(Error::InvalidCatalog("action list is empty".into()));
        }

        let mut action_ids = HashSet::new();
        for action in &self.actions {
            if !action_ids.insert(action.id.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate action ID: {}",
                    action.id
                )));
            }
            if !action.cost.is_finite() || action.cost < 0.0 {
                return Err(Error::InvalidCatalog(format!(
                    "action '{}' has invalid cost {}",
                    action.id, action.cost
                )));
            }
            if !action.benefit.is_finite() || action.benefit < 0.0 {
                return Err(Error::InvalidCatalog(format!(
                    "action '{}' has invalid benefit {}",
                    action.id, action.benefit
                )));
            }
            if let Some(extent) = action.extent {
                if !extent.start.is_finite() || !extent.end.is_finite() || extent.end < extent.start
                {
                    return Err(Error::InvalidCatalog(format!(
                        "action '{}' has invalid extent [{}, {}]",
                        action.id, extent.start, extent.end
                    )));
                }
            }
        }

        let mut distress_ids = HashSet::new();
        for distress in &self.distresses {
            if !distress_ids.insert(distress.id.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate distress ID: {}",
                    distress.id
                )));
            }
            if !distress.location.is_finite() {
                return Err(Error::InvalidCatalog(format!(
                    "distress '{}' has invalid location {}",
                    distress.id, distress.location
                )));
            }
            if !distress.deduction.is_finite() || distress.deduction < 0.0 {
                return Err(Error::InvalidCatalog(format!(
                    "distress '{}' has invalid deduction {}",
                    distress.id, distress.deduction
                )));
            }
            if !distress.cost_local.is_finite() || distress.cost_local < 0.0 {
                return Err(Error::InvalidCatalog(format!(
                    "distress '{}' has invalid local repair cost {}",
                    distress.id, distress.cost_local
                )));
            }
        }

        Ok(())
    }
}
