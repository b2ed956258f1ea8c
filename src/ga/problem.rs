//! Maintenance-planning problem definition.
//!
//! [`MaintenanceProblem`] bridges the domain models (catalog, budget) to the
//! GA engine: it evaluates chromosomes into fitness records and decodes the
//! best one back into a [`MaintenancePlan`]. Both directions share the same
//! coverage rule, so decoded totals always agree with the reported fitness.

use crate::error::{Error, Result};
use crate::models::{ActionChoice, Catalog, DistressStatus, MaintenancePlan, RepairMethod};

use super::chromosome::Chromosome;

/// How constraint violations shape fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitnessPolicy {
    /// Soft penalties: `benefit - λ_budget·max(0, cost - budget)
    /// - λ_overlap·overlapping_pairs`. Fitness stays real-valued (possibly
    /// negative), so infeasible solutions remain rankable and the search is
    /// pressured gradually toward feasibility.
    Penalty {
        /// Weight per unit of budget overshoot.
        lambda_budget: f64,
        /// Weight per overlapping pair of selected extents.
        lambda_overlap: f64,
    },
    /// Any overlap or budget violation collapses fitness to exactly 0,
    /// ranking below every feasible solution with positive benefit. Pair
    /// with offspring repair ([`GaConfig::repair`](super::GaConfig::repair)),
    /// which then carries the constraint-satisfaction work.
    HardReject,
}

impl Default for FitnessPolicy {
    fn default() -> Self {
        FitnessPolicy::Penalty {
            lambda_budget: 0.5,
            lambda_overlap: 1000.0,
        }
    }
}

/// When an explicit local-repair bit incurs its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalCostPolicy {
    /// The local-repair cost is charged only when the distress is not
    /// covered by a selected segment. A covered distress with its bit set
    /// is repaired by the resurfacing and costs nothing extra.
    #[default]
    UncoveredOnly,
    /// A set bit always charges its local-repair cost, covered or not.
    /// The deduction is still restored only once.
    Always,
}

/// Fitness record for one chromosome.
///
/// Derived, never stored in the population: identical bit patterns always
/// produce identical records for a fixed problem, which is what makes the
/// run-scoped memo cache sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Scalar objective; higher is better.
    pub fitness: f64,
    /// Total spend of the selection.
    pub cost: f64,
    /// Total restored condition.
    pub benefit: f64,
    /// Number of overlapping pairs among selected extents.
    pub overlap_pairs: usize,
    /// Whether the selection is overlap-free and within budget.
    pub feasible: bool,
}

/// The road-maintenance planning problem for one optimization run.
///
/// # Example
/// ```
/// use roadworks::ga::{GaConfig, GaRunner, MaintenanceProblem};
/// use roadworks::models::{Action, Catalog, Distress};
///
/// let catalog = Catalog::new(vec![Action::segment("S1", 0.0, 300.0, 9000.0)])
///     .with_distresses(vec![Distress::new("D1", 100.0, 20.0, 400.0)]);
/// let problem = MaintenanceProblem::new(catalog, 25_000.0);
/// let result = GaRunner::run(&problem, &GaConfig::default().with_seed(42)).unwrap();
/// assert!(result.best_fitness >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MaintenanceProblem {
    /// Candidate actions and distresses. Read-only for the run.
    pub catalog: Catalog,
    /// Spending cap.
    pub budget: f64,
    /// Violation handling.
    pub fitness_policy: FitnessPolicy,
    /// Local-repair cost accounting.
    pub local_cost_policy: LocalCostPolicy,
}

impl MaintenanceProblem {
    /// Creates a problem with the default policies (soft penalties,
    /// local cost charged only when uncovered).
    pub fn new(catalog: Catalog, budget: f64) -> Self {
        Self {
            catalog,
            budget,
            fitness_policy: FitnessPolicy::default(),
            local_cost_policy: LocalCostPolicy::default(),
        }
    }

    /// Sets the fitness policy.
    pub fn with_fitness_policy(mut self, policy: FitnessPolicy) -> Self {
        self.fitness_policy = policy;
        self
    }

    /// Sets the local-repair cost policy.
    pub fn with_local_cost_policy(mut self, policy: LocalCostPolicy) -> Self {
        self.local_cost_policy = policy;
        self
    }

    /// Chromosome length for this problem.
    pub fn genome_length(&self) -> usize {
        self.catalog.genome_length()
    }

    /// Validates catalog and problem parameters, failing fast.
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate()?;

        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "budget {} must be finite and non-negative",
                self.budget
            )));
        }
        if let FitnessPolicy::Penalty {
            lambda_budget,
            lambda_overlap,
        } = self.fitness_policy
        {
            if !lambda_budget.is_finite() || lambda_budget < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "lambda_budget {lambda_budget} must be finite and non-negative"
                )));
            }
            if !lambda_overlap.is_finite() || lambda_overlap < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "lambda_overlap {lambda_overlap} must be finite and non-negative"
                )));
            }
        }
        Ok(())
    }

    /// Evaluates a chromosome into its fitness record.
    ///
    /// # Panics
    /// Panics if the chromosome length does not match the catalog.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Evaluation {
        assert_eq!(
            chromosome.len(),
            self.genome_length(),
            "chromosome length must match catalog size"
        );

        let n_actions = self.catalog.actions.len();
        let (_, local_bits) = chromosome.split(n_actions);
        let selected = chromosome.selected_actions(n_actions);

        let mut cost: f64 = selected
            .iter()
            .map(|&i| self.catalog.actions[i].cost)
            .sum();
        let overlap_pairs = self.overlap_pairs(&selected);

        let mut benefit = 0.0;
        if self.catalog.has_distress_model() {
            for (j, distress) in self.catalog.distresses.iter().enumerate() {
                let covered = self.is_covered(&selected, distress.location);
                let explicit = local_bits[j];

                let charged = match self.local_cost_policy {
                    LocalCostPolicy::UncoveredOnly => explicit && !covered,
                    LocalCostPolicy::Always => explicit,
                };
                if charged {
                    cost += distress.cost_local;
                }
                if covered || explicit {
                    benefit += distress.deduction;
                }
            }
        } else {
            benefit = selected
                .iter()
                .map(|&i| self.catalog.actions[i].benefit)
                .sum();
        }

        let overshoot = (cost - self.budget).max(0.0);
        let feasible = overlap_pairs == 0 && overshoot == 0.0;
        let fitness = match self.fitness_policy {
            FitnessPolicy::Penalty {
                lambda_budget,
                lambda_overlap,
            } => benefit - lambda_budget * overshoot - lambda_overlap * overlap_pairs as f64,
            FitnessPolicy::HardReject => {
                if feasible {
                    benefit
                } else {
                    0.0
                }
            }
        };

        Evaluation {
            fitness,
            cost,
            benefit,
            overlap_pairs,
            feasible,
        }
    }

    /// Decodes a chromosome into a domain-level plan.
    ///
    /// Uses the same coverage rule as [`evaluate`](Self::evaluate): segment
    /// coverage takes precedence over the explicit bit, so a covered
    /// distress is always classified `Resurfacing`.
    pub fn decode(&self, chromosome: &Chromosome) -> MaintenancePlan {
        assert_eq!(
            chromosome.len(),
            self.genome_length(),
            "chromosome length must match catalog size"
        );

        let n_actions = self.catalog.actions.len();
        let (_, local_bits) = chromosome.split(n_actions);
        let selected = chromosome.selected_actions(n_actions);

        let mut resurfacing_cost = 0.0;
        let actions: Vec<ActionChoice> = selected
            .iter()
            .map(|&i| {
                let action = &self.catalog.actions[i];
                resurfacing_cost += action.cost;
                ActionChoice {
                    id: action.id.clone(),
                    extent: action.extent,
                    cost: action.cost,
                }
            })
            .collect();

        let mut local_repair_cost = 0.0;
        let mut total_benefit = 0.0;
        let mut distresses = Vec::with_capacity(self.catalog.distresses.len());

        if self.catalog.has_distress_model() {
            for (j, distress) in self.catalog.distresses.iter().enumerate() {
                let covered = self.is_covered(&selected, distress.location);
                let explicit = local_bits[j];

                let method = if covered {
                    RepairMethod::Resurfacing
                } else if explicit {
                    RepairMethod::LocalRepair
                } else {
                    RepairMethod::NotRepaired
                };

                let charged = match self.local_cost_policy {
                    LocalCostPolicy::UncoveredOnly => explicit && !covered,
                    LocalCostPolicy::Always => explicit,
                };
                if charged {
                    local_repair_cost += distress.cost_local;
                }
                if method != RepairMethod::NotRepaired {
                    total_benefit += distress.deduction;
                }

                distresses.push(DistressStatus {
                    id: distress.id.clone(),
                    location: distress.location,
                    deduction: distress.deduction,
                    cost_local: distress.cost_local,
                    method,
                });
            }
        } else {
            total_benefit = selected
                .iter()
                .map(|&i| self.catalog.actions[i].benefit)
                .sum();
        }

        MaintenancePlan {
            actions,
            distresses,
            resurfacing_cost,
            local_repair_cost,
            total_cost: resurfacing_cost + local_repair_cost,
            total_benefit,
        }
    }

    /// Condition benefit attributable to one action in isolation.
    ///
    /// With a distress model this is the sum of deductions the action's
    /// extent covers; without one it is the action's intrinsic gain. The
    /// repair operator ranks selected items by `benefit / cost` with this.
    pub(crate) fn covered_benefit(&self, action_idx: usize) -> f64 {
        let action = &self.catalog.actions[action_idx];
        if self.catalog.has_distress_model() {
            self.catalog
                .distresses
                .iter()
                .filter(|d| action.covers(d.location))
                .map(|d| d.deduction)
                .sum()
        } else {
            action.benefit
        }
    }

    /// Whether any selected action covers `location`.
    fn is_covered(&self, selected: &[usize], location: f64) -> bool {
        selected
            .iter()
            .any(|&i| self.catalog.actions[i].covers(location))
    }

    /// Number of overlapping pairs among the selected actions' extents.
    fn overlap_pairs(&self, selected: &[usize]) -> usize {
        let mut pairs = 0;
        for (a, &i) in selected.iter().enumerate() {
            let Some(ei) = self.catalog.actions[i].extent else {
                continue;
            };
            for &j in &selected[a + 1..] {
                let Some(ej) = self.catalog.actions[j].extent else {
                    continue;
                };
                if ei.overlaps(&ej) {
                    pairs += 1;
                }
            }
        }
        pairs
    }
}
