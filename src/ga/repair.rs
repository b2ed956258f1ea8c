//! Feasibility repair for offspring.
//!
//! Applied after variation, before an offspring enters the next population,
//! in configurations that demand strict feasibility. Two deterministic
//! passes:
//!
//! 1. **Overlap resolution**: repeatedly scan selected extents pairwise and
//!    deselect the costlier of an overlapping pair (tie: the later index),
//!    bounded at [`MAX_OVERLAP_PASSES`] scans.
//! 2. **Budget resolution**: while cost exceeds budget, deselect selected
//!    items in ascending benefit-per-cost order, worst first. Explicit
//!    local-repair bits participate alongside actions, so the pass can
//!    always reach feasibility (the empty selection costs nothing).
//!
//! Both passes only clear bits. A repaired chromosome is a fixed point:
//! repairing it again changes nothing.

use std::cmp::Ordering;

use super::chromosome::Chromosome;
use super::problem::MaintenanceProblem;

/// Upper bound on overlap-resolution scans.
const MAX_OVERLAP_PASSES: usize = 50;

/// Restores feasibility of a chromosome with respect to extent overlap and
/// budget. Deterministic for a given chromosome and problem.
pub fn repair(chromosome: &mut Chromosome, problem: &MaintenanceProblem) {
    resolve_overlaps(chromosome, problem);
    enforce_budget(chromosome, problem);
}

/// Deselects the costlier action of every overlapping selected pair until
/// the selection is overlap-free (or the pass bound is hit).
fn resolve_overlaps(chromosome: &mut Chromosome, problem: &MaintenanceProblem) {
    let actions = &problem.catalog.actions;
    let n_actions = actions.len();

    for _ in 0..MAX_OVERLAP_PASSES {
        let mut changed = false;

        for i in 0..n_actions {
            let Some(ei) = actions[i].extent else {
                continue;
            };
            for j in (i + 1)..n_actions {
                if !chromosome.get(i) {
                    break;
                }
                if !chromosome.get(j) {
                    continue;
                }
                let Some(ej) = actions[j].extent else {
                    continue;
                };
                if ei.overlaps(&ej) {
                    // Tie on cost drops the later index
                    if actions[i].cost > actions[j].cost {
                        chromosome.set(i, false);
                    } else {
                        chromosome.set(j, false);
                    }
                    changed = true;
                }
            }
        }

        if !changed {
            return;
        }
    }
}

/// Deselects items worst-efficiency-first until the total cost fits the
/// budget.
fn enforce_budget(chromosome: &mut Chromosome, problem: &MaintenanceProblem) {
    let mut cost = problem.evaluate(chromosome).cost;
    if cost <= problem.budget {
        return;
    }

    let n_actions = problem.catalog.actions.len();

    // (genome index, benefit/cost); ascending, ties by index via stable sort
    let mut order: Vec<(usize, f64)> = Vec::new();
    for i in 0..n_actions {
        if chromosome.get(i) {
            let action_cost = problem.catalog.actions[i].cost;
            let efficiency = if action_cost > 0.0 {
                problem.covered_benefit(i) / action_cost
            } else {
                f64::INFINITY
            };
            order.push((i, efficiency));
        }
    }
    for (j, distress) in problem.catalog.distresses.iter().enumerate() {
        let idx = n_actions + j;
        if chromosome.get(idx) {
            let efficiency = if distress.cost_local > 0.0 {
                distress.deduction / distress.cost_local
            } else {
                f64::INFINITY
            };
            order.push((idx, efficiency));
        }
    }
    order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    // Cost is re-derived after every removal: dropping a segment can expose
    // a distress whose explicit bit then incurs its local cost.
    for (idx, _) in order {
        if cost <= problem.budget {
            break;
        }
        chromosome.set(idx, false);
        cost = problem.evaluate(chromosome).cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Catalog, Distress};

    fn bits(v: &[u8]) -> Chromosome {
        Chromosome::from_bits(v.iter().map(|&b| b == 1).collect())
    }

    fn overlapping_problem() -> MaintenanceProblem {
        // S1 [0,300] and S2 [200,500] overlap; S3 [500,800] is clear
        let catalog = Catalog::new(vec![
            Action::segment("S1", 0.0, 300.0, 9000.0),
            Action::segment("S2", 200.0, 500.0, 14000.0),
            Action::segment("S3", 500.0, 800.0, 11000.0),
        ])
        .with_distresses(vec![
            Distress::new("D1", 100.0, 20.0, 400.0),
            Distress::new("D2", 420.0, 30.0, 600.0),
            Distress::new("D3", 700.0, 25.0, 500.0),
        ]);
        MaintenanceProblem::new(catalog, 25_000.0)
    }

    #[test]
    fn test_overlap_drops_costlier() {
        let problem = overlapping_problem();
        let mut ch = bits(&[1, 1, 0, 0, 0, 0]);
        repair(&mut ch, &problem);

        // S2 (14000) is costlier than S1 (9000)
        assert!(ch.get(0));
        assert!(!ch.get(1));
        assert_eq!(problem.evaluate(&ch).overlap_pairs, 0);
    }

    #[test]
    fn test_overlap_tie_drops_second() {
        let catalog = Catalog::new(vec![
            Action::segment("A", 0.0, 100.0, 5000.0),
            Action::segment("B", 50.0, 150.0, 5000.0),
        ]);
        let problem = MaintenanceProblem::new(catalog, 100_000.0);
        let mut ch = bits(&[1, 1]);
        repair(&mut ch, &problem);

        assert!(ch.get(0));
        assert!(!ch.get(1));
    }

    #[test]
    fn test_budget_drops_worst_efficiency_first() {
        let problem = overlapping_problem();
        // S1 (20/9000) and S3 (25/11000) selected: cost 20000, fine.
        // Tighten budget so only one fits; S1 is less efficient per cost
        // (0.00222) than S3 (0.00227).
        let tight = MaintenanceProblem::new(problem.catalog.clone(), 12_000.0);
        let mut ch = bits(&[1, 0, 1, 0, 0, 0]);
        repair(&mut ch, &tight);

        assert!(!ch.get(0));
        assert!(ch.get(2));
        assert!(tight.evaluate(&ch).cost <= 12_000.0);
    }

    #[test]
    fn test_budget_can_drop_local_repairs() {
        let problem = overlapping_problem();
        // Only explicit repairs selected; budget below their sum
        let tight = MaintenanceProblem::new(problem.catalog.clone(), 1000.0);
        let mut ch = bits(&[0, 0, 0, 1, 1, 1]);
        repair(&mut ch, &tight);

        assert!(tight.evaluate(&ch).cost <= 1000.0);
    }

    #[test]
    fn test_infeasible_budget_empties_selection() {
        let problem = overlapping_problem();
        let impossible = MaintenanceProblem::new(problem.catalog.clone(), 0.0);
        let mut ch = bits(&[1, 1, 1, 1, 1, 1]);
        repair(&mut ch, &impossible);

        assert_eq!(ch.count_set(), 0);
        assert_eq!(impossible.evaluate(&ch).cost, 0.0);
    }

    #[test]
    fn test_feasible_chromosome_untouched() {
        let problem = overlapping_problem();
        let ch = bits(&[1, 0, 1, 0, 1, 0]);
        let mut repaired = ch.clone();
        repair(&mut repaired, &problem);
        assert_eq!(repaired, ch);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn repaired_is_overlap_free(raw in prop::collection::vec(any::<bool>(), 6)) {
                let problem = overlapping_problem();
                let mut ch = Chromosome::from_bits(raw);
                repair(&mut ch, &problem);
                prop_assert_eq!(problem.evaluate(&ch).overlap_pairs, 0);
            }

            #[test]
            fn repaired_fits_budget(raw in prop::collection::vec(any::<bool>(), 6)) {
                let problem = MaintenanceProblem::new(
                    overlapping_problem().catalog,
                    10_000.0,
                );
                let mut ch = Chromosome::from_bits(raw);
                repair(&mut ch, &problem);
                prop_assert!(problem.evaluate(&ch).cost <= problem.budget);
            }

            #[test]
            fn repair_is_idempotent(raw in prop::collection::vec(any::<bool>(), 6)) {
                let problem = MaintenanceProblem::new(
                    overlapping_problem().catalog,
                    10_000.0,
                );
                let mut once = Chromosome::from_bits(raw);
                repair(&mut once, &problem);
                let mut twice = once.clone();
                repair(&mut twice, &problem);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
