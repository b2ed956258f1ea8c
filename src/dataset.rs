//! Published case-study data.
//!
//! Inputs reproduced from the pavement-maintenance case study in
//! *Applied Sciences* 15, 10094 (2025): the surveyed distress table, the
//! resurfacing cost-per-length schedule, and a candidate-segment generator
//! that proposes one segment per efficient length centered on each
//! distress. Used as the default catalog by the CLI and the benchmarks.

use crate::models::{Action, Catalog, Distress};

/// Surveyed road length (m).
const ROAD_LENGTH_M: f64 = 12_000.0;

/// Distress survey rows: (index, km, offset within km, local repair cost).
const DISTRESSES_RAW: [(u32, f64, f64, f64); 20] = [
    (1, 3.0, 772.0, 454.0),
    (2, 10.0, 529.0, 210.0),
    (3, 9.0, 728.0, 567.0),
    (4, 1.0, 324.0, 186.0),
    (5, 7.0, 212.0, 435.0),
    (6, 3.0, 595.0, 163.0),
    (7, 7.0, 595.0, 260.0),
    (8, 1.0, 107.0, 589.0),
    (9, 10.0, 692.0, 635.0),
    (10, 5.0, 349.0, 366.0),
    (11, 11.0, 516.0, 410.0),
    (12, 3.0, 675.0, 385.0),
    (13, 2.0, 648.0, 517.0),
    (14, 6.0, 479.0, 210.0),
    (15, 8.0, 295.0, 367.0),
    (16, 6.0, 918.0, 199.0),
    (17, 11.0, 183.0, 594.0),
    (18, 5.0, 903.0, 436.0),
    (19, 9.0, 296.0, 564.0),
    (20, 10.0, 132.0, 200.0),
];

/// Resurfacing cost by segment length (m).
const COST_BY_LENGTH: [(f64, f64); 16] = [
    (5.0, 6400.0),
    (10.0, 7700.0),
    (15.0, 9033.0),
    (20.0, 10_267.0),
    (25.0, 11_333.0),
    (30.0, 12_567.0),
    (35.0, 15_733.0),
    (40.0, 17_000.0),
    (45.0, 18_233.0),
    (50.0, 19_467.0),
    (100.0, 31_000.0),
    (150.0, 43_333.0),
    (200.0, 56_000.0),
    (250.0, 68_000.0),
    (300.0, 80_333.0),
    (350.0, 93_333.0),
];

/// Segment lengths worth proposing: short for spot coverage, long for
/// broad coverage. A subset of the cost schedule.
const CANDIDATE_LENGTHS: [f64; 10] = [
    5.0, 10.0, 15.0, 20.0, 30.0, 50.0, 100.0, 150.0, 200.0, 300.0,
];

/// Deduction estimate used by the study: local repair cost / 20, rounded
/// to two decimals.
fn estimate_deduction(cost_local: f64) -> f64 {
    (cost_local / 20.0 * 100.0).round() / 100.0
}

/// Resurfacing cost for an exact length from the schedule.
fn cost_for_length(length: f64) -> Option<f64> {
    COST_BY_LENGTH
        .iter()
        .find(|&&(l, _)| l == length)
        .map(|&(_, cost)| cost)
}

/// The 20 surveyed distresses, with absolute locations.
pub fn case_study_distresses() -> Vec<Distress> {
    DISTRESSES_RAW
        .iter()
        .map(|&(idx, km, offset, cost_local)| {
            Distress::new(
                format!("D{idx}"),
                km * 1000.0 + offset,
                estimate_deduction(cost_local),
                cost_local,
            )
        })
        .collect()
}

/// Candidate resurfacing segments: one per candidate length centered on
/// each distress, clamped to the road, de-duplicated within 10 m of start
/// and 1 m of length.
pub fn case_study_segments() -> Vec<Action> {
    let distresses = case_study_distresses();
    let mut segments: Vec<Action> = Vec::new();
    let mut next_id = 1u32;

    for &length in &CANDIDATE_LENGTHS {
        let cost = cost_for_length(length).expect("candidate lengths come from the schedule");

        for distress in &distresses {
            let mut start = (distress.location - length / 2.0).max(0.0);
            let mut end = start + length;
            if end > ROAD_LENGTH_M {
                start = ROAD_LENGTH_M - length;
                end = ROAD_LENGTH_M;
            }
            if start < 0.0 {
                continue;
            }

            let duplicate = segments.iter().any(|existing| {
                let extent = existing.extent.expect("case-study segments have extents");
                (extent.start - start).abs() < 10.0 && (extent.length() - length).abs() < 1.0
            });
            if duplicate {
                continue;
            }

            segments.push(Action::segment(format!("S{next_id}"), start, end, cost));
            next_id += 1;
        }
    }

    segments
}

/// The complete case-study catalog.
pub fn case_study_catalog() -> Catalog {
    Catalog::new(case_study_segments()).with_distresses(case_study_distresses())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distress_table() {
        let distresses = case_study_distresses();
        assert_eq!(distresses.len(), 20);

        // D1: km 3 + 772 m, cost 454, deduction 454/20 = 22.7
        assert_eq!(distresses[0].id, "D1");
        assert_eq!(distresses[0].location, 3772.0);
        assert!((distresses[0].deduction - 22.7).abs() < 1e-9);
        assert_eq!(distresses[0].cost_local, 454.0);
    }

    #[test]
    fn test_deduction_rounding() {
        // 163 / 20 = 8.15
        assert!((estimate_deduction(163.0) - 8.15).abs() < 1e-9);
        // 567 / 20 = 28.35
        assert!((estimate_deduction(567.0) - 28.35).abs() < 1e-9);
    }

    #[test]
    fn test_cost_schedule_lookup() {
        assert_eq!(cost_for_length(5.0), Some(6400.0));
        assert_eq!(cost_for_length(300.0), Some(80_333.0));
        assert_eq!(cost_for_length(7.0), None);
    }

    #[test]
    fn test_segments_within_road() {
        let segments = case_study_segments();
        assert!(!segments.is_empty());

        for segment in &segments {
            let extent = segment.extent.unwrap();
            assert!(extent.start >= 0.0);
            assert!(extent.end <= ROAD_LENGTH_M);
            assert!(extent.length() > 0.0);
            assert!(segment.cost > 0.0);
        }
    }

    #[test]
    fn test_segments_deduplicated() {
        let segments = case_study_segments();
        for (a, sa) in segments.iter().enumerate() {
            let ea = sa.extent.unwrap();
            for sb in &segments[a + 1..] {
                let eb = sb.extent.unwrap();
                let near_dup = (ea.start - eb.start).abs() < 10.0
                    && (ea.length() - eb.length()).abs() < 1.0;
                assert!(!near_dup, "{} and {} are near-duplicates", sa.id, sb.id);
            }
        }
    }

    #[test]
    fn test_catalog_is_valid() {
        let catalog = case_study_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.distresses.len(), 20);
        assert_eq!(
            catalog.genome_length(),
            catalog.actions.len() + 20
        );
    }

    #[test]
    fn test_every_distress_coverable() {
        let catalog = case_study_catalog();
        for distress in &catalog.distresses {
            assert!(
                catalog
                    .actions
                    .iter()
                    .any(|a| a.covers(distress.location)),
                "distress {} has no covering candidate",
                distress.id
            );
        }
    }
}
