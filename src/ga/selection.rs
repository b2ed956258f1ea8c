//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

/// Tournament selection over a fitness slice: draw `k` indices uniformly at
/// random with replacement, return the index with the strictly highest
/// fitness. Ties keep the first-seen contestant.
///
/// Higher `k` = stronger selection pressure (k=2 light, k=3–5 moderate,
/// k>5 risks premature convergence). The source population is never
/// mutated; callers clone the winner.
///
/// # Panics
/// Panics if `fitnesses` is empty.
pub fn tournament<R: Rng>(fitnesses: &[f64], k: usize, rng: &mut R) -> usize {
    assert!(!fitnesses.is_empty(), "cannot select from empty population");

    let k = k.max(1);
    let n = fitnesses.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitnesses[idx] > fitnesses[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_tournament_favors_best() {
        let fitnesses = [1.0, 5.0, 35.0, 8.0];
        let mut rng = SmallRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10_000;
        for _ in 0..n {
            counts[tournament(&fitnesses, 4, &mut rng)] += 1;
        }
        // Index 2 (fitness 35) should dominate
        assert!(
            counts[2] > 6000,
            "expected best selected >60% of the time, got {}/{n}",
            counts[2]
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let fitnesses = [1.0, 5.0, 35.0, 8.0];
        let mut rng = SmallRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[tournament(&fitnesses, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_equal_fitness_roughly_uniform() {
        let fitnesses = [5.0; 4];
        let mut rng = SmallRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[tournament(&fitnesses, 2, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform ties, got {counts:?}");
        }
    }

    #[test]
    fn test_single_individual() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(tournament(&[5.0], 3, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = SmallRng::seed_from_u64(42);
        tournament(&[], 3, &mut rng);
    }
}
