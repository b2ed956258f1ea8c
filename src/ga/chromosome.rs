//! Bit-vector chromosome and its variation operators.
//!
//! # Encoding
//!
//! One bit per catalog action, followed by one explicit-repair bit per
//! distress when a distress model is supplied. Bit i = 1 selects action i;
//! bit `n_actions + j` = 1 requests a dedicated local repair of distress j.
//! The length is fixed for the lifetime of a run.

use rand::Rng;

/// A candidate selection of maintenance actions and explicit local repairs.
///
/// Hashable by content so fitness evaluations can be memoized per run:
/// identical bit patterns always yield identical fitness for a fixed
/// catalog and parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Creates a chromosome from raw bits.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Creates a random chromosome with each bit set independently with
    /// probability `density`.
    ///
    /// Densities are kept sparse by configuration: most budgets cannot fund
    /// selecting every action, so dense initial populations waste early
    /// generations on infeasible extremes.
    pub fn random<R: Rng>(len: usize, density: f64, rng: &mut R) -> Self {
        let bits = (0..len).map(|_| rng.random_bool(density)).collect();
        Self { bits }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the chromosome has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether bit `i` is set.
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// Sets bit `i`.
    pub fn set(&mut self, i: usize, value: bool) {
        self.bits[i] = value;
    }

    /// Splits into the action-selection and explicit-repair halves.
    pub fn split(&self, n_actions: usize) -> (&[bool], &[bool]) {
        self.bits.split_at(n_actions)
    }

    /// Indices of set bits among the first `n_actions` positions.
    pub fn selected_actions(&self, n_actions: usize) -> Vec<usize> {
        self.bits[..n_actions]
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Number of set bits.
    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// One-point crossover: a single cut point in `[1, len - 1]`, tails
/// exchanged, producing two children.
///
/// With fewer than 2 bits there is no interior cut point and the parents
/// are returned as copies.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn one_point_crossover<R: Rng>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = p1.len();
    assert_eq!(n, p2.len(), "parents must have equal length");

    if n < 2 {
        return (p1.clone(), p2.clone());
    }

    let point = rng.random_range(1..n);
    let mut c1 = p1.bits.clone();
    let mut c2 = p2.bits.clone();
    c1[point..].copy_from_slice(&p2.bits[point..]);
    c2[point..].copy_from_slice(&p1.bits[point..]);

    (Chromosome::from_bits(c1), Chromosome::from_bits(c2))
}

/// Independent per-bit flip mutation: every bit flips with probability
/// `rate`.
pub fn flip_mutation<R: Rng>(chromosome: &mut Chromosome, rate: f64, rng: &mut R) {
    for bit in &mut chromosome.bits {
        if rng.random_bool(rate) {
            *bit = !*bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_length_and_sparsity() {
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = Chromosome::random(1000, 0.1, &mut rng);

        assert_eq!(ch.len(), 1000);
        // ~100 expected; generous bounds to stay deterministic-safe
        let set = ch.count_set();
        assert!(set > 40 && set < 200, "expected sparse init, got {set} set bits");
    }

    #[test]
    fn test_zero_density_is_empty_selection() {
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = Chromosome::random(50, 0.0, &mut rng);
        assert_eq!(ch.count_set(), 0);
    }

    #[test]
    fn test_split_and_selected_actions() {
        let ch = Chromosome::from_bits(vec![true, false, true, false, true]);
        let (actions, locals) = ch.split(3);
        assert_eq!(actions, &[true, false, true]);
        assert_eq!(locals, &[false, true]);
        assert_eq!(ch.selected_actions(3), vec![0, 2]);
    }

    #[test]
    fn test_crossover_preserves_length_and_material() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = Chromosome::from_bits(vec![true; 10]);
        let p2 = Chromosome::from_bits(vec![false; 10]);

        let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);
        assert_eq!(c1.len(), 10);
        assert_eq!(c2.len(), 10);
        // Tails exchanged: set-bit counts are complementary
        assert_eq!(c1.count_set() + c2.count_set(), 10);
        // A real cut happened: neither child equals a parent
        assert!(c1.count_set() > 0 && c1.count_set() < 10);
    }

    #[test]
    fn test_crossover_single_bit_copies() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = Chromosome::from_bits(vec![true]);
        let p2 = Chromosome::from_bits(vec![false]);

        let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_mutation_rate_one_flips_everything() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = Chromosome::from_bits(vec![true, false, true, false]);
        flip_mutation(&mut ch, 1.0, &mut rng);
        assert_eq!(ch, Chromosome::from_bits(vec![false, true, false, true]));
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = SmallRng::seed_from_u64(42);
        let original = Chromosome::from_bits(vec![true, false, true, false]);
        let mut ch = original.clone();
        flip_mutation(&mut ch, 0.0, &mut rng);
        assert_eq!(ch, original);
    }

    #[test]
    fn test_mutation_preserves_length() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut ch = Chromosome::random(64, 0.2, &mut rng);
        flip_mutation(&mut ch, 0.5, &mut rng);
        assert_eq!(ch.len(), 64);
    }
}
