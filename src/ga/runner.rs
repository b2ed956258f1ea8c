//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete run: validation → sparse
//! initialization → evaluation → (elitism → selection → crossover →
//! mutation → optional repair) per generation, tracking the best-ever
//! individual and the fitness history.

use std::cmp::Ordering;
use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::models::MaintenancePlan;

use super::chromosome::{flip_mutation, one_point_crossover, Chromosome};
use super::config::GaConfig;
use super::problem::{Evaluation, MaintenanceProblem};
use super::repair::repair;
use super::selection::tournament;

/// Result of one optimization run.
///
/// Always reports the best individual observed across *all* generations,
/// never the raw final population (which may by chance be worse than an
/// earlier peak).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Fitness of the best individual found.
    pub best_fitness: f64,
    /// Total spend of the best individual.
    pub total_cost: f64,
    /// Total restored condition of the best individual.
    pub total_benefit: f64,
    /// Decoded domain-level plan for the best individual.
    pub plan: MaintenancePlan,
    /// Best-so-far fitness after the initial evaluation and after each
    /// generation: monotone non-decreasing, length `generations + 1`.
    pub fitness_history: Vec<f64>,
    /// Number of generations executed.
    pub generations: usize,
    /// True when no feasible individual with positive fitness was ever
    /// observed: a stochastic search may legitimately fail to find a
    /// feasible point for an impossible budget. The run still completes.
    pub degenerate: bool,
    /// The seed that drove the run. Reusing it reproduces the run exactly.
    pub seed: u64,
}

/// Executes the GA evolutionary loop.
///
/// One `run()` owns its population, RNG, and fitness memo cache; nothing
/// survives between independent runs except the returned [`GaResult`].
pub struct GaRunner;

impl GaRunner {
    /// Runs the optimization.
    ///
    /// Validates the configuration and problem up front and fails fast with
    /// a descriptive error; after the loop starts, every per-generation
    /// operation is total.
    pub fn run(problem: &MaintenanceProblem, config: &GaConfig) -> Result<GaResult> {
        config.validate()?;
        problem.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);
        let genome_length = problem.genome_length();

        debug!(
            seed,
            genome_length,
            population = config.population_size,
            generations = config.generations,
            "starting GA run"
        );

        // Run-scoped memo cache, dropped with this function
        let mut cache: HashMap<Chromosome, Evaluation> = HashMap::new();

        // 1. Sparse initial population
        let mut population: Vec<Chromosome> = (0..config.population_size)
            .map(|_| Chromosome::random(genome_length, config.init_density, &mut rng))
            .collect();
        let mut evals = evaluate_all(&mut cache, problem, &population);

        // 2. Best of the initial population
        let best_idx = best_index(&evals);
        let mut best = population[best_idx].clone();
        let mut best_eval = evals[best_idx];

        let mut history = Vec::with_capacity(config.generations + 1);
        history.push(best_eval.fitness);

        let elite_count = config.elite_count();

        // 3. Evolutionary loop
        for gen in 0..config.generations {
            let fitnesses: Vec<f64> = evals.iter().map(|e| e.fitness).collect();

            // Elites: best-first index order, ties keep first-seen
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| {
                fitnesses[b]
                    .partial_cmp(&fitnesses[a])
                    .unwrap_or(Ordering::Equal)
            });
            let mut next_gen: Vec<Chromosome> = order[..elite_count]
                .iter()
                .map(|&i| population[i].clone())
                .collect();

            // Offspring fill the remainder
            while next_gen.len() < config.population_size {
                let p1 = tournament(&fitnesses, config.tournament_size, &mut rng);
                let p2 = tournament(&fitnesses, config.tournament_size, &mut rng);

                let (mut c1, mut c2) = if rng.random_bool(config.crossover_rate) {
                    one_point_crossover(&population[p1], &population[p2], &mut rng)
                } else {
                    (population[p1].clone(), population[p2].clone())
                };

                flip_mutation(&mut c1, config.mutation_rate, &mut rng);
                flip_mutation(&mut c2, config.mutation_rate, &mut rng);

                if config.repair {
                    repair(&mut c1, problem);
                    repair(&mut c2, problem);
                }

                next_gen.push(c1);
                if next_gen.len() < config.population_size {
                    next_gen.push(c2);
                }
            }

            population = next_gen;
            evals = evaluate_all(&mut cache, problem, &population);

            // Strict improvement only: equal fitness never replaces the
            // incumbent
            for (i, eval) in evals.iter().enumerate() {
                if eval.fitness > best_eval.fitness {
                    best_eval = *eval;
                    best = population[i].clone();
                }
            }
            history.push(best_eval.fitness);

            trace!(
                generation = gen + 1,
                best_fitness = best_eval.fitness,
                cached = cache.len(),
                "generation complete"
            );
        }

        let degenerate = !best_eval.feasible || best_eval.fitness <= 0.0;
        debug!(
            best_fitness = best_eval.fitness,
            total_cost = best_eval.cost,
            degenerate,
            evaluated = cache.len(),
            "GA run finished"
        );

        let plan = problem.decode(&best);
        Ok(GaResult {
            best_fitness: best_eval.fitness,
            total_cost: best_eval.cost,
            total_benefit: best_eval.benefit,
            plan,
            fitness_history: history,
            generations: config.generations,
            degenerate,
            seed,
        })
    }
}

/// Evaluates every chromosome, memoizing by bit pattern.
fn evaluate_all(
    cache: &mut HashMap<Chromosome, Evaluation>,
    problem: &MaintenanceProblem,
    population: &[Chromosome],
) -> Vec<Evaluation> {
    population
        .iter()
        .map(|chromosome| {
            if let Some(eval) = cache.get(chromosome) {
                *eval
            } else {
                let eval = problem.evaluate(chromosome);
                cache.insert(chromosome.clone(), eval);
                eval
            }
        })
        .collect()
}

/// Index of the highest-fitness evaluation, first-seen on ties.
fn best_index(evals: &[Evaluation]) -> usize {
    let mut best = 0;
    for (i, eval) in evals.iter().enumerate().skip(1) {
        if eval.fitness > evals[best].fitness {
            best = i;
        }
    }
    best
}
