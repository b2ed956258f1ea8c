use std::path::PathBuf;
use std::process;

use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::EnvFilter;

use roadworks::dataset;
use roadworks::ga::{FitnessPolicy, GaConfig, GaResult, LocalCostPolicy, MaintenanceProblem};
use roadworks::loader;
use roadworks::models::{Catalog, RepairMethod};
use roadworks::Error;

/// Road-maintenance planning optimizer.
///
/// Picks the set of resurfacing segments and local spot repairs that
/// restores the most pavement condition within the budget, using a genetic
/// algorithm. Runs on the published case-study catalog unless CSV inputs
/// are provided.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Segment CSV (id,start_m,end_m,cost_resurfacing)
    #[arg(long, requires = "distresses")]
    segments: Option<PathBuf>,

    /// Distress CSV (id,location_m,deduction,cost_local)
    #[arg(long, requires = "segments")]
    distresses: Option<PathBuf>,

    /// Maintenance budget
    #[arg(long, default_value_t = 150_000.0)]
    budget: f64,

    /// Population size
    #[arg(long, default_value_t = 50)]
    pop_size: usize,

    /// Number of generations
    #[arg(long, default_value_t = 100)]
    generations: usize,

    /// Crossover probability
    #[arg(long, default_value_t = 0.8)]
    crossover_rate: f64,

    /// Per-bit mutation probability
    #[arg(long, default_value_t = 0.05)]
    mutation_rate: f64,

    /// Penalty weight per unit of budget overshoot
    #[arg(long, default_value_t = 0.5)]
    lambda_budget: f64,

    /// Penalty weight per overlapping segment pair
    #[arg(long, default_value_t = 1000.0)]
    lambda_overlap: f64,

    /// Reject infeasible solutions outright and repair offspring, instead
    /// of penalizing violations
    #[arg(long)]
    strict: bool,

    /// Charge a set local-repair bit even when resurfacing already covers
    /// the distress
    #[arg(long)]
    charge_covered_repairs: bool,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> roadworks::Result<()> {
    let catalog = load_catalog(cli)?;

    let fitness_policy = if cli.strict {
        FitnessPolicy::HardReject
    } else {
        FitnessPolicy::Penalty {
            lambda_budget: cli.lambda_budget,
            lambda_overlap: cli.lambda_overlap,
        }
    };
    let local_cost_policy = if cli.charge_covered_repairs {
        LocalCostPolicy::Always
    } else {
        LocalCostPolicy::UncoveredOnly
    };

    let problem = MaintenanceProblem::new(catalog, cli.budget)
        .with_fitness_policy(fitness_policy)
        .with_local_cost_policy(local_cost_policy);

    let mut config = GaConfig::default()
        .with_population_size(cli.pop_size)
        .with_generations(cli.generations)
        .with_crossover_rate(cli.crossover_rate)
        .with_mutation_rate(cli.mutation_rate)
        .with_repair(cli.strict);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = roadworks::GaRunner::run(&problem, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result).expect("result serializes"));
    } else {
        render(&result, cli.budget);
    }
    Ok(())
}

fn load_catalog(cli: &Cli) -> roadworks::Result<Catalog> {
    match (&cli.segments, &cli.distresses) {
        (Some(segments), Some(distresses)) => {
            Ok(Catalog::new(loader::segments_from_path(segments)?)
                .with_distresses(loader::distresses_from_path(distresses)?))
        }
        (None, None) => Ok(dataset::case_study_catalog()),
        // clap's `requires` rules make the mixed cases unreachable
        _ => Err(Error::InvalidParameter(
            "--segments and --distresses must be given together".into(),
        )),
    }
}

fn render(result: &GaResult, budget: f64) {
    println!();
    println!("Best fitness     {:.3}", result.best_fitness);
    println!("Total cost       {:.2} (budget {budget:.2})", result.total_cost);
    println!("Total benefit    {:.2}", result.total_benefit);
    println!("Generations      {}", result.generations);
    println!("Seed             {}", result.seed);
    if result.degenerate {
        println!("Note: no feasible solution with positive benefit was found.");
    }

    let plan = &result.plan;
    println!();
    println!(
        "Chosen actions ({}), resurfacing cost {:.2}:",
        plan.actions.len(),
        plan.resurfacing_cost
    );
    let mut actions = Table::new();
    actions.load_preset(UTF8_FULL);
    actions.set_header(vec!["ID", "Start (m)", "End (m)", "Length (m)", "Cost"]);
    for action in &plan.actions {
        match action.extent {
            Some(extent) => actions.add_row(vec![
                action.id.clone(),
                format!("{:.1}", extent.start),
                format!("{:.1}", extent.end),
                format!("{:.1}", extent.length()),
                format!("{:.2}", action.cost),
            ]),
            None => actions.add_row(vec![
                action.id.clone(),
                "-".into(),
                "-".into(),
                "-".into(),
                format!("{:.2}", action.cost),
            ]),
        };
    }
    println!("{actions}");

    if !plan.distresses.is_empty() {
        println!();
        println!(
            "Distresses: {} by resurfacing, {} by local repair ({:.2}), {} unrepaired:",
            plan.count(RepairMethod::Resurfacing),
            plan.count(RepairMethod::LocalRepair),
            plan.local_repair_cost,
            plan.count(RepairMethod::NotRepaired)
        );
        let mut distresses = Table::new();
        distresses.load_preset(UTF8_FULL);
        distresses.set_header(vec!["ID", "Location (m)", "Deduction", "Local cost", "Method"]);
        for status in &plan.distresses {
            distresses.add_row(vec![
                status.id.clone(),
                format!("{:.1}", status.location),
                format!("{:.2}", status.deduction),
                format!("{:.2}", status.cost_local),
                status.method.to_string(),
            ]);
        }
        println!("{distresses}");
    }
}
