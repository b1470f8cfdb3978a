use boxpush::{
    ActionCatalog, Configuration, Expander, Level, SearchOptions, SolveResult, Solver, Strategy,
};
use clap::{Parser, ValueEnum};
use std::rc::Rc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyType {
    Bfs,
    Dfs,
}

impl From<StrategyType> for Strategy {
    fn from(strategy: StrategyType) -> Self {
        match strategy {
            StrategyType::Bfs => Strategy::BreadthFirst,
            StrategyType::Dfs => Strategy::DepthFirst,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CatalogType {
    /// Pushes and pulls move the box the way the agent steps
    Canonical,
    /// Every push and pull direction pair
    Pairs,
}

impl From<CatalogType> for ActionCatalog {
    fn from(catalog: CatalogType) -> Self {
        match catalog {
            CatalogType::Canonical => ActionCatalog::canonical(),
            CatalogType::Pairs => ActionCatalog::all_pairs(),
        }
    }
}

fn print_solution(level: &Level, plan: &[Rc<Configuration>]) {
    println!("\nStarting position:\n{}", level.root.render(&level.geometry));
    let total = plan.len();
    for (count, node) in plan.iter().enumerate() {
        let Some(action) = node.action() else {
            continue;
        };
        println!(
            "{} ({}/{}):\n{}",
            action,
            count + 1,
            total,
            node.render(&level.geometry)
        );
    }
}

#[derive(Parser)]
#[command(name = "boxpush")]
#[command(about = "Solve a single-agent push/pull box puzzle", long_about = None)]
struct Args {
    /// Path to the level file
    #[arg(value_name = "FILE")]
    level_file: String,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Maximum number of nodes to explore before giving up
    #[arg(short = 'n', long, default_value = "5000000")]
    max_nodes_explored: usize,

    /// Search strategy
    #[arg(short = 's', long, value_enum, default_value = "bfs")]
    strategy: StrategyType,

    /// Action catalog used for expansion
    #[arg(short = 'c', long, value_enum, default_value = "canonical")]
    catalog: CatalogType,

    /// Seed for the successor-order shuffle
    #[arg(long, default_value = "2")]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let level = match Level::from_file(&args.level_file) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error loading level: {}", e);
            std::process::exit(1);
        }
    };

    let opts = SearchOptions {
        strategy: args.strategy.into(),
        max_nodes_explored: args.max_nodes_explored,
        seed: args.seed,
    };
    let expander = Expander::new(Rc::clone(&level.geometry), args.catalog.into());
    let mut solver = Solver::new(expander, opts);

    let start = Instant::now();
    let result = solver.solve(Rc::clone(&level.root));
    let elapsed_ms = start.elapsed().as_millis();

    let (solved_char, solution_len) = match &result {
        SolveResult::Solved(plan) => ('Y', plan.len()),
        SolveResult::Cutoff => ('N', 0),
        SolveResult::Impossible => ('X', 0),
    };

    println!(
        "solved: {}  steps: {:<5}  explored: {:<12}  generated: {:<12}  elapsed: {} ms",
        solved_char,
        solution_len,
        solver.nodes_explored(),
        solver.nodes_generated(),
        elapsed_ms
    );

    if let SolveResult::Solved(plan) = result {
        if args.print_solution {
            print_solution(&level, &plan);
        } else {
            for node in &plan {
                if let Some(action) = node.action() {
                    println!("{}", action);
                }
            }
        }
    }
}
