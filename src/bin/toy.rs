//! Toy Binary
//!
//! Builds uniform random partitions, registers pairwise problems over them,
//! prepares and solves every pair, and prints a JSON summary per pair.
//!
//! Options: --sizes, --features, --kind, --policy, --prepare, --solve, --threads

use anyhow::Context;
use clap::Parser;
use pairwise_ot::*;
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Prepare and solve pairwise transport problems on toy data", long_about = None)]
struct Args {
    /// Rows per partition; one partition per entry.
    #[arg(long, value_delimiter = ',', default_value = "50,40,45")]
    sizes: Vec<usize>,
    /// Feature width shared by every partition.
    #[arg(long, default_value_t = 10)]
    features: usize,
    /// linear, quadratic or fused.
    #[arg(long, default_value = "linear")]
    kind: String,
    /// sequential, triu, tril or star:<label>.
    #[arg(long, default_value = "sequential")]
    policy: String,
    /// JSON file with the preparation configuration.
    #[arg(long)]
    prepare: Option<std::path::PathBuf>,
    /// JSON file with the solver configuration.
    #[arg(long)]
    solve: Option<std::path::PathBuf>,
    /// Worker threads; all cores when absent.
    #[arg(long)]
    threads: Option<usize>,
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Serialize)]
struct Row<'a> {
    key: &'a Key,
    xy: Option<String>,
    x: Option<String>,
    y: Option<String>,
    cost: Energy,
    converged: bool,
    iterations: usize,
}

fn read<T: serde::de::DeserializeOwned + Default>(path: Option<&std::path::Path>) -> anyhow::Result<T> {
    match path {
        None => Ok(T::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.verbose);
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.unwrap_or_else(num_cpus::get))
        .build_global()?;
    let kind = Kind::try_from(args.kind.as_str())?;
    let policy = args.policy.parse::<Policy>()?;
    let prepare = read::<PrepareConfig>(args.prepare.as_deref())?;
    let solve = read::<SolveConfig>(args.solve.as_deref())?;

    let ref mut rng = rand::rng();
    let mut dataset = Dataset::new();
    for (i, n) in args.sizes.iter().enumerate() {
        dataset.insert(Partition::uniform(&format!("t{}", i), *n, args.features, rng))?;
    }

    let mut registry = ProblemRegistry::new(dataset, kind, &policy)?;
    let prepared = registry.prepare(&prepare)?;
    let solved = registry.solve_pairs(&prepared.succeeded, &Entropic, &solve)?;
    for (key, error) in prepared.failed.iter().chain(solved.failed.iter()) {
        log::error!("{:<32}{}", key.to_string(), error);
    }

    let rows = registry
        .problems()
        .filter_map(|problem| {
            problem.solution().map(|solution| Row {
                key: problem.key(),
                xy: problem.xy().map(ToString::to_string),
                x: problem.x().map(ToString::to_string),
                y: problem.y().map(ToString::to_string),
                cost: solution.cost(),
                converged: solution.converged(),
                iterations: solution.iterations(),
            })
        })
        .collect::<Vec<Row>>();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    match prepared.is_complete() && solved.is_complete() {
        true => Ok(()),
        false => anyhow::bail!(
            "{} pairs failed",
            prepared.failed.len() + solved.failed.len()
        ),
    }
}
