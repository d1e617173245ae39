//! Tagged cost specification and preparation of pairwise optimal transport problems.
//!
//! A [`ProblemRegistry`] owns one [`ProblemInstance`] per ordered pair of
//! labelled distributions. Preparing the registry resolves, for every pair and
//! every term (`xy`, `x`, `y`), a [`Tagged`] cost representation from raw
//! features, a callback, a user matrix, a graph or a precomputed block.
//! Solving hands those representations to a [`Solver`].

pub mod callbacks;
pub mod cost;
pub mod data;
pub mod error;
pub mod problems;
pub mod transport;

pub use callbacks::*;
pub use cost::*;
pub use data::*;
pub use error::*;
pub use problems::*;
pub use transport::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Costs, distances, objective values and marginal violations.
pub type Energy = f64;
/// Entropic regularization strengths and log-domain potentials.
pub type Entropy = f64;
/// Marginal weights and coupling mass.
pub type Probability = f64;
/// Dense row-major storage used for features, embeddings and cost blocks.
pub type Matrix = nalgebra::DMatrix<f64>;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and toy datasets.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// SINKHORN OPTIMAL TRANSPORT
// Entropy-regularized transport on costs rescaled per `ScaleCost`.
// ============================================================================
/// Entropy regularization strength. Lower = sharper coupling, slower convergence.
pub const SINKHORN_TEMPERATURE: Entropy = 0.1;
/// Maximum Sinkhorn-Knopp iterations before stopping.
pub const SINKHORN_ITERATIONS: usize = 2000;
/// Early stopping threshold on L1 marginal constraint violation.
pub const SINKHORN_TOLERANCE: Energy = 1e-3;

// ============================================================================
// GROMOV-WASSERSTEIN
// Quadratic terms are solved by repeated linearization around the current plan.
// ============================================================================
/// Outer linearization steps for quadratic and fused problems.
pub const GROMOV_ITERATIONS: usize = 20;
/// Weight of the quadratic term in fused problems.
pub const FUSED_ALPHA: Probability = 0.5;

// ============================================================================
// CALLBACK DEFAULTS
// ============================================================================
/// Components kept by the local-pca callback.
pub const LOCAL_PCA_COMPONENTS: usize = 30;
/// Neighbors per node in the graph-construction callback.
pub const GRAPH_NEIGHBORS: usize = 15;
/// Embedding holding spatial coordinates.
pub const SPATIAL_KEY: &str = "spatial";
/// Relative disagreement allowed between mirrored adjacency weights.
pub const SYMMETRY_TOLERANCE: Energy = 1e-9;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Install a terminal logger plus a timestamped file logger under `logs/`.
/// The file always records DEBUG; the terminal records INFO unless `verbose`.
#[cfg(feature = "cli")]
pub fn log(verbose: bool) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let level = match verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    };
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/pairwise-{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
