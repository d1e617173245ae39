use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Read-only view of a prepared problem handed to a [`Solver`].
pub struct Prepared<'a> {
    pub key: &'a Key,
    pub kind: Kind,
    pub xy: Option<&'a Tagged>,
    pub x: Option<&'a Tagged>,
    pub y: Option<&'a Tagged>,
    /// Source marginal.
    pub a: &'a Marginal,
    /// Target marginal.
    pub b: &'a Marginal,
}

impl Prepared<'_> {
    /// The resolved representation of `term`, or an error naming it.
    pub fn term(&self, term: Term) -> Result<&Tagged> {
        match term {
            Term::XY => self.xy,
            Term::X => self.x,
            Term::Y => self.y,
        }
        .ok_or_else(|| Error::Solver(format!("{} has no {} term", self.key, term)))
    }
}

/// Turns a prepared problem into a coupling.
///
/// Implementations are invoked from several threads at once, one problem
/// per call, and must not depend on the order in which problems are solved.
pub trait Solver: Sync {
    fn solve(&self, problem: &Prepared<'_>, config: &SolveConfig) -> Result<Solution>;
}

/// Solver hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Entropic regularization on the scaled cost.
    pub epsilon: Entropy,
    /// Weight of the quadratic term in fused problems.
    pub alpha: Probability,
    /// Sinkhorn iteration cap.
    pub max_iterations: usize,
    /// Convergence threshold on marginal violation and outer plan change.
    pub threshold: Energy,
    /// Linearization steps for quadratic and fused problems.
    pub outer_iterations: usize,
    pub scale_cost: ScaleCost,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            epsilon: SINKHORN_TEMPERATURE,
            alpha: FUSED_ALPHA,
            max_iterations: SINKHORN_ITERATIONS,
            threshold: SINKHORN_TOLERANCE,
            outer_iterations: GROMOV_ITERATIONS,
            scale_cost: ScaleCost::default(),
        }
    }
}

impl SolveConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.) {
            return Err(Error::conflict(format!("epsilon must be positive, got {}", self.epsilon)));
        }
        if !(0. ..=1.).contains(&self.alpha) {
            return Err(Error::conflict(format!("alpha must lie in [0, 1], got {}", self.alpha)));
        }
        Ok(())
    }
}

/// Reference solver: Sinkhorn for linear problems, entropic
/// Gromov-Wasserstein for quadratic and fused ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Entropic;

impl Entropic {
    fn ground(problem: &Prepared<'_>, term: Term, config: &SolveConfig) -> Result<Ground> {
        Ground::scaled(problem.term(term)?.materialize()?, config.scale_cost)
    }
}

impl Solver for Entropic {
    fn solve(&self, problem: &Prepared<'_>, config: &SolveConfig) -> Result<Solution> {
        config.validate()?;
        let (a, b) = (problem.a, problem.b);
        match problem.kind {
            Kind::Linear => {
                let ref xy = Self::ground(problem, Term::XY, config)?;
                let sinkhorn = Sinkhorn::new(a, b, xy, config).minimize();
                Ok(Solution::new(
                    sinkhorn.plan(),
                    sinkhorn.cost(),
                    sinkhorn.converged(),
                    sinkhorn.steps(),
                    sinkhorn.error(),
                ))
            }
            Kind::Quadratic | Kind::Fused => {
                let ref x = Self::ground(problem, Term::X, config)?;
                let ref y = Self::ground(problem, Term::Y, config)?;
                let xy = match problem.kind {
                    Kind::Fused => Some(Self::ground(problem, Term::XY, config)?),
                    _ => None,
                };
                let gromov = match xy {
                    Some(ref xy) => Gromov::new(a, b, x, y, config).fused(xy),
                    None => Gromov::new(a, b, x, y, config),
                }
                .minimize();
                Ok(Solution::new(
                    gromov.plan().clone(),
                    gromov.cost(),
                    gromov.converged(),
                    gromov.steps(),
                    gromov.error(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let config = serde_json::from_str::<SolveConfig>(r#"{"epsilon": 0.05, "scale_cost": "max"}"#).unwrap();
        assert_eq!(config.epsilon, 0.05);
        assert_eq!(config.scale_cost, ScaleCost::Max);
        assert_eq!(config.max_iterations, SINKHORN_ITERATIONS);
    }

    #[test]
    fn config_rejects_bad_hyperparameters() {
        let config = SolveConfig {
            alpha: 1.5,
            ..SolveConfig::default()
        };
        assert!(config.validate().is_err());
        let config = SolveConfig {
            epsilon: 0.,
            ..SolveConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
