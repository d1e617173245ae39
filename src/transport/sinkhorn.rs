use crate::*;

/// Entropic optimal transport via log-domain Sinkhorn iteration.
///
/// # Algorithm
///
/// Potentials are kept in units of the temperature, so the plan is
/// `π(x, y) = exp(lhs(x) + rhs(y) - c(x, y) / ε)`:
/// 1. Start from zero potentials
/// 2. Alternately rescale LHS and RHS so each marginal is met in turn
/// 3. Stop when the LHS marginal violation falls below tolerance
///
/// After each RHS update the target marginal holds exactly, so the L1
/// violation of the source marginal is the whole error.
///
/// # Regularization
///
/// - Lower temperature → sharper coupling, slower convergence
/// - Higher temperature → smoother coupling, faster convergence
pub struct Sinkhorn<'a> {
    /// Ground cost between source and target rows.
    ground: &'a Ground,
    /// Source marginal.
    mu: &'a Marginal,
    /// Target marginal.
    nu: &'a Marginal,
    /// LHS potential (dual variable).
    lhs: Vec<Entropy>,
    /// RHS potential (dual variable).
    rhs: Vec<Entropy>,
    temperature: Entropy,
    iterations: usize,
    tolerance: Energy,
    /// iterations actually run
    steps: usize,
    /// last marginal violation
    error: Energy,
}

impl<'a> Sinkhorn<'a> {
    pub fn new(mu: &'a Marginal, nu: &'a Marginal, ground: &'a Ground, config: &SolveConfig) -> Self {
        Self {
            ground,
            mu,
            nu,
            lhs: vec![0.; mu.n()],
            rhs: vec![0.; nu.n()],
            temperature: config.epsilon,
            iterations: config.max_iterations,
            tolerance: config.threshold,
            steps: 0,
            error: Energy::INFINITY,
        }
    }
    pub fn converged(&self) -> bool {
        self.error < self.tolerance
    }
    pub fn steps(&self) -> usize {
        self.steps
    }
    pub fn error(&self) -> Energy {
        self.error
    }
    /// Dense transport plan.
    pub fn plan(&self) -> Matrix {
        Matrix::from_fn(self.mu.n(), self.nu.n(), |x, y| self.coupling(x, y))
    }

    /// Runs Sinkhorn iteration until convergence or the iteration cap.
    fn sinkhorn(&mut self) {
        for t in 0..self.iterations {
            self.lhs = self.lhs();
            self.rhs = self.rhs();
            self.steps = t + 1;
            self.error = self.violation();
            if self.converged() {
                break;
            }
        }
        log::trace!(
            "sinkhorn stopped after {} steps with violation {:.2e}",
            self.steps,
            self.error
        );
    }
    /// Computes updated LHS potential via Sinkhorn scaling.
    fn lhs(&self) -> Vec<Entropy> {
        (0..self.mu.n())
            .map(|x| {
                self.mu.density(&x).ln()
                    - Self::softmax((0..self.nu.n()).map(|y| self.rhs[y] - self.regularization(x, y)))
            })
            .collect()
    }
    /// Computes updated RHS potential via Sinkhorn scaling.
    fn rhs(&self) -> Vec<Entropy> {
        (0..self.nu.n())
            .map(|y| {
                self.nu.density(&y).ln()
                    - Self::softmax((0..self.mu.n()).map(|x| self.lhs[x] - self.regularization(x, y)))
            })
            .collect()
    }
    /// L1 violation of the source marginal under the current potentials.
    fn violation(&self) -> Energy {
        (0..self.mu.n())
            .map(|x| (0..self.nu.n()).map(|y| self.coupling(x, y)).sum::<Energy>() - self.mu.density(&x))
            .map(Energy::abs)
            .sum()
    }
    /// Computes coupling mass at (x, y) from potentials.
    fn coupling(&self, x: usize, y: usize) -> Energy {
        (self.lhs[x] + self.rhs[y] - self.regularization(x, y)).exp()
    }
    /// Regularized cost: distance / temperature.
    fn regularization(&self, x: usize, y: usize) -> Entropy {
        self.ground.distance(&x, &y) / self.temperature
    }
    /// Stable log-sum-exp; empty or all -∞ inputs give -∞.
    fn softmax(xs: impl Iterator<Item = Entropy> + Clone) -> Entropy {
        let max = xs.clone().fold(Entropy::NEG_INFINITY, Entropy::max);
        match max.is_finite() {
            false => max,
            true => max + xs.map(|e| (e - max).exp()).sum::<Entropy>().ln(),
        }
    }
}

impl Coupling for Sinkhorn<'_> {
    type X = usize;
    type Y = usize;
    type M = Ground;
    type P = Marginal;
    type Q = Marginal;

    fn minimize(mut self) -> Self {
        self.sinkhorn();
        self
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self.coupling(*x, *y)
    }
    fn cost(&self) -> Energy {
        self.mu
            .support()
            .flat_map(|x| self.nu.support().map(move |y| (x, y)))
            .map(|(x, y)| self.flow(&x, &y) * self.ground.distance(&x, &y))
            .inspect(|e| debug_assert!(e.is_finite()))
            .sum::<Energy>()
    }
}

impl<'a> From<(&'a Marginal, &'a Marginal, &'a Ground)> for Sinkhorn<'a> {
    fn from((mu, nu, ground): (&'a Marginal, &'a Marginal, &'a Ground)) -> Self {
        Self::new(mu, nu, ground, &SolveConfig::default())
    }
}
