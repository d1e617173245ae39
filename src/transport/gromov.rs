use crate::*;

/// Entropic Gromov-Wasserstein transport with square loss.
///
/// Matches the internal geometry of the source (`x`) and target (`y`)
/// costs. Each outer step linearizes the quadratic objective around the
/// current plan and solves the resulting linear problem with [`Sinkhorn`]:
///
/// ```text
/// L(T) = (Cx ∘ Cx) p 1ᵀ + 1 qᵀ (Cy ∘ Cy)ᵀ - 2 Cx T Cyᵀ
/// ```
///
/// With a linear `xy` cost the problem is fused and the step solves
/// `(1 - α) Cxy + α L(T)` instead.
pub struct Gromov<'a> {
    x: &'a Ground,
    y: &'a Ground,
    xy: Option<&'a Ground>,
    mu: &'a Marginal,
    nu: &'a Marginal,
    config: &'a SolveConfig,
    plan: Matrix,
    steps: usize,
    error: Energy,
    converged: bool,
}

impl<'a> Gromov<'a> {
    pub fn new(
        mu: &'a Marginal,
        nu: &'a Marginal,
        x: &'a Ground,
        y: &'a Ground,
        config: &'a SolveConfig,
    ) -> Self {
        Self {
            x,
            y,
            xy: None,
            mu,
            nu,
            config,
            plan: mu.vector() * nu.vector().transpose(),
            steps: 0,
            error: Energy::INFINITY,
            converged: false,
        }
    }
    /// Adds a linear term, making the problem fused.
    pub fn fused(mut self, xy: &'a Ground) -> Self {
        self.xy = Some(xy);
        self
    }
    pub fn plan(&self) -> &Matrix {
        &self.plan
    }
    pub fn converged(&self) -> bool {
        self.converged
    }
    /// Total inner Sinkhorn iterations.
    pub fn steps(&self) -> usize {
        self.steps
    }
    pub fn error(&self) -> Energy {
        self.error
    }

    /// Quadratic loss linearized around `plan`.
    fn linearize(&self, plan: &Matrix) -> Matrix {
        let cx = self.x.matrix();
        let cy = self.y.matrix();
        let p = cx.component_mul(cx) * self.mu.vector();
        let q = cy.component_mul(cy) * self.nu.vector();
        let cross = cx * plan * cy.transpose();
        Matrix::from_fn(self.mu.n(), self.nu.n(), |i, j| {
            p[i] + q[j] - 2. * cross[(i, j)]
        })
    }
    /// Cost of the linear subproblem solved at each outer step.
    fn objective(&self, plan: &Matrix) -> Matrix {
        let quadratic = self.linearize(plan);
        match self.xy {
            None => quadratic,
            Some(xy) => xy.matrix() * (1. - self.config.alpha) + quadratic * self.config.alpha,
        }
    }
    /// Outer loop. Stops once the inner problem is solved and either the
    /// plan or the objective stops moving.
    fn gromov(&mut self) {
        let mut previous = self.cost();
        for t in 0..self.config.outer_iterations {
            let ref ground = Ground::from(self.objective(&self.plan));
            let sinkhorn = Sinkhorn::new(self.mu, self.nu, ground, self.config).minimize();
            let next = sinkhorn.plan();
            let delta = (&next - &self.plan).abs().sum();
            self.plan = next;
            self.steps += sinkhorn.steps();
            self.error = sinkhorn.error();
            let current = self.cost();
            let settled = (previous - current).abs() <= self.config.threshold * current.abs().max(1.);
            self.converged = sinkhorn.converged() && (delta < self.config.threshold || settled);
            log::trace!(
                "gromov step {:>3} changed plan by {:.2e}, objective by {:.2e}",
                t,
                delta,
                (previous - current).abs()
            );
            previous = current;
            if self.converged {
                break;
            }
        }
    }
}

impl Coupling for Gromov<'_> {
    type X = usize;
    type Y = usize;
    type M = Ground;
    type P = Marginal;
    type Q = Marginal;

    fn minimize(mut self) -> Self {
        self.gromov();
        self
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self.plan[(*x, *y)]
    }
    /// Fused objective at the current plan. The quadratic part is
    /// `Σ L(T)ᵢⱼ Tᵢⱼ`, which equals the square-loss distortion.
    fn cost(&self) -> Energy {
        self.objective(&self.plan).component_mul(&self.plan).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internal(p: &Partition) -> Ground {
        let c = Cost::SqEuclidean.pairwise(p.features(), p.features()).unwrap();
        Ground::scaled(c, ScaleCost::Mean).unwrap()
    }

    #[test]
    fn plan_keeps_marginals() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 10, 2, rng);
        let b = Partition::uniform("b", 8, 2, rng);
        let (ref x, ref y) = (internal(&a), internal(&b));
        let (ref mu, ref nu) = (Marginal::uniform(10), Marginal::uniform(8));
        let ref config = SolveConfig::default();
        let gromov = Gromov::new(mu, nu, x, y, config).minimize();
        let plan = gromov.plan();
        assert!((plan.sum() - 1.).abs() < 1e-3);
        for j in 0..8 {
            assert!((plan.column(j).sum() - 1. / 8.).abs() < 1e-9);
        }
        assert!(gromov.steps() > 0);
        assert!(gromov.cost().is_finite());
        assert!(gromov.converged());
    }

    #[test]
    fn fused_problems_converge_under_defaults() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 12, 3, rng);
        let b = Partition::uniform("b", 12, 3, rng);
        let (ref x, ref y) = (internal(&a), internal(&b));
        let c = Cost::SqEuclidean.pairwise(a.features(), b.features()).unwrap();
        let ref xy = Ground::scaled(c, ScaleCost::Mean).unwrap();
        let ref mu = Marginal::uniform(12);
        let ref config = SolveConfig::default();
        let gromov = Gromov::new(mu, mu, x, y, config).fused(xy).minimize();
        assert!(gromov.converged());
        assert!(gromov.cost().is_finite());
    }

    #[test]
    fn isometric_spaces_distort_less_than_independent_coupling() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 12, 2, rng);
        let ref x = internal(&a);
        let ref mu = Marginal::uniform(12);
        let ref config = SolveConfig::default();
        let gromov = Gromov::new(mu, mu, x, x, config);
        let before = gromov.cost();
        let after = gromov.minimize().cost();
        assert!(after <= before, "{} > {}", after, before);
    }
}
