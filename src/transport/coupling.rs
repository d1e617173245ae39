use super::density::Density;
use super::measure::Measure;
use super::support::Support;
use crate::Energy;

/// A transport plan (coupling) between two probability distributions.
///
/// A joint distribution π(x, y) whose marginals match the source distribution
/// P and target distribution Q.
///
/// # Algorithm Contract
///
/// Implementations must ensure that after [`minimize`](Coupling::minimize) is
/// called, [`flow`](Coupling::flow) reads the optimized plan and
/// [`cost`](Coupling::cost) returns its objective.
pub trait Coupling {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Ground cost the plan is optimized against.
    type M: Measure<X = Self::X, Y = Self::Y>;
    /// Source marginal.
    type P: Density<Support = Self::X>;
    /// Target marginal.
    type Q: Density<Support = Self::Y>;
    /// Optimizes the coupling.
    fn minimize(self) -> Self;
    /// Mass transported from `x` to `y`.
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Energy;
    /// Objective value of the current plan.
    fn cost(&self) -> Energy;
}
