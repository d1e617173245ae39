use super::support::Support;
use crate::Energy;

/// Ground cost between elements of two support spaces.
///
/// The cost of moving one unit of mass from `x` in the source space to `y`
/// in the target space. Source and target are row indices of different
/// partitions for linear terms, and of the same partition for quadratic ones.
pub trait Measure {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Returns the cost of transporting mass from `x` to `y`.
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy;
}
