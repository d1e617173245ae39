use super::support::Support;
use crate::Probability;

/// A discrete probability distribution over a support set.
///
/// Provides the mass at each atom and iteration over the atoms that carry
/// positive mass. Sinkhorn only reads marginals through this trait.
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the probability mass at `x`, or 0 if not in the support.
    fn density(&self, x: &Self::Support) -> Probability;
    /// Iterates over all atoms with positive mass.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
}
