use crate::*;

/// Normalized weights over the rows of one partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Marginal(Vec<Probability>);

impl Marginal {
    /// Equal mass on every row.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1. / n.max(1) as Probability; n])
    }
    /// Normalizes user weights. Weights must be finite, non-negative and not all zero.
    pub fn weights(name: &str, weights: &[f64]) -> Result<Self> {
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.) {
            return Err(Error::InvalidMarginal(format!("{}: weight {} is not a mass", name, w)));
        }
        let total = weights.iter().sum::<f64>();
        if total <= 0. {
            return Err(Error::InvalidMarginal(format!("{}: weights sum to zero", name)));
        }
        Ok(Self(weights.iter().map(|w| w / total).collect()))
    }
    pub fn n(&self) -> usize {
        self.0.len()
    }
    pub fn as_slice(&self) -> &[Probability] {
        &self.0
    }
    /// Column vector view for matrix products.
    pub fn vector(&self) -> nalgebra::DVector<Probability> {
        nalgebra::DVector::from_column_slice(&self.0)
    }
}

impl Density for Marginal {
    type Support = usize;
    fn density(&self, x: &Self::Support) -> Probability {
        self.0.get(*x).copied().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > 0.)
            .map(|(x, _)| x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_normalized() {
        let m = Marginal::weights("a", &[1., 3., 0.]).unwrap();
        assert_eq!(m.as_slice(), &[0.25, 0.75, 0.]);
        assert_eq!(m.support().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(m.density(&7), 0.);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        assert!(Marginal::weights("a", &[1., -1.]).is_err());
        assert!(Marginal::weights("a", &[0., 0.]).is_err());
        assert!(Marginal::weights("a", &[f64::NAN]).is_err());
    }
}
