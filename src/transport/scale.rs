use serde::Deserialize;
use serde::Serialize;

/// Normalization applied to a materialized cost before solving.
///
/// Entropic regularization is relative to the scale of the cost, so the
/// same `epsilon` behaves alike across problems once costs are rescaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleCost {
    /// Leave the cost untouched.
    Unit,
    /// Divide by the largest entry.
    Max,
    /// Divide by the mean entry.
    #[default]
    Mean,
    /// Divide by the median entry.
    Median,
}

impl ScaleCost {
    /// Divisor for the given entries; 1 when the statistic is not positive.
    pub fn factor(&self, values: &[f64]) -> f64 {
        let factor = match self {
            Self::Unit => 1.,
            Self::Max => values.iter().copied().fold(0., f64::max),
            Self::Mean => values.iter().sum::<f64>() / values.len().max(1) as f64,
            Self::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                sorted.get(sorted.len() / 2).copied().unwrap_or(1.)
            }
        };
        match factor > 0. {
            true => factor,
            false => 1.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors() {
        let xs = [0., 1., 2., 5.];
        assert_eq!(ScaleCost::Unit.factor(&xs), 1.);
        assert_eq!(ScaleCost::Max.factor(&xs), 5.);
        assert_eq!(ScaleCost::Mean.factor(&xs), 2.);
        assert_eq!(ScaleCost::Median.factor(&xs), 2.);
        assert_eq!(ScaleCost::Max.factor(&[0., 0.]), 1.);
    }
}
