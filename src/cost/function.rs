use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Cost-function identifier understood by the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    #[default]
    SqEuclidean,
    Euclidean,
    Cosine,
    Geodesic,
}

impl Cost {
    /// Whether this function may be attached to a payload with this tag.
    /// Cost matrices carry any identifier as a label; their values are used as they are.
    pub fn supports(&self, tag: Tag) -> bool {
        match (self, tag) {
            (Self::SqEuclidean | Self::Euclidean | Self::Cosine, Tag::PointCloud) => true,
            (Self::Geodesic, Tag::Graph) => true,
            (_, Tag::CostMatrix) => true,
            _ => false,
        }
    }
    /// Pairwise cost between the rows of `x` and the rows of `y`.
    pub fn pairwise(&self, x: &Matrix, y: &Matrix) -> Result<Matrix> {
        if x.ncols() != y.ncols() {
            return Err(Error::shape(
                "point cloud features",
                (y.nrows(), x.ncols()),
                y.shape(),
            ));
        }
        match self {
            Self::SqEuclidean => Ok(Matrix::from_fn(x.nrows(), y.nrows(), |i, j| {
                Self::squared(x, i, y, j)
            })),
            Self::Euclidean => Ok(Matrix::from_fn(x.nrows(), y.nrows(), |i, j| {
                Self::squared(x, i, y, j).sqrt()
            })),
            Self::Cosine => Ok(Matrix::from_fn(x.nrows(), y.nrows(), |i, j| {
                let norm = x.row(i).norm() * y.row(j).norm();
                match norm > 0. {
                    true => 1. - x.row(i).dot(&y.row(j)) / norm,
                    false => 1.,
                }
            })),
            Self::Geodesic => Err(Error::UnknownCost(format!(
                "{} over {}",
                self,
                Tag::PointCloud
            ))),
        }
    }
    fn squared(x: &Matrix, i: usize, y: &Matrix, j: usize) -> Energy {
        x.row(i)
            .iter()
            .zip(y.row(j).iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl TryFrom<&str> for Cost {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sq_euclidean" | "sqeuclidean" | "squared_euclidean" => Ok(Self::SqEuclidean),
            "euclidean" => Ok(Self::Euclidean),
            "cosine" => Ok(Self::Cosine),
            "geodesic" => Ok(Self::Geodesic),
            _ => Err(Error::UnknownCost(s.to_string())),
        }
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::SqEuclidean => write!(f, "sq_euclidean"),
            Self::Euclidean => write!(f, "euclidean"),
            Self::Cosine => write!(f, "cosine"),
            Self::Geodesic => write!(f, "geodesic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_only() {
        assert_eq!(Cost::try_from("sq_euclidean").unwrap(), Cost::SqEuclidean);
        assert_eq!(Cost::try_from("Geodesic").unwrap(), Cost::Geodesic);
        assert!(matches!(
            Cost::try_from("manhattan"),
            Err(Error::UnknownCost(_))
        ));
    }

    #[test]
    fn pairwise_costs() {
        let x = Matrix::from_row_slice(2, 2, &[0., 0., 1., 0.]);
        let y = Matrix::from_row_slice(1, 2, &[0., 2.]);
        let sq = Cost::SqEuclidean.pairwise(&x, &y).unwrap();
        assert_eq!(sq.shape(), (2, 1));
        assert_eq!(sq[(0, 0)], 4.);
        assert_eq!(sq[(1, 0)], 5.);
        let l2 = Cost::Euclidean.pairwise(&x, &y).unwrap();
        assert_eq!(l2[(0, 0)], 2.);
        let cos = Cost::Cosine.pairwise(&x, &y).unwrap();
        assert_eq!(cos[(0, 0)], 1.);
        assert!((cos[(1, 0)] - 1.).abs() < 1e-12);
    }

    #[test]
    fn pairwise_rejects_width_mismatch() {
        let x = Matrix::zeros(3, 2);
        let y = Matrix::zeros(3, 4);
        assert!(matches!(
            Cost::SqEuclidean.pairwise(&x, &y),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
