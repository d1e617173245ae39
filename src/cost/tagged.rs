use crate::*;

/// An immutable cost representation for one term of one problem.
///
/// Construction enforces the tag's invariants:
/// - `PointCloud` carries two arrays of equal feature width
/// - `CostMatrix` carries a matrix
/// - `Graph` carries a graph, square over its node set
/// - `Custom` carries anything
///
/// and rejects cost functions the tag cannot use. Whether the representation
/// fits a particular problem is checked separately by [`Tagged::conform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    payload: Payload,
    tag: Tag,
    cost: Option<Cost>,
}

impl Tagged {
    pub fn new(payload: Payload, tag: Tag, cost: Option<Cost>) -> Result<Self> {
        match (tag, &payload) {
            (Tag::PointCloud, Payload::Points(x, y)) if x.ncols() != y.ncols() => {
                return Err(Error::shape(
                    "point cloud features",
                    (y.nrows(), x.ncols()),
                    y.shape(),
                ));
            }
            (Tag::PointCloud, Payload::Points(..)) => {}
            (Tag::CostMatrix, Payload::Matrix(..)) => {}
            (Tag::Graph, Payload::Graph(..)) => {}
            (Tag::Custom, _) => {}
            (tag, payload) => {
                return Err(Error::conflict(format!(
                    "{} payload cannot be tagged {}",
                    payload.kind(),
                    tag
                )));
            }
        }
        if let Some(cost) = cost {
            if !cost.supports(tag) {
                return Err(Error::UnknownCost(format!("{} for {}", cost, tag)));
            }
        }
        Ok(Self { payload, tag, cost })
    }
    pub fn point_cloud(x: Matrix, y: Matrix, cost: Cost) -> Result<Self> {
        Self::new(Payload::Points(x, y), Tag::PointCloud, Some(cost))
    }
    pub fn cost_matrix(values: Matrix) -> Result<Self> {
        Self::new(Payload::Matrix(values), Tag::CostMatrix, None)
    }
    pub fn graph(adjacency: Adjacency) -> Result<Self> {
        Self::new(Payload::Graph(adjacency), Tag::Graph, Some(Cost::Geodesic))
    }
    /// Re-tags with a cost function, validated against the tag.
    pub fn with_cost(self, cost: Cost) -> Result<Self> {
        Self::new(self.payload, self.tag, Some(cost))
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
    pub fn tag(&self) -> Tag {
        self.tag
    }
    pub fn cost(&self) -> Option<Cost> {
        self.cost
    }
    pub fn shape(&self) -> (usize, usize) {
        self.payload.shape()
    }

    /// Checks that the representation describes `expected` (source rows, target rows).
    pub fn conform(&self, context: &str, expected: (usize, usize)) -> Result<()> {
        match self.shape() == expected {
            true => Ok(()),
            false => Err(Error::shape(context, expected, self.shape())),
        }
    }

    /// Dense cost matrix, source rows × target rows.
    pub fn materialize(&self) -> Result<Matrix> {
        match (self.tag, &self.payload) {
            (Tag::PointCloud, Payload::Points(x, y)) => self.cost.unwrap_or_default().pairwise(x, y),
            (Tag::CostMatrix, Payload::Matrix(m)) => Ok(m.clone()),
            (Tag::Graph, Payload::Graph(adj)) => adj.geodesic(),
            (tag, _) => Err(Error::conflict(format!(
                "{} representations are opaque to cost materialization",
                tag
            ))),
        }
    }
}

impl std::fmt::Display for Tagged {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (n, m) = self.shape();
        match self.cost {
            Some(cost) => write!(f, "{}[{}x{}; {}]", self.tag, n, m, cost),
            None => write!(f, "{}[{}x{}]", self.tag, n, m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_cloud_accepts_matching_width() {
        let t = Tagged::point_cloud(Matrix::zeros(50, 10), Matrix::zeros(40, 10), Cost::default());
        let t = t.unwrap();
        assert_eq!(t.tag(), Tag::PointCloud);
        assert_eq!(t.shape(), (50, 40));
        assert_eq!(t.cost(), Some(Cost::SqEuclidean));
    }

    #[test]
    fn point_cloud_rejects_mismatched_width() {
        let t = Tagged::point_cloud(Matrix::zeros(50, 10), Matrix::zeros(40, 12), Cost::default());
        assert!(matches!(t, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn incompatible_cost_is_unknown() {
        let t = Tagged::new(
            Payload::Points(Matrix::zeros(2, 2), Matrix::zeros(2, 2)),
            Tag::PointCloud,
            Some(Cost::Geodesic),
        );
        assert!(matches!(t, Err(Error::UnknownCost(_))));
        let t = Tagged::new(Payload::Matrix(Matrix::zeros(2, 3)), Tag::Custom, None).unwrap();
        assert!(matches!(t.with_cost(Cost::Euclidean), Err(Error::UnknownCost(_))));
    }

    #[test]
    fn cost_matrix_keeps_cost_as_label() {
        let values = Matrix::from_row_slice(2, 2, &[0., 1., 2., 3.]);
        let t = Tagged::cost_matrix(values.clone()).unwrap();
        let t = t.with_cost(Cost::SqEuclidean).unwrap();
        assert_eq!(t.tag(), Tag::CostMatrix);
        assert_eq!(t.cost(), Some(Cost::SqEuclidean));
        assert_eq!(t.materialize().unwrap(), values);
    }

    #[test]
    fn payload_must_match_tag() {
        let t = Tagged::new(Payload::Matrix(Matrix::zeros(2, 2)), Tag::Graph, None);
        assert!(matches!(t, Err(Error::ConfigConflict(_))));
        let t = Tagged::new(Payload::Matrix(Matrix::zeros(2, 2)), Tag::Custom, None);
        assert!(t.is_ok());
    }

    #[test]
    fn conform_checks_problem_rows() {
        let t = Tagged::cost_matrix(Matrix::zeros(5, 4)).unwrap();
        assert!(t.conform("xy", (5, 4)).is_ok());
        assert!(matches!(
            t.conform("xy", (4, 5)),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn custom_is_not_materialized() {
        let t = Tagged::new(Payload::Matrix(Matrix::zeros(2, 2)), Tag::Custom, None).unwrap();
        assert!(t.materialize().is_err());
    }
}
