use crate::*;

/// Raw data behind a [`Tagged`] representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Source and target feature arrays, one row per observation.
    Points(Matrix, Matrix),
    /// A dense matrix, source rows × target rows.
    Matrix(Matrix),
    /// A weighted graph over the rows.
    Graph(Adjacency),
}

impl Payload {
    /// Rows described on each side: (source rows, target rows).
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Points(x, y) => (x.nrows(), y.nrows()),
            Self::Matrix(m) => m.shape(),
            Self::Graph(adj) => adj.shape(),
        }
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Points(..) => "points",
            Self::Matrix(..) => "matrix",
            Self::Graph(..) => "graph",
        }
    }
}
