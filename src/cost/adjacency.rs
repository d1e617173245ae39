use crate::*;
use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Weighted undirected graph over the rows of one or two partitions.
///
/// The first `sources` nodes are source rows. A *square* graph covers a single
/// partition (`sources == n`); a *joint* graph covers source rows followed by
/// target rows, and its geodesic cost is the source × target block.
#[derive(Debug, Clone)]
pub struct Adjacency {
    graph: UnGraph<(), Energy>,
    sources: usize,
}

impl Adjacency {
    /// Graph over a single partition.
    pub fn square(graph: UnGraph<(), Energy>) -> Self {
        let sources = graph.node_count();
        Self { graph, sources }
    }
    /// Graph over source rows followed by target rows.
    pub fn joint(graph: UnGraph<(), Energy>, sources: usize) -> Result<Self> {
        if sources == 0 || sources >= graph.node_count() {
            return Err(Error::conflict(format!(
                "joint graph over {} nodes needs between 1 and {} source nodes, got {}",
                graph.node_count(),
                graph.node_count().saturating_sub(1),
                sources
            )));
        }
        Ok(Self { graph, sources })
    }
    /// Builds a graph from a dense symmetric adjacency; zero entries are missing edges.
    /// Mirrored entries must agree up to [`SYMMETRY_TOLERANCE`], relative to the larger one.
    pub fn from_dense(values: &Matrix, sources: usize) -> Result<Self> {
        let (n, m) = values.shape();
        if n != m {
            return Err(Error::shape("adjacency", (n, n), (n, m)));
        }
        let mut graph = UnGraph::with_capacity(n, 0);
        let nodes = (0..n).map(|_| graph.add_node(())).collect::<Vec<NodeIndex>>();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (values[(i, j)], values[(j, i)]);
                if !(a.is_finite() && b.is_finite() && a >= 0. && b >= 0.) {
                    return Err(Error::conflict(format!(
                        "adjacency weight at ({}, {}) must be finite and non-negative",
                        i, j
                    )));
                }
                if (a - b).abs() > SYMMETRY_TOLERANCE * a.max(b).max(1.) {
                    return Err(Error::conflict(format!(
                        "adjacency is not symmetric at ({}, {}): {} against {}",
                        i, j, a, b
                    )));
                }
                let w = a.max(b);
                if w > 0. {
                    graph.add_edge(nodes[i], nodes[j], w);
                }
            }
        }
        match sources == n {
            true => Ok(Self::square(graph)),
            false => Self::joint(graph, sources),
        }
    }

    pub fn graph(&self) -> &UnGraph<(), Energy> {
        &self.graph
    }
    /// node count
    pub fn n(&self) -> usize {
        self.graph.node_count()
    }
    pub fn sources(&self) -> usize {
        self.sources
    }
    pub fn is_joint(&self) -> bool {
        self.sources < self.n()
    }
    /// Rows described by the graph: (sources, targets), or (n, n) when square.
    pub fn shape(&self) -> (usize, usize) {
        match self.is_joint() {
            true => (self.sources, self.n() - self.sources),
            false => (self.n(), self.n()),
        }
    }

    /// Shortest-path lengths from every source node to every target node.
    pub fn geodesic(&self) -> Result<Matrix> {
        use rayon::iter::IntoParallelIterator;
        use rayon::iter::ParallelIterator;
        let (rows, cols) = self.shape();
        let offset = match self.is_joint() {
            true => self.sources,
            false => 0,
        };
        let distances = (0..rows)
            .into_par_iter()
            .map(|i| self.dijkstra(i, offset, cols))
            .collect::<Result<Vec<Vec<Energy>>>>()?;
        Ok(Matrix::from_fn(rows, cols, |i, j| distances[i][j]))
    }
    fn dijkstra(&self, from: usize, offset: usize, cols: usize) -> Result<Vec<Energy>> {
        let reached = petgraph::algo::dijkstra(&self.graph, NodeIndex::new(from), None, |e| {
            *e.weight()
        });
        (offset..offset + cols)
            .map(|to| {
                reached
                    .get(&NodeIndex::new(to))
                    .copied()
                    .ok_or(Error::Disconnected { from, to })
            })
            .collect()
    }
}

impl PartialEq for Adjacency {
    fn eq(&self, other: &Self) -> bool {
        self.sources == other.sources
            && self.n() == other.n()
            && self.graph.edge_count() == other.graph.edge_count()
            && self
                .graph
                .raw_edges()
                .iter()
                .zip(other.graph.raw_edges())
                .all(|(a, b)| {
                    a.source() == b.source() && a.target() == b.target() && a.weight == b.weight
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 - 1 - 2 path with unit weights
    fn path() -> Matrix {
        Matrix::from_row_slice(3, 3, &[0., 1., 0., 1., 0., 1., 0., 1., 0.])
    }

    #[test]
    fn square_geodesic_is_symmetric_path_length() {
        let adj = Adjacency::from_dense(&path(), 3).unwrap();
        assert!(!adj.is_joint());
        let d = adj.geodesic().unwrap();
        assert_eq!(d.shape(), (3, 3));
        assert_eq!(d[(0, 2)], 2.);
        assert_eq!(d[(2, 0)], 2.);
        assert_eq!(d[(1, 1)], 0.);
    }

    #[test]
    fn joint_geodesic_is_cross_block() {
        let adj = Adjacency::from_dense(&path(), 1).unwrap();
        assert_eq!(adj.shape(), (1, 2));
        let d = adj.geodesic().unwrap();
        assert_eq!(d.shape(), (1, 2));
        assert_eq!(d[(0, 0)], 1.);
        assert_eq!(d[(0, 1)], 2.);
    }

    #[test]
    fn disconnected_nodes_are_reported() {
        let adj = Adjacency::from_dense(&Matrix::zeros(2, 2), 1).unwrap();
        assert!(matches!(
            adj.geodesic(),
            Err(Error::Disconnected { from: 0, to: 1 })
        ));
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut m = path();
        m[(0, 1)] = -1.;
        assert!(Adjacency::from_dense(&m, 3).is_err());
    }

    #[test]
    fn nan_on_either_side_is_rejected() {
        for (i, j) in [(0, 1), (1, 0)] {
            let mut m = path();
            m[(i, j)] = f64::NAN;
            assert!(matches!(
                Adjacency::from_dense(&m, 3),
                Err(Error::ConfigConflict(_))
            ));
        }
    }

    #[test]
    fn asymmetric_weights_are_rejected() {
        let mut m = path();
        m[(1, 2)] = 5.;
        assert!(matches!(
            Adjacency::from_dense(&m, 3),
            Err(Error::ConfigConflict(_))
        ));
        m[(1, 2)] += 1e-12;
        m[(2, 1)] = 5.;
        assert!(Adjacency::from_dense(&m, 3).is_ok());
    }
}
