use crate::*;
use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;

/// `graph-construction`: symmetric k-nearest-neighbor graph with Euclidean
/// edge weights, read geodesically.
///
/// Nodes are built from `options.attr` (an embedding key) or raw features.
/// For `xy` the graph is joint over source rows followed by target rows.
pub fn graph_construction(term: Term, source: &Partition, target: &Partition, options: &Options) -> Result<Tagged> {
    let k = options.usize("n_neighbors", GRAPH_NEIGHBORS)?;
    if k == 0 {
        return Err(Error::option("n_neighbors", "must be positive"));
    }
    let attr = match options.string("attr")? {
        Some(key) => Attr::Embedding(key.to_string()),
        None => Attr::Features,
    };
    match term {
        Term::XY => {
            let ref points = stack(
                "graph-construction",
                source.attribute(&attr)?,
                target.attribute(&attr)?,
            )?;
            Tagged::graph(Adjacency::joint(knn(points, k)?, source.n())?)
        }
        Term::X | Term::Y => Tagged::graph(Adjacency::square(knn(source.attribute(&attr)?, k)?)),
    }
}

/// Each row linked to its `k` nearest rows; ties break toward lower index.
pub fn knn(points: &Matrix, k: usize) -> Result<UnGraph<(), Energy>> {
    use rayon::iter::IntoParallelIterator;
    use rayon::iter::ParallelIterator;
    let n = points.nrows();
    let ref distances = Cost::Euclidean.pairwise(points, points)?;
    let neighbors = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut others = (0..n).filter(|j| *j != i).collect::<Vec<usize>>();
            others.sort_by(|a, b| distances[(i, *a)].total_cmp(&distances[(i, *b)]).then(a.cmp(b)));
            others.truncate(k);
            others
        })
        .collect::<Vec<Vec<usize>>>();
    let mut graph = UnGraph::with_capacity(n, n * k);
    let nodes = (0..n).map(|_| graph.add_node(())).collect::<Vec<NodeIndex>>();
    for (i, near) in neighbors.into_iter().enumerate() {
        for j in near {
            graph.update_edge(nodes[i], nodes[j], distances[(i, j)]);
        }
    }
    Ok(graph)
}
