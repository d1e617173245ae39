use serde::Deserialize;
use serde::Serialize;

/// How a payload is consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Feature arrays; a cost function computes pairwise distances.
    PointCloud,
    /// Cost values used as they are.
    CostMatrix,
    /// Weighted graph; costs are shortest-path lengths.
    Graph,
    /// Opaque payload for solvers that know what to do with it.
    Custom,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::PointCloud => write!(f, "point_cloud"),
            Self::CostMatrix => write!(f, "cost_matrix"),
            Self::Graph => write!(f, "graph"),
            Self::Custom => write!(f, "custom"),
        }
    }
}
