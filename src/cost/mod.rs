//! Tagged cost representations.
//!
//! A [`Tagged`] pairs a [`Payload`] with a [`Tag`] telling the solver how to
//! consume it, and optionally a [`Cost`] function that turns point clouds or
//! graphs into a numeric cost matrix.
//!
//! | Tag           | Payload             | Cost functions                         |
//! |---------------|---------------------|----------------------------------------|
//! | `PointCloud`  | `Points(x, y)`      | `sq_euclidean`, `euclidean`, `cosine`  |
//! | `CostMatrix`  | `Matrix(c)`         | any, kept as a label                   |
//! | `Graph`       | `Graph(adjacency)`  | `geodesic`                             |
//! | `Custom`      | any                 | none                                   |
mod adjacency;
mod function;
mod payload;
mod tag;
mod tagged;

pub use adjacency::*;
pub use function::*;
pub use payload::*;
pub use tag::*;
pub use tagged::*;
