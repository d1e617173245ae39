//! Strategies that compute a term's representation from two partitions.
//!
//! Built-ins are a closed set ([`Callback::LocalPca`],
//! [`Callback::GraphConstruction`], [`Callback::SpatialNorm`]); anything else
//! is a [`Callback::Custom`] closure registered on a [`CallbackRegistry`]
//! scoped to one problem registry, or passed inline in a term configuration.
mod callback;
mod knn;
mod options;
mod pca;
mod reference;
mod registry;
mod spatial;

pub use callback::*;
pub use knn::*;
pub use options::*;
pub use pca::*;
pub use reference::*;
pub use registry::*;
pub use spatial::*;
