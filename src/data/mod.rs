//! Distribution storage read by preparation.
//!
//! - [`Partition`]: one distribution's rows, raw features, embeddings and annotations
//! - [`Dataset`]: partitions in insertion order plus shared block matrices
//! - [`LabeledMatrix`]: a dense matrix whose rows and columns carry row labels
//! - [`Attr`]: where in that storage a term reads its input
mod attr;
mod dataset;
mod labeled;
mod partition;

pub use attr::*;
pub use dataset::*;
pub use labeled::*;
pub use partition::*;
