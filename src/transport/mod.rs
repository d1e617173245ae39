//! Solver seam and reference entropic optimal transport.
//!
//! Preparation produces [`Tagged`] terms; everything here consumes them.
//! The [`Solver`] trait is the boundary. [`Entropic`] is a reference
//! implementation built on the generic transport traits.
//!
//! ## Core Types
//!
//! - [`Support`]: index type of a distribution's atoms
//! - [`Density`]: a discrete distribution over a support ([`Marginal`])
//! - [`Measure`]: ground cost between two supports ([`Ground`])
//! - [`Coupling`]: a transport plan ([`Sinkhorn`], [`Gromov`])
//!
//! ## Algorithms
//!
//! - [`Sinkhorn`]: log-domain Sinkhorn scaling for linear terms
//! - [`Gromov`]: entropic Gromov-Wasserstein by repeated linearization,
//!   optionally fused with a linear term
mod coupling;
mod density;
mod gromov;
mod ground;
mod marginal;
mod measure;
mod scale;
mod sinkhorn;
mod solution;
mod solver;
mod support;

pub use coupling::*;
pub use density::*;
pub use gromov::*;
pub use ground::*;
pub use marginal::*;
pub use measure::*;
pub use scale::*;
pub use sinkhorn::*;
pub use solution::*;
pub use solver::*;
pub use support::*;
