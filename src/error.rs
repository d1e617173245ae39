//! Error taxonomy for preparation and solving.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between configuring a term and reading a solution.
///
/// Validation variants are returned at the point of construction or invocation.
/// [`Error::StageError`] and [`Error::KeyNotFound`] surface at the registry boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// Payload or label dimensions violate the tag's invariant.
    #[error("shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Cost-function identifier unknown, or not usable with the given tag.
    #[error("unknown cost function: {0}")]
    UnknownCost(String),

    /// A callback returned a representation that does not describe the rows it was given.
    #[error("callback {callback} returned a non-conforming representation: {reason}")]
    TypeMismatch { callback: String, reason: String },

    /// Mutually exclusive configuration was supplied.
    #[error("conflicting configuration: {0}")]
    ConfigConflict(String),

    /// Override labels do not match the partition's row labels in order.
    #[error("label mismatch on {axis} of {context}: {detail}")]
    LabelMismatch {
        context: String,
        axis: &'static str,
        detail: String,
    },

    /// Operation invoked on an instance in the wrong lifecycle stage.
    #[error("problem {key} is {found}, expected {expected}")]
    StageError {
        key: String,
        found: String,
        expected: String,
    },

    /// Unknown pairwise key or distribution label.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// No callback of that name is registered.
    #[error("unknown callback: {0}")]
    UnknownCallback(String),

    /// A partition or dataset does not store the requested attribute.
    #[error("{owner} has no attribute {attr}")]
    MissingAttribute { owner: String, attr: String },

    /// A callback option has the wrong type.
    #[error("invalid option {key}: {reason}")]
    InvalidOption { key: String, reason: String },

    /// Marginal weights are negative, non-finite, mis-sized or sum to zero.
    #[error("invalid marginal {0}")]
    InvalidMarginal(String),

    /// Geodesic cost requested between nodes in different graph components.
    #[error("graph is disconnected: node {from} cannot reach node {to}")]
    Disconnected { from: usize, to: usize },

    /// A custom callback failed with its own error.
    #[error("callback {name} failed: {message}")]
    Callback { name: String, message: String },

    /// The solver could not produce a coupling.
    #[error("solver failed: {0}")]
    Solver(String),
}

impl Error {
    pub fn shape(context: impl Into<String>, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::ConfigConflict(message.into())
    }
    pub fn missing(owner: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::MissingAttribute {
            owner: owner.into(),
            attr: attr.into(),
        }
    }
    pub fn option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
