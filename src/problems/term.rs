use serde::Deserialize;
use serde::Serialize;

/// One of the three cost terms of a pairwise problem.
///
/// `XY` compares source rows with target rows. `X` and `Y` compare the rows
/// of one side with themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    XY,
    X,
    Y,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::XY, Term::X, Term::Y];
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::XY => write!(f, "xy"),
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}
