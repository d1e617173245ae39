use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Which terms a problem is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// `xy` only.
    #[default]
    Linear,
    /// `x` and `y`.
    Quadratic,
    /// All three.
    Fused,
}

impl Kind {
    pub fn terms(&self) -> &'static [Term] {
        match self {
            Self::Linear => &[Term::XY],
            Self::Quadratic => &[Term::X, Term::Y],
            Self::Fused => &[Term::XY, Term::X, Term::Y],
        }
    }
    pub fn requires(&self, term: Term) -> bool {
        self.terms().contains(&term)
    }
}

impl TryFrom<&str> for Kind {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Self::Linear),
            "quadratic" => Ok(Self::Quadratic),
            "fused" => Ok(Self::Fused),
            _ => Err(Error::conflict(format!("unknown problem kind {}", s))),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Quadratic => write!(f, "quadratic"),
            Self::Fused => write!(f, "fused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_terms() {
        assert!(Kind::Linear.requires(Term::XY));
        assert!(!Kind::Linear.requires(Term::X));
        assert!(!Kind::Quadratic.requires(Term::XY));
        assert_eq!(Kind::Fused.terms().len(), 3);
    }
}
