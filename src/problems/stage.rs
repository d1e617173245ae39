use serde::Serialize;

/// Lifecycle of a problem instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Init,
    Prepared,
    Solved,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Prepared => write!(f, "prepared"),
            Self::Solved => write!(f, "solved"),
        }
    }
}
