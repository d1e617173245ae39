use serde::Deserialize;
use serde::Serialize;

/// Ordered (source, target) pair of distribution labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    source: String,
    target: String,
}

impl Key {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl From<(&str, &str)> for Key {
    fn from((source, target): (&str, &str)) -> Self {
        Self::new(source, target)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}
