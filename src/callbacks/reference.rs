use crate::*;
use serde::Deserialize;

/// How a term configuration names its callback: by registered name, or
/// inline as a strategy value.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "String")]
pub enum CallbackRef {
    Named(String),
    Inline(Callback),
}

impl From<String> for CallbackRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}
impl From<&str> for CallbackRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}
impl From<Callback> for CallbackRef {
    fn from(callback: Callback) -> Self {
        Self::Inline(callback)
    }
}

impl std::fmt::Display for CallbackRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::Inline(callback) => write!(f, "{}", callback),
        }
    }
}
