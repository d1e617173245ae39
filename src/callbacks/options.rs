use crate::*;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Keyword options forwarded to a callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, serde_json::Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Unsigned integer option, `default` when absent.
    pub fn usize(&self, key: &str, default: usize) -> Result<usize> {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .map(|u| u as usize)
                .ok_or_else(|| Error::option(key, format!("expected an unsigned integer, found {}", value))),
        }
    }
    /// String option, `None` when absent.
    pub fn string(&self, key: &str) -> Result<Option<&str>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| Error::option(key, format!("expected a string, found {}", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters() {
        let options = serde_json::from_str::<Options>(r#"{"n_neighbors": 5, "attr": "pca", "bad": -1}"#).unwrap();
        assert_eq!(options.usize("n_neighbors", 15).unwrap(), 5);
        assert_eq!(options.usize("n_components", 30).unwrap(), 30);
        assert_eq!(options.string("attr").unwrap(), Some("pca"));
        assert!(matches!(options.usize("bad", 1), Err(Error::InvalidOption { .. })));
        assert!(options.string("n_neighbors").is_err());
    }
}
