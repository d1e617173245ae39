use crate::*;
use serde::Serialize;

/// Per-pair outcome of a bulk operation, in insertion order.
#[derive(Debug, Default)]
pub struct Report {
    pub succeeded: Vec<Key>,
    pub failed: Vec<(Key, Error)>,
}

impl Report {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn error(&self, key: &Key) -> Option<&Error> {
        self.failed.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }
    pub fn summary(&self) -> Summary {
        Summary {
            succeeded: self.succeeded.clone(),
            failed: self
                .failed
                .iter()
                .map(|(key, error)| Failure {
                    key: key.clone(),
                    error: error.to_string(),
                })
                .collect(),
        }
    }
}

/// Serializable form of a [`Report`].
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub succeeded: Vec<Key>,
    pub failed: Vec<Failure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub key: Key,
    pub error: String,
}
