use serde::Deserialize;
use serde::Serialize;

/// Location of a term's input inside the stored data.
///
/// Deserializes from `"features"`, `{"embedding": "pca"}` or `{"block": "cost"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    /// The partition's raw feature matrix.
    Features,
    /// A named per-row embedding stored on each partition.
    Embedding(String),
    /// A named block matrix stored on the dataset over global row labels.
    Block(String),
}

impl Default for Attr {
    fn default() -> Self {
        Self::Features
    }
}

impl std::fmt::Display for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Features => write!(f, "features"),
            Self::Embedding(key) => write!(f, "embedding[{}]", key),
            Self::Block(key) => write!(f, "block[{}]", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_unit_and_keyed_forms() {
        let attr = serde_json::from_str::<Attr>(r#""features""#).unwrap();
        assert_eq!(attr, Attr::Features);
        let attr = serde_json::from_str::<Attr>(r#"{"embedding":"pca"}"#).unwrap();
        assert_eq!(attr, Attr::Embedding("pca".into()));
        let attr = serde_json::from_str::<Attr>(r#"{"block":"cost"}"#).unwrap();
        assert_eq!(attr, Attr::Block("cost".into()));
    }
}
