use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// Which ordered pairs of partitions become problems.
///
/// Pairs are listed in the dataset's insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Each partition to the next.
    #[default]
    Sequential,
    /// Every other partition to `reference`.
    Star { reference: String },
    /// Every partition to every later one.
    Triu,
    /// Every partition to every earlier one.
    Tril,
    Explicit(Vec<(String, String)>),
}

impl Policy {
    pub fn keys(&self, dataset: &Dataset) -> Result<Vec<Key>> {
        let labels = dataset.labels().collect::<Vec<&str>>();
        let n = labels.len();
        let keys = match self {
            Self::Sequential => labels.windows(2).map(|w| Key::new(w[0], w[1])).collect(),
            Self::Star { reference } => {
                dataset.partition(reference)?;
                labels
                    .iter()
                    .filter(|l| **l != reference.as_str())
                    .map(|l| Key::new(*l, reference.as_str()))
                    .collect()
            }
            Self::Triu => (0..n)
                .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                .map(|(i, j)| Key::new(labels[i], labels[j]))
                .collect(),
            Self::Tril => (0..n)
                .flat_map(|i| (0..i).map(move |j| (i, j)))
                .map(|(i, j)| Key::new(labels[i], labels[j]))
                .collect(),
            Self::Explicit(pairs) => {
                let mut keys = Vec::<Key>::with_capacity(pairs.len());
                for (source, target) in pairs {
                    dataset.partition(source)?;
                    dataset.partition(target)?;
                    let key = Key::new(source.as_str(), target.as_str());
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                keys
            }
        };
        Ok(keys)
    }
}

impl std::str::FromStr for Policy {
    type Err = Error;
    /// `sequential`, `triu`, `tril` or `star:<reference>`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some(("star", reference)) => Ok(Self::Star {
                reference: reference.to_string(),
            }),
            _ => match s {
                "sequential" => Ok(Self::Sequential),
                "triu" => Ok(Self::Triu),
                "tril" => Ok(Self::Tril),
                _ => Err(Error::conflict(format!("unknown policy {}", s))),
            },
        }
    }
}
