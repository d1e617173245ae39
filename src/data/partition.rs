use crate::*;
use rand::Rng;
use std::collections::BTreeMap;

/// One distribution's data.
///
/// Rows are observations carrying a label each. Every stored matrix or vector
/// is indexed by those rows in the same order, which is validated on insertion.
/// Partitions are shared read-only between the problems that reference them.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Distribution label, e.g. a time point or a tissue slice.
    label: String,
    /// Row labels in native order.
    rows: Vec<String>,
    /// Raw features, one row per observation.
    features: Matrix,
    /// Named per-row embeddings (projections, spatial coordinates, ...).
    embeddings: BTreeMap<String, Matrix>,
    /// Named per-row numeric annotations (marginal weights, ...).
    annotations: BTreeMap<String, Vec<f64>>,
}

impl Partition {
    pub fn new(label: impl Into<String>, rows: Vec<String>, features: Matrix) -> Result<Self> {
        let label = label.into();
        if rows.len() != features.nrows() {
            return Err(Error::shape(
                format!("features of {}", label),
                (rows.len(), features.ncols()),
                features.shape(),
            ));
        }
        Ok(Self {
            label,
            rows,
            features,
            embeddings: BTreeMap::new(),
            annotations: BTreeMap::new(),
        })
    }
    /// Stores an embedding; its row count must match the partition.
    pub fn with_embedding(mut self, key: impl Into<String>, embedding: Matrix) -> Result<Self> {
        let key = key.into();
        if embedding.nrows() != self.n() {
            return Err(Error::shape(
                format!("embedding {} of {}", key, self.label),
                (self.n(), embedding.ncols()),
                embedding.shape(),
            ));
        }
        self.embeddings.insert(key, embedding);
        Ok(self)
    }
    /// Stores a per-row annotation; its length must match the partition.
    pub fn with_annotation(mut self, key: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let key = key.into();
        if values.len() != self.n() {
            return Err(Error::shape(
                format!("annotation {} of {}", key, self.label),
                (self.n(), 1),
                (values.len(), 1),
            ));
        }
        self.annotations.insert(key, values);
        Ok(self)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
    /// number of observations
    pub fn n(&self) -> usize {
        self.rows.len()
    }
    pub fn features(&self) -> &Matrix {
        &self.features
    }
    pub fn embedding(&self, key: &str) -> Result<&Matrix> {
        self.embeddings
            .get(key)
            .ok_or_else(|| Error::missing(&self.label, format!("embedding[{}]", key)))
    }
    pub fn annotation(&self, key: &str) -> Result<&[f64]> {
        self.annotations
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::missing(&self.label, format!("annotation[{}]", key)))
    }
    /// Per-row matrix named by `attr`. Blocks live on the [`Dataset`], not here.
    pub fn attribute(&self, attr: &Attr) -> Result<&Matrix> {
        match attr {
            Attr::Features => Ok(self.features()),
            Attr::Embedding(key) => self.embedding(key),
            Attr::Block(_) => Err(Error::conflict(format!(
                "{} is a dataset block, not a per-row attribute of {}",
                attr, self.label
            ))),
        }
    }

    /// Uniform random features in `[0, 1)` with planar coordinates under `spatial`.
    pub fn uniform<R: Rng>(label: &str, n: usize, d: usize, rng: &mut R) -> Self {
        let rows = (0..n).map(|i| format!("{}-{}", label, i)).collect();
        let features = Matrix::from_fn(n, d, |_, _| rng.random::<f64>());
        let spatial = Matrix::from_fn(n, 2, |_, _| rng.random::<f64>() * 100.);
        Self::new(label, rows, features)
            .and_then(|p| p.with_embedding(SPATIAL_KEY, spatial))
            .expect("generated shapes agree")
    }
}

impl Arbitrary for Partition {
    fn random() -> Self {
        let ref mut rng = rand::rng();
        let label = format!("p{}", rng.random_range(0..1000));
        let n = rng.random_range(8..32);
        Self::uniform(&label, n, 4, rng)
    }
}
