use crate::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// All distributions of one analysis session.
///
/// Partitions keep insertion order, which is the order in which pairwise
/// problems are discovered. Block matrices span global row labels and are
/// sliced per problem when a term reads `Attr::Block`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    partitions: Vec<Arc<Partition>>,
    blocks: BTreeMap<String, LabeledMatrix>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }
    /// Appends a partition. Labels must be unique.
    pub fn insert(&mut self, partition: Partition) -> Result<()> {
        if self.labels().any(|l| l == partition.label()) {
            return Err(Error::conflict(format!(
                "duplicate partition label {}",
                partition.label()
            )));
        }
        self.partitions.push(Arc::new(partition));
        Ok(())
    }
    pub fn with(mut self, partition: Partition) -> Result<Self> {
        self.insert(partition)?;
        Ok(self)
    }
    /// Stores a named block matrix over global row labels.
    pub fn insert_block(&mut self, name: impl Into<String>, block: LabeledMatrix) {
        self.blocks.insert(name.into(), block);
    }
    pub fn with_block(mut self, name: impl Into<String>, block: LabeledMatrix) -> Self {
        self.insert_block(name, block);
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.partitions.iter().map(|p| p.label())
    }
    pub fn partitions(&self) -> impl Iterator<Item = &Arc<Partition>> {
        self.partitions.iter()
    }
    pub fn partition(&self, label: &str) -> Result<&Arc<Partition>> {
        self.partitions
            .iter()
            .find(|p| p.label() == label)
            .ok_or_else(|| Error::KeyNotFound(label.to_string()))
    }
    pub fn block(&self, name: &str) -> Result<&LabeledMatrix> {
        self.blocks
            .get(name)
            .ok_or_else(|| Error::missing("dataset", format!("block[{}]", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_rejects_duplicates() {
        let ref mut rng = rand::rng();
        let mut data = Dataset::new();
        for label in ["t2", "t0", "t1"] {
            data.insert(Partition::uniform(label, 4, 2, rng)).unwrap();
        }
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["t2", "t0", "t1"]);
        assert!(data.insert(Partition::uniform("t0", 4, 2, rng)).is_err());
        assert!(matches!(data.partition("t9"), Err(Error::KeyNotFound(_))));
        assert!(matches!(data.block("cost"), Err(Error::MissingAttribute { .. })));
    }
}
