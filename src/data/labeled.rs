use crate::*;
use std::collections::HashMap;

/// A dense matrix indexed by row labels on both axes.
///
/// Used for manual overrides, where labels must match a partition's rows
/// exactly, and for dataset blocks, which are sliced by label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    index: Vec<String>,
    columns: Vec<String>,
    values: Matrix,
}

impl LabeledMatrix {
    pub fn new(index: Vec<String>, columns: Vec<String>, values: Matrix) -> Result<Self> {
        if values.shape() != (index.len(), columns.len()) {
            return Err(Error::shape(
                "labeled matrix",
                (index.len(), columns.len()),
                values.shape(),
            ));
        }
        Ok(Self {
            index,
            columns,
            values,
        })
    }
    pub fn index(&self) -> &[String] {
        &self.index
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn values(&self) -> &Matrix {
        &self.values
    }
    pub fn into_values(self) -> Matrix {
        self.values
    }

    /// Checks both axes against the expected row labels, in order.
    pub fn align(&self, context: &str, rows: &[String], cols: &[String]) -> Result<()> {
        Self::compare(context, "index", rows, &self.index)?;
        Self::compare(context, "columns", cols, &self.columns)?;
        Ok(())
    }

    /// Extracts the sub-block at the given row and column labels.
    pub fn slice(&self, context: &str, rows: &[String], cols: &[String]) -> Result<Matrix> {
        let ref index = Self::positions(&self.index);
        let ref columns = Self::positions(&self.columns);
        let r = Self::lookup(context, "index", index, rows)?;
        let c = Self::lookup(context, "columns", columns, cols)?;
        Ok(Matrix::from_fn(r.len(), c.len(), |i, j| self.values[(r[i], c[j])]))
    }

    fn compare(context: &str, axis: &'static str, expected: &[String], found: &[String]) -> Result<()> {
        let mismatch = |detail: String| Error::LabelMismatch {
            context: context.to_string(),
            axis,
            detail,
        };
        if expected.len() != found.len() {
            return Err(mismatch(format!(
                "expected {} labels, found {}",
                expected.len(),
                found.len()
            )));
        }
        match expected.iter().zip(found).position(|(a, b)| a != b) {
            None => Ok(()),
            Some(i) => Err(mismatch(format!(
                "position {} expected {}, found {}",
                i, expected[i], found[i]
            ))),
        }
    }

    fn positions(labels: &[String]) -> HashMap<&str, usize> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect()
    }

    fn lookup(
        context: &str,
        axis: &'static str,
        positions: &HashMap<&str, usize>,
        labels: &[String],
    ) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                positions
                    .get(label.as_str())
                    .copied()
                    .ok_or_else(|| Error::LabelMismatch {
                        context: context.to_string(),
                        axis,
                        detail: format!("no row labelled {}", label),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn align_rejects_permuted_columns() {
        let m = LabeledMatrix::new(
            labels(&["a", "b"]),
            labels(&["y", "x", "z"]),
            Matrix::zeros(2, 3),
        )
        .unwrap();
        assert!(m.align("t", &labels(&["a", "b"]), &labels(&["y", "x", "z"])).is_ok());
        assert!(matches!(
            m.align("t", &labels(&["a", "b"]), &labels(&["x", "y", "z"])),
            Err(Error::LabelMismatch { axis: "columns", .. })
        ));
    }

    #[test]
    fn slice_follows_requested_order() {
        let m = LabeledMatrix::new(
            labels(&["a", "b", "c"]),
            labels(&["a", "b", "c"]),
            Matrix::from_fn(3, 3, |i, j| (10 * i + j) as f64),
        )
        .unwrap();
        let s = m.slice("t", &labels(&["c", "a"]), &labels(&["b"])).unwrap();
        assert_eq!(s.shape(), (2, 1));
        assert_eq!(s[(0, 0)], 21.);
        assert_eq!(s[(1, 0)], 1.);
        assert!(m.slice("t", &labels(&["d"]), &labels(&["a"])).is_err());
    }
}
