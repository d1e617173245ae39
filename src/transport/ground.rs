use crate::*;

/// A dense ground cost between row indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground(Matrix);

impl Ground {
    /// Wraps a cost after rescaling it. Non-finite entries are rejected.
    pub fn scaled(values: Matrix, scale: ScaleCost) -> Result<Self> {
        if values.iter().any(|c| !c.is_finite()) {
            return Err(Error::Solver("cost contains non-finite entries".into()));
        }
        let factor = scale.factor(values.as_slice());
        Ok(Self(values / factor))
    }
    pub fn matrix(&self) -> &Matrix {
        &self.0
    }
    pub fn shape(&self) -> (usize, usize) {
        self.0.shape()
    }
}

impl From<Matrix> for Ground {
    fn from(values: Matrix) -> Self {
        Self(values)
    }
}

impl Measure for Ground {
    type X = usize;
    type Y = usize;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self.0[(*x, *y)]
    }
}
