use crate::*;

/// Output of solving one pairwise problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Transport plan, source rows × target rows.
    coupling: Matrix,
    /// Objective value on the scaled cost(s).
    cost: Energy,
    converged: bool,
    /// Sinkhorn iterations, summed over outer steps for quadratic problems.
    iterations: usize,
    /// Final L1 marginal violation.
    error: Energy,
}

impl Solution {
    pub fn new(coupling: Matrix, cost: Energy, converged: bool, iterations: usize, error: Energy) -> Self {
        Self {
            coupling,
            cost,
            converged,
            iterations,
            error,
        }
    }
    pub fn coupling(&self) -> &Matrix {
        &self.coupling
    }
    pub fn cost(&self) -> Energy {
        self.cost
    }
    pub fn converged(&self) -> bool {
        self.converged
    }
    pub fn iterations(&self) -> usize {
        self.iterations
    }
    pub fn error(&self) -> Energy {
        self.error
    }
    pub fn shape(&self) -> (usize, usize) {
        self.coupling.shape()
    }

    /// Moves mass given on source rows to the target rows.
    pub fn push(&self, mass: &[f64]) -> Result<Vec<f64>> {
        let (n, _) = self.shape();
        if mass.len() != n {
            return Err(Error::shape("pushed mass", (n, 1), (mass.len(), 1)));
        }
        let mass = nalgebra::DVector::from_column_slice(mass);
        Ok((self.coupling.transpose() * mass).as_slice().to_vec())
    }
    /// Moves mass given on target rows back to the source rows.
    pub fn pull(&self, mass: &[f64]) -> Result<Vec<f64>> {
        let (_, m) = self.shape();
        if mass.len() != m {
            return Err(Error::shape("pulled mass", (m, 1), (mass.len(), 1)));
        }
        let mass = nalgebra::DVector::from_column_slice(mass);
        Ok((&self.coupling * mass).as_slice().to_vec())
    }
}
