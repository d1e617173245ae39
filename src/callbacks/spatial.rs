use crate::*;

/// `spatial-norm`: standardized spatial coordinates of each side.
///
/// Each partition is standardized on its own, so slices recorded in
/// different coordinate frames become comparable.
pub fn spatial_norm(_: Term, source: &Partition, target: &Partition, options: &Options) -> Result<Tagged> {
    let key = options.string("spatial_key")?.unwrap_or(SPATIAL_KEY);
    let x = standardize(source.embedding(key)?);
    let y = standardize(target.embedding(key)?);
    Tagged::point_cloud(x, y, Cost::default())
}

/// Zero mean, unit variance per column. Constant columns are only centered.
pub fn standardize(m: &Matrix) -> Matrix {
    let n = m.nrows().max(1) as f64;
    let stats = m
        .column_iter()
        .map(|c| {
            let mean = c.sum() / n;
            let var = c.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            match var > 0. {
                true => (mean, var.sqrt()),
                false => (mean, 1.),
            }
        })
        .collect::<Vec<(f64, f64)>>();
    Matrix::from_fn(m.nrows(), m.ncols(), |i, j| (m[(i, j)] - stats[j].0) / stats[j].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardized_columns_have_zero_mean_unit_variance() {
        let m = Matrix::from_row_slice(4, 2, &[1., 5., 2., 5., 3., 5., 4., 5.]);
        let s = standardize(&m);
        let mean = s.column(0).sum() / 4.;
        let var = s.column(0).iter().map(|v| v * v).sum::<f64>() / 4.;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.).abs() < 1e-12);
        assert!(s.column(1).iter().all(|v| *v == 0.));
    }

    #[test]
    fn reads_spatial_embedding_of_each_side() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 6, 3, rng);
        let b = Partition::uniform("b", 4, 3, rng);
        let t = spatial_norm(Term::XY, &a, &b, &Options::new()).unwrap();
        assert_eq!(t.tag(), Tag::PointCloud);
        assert_eq!(t.shape(), (6, 4));
        let missing = Options::new().with("spatial_key", "nowhere");
        assert!(matches!(
            spatial_norm(Term::XY, &a, &b, &missing),
            Err(Error::MissingAttribute { .. })
        ));
    }
}
