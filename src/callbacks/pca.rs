use crate::*;

/// `local-pca`: principal components fitted on the rows of this problem only.
///
/// For `xy` the projection is fitted on source and target rows stacked
/// together, so both sides share one basis. For `x` and `y` it is fitted on
/// the single partition. Components are ordered by singular value and
/// sign-fixed so that the largest-magnitude loading is positive, which makes
/// the projection deterministic.
pub fn local_pca(term: Term, source: &Partition, target: &Partition, options: &Options) -> Result<Tagged> {
    let k = options.usize("n_components", LOCAL_PCA_COMPONENTS)?;
    if k == 0 {
        return Err(Error::option("n_components", "must be positive"));
    }
    match term {
        Term::XY => {
            let ref joint = stack("local-pca", source.features(), target.features())?;
            let projected = project(joint, k)?;
            let x = projected.rows(0, source.n()).into_owned();
            let y = projected.rows(source.n(), target.n()).into_owned();
            Tagged::point_cloud(x, y, Cost::default())
        }
        Term::X | Term::Y => {
            let projected = project(source.features(), k)?;
            Tagged::point_cloud(projected.clone(), projected, Cost::default())
        }
    }
}

/// Source rows on top of target rows.
pub fn stack(context: &str, top: &Matrix, bottom: &Matrix) -> Result<Matrix> {
    if top.ncols() != bottom.ncols() {
        return Err(Error::shape(
            context,
            (bottom.nrows(), top.ncols()),
            bottom.shape(),
        ));
    }
    let n = top.nrows();
    Ok(Matrix::from_fn(n + bottom.nrows(), top.ncols(), |i, j| match i < n {
        true => top[(i, j)],
        false => bottom[(i - n, j)],
    }))
}

/// Centered projection onto the leading `k` right singular vectors.
fn project(m: &Matrix, k: usize) -> Result<Matrix> {
    let (n, d) = m.shape();
    let means = m.column_iter().map(|c| c.sum() / n.max(1) as f64).collect::<Vec<f64>>();
    let centered = Matrix::from_fn(n, d, |i, j| m[(i, j)] - means[j]);
    let svd = centered.clone().svd(false, true);
    let basis = svd.v_t.ok_or_else(|| Error::Callback {
        name: "local-pca".to_string(),
        message: "decomposition returned no right singular vectors".to_string(),
    })?;
    let mut order = (0..svd.singular_values.len()).collect::<Vec<usize>>();
    order.sort_by(|a, b| svd.singular_values[*b].total_cmp(&svd.singular_values[*a]));
    order.truncate(k);
    let components = order
        .into_iter()
        .map(|c| {
            let row = basis.row(c);
            let pivot = row
                .iter()
                .copied()
                .fold(0., |best: f64, v| if v.abs() > best.abs() { v } else { best });
            let sign = if pivot < 0. { -1. } else { 1. };
            row.iter().map(|v| v * sign).collect::<Vec<f64>>()
        })
        .collect::<Vec<Vec<f64>>>();
    Ok(Matrix::from_fn(n, components.len(), |i, c| {
        (0..d).map(|j| centered[(i, j)] * components[c][j]).sum()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_projection_splits_into_both_sides() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 10, 6, rng);
        let b = Partition::uniform("b", 7, 6, rng);
        let options = Options::new().with("n_components", 3);
        let t = local_pca(Term::XY, &a, &b, &options).unwrap();
        assert_eq!(t.shape(), (10, 7));
        match t.payload() {
            Payload::Points(x, y) => {
                assert_eq!(x.ncols(), 3);
                assert_eq!(y.ncols(), 3);
            }
            _ => panic!("expected point cloud"),
        }
    }

    #[test]
    fn components_are_capped_by_rank_and_deterministic() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 5, 4, rng);
        let once = local_pca(Term::X, &a, &a, &Options::new()).unwrap();
        let twice = local_pca(Term::X, &a, &a, &Options::new()).unwrap();
        assert_eq!(once, twice);
        match once.payload() {
            Payload::Points(x, _) => assert_eq!(x.ncols(), 4),
            _ => panic!("expected point cloud"),
        }
    }

    #[test]
    fn leading_component_follows_dominant_axis() {
        let features = Matrix::from_row_slice(4, 2, &[-3., 0.1, -1., -0.1, 1., 0.1, 3., -0.1]);
        let rows = (0..4).map(|i| i.to_string()).collect();
        let p = Partition::new("p", rows, features).unwrap();
        let options = Options::new().with("n_components", 1);
        match local_pca(Term::X, &p, &p, &options).unwrap().payload() {
            Payload::Points(x, _) => {
                assert!(x[(0, 0)] < 0. && x[(3, 0)] > 0.);
                assert!((x[(3, 0)] - 3.).abs() < 1e-2);
            }
            _ => panic!("expected point cloud"),
        }
    }

    #[test]
    fn mismatched_widths_fail_to_stack() {
        assert!(matches!(
            stack("t", &Matrix::zeros(2, 3), &Matrix::zeros(2, 4)),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
