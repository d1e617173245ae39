criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_pairwise_costs,
        computing_geodesic_costs,
        computing_optimal_transport_sinkhorns,
        computing_optimal_transport_gromov,
        preparing_local_pca_registry,
        preparing_graph_registry,
}

fn dataset(sizes: &[usize], d: usize) -> Dataset {
    let ref mut rng = rand::rng();
    let mut dataset = Dataset::new();
    for (i, n) in sizes.iter().enumerate() {
        dataset
            .insert(Partition::uniform(&format!("t{}", i), *n, d, rng))
            .expect("unique labels");
    }
    dataset
}

fn computing_pairwise_costs(c: &mut criterion::Criterion) {
    let ref x = Partition::random();
    let ref y = Partition::random();
    c.bench_function("compute squared euclidean costs", |b| {
        b.iter(|| Cost::SqEuclidean.pairwise(x.features(), y.features()))
    });
}

fn computing_geodesic_costs(c: &mut criterion::Criterion) {
    let ref p = Partition::uniform("p", 200, 10, &mut rand::rng());
    let ref options = Options::new();
    c.bench_function("compute geodesic costs (kNN graph, 200 rows)", |b| {
        b.iter(|| {
            graph_construction(Term::X, p, p, options)
                .and_then(|t| t.materialize())
        })
    });
}

fn computing_optimal_transport_sinkhorns(c: &mut criterion::Criterion) {
    let ref mut rng = rand::rng();
    let x = Partition::uniform("x", 100, 10, rng);
    let y = Partition::uniform("y", 80, 10, rng);
    let cost = Cost::SqEuclidean.pairwise(x.features(), y.features()).expect("same width");
    let ref ground = Ground::scaled(cost, ScaleCost::Mean).expect("finite costs");
    let (ref mu, ref nu) = (Marginal::uniform(100), Marginal::uniform(80));
    c.bench_function("compute optimal transport (entropy regularized)", |b| {
        b.iter(|| Sinkhorn::from((mu, nu, ground)).minimize().cost())
    });
}

fn computing_optimal_transport_gromov(c: &mut criterion::Criterion) {
    let ref mut rng = rand::rng();
    let x = Partition::uniform("x", 40, 10, rng);
    let y = Partition::uniform("y", 30, 10, rng);
    let cx = Cost::SqEuclidean.pairwise(x.features(), x.features()).expect("same width");
    let cy = Cost::SqEuclidean.pairwise(y.features(), y.features()).expect("same width");
    let ref cx = Ground::scaled(cx, ScaleCost::Mean).expect("finite costs");
    let ref cy = Ground::scaled(cy, ScaleCost::Mean).expect("finite costs");
    let (ref mu, ref nu) = (Marginal::uniform(40), Marginal::uniform(30));
    let ref config = SolveConfig::default();
    c.bench_function("compute optimal transport (gromov-wasserstein)", |b| {
        b.iter(|| Gromov::new(mu, nu, cx, cy, config).minimize().cost())
    });
}

fn preparing_local_pca_registry(c: &mut criterion::Criterion) {
    let data = std::sync::Arc::new(dataset(&[60, 60, 60, 60], 40));
    let config = PrepareConfig::default().with(
        Term::XY,
        TermConfig::new().callback("local-pca").option("n_components", 10),
    );
    c.bench_function("prepare 3 sequential pairs (local-pca)", |b| {
        b.iter(|| {
            ProblemRegistry::new(data.clone(), Kind::Linear, &Policy::Sequential)
                .and_then(|mut r| r.prepare(&config))
        })
    });
}

fn preparing_graph_registry(c: &mut criterion::Criterion) {
    let data = std::sync::Arc::new(dataset(&[60, 60, 60, 60], 10));
    let config = PrepareConfig::default().with(Term::XY, TermConfig::new().callback("graph-construction"));
    c.bench_function("prepare 6 upper-triangular pairs (graph-construction)", |b| {
        b.iter(|| {
            ProblemRegistry::new(data.clone(), Kind::Linear, &Policy::Triu)
                .and_then(|mut r| r.prepare(&config))
        })
    });
}

use pairwise_ot::*;
