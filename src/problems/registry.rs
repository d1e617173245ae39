use crate::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered collection of pairwise problems over one dataset.
///
/// Problems are created once, in the order the [`Policy`] lists them, and
/// are never removed. Bulk preparation and solving run every pair in
/// parallel and commit results in that same order.
pub struct ProblemRegistry {
    dataset: Arc<Dataset>,
    kind: Kind,
    problems: Vec<ProblemInstance>,
    index: HashMap<Key, usize>,
    callbacks: CallbackRegistry,
}

impl ProblemRegistry {
    pub fn new(dataset: impl Into<Arc<Dataset>>, kind: Kind, policy: &Policy) -> Result<Self> {
        let dataset = dataset.into();
        let problems = policy
            .keys(&dataset)?
            .into_iter()
            .map(|key| -> Result<ProblemInstance> {
                let source = dataset.partition(key.source())?.clone();
                let target = dataset.partition(key.target())?.clone();
                Ok(ProblemInstance::new(key, kind, source, target))
            })
            .collect::<Result<Vec<ProblemInstance>>>()?;
        let index = problems
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key().clone(), i))
            .collect();
        log::info!("{:<32}{:<32}", format!("registered {} problems", kind), problems.len());
        Ok(Self {
            dataset,
            kind,
            problems,
            index,
            callbacks: CallbackRegistry::new(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn len(&self) -> usize {
        self.problems.len()
    }
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.problems.iter().map(ProblemInstance::key)
    }
    pub fn problems(&self) -> impl Iterator<Item = &ProblemInstance> {
        self.problems.iter()
    }
    pub fn get(&self, key: &Key) -> Result<&ProblemInstance> {
        Ok(&self.problems[self.position(key)?])
    }
    pub fn get_mut(&mut self, key: &Key) -> Result<&mut ProblemInstance> {
        let i = self.position(key)?;
        Ok(&mut self.problems[i])
    }
    /// The latest coupling of a problem that has been solved at least once.
    /// Check [`ProblemInstance::is_stale`] to see whether its terms changed since.
    pub fn solution(&self, key: &Key) -> Result<&Solution> {
        let problem = self.get(key)?;
        problem.solution().ok_or_else(|| Error::StageError {
            key: key.to_string(),
            found: problem.stage().to_string(),
            expected: Stage::Solved.to_string(),
        })
    }
    /// Latest solution of every problem solved at least once, in insertion
    /// order. Overrides and re-preparation never remove entries.
    pub fn solutions(&self) -> impl Iterator<Item = (&Key, &Solution)> {
        self.problems
            .iter()
            .filter_map(|p| p.solution().map(|s| (p.key(), s)))
    }
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }
    /// Custom callbacks registered here are visible to this registry only.
    pub fn callbacks_mut(&mut self) -> &mut CallbackRegistry {
        &mut self.callbacks
    }

    /// Resolves every problem and commits the results in insertion order.
    ///
    /// With [`OnError::Skip`] failed pairs are reported and left untouched.
    /// With [`OnError::Abort`] the first failure is returned and no problem
    /// changes.
    pub fn prepare(&mut self, config: &PrepareConfig) -> Result<Report> {
        use rayon::iter::IntoParallelRefIterator;
        use rayon::iter::ParallelIterator;
        config.validate(self.kind)?;
        log::info!("{:<32}{:<32}", "preparing problems", self.problems.len());
        let resolver = Resolver::new(&self.dataset, &self.callbacks, config);
        let outcomes = self
            .problems
            .par_iter()
            .map(|p| p.resolve(&resolver))
            .collect::<Vec<Result<Resolution>>>();
        let outcomes = match config.on_error {
            OnError::Skip => outcomes,
            OnError::Abort => outcomes
                .into_iter()
                .collect::<Result<Vec<Resolution>>>()?
                .into_iter()
                .map(Ok)
                .collect(),
        };
        let mut report = Report::default();
        for (problem, outcome) in self.problems.iter_mut().zip(outcomes) {
            match outcome {
                Ok(resolution) => {
                    problem.commit(resolution);
                    report.succeeded.push(problem.key().clone());
                }
                Err(error) => {
                    log::warn!("{:<32}{}", format!("failed to prepare {}", problem.key()), error);
                    report.failed.push((problem.key().clone(), error));
                }
            }
        }
        log::info!(
            "{:<32}{:<32}",
            "prepared problems",
            format!("{} ok, {} failed", report.succeeded.len(), report.failed.len())
        );
        Ok(report)
    }

    /// Resolves a single problem. Errors propagate and leave it untouched.
    pub fn prepare_pair(&mut self, key: &Key, config: &PrepareConfig) -> Result<()> {
        config.validate(self.kind)?;
        let i = self.position(key)?;
        let resolver = Resolver::new(&self.dataset, &self.callbacks, config);
        let resolution = self.problems[i].resolve(&resolver)?;
        self.problems[i].commit(resolution);
        log::debug!("{:<32}{:<32}", "prepared problem", key.to_string());
        Ok(())
    }

    /// Solves every problem. See [`ProblemRegistry::solve_pairs`].
    pub fn solve<S: Solver>(&mut self, solver: &S, config: &SolveConfig) -> Result<Report> {
        let keys = self.keys().cloned().collect::<Vec<Key>>();
        self.solve_pairs(&keys, solver, config)
    }

    /// Solves the given problems in parallel.
    ///
    /// Every targeted problem must be prepared and complete, otherwise
    /// nothing is solved. Solver failures are reported per pair; solutions
    /// are stored in insertion order.
    pub fn solve_pairs<S: Solver>(&mut self, keys: &[Key], solver: &S, config: &SolveConfig) -> Result<Report> {
        use rayon::iter::IntoParallelIterator;
        use rayon::iter::ParallelIterator;
        config.validate()?;
        let mut targets = keys
            .iter()
            .map(|k| self.position(k))
            .collect::<Result<Vec<usize>>>()?;
        targets.sort_unstable();
        targets.dedup();
        let views = targets
            .iter()
            .map(|i| self.problems[*i].prepared())
            .collect::<Result<Vec<Prepared<'_>>>>()?;
        log::info!("{:<32}{:<32}", "solving problems", views.len());
        let outcomes = views
            .into_par_iter()
            .map(|view| solver.solve(&view, config))
            .collect::<Vec<Result<Solution>>>();
        let mut report = Report::default();
        for (i, outcome) in targets.into_iter().zip(outcomes) {
            let problem = &mut self.problems[i];
            match outcome {
                Ok(solution) => {
                    log::debug!(
                        "{:<32}{:<32}",
                        format!("solved {}", problem.key()),
                        format!(
                            "cost {:.4} converged {} after {}",
                            solution.cost(),
                            solution.converged(),
                            solution.iterations()
                        )
                    );
                    problem.settle(solution);
                    report.succeeded.push(problem.key().clone());
                }
                Err(error) => {
                    log::warn!("{:<32}{}", format!("failed to solve {}", problem.key()), error);
                    report.failed.push((problem.key().clone(), error));
                }
            }
        }
        Ok(report)
    }

    pub fn set_xy(&mut self, key: &Key, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        self.get_mut(key)?.set_xy(matrix, tag, cost)
    }
    pub fn set_x(&mut self, key: &Key, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        self.get_mut(key)?.set_x(matrix, tag, cost)
    }
    pub fn set_y(&mut self, key: &Key, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        self.get_mut(key)?.set_y(matrix, tag, cost)
    }
    pub fn set_graph_xy(&mut self, key: &Key, adjacency: LabeledMatrix, cost: Option<&str>) -> Result<()> {
        self.get_mut(key)?.set_graph_xy(adjacency, cost)
    }

    fn position(&self, key: &Key) -> Result<usize> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }
}
