use crate::*;
use std::sync::Arc;

/// One pairwise problem: its partitions, resolved terms, marginals and stage.
///
/// Terms change only through a committed [`Resolution`] or a manual
/// override. Either moves the instance to [`Stage::Prepared`]. The last
/// solution is kept, and reported stale until the instance is solved again.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    key: Key,
    kind: Kind,
    source: Arc<Partition>,
    target: Arc<Partition>,
    xy: Option<Tagged>,
    x: Option<Tagged>,
    y: Option<Tagged>,
    a: Marginal,
    b: Marginal,
    stage: Stage,
    solution: Option<Solution>,
}

impl ProblemInstance {
    pub fn new(key: Key, kind: Kind, source: Arc<Partition>, target: Arc<Partition>) -> Self {
        Self {
            a: Marginal::uniform(source.n()),
            b: Marginal::uniform(target.n()),
            key,
            kind,
            source,
            target,
            xy: None,
            x: None,
            y: None,
            stage: Stage::Init,
            solution: None,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn source(&self) -> &Partition {
        &self.source
    }
    pub fn target(&self) -> &Partition {
        &self.target
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn term(&self, term: Term) -> Option<&Tagged> {
        match term {
            Term::XY => self.xy.as_ref(),
            Term::X => self.x.as_ref(),
            Term::Y => self.y.as_ref(),
        }
    }
    pub fn xy(&self) -> Option<&Tagged> {
        self.xy.as_ref()
    }
    pub fn x(&self) -> Option<&Tagged> {
        self.x.as_ref()
    }
    pub fn y(&self) -> Option<&Tagged> {
        self.y.as_ref()
    }
    pub fn a(&self) -> &Marginal {
        &self.a
    }
    pub fn b(&self) -> &Marginal {
        &self.b
    }
    /// The most recent solution, which may predate the current terms.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
    /// A solution exists but was computed from terms that have since changed.
    pub fn is_stale(&self) -> bool {
        self.solution.is_some() && self.stage != Stage::Solved
    }
    /// Every term the kind requires has been resolved.
    pub fn is_complete(&self) -> bool {
        self.kind.terms().iter().all(|t| self.term(*t).is_some())
    }

    /// Resolves every required term without touching the instance. Terms the
    /// kind does not use are carried over as they are.
    pub fn resolve(&self, resolver: &Resolver<'_>) -> Result<Resolution> {
        let mut resolved = Term::ALL.map(|t| self.term(t).cloned());
        for term in self.kind.terms() {
            resolved[*term as usize] = Some(resolver.resolve(
                &self.key,
                *term,
                self.term(*term),
                &self.source,
                &self.target,
            )?);
        }
        let (a, b) = resolver.marginals(&self.source, &self.target)?;
        let [xy, x, y] = resolved;
        Ok(Resolution { xy, x, y, a, b })
    }
    pub fn commit(&mut self, resolution: Resolution) {
        self.xy = resolution.xy;
        self.x = resolution.x;
        self.y = resolution.y;
        self.a = resolution.a;
        self.b = resolution.b;
        self.advance();
    }

    /// Read-only view for a solver. The instance must be prepared and complete.
    pub fn prepared(&self) -> Result<Prepared<'_>> {
        if self.stage != Stage::Prepared {
            return Err(self.stage_error(Stage::Prepared));
        }
        if !self.is_complete() {
            return Err(Error::StageError {
                key: self.key.to_string(),
                found: format!("{} without all terms", self.stage),
                expected: format!(
                    "{} with terms {}",
                    Stage::Prepared,
                    self.kind.terms().iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
                ),
            });
        }
        Ok(Prepared {
            key: &self.key,
            kind: self.kind,
            xy: self.xy.as_ref(),
            x: self.x.as_ref(),
            y: self.y.as_ref(),
            a: &self.a,
            b: &self.b,
        })
    }
    pub fn settle(&mut self, solution: Solution) {
        self.solution = Some(solution);
        self.stage = Stage::Solved;
    }

    /// Replaces the linear term with a user matrix labelled by source rows × target rows.
    pub fn set_xy(&mut self, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        self.set(Term::XY, matrix, tag, cost)
    }
    /// Replaces the source quadratic term with a matrix labelled by source rows on both axes.
    pub fn set_x(&mut self, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        self.set(Term::X, matrix, tag, cost)
    }
    /// Replaces the target quadratic term with a matrix labelled by target rows on both axes.
    pub fn set_y(&mut self, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        self.set(Term::Y, matrix, tag, cost)
    }
    /// Replaces the linear term with a joint graph. Both axes are labelled
    /// by source rows followed by target rows; zero entries are missing edges.
    pub fn set_graph_xy(&mut self, adjacency: LabeledMatrix, cost: Option<&str>) -> Result<()> {
        let ref context = format!("graph override of {}", self.key);
        let rows = self
            .source
            .rows()
            .iter()
            .chain(self.target.rows())
            .cloned()
            .collect::<Vec<String>>();
        adjacency.align(context, &rows, &rows)?;
        let graph = Tagged::graph(Adjacency::from_dense(adjacency.values(), self.source.n())?)?;
        let graph = match cost.map(Cost::try_from).transpose()? {
            None => graph,
            Some(cost) => graph.with_cost(cost)?,
        };
        graph.conform(context, (self.source.n(), self.target.n()))?;
        self.install(Term::XY, graph);
        Ok(())
    }

    fn set(&mut self, term: Term, matrix: LabeledMatrix, tag: Tag, cost: Option<&str>) -> Result<()> {
        let ref context = format!("{} override of {}", term, self.key);
        let (rows, cols) = match term {
            Term::XY => (self.source.rows(), self.target.rows()),
            Term::X => (self.source.rows(), self.source.rows()),
            Term::Y => (self.target.rows(), self.target.rows()),
        };
        matrix.align(context, rows, cols)?;
        let expected = (rows.len(), cols.len());
        let cost = cost.map(Cost::try_from).transpose()?;
        let tagged = match tag {
            Tag::CostMatrix | Tag::Custom => Tagged::new(Payload::Matrix(matrix.into_values()), tag, cost)?,
            Tag::PointCloud | Tag::Graph => {
                return Err(Error::conflict(format!(
                    "{} takes a {} or {} matrix, not {}",
                    context,
                    Tag::CostMatrix,
                    Tag::Custom,
                    tag
                )));
            }
        };
        tagged.conform(context, expected)?;
        self.install(term, tagged);
        Ok(())
    }
    fn install(&mut self, term: Term, tagged: Tagged) {
        log::debug!("{:<32}{:<32}", format!("override {} of {}", term, self.key), tagged.to_string());
        match term {
            Term::XY => self.xy = Some(tagged),
            Term::X => self.x = Some(tagged),
            Term::Y => self.y = Some(tagged),
        }
        self.advance();
    }
    fn advance(&mut self) {
        self.stage = Stage::Prepared;
    }
    fn stage_error(&self, expected: Stage) -> Error {
        Error::StageError {
            key: self.key.to_string(),
            found: self.stage.to_string(),
            expected: expected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(kind: Kind) -> ProblemInstance {
        let ref mut rng = rand::rng();
        let a = Arc::new(Partition::uniform("a", 5, 3, rng));
        let b = Arc::new(Partition::uniform("b", 4, 3, rng));
        ProblemInstance::new(Key::new("a", "b"), kind, a, b)
    }

    fn labelled(rows: &[String], cols: &[String]) -> LabeledMatrix {
        let values = Matrix::from_fn(rows.len(), cols.len(), |i, j| (i + j) as f64);
        LabeledMatrix::new(rows.to_vec(), cols.to_vec(), values).unwrap()
    }

    #[test]
    fn override_advances_init_to_prepared() {
        let mut p = instance(Kind::Linear);
        assert_eq!(p.stage(), Stage::Init);
        assert!(p.prepared().is_err());
        let m = labelled(p.source().rows(), p.target().rows());
        p.set_xy(m, Tag::CostMatrix, None).unwrap();
        assert_eq!(p.stage(), Stage::Prepared);
        assert_eq!(p.xy().unwrap().tag(), Tag::CostMatrix);
        assert!(p.prepared().is_ok());
    }

    #[test]
    fn permuted_columns_are_a_label_mismatch() {
        let mut p = instance(Kind::Linear);
        let mut cols = p.target().rows().to_vec();
        cols.swap(0, 1);
        let m = labelled(p.source().rows(), &cols);
        assert!(matches!(
            p.set_xy(m, Tag::CostMatrix, None),
            Err(Error::LabelMismatch { axis: "columns", .. })
        ));
        assert_eq!(p.stage(), Stage::Init);
    }

    #[test]
    fn overrides_reject_point_cloud_and_graph_tags() {
        let mut p = instance(Kind::Linear);
        let m = labelled(p.source().rows(), p.target().rows());
        assert!(matches!(
            p.set_xy(m.clone(), Tag::Graph, None),
            Err(Error::ConfigConflict(_))
        ));
        assert!(matches!(
            p.set_xy(m.clone(), Tag::Custom, Some("euclidean")),
            Err(Error::UnknownCost(_))
        ));
        p.set_xy(m, Tag::CostMatrix, Some("euclidean")).unwrap();
        assert_eq!(p.xy().unwrap().cost(), Some(Cost::Euclidean));
    }

    #[test]
    fn quadratic_overrides_use_one_side() {
        let mut p = instance(Kind::Quadratic);
        let x = labelled(p.source().rows(), p.source().rows());
        let y = labelled(p.target().rows(), p.target().rows());
        p.set_x(x, Tag::CostMatrix, None).unwrap();
        assert!(!p.is_complete());
        assert!(p.prepared().is_err());
        p.set_y(y, Tag::Custom, None).unwrap();
        assert!(p.is_complete());
        assert_eq!(p.y().unwrap().shape(), (4, 4));
    }

    #[test]
    fn graph_override_spans_both_sides() {
        let mut p = instance(Kind::Linear);
        let rows = p
            .source()
            .rows()
            .iter()
            .chain(p.target().rows())
            .cloned()
            .collect::<Vec<String>>();
        let chain = Matrix::from_fn(9, 9, |i, j| if i.abs_diff(j) == 1 { 1. } else { 0. });
        let adjacency = LabeledMatrix::new(rows.clone(), rows, chain).unwrap();
        p.set_graph_xy(adjacency, None).unwrap();
        let xy = p.xy().unwrap();
        assert_eq!(xy.tag(), Tag::Graph);
        assert_eq!(xy.shape(), (5, 4));
        assert_eq!(xy.materialize().unwrap()[(4, 0)], 1.);
    }

    #[test]
    fn override_after_solve_keeps_stale_solution() {
        let mut p = instance(Kind::Linear);
        let m = labelled(p.source().rows(), p.target().rows());
        p.set_xy(m.clone(), Tag::CostMatrix, None).unwrap();
        p.settle(Solution::new(Matrix::zeros(5, 4), 0., true, 1, 0.));
        assert_eq!(p.stage(), Stage::Solved);
        assert!(matches!(p.prepared(), Err(Error::StageError { .. })));
        p.set_xy(m, Tag::CostMatrix, None).unwrap();
        assert_eq!(p.stage(), Stage::Prepared);
        assert!(p.solution().is_some());
        assert!(p.is_stale());
        assert!(p.prepared().is_ok());
    }
}
