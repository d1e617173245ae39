use crate::*;

/// Everything a preparation pass decided for one instance.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub xy: Option<Tagged>,
    pub x: Option<Tagged>,
    pub y: Option<Tagged>,
    pub a: Marginal,
    pub b: Marginal,
}

/// Resolves terms by precedence, reading but never mutating shared state.
///
/// For each term, in order:
/// 1. `Keep` with an existing term retains it
/// 2. a configured callback is invoked
/// 3. a configured attribute is read from the partitions or a dataset block
/// 4. otherwise squared Euclidean cost over raw features
///
/// `xy` sees (source, target). `x` sees (source, source) and `y` sees
/// (target, target), so quadratic terms never observe each other's config.
pub struct Resolver<'a> {
    dataset: &'a Dataset,
    callbacks: &'a CallbackRegistry,
    config: &'a PrepareConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(dataset: &'a Dataset, callbacks: &'a CallbackRegistry, config: &'a PrepareConfig) -> Self {
        Self {
            dataset,
            callbacks,
            config,
        }
    }

    pub fn resolve(
        &self,
        key: &Key,
        term: Term,
        existing: Option<&Tagged>,
        source: &Partition,
        target: &Partition,
    ) -> Result<Tagged> {
        let (left, right) = match term {
            Term::XY => (source, target),
            Term::X => (source, source),
            Term::Y => (target, target),
        };
        let ref context = format!("{} of {}", term, key);
        let resolved = match (self.config.term(term), existing) {
            (TermSpec::Keep, Some(existing)) => existing.clone(),
            (TermSpec::Configured(config), _) => self.configured(term, config, left, right, context)?,
            (TermSpec::Default | TermSpec::Keep, _) => Self::fallback(left, right)?,
        };
        resolved.conform(context, (left.n(), right.n()))?;
        log::debug!("{:<32}{:<32}", context, resolved.to_string());
        Ok(resolved)
    }

    /// Marginal from the named annotation, uniform when unnamed.
    pub fn marginal(partition: &Partition, annotation: Option<&str>) -> Result<Marginal> {
        match annotation {
            None => Ok(Marginal::uniform(partition.n())),
            Some(key) => Marginal::weights(
                &format!("{} of {}", key, partition.label()),
                partition.annotation(key)?,
            ),
        }
    }
    pub fn marginals(&self, source: &Partition, target: &Partition) -> Result<(Marginal, Marginal)> {
        Ok((
            Self::marginal(source, self.config.a.as_deref())?,
            Self::marginal(target, self.config.b.as_deref())?,
        ))
    }

    fn configured(
        &self,
        term: Term,
        config: &TermConfig,
        left: &Partition,
        right: &Partition,
        context: &str,
    ) -> Result<Tagged> {
        let cost = config.cost.as_deref().map(Cost::try_from).transpose()?;
        match (&config.callback, &config.attr) {
            (Some(callback), Some(attr)) => Err(Error::conflict(format!(
                "{} configures both callback {} and attribute {}",
                context, callback, attr
            ))),
            (Some(callback), None) => {
                if let Some(tag) = config.tag {
                    return Err(Error::conflict(format!(
                        "{} requests tag {} but callback {} chooses its own",
                        context, tag, callback
                    )));
                }
                let callback = self.callbacks.resolve(callback)?;
                let output = callback.invoke(term, left, right, &config.options)?;
                match (cost, output.tag()) {
                    (None, _) => Ok(output),
                    (Some(cost), Tag::PointCloud | Tag::Custom) => Err(Error::conflict(format!(
                        "{} requests cost {} but callback {} already returns a {} representation",
                        context,
                        cost,
                        callback,
                        output.tag()
                    ))),
                    (Some(cost), _) => output.with_cost(cost),
                }
            }
            (None, Some(attr)) => {
                if !config.options.is_empty() {
                    return Err(Error::conflict(format!(
                        "{} passes callback options without a callback",
                        context
                    )));
                }
                self.attribute(term, attr, config.tag, cost, left, right)
            }
            (None, None) => {
                if !config.options.is_empty() || config.tag.is_some() {
                    return Err(Error::conflict(format!(
                        "{} passes options or a tag without a callback or attribute",
                        context
                    )));
                }
                let fallback = Self::fallback(left, right)?;
                match cost {
                    None => Ok(fallback),
                    Some(cost) => fallback.with_cost(cost),
                }
            }
        }
    }

    fn attribute(
        &self,
        term: Term,
        attr: &Attr,
        tag: Option<Tag>,
        cost: Option<Cost>,
        left: &Partition,
        right: &Partition,
    ) -> Result<Tagged> {
        match attr {
            Attr::Features | Attr::Embedding(_) => match tag.unwrap_or(Tag::PointCloud) {
                Tag::PointCloud => Tagged::point_cloud(
                    self.read(attr, left)?,
                    self.read(attr, right)?,
                    cost.unwrap_or_default(),
                ),
                tag => Err(Error::conflict(format!(
                    "per-row attribute {} can only be read as {}, not {}",
                    attr,
                    Tag::PointCloud,
                    tag
                ))),
            },
            Attr::Block(name) => {
                let block = self.dataset.block(name)?;
                let ref context = format!("block {}", name);
                let tagged = match tag.unwrap_or(Tag::CostMatrix) {
                    Tag::CostMatrix => Tagged::cost_matrix(block.slice(context, left.rows(), right.rows())?)?,
                    Tag::Custom => Tagged::new(
                        Payload::Matrix(block.slice(context, left.rows(), right.rows())?),
                        Tag::Custom,
                        None,
                    )?,
                    Tag::Graph => {
                        let rows = match term {
                            Term::XY => left.rows().iter().chain(right.rows()).cloned().collect(),
                            Term::X | Term::Y => left.rows().to_vec(),
                        };
                        let ref dense = block.slice(context, &rows, &rows)?;
                        Tagged::graph(Adjacency::from_dense(dense, left.n())?)?
                    }
                    Tag::PointCloud => {
                        return Err(Error::conflict(format!(
                            "block {} holds costs and cannot be read as {}",
                            name,
                            Tag::PointCloud
                        )));
                    }
                };
                match cost {
                    None => Ok(tagged),
                    Some(cost) => tagged.with_cost(cost),
                }
            }
        }
    }

    /// Per-row attribute, standardized when it is the spatial embedding and
    /// spatial normalization is on.
    fn read(&self, attr: &Attr, partition: &Partition) -> Result<Matrix> {
        let values = partition.attribute(attr)?;
        match attr {
            Attr::Embedding(key) if self.config.normalize_spatial && *key == self.config.spatial_key => {
                Ok(standardize(values))
            }
            _ => Ok(values.clone()),
        }
    }

    fn fallback(left: &Partition, right: &Partition) -> Result<Tagged> {
        Tagged::point_cloud(left.features().clone(), right.features().clone(), Cost::default())
    }
}
