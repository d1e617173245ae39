use crate::*;
use std::sync::Arc;

/// User closure computing a representation for `term` of the pair
/// (source, target). For `x` and `y` both partitions are the same side.
pub type Callable =
    dyn Fn(Term, &Partition, &Partition, &Options) -> anyhow::Result<Tagged> + Send + Sync;

/// A strategy that turns two partitions into a [`Tagged`] representation.
#[derive(Clone)]
pub enum Callback {
    LocalPca,
    GraphConstruction,
    SpatialNorm,
    Custom(String, Arc<Callable>),
}

impl Callback {
    pub const BUILTIN: [&'static str; 3] = ["local-pca", "graph-construction", "spatial-norm"];

    pub fn custom<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Term, &Partition, &Partition, &Options) -> anyhow::Result<Tagged> + Send + Sync + 'static,
    {
        Self::Custom(name.into(), Arc::new(f))
    }
    pub fn name(&self) -> &str {
        match self {
            Self::LocalPca => "local-pca",
            Self::GraphConstruction => "graph-construction",
            Self::SpatialNorm => "spatial-norm",
            Self::Custom(name, _) => name,
        }
    }
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(..))
    }

    /// Runs the strategy and checks that its output describes exactly the
    /// rows it was given: `(source.n(), target.n())`.
    pub fn invoke(&self, term: Term, source: &Partition, target: &Partition, options: &Options) -> Result<Tagged> {
        let output = match self {
            Self::LocalPca => local_pca(term, source, target, options)?,
            Self::GraphConstruction => graph_construction(term, source, target, options)?,
            Self::SpatialNorm => spatial_norm(term, source, target, options)?,
            Self::Custom(name, f) => {
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(term, source, target, options)))
                    .map_err(|payload| Self::panicked(name, payload))?
                    .map_err(|e| Self::failure(name, e))?
            }
        };
        let expected = (source.n(), target.n());
        match output.shape() == expected {
            true => Ok(output),
            false => Err(Error::TypeMismatch {
                callback: self.name().to_string(),
                reason: format!(
                    "{} for term {} of ({}, {}) describes {:?} rows, expected {:?}",
                    output,
                    term,
                    source.label(),
                    target.label(),
                    output.shape(),
                    expected
                ),
            }),
        }
    }

    /// Crate errors raised inside a closure pass through; anything else is wrapped.
    fn failure(name: &str, error: anyhow::Error) -> Error {
        match error.downcast::<Error>() {
            Ok(error) => error,
            Err(error) => Error::Callback {
                name: name.to_string(),
                message: format!("{:#}", error),
            },
        }
    }

    fn panicked(name: &str, payload: Box<dyn std::any::Any + Send>) -> Error {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| String::from("unknown panic"));
        log::warn!("{:<32}{:<32}", "callback panicked", name);
        Error::Callback {
            name: name.to_string(),
            message: format!("panicked: {}", message),
        }
    }
}

impl TryFrom<&str> for Callback {
    type Error = Error;
    fn try_from(name: &str) -> Result<Self> {
        match name {
            "local-pca" | "local_pca" => Ok(Self::LocalPca),
            "graph-construction" | "graph_construction" | "graph" => Ok(Self::GraphConstruction),
            "spatial-norm" | "spatial_norm" => Ok(Self::SpatialNorm),
            _ => Err(Error::UnknownCallback(name.to_string())),
        }
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Custom(name, _) => write!(f, "Custom({})", name),
            builtin => write!(f, "{}", builtin.name()),
        }
    }
}

impl std::fmt::Display for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_parse() {
        for name in Callback::BUILTIN {
            let callback = Callback::try_from(name).unwrap();
            assert_eq!(callback.name(), name);
            assert!(callback.is_builtin());
        }
        assert!(matches!(
            Callback::try_from("umap"),
            Err(Error::UnknownCallback(_))
        ));
    }

    #[test]
    fn non_conforming_output_is_type_mismatch() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 5, 2, rng);
        let b = Partition::uniform("b", 4, 2, rng);
        let wrong = Callback::custom("wrong", |_, _, _, _| Ok(Tagged::cost_matrix(Matrix::zeros(3, 3))?));
        assert!(matches!(
            wrong.invoke(Term::XY, &a, &b, &Options::new()),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn closure_errors_are_wrapped_or_passed_through() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 3, 2, rng);
        let foreign = Callback::custom("foreign", |_, _, _, _| Err(anyhow::anyhow!("no network")));
        match foreign.invoke(Term::XY, &a, &a, &Options::new()) {
            Err(Error::Callback { name, message }) => {
                assert_eq!(name, "foreign");
                assert_eq!(message, "no network");
            }
            other => panic!("unexpected {:?}", other.map(|t| t.to_string())),
        }
        let native = Callback::custom("native", |_, p: &Partition, _, _| {
            p.embedding("umap")?;
            unreachable!()
        });
        assert!(matches!(
            native.invoke(Term::XY, &a, &a, &Options::new()),
            Err(Error::MissingAttribute { .. })
        ));
    }

    #[test]
    fn closure_panics_become_callback_errors() {
        let ref mut rng = rand::rng();
        let a = Partition::uniform("a", 3, 2, rng);
        let broken = Callback::custom("broken", |_, _, _, _| panic!("index out of range"));
        match broken.invoke(Term::XY, &a, &a, &Options::new()) {
            Err(Error::Callback { name, message }) => {
                assert_eq!(name, "broken");
                assert!(message.contains("index out of range"));
            }
            other => panic!("unexpected {:?}", other.map(|t| t.to_string())),
        }
    }
}
