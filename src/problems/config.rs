use crate::*;
use serde::Deserialize;
use serde::Serialize;

/// How one term should be computed.
///
/// At most one of `callback` and `attr` may be set. `tag` only applies to
/// block attributes, which may be read as a cost matrix (default), a graph
/// or an opaque custom payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TermConfig {
    pub attr: Option<Attr>,
    pub callback: Option<CallbackRef>,
    pub options: Options,
    pub cost: Option<String>,
    pub tag: Option<Tag>,
}

impl TermConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn attr(mut self, attr: Attr) -> Self {
        self.attr = Some(attr);
        self
    }
    pub fn callback(mut self, callback: impl Into<CallbackRef>) -> Self {
        self.callback = Some(callback.into());
        self
    }
    pub fn option(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with(key, value);
        self
    }
    pub fn cost(mut self, cost: &str) -> Self {
        self.cost = Some(cost.to_string());
        self
    }
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Per-term instruction for a preparation pass.
///
/// In JSON: absent or `null` for the default, `"keep"` to retain whatever
/// the instance already holds, or a [`TermConfig`] object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RawSpec")]
pub enum TermSpec {
    /// Squared Euclidean cost over raw features.
    #[default]
    Default,
    /// Retain the existing term; resolve as `Default` if there is none.
    Keep,
    Configured(TermConfig),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Null(()),
    Sentinel(String),
    Config(TermConfig),
}

impl TryFrom<RawSpec> for TermSpec {
    type Error = String;
    fn try_from(raw: RawSpec) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawSpec::Null(()) => Ok(Self::Default),
            RawSpec::Sentinel(s) if s == "keep" => Ok(Self::Keep),
            RawSpec::Sentinel(s) if s == "default" => Ok(Self::Default),
            RawSpec::Sentinel(s) => Err(format!("unknown term instruction {:?}", s)),
            RawSpec::Config(config) => Ok(Self::Configured(config)),
        }
    }
}

impl From<TermConfig> for TermSpec {
    fn from(config: TermConfig) -> Self {
        Self::Configured(config)
    }
}

/// What to do when some pairs fail to prepare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Report failed pairs and commit the rest.
    #[default]
    Skip,
    /// Return the first failure and commit nothing.
    Abort,
}

/// Configuration of one preparation pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepareConfig {
    pub xy: TermSpec,
    pub x: TermSpec,
    pub y: TermSpec,
    /// Standardize the spatial embedding when a term reads it as an attribute.
    pub normalize_spatial: bool,
    pub spatial_key: String,
    /// Source annotation used as the source marginal; uniform when absent.
    pub a: Option<String>,
    /// Target annotation used as the target marginal; uniform when absent.
    pub b: Option<String>,
    pub on_error: OnError,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            xy: TermSpec::Default,
            x: TermSpec::Default,
            y: TermSpec::Default,
            normalize_spatial: false,
            spatial_key: SPATIAL_KEY.to_string(),
            a: None,
            b: None,
            on_error: OnError::default(),
        }
    }
}

impl PrepareConfig {
    pub fn term(&self, term: Term) -> &TermSpec {
        match term {
            Term::XY => &self.xy,
            Term::X => &self.x,
            Term::Y => &self.y,
        }
    }
    pub fn with(mut self, term: Term, spec: impl Into<TermSpec>) -> Self {
        let spec = spec.into();
        match term {
            Term::XY => self.xy = spec,
            Term::X => self.x = spec,
            Term::Y => self.y = spec,
        }
        self
    }
    pub fn keep(self, term: Term) -> Self {
        self.with(term, TermSpec::Keep)
    }
    pub fn marginals(mut self, a: Option<&str>, b: Option<&str>) -> Self {
        self.a = a.map(str::to_string);
        self.b = b.map(str::to_string);
        self
    }
    pub fn on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }
    /// Rejects configuration of terms that `kind` problems never read.
    pub fn validate(&self, kind: Kind) -> Result<()> {
        match Term::ALL
            .into_iter()
            .filter(|t| !kind.requires(*t))
            .find(|t| matches!(self.term(*t), TermSpec::Configured(_)))
        {
            None => Ok(()),
            Some(term) => Err(Error::conflict(format!(
                "term {} is configured but {} problems do not use it",
                term, kind
            ))),
        }
    }
}
