use crate::*;
use std::collections::BTreeMap;

/// Name → strategy table, scoped to one problem registry.
///
/// Built-in names always resolve to the built-in strategies and cannot be
/// shadowed. Custom entries live as long as the table does.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    custom: BTreeMap<String, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    /// Registers a named closure, replacing any earlier custom entry of that name.
    pub fn register<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(Term, &Partition, &Partition, &Options) -> anyhow::Result<Tagged> + Send + Sync + 'static,
    {
        if Callback::try_from(name).is_ok() {
            return Err(Error::conflict(format!(
                "{} is a built-in callback and cannot be replaced",
                name
            )));
        }
        log::debug!("{:<32}{:<32}", "registering callback", name);
        self.custom.insert(name.to_string(), Callback::custom(name, f));
        Ok(())
    }
    pub fn deregister(&mut self, name: &str) -> Option<Callback> {
        self.custom.remove(name)
    }
    pub fn lookup(&self, name: &str) -> Result<Callback> {
        Callback::try_from(name).or_else(|e| self.custom.get(name).cloned().ok_or(e))
    }
    pub fn resolve(&self, reference: &CallbackRef) -> Result<Callback> {
        match reference {
            CallbackRef::Named(name) => self.lookup(name),
            CallbackRef::Inline(callback) => Ok(callback.clone()),
        }
    }
    /// Built-in names followed by custom names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        Callback::BUILTIN
            .into_iter()
            .chain(self.custom.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(_: Term, a: &Partition, b: &Partition, _: &Options) -> anyhow::Result<Tagged> {
        Ok(Tagged::cost_matrix(Matrix::zeros(a.n(), b.n()))?)
    }

    #[test]
    fn builtins_cannot_be_shadowed() {
        let mut registry = CallbackRegistry::new();
        assert!(matches!(
            registry.register("local-pca", echo),
            Err(Error::ConfigConflict(_))
        ));
        assert!(registry.lookup("local-pca").unwrap().is_builtin());
    }

    #[test]
    fn custom_entries_resolve_until_removed() {
        let mut registry = CallbackRegistry::new();
        assert!(matches!(registry.lookup("echo"), Err(Error::UnknownCallback(_))));
        registry.register("echo", echo).unwrap();
        assert_eq!(registry.lookup("echo").unwrap().name(), "echo");
        assert!(registry.names().any(|n| n == "echo"));
        assert!(registry.deregister("echo").is_some());
        assert!(registry.lookup("echo").is_err());
    }

    #[test]
    fn inline_references_bypass_the_table() {
        let registry = CallbackRegistry::new();
        let inline = CallbackRef::from(Callback::custom("inline", echo));
        assert_eq!(registry.resolve(&inline).unwrap().name(), "inline");
        let named = serde_json::from_str::<CallbackRef>(r#""spatial-norm""#).unwrap();
        assert_eq!(registry.resolve(&named).unwrap().name(), "spatial-norm");
    }
}
