//! Pairwise problems: their keys, lifecycle, configuration and registry.
mod config;
mod instance;
mod key;
mod kind;
mod policy;
mod registry;
mod report;
mod resolver;
mod stage;
mod term;

pub use config::*;
pub use instance::*;
pub use key::*;
pub use kind::*;
pub use policy::*;
pub use registry::*;
pub use report::*;
pub use resolver::*;
pub use stage::*;
pub use term::*;
