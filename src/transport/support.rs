/// Marker trait for the atoms a distribution places mass on.
///
/// Prepared problems index observations by row position, so the only
/// implementation needed is `usize`.
pub trait Support: Clone {}

impl Support for usize {}
