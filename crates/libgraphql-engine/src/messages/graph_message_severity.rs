/// Severity of a [`GraphMessage`](super::GraphMessage). Ordered from least to
/// most severe; any [`GraphMessageSeverity::Critical`] message invalidates
/// the document, operation or plan that carries it.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
pub enum GraphMessageSeverity {
    Trace,
    Debug,
    Information,
    Warning,
    Critical,
}
impl GraphMessageSeverity {
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}
