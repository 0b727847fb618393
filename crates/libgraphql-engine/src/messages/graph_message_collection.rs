use crate::messages::GraphMessage;
use crate::messages::GraphMessageSeverity;

/// An ordered, append-only collection of [`GraphMessage`]s that tracks the
/// highest severity it has seen.
#[derive(Clone, Debug, Default)]
pub struct GraphMessageCollection {
    messages: Vec<GraphMessage>,
    severity: Option<GraphMessageSeverity>,
}
impl GraphMessageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: GraphMessage) {
        self.severity = Some(match self.severity {
            Some(current) if current >= message.severity => current,
            _ => message.severity,
        });
        self.messages.push(message);
    }

    pub fn add_range(&mut self, messages: impl IntoIterator<Item = GraphMessage>) {
        for message in messages {
            self.add(message);
        }
    }

    pub fn has_critical(&self) -> bool {
        self.severity.is_some_and(|severity| severity.is_critical())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `true` when no message at or above [`GraphMessageSeverity::Critical`]
    /// has been recorded.
    pub fn is_successful(&self) -> bool {
        !self.has_critical()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn severity(&self) -> Option<GraphMessageSeverity> {
        self.severity
    }
}
impl<'a> IntoIterator for &'a GraphMessageCollection {
    type Item = &'a GraphMessage;
    type IntoIter = std::slice::Iter<'a, GraphMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
impl IntoIterator for GraphMessageCollection {
    type Item = GraphMessage;
    type IntoIter = std::vec::IntoIter<GraphMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
impl FromIterator<GraphMessage> for GraphMessageCollection {
    fn from_iter<I: IntoIterator<Item = GraphMessage>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.add_range(iter);
        collection
    }
}
