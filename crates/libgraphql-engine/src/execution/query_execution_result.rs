use crate::execution::QueryMetrics;
use crate::messages::GraphMessage;
use crate::messages::GraphMessageCollection;
use serde_json::Value;
use std::sync::Arc;

/// The outcome of one request: whatever data resolved, plus every message
/// recorded while planning and executing it.
#[derive(Debug, Default)]
pub struct QueryExecutionResult {
    pub(crate) data: Option<Value>,
    pub(crate) messages: GraphMessageCollection,
    pub(crate) metrics: Option<Arc<QueryMetrics>>,
}
impl QueryExecutionResult {
    pub(crate) fn empty(metrics: Option<Arc<QueryMetrics>>) -> Self {
        Self {
            data: None,
            messages: GraphMessageCollection::new(),
            metrics,
        }
    }

    pub(crate) fn failed(message: GraphMessage, metrics: Option<Arc<QueryMetrics>>) -> Self {
        Self {
            data: None,
            messages: GraphMessageCollection::from_iter([message]),
            metrics,
        }
    }

    pub(crate) fn with_messages(
        messages: GraphMessageCollection,
        metrics: Option<Arc<QueryMetrics>>,
    ) -> Self {
        Self {
            data: None,
            messages,
            metrics,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn messages(&self) -> &GraphMessageCollection {
        &self.messages
    }

    pub fn metrics(&self) -> Option<&Arc<QueryMetrics>> {
        self.metrics.as_ref()
    }

    pub fn is_successful(&self) -> bool {
        self.messages.is_successful()
    }
}
