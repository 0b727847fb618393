pub mod codes;
mod graph_message;
mod graph_message_collection;
mod graph_message_severity;
mod response_path;

pub use graph_message::GraphMessage;
pub use graph_message_collection::GraphMessageCollection;
pub use graph_message_severity::GraphMessageSeverity;
pub use response_path::PathSegment;
pub use response_path::ResponsePath;
