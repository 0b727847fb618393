//! Machine-readable codes attached to every [`GraphMessage`](super::GraphMessage).

pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const INVALID_DOCUMENT: &str = "INVALID_DOCUMENT";
pub const INVALID_RESULT: &str = "INVALID_RESULT";
pub const INVALID_VARIABLE_VALUE: &str = "INVALID_VARIABLE_VALUE";
pub const OPERATION_CANCELED: &str = "OPERATION_CANCELED";
pub const OPERATION_TIMEOUT: &str = "OPERATION_TIMEOUT";
pub const REQUEST_ABORTED: &str = "REQUEST_ABORTED";
pub const SYNTAX_ERROR: &str = "SYNTAX_ERROR";
pub const UNHANDLED_EXCEPTION: &str = "UNHANDLED_EXCEPTION";
