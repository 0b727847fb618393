use crate::InputValue;
use crate::document::DirectivePart;
use crate::loc::SourceLocation;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

/// A directive attached to a field at plan time. Its arguments keep variable
/// references symbolic so the same plan can serve every request.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionDirective {
    pub(crate) arguments: IndexMap<String, InputValue>,
    pub(crate) location: SourceLocation,
    pub(crate) name: String,
}
impl ExecutionDirective {
    pub(crate) fn from_part(directive: &DirectivePart, location: SourceLocation) -> Self {
        Self {
            arguments: directive.arguments()
                .iter()
                .map(|arg| (arg.name().to_string(), InputValue::from_ast(arg.value())))
                .collect(),
            location,
            name: directive.name().to_string(),
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValue> {
        &self.arguments
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The directive's arguments with the request's variables substituted.
    /// Arguments referring to variables the request did not supply are left
    /// out.
    pub fn resolve_arguments(&self, variables: &Map<String, Value>) -> Map<String, Value> {
        self.arguments.iter()
            .filter_map(|(name, value)| {
                value.resolve(variables).map(|value| (name.to_string(), value))
            })
            .collect()
    }
}
