mod argument_rules;
mod directive_rules;
mod document_rules;
mod field_rules;
mod fragment_rules;
mod operation_rules;
mod variable_rules;

pub(crate) use argument_rules::ArgumentNames;
pub(crate) use argument_rules::ArgumentUniqueness;
pub(crate) use argument_rules::ArgumentValues;
pub(crate) use argument_rules::RequiredArguments;
pub(crate) use directive_rules::DirectivesAreDefined;
pub(crate) use directive_rules::DirectivesInValidLocations;
pub(crate) use directive_rules::DirectivesUniquePerLocation;
pub(crate) use document_rules::FragmentNameUniqueness;
pub(crate) use document_rules::FragmentSpreadsMustNotFormCycles;
pub(crate) use document_rules::FragmentsMustBeUsed;
pub(crate) use document_rules::LoneAnonymousOperation;
pub(crate) use document_rules::OperationNameUniqueness;
pub(crate) use field_rules::FieldSelectionMerging;
pub(crate) use field_rules::FieldSelectionsOnType;
pub(crate) use field_rules::LeafFieldSelections;
pub(crate) use fragment_rules::FragmentOnCompositeType;
pub(crate) use fragment_rules::FragmentSpreadIsPossible;
pub(crate) use fragment_rules::FragmentTypeExists;
pub(crate) use operation_rules::SubscriptionSingleRootField;
pub(crate) use variable_rules::AllVariableUsagesAllowed;
pub(crate) use variable_rules::AllVariableUsesDefined;
pub(crate) use variable_rules::AllVariablesUsed;
pub(crate) use variable_rules::VariableDefaultValues;
pub(crate) use variable_rules::VariableUniqueness;
pub(crate) use variable_rules::VariablesAreInputTypes;
