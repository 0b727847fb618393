//! A small, generic rule engine.
//!
//! Both document construction and document validation are expressed as
//! ordered lists of [`RuleStep`]s executed by a [`RuleProcessor`] against a
//! shared, mutable context.

mod rule_processor;
mod rule_step;

pub use rule_processor::RuleProcessor;
pub use rule_step::RuleStep;
