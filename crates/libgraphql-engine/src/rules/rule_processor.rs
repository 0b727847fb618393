use crate::rules::RuleStep;

/// Runs an ordered set of rule chains against a context.
///
/// Each chain is a list of dependent steps: the first failing step in a chain
/// stops the remainder of that chain from running. Chains are independent of
/// one another, so a failure in one chain never prevents the next chain from
/// executing.
pub struct RuleProcessor<C: ?Sized> {
    chains: Vec<Vec<Box<dyn RuleStep<C>>>>,
}
impl<C: ?Sized> RuleProcessor<C> {
    pub fn new() -> Self {
        Self { chains: vec![] }
    }

    /// Append a chain of dependent steps.
    pub fn with_chain(mut self, steps: Vec<Box<dyn RuleStep<C>>>) -> Self {
        self.chains.push(steps);
        self
    }

    /// Append a single independent step.
    pub fn with_step(self, step: impl RuleStep<C> + 'static) -> Self {
        self.with_chain(vec![Box::new(step)])
    }

    /// Execute every chain against `context`, returning `true` only if every
    /// step that ran succeeded.
    pub fn execute(&self, context: &mut C) -> bool {
        let mut completed_all_steps = true;
        for chain in &self.chains {
            for step in chain {
                if !step.execute(context) {
                    completed_all_steps = false;
                    break;
                }
            }
        }
        completed_all_steps
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
impl<C: ?Sized> Default for RuleProcessor<C> {
    fn default() -> Self {
        Self::new()
    }
}
