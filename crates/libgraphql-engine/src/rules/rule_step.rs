/// A single rule applied to a context of type `C`.
///
/// A step reports failure by returning `false`. Steps that fail are expected
/// to have recorded diagnostic message(s) on the context before returning.
pub trait RuleStep<C: ?Sized>: Send + Sync {
    fn execute(&self, context: &mut C) -> bool;
}

impl<C: ?Sized, F> RuleStep<C> for F
where
    F: Fn(&mut C) -> bool + Send + Sync,
{
    fn execute(&self, context: &mut C) -> bool {
        self(context)
    }
}
