use indexmap::IndexMap;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Timings and counters gathered for a single request when metrics are
/// enabled on its execution context.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    fields_resolved: AtomicUsize,
    phases: Mutex<IndexMap<&'static str, Duration>>,
    resolver_invocations: AtomicUsize,
}
impl QueryMetrics {
    pub const PHASE_EXECUTION: &'static str = "execution";
    pub const PHASE_PLAN_LOOKUP: &'static str = "plan_lookup";
    pub const PHASE_PLANNING: &'static str = "planning";
    pub const PHASE_VARIABLES: &'static str = "variables";

    pub fn new() -> Self {
        Self::default()
    }

    /// How many field values (one per source item) were produced.
    pub fn fields_resolved(&self) -> usize {
        self.fields_resolved.load(Ordering::Relaxed)
    }

    /// How many times a user-supplied field resolver was invoked. A batch
    /// resolver counts once per batch.
    pub fn resolver_invocations(&self) -> usize {
        self.resolver_invocations.load(Ordering::Relaxed)
    }

    pub fn phase(&self, name: &str) -> Option<Duration> {
        self.phases.lock().ok()?.get(name).copied()
    }

    /// Every recorded phase in the order it was first recorded.
    pub fn phases(&self) -> Vec<(&'static str, Duration)> {
        match self.phases.lock() {
            Ok(phases) => phases.iter().map(|(name, elapsed)| (*name, *elapsed)).collect(),
            Err(_) => vec![],
        }
    }

    /// Add `elapsed` to the named phase.
    pub fn record_phase(&self, name: &'static str, elapsed: Duration) {
        if let Ok(mut phases) = self.phases.lock() {
            *phases.entry(name).or_default() += elapsed;
        }
    }

    pub(crate) fn add_fields_resolved(&self, count: usize) {
        self.fields_resolved.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn add_resolver_invocation(&self) {
        self.resolver_invocations.fetch_add(1, Ordering::Relaxed);
    }
}
