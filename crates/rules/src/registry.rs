//! Process-wide registry of the currently effective rule set.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::schema::FlowRule;

/// Holds the rule set currently in force for enforcement elsewhere.
///
/// The set is replaced wholesale by swapping an inner `Arc` under a
/// short write lock, so readers either see the old set or the new one,
/// never a mix, and snapshots handed out by [`current`](Self::current)
/// stay valid across later replacements.
pub struct LocalRuleRegistry {
    rules: RwLock<Arc<Vec<FlowRule>>>,
}

impl LocalRuleRegistry {
    /// Create an empty registry ("no rules yet" is the safe initial state).
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Atomically replace the effective rule set.
    pub fn replace(&self, rules: Vec<FlowRule>) {
        let next = Arc::new(rules);
        debug!(count = next.len(), "replacing effective rule set");
        *self.rules.write().expect("rule registry lock poisoned") = next;
    }

    /// Snapshot of the current rule set. Cheap (one `Arc` clone) and
    /// immutable: later `replace` calls do not affect it.
    pub fn current(&self) -> Arc<Vec<FlowRule>> {
        Arc::clone(&self.rules.read().expect("rule registry lock poisoned"))
    }

    /// Number of rules currently in force.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LocalRuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
