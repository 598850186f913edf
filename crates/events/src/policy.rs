//! Per-operation-type pre-event policy.

use std::collections::HashMap;

use crate::event::OperationType;

/// Controls which operation types emit a pre-event.
///
/// The default emits pre-events for mutating operations only: reads have
/// no state to protect. The setting is explicit per operation type
/// rather than inferred, so deployments that audit reads can opt in.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    pre_events: HashMap<OperationType, bool>,
}

impl DispatchPolicy {
    /// Overrides the pre-event setting for one operation type.
    pub fn with_pre_event(mut self, operation: OperationType, enabled: bool) -> Self {
        self.pre_events.insert(operation, enabled);
        self
    }

    /// Whether an invocation of this operation type emits a pre-event.
    pub fn requires_pre_event(&self, operation: OperationType) -> bool {
        self.pre_events.get(&operation).copied().unwrap_or(false)
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        let pre_events = [
            (OperationType::Create, true),
            (OperationType::Alter, true),
            (OperationType::Drop, true),
            (OperationType::Get, false),
            (OperationType::List, false),
        ]
        .into_iter()
        .collect();
        Self { pre_events }
    }
}
