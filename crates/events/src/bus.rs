//! The listener dispatch bus.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use catalog::{CatalogError, Result};
use uuid::Uuid;

use crate::event::{Event, OperationContext, OperationOutcome, OperationType};
use crate::listener::EventListener;
use crate::policy::DispatchPolicy;

struct Registration {
    listener: Arc<dyn EventListener>,
    filter: Option<HashSet<OperationType>>,
}

impl Registration {
    fn accepts(&self, operation: OperationType) -> bool {
        match &self.filter {
            Some(filter) => filter.contains(&operation),
            None => true,
        }
    }
}

/// Fans catalog events out to registered listeners.
///
/// Registration happens at service start, before steady-state traffic;
/// dispatch only reads the registry, so concurrent invocations share one
/// bus behind an `Arc` without further locking. Delivery is synchronous,
/// in registration order, and a failing listener never affects the
/// guarded operation or the remaining listeners.
pub struct EventBus {
    registrations: Vec<Registration>,
    policy: DispatchPolicy,
    observer_failures: AtomicU64,
}

impl EventBus {
    /// Creates a bus with the default pre-event policy.
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    /// Creates a bus with an explicit pre-event policy.
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            registrations: Vec::new(),
            policy,
            observer_failures: AtomicU64::new(0),
        }
    }

    /// Registers a listener for all events.
    pub fn register(&mut self, listener: Arc<dyn EventListener>) {
        self.registrations.push(Registration {
            listener,
            filter: None,
        });
    }

    /// Registers a listener for a subset of operation types.
    pub fn register_filtered(
        &mut self,
        listener: Arc<dyn EventListener>,
        operations: impl IntoIterator<Item = OperationType>,
    ) {
        self.registrations.push(Registration {
            listener,
            filter: Some(operations.into_iter().collect()),
        });
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registrations.len()
    }

    /// The active pre-event policy.
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Total listener failures absorbed since the bus was created.
    /// Side channel only; never part of an operation's result.
    pub fn observer_failures(&self) -> u64 {
        self.observer_failures.load(Ordering::Relaxed)
    }

    /// Runs `op` bracketed by events.
    ///
    /// Malformed descriptors and empty alter change lists are rejected
    /// before any event is emitted. The pre-event (when the policy asks
    /// for one) completes delivery to every listener before `op` runs;
    /// exactly one terminal event follows, and a failing `op` has its
    /// error re-returned unchanged after the failure event is delivered.
    pub async fn guard<T, F, Fut>(&self, ctx: OperationContext, op: F) -> Result<T>
    where
        T: OperationOutcome,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for change in ctx.changes() {
            change.validate()?;
        }
        if ctx.operation() == OperationType::Alter && ctx.changes().is_empty() {
            return Err(CatalogError::Validation(
                "alter requires at least one change".to_string(),
            ));
        }

        let correlation_id = Uuid::new_v4();

        if self.policy.requires_pre_event(ctx.operation()) {
            self.emit(&Event::pre(&ctx, correlation_id));
        }

        match op().await {
            Ok(outcome) => {
                self.emit(&Event::success(
                    &ctx,
                    outcome.success_payload(),
                    correlation_id,
                ));
                Ok(outcome)
            }
            Err(err) => {
                self.emit(&Event::failure(&ctx, err.kind(), correlation_id));
                Err(err)
            }
        }
    }

    fn emit(&self, event: &Event) {
        for registration in &self.registrations {
            if !registration.accepts(event.operation_type()) {
                continue;
            }

            match registration.listener.on_event(event) {
                Ok(()) => {
                    metrics::counter!("catalog_events_delivered").increment(1);
                }
                Err(error) => {
                    self.observer_failures.fetch_add(1, Ordering::Relaxed);
                    metrics::counter!("catalog_listener_failures").increment(1);
                    tracing::warn!(
                        listener = registration.listener.name(),
                        operation = %event.operation_type(),
                        phase = ?event.phase(),
                        identifier = %event.identifier(),
                        %error,
                        "listener failed handling event"
                    );
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
