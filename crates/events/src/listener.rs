//! The listener contract.

use crate::event::Event;

/// Failure raised by a listener while handling an event.
///
/// Absorbed by the bus; never surfaced to the caller of the guarded
/// operation.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// An observer of catalog events.
///
/// `on_event` runs synchronously on the triggering operation's own
/// task, in registration order. Listeners performing blocking I/O must
/// bound their own latency; the bus imposes no timeout. Returning an
/// error is recorded on the bus's side channel and delivery continues
/// with the next listener.
pub trait EventListener: Send + Sync {
    /// Name used in the side-channel log when this listener fails.
    fn name(&self) -> &str;

    /// Handles one event. The event is immutable and borrowed for the
    /// duration of the call only; clone it to retain it.
    fn on_event(&self, event: &Event) -> Result<(), ListenerError>;
}

/// A listener that logs every event through `tracing`.
pub struct LoggingListener;

impl EventListener for LoggingListener {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_event(&self, event: &Event) -> Result<(), ListenerError> {
        tracing::info!(
            actor = event.actor(),
            identifier = %event.identifier(),
            entity_kind = %event.entity_kind(),
            operation = %event.operation_type(),
            phase = ?event.phase(),
            correlation_id = %event.correlation_id(),
            "catalog event"
        );
        Ok(())
    }
}
