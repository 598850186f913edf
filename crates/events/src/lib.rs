//! Event taxonomy and listener dispatch for catalog operations.
//!
//! Every mutating catalog call is bracketed by events: one pre-event
//! before the store is touched, and exactly one terminal event (success
//! or failure) after it completes. The [`EventBus`] fans both out to
//! registered listeners in registration order, isolating listener
//! failures from the guarded operation's outcome.

pub mod bus;
pub mod event;
pub mod listener;
pub mod policy;
pub mod service;

pub use bus::EventBus;
pub use event::{Event, EventPayload, EventPhase, OperationContext, OperationOutcome, OperationType};
pub use listener::{EventListener, ListenerError, LoggingListener};
pub use policy::DispatchPolicy;
pub use service::CatalogService;
