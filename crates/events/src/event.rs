//! The uniform event shape shared by every operation and entity kind.

use catalog::{ChangeDescriptor, EntitySnapshot, ErrorKind};
use chrono::{DateTime, Utc};
use common::{EntityKind, NameIdentifier};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of operation an event describes.
///
/// Renames are expressed as `Alter` with a rename change descriptor, so
/// the set stays closed over the verbs the store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    Create,
    Alter,
    Drop,
    Get,
    List,
}

impl OperationType {
    /// Returns true for operations that mutate catalog state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            OperationType::Create | OperationType::Alter | OperationType::Drop
        )
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationType::Create => "CREATE",
            OperationType::Alter => "ALTER",
            OperationType::Drop => "DROP",
            OperationType::Get => "GET",
            OperationType::List => "LIST",
        };
        f.write_str(name)
    }
}

/// Phase of an event relative to the guarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventPhase {
    /// Issued before the store is touched.
    Pre,
    /// Terminal: the operation completed.
    Success,
    /// Terminal: the operation raised.
    Failure,
}

/// Payload carried by an event, fully constructed before delivery.
#[derive(Debug, Clone, Serialize)]
pub enum EventPayload {
    /// Pre-events and drop successes carry no payload.
    None,
    /// Post-mutation snapshot of the entity.
    Snapshot(EntitySnapshot),
    /// Names returned by a successful list.
    Names(Vec<String>),
    /// Classification of the guarded operation's failure.
    Failure(ErrorKind),
}

/// Everything the bus needs to know about one invocation before it runs.
#[derive(Debug, Clone)]
pub struct OperationContext {
    actor: String,
    identifier: NameIdentifier,
    entity_kind: EntityKind,
    operation: OperationType,
    changes: Vec<ChangeDescriptor>,
}

impl OperationContext {
    /// Creates a context with an empty change list.
    pub fn new(
        actor: impl Into<String>,
        identifier: NameIdentifier,
        entity_kind: EntityKind,
        operation: OperationType,
    ) -> Self {
        Self {
            actor: actor.into(),
            identifier,
            entity_kind,
            operation,
            changes: Vec::new(),
        }
    }

    /// Attaches the ordered change list of an alter invocation.
    pub fn with_changes(mut self, changes: Vec<ChangeDescriptor>) -> Self {
        self.changes = changes;
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn identifier(&self) -> &NameIdentifier {
        &self.identifier
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    pub fn operation(&self) -> OperationType {
        self.operation
    }

    pub fn changes(&self) -> &[ChangeDescriptor] {
        &self.changes
    }
}

/// An immutable notification delivered to listeners.
///
/// Fields are private; listeners see events only by shared reference
/// through the accessor surface, so nothing a listener holds can change
/// after delivery. The pre and terminal event of one invocation share a
/// correlation id.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    actor: String,
    identifier: NameIdentifier,
    entity_kind: EntityKind,
    operation: OperationType,
    phase: EventPhase,
    changes: Vec<ChangeDescriptor>,
    payload: EventPayload,
    correlation_id: Uuid,
    timestamp: DateTime<Utc>,
}

impl Event {
    fn from_context(
        ctx: &OperationContext,
        phase: EventPhase,
        payload: EventPayload,
        correlation_id: Uuid,
    ) -> Self {
        Self {
            actor: ctx.actor.clone(),
            identifier: ctx.identifier.clone(),
            entity_kind: ctx.entity_kind,
            operation: ctx.operation,
            phase,
            changes: ctx.changes.clone(),
            payload,
            correlation_id,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn pre(ctx: &OperationContext, correlation_id: Uuid) -> Self {
        Self::from_context(ctx, EventPhase::Pre, EventPayload::None, correlation_id)
    }

    pub(crate) fn success(
        ctx: &OperationContext,
        payload: EventPayload,
        correlation_id: Uuid,
    ) -> Self {
        Self::from_context(ctx, EventPhase::Success, payload, correlation_id)
    }

    pub(crate) fn failure(ctx: &OperationContext, kind: ErrorKind, correlation_id: Uuid) -> Self {
        Self::from_context(
            ctx,
            EventPhase::Failure,
            EventPayload::Failure(kind),
            correlation_id,
        )
    }

    /// The principal that triggered the operation.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// The fully qualified target of the operation.
    pub fn identifier(&self) -> &NameIdentifier {
        &self.identifier
    }

    /// The kind of entity targeted.
    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// The operation this event describes.
    pub fn operation_type(&self) -> OperationType {
        self.operation
    }

    /// Where in the operation's lifecycle this event was issued.
    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// The ordered changes requested (pre) or applied (success).
    /// Empty for non-alter operations.
    pub fn changes(&self) -> &[ChangeDescriptor] {
        &self.changes
    }

    /// The raw payload.
    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// The post-operation snapshot, present on mutation successes.
    pub fn updated_info(&self) -> Option<&EntitySnapshot> {
        match &self.payload {
            EventPayload::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The names returned by a successful list.
    pub fn names(&self) -> Option<&[String]> {
        match &self.payload {
            EventPayload::Names(names) => Some(names),
            _ => None,
        }
    }

    /// The failure classification, present on failure events.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.payload {
            EventPayload::Failure(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Shared by the pre and terminal event of one invocation.
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// When the event was constructed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Success value of a guarded operation, able to describe itself as an
/// event payload.
pub trait OperationOutcome {
    /// Builds the payload the success event carries.
    fn success_payload(&self) -> EventPayload;
}

impl OperationOutcome for EntitySnapshot {
    fn success_payload(&self) -> EventPayload {
        EventPayload::Snapshot(self.clone())
    }
}

impl OperationOutcome for Vec<String> {
    fn success_payload(&self) -> EventPayload {
        EventPayload::Names(self.clone())
    }
}

// Drop reports only whether the entity existed.
impl OperationOutcome for bool {
    fn success_payload(&self) -> EventPayload {
        EventPayload::None
    }
}
