//! Immutable read projections of entity state.

use std::collections::BTreeMap;

use common::{AuditInfo, EntityKind, NameIdentifier};
use serde::{Deserialize, Serialize};

/// A point-in-time view of one cataloged entity.
///
/// Snapshots are produced only by the store, at apply/create/get time,
/// and never mutated afterwards. Event payloads carry them by value so
/// listeners can never observe partial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    kind: EntityKind,
    identifier: NameIdentifier,
    comment: Option<String>,
    properties: BTreeMap<String, String>,
    audit: AuditInfo,
    latest_version: Option<u32>,
}

impl EntitySnapshot {
    /// Creates a snapshot with no comment, properties, or version pointer.
    pub fn new(kind: EntityKind, identifier: NameIdentifier, audit: AuditInfo) -> Self {
        Self {
            kind,
            identifier,
            comment: None,
            properties: BTreeMap::new(),
            audit,
            latest_version: None,
        }
    }

    /// Attaches a comment.
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Attaches properties.
    pub fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    /// Attaches a latest-version pointer (models only).
    pub fn with_latest_version(mut self, latest_version: Option<u32>) -> Self {
        self.latest_version = latest_version;
        self
    }

    /// The entity's kind.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The entity's fully qualified identifier at snapshot time.
    pub fn identifier(&self) -> &NameIdentifier {
        &self.identifier
    }

    /// The entity's unqualified name.
    pub fn name(&self) -> &str {
        self.identifier.name()
    }

    /// The entity's comment, if set.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The entity's properties, in deterministic key order.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Audit metadata for the entity.
    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    /// The latest registered version, for versioned entities.
    pub fn latest_version(&self) -> Option<u32> {
        self.latest_version
    }
}
