//! The closed set of cataloged entity kinds.

use serde::{Deserialize, Serialize};

/// Kind of a cataloged object.
///
/// Events are keyed by (entity kind, operation type, phase), and error
/// messages name the kind, so the set is closed and exhaustive matches
/// over it are expected to break when a kind is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Metalake,
    Catalog,
    Schema,
    Table,
    Model,
    Group,
    Role,
}

impl EntityKind {
    /// Human-readable name used in log and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Metalake => "metalake",
            EntityKind::Catalog => "catalog",
            EntityKind::Schema => "schema",
            EntityKind::Table => "table",
            EntityKind::Model => "model",
            EntityKind::Group => "group",
            EntityKind::Role => "role",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
