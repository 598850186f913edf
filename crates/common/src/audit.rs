//! Audit metadata attached to every entity snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created and last modified an entity, and when.
///
/// Built once by the store; never mutated afterwards. Modification
/// produces a new value via [`AuditInfo::modified_by`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    creator: String,
    create_time: DateTime<Utc>,
    last_modifier: Option<String>,
    last_modified_time: Option<DateTime<Utc>>,
}

impl AuditInfo {
    /// Creates audit info for a newly created entity.
    pub fn created_by(creator: impl Into<String>) -> Self {
        Self {
            creator: creator.into(),
            create_time: Utc::now(),
            last_modifier: None,
            last_modified_time: None,
        }
    }

    /// Returns a copy stamped with a new modifier and modification time.
    pub fn modified_by(&self, modifier: impl Into<String>) -> Self {
        Self {
            creator: self.creator.clone(),
            create_time: self.create_time,
            last_modifier: Some(modifier.into()),
            last_modified_time: Some(Utc::now()),
        }
    }

    /// The principal that created the entity.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// When the entity was created.
    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    /// The principal that last modified the entity, if any.
    pub fn last_modifier(&self) -> Option<&str> {
        self.last_modifier.as_deref()
    }

    /// When the entity was last modified, if ever.
    pub fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        self.last_modified_time
    }
}
