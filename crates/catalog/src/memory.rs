//! In-memory store implementation for tests and demos.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use common::{AuditInfo, EntityKind, NameIdentifier, Namespace};
use tokio::sync::RwLock;

use crate::changes::{
    CatalogChange, ChangeDescriptor, MetalakeChange, ModelChange, SchemaChange, TableChange,
};
use crate::error::{CatalogError, Result};
use crate::snapshot::EntitySnapshot;
use crate::store::CatalogStore;

#[derive(Debug, Clone)]
struct EntityRecord {
    kind: EntityKind,
    comment: Option<String>,
    properties: BTreeMap<String, String>,
    audit: AuditInfo,
    latest_version: Option<u32>,
}

impl EntityRecord {
    fn snapshot(&self, identifier: &NameIdentifier) -> EntitySnapshot {
        EntitySnapshot::new(self.kind, identifier.clone(), self.audit.clone())
            .with_comment(self.comment.clone())
            .with_properties(self.properties.clone())
            .with_latest_version(self.latest_version)
    }
}

/// Normalized view of one change, shared by all entity kinds.
enum Alteration<'a> {
    Rename(&'a str),
    UpdateComment(&'a str),
    SetProperty(&'a str, &'a str),
    RemoveProperty(&'a str),
}

fn normalize(change: &ChangeDescriptor) -> Alteration<'_> {
    match change {
        ChangeDescriptor::Metalake(c) => match c {
            MetalakeChange::Rename { new_name } => Alteration::Rename(new_name),
            MetalakeChange::UpdateComment { new_comment } => Alteration::UpdateComment(new_comment),
            MetalakeChange::SetProperty { property, value } => {
                Alteration::SetProperty(property, value)
            }
            MetalakeChange::RemoveProperty { property } => Alteration::RemoveProperty(property),
        },
        ChangeDescriptor::Catalog(c) => match c {
            CatalogChange::Rename { new_name } => Alteration::Rename(new_name),
            CatalogChange::UpdateComment { new_comment } => Alteration::UpdateComment(new_comment),
            CatalogChange::SetProperty { property, value } => {
                Alteration::SetProperty(property, value)
            }
            CatalogChange::RemoveProperty { property } => Alteration::RemoveProperty(property),
        },
        ChangeDescriptor::Schema(c) => match c {
            SchemaChange::SetProperty { property, value } => {
                Alteration::SetProperty(property, value)
            }
            SchemaChange::RemoveProperty { property } => Alteration::RemoveProperty(property),
        },
        ChangeDescriptor::Table(c) => match c {
            TableChange::Rename { new_name } => Alteration::Rename(new_name),
            TableChange::UpdateComment { new_comment } => Alteration::UpdateComment(new_comment),
            TableChange::SetProperty { property, value } => {
                Alteration::SetProperty(property, value)
            }
            TableChange::RemoveProperty { property } => Alteration::RemoveProperty(property),
        },
        ChangeDescriptor::Model(c) => match c {
            ModelChange::Rename { new_name } => Alteration::Rename(new_name),
            ModelChange::UpdateComment { new_comment } => Alteration::UpdateComment(new_comment),
            ModelChange::SetProperty { property, value } => {
                Alteration::SetProperty(property, value)
            }
            ModelChange::RemoveProperty { property } => Alteration::RemoveProperty(property),
        },
    }
}

/// In-memory catalog store.
///
/// Backs tests and the demo CLI with the same contract the real storage
/// engine implements. All entities live in one map keyed by their fully
/// qualified identifier; a rename re-keys the entry.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    entities: Arc<RwLock<HashMap<NameIdentifier, EntityRecord>>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored entities.
    pub async fn entity_count(&self) -> usize {
        self.entities.read().await.len()
    }

    /// Removes all entities.
    pub async fn clear(&self) {
        self.entities.write().await.clear();
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn create(
        &self,
        identifier: &NameIdentifier,
        kind: EntityKind,
        actor: &str,
        comment: Option<String>,
        properties: BTreeMap<String, String>,
    ) -> Result<EntitySnapshot> {
        let mut entities = self.entities.write().await;
        if entities.contains_key(identifier) {
            return Err(CatalogError::AlreadyExists {
                kind,
                identifier: identifier.clone(),
            });
        }

        let record = EntityRecord {
            kind,
            comment,
            properties,
            audit: AuditInfo::created_by(actor),
            latest_version: (kind == EntityKind::Model).then_some(0),
        };
        let snapshot = record.snapshot(identifier);
        entities.insert(identifier.clone(), record);
        Ok(snapshot)
    }

    async fn apply(
        &self,
        identifier: &NameIdentifier,
        actor: &str,
        changes: &[ChangeDescriptor],
    ) -> Result<EntitySnapshot> {
        let Some(first) = changes.first() else {
            return Err(CatalogError::Validation(
                "change list must not be empty".to_string(),
            ));
        };

        let mut entities = self.entities.write().await;
        let Some(record) = entities.get(identifier) else {
            return Err(CatalogError::NotFound {
                kind: first.entity_kind(),
                identifier: identifier.clone(),
            });
        };

        let mut updated = record.clone();
        let mut name = identifier.name().to_string();

        for change in changes {
            if change.entity_kind() != updated.kind {
                return Err(CatalogError::Validation(format!(
                    "{change} targets a {} but {identifier} is a {}",
                    change.entity_kind(),
                    updated.kind
                )));
            }

            match normalize(change) {
                Alteration::Rename(new_name) => name = new_name.to_string(),
                Alteration::UpdateComment(new_comment) => {
                    updated.comment = Some(new_comment.to_string());
                }
                Alteration::SetProperty(property, value) => {
                    updated
                        .properties
                        .insert(property.to_string(), value.to_string());
                }
                Alteration::RemoveProperty(property) => {
                    // Removing an absent key is a no-op.
                    updated.properties.remove(property);
                }
            }
        }

        let target = if name == identifier.name() {
            identifier.clone()
        } else {
            let renamed = identifier.with_name(name);
            if entities.contains_key(&renamed) {
                return Err(CatalogError::AlreadyExists {
                    kind: updated.kind,
                    identifier: renamed,
                });
            }
            renamed
        };

        updated.audit = updated.audit.modified_by(actor);
        let snapshot = updated.snapshot(&target);
        entities.remove(identifier);
        entities.insert(target, updated);
        Ok(snapshot)
    }

    async fn drop_entity(&self, identifier: &NameIdentifier) -> Result<bool> {
        let mut entities = self.entities.write().await;
        Ok(entities.remove(identifier).is_some())
    }

    async fn get(&self, identifier: &NameIdentifier, kind: EntityKind) -> Result<EntitySnapshot> {
        let entities = self.entities.read().await;
        match entities.get(identifier) {
            Some(record) if record.kind == kind => Ok(record.snapshot(identifier)),
            _ => Err(CatalogError::NotFound {
                kind,
                identifier: identifier.clone(),
            }),
        }
    }

    async fn list(&self, namespace: &Namespace, kind: EntityKind) -> Result<Vec<String>> {
        let entities = self.entities.read().await;

        // Entities under a metalake require the metalake itself to resolve.
        if let Some(metalake) = namespace.metalake() {
            let metalake_ident = NameIdentifier::of_metalake(metalake);
            if !entities.contains_key(&metalake_ident) {
                return Err(CatalogError::NotFound {
                    kind: EntityKind::Metalake,
                    identifier: metalake_ident,
                });
            }
        }

        let mut names: Vec<String> = entities
            .iter()
            .filter(|(ident, record)| record.kind == kind && ident.namespace() == namespace)
            .map(|(ident, _)| ident.name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}
