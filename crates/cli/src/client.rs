//! In-process client scoped to one metalake.

use std::sync::Arc;

use catalog::{CatalogStore, ChangeDescriptor, EntitySnapshot, ModelChange, Result};
use common::{AuditInfo, EntityKind, NameIdentifier};
use events::CatalogService;

/// A group of principals within a metalake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    roles: Vec<String>,
    audit: Option<AuditInfo>,
}

impl Group {
    /// A group known only by name, as returned by a name listing.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
            audit: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn audit(&self) -> Option<&AuditInfo> {
        self.audit.as_ref()
    }
}

/// Client vocabulary exposed to commands, scoped to one metalake.
///
/// Backed by an in-process [`CatalogService`]; a remote deployment
/// would substitute a transport-backed client with the same surface.
pub struct LocalClient<S: CatalogStore> {
    service: Arc<CatalogService<S>>,
    metalake: String,
    actor: String,
}

impl<S: CatalogStore> LocalClient<S> {
    /// Lists the names of all groups in the scoped metalake.
    pub async fn list_group_names(&self) -> Result<Vec<String>> {
        self.service
            .list_group_names(&self.actor, &self.metalake)
            .await
    }

    /// Renames a model within the scoped metalake.
    pub async fn rename_model(
        &self,
        catalog: &str,
        schema: &str,
        model: &str,
        new_name: &str,
    ) -> Result<EntitySnapshot> {
        let identifier = NameIdentifier::of_model(&self.metalake, catalog, schema, model);
        let changes: Vec<ChangeDescriptor> = vec![ModelChange::rename(new_name)?.into()];
        self.service
            .alter(&self.actor, &identifier, EntityKind::Model, changes)
            .await
    }
}

/// Builds a client scoped to one metalake.
pub fn build_client<S: CatalogStore>(
    service: Arc<CatalogService<S>>,
    metalake: impl Into<String>,
    actor: impl Into<String>,
) -> LocalClient<S> {
    LocalClient {
        service,
        metalake: metalake.into(),
        actor: actor.into(),
    }
}
