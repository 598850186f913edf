//! The store contract mutations run against.

use std::collections::BTreeMap;

use async_trait::async_trait;
use common::{EntityKind, NameIdentifier, Namespace};

use crate::changes::ChangeDescriptor;
use crate::error::Result;
use crate::snapshot::EntitySnapshot;

/// Persistence contract for cataloged entities.
///
/// The dispatch layer consumes this trait; the real storage engine is an
/// external collaborator. All operations return immutable snapshots.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Creates a new entity, failing with `AlreadyExists` on collision.
    async fn create(
        &self,
        identifier: &NameIdentifier,
        kind: EntityKind,
        actor: &str,
        comment: Option<String>,
        properties: BTreeMap<String, String>,
    ) -> Result<EntitySnapshot>;

    /// Applies an ordered list of changes to an existing entity and
    /// returns the post-alteration snapshot.
    ///
    /// Fails with `NotFound` if the identifier does not resolve,
    /// `AlreadyExists` if a rename collides, `ConcurrentModification`
    /// if an optimistic check fails, or `Internal` on unexpected errors.
    async fn apply(
        &self,
        identifier: &NameIdentifier,
        actor: &str,
        changes: &[ChangeDescriptor],
    ) -> Result<EntitySnapshot>;

    /// Drops an entity, returning whether it existed.
    async fn drop_entity(&self, identifier: &NameIdentifier) -> Result<bool>;

    /// Loads the current snapshot of an entity of the given kind.
    async fn get(&self, identifier: &NameIdentifier, kind: EntityKind) -> Result<EntitySnapshot>;

    /// Lists the names of entities of one kind under a namespace,
    /// sorted ascending.
    async fn list(&self, namespace: &Namespace, kind: EntityKind) -> Result<Vec<String>>;
}
