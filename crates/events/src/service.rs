//! Guarded catalog operations.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalog::{CatalogStore, ChangeDescriptor, EntitySnapshot, Result};
use common::{EntityKind, NameIdentifier, Namespace};

use crate::bus::EventBus;
use crate::event::{OperationContext, OperationType};

/// Catalog operation entry points, each bracketed by events.
///
/// Wraps a store and a shared bus; every operation builds its context,
/// then runs through [`EventBus::guard`] so listeners observe the
/// pre/terminal phases in order. The bus is injected rather than
/// ambient, so its lifecycle stays explicit and testable.
pub struct CatalogService<S: CatalogStore> {
    store: S,
    bus: Arc<EventBus>,
}

impl<S: CatalogStore> CatalogService<S> {
    /// Creates a service over a store and a fully registered bus.
    pub fn new(store: S, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }

    /// The bus this service dispatches through.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an entity.
    #[tracing::instrument(skip(self, properties))]
    pub async fn create(
        &self,
        actor: &str,
        identifier: &NameIdentifier,
        kind: EntityKind,
        comment: Option<String>,
        properties: BTreeMap<String, String>,
    ) -> Result<EntitySnapshot> {
        let ctx = OperationContext::new(actor, identifier.clone(), kind, OperationType::Create);
        let store = &self.store;
        self.bus
            .guard(ctx, || async move {
                store
                    .create(identifier, kind, actor, comment, properties)
                    .await
            })
            .await
    }

    /// Applies an ordered list of changes to an entity.
    #[tracing::instrument(skip(self))]
    pub async fn alter(
        &self,
        actor: &str,
        identifier: &NameIdentifier,
        kind: EntityKind,
        changes: Vec<ChangeDescriptor>,
    ) -> Result<EntitySnapshot> {
        let ctx = OperationContext::new(actor, identifier.clone(), kind, OperationType::Alter)
            .with_changes(changes.clone());
        let store = &self.store;
        self.bus
            .guard(ctx, || async move {
                store.apply(identifier, actor, &changes).await
            })
            .await
    }

    /// Drops an entity, returning whether it existed.
    #[tracing::instrument(skip(self))]
    pub async fn drop_entity(
        &self,
        actor: &str,
        identifier: &NameIdentifier,
        kind: EntityKind,
    ) -> Result<bool> {
        let ctx = OperationContext::new(actor, identifier.clone(), kind, OperationType::Drop);
        let store = &self.store;
        self.bus
            .guard(ctx, || async move { store.drop_entity(identifier).await })
            .await
    }

    /// Loads the current snapshot of an entity.
    #[tracing::instrument(skip(self))]
    pub async fn get(
        &self,
        actor: &str,
        identifier: &NameIdentifier,
        kind: EntityKind,
    ) -> Result<EntitySnapshot> {
        let ctx = OperationContext::new(actor, identifier.clone(), kind, OperationType::Get);
        let store = &self.store;
        self.bus
            .guard(ctx, || async move { store.get(identifier, kind).await })
            .await
    }

    /// Lists entity names of one kind under a namespace.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        actor: &str,
        namespace: &Namespace,
        kind: EntityKind,
    ) -> Result<Vec<String>> {
        // The list target is the namespace itself; the event identifier
        // points at its last level (the containing entity), or at the
        // catalog root when listing top-level entities.
        let identifier = match namespace.levels().split_last() {
            Some((name, rest)) => {
                NameIdentifier::new(Namespace::of(rest.iter().cloned()), name.clone())
            }
            None => NameIdentifier::root(),
        };
        let ctx = OperationContext::new(actor, identifier, kind, OperationType::List);
        let store = &self.store;
        self.bus
            .guard(ctx, || async move { store.list(namespace, kind).await })
            .await
    }

    /// Lists the names of all groups in a metalake, sorted ascending.
    #[tracing::instrument(skip(self))]
    pub async fn list_group_names(&self, actor: &str, metalake: &str) -> Result<Vec<String>> {
        self.list(actor, &Namespace::of([metalake]), EntityKind::Group)
            .await
    }
}
