//! Command-line facade over the catalog service.
//!
//! Commands issue domain requests against a service implementing the
//! change/event subsystem and render the final result or error; they do
//! not observe the event stream directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalog::{CatalogStore, InMemoryCatalogStore};
use common::{EntityKind, NameIdentifier};
use events::{CatalogService, EventBus, LoggingListener};

pub mod client;
pub mod commands;
pub mod error;

pub use client::{Group, LocalClient, build_client};
pub use error::CliError;

/// Builds a demo service backed by the in-memory store, seeded with a
/// small catalog hierarchy so the commands have something to act on.
pub async fn demo_service() -> CatalogService<InMemoryCatalogStore> {
    let store = InMemoryCatalogStore::new();
    let seed = [
        (NameIdentifier::of_metalake("demo"), EntityKind::Metalake),
        (NameIdentifier::of_catalog("demo", "ml"), EntityKind::Catalog),
        (
            NameIdentifier::of_schema("demo", "ml", "models"),
            EntityKind::Schema,
        ),
        (
            NameIdentifier::of_model("demo", "ml", "models", "churn"),
            EntityKind::Model,
        ),
        (NameIdentifier::of_group("demo", "analysts"), EntityKind::Group),
        (NameIdentifier::of_group("demo", "ops"), EntityKind::Group),
    ];
    for (identifier, kind) in seed {
        // Seeding an empty store cannot collide.
        let _ = store
            .create(&identifier, kind, "system", None, BTreeMap::new())
            .await;
    }

    let mut bus = EventBus::new();
    bus.register(Arc::new(LoggingListener));
    CatalogService::new(store, Arc::new(bus))
}
