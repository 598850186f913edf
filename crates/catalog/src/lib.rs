//! Catalog domain layer: the change descriptor model, entity snapshots,
//! and the store contract mutations run against.
//!
//! Every alteration applied to a cataloged entity is described by an
//! immutable [`ChangeDescriptor`]; the store consumes an ordered list of
//! them and produces an immutable [`EntitySnapshot`] of the result.

pub mod changes;
pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use changes::{
    CatalogChange, ChangeDescriptor, MetalakeChange, ModelChange, SchemaChange, TableChange,
};
pub use error::{CatalogError, ErrorKind, Result};
pub use memory::InMemoryCatalogStore;
pub use snapshot::EntitySnapshot;
pub use store::CatalogStore;
