//! Shared value types for the catalog platform.
//!
//! This crate holds the vocabulary every other crate speaks:
//! - `Namespace` and `NameIdentifier` for addressing cataloged entities
//! - `AuditInfo` for creation/modification metadata
//! - `EntityKind` for the closed set of cataloged object kinds

pub mod audit;
pub mod entity;
pub mod identifier;

pub use audit::AuditInfo;
pub use entity::EntityKind;
pub use identifier::{NameIdentifier, Namespace};
