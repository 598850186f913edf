//! Change descriptors: immutable descriptions of single alterations.
//!
//! Each entity kind has its own closed sum type of alteration kinds.
//! Descriptors are constructed at the call site via the factory
//! functions, consumed once by the store's apply step, and compared
//! structurally: same variant and same field values means equal, and
//! hashing is consistent with equality. The string form of a descriptor
//! is the variant name followed by its field values, space-joined
//! (e.g. `RenameModel newName`).

use common::EntityKind;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(CatalogError::Validation(format!("{what} must not be empty")))
    } else {
        Ok(())
    }
}

/// An alteration to a metalake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalakeChange {
    /// Renames the metalake.
    Rename { new_name: String },
    /// Replaces the metalake comment.
    UpdateComment { new_comment: String },
    /// Sets or overwrites one property.
    SetProperty { property: String, value: String },
    /// Removes one property.
    RemoveProperty { property: String },
}

impl MetalakeChange {
    /// Creates a rename change, rejecting empty names.
    pub fn rename(new_name: impl Into<String>) -> Result<Self> {
        let new_name = new_name.into();
        require_non_empty("new metalake name", &new_name)?;
        Ok(MetalakeChange::Rename { new_name })
    }

    /// Creates a comment update change.
    pub fn update_comment(new_comment: impl Into<String>) -> Result<Self> {
        Ok(MetalakeChange::UpdateComment {
            new_comment: new_comment.into(),
        })
    }

    /// Creates a property set change, rejecting empty keys.
    pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(MetalakeChange::SetProperty {
            property,
            value: value.into(),
        })
    }

    /// Creates a property removal change, rejecting empty keys.
    pub fn remove_property(property: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(MetalakeChange::RemoveProperty { property })
    }

    fn validate(&self) -> Result<()> {
        match self {
            MetalakeChange::Rename { new_name } => require_non_empty("new metalake name", new_name),
            MetalakeChange::UpdateComment { .. } => Ok(()),
            MetalakeChange::SetProperty { property, .. }
            | MetalakeChange::RemoveProperty { property } => {
                require_non_empty("property key", property)
            }
        }
    }
}

impl std::fmt::Display for MetalakeChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetalakeChange::Rename { new_name } => write!(f, "RenameMetalake {new_name}"),
            MetalakeChange::UpdateComment { new_comment } => {
                write!(f, "UpdateComment {new_comment}")
            }
            MetalakeChange::SetProperty { property, value } => {
                write!(f, "SetProperty {property} {value}")
            }
            MetalakeChange::RemoveProperty { property } => write!(f, "RemoveProperty {property}"),
        }
    }
}

/// An alteration to a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogChange {
    Rename { new_name: String },
    UpdateComment { new_comment: String },
    SetProperty { property: String, value: String },
    RemoveProperty { property: String },
}

impl CatalogChange {
    pub fn rename(new_name: impl Into<String>) -> Result<Self> {
        let new_name = new_name.into();
        require_non_empty("new catalog name", &new_name)?;
        Ok(CatalogChange::Rename { new_name })
    }

    pub fn update_comment(new_comment: impl Into<String>) -> Result<Self> {
        Ok(CatalogChange::UpdateComment {
            new_comment: new_comment.into(),
        })
    }

    pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(CatalogChange::SetProperty {
            property,
            value: value.into(),
        })
    }

    pub fn remove_property(property: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(CatalogChange::RemoveProperty { property })
    }

    fn validate(&self) -> Result<()> {
        match self {
            CatalogChange::Rename { new_name } => require_non_empty("new catalog name", new_name),
            CatalogChange::UpdateComment { .. } => Ok(()),
            CatalogChange::SetProperty { property, .. }
            | CatalogChange::RemoveProperty { property } => {
                require_non_empty("property key", property)
            }
        }
    }
}

impl std::fmt::Display for CatalogChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogChange::Rename { new_name } => write!(f, "RenameCatalog {new_name}"),
            CatalogChange::UpdateComment { new_comment } => {
                write!(f, "UpdateComment {new_comment}")
            }
            CatalogChange::SetProperty { property, value } => {
                write!(f, "SetProperty {property} {value}")
            }
            CatalogChange::RemoveProperty { property } => write!(f, "RemoveProperty {property}"),
        }
    }
}

/// An alteration to a schema. Schemas cannot be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaChange {
    SetProperty { property: String, value: String },
    RemoveProperty { property: String },
}

impl SchemaChange {
    pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(SchemaChange::SetProperty {
            property,
            value: value.into(),
        })
    }

    pub fn remove_property(property: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(SchemaChange::RemoveProperty { property })
    }

    fn validate(&self) -> Result<()> {
        match self {
            SchemaChange::SetProperty { property, .. }
            | SchemaChange::RemoveProperty { property } => {
                require_non_empty("property key", property)
            }
        }
    }
}

impl std::fmt::Display for SchemaChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaChange::SetProperty { property, value } => {
                write!(f, "SetProperty {property} {value}")
            }
            SchemaChange::RemoveProperty { property } => write!(f, "RemoveProperty {property}"),
        }
    }
}

/// An alteration to a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableChange {
    Rename { new_name: String },
    UpdateComment { new_comment: String },
    SetProperty { property: String, value: String },
    RemoveProperty { property: String },
}

impl TableChange {
    pub fn rename(new_name: impl Into<String>) -> Result<Self> {
        let new_name = new_name.into();
        require_non_empty("new table name", &new_name)?;
        Ok(TableChange::Rename { new_name })
    }

    pub fn update_comment(new_comment: impl Into<String>) -> Result<Self> {
        Ok(TableChange::UpdateComment {
            new_comment: new_comment.into(),
        })
    }

    pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(TableChange::SetProperty {
            property,
            value: value.into(),
        })
    }

    pub fn remove_property(property: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(TableChange::RemoveProperty { property })
    }

    fn validate(&self) -> Result<()> {
        match self {
            TableChange::Rename { new_name } => require_non_empty("new table name", new_name),
            TableChange::UpdateComment { .. } => Ok(()),
            TableChange::SetProperty { property, .. }
            | TableChange::RemoveProperty { property } => {
                require_non_empty("property key", property)
            }
        }
    }
}

impl std::fmt::Display for TableChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableChange::Rename { new_name } => write!(f, "RenameTable {new_name}"),
            TableChange::UpdateComment { new_comment } => write!(f, "UpdateComment {new_comment}"),
            TableChange::SetProperty { property, value } => {
                write!(f, "SetProperty {property} {value}")
            }
            TableChange::RemoveProperty { property } => write!(f, "RemoveProperty {property}"),
        }
    }
}

/// An alteration to a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelChange {
    /// Renames the model.
    Rename { new_name: String },
    /// Replaces the model comment.
    UpdateComment { new_comment: String },
    /// Sets or overwrites one property.
    SetProperty { property: String, value: String },
    /// Removes one property.
    RemoveProperty { property: String },
}

impl ModelChange {
    /// Creates a rename change, rejecting empty names.
    pub fn rename(new_name: impl Into<String>) -> Result<Self> {
        let new_name = new_name.into();
        require_non_empty("new model name", &new_name)?;
        Ok(ModelChange::Rename { new_name })
    }

    /// Creates a comment update change.
    pub fn update_comment(new_comment: impl Into<String>) -> Result<Self> {
        Ok(ModelChange::UpdateComment {
            new_comment: new_comment.into(),
        })
    }

    /// Creates a property set change, rejecting empty keys.
    pub fn set_property(property: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(ModelChange::SetProperty {
            property,
            value: value.into(),
        })
    }

    /// Creates a property removal change, rejecting empty keys.
    pub fn remove_property(property: impl Into<String>) -> Result<Self> {
        let property = property.into();
        require_non_empty("property key", &property)?;
        Ok(ModelChange::RemoveProperty { property })
    }

    fn validate(&self) -> Result<()> {
        match self {
            ModelChange::Rename { new_name } => require_non_empty("new model name", new_name),
            ModelChange::UpdateComment { .. } => Ok(()),
            ModelChange::SetProperty { property, .. }
            | ModelChange::RemoveProperty { property } => {
                require_non_empty("property key", property)
            }
        }
    }
}

impl std::fmt::Display for ModelChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelChange::Rename { new_name } => write!(f, "RenameModel {new_name}"),
            ModelChange::UpdateComment { new_comment } => write!(f, "UpdateComment {new_comment}"),
            ModelChange::SetProperty { property, value } => {
                write!(f, "SetProperty {property} {value}")
            }
            ModelChange::RemoveProperty { property } => write!(f, "RemoveProperty {property}"),
        }
    }
}

/// A change to any cataloged entity, tagged by entity kind.
///
/// The store contract and events carry ordered lists of these so that
/// heterogeneous alteration kinds flow through one extensible model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeDescriptor {
    Metalake(MetalakeChange),
    Catalog(CatalogChange),
    Schema(SchemaChange),
    Table(TableChange),
    Model(ModelChange),
}

impl ChangeDescriptor {
    /// The entity kind this change applies to.
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            ChangeDescriptor::Metalake(_) => EntityKind::Metalake,
            ChangeDescriptor::Catalog(_) => EntityKind::Catalog,
            ChangeDescriptor::Schema(_) => EntityKind::Schema,
            ChangeDescriptor::Table(_) => EntityKind::Table,
            ChangeDescriptor::Model(_) => EntityKind::Model,
        }
    }

    /// Checks well-formedness of the descriptor fields.
    ///
    /// The factory functions already enforce this; the dispatch guard
    /// re-checks so that directly constructed descriptors are rejected
    /// before any event is emitted.
    pub fn validate(&self) -> Result<()> {
        match self {
            ChangeDescriptor::Metalake(c) => c.validate(),
            ChangeDescriptor::Catalog(c) => c.validate(),
            ChangeDescriptor::Schema(c) => c.validate(),
            ChangeDescriptor::Table(c) => c.validate(),
            ChangeDescriptor::Model(c) => c.validate(),
        }
    }
}

impl std::fmt::Display for ChangeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeDescriptor::Metalake(c) => c.fmt(f),
            ChangeDescriptor::Catalog(c) => c.fmt(f),
            ChangeDescriptor::Schema(c) => c.fmt(f),
            ChangeDescriptor::Table(c) => c.fmt(f),
            ChangeDescriptor::Model(c) => c.fmt(f),
        }
    }
}

impl From<MetalakeChange> for ChangeDescriptor {
    fn from(change: MetalakeChange) -> Self {
        ChangeDescriptor::Metalake(change)
    }
}

impl From<CatalogChange> for ChangeDescriptor {
    fn from(change: CatalogChange) -> Self {
        ChangeDescriptor::Catalog(change)
    }
}

impl From<SchemaChange> for ChangeDescriptor {
    fn from(change: SchemaChange) -> Self {
        ChangeDescriptor::Schema(change)
    }
}

impl From<TableChange> for ChangeDescriptor {
    fn from(change: TableChange) -> Self {
        ChangeDescriptor::Table(change)
    }
}

impl From<ModelChange> for ChangeDescriptor {
    fn from(change: ModelChange) -> Self {
        ChangeDescriptor::Model(change)
    }
}
