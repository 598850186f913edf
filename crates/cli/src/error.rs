//! Error-to-message mapping for the command line.

use catalog::CatalogError;
use common::EntityKind;
use thiserror::Error;

/// Canned message for an unresolvable metalake name.
pub const UNKNOWN_METALAKE: &str = "Unknown metalake name.";
/// Canned message for an unresolvable model name.
pub const UNKNOWN_MODEL: &str = "Unknown model name.";

/// A failed command invocation. The message is what the user sees;
/// every failure ends the process with a non-zero exit code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CliError(pub String);

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        let message = match &err {
            CatalogError::NotFound {
                kind: EntityKind::Metalake,
                ..
            } => UNKNOWN_METALAKE.to_string(),
            CatalogError::NotFound {
                kind: EntityKind::Model,
                ..
            } => UNKNOWN_MODEL.to_string(),
            // Unclassified errors surface their raw message.
            _ => err.to_string(),
        };
        CliError(message)
    }
}
