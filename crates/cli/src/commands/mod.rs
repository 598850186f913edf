//! CLI commands. Each command takes a scoped client, performs one
//! domain request, and returns the rendered output or a [`CliError`].

mod list_groups;
mod rename_model;

pub use list_groups::ListGroups;
pub use rename_model::RenameModel;
