//! Lists all groups in a metalake.

use catalog::CatalogStore;

use crate::client::{Group, LocalClient};
use crate::error::CliError;

/// Lists all groups in a metalake.
pub struct ListGroups {
    metalake: String,
}

impl ListGroups {
    pub fn new(metalake: impl Into<String>) -> Self {
        Self {
            metalake: metalake.into(),
        }
    }

    /// Fetches the group names and maps them one-to-one, in order, to
    /// domain group objects.
    pub async fn fetch<S: CatalogStore>(
        &self,
        client: &LocalClient<S>,
    ) -> Result<Vec<Group>, CliError> {
        let names = client.list_group_names().await?;
        Ok(names.into_iter().map(Group::named).collect())
    }

    /// Runs the command, returning the rendered output.
    pub async fn handle<S: CatalogStore>(
        &self,
        client: &LocalClient<S>,
    ) -> Result<String, CliError> {
        let groups = self.fetch(client).await?;
        if groups.is_empty() {
            Ok(format!("No groups found in metalake {}", self.metalake))
        } else {
            Ok(groups
                .iter()
                .map(Group::name)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
