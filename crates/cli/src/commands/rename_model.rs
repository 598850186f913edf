//! Renames a model.

use catalog::CatalogStore;

use crate::client::LocalClient;
use crate::error::CliError;

/// Renames a model within a schema.
pub struct RenameModel {
    catalog: String,
    schema: String,
    model: String,
    new_name: String,
}

impl RenameModel {
    pub fn new(
        catalog: impl Into<String>,
        schema: impl Into<String>,
        model: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog: catalog.into(),
            schema: schema.into(),
            model: model.into(),
            new_name: new_name.into(),
        }
    }

    /// Runs the command, returning the rendered output.
    pub async fn handle<S: CatalogStore>(
        &self,
        client: &LocalClient<S>,
    ) -> Result<String, CliError> {
        let snapshot = client
            .rename_model(&self.catalog, &self.schema, &self.model, &self.new_name)
            .await?;
        Ok(format!("Model {} renamed to {}", self.model, snapshot.name()))
    }
}
