//! Typed access to the asset catalog table.
//!
//! Items are keyed by the canonical asset identifier stored under [PARTITION_KEY]. Every
//! operation here is idempotent: putting the same item twice, deleting a missing key, or
//! setting an attribute to the value it already holds all leave the table unchanged.

mod delete_item;
mod error;
mod get_item;
mod put_item;
mod set_attribute;

use aws_config::SdkConfig;
use serde_dynamo::Item;

pub use error::CatalogTableError;

/// Attribute holding the canonical asset identifier
pub const PARTITION_KEY: &str = "imageName";

#[derive(Debug, Clone)]
pub struct CatalogTable {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl CatalogTable {
    pub fn new(aws_config: &SdkConfig, table: &str) -> Self {
        let client = aws_sdk_dynamodb::Client::new(aws_config);

        Self::new_from_client(client, table)
    }

    pub fn new_from_client(client: aws_sdk_dynamodb::Client, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }

    /// The name of the table this client writes to
    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    /// Creates or replaces the item
    #[tracing::instrument(skip(self, item), fields(table = %self.table))]
    pub async fn put_item(&self, item: Item) -> Result<(), CatalogTableError> {
        put_item::put_item(&self.client, &self.table, item).await
    }

    /// Deletes the item, a missing key is not an error
    #[tracing::instrument(skip(self), fields(table = %self.table))]
    pub async fn delete_item(&self, key: &str) -> Result<(), CatalogTableError> {
        delete_item::delete_item(&self.client, &self.table, key).await
    }

    /// Sets a single string attribute, creating the item if it does not exist yet
    #[tracing::instrument(skip(self, value), fields(table = %self.table))]
    pub async fn set_attribute(
        &self,
        key: &str,
        attribute: &str,
        value: &str,
    ) -> Result<(), CatalogTableError> {
        set_attribute::set_attribute(&self.client, &self.table, key, attribute, value).await
    }

    /// Strongly consistent read of a single item
    #[tracing::instrument(skip(self), fields(table = %self.table))]
    pub async fn get_item(&self, key: &str) -> Result<Option<Item>, CatalogTableError> {
        get_item::get_item(&self.client, &self.table, key).await
    }
}
