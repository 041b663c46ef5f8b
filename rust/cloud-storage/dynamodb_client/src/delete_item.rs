use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::{PARTITION_KEY, error::CatalogTableError};

pub(crate) async fn delete_item(
    client: &Client,
    table: &str,
    key: &str,
) -> Result<(), CatalogTableError> {
    client
        .delete_item()
        .table_name(table)
        .key(PARTITION_KEY, AttributeValue::S(key.to_owned()))
        .send()
        .await
        .map_err(|e| CatalogTableError::from_sdk("delete_item", e))?;

    Ok(())
}
