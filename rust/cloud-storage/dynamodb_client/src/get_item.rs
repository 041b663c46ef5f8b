use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::Item;

use crate::{PARTITION_KEY, error::CatalogTableError};

pub(crate) async fn get_item(
    client: &Client,
    table: &str,
    key: &str,
) -> Result<Option<Item>, CatalogTableError> {
    let output = client
        .get_item()
        .table_name(table)
        .key(PARTITION_KEY, AttributeValue::S(key.to_owned()))
        .consistent_read(true)
        .send()
        .await
        .map_err(|e| CatalogTableError::from_sdk("get_item", e))?;

    Ok(output.item.map(Item::from))
}
