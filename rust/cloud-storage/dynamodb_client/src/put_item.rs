use aws_sdk_dynamodb::Client;
use serde_dynamo::Item;

use crate::error::CatalogTableError;

pub(crate) async fn put_item(
    client: &Client,
    table: &str,
    item: Item,
) -> Result<(), CatalogTableError> {
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item.into()))
        .send()
        .await
        .map_err(|e| CatalogTableError::from_sdk("put_item", e))?;

    Ok(())
}
