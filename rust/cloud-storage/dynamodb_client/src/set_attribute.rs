use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::{PARTITION_KEY, error::CatalogTableError};

// attribute names go through a placeholder since names like `Date` are reserved words
const UPDATE_EXPRESSION: &str = "SET #attribute = :value";

pub(crate) async fn set_attribute(
    client: &Client,
    table: &str,
    key: &str,
    attribute: &str,
    value: &str,
) -> Result<(), CatalogTableError> {
    if attribute == PARTITION_KEY {
        return Err(CatalogTableError::KeyAttribute);
    }

    client
        .update_item()
        .table_name(table)
        .key(PARTITION_KEY, AttributeValue::S(key.to_owned()))
        .update_expression(UPDATE_EXPRESSION)
        .expression_attribute_names("#attribute", attribute)
        .expression_attribute_values(":value", AttributeValue::S(value.to_owned()))
        .send()
        .await
        .map_err(|e| CatalogTableError::from_sdk("update_item", e))?;

    Ok(())
}
