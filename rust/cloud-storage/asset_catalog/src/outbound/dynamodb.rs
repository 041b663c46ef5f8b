use dynamodb_client::{CatalogTable, CatalogTableError};
use serde_dynamo::Item;

use crate::domain::{
    models::{AssetKey, AssetRecord, MetadataField, StoreError},
    ports::CatalogStore,
};

fn store_error(err: CatalogTableError) -> StoreError {
    if err.is_transient() {
        StoreError::Transient(err.into())
    } else {
        StoreError::Rejected(err.into())
    }
}

fn conversion_error(err: serde_dynamo::Error) -> StoreError {
    StoreError::Rejected(anyhow::Error::new(err).context("converting catalog item"))
}

impl CatalogStore for CatalogTable {
    #[tracing::instrument(skip(self, record), fields(key = %record.key), err)]
    async fn put(&self, record: AssetRecord) -> Result<(), StoreError> {
        let item: Item = serde_dynamo::to_item(&record).map_err(conversion_error)?;
        self.put_item(item).await.map_err(store_error)
    }

    #[tracing::instrument(skip(self), err)]
    async fn delete(&self, key: AssetKey) -> Result<(), StoreError> {
        self.delete_item(key.as_str()).await.map_err(store_error)
    }

    #[tracing::instrument(skip(self, value), err)]
    async fn merge_update(
        &self,
        key: AssetKey,
        field: MetadataField,
        value: String,
    ) -> Result<(), StoreError> {
        self.set_attribute(key.as_str(), field.attribute_name(), &value)
            .await
            .map_err(store_error)
    }

    #[tracing::instrument(skip(self), err)]
    async fn get(&self, key: AssetKey) -> Result<Option<AssetRecord>, StoreError> {
        self.get_item(key.as_str())
            .await
            .map_err(store_error)?
            .map(serde_dynamo::from_item)
            .transpose()
            .map_err(conversion_error)
    }
}

#[cfg(test)]
mod tests {
    use serde_dynamo::AttributeValue;

    use super::*;

    #[test]
    fn test_keep_the_retry_classification_of_table_errors() {
        let throttled = CatalogTableError::Transient {
            operation: "put_item",
            source: anyhow::anyhow!("ProvisionedThroughputExceededException"),
        };
        assert!(matches!(store_error(throttled), StoreError::Transient(_)));

        assert!(matches!(
            store_error(CatalogTableError::KeyAttribute),
            StoreError::Rejected(_)
        ));
    }

    #[test]
    fn test_store_records_under_the_partition_key() {
        let record = AssetRecord::new(AssetKey::from_canonical("photo 1.png"))
            .with_field(MetadataField::Caption, "sunset");

        let AttributeValue::M(item) = serde_dynamo::to_attribute_value(&record).unwrap() else {
            panic!("records serialize to a map");
        };

        assert_eq!(
            item.get(dynamodb_client::PARTITION_KEY),
            Some(&AttributeValue::S("photo 1.png".to_string()))
        );
        assert_eq!(
            item.get("Caption"),
            Some(&AttributeValue::S("sunset".to_string()))
        );
        assert!(!item.contains_key("Date"));

        let back: AssetRecord = serde_dynamo::from_attribute_value(AttributeValue::M(item)).unwrap();
        assert_eq!(back, record);
    }
}
