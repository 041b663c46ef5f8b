//! In process adapters used to run the pipelines without any AWS dependency.
//! Clones share their state, so one catalog can back several services.

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::Mutex;

use crate::domain::{
    models::{AssetKey, AssetRecord, DeadLetter, MetadataField, OutboundEmail, StoreError},
    ports::{CatalogStore, DeadLetterSink, Notifier},
};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Arc<Mutex<BTreeMap<AssetKey, AssetRecord>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record currently stored, ordered by key
    pub async fn records(&self) -> Vec<AssetRecord> {
        self.records.lock().await.values().cloned().collect()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.records
            .lock()
            .await
            .keys()
            .map(|key| key.to_string())
            .collect()
    }
}

impl CatalogStore for InMemoryCatalog {
    async fn put(&self, record: AssetRecord) -> Result<(), StoreError> {
        self.records.lock().await.insert(record.key.clone(), record);
        Ok(())
    }

    async fn delete(&self, key: AssetKey) -> Result<(), StoreError> {
        self.records.lock().await.remove(&key);
        Ok(())
    }

    async fn merge_update(
        &self,
        key: AssetKey,
        field: MetadataField,
        value: String,
    ) -> Result<(), StoreError> {
        self.records
            .lock()
            .await
            .entry(key.clone())
            .or_insert_with(|| AssetRecord::new(key))
            .set_field(field, value);
        Ok(())
    }

    async fn get(&self, key: AssetKey) -> Result<Option<AssetRecord>, StoreError> {
        Ok(self.records.lock().await.get(&key).cloned())
    }
}

/// Collects sent emails and forwarded dead letters
#[derive(Debug, Clone, Default)]
pub struct InMemoryOutbox {
    emails: Arc<Mutex<Vec<OutboundEmail>>>,
    dead_letters: Arc<Mutex<Vec<DeadLetter>>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn emails(&self) -> Vec<OutboundEmail> {
        self.emails.lock().await.clone()
    }

    pub async fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters.lock().await.clone()
    }
}

impl Notifier for InMemoryOutbox {
    async fn send(&self, email: OutboundEmail) -> anyhow::Result<()> {
        self.emails.lock().await.push(email);
        Ok(())
    }
}

impl DeadLetterSink for InMemoryOutbox {
    async fn forward(&self, dead_letter: DeadLetter) -> anyhow::Result<()> {
        self.dead_letters.lock().await.push(dead_letter);
        Ok(())
    }
}
