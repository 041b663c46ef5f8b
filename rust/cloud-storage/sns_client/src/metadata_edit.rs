use std::collections::HashMap;

use anyhow::Context;
use asset_catalog::domain::models::{METADATA_TYPE_ATTRIBUTE, MetadataEditBody, MetadataField};

/// A validated metadata edit ready to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEditPublish {
    pub body: String,
    pub metadata_type: MetadataField,
}

impl MetadataEditPublish {
    pub fn attributes(&self) -> HashMap<String, String> {
        HashMap::from([(
            METADATA_TYPE_ATTRIBUTE.to_string(),
            self.metadata_type.to_string(),
        )])
    }
}

pub fn build_metadata_edit(id: &str, field: &str, value: &str) -> anyhow::Result<MetadataEditPublish> {
    let metadata_type: MetadataField = field
        .parse()
        .with_context(|| format!("{field} is not an editable metadata field"))?;
    anyhow::ensure!(!id.is_empty(), "id must not be empty");
    anyhow::ensure!(!value.is_empty(), "value must not be empty");

    let body = serde_json::to_string(&MetadataEditBody {
        id: Some(id.to_string()),
        field: None,
        value: Some(value.to_string()),
    })?;

    Ok(MetadataEditPublish {
        body,
        metadata_type,
    })
}
