use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use super::ValidationError;

/// The canonical identifier of an asset, derived from the object key it was uploaded under.
/// This is the primary key of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    /// Decodes a raw object key as delivered in a storage notification.
    ///
    /// Storage notifications encode spaces as `+`, so every literal `+` becomes a space before
    /// percent decoding runs: `a+b%2Bc.jpeg` decodes to `a b+c.jpeg`. This never fails,
    /// malformed escapes are kept verbatim and invalid utf-8 is replaced.
    pub fn from_storage_key(raw: &str) -> Self {
        let spaced = raw.replace('+', " ");
        let decoded = urlencoding::decode_binary(spaced.as_bytes());
        let decoded = String::from_utf8_lossy(&decoded);
        AssetKey(decoded.nfc().collect())
    }

    /// Wraps an identifier that is already canonical, e.g. the id of a metadata edit
    pub fn from_canonical(id: impl Into<String>) -> Self {
        AssetKey(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The lower-cased text after the final `.`
    pub fn extension(&self) -> Option<String> {
        self.0
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_lowercase())
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// The asset types accepted into the catalog
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum AssetKind {
    Jpeg,
    Png,
}

impl AssetKind {
    /// Classifies the key by its extension, rejecting anything that is not an accepted type
    pub fn from_key(key: &AssetKey) -> Result<Self, ValidationError> {
        let Some(extension) = key.extension() else {
            return Err(ValidationError::MissingExtension { key: key.clone() });
        };

        extension
            .parse()
            .map_err(|_| ValidationError::UnsupportedExtension {
                key: key.clone(),
                extension,
            })
    }

    /// The extension including the leading dot, e.g. `.png`
    pub fn dotted_extension(&self) -> String {
        format!(".{self}")
    }
}

/// The metadata attributes that can be edited out of band.
/// The variant name is both the routing value and the catalog attribute name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum MetadataField {
    Caption,
    Date,
    Photographer,
}

impl MetadataField {
    /// The attribute this field is stored under
    pub fn attribute_name(&self) -> &'static str {
        self.into()
    }
}

/// A known asset and its metadata.
/// A record exists exactly when the asset was created and not removed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "imageName")]
    pub key: AssetKey,
    #[serde(rename = "Caption", default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        rename = "Photographer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub photographer: Option<String>,
}

impl AssetRecord {
    /// A record with no metadata, as written when the asset is created
    pub fn new(key: AssetKey) -> Self {
        AssetRecord {
            key,
            caption: None,
            date: None,
            photographer: None,
        }
    }

    pub fn field(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::Caption => self.caption.as_deref(),
            MetadataField::Date => self.date.as_deref(),
            MetadataField::Photographer => self.photographer.as_deref(),
        }
    }

    /// Sets a single field, leaving the others untouched
    pub fn set_field(&mut self, field: MetadataField, value: String) {
        let slot = match field {
            MetadataField::Caption => &mut self.caption,
            MetadataField::Date => &mut self.date,
            MetadataField::Photographer => &mut self.photographer,
        };
        *slot = Some(value);
    }

    /// Builder style variant of [AssetRecord::set_field]
    pub fn with_field(mut self, field: MetadataField, value: impl Into<String>) -> Self {
        self.set_field(field, value.into());
        self
    }
}
