use super::AssetKey;

pub const CONFIRMATION_SUBJECT: &str = "New Image Uploaded";
pub const REJECTION_SUBJECT: &str = "Image Rejected";
/// Reason given when a message reached the dead-letter queue through its redrive policy
pub const EXHAUSTED_REASON: &str = "exhausted delivery attempts";

/// A plain text email to hand to the dispatch service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl OutboundEmail {
    /// Sent once a new asset lands in the catalog
    pub fn confirmation(to: &str, key: &AssetKey) -> Self {
        OutboundEmail {
            to: to.to_string(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            text: format!("A new image has been uploaded: {key}"),
        }
    }

    /// Sent when an asset could not be processed
    pub fn rejection(to: &str, key: &AssetKey, reason: &str) -> Self {
        OutboundEmail {
            to: to.to_string(),
            subject: REJECTION_SUBJECT.to_string(),
            text: format!("Your image {key} could not be processed: {reason}"),
        }
    }
}

/// The kind of change recorded on the catalog change stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Modify,
    Remove,
}

/// One entry of the catalog change stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogChange {
    /// None when the stream reported a kind we do not know
    pub kind: Option<ChangeKind>,
    /// the asset in the new image, if there is one
    pub key: Option<AssetKey>,
}

/// Tally of a notification run. Notification failures are counted, never raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationReport {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}
