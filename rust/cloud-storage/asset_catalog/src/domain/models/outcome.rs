use super::{AssetKey, DeadLetter, MetadataField};

/// A catalog write that was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Put(AssetKey),
    Delete(AssetKey),
    Merge { key: AssetKey, field: MetadataField },
}

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Applied(Mutation),
    /// logged and dropped, redelivering would not change anything
    Skipped(String),
    /// terminal, bound for the dead-letter path
    Rejected(DeadLetter),
    /// failed on a dependency that may recover
    Retry(String),
}

impl RecordOutcome {
    pub fn is_retry(&self) -> bool {
        matches!(self, RecordOutcome::Retry(_))
    }
}

/// Whether the invoker should consider a message done
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Disposition {
    Acknowledge,
    Redeliver,
}

/// The outcome of every record in one message and the disposition derived from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReport {
    pub message_id: String,
    pub records: Vec<RecordOutcome>,
    pub disposition: Disposition,
}

impl MessageReport {
    /// A report for a message whose records were all handled without a retry
    pub fn acknowledged(message_id: impl Into<String>, records: Vec<RecordOutcome>) -> Self {
        MessageReport {
            message_id: message_id.into(),
            records,
            disposition: Disposition::Acknowledge,
        }
    }

    /// Derives the disposition from the record outcomes alone
    pub fn from_records(message_id: impl Into<String>, records: Vec<RecordOutcome>) -> Self {
        let disposition = if records.iter().any(RecordOutcome::is_retry) {
            Disposition::Redeliver
        } else {
            Disposition::Acknowledge
        };

        MessageReport {
            message_id: message_id.into(),
            records,
            disposition,
        }
    }
}

/// Aggregate of a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub messages: Vec<MessageReport>,
}

impl BatchReport {
    /// Ids of the messages that have to be delivered again
    pub fn redeliver_ids(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.disposition == Disposition::Redeliver)
            .map(|m| m.message_id.as_str())
            .collect()
    }

    pub fn has_redeliveries(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.disposition == Disposition::Redeliver)
    }

    fn records(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.messages.iter().flat_map(|m| m.records.iter())
    }

    pub fn applied(&self) -> impl Iterator<Item = &Mutation> {
        self.records().filter_map(|r| match r {
            RecordOutcome::Applied(mutation) => Some(mutation),
            _ => None,
        })
    }

    pub fn rejected(&self) -> impl Iterator<Item = &DeadLetter> {
        self.records().filter_map(|r| match r {
            RecordOutcome::Rejected(dead_letter) => Some(dead_letter),
            _ => None,
        })
    }

    pub fn skipped(&self) -> usize {
        self.records()
            .filter(|r| matches!(r, RecordOutcome::Skipped(_)))
            .count()
    }
}
