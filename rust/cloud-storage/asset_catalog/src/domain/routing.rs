//! Content based fan-out of topic messages to subscriptions.
//!
//! Predicates are fixed when a [Topic] is wired up and only ever evaluated afterwards. A
//! subscription receives a message when every one of its predicates matches; a subscription
//! without predicates receives everything.

use std::collections::BTreeSet;

use crate::domain::models::{EventKind, MetadataField, StorageRecord, TopicMessage, storage_records};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPredicate {
    /// matches when any storage record in the payload is of an allowed kind
    EventKind(BTreeSet<EventKind>),
    /// matches when the metadata type of the message is an allowed field
    MetadataField(BTreeSet<MetadataField>),
}

impl FilterPredicate {
    pub fn event_kinds(kinds: impl IntoIterator<Item = EventKind>) -> Self {
        FilterPredicate::EventKind(kinds.into_iter().collect())
    }

    pub fn metadata_fields(fields: impl IntoIterator<Item = MetadataField>) -> Self {
        FilterPredicate::MetadataField(fields.into_iter().collect())
    }

    pub fn matches(&self, message: &TopicMessage) -> bool {
        match self {
            FilterPredicate::EventKind(allowed) => storage_records(&message.body)
                .unwrap_or_default()
                .iter()
                .filter_map(|record| StorageRecord::parse(record).ok())
                .filter_map(|record| EventKind::from_event_name(&record.event_name))
                .any(|kind| allowed.contains(&kind)),
            FilterPredicate::MetadataField(allowed) => message
                .metadata_type()
                .and_then(|name| name.parse::<MetadataField>().ok())
                .is_some_and(|field| allowed.contains(&field)),
        }
    }
}

/// A consumer attached to a [Topic]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub name: String,
    pub filters: Vec<FilterPredicate>,
}

impl Subscription {
    pub fn new(name: impl Into<String>) -> Self {
        Subscription {
            name: name.into(),
            filters: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: FilterPredicate) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn accepts(&self, message: &TopicMessage) -> bool {
        self.filters.iter().all(|filter| filter.matches(message))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    subscriptions: Vec<Subscription>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Topic {
            name: name.into(),
            subscriptions: Vec::new(),
        }
    }

    pub fn subscribe(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// The subscriptions that receive `message`, possibly none
    #[tracing::instrument(skip(self, message), fields(topic = %self.name))]
    pub fn deliveries(&self, message: &TopicMessage) -> Vec<&Subscription> {
        let deliveries: Vec<&Subscription> = self
            .subscriptions
            .iter()
            .filter(|subscription| subscription.accepts(message))
            .collect();

        if deliveries.is_empty() {
            tracing::debug!("message matched no subscription");
        }

        deliveries
    }
}
