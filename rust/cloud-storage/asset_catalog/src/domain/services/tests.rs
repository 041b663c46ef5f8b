use cool_asserts::assert_matches;
use mockall::mock;
use serde_json::json;

use super::*;
use crate::{
    domain::{
        models::{
            AssetKey, AssetRecord, CatalogChange, ChangeKind, DeadLetter, Disposition,
            EXHAUSTED_REASON, METADATA_TYPE_ATTRIBUTE, MetadataEditMessage,
            MetadataField, Mutation, OutboundEmail, QueueMessage, RecordOutcome, StoreError,
            TopicMessage,
        },
        ports::{
            CatalogStore, ConfirmationService, DeadLetterReconciler, DeadLetterSink,
            IngestionService, MetadataUpdateService, Notifier,
        },
    },
    outbound::memory::{InMemoryCatalog, InMemoryOutbox},
};

mock! {
    pub Store {}
    impl CatalogStore for Store {
        fn put(&self, record: AssetRecord) -> impl Future<Output = Result<(), StoreError>> + Send;
        fn delete(&self, key: AssetKey) -> impl Future<Output = Result<(), StoreError>> + Send;
        fn merge_update(
            &self,
            key: AssetKey,
            field: MetadataField,
            value: String,
        ) -> impl Future<Output = Result<(), StoreError>> + Send;
        fn get(
            &self,
            key: AssetKey,
        ) -> impl Future<Output = Result<Option<AssetRecord>, StoreError>> + Send;
    }
}

mock! {
    pub Sink {}
    impl DeadLetterSink for Sink {
        fn forward(&self, dead_letter: DeadLetter) -> impl Future<Output = anyhow::Result<()>> + Send;
    }
}

mock! {
    pub Mailer {}
    impl Notifier for Mailer {
        fn send(&self, email: OutboundEmail) -> impl Future<Output = anyhow::Result<()>> + Send;
    }
}

const RECIPIENT: &str = "ops@example.com";

fn storage_body(events: &[(&str, &str)]) -> String {
    let records: Vec<_> = events
        .iter()
        .map(|(event_name, key)| {
            json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": event_name,
                "userIdentity": { "principalId": "AWS:AIDAEXAMPLE" },
                "requestParameters": { "sourceIPAddress": "203.0.113.10" },
                "responseElements": { "x-amz-request-id": "C3D13FE58DE4C810", "x-amz-id-2": "FMyUVURIY8" },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "asset-events",
                    "bucket": {
                        "name": "uploads",
                        "ownerIdentity": { "principalId": "A3NL1KOZZKExample" },
                        "arn": "arn:aws:s3:::uploads"
                    },
                    "object": { "key": key, "size": 1024, "eTag": "d41d8cd98f00b204", "sequencer": "0055AED6DCD90281E5" }
                }
            })
        })
        .collect();
    json!({ "Records": records }).to_string()
}

/// a storage notification as the queue receives it from the topic
fn queued(message_id: &str, events: &[(&str, &str)]) -> QueueMessage {
    let body = json!({
        "Type": "Notification",
        "MessageId": format!("topic-{message_id}"),
        "Message": storage_body(events),
    });
    QueueMessage::new(message_id, body.to_string())
}

fn created(key: &str) -> (&'static str, &str) {
    ("ObjectCreated:Put", key)
}

fn removed(key: &str) -> (&'static str, &str) {
    ("ObjectRemoved:Delete", key)
}

fn edit(message_id: &str, field: &str, id: &str, value: &str) -> MetadataEditMessage {
    MetadataEditMessage {
        message_id: message_id.to_string(),
        message: TopicMessage::new(json!({ "id": id, "value": value }).to_string())
            .with_attribute(METADATA_TYPE_ATTRIBUTE, field),
    }
}

#[tokio::test]
async fn test_apply_creations_idempotently() {
    let catalog = InMemoryCatalog::new();
    let service = IngestionServiceImpl::new(catalog.clone(), InMemoryOutbox::new());

    let first = service
        .ingest(vec![
            queued("m1", &[created("photo+1.png")]),
            queued("m2", &[created("photo%201.png")]),
        ])
        .await;
    let after_first = catalog.records().await;

    let again = service
        .ingest(vec![queued("m1", &[created("photo+1.png")])])
        .await;

    assert!(!first.has_redeliveries());
    assert!(!again.has_redeliveries());
    assert_eq!(catalog.keys().await, vec!["photo 1.png"]);
    assert_eq!(catalog.records().await, after_first);
}

#[tokio::test]
async fn test_treat_removing_a_missing_key_as_a_no_op() {
    let catalog = InMemoryCatalog::new();
    let service = IngestionServiceImpl::new(catalog.clone(), InMemoryOutbox::new());

    let report = service
        .ingest(vec![queued("m1", &[removed("ghost.png")])])
        .await;

    assert_eq!(report.messages[0].disposition, Disposition::Acknowledge);
    assert_matches!(
        report.messages[0].records.as_slice(),
        [RecordOutcome::Applied(Mutation::Delete(_))]
    );
    assert!(catalog.keys().await.is_empty());
}

#[tokio::test]
async fn test_reject_unsupported_assets_without_affecting_siblings() {
    let catalog = InMemoryCatalog::new();
    let outbox = InMemoryOutbox::new();
    let service = IngestionServiceImpl::new(catalog.clone(), outbox.clone());

    let report = service
        .ingest(vec![queued(
            "m1",
            &[created("malware.exe"), created("ok.jpeg")],
        )])
        .await;

    assert_eq!(catalog.keys().await, vec!["ok.jpeg"]);
    assert_eq!(report.redeliver_ids(), Vec::<&str>::new());

    let dead_letters = outbox.dead_letters().await;
    assert_eq!(dead_letters.len(), 1);
    assert_eq!(dead_letters[0].asset_key.as_str(), "malware.exe");
    assert_eq!(dead_letters[0].bucket.as_deref(), Some("uploads"));
    assert_eq!(dead_letters[0].source_message_id, "m1");
}

#[tokio::test]
async fn test_only_notify_about_the_rejected_record() {
    let catalog = InMemoryCatalog::new();
    let outbox = InMemoryOutbox::new();
    let ingestion = IngestionServiceImpl::new(catalog.clone(), outbox.clone());
    let reconciler = DeadLetterReconcilerImpl::new(outbox.clone(), RECIPIENT);

    let report = ingestion
        .ingest(vec![queued(
            "m1",
            &[created("malware.exe"), created("ok.jpeg"), removed("gone.png")],
        )])
        .await;

    assert!(!report.has_redeliveries());
    assert_eq!(catalog.keys().await, vec!["ok.jpeg"]);

    let dead_lettered: Vec<QueueMessage> = outbox
        .dead_letters()
        .await
        .iter()
        .enumerate()
        .map(|(i, dead_letter)| {
            QueueMessage::new(format!("d{i}"), serde_json::to_string(dead_letter).unwrap())
        })
        .collect();
    let notified = reconciler.reconcile(dead_lettered).await;

    assert_eq!(notified.sent, 1);
    assert_eq!(
        outbox.emails().await,
        vec![OutboundEmail::rejection(
            RECIPIENT,
            &AssetKey::from_canonical("malware.exe"),
            "malware.exe has unsupported extension .exe",
        )]
    );
}

#[tokio::test]
async fn test_only_report_creations_of_a_redriven_message() {
    let outbox = InMemoryOutbox::new();
    let reconciler = DeadLetterReconcilerImpl::new(outbox.clone(), RECIPIENT);

    let report = reconciler
        .reconcile(vec![
            queued("d1", &[created("slow.png"), removed("gone.png")]),
            queued("d2", &[removed("other.png")]),
        ])
        .await;

    assert_eq!(report.sent, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        outbox.emails().await,
        vec![OutboundEmail::rejection(
            RECIPIENT,
            &AssetKey::from_canonical("slow.png"),
            EXHAUSTED_REASON,
        )]
    );
}

#[tokio::test]
async fn test_redeliver_on_transient_store_errors() {
    let mut store = MockStore::new();
    store.expect_put().returning(|record| {
        Box::pin(async move {
            if record.key.as_str() == "slow.png" {
                Err(StoreError::Transient(anyhow::anyhow!("throttled")))
            } else {
                Ok(())
            }
        })
    });

    let mut sink = MockSink::new();
    sink.expect_forward().never();

    let service = IngestionServiceImpl::new(store, sink);
    let report = service
        .ingest(vec![
            queued("m1", &[created("slow.png"), created("bad.gif")]),
            queued("m2", &[created("fast.png")]),
        ])
        .await;

    assert_eq!(report.redeliver_ids(), vec!["m1"]);
    assert_matches!(
        report.messages[0].records.as_slice(),
        [RecordOutcome::Retry(_), RecordOutcome::Rejected(_)]
    );
}

#[tokio::test]
async fn test_dead_letter_records_the_store_refuses() {
    let mut store = MockStore::new();
    store
        .expect_delete()
        .returning(|_| Box::pin(async { Err(StoreError::Rejected(anyhow::anyhow!("no table"))) }));

    let mut sink = MockSink::new();
    sink.expect_forward()
        .times(1)
        .returning(|_| Box::pin(async { Ok(()) }));

    let service = IngestionServiceImpl::new(store, sink);
    let report = service
        .ingest(vec![queued("m1", &[removed("x.png")])])
        .await;

    assert!(!report.has_redeliveries());
    assert_eq!(report.rejected().count(), 1);
}

#[tokio::test]
async fn test_redeliver_when_forwarding_fails() {
    let mut sink = MockSink::new();
    sink.expect_forward()
        .returning(|_| Box::pin(async { Err(anyhow::anyhow!("queue unavailable")) }));

    let service = IngestionServiceImpl::new(InMemoryCatalog::new(), sink);
    let report = service
        .ingest(vec![queued("m1", &[created("malware.exe")])])
        .await;

    assert_eq!(report.redeliver_ids(), vec!["m1"]);
}

#[tokio::test]
async fn test_skip_malformed_and_unrecognized_messages() {
    let catalog = InMemoryCatalog::new();
    let service = IngestionServiceImpl::new(catalog.clone(), InMemoryOutbox::new());

    let test_event = json!({ "Service": "Amazon S3", "Event": "s3:TestEvent" }).to_string();
    let broken_record = json!({ "Records": [{ "eventName": "ObjectCreated:Put" }] }).to_string();

    let report = service
        .ingest(vec![
            QueueMessage::new("garbage", "not json"),
            QueueMessage {
                message_id: "empty".to_string(),
                body: None,
            },
            QueueMessage::new("test", test_event),
            QueueMessage::new("broken", broken_record),
            queued("restore", &[("ObjectRestore:Completed", "x.png")]),
            queued("ok", &[created("x.png")]),
        ])
        .await;

    assert!(!report.has_redeliveries());
    assert_eq!(report.skipped(), 5);
    assert_eq!(catalog.keys().await, vec!["x.png"]);
}

#[tokio::test]
async fn test_store_exactly_the_created_asset_regardless_of_order() {
    for events in [
        [created("x.png"), removed("y.png")],
        [removed("y.png"), created("x.png")],
    ] {
        let catalog = InMemoryCatalog::new();
        let service = IngestionServiceImpl::new(catalog.clone(), InMemoryOutbox::new());

        service.ingest(vec![queued("m1", &events)]).await;
        assert_eq!(catalog.keys().await, vec!["x.png"]);

        let catalog = InMemoryCatalog::new();
        let service = IngestionServiceImpl::new(catalog.clone(), InMemoryOutbox::new());
        let messages = events
            .iter()
            .enumerate()
            .map(|(i, event)| queued(&format!("m{i}"), &[*event]))
            .collect();

        service.ingest(messages).await;
        assert_eq!(catalog.keys().await, vec!["x.png"]);
    }
}

#[tokio::test]
async fn test_merge_a_single_field() {
    let catalog = InMemoryCatalog::new();
    catalog
        .put(AssetRecord::new(AssetKey::from_canonical("x.png")).with_field(MetadataField::Date, "2020"))
        .await
        .unwrap();

    let service = MetadataUpdateServiceImpl::new(catalog.clone());
    let report = service
        .apply_edits(vec![edit("n1", "Caption", "x.png", "sunset")])
        .await;

    assert!(!report.has_redeliveries());
    assert_eq!(
        catalog
            .get(AssetKey::from_canonical("x.png"))
            .await
            .unwrap(),
        Some(
            AssetRecord::new(AssetKey::from_canonical("x.png"))
                .with_field(MetadataField::Date, "2020")
                .with_field(MetadataField::Caption, "sunset")
        )
    );
}

#[tokio::test]
async fn test_create_a_record_holding_only_the_edited_field() {
    let catalog = InMemoryCatalog::new();
    let service = MetadataUpdateServiceImpl::new(catalog.clone());

    service
        .apply_edits(vec![edit("n1", "Photographer", "new.png", "Ann")])
        .await;

    assert_eq!(
        catalog.records().await,
        vec![AssetRecord::new(AssetKey::from_canonical("new.png"))
            .with_field(MetadataField::Photographer, "Ann")]
    );
}

#[tokio::test]
async fn test_skip_edits_it_cannot_apply() {
    let mut store = MockStore::new();
    store.expect_merge_update().never();

    let service = MetadataUpdateServiceImpl::new(store);
    let report = service
        .apply_edits(vec![
            edit("location", "Location", "x.png", "Oslo"),
            edit("no-value", "Caption", "x.png", ""),
            edit("no-id", "Caption", "", "sunset"),
            MetadataEditMessage {
                message_id: "malformed".to_string(),
                message: TopicMessage::new("{").with_attribute(METADATA_TYPE_ATTRIBUTE, "Date"),
            },
        ])
        .await;

    assert!(!report.has_redeliveries());
    assert_eq!(report.skipped(), 4);
}

#[tokio::test]
async fn test_redeliver_edits_that_failed_transiently() {
    let mut store = MockStore::new();
    store
        .expect_merge_update()
        .withf(|key, field, value| {
            key.as_str() == "x.png" && *field == MetadataField::Date && value == "2020"
        })
        .returning(|_, _, _| {
            Box::pin(async { Err(StoreError::Transient(anyhow::anyhow!("timed out"))) })
        });

    let service = MetadataUpdateServiceImpl::new(store);
    let report = service
        .apply_edits(vec![edit("n1", "Date", "x.png", "2020")])
        .await;

    assert_eq!(report.redeliver_ids(), vec!["n1"]);
}

#[tokio::test]
async fn test_acknowledge_edits_the_store_refuses() {
    let mut store = MockStore::new();
    store.expect_merge_update().returning(|_, _, _| {
        Box::pin(async { Err(StoreError::Rejected(anyhow::anyhow!("validation"))) })
    });

    let service = MetadataUpdateServiceImpl::new(store);
    let report = service
        .apply_edits(vec![edit("n1", "Date", "x.png", "2020")])
        .await;

    assert!(!report.has_redeliveries());
    assert_eq!(report.skipped(), 1);
}

#[tokio::test]
async fn test_send_a_rejection_per_dead_lettered_asset() {
    let outbox = InMemoryOutbox::new();
    let reconciler = DeadLetterReconcilerImpl::new(outbox.clone(), RECIPIENT);

    let forwarded = DeadLetter {
        asset_key: AssetKey::from_canonical("malware.exe"),
        bucket: Some("uploads".to_string()),
        reason: "malware.exe has unsupported extension .exe".to_string(),
        source_message_id: "m1".to_string(),
    };

    let report = reconciler
        .reconcile(vec![
            QueueMessage::new("d1", serde_json::to_string(&forwarded).unwrap()),
            queued("d2", &[created("a.png"), created("b.png")]),
            QueueMessage::new("d3", "not json"),
        ])
        .await;

    assert_eq!(report.sent, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    let emails = outbox.emails().await;
    assert_eq!(
        emails[0].text,
        "Your image malware.exe could not be processed: malware.exe has unsupported extension .exe"
    );
    assert_eq!(
        emails[1],
        OutboundEmail::rejection(RECIPIENT, &AssetKey::from_canonical("a.png"), EXHAUSTED_REASON)
    );
    assert!(emails.iter().all(|email| email.to == RECIPIENT));
}

#[tokio::test]
async fn test_count_rejections_that_could_not_be_sent() {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .times(2)
        .returning(|_| Box::pin(async { Err(anyhow::anyhow!("ses unavailable")) }));

    let reconciler = DeadLetterReconcilerImpl::new(mailer, RECIPIENT);
    let report = reconciler
        .reconcile(vec![queued(
            "d1",
            &[created("a.png"), removed("b.png"), created("c.png")],
        )])
        .await;

    assert_eq!(report.failed, 2);
    assert_eq!(report.sent, 0);
}

#[tokio::test]
async fn test_confirm_only_inserted_assets() {
    let outbox = InMemoryOutbox::new();
    let service = ConfirmationServiceImpl::new(outbox.clone(), RECIPIENT);
    let key = AssetKey::from_canonical("x.png");

    let report = service
        .confirm(vec![
            CatalogChange {
                kind: Some(ChangeKind::Insert),
                key: Some(key.clone()),
            },
            CatalogChange {
                kind: Some(ChangeKind::Modify),
                key: Some(key.clone()),
            },
            CatalogChange {
                kind: Some(ChangeKind::Insert),
                key: None,
            },
            CatalogChange {
                kind: None,
                key: Some(key.clone()),
            },
        ])
        .await;

    assert_eq!(report.sent, 1);
    assert_eq!(report.skipped, 3);
    assert_eq!(
        outbox.emails().await,
        vec![OutboundEmail::confirmation(RECIPIENT, &key)]
    );
}

#[tokio::test]
async fn test_never_raise_confirmation_failures() {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .returning(|_| Box::pin(async { Err(anyhow::anyhow!("ses unavailable")) }));

    let service = ConfirmationServiceImpl::new(mailer, RECIPIENT);
    let report = service
        .confirm(vec![CatalogChange {
            kind: Some(ChangeKind::Insert),
            key: Some(AssetKey::from_canonical("x.png")),
        }])
        .await;

    assert_eq!(report.failed, 1);
}
