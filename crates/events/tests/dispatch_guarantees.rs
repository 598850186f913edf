//! End-to-end dispatch guarantees: ordering, exactly-once delivery,
//! listener isolation, and the pre-event policy.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use catalog::{CatalogError, CatalogStore, ErrorKind, InMemoryCatalogStore, ModelChange};
use common::{EntityKind, NameIdentifier};
use events::{
    CatalogService, DispatchPolicy, Event, EventBus, EventListener, EventPhase, ListenerError,
    OperationType,
};

/// Records every event it observes, in delivery order.
struct RecordingListener {
    name: String,
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingListener {
    fn new(name: &str) -> (Arc<Self>, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let listener = Arc::new(Self {
            name: name.to_string(),
            events: Arc::clone(&events),
        });
        (listener, events)
    }
}

impl EventListener for RecordingListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, event: &Event) -> Result<(), ListenerError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Fails on every event, recording how often it was invoked.
struct FailingListener {
    invocations: Arc<Mutex<u64>>,
}

impl FailingListener {
    fn new() -> (Arc<Self>, Arc<Mutex<u64>>) {
        let invocations = Arc::new(Mutex::new(0));
        let listener = Arc::new(Self {
            invocations: Arc::clone(&invocations),
        });
        (listener, invocations)
    }
}

impl EventListener for FailingListener {
    fn name(&self) -> &str {
        "failing"
    }

    fn on_event(&self, _event: &Event) -> Result<(), ListenerError> {
        *self.invocations.lock().unwrap() += 1;
        Err("audit sink unavailable".into())
    }
}

fn model_ident() -> NameIdentifier {
    NameIdentifier::of_model("lake", "cat", "sch", "m1")
}

async fn service_with_model(
    bus: EventBus,
) -> CatalogService<InMemoryCatalogStore> {
    let store = InMemoryCatalogStore::new();
    store
        .create(
            &model_ident(),
            EntityKind::Model,
            "admin",
            None,
            BTreeMap::new(),
        )
        .await
        .unwrap();
    CatalogService::new(store, Arc::new(bus))
}

#[tokio::test]
async fn successful_alter_delivers_pre_then_success() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);
    let service = service_with_model(bus).await;

    let changes = vec![ModelChange::rename("m2").unwrap().into()];
    let snapshot = service
        .alter("alice", &model_ident(), EntityKind::Model, changes)
        .await
        .unwrap();
    assert_eq!(snapshot.name(), "m2");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);

    let pre = &events[0];
    assert_eq!(pre.phase(), EventPhase::Pre);
    assert_eq!(pre.operation_type(), OperationType::Alter);
    assert_eq!(pre.actor(), "alice");
    assert_eq!(pre.identifier(), &model_ident());
    assert_eq!(pre.changes().len(), 1);
    assert!(pre.updated_info().is_none());

    let success = &events[1];
    assert_eq!(success.phase(), EventPhase::Success);
    assert_eq!(success.updated_info().map(|s| s.name()), Some("m2"));
    assert_eq!(success.changes()[0].to_string(), "RenameModel m2");
    assert_eq!(success.correlation_id(), pre.correlation_id());
}

#[tokio::test]
async fn failed_alter_delivers_pre_then_failure_and_reraises() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);
    let service = service_with_model(bus).await;

    let missing = model_ident().with_name("ghost");
    let changes = vec![ModelChange::rename("m9").unwrap().into()];
    let err = service
        .alter("alice", &missing, EntityKind::Model, changes)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].phase(), EventPhase::Pre);

    let failure = &events[1];
    assert_eq!(failure.phase(), EventPhase::Failure);
    assert_eq!(failure.error_kind(), Some(ErrorKind::NotFound));
    assert!(failure.updated_info().is_none());
    assert_eq!(failure.correlation_id(), events[0].correlation_id());

    // No success event was ever delivered for this invocation.
    assert!(events.iter().all(|e| e.phase() != EventPhase::Success));
}

#[tokio::test]
async fn listeners_observe_in_registration_order() {
    let mut bus = EventBus::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderListener {
        name: String,
        order: Arc<Mutex<Vec<String>>>,
    }

    impl EventListener for OrderListener {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_event(&self, event: &Event) -> Result<(), ListenerError> {
            self.order
                .lock()
                .unwrap()
                .push(format!("{}:{:?}", self.name, event.phase()));
            Ok(())
        }
    }

    for name in ["first", "second", "third"] {
        bus.register(Arc::new(OrderListener {
            name: name.to_string(),
            order: Arc::clone(&order),
        }));
    }
    let service = service_with_model(bus).await;

    let changes = vec![ModelChange::update_comment("v2").unwrap().into()];
    service
        .alter("alice", &model_ident(), EntityKind::Model, changes)
        .await
        .unwrap();

    let order = order.lock().unwrap();
    assert_eq!(
        *order,
        vec![
            "first:Pre",
            "second:Pre",
            "third:Pre",
            "first:Success",
            "second:Success",
            "third:Success",
        ]
    );
}

#[tokio::test]
async fn failing_listener_does_not_block_delivery_or_change_outcome() {
    let mut bus = EventBus::new();
    let (failing, invocations) = FailingListener::new();
    let (recording, events) = RecordingListener::new("after-failing");
    bus.register(failing);
    bus.register(recording);
    let service = service_with_model(bus).await;

    let changes = vec![ModelChange::rename("m2").unwrap().into()];
    let result = service
        .alter("alice", &model_ident(), EntityKind::Model, changes)
        .await;

    // The operation still succeeds.
    assert_eq!(result.unwrap().name(), "m2");

    // The failing listener saw both events; so did the one after it.
    assert_eq!(*invocations.lock().unwrap(), 2);
    assert_eq!(events.lock().unwrap().len(), 2);

    // Failures land on the side channel only.
    assert_eq!(service.bus().observer_failures(), 2);
}

#[tokio::test]
async fn invalid_descriptor_short_circuits_before_any_event() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);
    let service = service_with_model(bus).await;

    let changes = vec![
        ModelChange::Rename {
            new_name: String::new(),
        }
        .into(),
    ];
    let err = service
        .alter("alice", &model_ident(), EntityKind::Model, changes)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
    assert!(events.lock().unwrap().is_empty());

    // The store was never touched.
    let unchanged = service
        .store()
        .get(&model_ident(), EntityKind::Model)
        .await
        .unwrap();
    assert_eq!(unchanged.name(), "m1");
}

#[tokio::test]
async fn reads_emit_terminal_event_only_by_default() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);
    let service = service_with_model(bus).await;

    service
        .get("alice", &model_ident(), EntityKind::Model)
        .await
        .unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].phase(), EventPhase::Success);
    assert_eq!(events[0].operation_type(), OperationType::Get);
}

#[tokio::test]
async fn pre_event_policy_is_configurable_per_operation() {
    let policy = DispatchPolicy::default().with_pre_event(OperationType::List, true);
    let mut bus = EventBus::with_policy(policy);
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);

    let store = InMemoryCatalogStore::new();
    store
        .create(
            &NameIdentifier::of_metalake("lake"),
            EntityKind::Metalake,
            "admin",
            None,
            BTreeMap::new(),
        )
        .await
        .unwrap();
    let service = CatalogService::new(store, Arc::new(bus));

    let names = service.list_group_names("alice", "lake").await.unwrap();
    assert!(names.is_empty());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].phase(), EventPhase::Pre);
    assert_eq!(events[0].operation_type(), OperationType::List);
    assert_eq!(events[1].phase(), EventPhase::Success);
    assert_eq!(events[1].names(), Some(&[][..]));
}

#[tokio::test]
async fn filtered_listener_sees_only_its_operations() {
    let mut bus = EventBus::new();
    let (alter_only, alter_events) = RecordingListener::new("alter-only");
    bus.register_filtered(alter_only, [OperationType::Alter]);
    let service = service_with_model(bus).await;

    service
        .create(
            "alice",
            &model_ident().with_name("m2"),
            EntityKind::Model,
            None,
            BTreeMap::new(),
        )
        .await
        .unwrap();
    assert!(alter_events.lock().unwrap().is_empty());

    let changes = vec![ModelChange::update_comment("v2").unwrap().into()];
    service
        .alter("alice", &model_ident(), EntityKind::Model, changes)
        .await
        .unwrap();
    assert_eq!(alter_events.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn list_success_carries_names_in_order() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);

    let store = InMemoryCatalogStore::new();
    store
        .create(
            &NameIdentifier::of_metalake("lake"),
            EntityKind::Metalake,
            "admin",
            None,
            BTreeMap::new(),
        )
        .await
        .unwrap();
    for group in ["ops", "analysts"] {
        store
            .create(
                &NameIdentifier::of_group("lake", group),
                EntityKind::Group,
                "admin",
                None,
                BTreeMap::new(),
            )
            .await
            .unwrap();
    }
    let service = CatalogService::new(store, Arc::new(bus));

    let names = service.list_group_names("alice", "lake").await.unwrap();
    assert_eq!(names, vec!["analysts".to_string(), "ops".to_string()]);

    let events = events.lock().unwrap();
    assert_eq!(events[0].names(), Some(&names[..]));
}

#[tokio::test]
async fn root_listing_targets_the_catalog_root() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);

    let store = InMemoryCatalogStore::new();
    for metalake in ["lake-a", "lake-b"] {
        store
            .create(
                &NameIdentifier::of_metalake(metalake),
                EntityKind::Metalake,
                "admin",
                None,
                BTreeMap::new(),
            )
            .await
            .unwrap();
    }
    let service = CatalogService::new(store, Arc::new(bus));

    let names = service
        .list("alice", &common::Namespace::empty(), EntityKind::Metalake)
        .await
        .unwrap();
    assert_eq!(names, vec!["lake-a".to_string(), "lake-b".to_string()]);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].identifier(), &NameIdentifier::root());
    assert!(!events[0].identifier().name().is_empty());
}

#[tokio::test]
async fn concurrent_invocations_keep_per_invocation_ordering() {
    let mut bus = EventBus::new();
    let (listener, events) = RecordingListener::new("rec");
    bus.register(listener);

    let store = InMemoryCatalogStore::new();
    for i in 0..8 {
        store
            .create(
                &model_ident().with_name(format!("m{i}")),
                EntityKind::Model,
                "admin",
                None,
                BTreeMap::new(),
            )
            .await
            .unwrap();
    }
    let service = Arc::new(CatalogService::new(store, Arc::new(bus)));

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let ident = model_ident().with_name(format!("m{i}"));
            let changes = vec![ModelChange::update_comment(format!("c{i}")).unwrap().into()];
            service
                .alter("alice", &ident, EntityKind::Model, changes)
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 16);

    // Within one correlation id, pre comes strictly before success, and
    // each invocation delivered exactly one of each.
    let mut by_correlation: std::collections::HashMap<uuid::Uuid, Vec<EventPhase>> =
        std::collections::HashMap::new();
    for event in events.iter() {
        by_correlation
            .entry(event.correlation_id())
            .or_default()
            .push(event.phase());
    }
    assert_eq!(by_correlation.len(), 8);
    for phases in by_correlation.values() {
        assert_eq!(*phases, vec![EventPhase::Pre, EventPhase::Success]);
    }
}
