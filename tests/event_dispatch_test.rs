use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gantry::configurator::Configurator;
use gantry::events::{self, HostEvent};
use gantry::executor::{DirectExecutor, SpawnExecutor, TaskExecutor};
use gantry::{EventBridge, EventNode, EventSink, RuntimeContext};

#[derive(Debug)]
struct TestConfigurator {
    executor: Arc<dyn TaskExecutor>,
}

impl Configurator for TestConfigurator {
    fn type_name(&self) -> &str {
        "test.Configurator"
    }

    fn executor(&self) -> Arc<dyn TaskExecutor> {
        Arc::clone(&self.executor)
    }
}

fn context_with(executor: Arc<dyn TaskExecutor>) -> Arc<RuntimeContext> {
    Arc::new(RuntimeContext::new(Arc::new(TestConfigurator { executor })))
}

#[derive(Default)]
struct CollectingSink {
    events: Mutex<Vec<HostEvent>>,
}

impl CollectingSink {
    fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.name.clone())
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn process(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[test]
fn submits_event_through_installed_executor() {
    let submissions = Arc::new(AtomicUsize::new(0));

    #[derive(Debug)]
    struct CountingExecutor {
        submissions: Arc<AtomicUsize>,
    }

    impl TaskExecutor for CountingExecutor {
        fn execute(&self, task: Box<dyn FnOnce() + Send>) {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            task();
        }
    }

    let context = context_with(Arc::new(CountingExecutor {
        submissions: Arc::clone(&submissions),
    }));
    let sink = Arc::new(CollectingSink::default());
    let bridge = EventBridge::new(context, Arc::clone(&sink) as Arc<dyn EventSink>);

    bridge.on_event(HostEvent::new("click"));
    bridge.on_event(HostEvent::new("keydown"));

    assert_eq!(submissions.load(Ordering::SeqCst), 2);
    assert_eq!(sink.names(), vec!["click".to_string(), "keydown".to_string()]);
}

#[test]
fn delivers_target_attributes_to_the_sink() {
    let context = context_with(Arc::new(DirectExecutor));
    let sink = Arc::new(CollectingSink::default());
    let bridge = EventBridge::new(context, Arc::clone(&sink) as Arc<dyn EventSink>);

    let event = HostEvent::new("click")
        .with_current_target(EventNode::new().with_attribute("data-element-id", "save-button"));
    bridge.on_event(event);

    let received = sink.events.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        events::event_target_id(&received[0]).as_deref(),
        Some("save-button")
    );
}

#[test]
fn drops_reentrant_events_while_processing() {
    // A sink that re-dispatches through the same bridge while processing; the
    // nested task runs inline on the DirectExecutor and must be dropped by
    // the single-flight guard.
    struct ReentrantSink {
        bridge: Mutex<Option<Arc<EventBridge>>>,
        processed: AtomicUsize,
    }

    impl EventSink for ReentrantSink {
        fn process(&self, _event: HostEvent) {
            self.processed.fetch_add(1, Ordering::SeqCst);
            let bridge = self.bridge.lock().unwrap().clone();
            if let Some(bridge) = bridge {
                // Only re-enter once.
                *self.bridge.lock().unwrap() = None;
                bridge.on_event(HostEvent::new("nested"));
            }
        }
    }

    let context = context_with(Arc::new(DirectExecutor));
    let sink = Arc::new(ReentrantSink {
        bridge: Mutex::new(None),
        processed: AtomicUsize::new(0),
    });
    let bridge = Arc::new(EventBridge::new(
        context,
        Arc::clone(&sink) as Arc<dyn EventSink>,
    ));
    *sink.bridge.lock().unwrap() = Some(Arc::clone(&bridge));

    bridge.on_event(HostEvent::new("click"));

    // The nested event was submitted but not processed.
    assert_eq!(sink.processed.load(Ordering::SeqCst), 1);

    // The guard is released afterwards; new events process normally.
    bridge.on_event(HostEvent::new("second"));
    assert_eq!(sink.processed.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dispatches_through_a_spawning_executor() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    struct ChannelSink {
        tx: tokio::sync::mpsc::UnboundedSender<String>,
    }

    impl EventSink for ChannelSink {
        fn process(&self, event: HostEvent) {
            let _ = self.tx.send(event.name);
        }
    }

    let context = context_with(Arc::new(SpawnExecutor::current()));
    let bridge = EventBridge::new(context, Arc::new(ChannelSink { tx }));

    bridge.on_event(HostEvent::new("click"));

    let name = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
        .await
        .expect("event task should run")
        .expect("channel open");
    assert_eq!(name, "click");
}

#[test]
fn parses_host_delivered_event_payload() {
    let context = context_with(Arc::new(DirectExecutor));
    let sink = Arc::new(CollectingSink::default());
    let bridge = EventBridge::new(context, Arc::clone(&sink) as Arc<dyn EventSink>);

    let payload = r#"{
        "name": "change",
        "target": { "attributes": { "data-element-id": "email-field" } }
    }"#;
    let event: HostEvent = serde_json::from_str(payload).unwrap();
    bridge.on_event(event);

    let received = sink.events.lock().unwrap();
    assert_eq!(
        events::event_target_id(&received[0]).as_deref(),
        Some("email-field")
    );
}
