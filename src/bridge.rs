use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::context::RuntimeContext;
use crate::events::HostEvent;

/// Application-side processing for events crossing the bridge.
pub trait EventSink: Send + Sync {
    fn process(&self, event: HostEvent);
}

/// Intercepts host-native UI events and submits them as tasks on the
/// executor installed at bootstrap.
pub struct EventBridge {
    context: Arc<RuntimeContext>,
    sink: Arc<dyn EventSink>,
    processing: Arc<AtomicBool>,
}

// Clears the processing flag when the task unwinds, so a panicking sink
// cannot wedge the bridge shut.
struct ProcessingGuard(Arc<AtomicBool>);

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl EventBridge {
    /// A bridge is built from a completed bootstrap context, so events cannot
    /// be wired before the executor is installed.
    pub fn new(context: Arc<RuntimeContext>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            context,
            sink,
            processing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Host event hook: wrap the event in a task and hand it to the
    /// configured executor. Fire-and-submit; nothing here blocks.
    ///
    /// The task is single-flight per bridge: if another event from this
    /// bridge is still being processed when the task runs, the event is
    /// dropped rather than processed re-entrantly.
    pub fn on_event(&self, event: HostEvent) {
        let dispatch_id = Uuid::new_v4();
        let executor = self.context.executor();
        let sink = Arc::clone(&self.sink);
        let processing = Arc::clone(&self.processing);

        debug!(target = "gantry", %dispatch_id, event = %event.name, "submitting event task");
        executor.execute(Box::new(move || {
            if processing
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                debug!(target = "gantry", %dispatch_id, "dropping event, another event is still processing");
                return;
            }
            let _guard = ProcessingGuard(processing);
            sink.process(event);
        }));
    }
}
