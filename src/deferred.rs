use std::sync::{Arc, Mutex};

use tracing::{debug, error};

/// Reports whether an external debugging/inspection session is attached.
pub trait DebugProbe: Send + Sync {
    fn is_remote_debugging(&self) -> bool;
}

/// Alert-style user-visible notification surface provided by the host.
pub trait HostNotifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Default notifier that routes alerts into the log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl HostNotifier for TracingNotifier {
    fn alert(&self, message: &str) {
        error!(target = "gantry", "{message}");
    }
}

/// Notice shown when a launch trigger arrives with nothing to run.
pub const NO_PENDING_ACTIVITY_NOTICE: &str =
    "Cannot find any activity to execute, please register a page alias for your activity class.";

type LaunchTask = Box<dyn FnOnce() + Send>;

/// Holds the "run the application" action while a remote-debugging session is
/// attached, and releases it when the session asks for it.
///
/// The pending slot is a single-slot mailbox: storing a new task overwrites
/// the previous one, and a trigger consumes the slot. Immediate runs never
/// touch the slot.
pub struct DeferredRunner {
    debug_probe: Arc<dyn DebugProbe>,
    notifier: Arc<dyn HostNotifier>,
    pending: Mutex<Option<LaunchTask>>,
}

impl DeferredRunner {
    pub fn new(debug_probe: Arc<dyn DebugProbe>, notifier: Arc<dyn HostNotifier>) -> Self {
        Self {
            debug_probe,
            notifier,
            pending: Mutex::new(None),
        }
    }

    /// Run `task` now, or park it until [`run_pending`](Self::run_pending)
    /// when a remote-debugging session is attached. A parked task replaces
    /// any earlier one.
    pub fn run_application(&self, task: impl FnOnce() + Send + 'static) {
        if self.debug_probe.is_remote_debugging() {
            debug!(target = "gantry", "remote debugging active, deferring application start");
            *self.pending.lock().unwrap() = Some(Box::new(task));
        } else {
            task();
        }
    }

    /// External trigger: consume and run the parked task. The slot is taken
    /// under the lock, so two concurrent triggers cannot both run the same
    /// task. With nothing parked the user is told to register a page alias.
    pub fn run_pending(&self) {
        let task = self.pending.lock().unwrap().take();
        match task {
            Some(task) => task(),
            None => self.notifier.alert(NO_PENDING_ACTIVITY_NOTICE),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }
}
