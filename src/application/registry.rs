use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Per-subject cancellation flag shared between a running session and
/// whoever wants to stop it.
///
/// The only external mutation is `set`; a session clears its own signal
/// once, at its own start.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    pub fn set(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Process-wide table of subject identifier -> cancellation signal.
///
/// Signals are created lazily, either by a session starting or by a stop
/// request arriving first, and are never evicted. The key space is bounded
/// by concurrently-active subjects, so growth is acceptable here.
#[derive(Default, Clone)]
pub struct SessionRegistry {
    signals: Arc<Mutex<HashMap<String, Arc<StopSignal>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live signal for a subject, creating one if absent.
    pub fn signal_for(&self, subject: &str) -> Arc<StopSignal> {
        let mut signals = self.signals.lock().expect("signal table poisoned");
        signals
            .entry(subject.to_string())
            .or_default()
            .clone()
    }

    /// Sets the subject's signal. Idempotent; safe whether or not a
    /// session is currently running for that subject.
    pub fn request_stop(&self, subject: &str) {
        self.signal_for(subject).set();
    }
}
