use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag telling background work whether its widget is still mounted.
///
/// Every task that may outlive its widget captures a clone and checks it
/// before publishing a result.
#[derive(Debug, Clone)]
pub struct Liveness {
    torn_down: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.torn_down.load(Ordering::Acquire)
    }

    /// Returns `true` only for the call that actually tore the widget down.
    pub fn teardown(&self) -> bool {
        !self.torn_down.swap(true, Ordering::AcqRel)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
