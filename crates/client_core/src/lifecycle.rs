use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared flag telling async work whether its page is still mounted.
/// Late results are dropped once the page detaches; in-flight network work
/// is not cancelled.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn detach(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
