use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Decides whether an optimization may keep going. Checked between physics steps and at the top
/// of every outer iteration.
pub trait RunningPredicate {
    fn is_running(&self) -> bool;
}

impl<F: Fn() -> bool> RunningPredicate for F {
    fn is_running(&self) -> bool {
        self()
    }
}

/// Shared stop flag. Clones observe the same flag, so a signal handler can hold one clone while
/// the optimizer polls another.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl RunningPredicate for CancellationToken {
    fn is_running(&self) -> bool {
        !self.is_cancelled()
    }
}
