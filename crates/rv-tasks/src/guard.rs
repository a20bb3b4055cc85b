//! Thread-affinity checks for UI-thread-only state.

use std::thread::{self, ThreadId};

/// Identity of the designated thread, captured once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadGuard {
    owner: ThreadId,
}

impl ThreadGuard {
    /// Bind a guard to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    pub fn is_current(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Abort the caller unless it runs on the bound thread.
    #[track_caller]
    pub fn check(&self) {
        if !self.is_current() {
            let current = thread::current();
            panic!(
                "UI thread violation: bound to {:?}, called from {:?} ({})",
                self.owner,
                current.id(),
                current.name().unwrap_or("<unnamed>"),
            );
        }
    }
}

/// Assert that the current thread is the one `guard` is bound to.
#[macro_export]
macro_rules! require_ui_thread {
    ($guard:expr) => {
        $crate::ThreadGuard::check(&$guard)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_thread_passes() {
        let guard = ThreadGuard::current();
        assert!(guard.is_current());
        require_ui_thread!(guard);
    }

    #[test]
    fn test_other_thread_panics() {
        let guard = ThreadGuard::current();
        let result = thread::spawn(move || {
            assert!(!guard.is_current());
            guard.check();
        })
        .join();
        assert!(result.is_err());
    }
}
