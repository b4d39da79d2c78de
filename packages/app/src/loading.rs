//! Scoped `loading` flag for the flows.
//!
//! A flow calls [`LoadingFlag::start`] on entry and keeps the returned guard alive
//! for the duration of its network work. Dropping the guard clears the flag, so it
//! is reset on success, on error, and when the future is dropped mid-await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the guard is dropped.
    #[must_use = "the flag drops back to false as soon as the guard is dropped"]
    pub fn start(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.0.clone())
    }
}

#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_scopes_flag() {
        let flag = LoadingFlag::new();
        assert!(!flag.get());
        {
            let _guard = flag.start();
            assert!(flag.get());
        }
        assert!(!flag.get());
    }

    #[test]
    fn test_reset_on_early_return() {
        fn fails(flag: &LoadingFlag) -> Result<(), ()> {
            let _guard = flag.start();
            Err(())
        }
        let flag = LoadingFlag::new();
        assert!(fails(&flag).is_err());
        assert!(!flag.get());
    }
}
