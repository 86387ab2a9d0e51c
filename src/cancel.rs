//! Cooperative cancellation.
//!
//! The router and translator call [`TaskMonitor::check_cancelled`] before
//! each edge and bail out with `LayoutError::Cancelled`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{LayoutError, Result};

pub trait TaskMonitor {
    fn is_cancelled(&self) -> bool;

    fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(LayoutError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Monitor for callers that never cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl TaskMonitor for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Shared flag; clones observe the same state, so another thread may cancel.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl TaskMonitor for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancels after `n` checks. Handy for exercising abort paths.
#[derive(Debug, Default)]
pub struct CancelAfter {
    remaining: std::cell::Cell<usize>,
}

impl CancelAfter {
    pub fn new(n: usize) -> Self {
        Self {
            remaining: std::cell::Cell::new(n),
        }
    }
}

impl TaskMonitor for CancelAfter {
    fn is_cancelled(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return true;
        }
        self.remaining.set(left - 1);
        false
    }
}
