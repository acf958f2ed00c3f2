//! Run-once release action shared by subscriptions and wake locks.

use std::fmt;

/// Holds the action that gives a scoped resource back. The action runs on the
/// first explicit [`ReleaseGuard::release`] or, failing that, on drop, and
/// never more than once.
pub struct ReleaseGuard {
    action: Option<Box<dyn FnOnce() + Send>>,
}

impl ReleaseGuard {
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            action: Some(Box::new(action)),
        }
    }

    /// Runs the release action. Returns `false` if it already ran.
    pub fn release(&mut self) -> bool {
        match self.action.take() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.action.is_none()
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ReleaseGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseGuard")
            .field("released", &self.is_released())
            .finish()
    }
}
