//! Optional display capabilities
//!
//! Keeping the screen awake and switching the terminal to fullscreen are
//! nice-to-haves. Both report a missing capability as
//! [`CapabilityError::Unsupported`] instead of failing the dashboard.

use thiserror::Error;

pub mod fullscreen;
pub mod wake_lock;

pub use fullscreen::{FullscreenProvider, TerminalFullscreen};
pub use wake_lock::{SystemWakeLock, WakeLock, WakeLockProvider};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// This platform or terminal cannot do it at all.
    #[error("not supported: {0}")]
    Unsupported(String),

    /// Supported, but the attempt failed.
    #[error("failed: {0}")]
    Failed(String),
}
