//! Screen wake lock
//!
//! Holds an idle/sleep inhibitor child process for as long as the lock
//! lives: `systemd-inhibit` on Linux, `caffeinate` on macOS. Killing the
//! child releases the lock.

use super::CapabilityError;
use crate::release::ReleaseGuard;
use cfg_if::cfg_if;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::oneshot;

#[cfg(test)]
use mockall::automock;

/// A held wake lock. Released explicitly, or on drop.
#[derive(Debug)]
pub struct WakeLock {
    guard: ReleaseGuard,
    released: Option<oneshot::Receiver<()>>,
}

impl WakeLock {
    /// `on_release` gives the lock back; `released` fires once the lock is
    /// gone, whether through `release` or from outside.
    pub fn new(on_release: impl FnOnce() + Send + 'static, released: oneshot::Receiver<()>) -> Self {
        Self {
            guard: ReleaseGuard::new(on_release),
            released: Some(released),
        }
    }

    /// Takes the release notification. Returns `None` after the first call.
    pub fn take_release_notification(&mut self) -> Option<oneshot::Receiver<()>> {
        self.released.take()
    }

    pub fn release(mut self) {
        self.guard.release();
    }
}

#[cfg_attr(test, automock)]
pub trait WakeLockProvider: Send {
    /// Requests a screen wake lock.
    fn acquire(&mut self) -> Result<WakeLock, CapabilityError>;
}

/// Program and arguments of the platform's inhibitor, if it has one.
fn inhibitor_command() -> Option<(&'static str, &'static [&'static str])> {
    cfg_if! {
        if #[cfg(target_os = "linux")] {
            Some((
                "systemd-inhibit",
                &[
                    "--what=idle:sleep",
                    "--who=speedmeter",
                    "--why=Speedometer dashboard is active",
                    "--mode=block",
                    "sleep",
                    "infinity",
                ],
            ))
        } else if #[cfg(target_os = "macos")] {
            Some(("caffeinate", &["-d", "-i"]))
        } else {
            None
        }
    }
}

/// Wake lock backed by the operating system's inhibitor tool.
#[derive(Debug, Default)]
pub struct SystemWakeLock;

impl SystemWakeLock {
    pub fn new() -> Self {
        Self
    }
}

impl WakeLockProvider for SystemWakeLock {
    fn acquire(&mut self) -> Result<WakeLock, CapabilityError> {
        let Some((program, args)) = inhibitor_command() else {
            return Err(CapabilityError::Unsupported(
                "no idle inhibitor on this platform".to_string(),
            ));
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    CapabilityError::Unsupported(format!("{} is not installed", program))
                }
                _ => CapabilityError::Failed(format!("{}: {}", program, e)),
            })?;

        let (release_tx, release_rx) = oneshot::channel::<()>();
        let (released_tx, released_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let requested = tokio::select! {
                // Fires on release and when the lock is dropped without it
                _ = release_rx => true,
                status = child.wait() => {
                    log::debug!("Inhibitor exited on its own: {:?}", status);
                    false
                }
            };
            if requested {
                if let Err(e) = child.kill().await {
                    log::debug!("Inhibitor already gone: {}", e);
                }
            }
            let _ = released_tx.send(());
        });

        Ok(WakeLock::new(
            move || {
                let _ = release_tx.send(());
            },
            released_rx,
        ))
    }
}
