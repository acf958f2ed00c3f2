//! Session setup and teardown
//!
//! Activation subscribes to the location source and optionally takes a
//! screen wake lock; teardown gives both back exactly once.

use crate::capabilities::{CapabilityError, WakeLock, WakeLockProvider};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::{Event, EventSender, EventType};
use crate::location::{LocationSource, Subscription, WatchOptions};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// What the session should do on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub watch: WatchOptions,
    pub keep_awake: bool,
    pub calibrate_altitude: bool,
}

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Running location stream; `None` if subscribing failed.
    pub subscription: Option<Subscription>,
    /// Why subscribing failed, shown as the dashboard's error state.
    pub initial_error: Option<String>,
    /// Held screen wake lock, if requested and available.
    pub wake_lock: Option<WakeLock>,
    /// Diagnostic events for the activity log
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender half for raising further diagnostics
    pub event_sender: EventSender,
    /// Description of the location source
    pub source_label: String,
    pub calibrate_altitude: bool,
}

impl SessionData {
    /// Unsubscribes and releases the wake lock. Consuming `self` makes a
    /// second teardown impossible.
    pub fn teardown(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            log::debug!("Unsubscribed from {}", self.source_label);
        }
        if let Some(wake_lock) = self.wake_lock.take() {
            wake_lock.release();
            log::debug!("Released screen wake lock");
        }
    }
}

/// Activates a dashboard session.
///
/// A source that cannot be subscribed to does not fail setup: its message
/// becomes the initial error state. Wake lock problems are only recorded as
/// diagnostic events.
pub async fn setup_session(
    source: &mut dyn LocationSource,
    wake_locks: &mut dyn WakeLockProvider,
    options: SessionOptions,
) -> SessionData {
    let (sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(sender);
    let source_label = source.describe();

    let (subscription, initial_error) = match source.subscribe(options.watch).await {
        Ok(subscription) => {
            event_sender
                .send_event(Event::source_with_level(
                    format!("Watching {}", source_label),
                    EventType::Success,
                    LogLevel::Info,
                ))
                .await;
            (Some(subscription), None)
        }
        Err(e) => {
            log::warn!("Subscribing to {} failed: {}", source_label, e);
            event_sender
                .send_event(Event::source_with_level(
                    e.to_string(),
                    EventType::Error,
                    LogLevel::Error,
                ))
                .await;
            (None, Some(e.to_string()))
        }
    };

    let wake_lock = if options.keep_awake {
        acquire_wake_lock(wake_locks, &event_sender).await
    } else {
        None
    };

    SessionData {
        subscription,
        initial_error,
        wake_lock,
        event_receiver,
        event_sender,
        source_label,
        calibrate_altitude: options.calibrate_altitude,
    }
}

async fn acquire_wake_lock(
    wake_locks: &mut dyn WakeLockProvider,
    events: &EventSender,
) -> Option<WakeLock> {
    match wake_locks.acquire() {
        Ok(mut lock) => {
            events
                .send_event(Event::wake_lock_with_level(
                    "Screen wake lock acquired".to_string(),
                    EventType::Success,
                    LogLevel::Info,
                ))
                .await;
            if let Some(released) = lock.take_release_notification() {
                let events = events.clone();
                tokio::spawn(async move {
                    if released.await.is_ok() {
                        events
                            .send_event(Event::wake_lock_with_level(
                                "Screen wake lock released".to_string(),
                                EventType::StateChange,
                                LogLevel::Info,
                            ))
                            .await;
                    }
                });
            }
            Some(lock)
        }
        Err(e) => {
            let event_type = match e {
                CapabilityError::Unsupported(_) => EventType::Unsupported,
                CapabilityError::Failed(_) => EventType::Error,
            };
            log::info!("Screen wake lock unavailable: {}", e);
            events
                .send_event(Event::wake_lock_with_level(
                    format!("Screen wake lock {}", e),
                    event_type,
                    LogLevel::Warn,
                ))
                .await;
            None
        }
    }
}
