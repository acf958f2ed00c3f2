//! Event System
//!
//! Diagnostic events raised by the location source, the optional display
//! capabilities and the session. They never reach the readouts; the TUI keeps
//! them in an activity log shown with `--diagnostics`, headless mode prints them.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Origin {
    /// The location stream (gpsd, replay file).
    Source,
    /// The screen wake lock.
    WakeLock,
    /// The terminal fullscreen toggle.
    Fullscreen,
    /// Session lifecycle (activation, teardown).
    Session,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Unsupported,
    StateChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub origin: Origin,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(origin: Origin, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            origin,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn source_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Source, msg, event_type, log_level)
    }

    pub fn wake_lock_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::WakeLock, msg, event_type, log_level)
    }

    pub fn fullscreen_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Fullscreen, msg, event_type, log_level)
    }

    pub fn session_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Session, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Success {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.origin, self.msg
        )
    }
}

/// Cloneable handle for raising events from tasks and the UI loop.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    /// Non-blocking send for callers outside an async context. A full queue
    /// drops the event.
    pub fn try_send_event(&self, event: Event) {
        if let Err(e) = self.sender.try_send(event) {
            log::debug!("Dropped diagnostic event: {}", e);
        }
    }
}
