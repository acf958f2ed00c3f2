//! Location sources
//!
//! A [`LocationSource`] is subscribed to once and then pushes
//! [`LocationUpdate`]s through the returned [`Subscription`] until it is
//! unsubscribed or the source runs dry.

use crate::release::ReleaseGuard;
use futures::Stream;
use serde::Deserialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

pub mod gpsd;
pub mod replay;
pub mod spec;

pub use gpsd::GpsdSource;
pub use replay::ReplaySource;
pub use spec::SourceSpec;

#[cfg(test)]
use mockall::automock;

/// One fix as delivered by a source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Meters above the WGS84 ellipsoid.
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Ground speed in meters per second.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Course over ground in degrees clockwise from true north.
    #[serde(default)]
    pub heading: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Position(Position),
    /// The source failed or refused; carries the message to show verbatim.
    Error(String),
}

/// Options passed on subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Prefer the most accurate fixes the source can provide, even if fewer
    /// of them arrive.
    pub high_accuracy: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// The source cannot be reached or does not exist.
    #[error("{0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait LocationSource: Send + Sync {
    /// Human readable name of the source, e.g. `gpsd 127.0.0.1:2947`.
    fn describe(&self) -> String;

    /// Starts the continuous update stream.
    async fn subscribe(&mut self, options: WatchOptions) -> Result<Subscription, SourceError>;
}

/// Handle to a running update stream.
///
/// Dropping the subscription unsubscribes as well, so the stream never
/// outlives its owner.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<LocationUpdate>,
    guard: ReleaseGuard,
}

impl Subscription {
    /// Wraps the receiving half of a source's channel. `on_unsubscribe` stops
    /// the producer and runs exactly once.
    pub fn new(
        receiver: mpsc::Receiver<LocationUpdate>,
        on_unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            guard: ReleaseGuard::new(on_unsubscribe),
        }
    }

    /// Next queued update without waiting.
    pub fn try_recv(&mut self) -> Result<LocationUpdate, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Waits for the next update; `None` once the source has finished.
    pub async fn recv(&mut self) -> Option<LocationUpdate> {
        self.receiver.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.guard.release();
    }
}

impl Stream for Subscription {
    type Item = LocationUpdate;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn position_deserializes_with_missing_optionals() {
        let position: Position =
            serde_json::from_str(r#"{"latitude":52.52,"longitude":13.405,"timestamp":1700000000000}"#)
                .unwrap();
        assert_eq!(position.accuracy, None);
        assert_eq!(position.speed, None);
        assert_eq!(position.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn high_accuracy_is_requested_by_default() {
        assert!(WatchOptions::default().high_accuracy);
    }

    #[tokio::test]
    async fn subscription_streams_until_sender_closes() {
        let (tx, rx) = mpsc::channel(4);
        let mut subscription = Subscription::new(rx, || {});
        tx.send(LocationUpdate::Error("no fix".to_string()))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(
            subscription.next().await,
            Some(LocationUpdate::Error("no fix".to_string()))
        );
        assert_eq!(subscription.next().await, None);
    }

    #[tokio::test]
    async fn unsubscribe_and_drop_release_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let (_tx, rx) = mpsc::channel(1);
        let subscription = Subscription::new(rx, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        subscription.unsubscribe();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
