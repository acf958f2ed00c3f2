//! Replay source
//!
//! Plays back a JSON-lines file. Each line is either a [`Position`] object or
//! `{"error": "..."}`. Blank lines and lines starting with `#` are ignored.
//! The stream ends after the last line.

use super::{LocationSource, LocationUpdate, Position, SourceError, Subscription, WatchOptions};
use crate::consts::cli_consts::LOCATION_QUEUE_SIZE;
use futures::StreamExt;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayLine {
    Error { error: String },
    Position(Position),
}

fn parse_line(line: &str) -> Option<Result<LocationUpdate, serde_json::Error>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str::<ReplayLine>(trimmed).map(|parsed| match parsed {
        ReplayLine::Position(position) => LocationUpdate::Position(position),
        ReplayLine::Error { error } => LocationUpdate::Error(error),
    }))
}

/// Location source reading recorded fixes from a file.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    path: PathBuf,
    interval: Duration,
}

impl ReplaySource {
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
        }
    }
}

#[async_trait::async_trait]
impl LocationSource for ReplaySource {
    fn describe(&self) -> String {
        format!("replay {}", self.path.display())
    }

    /// Replayed fixes are as accurate as they were recorded, so the options
    /// are not consulted.
    async fn subscribe(&mut self, _options: WatchOptions) -> Result<Subscription, SourceError> {
        let file = File::open(&self.path).await.map_err(|e| {
            SourceError::Unavailable(format!(
                "Unable to open replay file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let lines = FramedRead::new(file, LinesCodec::new());

        let (sender, receiver) = mpsc::channel(LOCATION_QUEUE_SIZE);
        let token = CancellationToken::new();
        tokio::spawn(play(lines, sender, token.clone(), self.interval));

        Ok(Subscription::new(receiver, move || token.cancel()))
    }
}

async fn play(
    mut lines: FramedRead<File, LinesCodec>,
    sender: mpsc::Sender<LocationUpdate>,
    token: CancellationToken,
    interval: Duration,
) {
    let mut line_number = 0usize;
    let mut first = true;
    loop {
        let line = tokio::select! {
            _ = token.cancelled() => break,
            line = lines.next() => line,
        };
        line_number += 1;
        let update = match line {
            Some(Ok(line)) => match parse_line(&line) {
                Some(Ok(update)) => update,
                Some(Err(e)) => {
                    log::warn!("Skipping replay line {}: {}", line_number, e);
                    continue;
                }
                None => continue,
            },
            Some(Err(e)) => {
                let _ = sender
                    .send(LocationUpdate::Error(format!("Replay read failed: {}", e)))
                    .await;
                break;
            }
            None => break,
        };

        if !first && !interval.is_zero() {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
        first = false;

        if sender.send(update).await.is_err() {
            break;
        }
    }
    log::debug!("Replay finished after {} lines", line_number);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn replay_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn parse_line_recognizes_both_shapes() {
        let position = parse_line(
            r#"{"latitude":1.5,"longitude":2.5,"speed":10,"timestamp":1000}"#,
        );
        assert!(matches!(
            position,
            Some(Ok(LocationUpdate::Position(Position { speed: Some(s), .. }))) if s == 10.0
        ));

        let error = parse_line(r#"{"error":"User denied Geolocation"}"#);
        assert!(matches!(
            error,
            Some(Ok(LocationUpdate::Error(ref msg))) if msg == "User denied Geolocation"
        ));

        assert!(parse_line("   ").is_none());
        assert!(parse_line("# recorded on the A9").is_none());
        assert!(matches!(parse_line("{\"latitude\":1}"), Some(Err(_))));
    }

    #[tokio::test]
    async fn replays_file_in_order_then_ends() {
        let file = replay_file(concat!(
            "{\"latitude\":1.0,\"longitude\":2.0,\"timestamp\":1000}\n",
            "garbage\n",
            "\n",
            "{\"error\":\"signal lost\"}\n",
        ));
        let mut source = ReplaySource::new(file.path(), Duration::ZERO);
        let mut subscription = source.subscribe(WatchOptions::default()).await.unwrap();

        assert!(matches!(
            subscription.recv().await,
            Some(LocationUpdate::Position(_))
        ));
        assert_eq!(
            subscription.recv().await,
            Some(LocationUpdate::Error("signal lost".to_string()))
        );
        assert_eq!(subscription.recv().await, None);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let mut source = ReplaySource::new("/nonexistent/track.jsonl", Duration::ZERO);
        assert!(source.describe().contains("track.jsonl"));
        let result = source.subscribe(WatchOptions::default()).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn waits_between_lines() {
        let file = replay_file(concat!(
            "{\"latitude\":1.0,\"longitude\":2.0,\"timestamp\":1000}\n",
            "{\"latitude\":1.1,\"longitude\":2.1,\"timestamp\":2000}\n",
        ));
        let mut source = ReplaySource::new(file.path(), Duration::from_secs(3600));
        let mut subscription = source.subscribe(WatchOptions::default()).await.unwrap();
        assert!(subscription.recv().await.is_some());

        // The second line waits on the hour-long interval
        let pending = tokio::time::timeout(Duration::from_millis(50), subscription.recv()).await;
        assert!(pending.is_err());
        subscription.unsubscribe();
    }
}
