//! gpsd client
//!
//! Speaks the gpsd JSON protocol over TCP: one `?WATCH` command, then one
//! JSON report per line. Only `TPV` (time-position-velocity) and `ERROR`
//! reports matter here; everything else is skipped.

use super::{LocationSource, LocationUpdate, Position, SourceError, Subscription, WatchOptions};
use crate::consts::cli_consts::LOCATION_QUEUE_SIZE;
use crate::consts::cli_consts::gpsd::{MAX_LINE_LENGTH, WATCH_COMMAND};
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{Framed, LinesCodec};
use tokio_util::sync::CancellationToken;

/// gpsd fix modes
const MODE_2D: u8 = 2;
const MODE_3D: u8 = 3;

#[derive(Debug, Deserialize)]
#[serde(tag = "class")]
enum Report {
    #[serde(rename = "TPV")]
    Tpv(Tpv),
    #[serde(rename = "ERROR")]
    Error { message: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct Tpv {
    #[serde(default)]
    mode: u8,
    time: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    /// Altitude above the ellipsoid (gpsd >= 3.20)
    #[serde(rename = "altHAE")]
    alt_hae: Option<f64>,
    /// Altitude as reported by older gpsd releases
    alt: Option<f64>,
    /// Estimated horizontal position error, meters
    eph: Option<f64>,
    epx: Option<f64>,
    epy: Option<f64>,
    /// Ground speed, m/s
    speed: Option<f64>,
    /// Course over ground, degrees from true north
    track: Option<f64>,
}

impl Tpv {
    /// Converts a report into a position. Reports without a usable fix, or a
    /// 2D fix when high accuracy was requested, yield `None`.
    fn into_position(self, options: WatchOptions) -> Option<Position> {
        let min_mode = if options.high_accuracy {
            MODE_3D
        } else {
            MODE_2D
        };
        if self.mode < min_mode {
            return None;
        }

        let accuracy = self.eph.or(match (self.epx, self.epy) {
            (Some(x), Some(y)) => Some(x.max(y)),
            (x, y) => x.or(y),
        });
        let timestamp = self
            .time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.timestamp_millis())
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        Some(Position {
            latitude: self.lat?,
            longitude: self.lon?,
            accuracy,
            altitude: self.alt_hae.or(self.alt),
            speed: self.speed,
            heading: self.track,
            timestamp,
        })
    }
}

/// Maps one protocol line to an update, if it carries one.
fn parse_report(line: &str, options: WatchOptions) -> Option<LocationUpdate> {
    match serde_json::from_str::<Report>(line) {
        Ok(Report::Tpv(tpv)) => tpv.into_position(options).map(LocationUpdate::Position),
        Ok(Report::Error { message }) => Some(LocationUpdate::Error(format!("gpsd: {}", message))),
        Ok(Report::Other) => None,
        Err(e) => {
            log::debug!("Skipping unparseable gpsd line: {}", e);
            None
        }
    }
}

/// Location source backed by a gpsd daemon.
#[derive(Debug, Clone)]
pub struct GpsdSource {
    address: String,
}

impl GpsdSource {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait::async_trait]
impl LocationSource for GpsdSource {
    fn describe(&self) -> String {
        format!("gpsd {}", self.address)
    }

    async fn subscribe(&mut self, options: WatchOptions) -> Result<Subscription, SourceError> {
        let stream = TcpStream::connect(&self.address).await.map_err(|e| {
            SourceError::Unavailable(format!("Unable to reach gpsd at {}: {}", self.address, e))
        })?;
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        framed.send(WATCH_COMMAND).await.map_err(|e| {
            SourceError::Unavailable(format!("gpsd rejected the watch request: {}", e))
        })?;
        log::info!("Watching gpsd at {}", self.address);

        let (sender, receiver) = mpsc::channel(LOCATION_QUEUE_SIZE);
        let token = CancellationToken::new();
        tokio::spawn(pump_reports(framed, sender, token.clone(), options));

        Ok(Subscription::new(receiver, move || token.cancel()))
    }
}

async fn pump_reports(
    mut framed: Framed<TcpStream, LinesCodec>,
    sender: mpsc::Sender<LocationUpdate>,
    token: CancellationToken,
    options: WatchOptions,
) {
    loop {
        let line = tokio::select! {
            _ = token.cancelled() => break,
            line = framed.next() => line,
        };
        let update = match line {
            Some(Ok(line)) => match parse_report(&line, options) {
                Some(update) => update,
                None => continue,
            },
            Some(Err(e)) => {
                let _ = sender
                    .send(LocationUpdate::Error(format!("gpsd stream failed: {}", e)))
                    .await;
                break;
            }
            None => {
                let _ = sender
                    .send(LocationUpdate::Error(
                        "gpsd closed the connection".to_string(),
                    ))
                    .await;
                break;
            }
        };
        if sender.send(update).await.is_err() {
            break;
        }
    }
    log::debug!("gpsd watch stopped");
}
