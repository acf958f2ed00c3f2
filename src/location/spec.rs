use super::{GpsdSource, LocationSource, ReplaySource};
use crate::consts::cli_consts::gpsd::DEFAULT_ADDRESS;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which location source to watch, as given on the command line or in the
/// config file: `gpsd://HOST:PORT`, a bare `HOST:PORT`, or `replay:PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A gpsd daemon reachable over TCP.
    Gpsd { address: String },
    /// A recorded JSON-lines file.
    Replay { path: PathBuf },
}

impl Default for SourceSpec {
    fn default() -> Self {
        SourceSpec::Gpsd {
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

impl SourceSpec {
    /// Builds the source this spec names.
    pub fn build(&self, replay_interval: Duration) -> Box<dyn LocationSource> {
        match self {
            SourceSpec::Gpsd { address } => Box::new(GpsdSource::new(address.clone())),
            SourceSpec::Replay { path } => Box::new(ReplaySource::new(path.clone(), replay_interval)),
        }
    }
}

impl FromStr for SourceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(path) = s.strip_prefix("replay:") {
            if path.is_empty() {
                return Err("replay source needs a file path".to_string());
            }
            return Ok(SourceSpec::Replay {
                path: PathBuf::from(path),
            });
        }

        let address = s.strip_prefix("gpsd://").unwrap_or(s);
        if address.is_empty() {
            return Ok(SourceSpec::default());
        }
        match address.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
                Ok(SourceSpec::Gpsd {
                    address: address.to_string(),
                })
            }
            _ => Err(format!(
                "invalid source '{}': expected gpsd://HOST:PORT, HOST:PORT or replay:PATH",
                s
            )),
        }
    }
}

impl Display for SourceSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSpec::Gpsd { address } => write!(f, "gpsd://{}", address),
            SourceSpec::Replay { path } => write!(f, "replay:{}", path.display()),
        }
    }
}
