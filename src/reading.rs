//! Dashboard shell state
//!
//! Holds the latest reading and the error state, and derives every display
//! string from them. Shared by the TUI and headless modes.

use crate::consts::cli_consts::{HEADING_WIDTH, NOT_AVAILABLE, SPEED_WIDTH};
use crate::location::{LocationUpdate, Position};
use crate::readout::{
    display_kmh, format_epoch_millis, format_fixed, pad_with_zeroes, split_timestamp, whole_degrees,
};

/// Snapshot of the position fields. Replaced as a whole on every update and
/// cleared entirely on error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub timestamp: Option<String>,
}

/// One-time altitude offset taken from the first negative altitude seen.
///
/// The baseline is never reset, even if the receiver later settles on a
/// different offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AltitudeCalibration {
    baseline: Option<f64>,
}

impl AltitudeCalibration {
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Calibrates a raw altitude, capturing the baseline if this is the first
    /// negative value. The capturing reading is itself calibrated.
    pub fn calibrate(&mut self, altitude: Option<f64>) -> Option<f64> {
        let altitude = altitude?;
        if self.baseline.is_none() && altitude < 0.0 {
            self.baseline = Some(-altitude);
        }
        Some(altitude + self.baseline.unwrap_or(0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShellState {
    reading: Reading,
    error: Option<String>,
    calibration: Option<AltitudeCalibration>,
}

impl ShellState {
    pub fn new(calibrate_altitude: bool) -> Self {
        Self {
            reading: Reading::default(),
            error: None,
            calibration: calibrate_altitude.then(AltitudeCalibration::default),
        }
    }

    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn calibration(&self) -> Option<&AltitudeCalibration> {
        self.calibration.as_ref()
    }

    pub fn apply(&mut self, update: LocationUpdate) {
        match update {
            LocationUpdate::Position(position) => self.on_position(position),
            LocationUpdate::Error(message) => self.on_error(message),
        }
    }

    pub fn on_position(&mut self, position: Position) {
        let altitude = match self.calibration.as_mut() {
            Some(calibration) => calibration.calibrate(position.altitude),
            None => position.altitude,
        };
        self.reading = Reading {
            latitude: Some(position.latitude),
            longitude: Some(position.longitude),
            accuracy: position.accuracy,
            altitude,
            speed: position.speed,
            heading: position.heading.map(|h| h.rem_euclid(360.0)),
            timestamp: format_epoch_millis(position.timestamp),
        };
        self.error = None;
    }

    pub fn on_error(&mut self, message: String) {
        self.error = Some(message);
        self.reading = Reading::default();
    }

    /// Display strings for the current reading.
    pub fn display(&self) -> DisplayValues {
        DisplayValues::from(&self.reading)
    }
}

/// Everything the readouts show, derived per render and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValues {
    pub speed_kmh: String,
    pub heading: String,
    pub latitude: String,
    pub longitude: String,
    pub accuracy: String,
    pub altitude: String,
    pub date: String,
    pub time: String,
}

impl From<&Reading> for DisplayValues {
    fn from(reading: &Reading) -> Self {
        let speed = format_fixed(reading.speed.map(display_kmh), 0);
        let heading = format_fixed(reading.heading.map(whole_degrees), 0);
        let (date, time) = match reading.timestamp.as_deref() {
            Some(timestamp) => split_timestamp(timestamp),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };

        Self {
            speed_kmh: pad_with_zeroes(speed, SPEED_WIDTH),
            heading: pad_with_zeroes(heading, HEADING_WIDTH),
            latitude: format_fixed(reading.latitude, 6),
            longitude: format_fixed(reading.longitude, 6),
            accuracy: format_fixed(reading.accuracy, 1),
            altitude: format_fixed(reading.altitude, 1),
            date,
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(altitude: Option<f64>, speed: Option<f64>) -> Position {
        Position {
            latitude: 52.520008,
            longitude: 13.404954,
            accuracy: Some(4.26),
            altitude,
            speed,
            heading: Some(45.0),
            timestamp: 1_714_564_800_000,
        }
    }

    #[test]
    fn position_replaces_reading_and_clears_error() {
        let mut shell = ShellState::new(false);
        shell.on_error("timeout".to_string());
        shell.apply(LocationUpdate::Position(position(Some(12.0), Some(10.0))));

        assert_eq!(shell.error(), None);
        let reading = shell.reading();
        assert_eq!(reading.latitude, Some(52.520008));
        assert_eq!(reading.altitude, Some(12.0));
        assert_eq!(reading.speed, Some(10.0));
        assert!(reading.timestamp.as_deref().unwrap().contains(", "));
    }

    #[test]
    fn error_nulls_the_whole_reading() {
        let mut shell = ShellState::new(false);
        shell.apply(LocationUpdate::Position(position(Some(12.0), Some(10.0))));
        shell.apply(LocationUpdate::Error("User denied Geolocation".to_string()));

        assert_eq!(shell.error(), Some("User denied Geolocation"));
        assert_eq!(shell.reading(), &Reading::default());
    }

    #[test]
    fn altitude_baseline_comes_from_first_negative_reading() {
        let mut shell = ShellState::new(true);
        shell.on_position(position(Some(3.0), None));
        assert_eq!(shell.reading().altitude, Some(3.0));
        assert_eq!(shell.calibration().unwrap().baseline(), None);

        shell.on_position(position(Some(-50.0), None));
        assert_eq!(shell.calibration().unwrap().baseline(), Some(50.0));
        assert_eq!(shell.reading().altitude, Some(0.0));

        shell.on_position(position(Some(-10.0), None));
        assert_eq!(shell.reading().altitude, Some(40.0));

        // Never re-captured
        shell.on_position(position(Some(-80.0), None));
        assert_eq!(shell.calibration().unwrap().baseline(), Some(50.0));
        assert_eq!(shell.reading().altitude, Some(-30.0));
    }

    #[test]
    fn calibration_passes_missing_altitude_through() {
        let mut calibration = AltitudeCalibration::default();
        assert_eq!(calibration.calibrate(None), None);
        assert_eq!(calibration.calibrate(Some(-50.0)), Some(0.0));
        assert_eq!(calibration.calibrate(None), None);
        assert_eq!(calibration.calibrate(Some(-10.0)), Some(40.0));
    }

    #[test]
    fn uncalibrated_shell_copies_altitude_verbatim() {
        let mut shell = ShellState::new(false);
        shell.on_position(position(Some(-50.0), None));
        assert_eq!(shell.reading().altitude, Some(-50.0));
        assert!(shell.calibration().is_none());
    }

    #[test]
    fn display_values_for_a_reading() {
        let reading = Reading {
            latitude: Some(52.520008),
            longitude: Some(13.404954),
            accuracy: Some(4.26),
            altitude: Some(38.14),
            speed: Some(10.0),
            heading: Some(7.4),
            timestamp: Some("5/1/2024, 2:00:09 PM".to_string()),
        };
        let display = DisplayValues::from(&reading);
        assert_eq!(display.speed_kmh, "036");
        assert_eq!(display.heading, "007");
        assert_eq!(display.latitude, "52.520008");
        assert_eq!(display.longitude, "13.404954");
        assert_eq!(display.accuracy, "4.3");
        assert_eq!(display.altitude, "38.1");
        assert_eq!(display.date, "5/1/2024");
        assert_eq!(display.time, "2:00:09 PM");
    }

    #[test]
    fn display_values_when_empty() {
        let display = ShellState::new(false).display();
        assert_eq!(display.speed_kmh, "N/A");
        assert_eq!(display.heading, "N/A");
        assert_eq!(display.latitude, "N/A");
        assert_eq!(display.date, "N/A");
        assert_eq!(display.time, "N/A");
    }

    #[test]
    fn rounding_never_leaves_the_readout_range() {
        let reading = Reading {
            speed: Some(-0.2),
            heading: Some(359.7),
            ..Reading::default()
        };
        let display = DisplayValues::from(&reading);
        assert_eq!(display.speed_kmh, "000");
        assert_eq!(display.heading, "000");
    }

    #[test]
    fn heading_wraps_when_accepted() {
        let mut shell = ShellState::new(false);
        let mut fix = position(None, Some(1.0));
        fix.heading = Some(-90.0);
        shell.on_position(fix.clone());
        assert_eq!(shell.reading().heading, Some(270.0));
        assert_eq!(shell.display().heading, "270");

        fix.heading = Some(720.0);
        shell.on_position(fix);
        assert_eq!(shell.reading().heading, Some(0.0));
        assert_eq!(shell.display().heading, "000");
    }

    #[test]
    fn fast_speeds_are_not_truncated() {
        let reading = Reading {
            speed: Some(300.0),
            ..Reading::default()
        };
        assert_eq!(DisplayValues::from(&reading).speed_kmh, "1080");
    }
}
