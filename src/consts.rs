pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Constants shared by the location sources, the session and the UI,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of diagnostic events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the diagnostic event channel.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer size of a location subscription. A slow UI drops nothing; the
    /// source task waits instead.
    pub const LOCATION_QUEUE_SIZE: usize = 32;

    // =============================================================================
    // LOCATION SOURCES
    // =============================================================================

    /// gpsd connection configuration
    pub mod gpsd {
        /// Address gpsd listens on out of the box.
        pub const DEFAULT_ADDRESS: &str = "127.0.0.1:2947";

        /// Enables streaming of JSON reports for every attached device.
        pub const WATCH_COMMAND: &str = r#"?WATCH={"enable":true,"json":true};"#;

        /// Upper bound on a single JSON report line. SKY reports with many
        /// satellites are the largest gpsd emits.
        pub const MAX_LINE_LENGTH: usize = 64 * 1024;
    }

    /// Replay file configuration
    pub mod replay {
        /// Default pause between replayed lines (milliseconds)
        pub const DEFAULT_INTERVAL_MS: u64 = 1000;
    }

    // =============================================================================
    // READOUTS
    // =============================================================================

    /// Meters per second to kilometers per hour.
    pub const MPS_TO_KMH: f64 = 3.6;

    /// Placeholder shown for any missing value.
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Digits of the speed readout (`007` km/h).
    pub const SPEED_WIDTH: usize = 3;

    /// Digits of the heading readout (`045`°).
    pub const HEADING_WIDTH: usize = 3;

    // =============================================================================
    // UI TIMING
    // =============================================================================

    /// How long the splash screen stays up unless a key is pressed.
    pub const SPLASH_SECS: u64 = 2;

    /// Key/mouse poll timeout, which is also the redraw cadence.
    pub const UI_POLL_MS: u64 = 100;

    /// Fraction of the remaining needle rotation covered per UI tick.
    pub const NEEDLE_EASING: f64 = 0.35;

    /// Remaining rotation (degrees) below which the needle snaps into place.
    pub const NEEDLE_SNAP_DEGREES: f64 = 0.5;
}
