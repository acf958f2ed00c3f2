//! Dashboard state management
//!
//! Contains the main dashboard state struct

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event as DiagnosticEvent;
use crate::heading::HeadingIndicator;
use crate::location::LocationUpdate;
use crate::reading::ShellState;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::Instant;

/// Dashboard state: the shell, the needle and the diagnostics log.
#[derive(Debug)]
pub struct DashboardState {
    /// Description of the location source, shown under the title.
    pub source_label: String,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Current reading and error state.
    pub shell: ShellState,
    /// Compass needle, turned on every reading that carries a heading.
    pub heading: HeadingIndicator,
    /// Location updates waiting to be applied
    pub pending_updates: VecDeque<LocationUpdate>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<DiagnosticEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<DiagnosticEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Whether the diagnostics panel is shown
    pub show_diagnostics: bool,
    /// Chrome-free presentation layout
    pub fullscreen: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(
        source_label: String,
        start_time: Instant,
        calibrate_altitude: bool,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            source_label,
            start_time,
            shell: ShellState::new(calibrate_altitude),
            heading: HeadingIndicator::new(),
            pending_updates: VecDeque::new(),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            show_diagnostics: ui_config.show_diagnostics,
            fullscreen: false,
            tick: 0,
        }
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: DiagnosticEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: DiagnosticEvent) {
        self.pending_events.push_back(event);
    }

    /// Add a location update to the processing queue
    pub fn add_update(&mut self, update: LocationUpdate) {
        self.pending_updates.push_back(update);
    }
}
