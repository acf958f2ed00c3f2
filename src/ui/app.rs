//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::capabilities::{CapabilityError, FullscreenProvider};
use crate::consts::cli_consts::{SPLASH_SECS, UI_POLL_MS};
use crate::events::{Event as DiagnosticEvent, EventType};
use crate::logging::LogLevel;
use crate::session::SessionData;
use crate::ui::dashboard::{DashboardState, dashboard_layout, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;

/// UI configuration data grouped by concern
#[derive(Debug, Clone, Copy, Default)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub show_diagnostics: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool, show_diagnostics: bool) -> Self {
        Self {
            with_background_color,
            show_diagnostics,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen with the live readouts.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Subscription, wake lock and diagnostics channel, handed back for teardown.
    session: SessionData,

    /// Terminal window fullscreen toggle.
    fullscreen: Box<dyn FullscreenProvider>,

    ui_config: UIConfig,

    /// Set once the location stream has closed.
    stream_ended: bool,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        session: SessionData,
        fullscreen: Box<dyn FullscreenProvider>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            current_screen: Screen::Splash,
            session,
            fullscreen,
            ui_config,
            stream_ended: false,
        }
    }

    /// Gives the session back for teardown once the UI loop is over.
    pub fn into_session(self) -> SessionData {
        self.session
    }

    /// Leaves the splash screen. A failed subscription shows up as the
    /// dashboard's error state right away.
    fn open_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.session.source_label.clone(),
            self.start_time,
            self.session.calibrate_altitude,
            self.ui_config,
        );
        if let Some(message) = self.session.initial_error.take() {
            state.shell.on_error(message);
        }
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    /// Queues everything the location stream and the diagnostics channel
    /// produced since the last frame. Nothing is drained during the splash.
    fn drain_session(&mut self) {
        let Screen::Dashboard(state) = &mut self.current_screen else {
            return;
        };

        if let Some(subscription) = self.session.subscription.as_mut() {
            loop {
                match subscription.try_recv() {
                    Ok(update) => state.add_update(update),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if !self.stream_ended {
                            self.stream_ended = true;
                            self.session.event_sender.try_send_event(
                                DiagnosticEvent::source_with_level(
                                    "Location stream ended".to_string(),
                                    EventType::StateChange,
                                    LogLevel::Info,
                                ),
                            );
                        }
                        break;
                    }
                }
            }
        }

        while let Ok(event) = self.session.event_receiver.try_recv() {
            state.add_event(event);
        }
    }

    /// Switches the presentation layout and asks the terminal window to
    /// follow. The layout switches even if the terminal cannot.
    fn toggle_fullscreen(&mut self) {
        let Screen::Dashboard(state) = &mut self.current_screen else {
            return;
        };
        state.fullscreen = !state.fullscreen;

        let event = match self.fullscreen.toggle() {
            Ok(active) => DiagnosticEvent::fullscreen_with_level(
                format!("Terminal fullscreen {}", if active { "on" } else { "off" }),
                EventType::StateChange,
                LogLevel::Debug,
            ),
            Err(e) => {
                let event_type = match e {
                    CapabilityError::Unsupported(_) => EventType::Unsupported,
                    CapabilityError::Failed(_) => EventType::Error,
                };
                DiagnosticEvent::fullscreen_with_level(
                    format!("Terminal fullscreen {}", e),
                    event_type,
                    LogLevel::Warn,
                )
            }
        };
        self.session.event_sender.try_send_event(event);
    }

    /// A left click on the dashboard title toggles fullscreen.
    fn handle_click(&mut self, area: Rect, position: Position) {
        let on_title = match &self.current_screen {
            Screen::Dashboard(state) => dashboard_layout(area, state).title.contains(position),
            Screen::Splash => false,
        };
        if on_title {
            self.toggle_fullscreen();
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(SPLASH_SECS);

    // UI event loop
    loop {
        app.drain_session();

        // Update the dashboard with new readings, diagnostics and the needle animation
        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if matches!(app.current_screen, Screen::Splash) && splash_start.elapsed() >= splash_duration
        {
            app.open_dashboard();
            continue;
        }

        // Poll for key and mouse events
        if event::poll(Duration::from_millis(UI_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    // Skip events that are not KeyEventKind::Press
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }

                    // Handle exit events; raw mode delivers Ctrl+C as a key
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                        return Ok(());
                    }

                    if matches!(app.current_screen, Screen::Splash) {
                        // Any key press will skip the splash screen
                        app.open_dashboard();
                    } else if matches!(key.code, KeyCode::Char('f') | KeyCode::Char('F')) {
                        app.toggle_fullscreen();
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    app.handle_click(
                        Rect::new(0, 0, size.width, size.height),
                        Position::new(mouse.column, mouse.row),
                    );
                }
                _ => {}
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::fullscreen::MockFullscreenProvider;
    use crate::events::{EventSender, Origin};
    use crate::location::{LocationUpdate, Position as Fix, Subscription};
    use tokio::sync::mpsc;

    fn session() -> (SessionData, mpsc::Sender<LocationUpdate>) {
        let (updates_tx, updates_rx) = mpsc::channel(8);
        let (events_tx, event_receiver) = mpsc::channel(8);
        let session = SessionData {
            subscription: Some(Subscription::new(updates_rx, || {})),
            initial_error: None,
            wake_lock: None,
            event_receiver,
            event_sender: EventSender::new(events_tx),
            source_label: "test source".to_string(),
            calibrate_altitude: false,
        };
        (session, updates_tx)
    }

    fn dashboard(app: &App) -> &DashboardState {
        match &app.current_screen {
            Screen::Dashboard(state) => &**state,
            Screen::Splash => panic!("still on the splash screen"),
        }
    }

    #[test]
    fn updates_wait_for_the_dashboard() {
        let (session, updates) = session();
        let mut app = App::new(
            session,
            Box::new(MockFullscreenProvider::new()),
            UIConfig::default(),
        );
        updates
            .try_send(LocationUpdate::Position(Fix {
                latitude: 1.0,
                longitude: 2.0,
                accuracy: None,
                altitude: None,
                speed: Some(10.0),
                heading: Some(90.0),
                timestamp: 0,
            }))
            .unwrap();

        app.drain_session();
        assert!(matches!(app.current_screen, Screen::Splash));

        app.open_dashboard();
        app.drain_session();
        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        let state = dashboard(&app);
        assert_eq!(state.shell.reading().speed, Some(10.0));
        assert_eq!(state.heading.rotation(), 90.0);
    }

    #[test]
    fn closed_stream_is_reported_once() {
        let (session, updates) = session();
        let mut app = App::new(
            session,
            Box::new(MockFullscreenProvider::new()),
            UIConfig::default(),
        );
        app.open_dashboard();
        drop(updates);

        app.drain_session();
        app.drain_session();
        app.drain_session();
        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        let ended: Vec<_> = dashboard(&app)
            .activity_logs
            .iter()
            .filter(|event| event.msg == "Location stream ended")
            .collect();
        assert_eq!(ended.len(), 1);
    }

    #[test]
    fn initial_error_becomes_the_error_state() {
        let (mut session, _updates) = session();
        session.subscription = None;
        session.initial_error = Some("Unable to reach gpsd".to_string());
        let mut app = App::new(
            session,
            Box::new(MockFullscreenProvider::new()),
            UIConfig::default(),
        );
        app.open_dashboard();
        assert_eq!(dashboard(&app).shell.error(), Some("Unable to reach gpsd"));
    }

    #[test]
    fn clicking_the_title_toggles_fullscreen() {
        let (session, _updates) = session();
        let mut provider = MockFullscreenProvider::new();
        provider.expect_toggle().times(1).returning(|| Ok(true));
        let mut app = App::new(session, Box::new(provider), UIConfig::default());
        app.open_dashboard();

        let area = Rect::new(0, 0, 80, 30);
        let title = dashboard_layout(area, dashboard(&app)).title;
        let content = dashboard_layout(area, dashboard(&app)).content;

        app.handle_click(area, Position::new(content.x + 1, content.y + 1));
        assert!(!dashboard(&app).fullscreen);

        app.handle_click(area, Position::new(title.x + 1, title.y));
        assert!(dashboard(&app).fullscreen);
    }

    #[test]
    fn unsupported_fullscreen_still_switches_layout() {
        let (session, _updates) = session();
        let mut provider = MockFullscreenProvider::new();
        provider.expect_toggle().times(1).returning(|| {
            Err(CapabilityError::Unsupported(
                "output is not a terminal".to_string(),
            ))
        });
        let mut app = App::new(session, Box::new(provider), UIConfig::default());
        app.open_dashboard();

        app.toggle_fullscreen();
        app.drain_session();
        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }

        let state = dashboard(&app);
        assert!(state.fullscreen);
        let event = state.activity_logs.back().unwrap();
        assert_eq!(event.origin, Origin::Fullscreen);
        assert_eq!(event.event_type, EventType::Unsupported);
    }
}
