//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::readout::compass_point;
use crate::reading::ShellState;
use std::error::Error;
use tokio::sync::broadcast;

/// One console line for the current shell state.
pub fn format_status_line(shell: &ShellState) -> String {
    if let Some(error) = shell.error() {
        return format!("ERROR {}", error);
    }
    let display = shell.display();
    let direction = shell.reading().heading.map(compass_point).unwrap_or("-");
    format!(
        "{} km/h | {}° {} | {}, {} | ±{} m | alt {} m | {} {}",
        display.speed_kmh,
        display.heading,
        direction,
        display.latitude,
        display.longitude,
        display.accuracy,
        display.altitude,
        display.date,
        display.time
    )
}

/// Runs the application in headless mode
///
/// Prints one status line per location update and any diagnostic events
/// until the source finishes or Ctrl+C is pressed.
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.source_label);

    let mut shell = ShellState::new(session.calibrate_altitude);

    // Trigger shutdown on Ctrl+C
    let (shutdown_sender, mut shutdown_receiver) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender.send(());
        }
    });

    if let Some(message) = session.initial_error.take() {
        shell.on_error(message);
        println!("{}", format_status_line(&shell));
    }

    if let Some(subscription) = session.subscription.as_mut() {
        loop {
            tokio::select! {
                update = subscription.recv() => match update {
                    Some(update) => {
                        shell.apply(update);
                        println!("{}", format_status_line(&shell));
                    }
                    None => {
                        session
                            .event_sender
                            .send_event(Event::source_with_level(
                                "Location stream ended".to_string(),
                                EventType::StateChange,
                                LogLevel::Info,
                            ))
                            .await;
                        break;
                    }
                },
                Some(event) = session.event_receiver.recv() => {
                    if event.should_display() {
                        println!("{}", event);
                    }
                }
                _ = shutdown_receiver.recv() => {
                    session
                        .event_sender
                        .send_event(Event::session_with_level(
                            "Interrupted".to_string(),
                            EventType::StateChange,
                            LogLevel::Info,
                        ))
                        .await;
                    break;
                }
            }
        }
    }

    // Flush diagnostics raised before the loop ended
    while let Ok(event) = session.event_receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }

    print_session_shutdown();
    session.teardown();
    print_session_exit_success();

    Ok(())
}
