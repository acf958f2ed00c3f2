//! Speed and position readouts

use super::double_display::DoubleDisplay;
use super::number_display::NumberDisplay;
use crate::consts::cli_consts::SPEED_WIDTH;
use crate::reading::DisplayValues;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Render the speed in km/h, in big digits when there is room.
pub fn render_speed(f: &mut Frame, area: Rect, display: &DisplayValues) {
    let speed = NumberDisplay::new(&display.speed_kmh)
        .fixed_length(SPEED_WIDTH)
        .unit("km/h")
        .style(Style::default().fg(Color::LightGreen))
        .block(panel("SPEED"));
    f.render_widget(speed, area);
}

/// Render coordinates, accuracy, altitude and the fix time in one row.
pub fn render_details(f: &mut Frame, area: Rect, display: &DisplayValues) {
    let [position, accuracy, altitude, time] = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(30),
    ])
    .areas(area);

    f.render_widget(
        DoubleDisplay::new(&display.latitude, &display.longitude).block(panel("POSITION")),
        position,
    );
    f.render_widget(
        NumberDisplay::new(&display.accuracy)
            .unit("m")
            .block(panel("ACCURACY")),
        accuracy,
    );
    f.render_widget(
        NumberDisplay::new(&display.altitude)
            .unit("m")
            .block(panel("ALTITUDE")),
        altitude,
    );
    f.render_widget(
        DoubleDisplay::new(&display.date, &display.time).block(panel("TIME")),
        time,
    );
}
