//! Heading indicator component
//!
//! A compass rose on a braille canvas. The eight labels are fixed; the needle
//! (red head, white tail) follows the eased angle of the heading indicator.

use super::super::state::DashboardState;
use super::number_display::NumberDisplay;
use crate::consts::cli_consts::HEADING_WIDTH;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, BorderType, Borders};

const LABELS: [(&str, f64); 8] = [
    ("N", 0.0),
    ("NE", 45.0),
    ("E", 90.0),
    ("SE", 135.0),
    ("S", 180.0),
    ("SW", 225.0),
    ("W", 270.0),
    ("NW", 315.0),
];

const RADIUS: f64 = 1.0;
const LABEL_RADIUS: f64 = 1.2;
const HEAD_LENGTH: f64 = 0.8;
const TAIL_LENGTH: f64 = 0.45;

/// Point at `length` along a bearing measured clockwise from north.
pub fn bearing_point(bearing: f64, length: f64) -> (f64, f64) {
    let radians = bearing.to_radians();
    (length * radians.sin(), length * radians.cos())
}

/// Canvas x/y half-extents that keep the rose round. Terminal cells are
/// roughly twice as tall as they are wide.
fn bounds(area: Rect) -> (f64, f64) {
    let y = LABEL_RADIUS + 0.2;
    let height = f64::from(area.height.max(1)) * 2.0;
    let x = y * f64::from(area.width.max(1)) / height;
    (x.max(y), y)
}

/// Render the compass with the numeric heading underneath.
pub fn render_compass(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("HEADING")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [rose_area, readout_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    let (x_bound, y_bound) = bounds(rose_area);
    let angle = state.heading.displayed();
    let target = bearing_point(state.heading.rotation(), RADIUS);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_bound, x_bound])
        .y_bounds([-y_bound, y_bound])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RADIUS,
                color: Color::DarkGray,
            });

            let (head_x, head_y) = bearing_point(angle, HEAD_LENGTH);
            let (tail_x, tail_y) = bearing_point(angle + 180.0, TAIL_LENGTH);
            ctx.draw(&CanvasLine::new(0.0, 0.0, tail_x, tail_y, Color::White));
            ctx.draw(&CanvasLine::new(0.0, 0.0, head_x, head_y, Color::Red));
            // Where the needle is settling
            ctx.draw(&Points {
                coords: &[target],
                color: Color::Yellow,
            });
            ctx.layer();

            for (label, bearing) in LABELS {
                let (x, y) = bearing_point(bearing, LABEL_RADIUS);
                let style = if label == "N" {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ctx.print(x, y, Span::styled(label, style));
            }
        });
    f.render_widget(canvas, rose_area);

    let display = state.shell.display();
    f.render_widget(
        NumberDisplay::new(display.heading)
            .fixed_length(HEADING_WIDTH)
            .unit("°"),
        readout_area,
    );
}
