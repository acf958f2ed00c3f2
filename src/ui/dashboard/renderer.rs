//! Dashboard main renderer

use super::components::{compass, error_box, footer, header, logs, readouts};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

/// Where each part of the dashboard goes. Shared by the renderer and the
/// mouse handler so a click lands on what was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub title: Rect,
    pub status: Option<Rect>,
    pub content: Rect,
    pub diagnostics: Option<Rect>,
    pub footer: Option<Rect>,
}

/// Split `area` for the current presentation. Fullscreen keeps only the
/// title and the readouts.
pub fn dashboard_layout(area: Rect, state: &DashboardState) -> DashboardLayout {
    if state.fullscreen {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Fill(1)])
            .split(area);
        return DashboardLayout {
            title: chunks[0],
            status: None,
            content: chunks[1],
            diagnostics: None,
            footer: None,
        };
    }

    let mut constraints = vec![
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Fill(1),
    ];
    if state.show_diagnostics {
        constraints.push(Constraint::Percentage(25));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    DashboardLayout {
        title: chunks[0],
        status: Some(chunks[1]),
        content: chunks[2],
        diagnostics: state.show_diagnostics.then(|| chunks[3]),
        footer: chunks.last().copied(),
    }
}

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let layout = dashboard_layout(f.area(), state);

    header::render_title(f, layout.title);
    if let Some(area) = layout.status {
        header::render_status(f, area, state);
    }

    // An error replaces every readout
    match state.shell.error() {
        Some(message) => error_box::render_error_box(f, layout.content, message),
        None => render_readouts(f, layout.content, state),
    }

    if let Some(area) = layout.diagnostics {
        logs::render_logs_panel(f, area, state);
    }
    if let Some(area) = layout.footer {
        footer::render_footer(f, area);
    }
}

fn render_readouts(f: &mut Frame, area: Rect, state: &DashboardState) {
    let display = state.shell.display();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(5)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    readouts::render_speed(f, top[0], &display);
    compass::render_compass(f, top[1], state);
    readouts::render_details(f, rows[1], &display);
}
