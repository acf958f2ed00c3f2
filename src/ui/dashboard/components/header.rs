//! Dashboard header component
//!
//! Renders the title and the source status line

use super::super::state::DashboardState;
use super::super::utils::{format_uptime, spinner_frame};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the title. Clicking it toggles fullscreen.
pub fn render_title(f: &mut Frame, area: Rect) {
    let title_text = format!("SPEEDMETER v{}", env!("CARGO_PKG_VERSION"));

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, area);
}

/// Render the source, fix status and uptime under the title.
pub fn render_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let (fix_text, fix_color) = if state.shell.error().is_some() {
        ("NO FIX".to_string(), Color::LightRed)
    } else if state.waiting_for_fix() {
        (
            format!("{} WAITING FOR FIX", spinner_frame(state.tick)),
            Color::LightYellow,
        )
    } else {
        ("FIX".to_string(), Color::LightGreen)
    };

    let mut spans = vec![
        Span::styled(
            fix_text,
            Style::default().fg(fix_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            state.source_label.clone(),
            Style::default().fg(Color::LightBlue),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Uptime: {}", format_uptime(state.start_time.elapsed())),
            Style::default().fg(Color::Gray),
        ),
    ];
    if let Some(baseline) = state
        .shell
        .calibration()
        .and_then(|calibration| calibration.baseline())
    {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("Altitude offset: +{:.1} m", baseline),
            Style::default().fg(Color::Gray),
        ));
    }
    let status = Line::from(spans);

    let status_paragraph = Paragraph::new(status).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status_paragraph, area);
}
