//! Dashboard error component
//!
//! Replaces every readout while the location source reports an error

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the error message verbatim in a red box.
pub fn render_error_box(f: &mut Frame, area: Rect, message: &str) {
    let [_, boxed, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);

    let error_block = Block::default()
        .title("LOCATION UNAVAILABLE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red))
        .padding(Padding::horizontal(1));

    let error_paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )
        .block(error_block)
        .wrap(Wrap { trim: true });
    f.render_widget(error_paragraph, boxed);
}
