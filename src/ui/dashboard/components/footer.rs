//! Key hints along the bottom edge

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const KEY_HINTS: [(&str, &str); 2] = [("Q", "Quit"), ("F", "Fullscreen")];

fn hints_line() -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (key, action) in KEY_HINTS {
        spans.push(Span::styled(format!("[{}]", key), key_style));
        spans.push(Span::raw(format!(" {} | ", action)));
    }
    spans.push(Span::raw("Speedmeter Dashboard"));
    Line::from(spans)
}

pub fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(hints_line())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
