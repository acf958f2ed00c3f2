//! Two stacked lines of text, e.g. latitude over longitude.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};

#[derive(Debug, Clone)]
pub struct DoubleDisplay<'a> {
    top: String,
    bottom: String,
    block: Option<Block<'a>>,
}

impl<'a> DoubleDisplay<'a> {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for DoubleDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let [_, centered, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let lines = vec![
            Line::styled(
                self.top,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(self.bottom, Style::default().fg(Color::Gray)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(centered, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_lines_in_order() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 16, 4));
        DoubleDisplay::new("52.520008", "13.404954").render(buf.area, &mut buf);
        let text: Vec<String> = (0..4u16)
            .map(|y| (0..16u16).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect();
        assert_eq!(text[1].trim(), "52.520008");
        assert_eq!(text[2].trim(), "13.404954");
    }
}
