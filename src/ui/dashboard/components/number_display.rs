//! Numeric readout widget
//!
//! A value with an optional unit and optional zero-padding. Drawn in the
//! block glyph font when the area has room for it, otherwise as one line of
//! plain text.

use super::glyphs::{GLYPH_HEIGHT, big_width, render_big};
use crate::readout::pad_with_zeroes;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

#[derive(Debug, Clone)]
pub struct NumberDisplay<'a> {
    value: String,
    unit: Option<&'a str>,
    style: Style,
    block: Option<Block<'a>>,
}

impl<'a> NumberDisplay<'a> {
    pub fn new(value: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            unit: None,
            style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            block: None,
        }
    }

    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Left-pads the value with `0` to `length` characters. Longer values
    /// are kept whole.
    pub fn fixed_length(mut self, length: usize) -> Self {
        self.value = pad_with_zeroes(&self.value, length);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn unit_span(&self) -> Option<Span<'a>> {
        self.unit
            .map(|unit| Span::styled(unit, Style::default().fg(Color::Gray)))
    }
}

impl Widget for NumberDisplay<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let unit_rows = u16::from(self.unit.is_some());
        let big = render_big(&self.value).filter(|rows| {
            inner.height >= GLYPH_HEIGHT + unit_rows && usize::from(inner.width) >= big_width(rows)
        });

        let mut lines: Vec<Line> = match big {
            Some(rows) => {
                let mut lines: Vec<Line> = rows
                    .into_iter()
                    .map(|row| Line::from(Span::styled(row, self.style)))
                    .collect();
                if let Some(unit) = self.unit_span() {
                    lines.push(Line::from(unit));
                }
                lines
            }
            None => {
                let mut spans = vec![Span::styled(self.value.clone(), self.style)];
                if let Some(unit) = self.unit_span() {
                    spans.push(Span::raw(" "));
                    spans.push(unit);
                }
                vec![Line::from(spans)]
            }
        };
        lines.truncate(usize::from(inner.height));

        // Vertically center
        let [_, centered, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(lines.len() as u16),
            Constraint::Fill(1),
        ])
        .areas(inner);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(centered, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn pads_and_appends_the_unit() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        NumberDisplay::new(5)
            .fixed_length(3)
            .unit("km/h")
            .render(buf.area, &mut buf);
        assert_eq!(rows(&buf)[0].trim(), "005 km/h");
    }

    #[test]
    fn long_values_are_not_truncated_by_padding() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        NumberDisplay::new(1234).fixed_length(3).render(buf.area, &mut buf);
        assert_eq!(rows(&buf)[0].trim(), "1234");
    }

    #[test]
    fn uses_big_digits_when_there_is_room() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 6));
        NumberDisplay::new("36")
            .fixed_length(3)
            .unit("km/h")
            .render(buf.area, &mut buf);
        let rows = rows(&buf);
        assert_eq!(rows[0].trim(), "███ ███ ███");
        assert_eq!(rows[5].trim(), "km/h");
    }

    #[test]
    fn placeholder_keeps_its_text() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        NumberDisplay::new("N/A")
            .fixed_length(3)
            .unit("m")
            .render(buf.area, &mut buf);
        assert_eq!(rows(&buf)[0].trim(), "N/A m");
    }
}
