//! Block glyph font for the large readouts

/// Rows in every glyph.
pub const GLYPH_HEIGHT: u16 = 5;

/// Blank columns between two glyphs.
const GLYPH_GAP: &str = " ";

/// Rows of the glyph for `c`, or `None` if the font lacks it.
pub fn glyph(c: char) -> Option<[&'static str; 5]> {
    let rows = match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        '.' => [" ", " ", " ", " ", "█"],
        '-' => ["   ", "   ", "███", "   ", "   "],
        ' ' => ["  ", "  ", "  ", "  ", "  "],
        'N' => ["█  █", "██ █", "█ ██", "█  █", "█  █"],
        '/' => ["  █", "  █", " █ ", "█  ", "█  "],
        'A' => [" █ ", "█ █", "███", "█ █", "█ █"],
        _ => return None,
    };
    Some(rows)
}

/// `text` rendered as `GLYPH_HEIGHT` rows, or `None` if any character is
/// missing from the font.
pub fn render_big(text: &str) -> Option<Vec<String>> {
    let glyphs = text.chars().map(glyph).collect::<Option<Vec<_>>>()?;
    let rows = (0..GLYPH_HEIGHT as usize)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| g[row])
                .collect::<Vec<_>>()
                .join(GLYPH_GAP)
        })
        .collect();
    Some(rows)
}

/// Width in cells of `render_big(text)`.
pub fn big_width(rows: &[String]) -> usize {
    rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_line_up() {
        let rows = render_big("036").unwrap();
        assert_eq!(rows.len(), GLYPH_HEIGHT as usize);
        assert_eq!(rows[0], "███ ███ ███");
        assert_eq!(rows[4], "███ ███ ███");
        assert!(rows.iter().all(|row| row.chars().count() == 11));
    }

    #[test]
    fn placeholder_is_drawable() {
        let rows = render_big("N/A").unwrap();
        assert_eq!(big_width(&rows), 12);
    }

    #[test]
    fn unknown_characters_fall_back() {
        assert!(render_big("12°").is_none());
    }
}
