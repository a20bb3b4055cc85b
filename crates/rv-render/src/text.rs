//! Label text layout
//!
//! Renders short labels with a built-in 3×5 pixel font. Only glyph pixels
//! are drawn; whatever is behind the text stays untouched.

use crate::{Color, View};

/// Horizontal distance between consecutive glyph origins
pub const GLYPH_ADVANCE: i32 = 4;
/// Glyph cell width in pixels
pub const GLYPH_WIDTH: i32 = 3;
/// Glyph cell height in pixels
pub const GLYPH_HEIGHT: i32 = 5;

type Glyph = [&'static str; 5];

const UNKNOWN_GLYPH: Glyph = ["###", "#.#", "#.#", "#.#", "###"];

fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        ' ' => return None,
        'A' => [".#.", "#.#", "###", "#.#", "#.#"],
        'B' => ["##.", "#.#", "##.", "#.#", "##."],
        'C' => [".##", "#..", "#..", "#..", ".##"],
        'D' => ["##.", "#.#", "#.#", "#.#", "##."],
        'E' => ["###", "#..", "##.", "#..", "###"],
        'F' => ["###", "#..", "##.", "#..", "#.."],
        'G' => [".##", "#..", "#.#", "#.#", ".##"],
        'H' => ["#.#", "#.#", "###", "#.#", "#.#"],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'J' => ["..#", "..#", "..#", "#.#", ".#."],
        'K' => ["#.#", "#.#", "##.", "#.#", "#.#"],
        'L' => ["#..", "#..", "#..", "#..", "###"],
        'M' => ["#.#", "###", "###", "#.#", "#.#"],
        'N' => ["##.", "#.#", "#.#", "#.#", "#.#"],
        'O' => [".#.", "#.#", "#.#", "#.#", ".#."],
        'P' => ["##.", "#.#", "##.", "#..", "#.."],
        'Q' => [".#.", "#.#", "#.#", "##.", ".##"],
        'R' => ["##.", "#.#", "##.", "#.#", "#.#"],
        'S' => [".##", "#..", ".#.", "..#", "##."],
        'T' => ["###", ".#.", ".#.", ".#.", ".#."],
        'U' => ["#.#", "#.#", "#.#", "#.#", "###"],
        'V' => ["#.#", "#.#", "#.#", "#.#", ".#."],
        'W' => ["#.#", "#.#", "###", "###", "#.#"],
        'X' => ["#.#", "#.#", ".#.", "#.#", "#.#"],
        'Y' => ["#.#", "#.#", ".#.", ".#.", ".#."],
        'Z' => ["###", "..#", ".#.", "#..", "###"],
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["##.", "..#", ".#.", "#..", "###"],
        '3' => ["##.", "..#", ".#.", "..#", "##."],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "##.", "..#", "##."],
        '6' => [".##", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", ".#.", ".#.", ".#."],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "##."],
        '.' => ["...", "...", "...", "...", ".#."],
        ',' => ["...", "...", "...", ".#.", "#.."],
        ':' => ["...", ".#.", "...", ".#.", "..."],
        '/' => ["..#", "..#", ".#.", "#..", "#.."],
        '-' => ["...", "...", "###", "...", "..."],
        '_' => ["...", "...", "...", "...", "###"],
        '=' => ["...", "###", "...", "###", "..."],
        '?' => ["##.", "..#", ".#.", "...", ".#."],
        _ => UNKNOWN_GLYPH,
    };
    Some(rows)
}

/// A single line of label text
#[derive(Debug, Clone)]
pub struct TextLayout {
    text: String,
    color: Color,
}

impl TextLayout {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Width of the rendered text in pixels
    pub fn width(&self) -> i32 {
        match self.text.chars().count() as i32 {
            0 => 0,
            n => n * GLYPH_ADVANCE - (GLYPH_ADVANCE - GLYPH_WIDTH),
        }
    }

    /// Draw the text with its top-left corner at `(x, y)` in `view`.
    pub fn render(&self, view: &View, x: i32, y: i32) {
        let mut origin = x;
        for c in self.text.chars() {
            if origin >= view.width() {
                break;
            }
            if let Some(rows) = glyph(c) {
                for (dy, row) in rows.iter().enumerate() {
                    for (dx, cell) in row.bytes().enumerate() {
                        if cell == b'#' {
                            let px = origin + dx as i32;
                            let py = y + dy as i32;
                            view.fill(px, px + 1, py, py + 1, self.color);
                        }
                    }
                }
            }
            origin += GLYPH_ADVANCE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Canvas;

    #[test]
    fn test_text_width() {
        assert_eq!(TextLayout::new("").width(), 0);
        assert_eq!(TextLayout::new("A").width(), 3);
        assert_eq!(TextLayout::new("Address").width(), 27);
    }

    #[test]
    fn test_render_draws_glyph_pixels() {
        let view = Canvas::new(8, 6);
        view.fill(0, 8, 0, 6, Color::WHITE);
        TextLayout::new("L").render(&view, 1, 0);

        assert_eq!(view.get(1, 0), Some(Color::BLACK));
        assert_eq!(view.get(2, 0), Some(Color::WHITE));
        assert_eq!(view.get(3, 4), Some(Color::BLACK));
        assert_eq!(view.get(0, 4), Some(Color::WHITE));
    }

    #[test]
    fn test_render_is_clipped() {
        let root = Canvas::new(10, 10);
        root.fill(0, 10, 0, 10, Color::WHITE);
        let label = root.sub_view(2, 5, 2, 5);
        TextLayout::new("HHHH").render(&label, 0, 0);

        assert_eq!(root.get(2, 2), Some(Color::BLACK));
        assert_eq!(root.get(5, 2), Some(Color::WHITE));
        assert_eq!(root.get(2, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_space_and_unknown() {
        let view = Canvas::new(12, 5);
        view.fill(0, 12, 0, 5, Color::WHITE);
        TextLayout::new(" \u{263a}")
            .with_color(Color::rgb(255, 0, 0))
            .render(&view, 0, 0);

        assert!((0..4).all(|x| view.get(x, 0) == Some(Color::WHITE)));
        assert_eq!(view.get(4, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(view.get(5, 2), Some(Color::WHITE));
    }
}
