//! Immutable bitmaps synthesized from palette-indexed text grids.

use crate::Color;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building a bitmap from a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unknown palette tag {tag:?} at row {row}, column {column}")]
    UnknownTag { tag: char, row: usize, column: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Mapping from a single-character tag to a color
#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: HashMap<char, Color>,
}

impl Palette {
    pub fn new(entries: &[(char, Color)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn get(&self, tag: char) -> Option<Color> {
        self.entries.get(&tag).copied()
    }
}

/// Owned, immutable pixel grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Build a bitmap from rows of palette tags.
    ///
    /// Every row must have the same number of characters and every
    /// character must be present in `palette`.
    pub fn from_grid(rows: &[&str], palette: &Palette) -> Result<Self, RenderError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut pixels = Vec::with_capacity(width * rows.len());

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(RenderError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, tag) in row.chars().enumerate() {
                let color = palette.get(tag).ok_or(RenderError::UnknownTag {
                    tag,
                    row: y,
                    column: x,
                })?;
                pixels.push(color);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub(crate) fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::new(&[('B', Color::BLACK), ('W', Color::WHITE), ('R', Color::rgb(255, 0, 0))])
    }

    #[test]
    fn test_from_grid() {
        let bitmap = Bitmap::from_grid(&["BWR", "RWB"], &palette()).unwrap();
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.get(0, 0), Some(Color::BLACK));
        assert_eq!(bitmap.get(2, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(bitmap.get(2, 1), Some(Color::BLACK));
        assert_eq!(bitmap.get(3, 0), None);
        assert_eq!(bitmap.get(0, 2), None);
    }

    #[test]
    fn test_unknown_tag() {
        let err = Bitmap::from_grid(&["BW", "BX"], &palette()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownTag {
                tag: 'X',
                row: 1,
                column: 1
            }
        );
    }

    #[test]
    fn test_ragged_rows() {
        let err = Bitmap::from_grid(&["BWB", "BW"], &palette()).unwrap_err();
        assert_eq!(
            err,
            RenderError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_empty_grid() {
        let bitmap = Bitmap::from_grid(&[], &palette()).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (0, 0));
    }
}
