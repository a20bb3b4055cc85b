//! Security status icons
//!
//! The three padlock icons are authored as 13×13 palette grids and compiled
//! into bitmaps once per process. [`preload`] forces construction at startup
//! so a malformed grid aborts before the first frame.

use crate::{Bitmap, Color, Palette};
use std::sync::LazyLock;
use tracing::debug;

/// Connection security shown next to the address field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityStatus {
    Secure,
    Warning,
    Insecure,
}

/// Palette-indexed source of an icon
#[derive(Debug, Clone, Copy)]
pub struct IconSource {
    pub rows: &'static [&'static str],
    pub palette: &'static [(char, Color)],
}

impl IconSource {
    /// Compile the grid into a bitmap.
    ///
    /// # Panics
    ///
    /// Panics if the grid is ragged or uses a tag missing from the palette.
    pub fn build(&self) -> Bitmap {
        Bitmap::from_grid(self.rows, &Palette::new(self.palette))
            .unwrap_or_else(|e| panic!("malformed built-in icon: {e}"))
    }
}

pub const SECURE_ICON: IconSource = IconSource {
    rows: &[
        "WWWWWBBWWWWWW",
        "WWWWBWWBWWWWW",
        "WWWBWWWWBWWWW",
        "WWWBWWWWBWWWW",
        "WWWBWWWWBWWWW",
        "WEEEEEEEEEBWW",
        "WEGGGGGGGGBWW",
        "WEGGGGGGGGBWW",
        "WEGGGGGGGGBWW",
        "WEGGGGGGGGBWW",
        "WEGGGGGGGGBWW",
        "WBBBBBBBBBBWW",
        "WWWWWWWWWWWWW",
    ],
    palette: &[
        ('B', Color::rgb(0, 0, 0)),
        ('E', Color::rgb(128, 128, 128)),
        ('G', Color::rgb(192, 192, 192)),
        ('W', Color::rgb(255, 255, 255)),
    ],
};

pub const WARNING_ICON: IconSource = IconSource {
    rows: &[
        "WWWWWBBWvWWWW",
        "WWWWBWWvYjWWW",
        "WWWBWWWvYjWWW",
        "WWWBWWvYYYjWW",
        "WWWBWWvYBYjWW",
        "WEEEEEvYBYjWW",
        "WEGGGvYYBYYjW",
        "WEGGGvYYBYYjW",
        "WEGGGvYYBYYjW",
        "WEGGvYYYYYYYj",
        "WEGGvYYYBYYYj",
        "WBBBvYYYYYYYj",
        "WWWWyyyyyyyyy",
    ],
    palette: &[
        ('B', Color::rgb(0, 0, 0)),
        ('E', Color::rgb(128, 128, 128)),
        ('G', Color::rgb(192, 192, 192)),
        ('W', Color::rgb(255, 255, 255)),
        ('Y', Color::rgb(255, 255, 0)),
        ('y', Color::rgb(32, 32, 0)),
        ('j', Color::rgb(64, 64, 0)),
        ('v', Color::rgb(128, 128, 0)),
    ],
};

pub const INSECURE_ICON: IconSource = IconSource {
    rows: &[
        "WWWWWBBWWWRRW",
        "WWWWBWWBWRRRW",
        "WWWBWWWWRRRWW",
        "WWWBWWWRRRWWW",
        "WWWBWWRRRWWWW",
        "WEEEERRRWbBWW",
        "WEGGRRRWgGBWW",
        "WEGRRRWgGGBWW",
        "WERRRWgGGGBWW",
        "WRRRWgGGGGBWW",
        "RRRWgGGGGGBWW",
        "RRWbBBBBBBBWW",
        "WWWWWWWWWWWWW",
    ],
    palette: &[
        ('B', Color::rgb(0, 0, 0)),
        ('b', Color::rgb(128, 128, 128)),
        ('E', Color::rgb(128, 128, 128)),
        ('G', Color::rgb(192, 192, 192)),
        ('g', Color::rgb(224, 224, 224)),
        ('W', Color::rgb(255, 255, 255)),
        ('R', Color::rgb(255, 0, 0)),
    ],
};

/// Width and height of every security icon
pub const ICON_SIZE: i32 = 13;

static SECURE: LazyLock<Bitmap> = LazyLock::new(|| SECURE_ICON.build());
static WARNING: LazyLock<Bitmap> = LazyLock::new(|| WARNING_ICON.build());
static INSECURE: LazyLock<Bitmap> = LazyLock::new(|| INSECURE_ICON.build());

/// Cached icon for `status`
pub fn security_icon(status: SecurityStatus) -> &'static Bitmap {
    match status {
        SecurityStatus::Secure => &*SECURE,
        SecurityStatus::Warning => &*WARNING,
        SecurityStatus::Insecure => &*INSECURE,
    }
}

/// Build all icons now instead of on first render.
pub fn preload() {
    for status in [
        SecurityStatus::Secure,
        SecurityStatus::Warning,
        SecurityStatus::Insecure,
    ] {
        let icon = security_icon(status);
        debug!("Loaded {:?} icon ({}x{})", status, icon.width(), icon.height());
    }
}
