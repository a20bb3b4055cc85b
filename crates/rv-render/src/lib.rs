//! Retrovice Render - Software pixel canvas
//!
//! CPU-side drawing primitives for the control bar: clipped views into a
//! shared pixel buffer, palette-synthesized bitmaps, the security icon cache
//! and a tiny label font.

mod bitmap;
mod canvas;
mod color;
pub mod icons;
pub mod text;

pub use bitmap::{Bitmap, Palette, RenderError};
pub use canvas::{Canvas, View};
pub use color::Color;
pub use icons::{security_icon, SecurityStatus};
pub use text::TextLayout;
