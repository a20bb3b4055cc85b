//! Pixel canvas and clipped views
//!
//! A [`Canvas`] owns a rectangular pixel buffer. All drawing happens through
//! [`View`]s: offset windows into that buffer that share it by reference.
//! Every operation intersects its rectangle with the view bounds first, so
//! out-of-range coordinates are clipped instead of reported.

use crate::{Bitmap, Color};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Backing pixel storage for a set of views
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Allocate a black canvas and return a view covering all of it.
    pub fn new(width: usize, height: usize) -> View {
        let canvas = Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        };
        View {
            buffer: Rc::new(RefCell::new(canvas)),
            x0: 0,
            x1: width as i64,
            y0: 0,
            y1: height as i64,
        }
    }
}

/// Bounded window into a shared canvas.
///
/// Bounds are stored in absolute buffer coordinates and are always contained
/// in the buffer; public coordinates are relative to the view's top-left.
#[derive(Clone)]
pub struct View {
    buffer: Rc<RefCell<Canvas>>,
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
}

impl View {
    pub fn width(&self) -> i32 {
        (self.x1 - self.x0) as i32
    }

    pub fn height(&self) -> i32 {
        (self.y1 - self.y0) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.x0 == self.x1 || self.y0 == self.y1
    }

    /// Clip a view-relative span against `[0, len)` and return absolute bounds.
    fn clip(start: i32, end: i32, origin: i64, limit: i64) -> (i64, i64) {
        let lo = (origin + start as i64).clamp(origin, limit);
        let hi = (origin + end as i64).clamp(lo, limit);
        (lo, hi)
    }

    /// View over `[x0, x1) × [y0, y1)` relative to this one, clipped to it.
    pub fn sub_view(&self, x0: i32, x1: i32, y0: i32, y1: i32) -> View {
        let (ax0, ax1) = Self::clip(x0, x1, self.x0, self.x1);
        let (ay0, ay1) = Self::clip(y0, y1, self.y0, self.y1);
        View {
            buffer: Rc::clone(&self.buffer),
            x0: ax0,
            x1: ax1,
            y0: ay0,
            y1: ay1,
        }
    }

    /// Set every pixel of `[x0, x1) × [y0, y1)` inside the view to `color`.
    pub fn fill(&self, x0: i32, x1: i32, y0: i32, y1: i32, color: impl Into<Color>) {
        let (ax0, ax1) = Self::clip(x0, x1, self.x0, self.x1);
        let (ay0, ay1) = Self::clip(y0, y1, self.y0, self.y1);
        if ax0 == ax1 || ay0 == ay1 {
            return;
        }

        let color = color.into();
        let mut canvas = self.buffer.borrow_mut();
        let stride = canvas.width;
        for y in ay0..ay1 {
            let row = y as usize * stride;
            canvas.pixels[row + ax0 as usize..row + ax1 as usize].fill(color);
        }
    }

    /// Copy `source` into the view with its top-left corner at `(x, y)`.
    pub fn blit(&self, source: &Bitmap, x: i32, y: i32) {
        let w = source.width() as i64;
        let h = source.height() as i64;
        let (ax0, ax1) = (
            (self.x0 + x as i64).clamp(self.x0, self.x1),
            (self.x0 + x as i64 + w).clamp(self.x0, self.x1),
        );
        let (ay0, ay1) = (
            (self.y0 + y as i64).clamp(self.y0, self.y1),
            (self.y0 + y as i64 + h).clamp(self.y0, self.y1),
        );
        if ax0 >= ax1 || ay0 >= ay1 {
            return;
        }

        let mut canvas = self.buffer.borrow_mut();
        let stride = canvas.width;
        let sx0 = (ax0 - self.x0 - x as i64) as usize;
        let sx1 = sx0 + (ax1 - ax0) as usize;
        for ty in ay0..ay1 {
            let sy = (ty - self.y0 - y as i64) as usize;
            let row = ty as usize * stride;
            canvas.pixels[row + ax0 as usize..row + ax1 as usize]
                .copy_from_slice(&source.row(sy)[sx0..sx1]);
        }
    }

    /// Pixel at view-relative `(x, y)`, or `None` outside the view
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        let ax = self.x0 + x as i64;
        let ay = self.y0 + y as i64;
        if ax < self.x0 || ax >= self.x1 || ay < self.y0 || ay >= self.y1 {
            return None;
        }
        let canvas = self.buffer.borrow();
        Some(canvas.pixels[ay as usize * canvas.width + ax as usize])
    }

    /// Row-major RGBA bytes of the pixels covered by this view
    pub fn to_rgba(&self) -> Vec<u8> {
        let canvas = self.buffer.borrow();
        let mut out = Vec::with_capacity((self.width() * self.height()) as usize * 4);
        for y in self.y0..self.y1 {
            let row = y as usize * canvas.width;
            for pixel in &canvas.pixels[row + self.x0 as usize..row + self.x1 as usize] {
                out.extend_from_slice(&pixel.to_rgba());
            }
        }
        out
    }

    /// Whether both views draw into the same canvas
    pub fn shares_buffer(&self, other: &View) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canvas = self.buffer.borrow();
        f.debug_struct("View")
            .field("x", &(self.x0..self.x1))
            .field("y", &(self.y0..self.y1))
            .field("canvas", &(canvas.width, canvas.height))
            .finish()
    }
}

impl Default for View {
    /// Zero-sized view on its own empty canvas
    fn default() -> Self {
        Canvas::new(0, 0)
    }
}
