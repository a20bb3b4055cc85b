//! Property-based tests for view clipping.
//!
//! 1. A fill through a sub-view never touches pixels outside that sub-view.
//! 2. Successive sub-views never grow.
//! 3. A blit through a sub-view never touches pixels outside that sub-view.

use proptest::prelude::*;
use rv_render::{Bitmap, Canvas, Color, Palette};

const W: usize = 24;
const H: usize = 16;

fn span() -> impl Strategy<Value = (i32, i32)> {
    (-40i32..60, -40i32..60)
}

fn inside(x: i32, y: i32, bounds: (i32, i32, i32, i32)) -> bool {
    let (x0, x1, y0, y1) = bounds;
    x >= x0 && x < x1 && y >= y0 && y < y1
}

/// Absolute bounds of a sub-view request, as the view clips them.
fn clipped(x0: i32, x1: i32, y0: i32, y1: i32) -> (i32, i32, i32, i32) {
    let cx0 = x0.clamp(0, W as i32);
    let cx1 = x1.clamp(cx0, W as i32);
    let cy0 = y0.clamp(0, H as i32);
    let cy1 = y1.clamp(cy0, H as i32);
    (cx0, cx1, cy0, cy1)
}

proptest! {
    #[test]
    fn fill_stays_inside_sub_view(
        (vx0, vx1) in span(),
        (vy0, vy1) in span(),
        (fx0, fx1) in span(),
        (fy0, fy1) in span(),
    ) {
        let root = Canvas::new(W, H);
        let view = root.sub_view(vx0, vx1, vy0, vy1);
        view.fill(fx0, fx1, fy0, fy1, 255);

        let bounds = clipped(vx0, vx1, vy0, vy1);
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                if !inside(x, y, bounds) {
                    prop_assert_eq!(root.get(x, y), Some(Color::BLACK), "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn sub_views_never_grow(
        (ax0, ax1) in span(),
        (ay0, ay1) in span(),
        (bx0, bx1) in span(),
        (by0, by1) in span(),
    ) {
        let root = Canvas::new(W, H);
        let outer = root.sub_view(ax0, ax1, ay0, ay1);
        let inner = outer.sub_view(bx0, bx1, by0, by1);
        prop_assert!(inner.width() <= outer.width());
        prop_assert!(inner.height() <= outer.height());
        prop_assert!(inner.width() >= 0 && inner.height() >= 0);
    }

    #[test]
    fn blit_stays_inside_sub_view(
        (vx0, vx1) in span(),
        (vy0, vy1) in span(),
        bx in -30i32..40,
        by in -30i32..40,
    ) {
        let palette = Palette::new(&[('W', Color::WHITE)]);
        let bitmap = Bitmap::from_grid(&["WWWWW", "WWWWW", "WWWWW"], &palette).unwrap();
        let root = Canvas::new(W, H);
        root.sub_view(vx0, vx1, vy0, vy1).blit(&bitmap, bx, by);

        let bounds = clipped(vx0, vx1, vy0, vy1);
        for y in 0..H as i32 {
            for x in 0..W as i32 {
                if !inside(x, y, bounds) {
                    prop_assert_eq!(root.get(x, y), Some(Color::BLACK));
                }
            }
        }
    }
}

#[test]
fn fill_wide_request_on_ten_wide_view() {
    let root = Canvas::new(30, 1);
    let view = root.sub_view(10, 20, 0, 1);
    view.fill(-5, 1000, 0, 1, 255);
    for x in 0..30 {
        let lit = root.get(x, 0) == Some(Color::WHITE);
        assert_eq!(lit, (10..20).contains(&x), "column {x}");
    }
}
