//! Property-based tests for control bar layout.
//!
//! 1. At or above the minimum width, boundaries are ordered left to right and
//!    regions do not overlap.
//! 2. The layout depends on the width alone.

use proptest::prelude::*;
use rv_ui::layout::{ControlBarLayout, BOX_INSET, MIN_WIDTH};

proptest! {
    #[test]
    fn boundaries_ordered(width in MIN_WIDTH..4000) {
        let l = ControlBarLayout::new(width);
        let chain = [
            1,
            l.addr_text_start,
            l.addr_text_end,
            l.addr_box_start,
            l.security_icon_start,
            l.security_icon_end(),
            l.addr_field_start,
        ];
        for pair in chain.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{:?}", l);
        }
        prop_assert!(l.addr_text_start < l.addr_text_end);
        prop_assert!(l.security_icon_start > l.addr_box_start + BOX_INSET);
        prop_assert!(l.addr_field_start < l.addr_field_end);
        prop_assert!(l.addr_field_end <= l.addr_box_end - BOX_INSET);
        prop_assert!(l.addr_box_end < l.separator_pos);
        prop_assert!(l.separator_pos < l.quality_text_start);
        prop_assert!(l.quality_text_start < l.quality_text_end);
        prop_assert!(l.quality_text_end <= l.quality_selector_start);
        prop_assert!(l.quality_selector_start < l.quality_selector_end);
        prop_assert_eq!(l.quality_selector_end, width - 1);
    }

    #[test]
    fn layout_is_pure(width in -100i32..4000) {
        prop_assert_eq!(ControlBarLayout::new(width), ControlBarLayout::new(width));
    }
}
