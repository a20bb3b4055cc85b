//! Control bar geometry
//!
//! Regions are reserved right to left inside the content band `[1, width - 1)`:
//! quality selector, quality label, separator, then the address region, which
//! splits into a fixed label and a box holding the security icon and the text
//! field. Every boundary is a column offset within the bar.

use crate::quality::QualitySelector;
use rv_render::icons::ICON_SIZE;

pub const SEPARATOR_WIDTH: i32 = 4;
pub const ADDRESS_TEXT_WIDTH: i32 = 30;
pub const QUALITY_TEXT_WIDTH: i32 = 30;

/// Margin between the address box edge and its inner box, per side.
pub const BOX_INSET: i32 = 2;
/// Gap between the inner box start and the security icon.
pub const ICON_GAP: i32 = 4;
/// Gap between the security icon and the text field.
pub const FIELD_GAP: i32 = 4;

/// Narrowest bar in which every region is at least one column wide.
///
/// Narrower bars still lay out and render, with regions clipped.
pub const MIN_WIDTH: i32 = 2
    + QualitySelector::WIDTH
    + QUALITY_TEXT_WIDTH
    + SEPARATOR_WIDTH
    + ADDRESS_TEXT_WIDTH
    + 2 * BOX_INSET
    + ICON_GAP
    + ICON_SIZE
    + FIELD_GAP
    + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlBarLayout {
    pub width: i32,

    pub addr_text_start: i32,
    pub addr_text_end: i32,

    pub addr_box_start: i32,
    pub addr_box_end: i32,

    pub security_icon_start: i32,

    pub addr_field_start: i32,
    pub addr_field_end: i32,

    pub separator_pos: i32,

    pub quality_text_start: i32,
    pub quality_text_end: i32,

    pub quality_selector_start: i32,
    pub quality_selector_end: i32,
}

impl ControlBarLayout {
    pub fn new(width: i32) -> Self {
        let content_start = 1;
        let content_end = width - 1;

        let quality_selector_end = content_end;
        let quality_selector_start = quality_selector_end - QualitySelector::WIDTH;

        let quality_text_end = quality_selector_start;
        let quality_text_start = quality_text_end - QUALITY_TEXT_WIDTH;

        let separator_end = quality_text_start;
        let separator_start = separator_end - SEPARATOR_WIDTH;

        let addr_text_start = content_start;
        let addr_text_end = addr_text_start + ADDRESS_TEXT_WIDTH;

        let addr_box_start = addr_text_end;
        let addr_box_end = separator_start;

        let security_icon_start = addr_box_start + BOX_INSET + ICON_GAP;

        Self {
            width,
            addr_text_start,
            addr_text_end,
            addr_box_start,
            addr_box_end,
            security_icon_start,
            addr_field_start: security_icon_start + ICON_SIZE + FIELD_GAP,
            addr_field_end: addr_box_end - BOX_INSET,
            separator_pos: separator_start + SEPARATOR_WIDTH / 2,
            quality_text_start,
            quality_text_end,
            quality_selector_start,
            quality_selector_end,
        }
    }

    pub fn security_icon_end(&self) -> i32 {
        self.security_icon_start + ICON_SIZE
    }

    /// Whether every region has positive width.
    pub fn is_viable(&self) -> bool {
        self.addr_field_start < self.addr_field_end
    }
}
