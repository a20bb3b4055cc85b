//! Image quality selector.

use crate::widget::{Widget, WidgetBase, WidgetParent};
use rv_render::Color;
use rv_tasks::{require_ui_thread, ThreadGuard};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Receiver of quality selector input events.
pub trait QualitySelectorEventHandler {
    fn on_quality_changed(&self, quality: i32);
}

pub struct QualitySelector {
    base: WidgetBase,
    event_handler: Weak<dyn QualitySelectorEventHandler>,
    quality: Cell<i32>,
}

impl QualitySelector {
    /// Width reserved for the selector in the control bar
    pub const WIDTH: i32 = 24;
    pub const MIN_QUALITY: i32 = 1;
    pub const MAX_QUALITY: i32 = 10;

    pub fn new(
        guard: ThreadGuard,
        parent: Weak<dyn WidgetParent>,
        event_handler: Weak<dyn QualitySelectorEventHandler>,
    ) -> Rc<Self> {
        Rc::new(Self {
            base: WidgetBase::new(guard, parent),
            event_handler,
            quality: Cell::new(Self::MAX_QUALITY),
        })
    }

    pub fn quality(&self) -> i32 {
        self.quality.get()
    }

    /// Store `quality`, clamped to the valid range. Returns whether it changed.
    fn update(&self, quality: i32) -> bool {
        require_ui_thread!(self.base.guard());
        let quality = quality.clamp(Self::MIN_QUALITY, Self::MAX_QUALITY);
        if self.quality.replace(quality) == quality {
            return false;
        }
        self.base.signal_view_dirty();
        true
    }

    /// Change the quality without reporting an event.
    pub fn set_quality(&self, quality: i32) {
        self.update(quality);
    }

    /// Change the quality as user input and report it if it changed.
    pub fn select(&self, quality: i32) {
        if !self.update(quality) {
            return;
        }
        let quality = self.quality.get();
        debug!("Quality selected: {}", quality);
        if let Some(handler) = self.event_handler.upgrade() {
            handler.on_quality_changed(quality);
        }
    }
}

impl Widget for QualitySelector {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn render_self(&self) {
        let view = self.base.viewport();
        let (w, h) = (view.width(), view.height());

        // Raised bevel
        view.fill(0, w, 0, h, Color::FACE);
        view.fill(0, w - 1, 0, 1, Color::LIGHT);
        view.fill(0, 1, 1, h - 1, Color::LIGHT);
        view.fill(w - 1, w, 0, h, Color::SHADOW);
        view.fill(0, w - 1, h - 1, h, Color::SHADOW);

        // Level bar, proportional to quality
        let track = (w - 6).max(0);
        let filled = track * self.quality.get() / Self::MAX_QUALITY;
        view.fill(3, 3 + track, h / 2 - 2, h / 2 + 2, Color::WHITE);
        view.fill(3, 3 + filled, h / 2 - 2, h / 2 + 2, Color::rgb(0, 0, 128));
    }
}
