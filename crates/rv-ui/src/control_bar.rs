//! Browser control bar
//!
//! Address label and field with the security indicator on the left, the
//! quality label and selector on the right, drawn with a raised bevel.

use crate::layout::ControlBarLayout;
use crate::quality::{QualitySelector, QualitySelectorEventHandler};
use crate::text_field::{TextField, TextFieldEventHandler};
use crate::widget::{Widget, WidgetBase, WidgetParent};
use rv_render::{icons, Color, SecurityStatus, TextLayout};
use rv_tasks::{require_ui_thread, UiContext};
use std::cell::Cell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Receiver of control bar input events.
///
/// Calls arrive through the UI context's queue, never from inside the
/// child widget that detected the input.
pub trait ControlBarEventHandler {
    fn on_address_submitted(&self, url: String);
    fn on_quality_changed(&self, quality: i32);
}

pub struct ControlBar {
    base: WidgetBase,
    /// Queue used to deliver events to the handler
    ctx: Rc<UiContext>,
    event_handler: Weak<dyn ControlBarEventHandler>,

    /// Selects the icon drawn next to the address field
    security_status: Cell<SecurityStatus>,
    /// "Address" label
    addr_text: TextLayout,
    /// "Quality" label
    quality_text: TextLayout,

    /// Owned children, rendered after the bar in this order
    addr_field: Rc<TextField>,
    quality_selector: Rc<QualitySelector>,
}

impl ControlBar {
    pub const HEIGHT: i32 = 27;

    pub fn new(
        ctx: &Rc<UiContext>,
        parent: Weak<dyn WidgetParent>,
        event_handler: Weak<dyn ControlBarEventHandler>,
    ) -> Rc<Self> {
        let guard = ctx.guard();
        Rc::new_cyclic(|this: &Weak<Self>| {
            let as_parent: Weak<dyn WidgetParent> = this.clone();
            let as_field_handler: Weak<dyn TextFieldEventHandler> = this.clone();
            let as_selector_handler: Weak<dyn QualitySelectorEventHandler> = this.clone();

            Self {
                base: WidgetBase::new(guard, parent),
                ctx: ctx.clone(),
                event_handler,
                security_status: Cell::new(SecurityStatus::Insecure),
                addr_text: TextLayout::new("Address"),
                quality_text: TextLayout::new("Quality"),
                addr_field: TextField::new(guard, as_parent.clone(), as_field_handler),
                quality_selector: QualitySelector::new(guard, as_parent, as_selector_handler),
            }
        })
    }

    pub fn security_status(&self) -> SecurityStatus {
        self.security_status.get()
    }

    pub fn set_security_status(&self, status: SecurityStatus) {
        require_ui_thread!(self.base.guard());
        if self.security_status.replace(status) != status {
            debug!("Security status now {:?}", status);
            self.base.signal_view_dirty();
        }
    }

    pub fn set_address(&self, url: impl Into<String>) {
        self.addr_field.set_text(url);
    }

    pub fn set_quality(&self, quality: i32) {
        self.quality_selector.set_quality(quality);
    }

    pub fn address_field(&self) -> &Rc<TextField> {
        &self.addr_field
    }

    pub fn quality_selector(&self) -> &Rc<QualitySelector> {
        &self.quality_selector
    }

    /// Run `call` on the handler from the context queue.
    fn forward(&self, call: impl FnOnce(&dyn ControlBarEventHandler) + 'static) {
        let handler = self.event_handler.clone();
        self.ctx.post_local(move || match handler.upgrade() {
            Some(handler) => call(&*handler),
            None => debug!("Control bar handler released, dropping event"),
        });
    }
}

impl TextFieldEventHandler for ControlBar {
    fn on_text_field_submitted(&self, text: String) {
        require_ui_thread!(self.base.guard());
        self.forward(move |handler| handler.on_address_submitted(text));
    }
}

impl QualitySelectorEventHandler for ControlBar {
    fn on_quality_changed(&self, quality: i32) {
        require_ui_thread!(self.base.guard());
        self.forward(move |handler| handler.on_quality_changed(quality));
    }
}

impl WidgetParent for ControlBar {
    fn on_widget_view_dirty(&self) {
        self.base.signal_view_dirty();
    }
}

impl Widget for ControlBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn viewport_updated(&self) {
        const H: i32 = ControlBar::HEIGHT;
        let view = self.base.viewport();
        let layout = ControlBarLayout::new(view.width());

        self.addr_field.set_viewport(view.sub_view(
            layout.addr_field_start,
            layout.addr_field_end,
            5,
            H - 6,
        ));
        self.quality_selector.set_viewport(view.sub_view(
            layout.quality_selector_start,
            layout.quality_selector_end,
            1,
            H - 4,
        ));
    }

    fn render_self(&self) {
        const H: i32 = ControlBar::HEIGHT;
        let view = self.base.viewport();
        let layout = ControlBarLayout::new(view.width());
        let w = layout.width;

        // Frame
        view.fill(0, w - 1, 0, 1, 255);
        view.fill(0, 1, 1, H - 4, 255);
        view.fill(w - 1, w, 0, H - 3, 128);
        view.fill(0, w - 1, H - 4, H - 3, 128);
        view.fill(0, w, H - 3, H - 2, 255);
        view.fill(0, w, H - 2, H - 1, 128);
        view.fill(0, w, H - 1, H, Color::BLACK);

        view.fill(1, w - 1, 1, H - 4, 192);

        self.addr_text.render(
            &view.sub_view(layout.addr_text_start, layout.addr_text_end, 1, H - 4),
            2,
            8,
        );

        // Sunken address box
        let (bs, be) = (layout.addr_box_start, layout.addr_box_end);
        view.fill(bs, be - 1, 1, 2, 128);
        view.fill(bs, bs + 1, 2, H - 5, 128);
        view.fill(be - 1, be, 1, H - 4, 255);
        view.fill(bs, be - 1, H - 5, H - 4, 255);
        view.fill(bs + 1, be - 2, 2, 3, 0);
        view.fill(bs + 1, bs + 2, 3, H - 6, 0);
        view.fill(be - 2, be - 1, 2, H - 5, 192);
        view.fill(bs + 1, be - 2, H - 6, H - 5, 192);

        view.fill(bs + 2, be - 2, 3, H - 6, 255);

        let icon = icons::security_icon(self.security_status.get());
        view.blit(icon, layout.security_icon_start, 6);

        view.fill(layout.separator_pos - 1, layout.separator_pos, 1, H - 4, 128);
        view.fill(layout.separator_pos, layout.separator_pos + 1, 1, H - 4, 255);

        self.quality_text.render(
            &view.sub_view(layout.quality_text_start, layout.quality_text_end, 1, H - 4),
            2,
            8,
        );
    }

    fn list_children(&self) -> Vec<Rc<dyn Widget>> {
        vec![self.addr_field.clone(), self.quality_selector.clone()]
    }
}
