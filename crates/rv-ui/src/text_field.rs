//! Single-line text entry field.

use crate::widget::{Widget, WidgetBase, WidgetParent};
use rv_render::{Color, TextLayout};
use rv_tasks::{require_ui_thread, ThreadGuard};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Receiver of text field input events.
pub trait TextFieldEventHandler {
    fn on_text_field_submitted(&self, text: String);
}

pub struct TextField {
    base: WidgetBase,
    event_handler: Weak<dyn TextFieldEventHandler>,
    layout: RefCell<TextLayout>,
}

impl TextField {
    pub fn new(
        guard: ThreadGuard,
        parent: Weak<dyn WidgetParent>,
        event_handler: Weak<dyn TextFieldEventHandler>,
    ) -> Rc<Self> {
        Rc::new(Self {
            base: WidgetBase::new(guard, parent),
            event_handler,
            layout: RefCell::new(TextLayout::new("")),
        })
    }

    pub fn text(&self) -> String {
        require_ui_thread!(self.base.guard());
        self.layout.borrow().text().to_string()
    }

    /// Replace the contents without reporting an event.
    pub fn set_text(&self, text: impl Into<String>) {
        require_ui_thread!(self.base.guard());
        let text = text.into();
        if self.layout.borrow().text() == text {
            return;
        }
        self.layout.borrow_mut().set_text(text);
        self.base.signal_view_dirty();
    }

    /// Report the current contents as submitted (the user pressed Enter).
    pub fn submit(&self) {
        require_ui_thread!(self.base.guard());
        let text = self.text();
        debug!("Text field submitted: {}", text);
        if let Some(handler) = self.event_handler.upgrade() {
            handler.on_text_field_submitted(text);
        }
    }
}

impl Widget for TextField {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn render_self(&self) {
        let view = self.base.viewport();
        view.fill(0, view.width(), 0, view.height(), Color::WHITE);
        let layout = self.layout.borrow();
        layout.render(&view, 1, (view.height() - rv_render::text::GLYPH_HEIGHT) / 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::CountingParent;
    use rv_render::Canvas;

    #[derive(Default)]
    struct Submissions(RefCell<Vec<String>>);

    impl TextFieldEventHandler for Submissions {
        fn on_text_field_submitted(&self, text: String) {
            self.0.borrow_mut().push(text);
        }
    }

    fn field(parent: &Rc<CountingParent>, handler: &Rc<Submissions>) -> Rc<TextField> {
        let parent: Weak<dyn WidgetParent> = Rc::<CountingParent>::downgrade(parent);
        let handler: Weak<dyn TextFieldEventHandler> = Rc::<Submissions>::downgrade(handler);
        TextField::new(ThreadGuard::current(), parent, handler)
    }

    #[test]
    fn test_set_text_signals_once_per_change() {
        let parent = Rc::new(CountingParent::default());
        let handler = Rc::new(Submissions::default());
        let field = field(&parent, &handler);

        field.set_text("http://a");
        field.set_text("http://a");
        assert_eq!(parent.take(), 1);
        assert_eq!(field.text(), "http://a");
        assert!(handler.0.borrow().is_empty());
    }

    #[test]
    fn test_submit_reports_text() {
        let parent = Rc::new(CountingParent::default());
        let handler = Rc::new(Submissions::default());
        let field = field(&parent, &handler);

        field.set_text("example.org");
        field.submit();
        assert_eq!(*handler.0.borrow(), vec!["example.org".to_string()]);
    }

    #[test]
    fn test_render_fills_background() {
        let parent = Rc::new(CountingParent::default());
        let handler = Rc::new(Submissions::default());
        let field = field(&parent, &handler);

        let canvas = Canvas::new(30, 16);
        field.set_viewport(canvas.sub_view(2, 28, 0, 16));
        field.set_text("I");
        field.render();

        assert_eq!(canvas.get(1, 0), Some(Color::BLACK));
        assert_eq!(canvas.get(2, 0), Some(Color::WHITE));
        // Top bar of "I" at x 3..6, vertically centered
        assert_eq!(canvas.get(3, 5), Some(Color::BLACK));
        assert_eq!(canvas.get(27, 15), Some(Color::WHITE));
    }
}
