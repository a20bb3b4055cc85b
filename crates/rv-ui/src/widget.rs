//! Widget composition contract
//!
//! Every visual element owns its children through `Rc` and reaches its
//! parent only through a `Weak` back-reference used to report that its view
//! went dirty. All widget methods assert that they run on the UI thread.

use rv_render::View;
use rv_tasks::{require_ui_thread, ThreadGuard};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::trace;

/// Receiver of upward notifications from a child widget.
pub trait WidgetParent {
    fn on_widget_view_dirty(&self);
}

/// State shared by every widget.
pub struct WidgetBase {
    guard: ThreadGuard,
    parent: Weak<dyn WidgetParent>,
    viewport: RefCell<View>,
    view_dirty: Cell<bool>,
}

impl WidgetBase {
    pub fn new(guard: ThreadGuard, parent: Weak<dyn WidgetParent>) -> Self {
        Self {
            guard,
            parent,
            viewport: RefCell::new(View::default()),
            view_dirty: Cell::new(true),
        }
    }

    pub fn guard(&self) -> ThreadGuard {
        self.guard
    }

    pub fn viewport(&self) -> View {
        require_ui_thread!(self.guard);
        self.viewport.borrow().clone()
    }

    pub fn view_dirty(&self) -> bool {
        self.view_dirty.get()
    }

    /// Mark the view dirty and tell the parent, if it is still alive.
    pub fn signal_view_dirty(&self) {
        require_ui_thread!(self.guard);
        self.view_dirty.set(true);
        if let Some(parent) = self.parent.upgrade() {
            parent.on_widget_view_dirty();
        }
    }
}

/// A visual element of the widget tree.
///
/// Implementors provide [`base`](Widget::base), [`render_self`](Widget::render_self)
/// and, when they own children, [`list_children`](Widget::list_children) and
/// [`viewport_updated`](Widget::viewport_updated). The remaining methods are
/// the public contract and should not be overridden.
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    /// Draw this widget, not its children, into its viewport.
    fn render_self(&self);

    /// Hook run after the viewport is replaced; re-assign child views here.
    fn viewport_updated(&self) {}

    /// Owned children, in render order.
    fn list_children(&self) -> Vec<Rc<dyn Widget>> {
        Vec::new()
    }

    /// Replace the drawing surface and re-lay out the children.
    fn set_viewport(&self, view: View) {
        let base = self.base();
        require_ui_thread!(base.guard);
        trace!("Viewport set to {}x{}", view.width(), view.height());
        *base.viewport.borrow_mut() = view;
        self.viewport_updated();
        base.signal_view_dirty();
    }

    /// Render this widget, then its children in order.
    fn render(&self) {
        let base = self.base();
        require_ui_thread!(base.guard);
        self.render_self();
        for child in self.list_children() {
            child.render();
        }
        base.view_dirty.set(false);
    }

    fn view_dirty(&self) -> bool {
        self.base().view_dirty()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingParent;
    use super::*;
    use rv_render::{Canvas, Color};

    struct Swatch {
        base: WidgetBase,
        color: Color,
        renders: Cell<usize>,
    }

    impl Widget for Swatch {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn render_self(&self) {
            self.renders.set(self.renders.get() + 1);
            let view = self.base.viewport();
            view.fill(0, view.width(), 0, view.height(), self.color);
        }
    }

    fn swatch(parent: &Rc<CountingParent>, color: Color) -> Swatch {
        let parent: Weak<dyn WidgetParent> = Rc::<CountingParent>::downgrade(parent);
        Swatch {
            base: WidgetBase::new(ThreadGuard::current(), parent),
            color,
            renders: Cell::new(0),
        }
    }

    #[test]
    fn test_set_viewport_signals_parent() {
        let parent = Rc::new(CountingParent::default());
        let widget = swatch(&parent, Color::WHITE);

        widget.set_viewport(Canvas::new(4, 4));
        assert_eq!(parent.take(), 1);
        assert!(widget.view_dirty());

        widget.render();
        assert!(!widget.view_dirty());
        assert_eq!(widget.renders.get(), 1);
        assert_eq!(widget.base().viewport().get(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn test_released_parent_is_not_notified() {
        let parent = Rc::new(CountingParent::default());
        let widget = swatch(&parent, Color::WHITE);
        drop(parent);
        widget.base().signal_view_dirty();
        assert!(widget.view_dirty());
    }
}
