//! The managed subsystem: owns the control bar and its canvas.

use crate::config::AppConfig;
use crate::lifecycle::{ManagedSubsystem, ServerEventHandler};
use crate::snapshot;
use rv_render::{Canvas, SecurityStatus, View};
use rv_tasks::{require_ui_thread, UiContext};
use rv_ui::layout::MIN_WIDTH;
use rv_ui::{ControlBar, ControlBarEventHandler, Widget, WidgetParent};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Security status implied by the scheme of `url`.
pub fn security_status_for(url: &str) -> SecurityStatus {
    let scheme = url.split_once("://").map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme.as_deref() {
        Some("https") => SecurityStatus::Secure,
        Some("http") => SecurityStatus::Insecure,
        _ => SecurityStatus::Warning,
    }
}

pub struct Server {
    ctx: Rc<UiContext>,
    /// Self reference captured by posted render tasks
    this: Weak<Server>,
    /// Told when shutdown has finished
    event_handler: Weak<dyn ServerEventHandler>,
    /// Root view of the frame buffer the bar draws into
    canvas: View,
    /// Root of the widget tree, released on shutdown
    control_bar: RefCell<Option<Rc<ControlBar>>>,
    /// A render task is queued and not yet run
    render_pending: Cell<bool>,
    frames: Cell<u64>,
    /// PNG path for the last frame, if configured
    snapshot: Option<PathBuf>,
    shutdown_started: Cell<bool>,
}

impl Server {
    pub fn new(
        ctx: &Rc<UiContext>,
        config: &AppConfig,
        event_handler: Weak<dyn ServerEventHandler>,
    ) -> Rc<Self> {
        let width = config.width as usize;
        if (config.width as i32) < MIN_WIDTH {
            warn!(
                "Width {} is below the minimum of {}, the control bar will be clipped",
                config.width, MIN_WIDTH
            );
        }

        let server = Rc::new_cyclic(|this: &Weak<Self>| {
            let as_parent: Weak<dyn WidgetParent> = this.clone();
            let as_handler: Weak<dyn ControlBarEventHandler> = this.clone();
            Self {
                ctx: ctx.clone(),
                this: this.clone(),
                event_handler,
                canvas: Canvas::new(width, ControlBar::HEIGHT as usize),
                control_bar: RefCell::new(Some(ControlBar::new(ctx, as_parent, as_handler))),
                render_pending: Cell::new(false),
                frames: Cell::new(0),
                snapshot: config.snapshot.clone(),
                shutdown_started: Cell::new(false),
            }
        });

        if let Some(bar) = server.control_bar() {
            bar.set_viewport(server.canvas.clone());
            bar.set_quality(config.quality);
            bar.set_address(config.start_url.as_str());
            bar.set_security_status(security_status_for(&config.start_url));
        }
        info!("Server started with a {}x{} control bar", width, ControlBar::HEIGHT);
        server
    }

    /// The control bar, until shutdown releases it
    pub fn control_bar(&self) -> Option<Rc<ControlBar>> {
        self.control_bar.borrow().clone()
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    fn schedule_render(&self) {
        if self.render_pending.replace(true) {
            return;
        }
        let this = self.this.clone();
        self.ctx.post_local(move || {
            if let Some(server) = this.upgrade() {
                server.render_now();
            }
        });
    }

    fn render_now(&self) {
        require_ui_thread!(self.ctx.guard());
        self.render_pending.set(false);
        let Some(bar) = self.control_bar() else { return };
        bar.render();
        self.frames.set(self.frames.get() + 1);
        debug!("Rendered frame {}", self.frames.get());
    }
}

impl WidgetParent for Server {
    fn on_widget_view_dirty(&self) {
        self.schedule_render();
    }
}

impl ControlBarEventHandler for Server {
    fn on_address_submitted(&self, url: String) {
        require_ui_thread!(self.ctx.guard());
        info!("Navigating to {}", url);
        if let Some(bar) = self.control_bar() {
            bar.set_security_status(security_status_for(&url));
            bar.set_address(url);
        }
    }

    fn on_quality_changed(&self, quality: i32) {
        require_ui_thread!(self.ctx.guard());
        info!("Quality changed to {}", quality);
    }
}

impl ManagedSubsystem for Server {
    fn shutdown(&self) {
        require_ui_thread!(self.ctx.guard());
        if self.shutdown_started.replace(true) {
            debug!("Server shutdown already in progress");
            return;
        }
        info!("Server shutting down after {} frames", self.frames());

        if self.render_pending.get() {
            self.render_now();
        }
        self.control_bar.borrow_mut().take();

        if let Some(path) = &self.snapshot {
            if let Err(e) = snapshot::write_png(&self.canvas, path) {
                warn!("Snapshot failed: {}", e);
            }
        }

        let handler = self.event_handler.clone();
        self.ctx.post_local(move || {
            if let Some(handler) = handler.upgrade() {
                handler.on_server_shutdown_complete();
            }
        });
    }
}
