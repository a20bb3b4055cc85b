//! Process lifecycle coordination
//!
//! The [`App`] starts the managed subsystem, turns shutdown requests into a
//! single call to its shutdown entry point, and stops the UI loop only after
//! the subsystem reports that its shutdown finished.

use rv_tasks::{require_ui_thread, UiContext};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    NotStarted,
    Running,
    /// A request is being handed to the subsystem
    ShutdownRequested,
    /// Waiting for the subsystem to report completion
    ShuttingDown,
    Terminated,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::ShutdownRequested => "shutdown requested",
            Self::ShuttingDown => "shutting down",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Subsystem whose shutdown the [`App`] waits for.
pub trait ManagedSubsystem {
    /// Begin shutting down. Completion is reported later through
    /// [`ServerEventHandler::on_server_shutdown_complete`].
    fn shutdown(&self);
}

pub trait ServerEventHandler {
    fn on_server_shutdown_complete(&self);
}

/// Top-level process controller, bound to the UI thread.
pub struct App {
    /// Queue of the UI thread; quit once shutdown completes
    ctx: Rc<UiContext>,
    /// Self reference handed to the subsystem as its completion handler
    this: Weak<App>,
    state: Cell<LifecycleState>,
    /// Shutdown was requested before the subsystem existed
    shutdown_latched: Cell<bool>,
    /// Present from `start` until shutdown completes
    subsystem: RefCell<Option<Rc<dyn ManagedSubsystem>>>,
}

impl App {
    pub fn new(ctx: &Rc<UiContext>) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            ctx: ctx.clone(),
            this: this.clone(),
            state: Cell::new(LifecycleState::NotStarted),
            shutdown_latched: Cell::new(false),
            subsystem: RefCell::new(None),
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    /// Create the managed subsystem with `factory`, which receives the
    /// handler the subsystem must report shutdown completion to.
    pub fn start(
        &self,
        factory: impl FnOnce(Weak<dyn ServerEventHandler>) -> Rc<dyn ManagedSubsystem>,
    ) {
        require_ui_thread!(self.ctx.guard());
        assert_eq!(
            self.state.get(),
            LifecycleState::NotStarted,
            "managed subsystem started twice"
        );

        let handler: Weak<dyn ServerEventHandler> = self.this.clone();
        *self.subsystem.borrow_mut() = Some(factory(handler));
        self.set_state(LifecycleState::Running);

        if self.shutdown_latched.replace(false) {
            info!("Shutdown was requested during startup");
            self.request_shutdown();
        }
    }

    /// Ask the subsystem to shut down. Repeated requests are ignored.
    pub fn request_shutdown(&self) {
        require_ui_thread!(self.ctx.guard());
        match self.state.get() {
            LifecycleState::NotStarted => {
                debug!("Subsystem not started yet, latching shutdown request");
                self.shutdown_latched.set(true);
            }
            LifecycleState::Running => {
                self.set_state(LifecycleState::ShutdownRequested);
                let subsystem = self.subsystem.borrow().clone();
                self.set_state(LifecycleState::ShuttingDown);
                if let Some(subsystem) = subsystem {
                    subsystem.shutdown();
                }
            }
            state => debug!("Ignoring shutdown request, already {}", state),
        }
    }

    fn set_state(&self, state: LifecycleState) {
        info!("Lifecycle: {} -> {}", self.state.get(), state);
        self.state.set(state);
    }
}

impl ServerEventHandler for App {
    fn on_server_shutdown_complete(&self) {
        require_ui_thread!(self.ctx.guard());
        if self.state.get() != LifecycleState::ShuttingDown {
            warn!(
                "Ignoring shutdown completion while {}, no shutdown was requested",
                self.state.get()
            );
            return;
        }
        self.set_state(LifecycleState::Terminated);
        self.subsystem.borrow_mut().take();
        self.ctx.quit();
    }
}
