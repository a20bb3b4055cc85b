//! Termination signal forwarding
//!
//! SIGINT and SIGTERM are received on a dedicated thread. That thread never
//! touches application state: it only posts a shutdown request to the UI
//! queue, where the [`App`] handles it.

use crate::lifecycle::App;
use rv_tasks::{Anchor, TaskPoster};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use std::io;
use std::thread::{self, JoinHandle};
use tracing::info;

/// Owns the signal thread; dropping it stops and joins the thread.
pub struct SignalForwarder {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl SignalForwarder {
    pub fn spawn(poster: TaskPoster, app: Anchor<App>) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let handle = signals.handle();
        let thread = thread::Builder::new()
            .name("signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    poster.post_to(&app, move |app: &App| {
                        info!("Got signal {}, initiating shutdown", signal);
                        app.request_shutdown();
                    });
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for SignalForwarder {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{LifecycleState, ManagedSubsystem, ServerEventHandler};
    use rv_tasks::UiContext;
    use std::cell::Cell;
    use std::rc::{Rc, Weak};
    use std::time::Duration;

    struct Recorder {
        handler: Weak<dyn ServerEventHandler>,
        shutdowns: Cell<usize>,
    }

    impl ManagedSubsystem for Recorder {
        fn shutdown(&self) {
            self.shutdowns.set(self.shutdowns.get() + 1);
            if let Some(handler) = self.handler.upgrade() {
                handler.on_server_shutdown_complete();
            }
        }
    }

    #[test]
    fn test_sigterm_reaches_app() {
        let ctx = UiContext::new();
        let app = App::new(&ctx);
        let forwarder = SignalForwarder::spawn(ctx.poster(), ctx.anchor(&app)).unwrap();
        app.start(|handler| {
            let subsystem: Rc<dyn ManagedSubsystem> = Rc::new(Recorder {
                handler,
                shutdowns: Cell::new(0),
            });
            subsystem
        });

        signal_hook::low_level::raise(SIGTERM).unwrap();
        for _ in 0..500 {
            ctx.run_until_idle();
            if app.state() == LifecycleState::Terminated {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        drop(forwarder);
        assert_eq!(app.state(), LifecycleState::Terminated);
        assert!(ctx.is_quitting());
    }
}
