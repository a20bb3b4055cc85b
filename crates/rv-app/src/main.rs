//! Retrovice: browser control bar host
//!
//! Main entry point. Initializes the global allocator, loads configuration,
//! sets up logging, and runs the control bar server on the UI thread until a
//! termination signal has been handled and the server has shut down.

mod config;
mod lifecycle;
mod server;
mod signals;
mod snapshot;

use anyhow::{Context, Result};
use config::AppConfig;
use lifecycle::{App, ManagedSubsystem};
use rv_render::icons;
use rv_tasks::UiContext;
use server::Server;
use signals::SignalForwarder;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Use mimalloc as the global allocator for reduced memory fragmentation
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Queue server startup as a UI task.
///
/// Anything posted earlier, such as a shutdown request from a signal that
/// arrived first, runs before the server exists and is latched by the app.
fn post_startup(ctx: &Rc<UiContext>, app: &Rc<App>, config: AppConfig) {
    let (ctx_ref, app) = (ctx.clone(), app.clone());
    ctx.post_local(move || {
        app.start(|handler| {
            let server: Rc<dyn ManagedSubsystem> = Server::new(&ctx_ref, &config, handler);
            server
        });
        if config.auto_shutdown {
            app.request_shutdown();
        }
    });
}

fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.log_filter);

    info!("Retrovice starting...");
    info!("Using mimalloc allocator");

    icons::preload();

    let ctx = UiContext::new();
    let app = App::new(&ctx);
    let _signals = SignalForwarder::spawn(ctx.poster(), ctx.anchor(&app))
        .context("Failed to install signal handlers")?;

    post_startup(&ctx, &app, config);
    ctx.run();

    info!("Retrovice shut down ({})", app.state());
    Ok(())
}
