//! Retrovice Tasks
//!
//! Single-threaded cooperative execution for UI state:
//! - Thread-affinity guards for UI-thread-only objects
//! - A FIFO task queue drained by the designated thread
//! - `Send` handles for posting work there from other threads

mod context;
mod guard;
mod message;

pub use context::{TaskPoster, UiContext};
pub use guard::ThreadGuard;
pub use message::{Anchor, AnchorId, Task};
