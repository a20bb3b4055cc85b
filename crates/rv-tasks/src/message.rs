//! Work items carried by a context's task queue.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Deferred call that may be posted from any thread.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Deferred call posted from the owning thread itself.
pub(crate) type LocalTask = Box<dyn FnOnce() + 'static>;

/// Call delivered to an anchored object, if it is still alive.
pub(crate) type AnchoredCall = Box<dyn FnOnce(&dyn Any) + Send + 'static>;

/// Registry key of an anchored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub(crate) u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Anchor({})", self.0)
    }
}

/// `Send` handle to a UI-thread object of type `T`.
///
/// Holding an anchor does not keep the object alive.
pub struct Anchor<T> {
    pub(crate) id: AnchorId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Anchor<T> {
    pub(crate) fn new(id: AnchorId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> AnchorId {
        self.id
    }
}

impl<T> Clone for Anchor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Anchor<T> {}

impl<T> fmt::Debug for Anchor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.id, std::any::type_name::<T>())
    }
}

/// Everything that travels through a context's channel.
///
/// Local tasks are not `Send`, so only their key crosses the channel; the
/// closure itself waits in the context. Keeping all kinds in one channel
/// keeps delivery FIFO across them.
pub(crate) enum Envelope {
    Task(Task),
    Local(u64),
    Anchored { anchor: AnchorId, call: AnchoredCall },
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(_) => write!(f, "Task"),
            Self::Local(key) => write!(f, "Local({key})"),
            Self::Anchored { anchor, .. } => write!(f, "Anchored({anchor})"),
        }
    }
}
