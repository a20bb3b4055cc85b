//! UI context - the designated thread's task queue.

use crate::guard::ThreadGuard;
use crate::message::{Anchor, AnchorId, AnchoredCall, Envelope, LocalTask};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, info, trace};

/// Cloneable, `Send` handle for posting work to a [`UiContext`].
#[derive(Clone)]
pub struct TaskPoster {
    tx: Sender<Envelope>,
}

impl TaskPoster {
    /// Queue `task` to run on the context's thread.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.send(Envelope::Task(Box::new(task)));
    }

    /// Queue a call on the anchored object.
    ///
    /// The call is dropped unrun if the object has been released by the
    /// time the task comes up.
    pub fn post_to<T: 'static>(&self, anchor: &Anchor<T>, call: impl FnOnce(&T) + Send + 'static) {
        let call: AnchoredCall = Box::new(move |target: &dyn Any| {
            if let Some(target) = target.downcast_ref::<T>() {
                call(target);
            }
        });
        self.send(Envelope::Anchored {
            anchor: anchor.id,
            call,
        });
    }

    fn send(&self, envelope: Envelope) {
        if let Err(e) = self.tx.send(envelope) {
            debug!("UI context gone, dropping {:?}", e.into_inner());
        }
    }
}

/// FIFO task queue drained by exactly one thread.
///
/// Created on the thread it serves; every method that touches local state
/// asserts it runs there.
pub struct UiContext {
    /// Identity of the thread this context serves
    guard: ThreadGuard,
    /// Sending half kept so the channel never closes while the context lives
    poster: TaskPoster,
    rx: Receiver<Envelope>,
    /// Non-`Send` closures waiting for their key to come up in the channel
    local_tasks: RefCell<HashMap<u64, LocalTask>>,
    next_local: Cell<u64>,
    /// Objects reachable through an [`Anchor`], held without ownership
    anchors: RefCell<HashMap<AnchorId, Weak<dyn Any>>>,
    next_anchor: Cell<u64>,
    /// Set by [`quit`](Self::quit), checked between tasks
    quit: Cell<bool>,
}

impl UiContext {
    /// Create a context bound to the calling thread.
    pub fn new() -> Rc<Self> {
        let (tx, rx) = unbounded();
        let guard = ThreadGuard::current();
        info!("UI context bound to {:?}", std::thread::current().id());

        Rc::new(Self {
            guard,
            poster: TaskPoster { tx },
            rx,
            local_tasks: RefCell::new(HashMap::new()),
            next_local: Cell::new(0),
            anchors: RefCell::new(HashMap::new()),
            next_anchor: Cell::new(0),
            quit: Cell::new(false),
        })
    }

    pub fn guard(&self) -> ThreadGuard {
        self.guard
    }

    /// Handle other threads use to post here
    pub fn poster(&self) -> TaskPoster {
        self.poster.clone()
    }

    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.poster.post(task);
    }

    /// Queue a non-`Send` task from the UI thread itself.
    pub fn post_local(&self, task: impl FnOnce() + 'static) {
        self.guard.check();
        let key = self.next_local.get();
        self.next_local.set(key + 1);
        self.local_tasks.borrow_mut().insert(key, Box::new(task));
        self.poster.send(Envelope::Local(key));
    }

    /// Register `target` so other threads can post calls to it.
    pub fn anchor<T: 'static>(&self, target: &Rc<T>) -> Anchor<T> {
        self.guard.check();
        let id = AnchorId(self.next_anchor.get());
        self.next_anchor.set(id.0 + 1);
        let weak: Weak<T> = Rc::downgrade(target);
        let weak: Weak<dyn Any> = weak;

        let mut anchors = self.anchors.borrow_mut();
        anchors.retain(|_, target| target.strong_count() > 0);
        anchors.insert(id, weak);
        Anchor::new(id)
    }

    /// Stop [`run`](Self::run) once the current task returns.
    pub fn quit(&self) {
        self.guard.check();
        debug!("UI loop quit requested");
        self.quit.set(true);
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.get()
    }

    /// Execute tasks as they arrive until [`quit`](Self::quit) is called.
    pub fn run(&self) {
        self.guard.check();
        info!("UI loop running");
        while !self.quit.get() {
            // The context holds a sender itself, so the channel never closes.
            let Ok(envelope) = self.rx.recv() else { break };
            self.dispatch(envelope);
        }
        info!("UI loop stopped");
    }

    /// Execute every queued task, including ones queued meanwhile.
    ///
    /// Returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        self.guard.check();
        let mut ran = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            self.dispatch(envelope);
            ran += 1;
        }
        ran
    }

    fn dispatch(&self, envelope: Envelope) {
        trace!("Dispatching {:?}", envelope);
        match envelope {
            Envelope::Task(task) => task(),
            Envelope::Local(key) => {
                let task = self.local_tasks.borrow_mut().remove(&key);
                if let Some(task) = task {
                    task();
                }
            }
            Envelope::Anchored { anchor, call } => {
                let target = self.anchors.borrow().get(&anchor).and_then(Weak::upgrade);
                match target {
                    Some(target) => call(&*target),
                    None => {
                        debug!("{} released, dropping call", anchor);
                        self.anchors.borrow_mut().remove(&anchor);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn test_each_task_kind_runs() {
        let ctx = UiContext::new();
        let shared = Arc::new(Mutex::new(Vec::new()));
        let local = Rc::new(RefCell::new(Vec::new()));
        let target = Rc::new(RefCell::new(Vec::<u32>::new()));
        let anchor = ctx.anchor(&target);

        let s = shared.clone();
        ctx.post(move || s.lock().unwrap().push(1));
        let l = local.clone();
        ctx.post_local(move || l.borrow_mut().push(2));
        ctx.poster().post_to(&anchor, |t: &RefCell<Vec<u32>>| t.borrow_mut().push(3));

        assert_eq!(ctx.run_until_idle(), 3);
        assert_eq!(*shared.lock().unwrap(), vec![1]);
        assert_eq!(*local.borrow(), vec![2]);
        assert_eq!(*target.borrow(), vec![3]);
        assert_eq!(ctx.run_until_idle(), 0);
    }

    #[test]
    fn test_interleaved_order() {
        let ctx = UiContext::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let local_seen = seen.clone();
        let anchored = Rc::new(());
        let anchor = ctx.anchor(&anchored);

        for i in 0..3 {
            let s = seen.clone();
            ctx.post(move || s.lock().unwrap().push(format!("task{i}")));
            let s = local_seen.clone();
            ctx.post_local(move || s.lock().unwrap().push(format!("local{i}")));
            let s = seen.clone();
            ctx.poster()
                .post_to(&anchor, move |_: &()| s.lock().unwrap().push(format!("anchored{i}")));
        }

        ctx.run_until_idle();
        let expected: Vec<String> = (0..3)
            .flat_map(|i| [format!("task{i}"), format!("local{i}"), format!("anchored{i}")])
            .collect();
        assert_eq!(*seen.lock().unwrap(), expected);
    }

    #[test]
    fn test_post_from_other_thread() {
        let ctx = UiContext::new();
        let counter = Rc::new(Cell::new(0));
        let anchor = ctx.anchor(&counter);
        let poster = ctx.poster();

        thread::spawn(move || {
            for _ in 0..10 {
                poster.post_to(&anchor, |c: &Cell<i32>| c.set(c.get() + 1));
            }
        })
        .join()
        .unwrap();

        assert_eq!(ctx.run_until_idle(), 10);
        assert_eq!(counter.get(), 10);
    }

    #[test]
    fn test_released_anchor_drops_call() {
        let ctx = UiContext::new();
        let target = Rc::new(Cell::new(false));
        let anchor = ctx.anchor(&target);
        let observer = Rc::downgrade(&target);
        drop(target);

        ctx.poster().post_to(&anchor, |t: &Cell<bool>| t.set(true));
        assert_eq!(ctx.run_until_idle(), 1);
        assert!(observer.upgrade().is_none());
    }

    #[test]
    fn test_released_anchors_are_pruned() {
        let ctx = UiContext::new();
        for _ in 0..5 {
            let target = Rc::new(0u8);
            ctx.anchor(&target);
        }
        let kept = Rc::new(1u8);
        ctx.anchor(&kept);

        assert_eq!(ctx.anchors.borrow().len(), 1);
    }

    #[test]
    fn test_released_anchor_entry_removed_after_call() {
        let ctx = UiContext::new();
        let target = Rc::new(Cell::new(0));
        let anchor = ctx.anchor(&target);
        drop(target);

        ctx.poster().post_to(&anchor, |t: &Cell<i32>| t.set(1));
        ctx.run_until_idle();
        assert!(ctx.anchors.borrow().is_empty());
    }

    #[test]
    fn test_tasks_posted_while_draining_run() {
        let ctx = UiContext::new();
        let hits = Rc::new(Cell::new(0));
        let inner_ctx = ctx.clone();
        let h = hits.clone();
        ctx.post_local(move || {
            h.set(h.get() + 1);
            let h = h.clone();
            inner_ctx.post_local(move || h.set(h.get() + 1));
        });

        assert_eq!(ctx.run_until_idle(), 2);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_run_until_quit() {
        let ctx = UiContext::new();
        let ran_after_quit = Rc::new(Cell::new(false));

        let quit_ctx = ctx.clone();
        ctx.post_local(move || quit_ctx.quit());
        let flag = ran_after_quit.clone();
        ctx.post_local(move || flag.set(true));

        ctx.run();
        assert!(ctx.is_quitting());
        assert!(!ran_after_quit.get());
        assert_eq!(ctx.run_until_idle(), 1);
        assert!(ran_after_quit.get());
    }
}
