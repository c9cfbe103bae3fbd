use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_task::{ArcWake, LocalFutureObj};

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    pending_tasks: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
    local_tasks: RefCell<Vec<LocalTask>>,
}

/// Waker state shared between a spawned local future and whoever wakes it.
struct TaskWake {
    woken: AtomicBool,
    scheduler: Arc<dyn RuntimeScheduler>,
}

impl ArcWake for TaskWake {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.woken.store(true, Ordering::SeqCst);
        arc_self.scheduler.schedule_frame();
    }
}

struct LocalTask {
    future: LocalFutureObj<'static, ()>,
    wake: Arc<TaskWake>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            pending_tasks: RefCell::new(VecDeque::new()),
            local_tasks: RefCell::new(Vec::new()),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn enqueue_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.pending_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn spawn_local(&self, future: LocalFutureObj<'static, ()>) {
        let wake = Arc::new(TaskWake {
            woken: AtomicBool::new(true),
            scheduler: Arc::clone(&self.scheduler),
        });
        self.local_tasks
            .borrow_mut()
            .push(LocalTask { future, wake });
        self.schedule();
    }

    fn drain_tasks(&self) {
        let tasks: Vec<Box<dyn FnOnce() + 'static>> = {
            let mut pending = self.pending_tasks.borrow_mut();
            pending.drain(..).collect()
        };
        for task in tasks {
            task();
        }
        self.poll_local_tasks();
    }

    fn poll_local_tasks(&self) {
        // Futures may spawn more work while polled, so the list is not borrowed
        // across `poll`.
        let tasks = std::mem::take(&mut *self.local_tasks.borrow_mut());
        let mut still_pending = Vec::with_capacity(tasks.len());
        for mut task in tasks {
            if !task.wake.woken.swap(false, Ordering::SeqCst) {
                still_pending.push(task);
                continue;
            }
            let waker = futures_task::waker(Arc::clone(&task.wake));
            let mut cx = Context::from_waker(&waker);
            match Pin::new(&mut task.future).poll(&mut cx) {
                Poll::Ready(()) => {}
                Poll::Pending => still_pending.push(task),
            }
        }
        let mut slot = self.local_tasks.borrow_mut();
        still_pending.append(&mut *slot);
        *slot = still_pending;
    }

    fn has_tasks(&self) -> bool {
        !self.pending_tasks.borrow().is_empty()
            || self
                .local_tasks
                .borrow()
                .iter()
                .any(|task| task.wake.woken.load(Ordering::SeqCst))
    }

    fn local_task_count(&self) -> usize {
        self.local_tasks.borrow().len()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() && self.pending_tasks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() && !self.has_tasks() {
            self.needs_frame.set(false);
        }
    }
}

/// Owner of the UI-thread event loop state.
///
/// Dropping the last `Runtime` turns every [`RuntimeHandle`] into a no-op.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn set_needs_frame(&self, value: bool) {
        self.inner.needs_frame.set(value);
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn schedule(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.schedule();
        }
    }

    pub fn spawn_task(&self, task: Box<dyn FnOnce() + 'static>) {
        if let Some(inner) = self.0.upgrade() {
            inner.enqueue_task(task);
        } else {
            task();
        }
    }

    /// Spawns a future that is polled on the runtime thread.
    ///
    /// The future is first polled by the next [`drain_tasks`](Self::drain_tasks)
    /// and afterwards whenever its waker fires. It is dropped unpolled when the
    /// runtime is gone.
    pub fn spawn_local(&self, future: impl Future<Output = ()> + 'static) {
        if let Some(inner) = self.0.upgrade() {
            inner.spawn_local(LocalFutureObj::new(Box::pin(future)));
        } else {
            log::debug!("spawn_local on a dropped runtime; future discarded");
        }
    }

    pub fn drain_tasks(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.drain_tasks();
        }
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_tasks())
            .unwrap_or(false)
    }

    pub fn local_task_count(&self) -> usize {
        self.0
            .upgrade()
            .map(|inner| inner.local_task_count())
            .unwrap_or(0)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.0
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.0.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.0.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn needs_frame(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }
}

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}
