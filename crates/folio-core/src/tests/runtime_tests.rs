use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    frames: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
    }
}

fn runtime() -> (Runtime, Arc<CountingScheduler>) {
    let scheduler = Arc::new(CountingScheduler::default());
    (Runtime::new(scheduler.clone()), scheduler)
}

#[test]
fn frame_callbacks_receive_frame_time_once() {
    let (runtime, scheduler) = runtime();
    let handle = runtime.handle();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    let registration = runtime
        .frame_clock()
        .with_frame_millis(move |millis| seen_cb.borrow_mut().push(millis));
    assert!(registration.is_active());
    assert!(runtime.needs_frame());
    assert!(scheduler.frames.load(Ordering::SeqCst) >= 1);

    handle.drain_frame_callbacks(32_000_000);
    handle.drain_frame_callbacks(48_000_000);
    registration.release();

    assert_eq!(*seen.borrow(), vec![32]);
    assert!(!runtime.needs_frame());
}

#[test]
fn dropping_registration_cancels_callback() {
    let (runtime, _) = runtime();
    let fired = Rc::new(Cell::new(false));
    let fired_cb = Rc::clone(&fired);
    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_cb.set(true));
    drop(registration);
    runtime.handle().drain_frame_callbacks(16_000_000);
    assert!(!fired.get());
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let (runtime, _) = runtime();
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));
    let order_outer = Rc::clone(&order);
    let clock = runtime.frame_clock();
    let clock_inner = clock.clone();
    let inner_slot: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));
    let inner_slot_cb = Rc::clone(&inner_slot);
    let outer = clock.with_frame_millis(move |millis| {
        order_outer.borrow_mut().push(("outer", millis));
        let order_inner = Rc::clone(&order_outer);
        let registration = clock_inner.with_frame_millis(move |millis| {
            order_inner.borrow_mut().push(("inner", millis));
        });
        inner_slot_cb.borrow_mut().replace(registration);
    });
    handle.drain_frame_callbacks(16_000_000);
    outer.release();
    assert_eq!(*order.borrow(), vec![("outer", 16)]);
    handle.drain_frame_callbacks(32_000_000);
    assert_eq!(*order.borrow(), vec![("outer", 16), ("inner", 32)]);
}

#[test]
fn spawned_tasks_run_on_drain() {
    let (runtime, _) = runtime();
    let handle = runtime.handle();
    let ran = Rc::new(Cell::new(0));
    let ran_task = Rc::clone(&ran);
    handle.spawn_task(Box::new(move || ran_task.set(ran_task.get() + 1)));
    assert!(handle.has_pending_tasks());
    handle.drain_tasks();
    assert_eq!(ran.get(), 1);
    assert!(!handle.has_pending_tasks());
}

#[test]
fn tasks_on_dropped_runtime_run_inline() {
    let (runtime, _) = runtime();
    let handle = runtime.handle();
    drop(runtime);
    let ran = Rc::new(Cell::new(false));
    let ran_task = Rc::clone(&ran);
    handle.spawn_task(Box::new(move || ran_task.set(true)));
    assert!(ran.get());
    assert!(!handle.is_alive());
}

#[test]
fn local_future_resumes_when_completion_fires() {
    let (runtime, scheduler) = runtime();
    let handle = runtime.handle();
    let (sender, future) = completion();
    let outcome: Rc<RefCell<Option<Result<(), Canceled>>>> = Rc::new(RefCell::new(None));
    let outcome_task = Rc::clone(&outcome);
    handle.spawn_local(async move {
        let result = future.await;
        outcome_task.borrow_mut().replace(result);
    });
    assert_eq!(handle.local_task_count(), 1);

    handle.drain_tasks();
    assert!(outcome.borrow().is_none());
    assert!(!handle.has_pending_tasks());

    let frames_before = scheduler.frames.load(Ordering::SeqCst);
    sender.fire();
    assert!(scheduler.frames.load(Ordering::SeqCst) > frames_before);
    assert!(handle.has_pending_tasks());

    handle.drain_tasks();
    assert_eq!(*outcome.borrow(), Some(Ok(())));
    assert_eq!(handle.local_task_count(), 0);
}

#[test]
fn state_notifies_only_on_change() {
    let (runtime, _) = runtime();
    let state = MutableState::with_runtime(0, runtime.handle());
    let view = state.as_state();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = Rc::clone(&seen);
    let subscription = view.subscribe(move |value| seen_cb.borrow_mut().push(*value));

    assert!(state.set(1));
    assert!(!state.set(1));
    state.update(|value| *value += 1);
    assert_eq!(view.value(), 2);
    assert_eq!(*seen.borrow(), vec![1, 2]);

    drop(subscription);
    assert_eq!(view.subscriber_count(), 0);
    state.set(5);
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn viewport_reports_scroll_changes() {
    let (runtime, _) = runtime();
    let viewport = Viewport::new(ViewportMetrics::default(), runtime.handle());
    let offsets = Rc::new(RefCell::new(Vec::new()));
    let offsets_cb = Rc::clone(&offsets);
    let _subscription = viewport.subscribe(move |metrics| offsets_cb.borrow_mut().push(metrics.scroll_y));
    assert!(viewport.set_scroll_y(120.0));
    assert!(!viewport.set_scroll_y(120.0));
    viewport.resize(375.0, 700.0);
    assert!(viewport.is_mobile());
    assert_eq!(*offsets.borrow(), vec![120.0, 120.0]);
}
