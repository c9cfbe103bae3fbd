use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::runtime::RuntimeHandle;

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct StateInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener_id: Cell<u64>,
    runtime: RuntimeHandle,
}

impl<T> StateInner<T> {
    fn remove_listener(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(entry, _)| *entry != id);
    }
}

/// Writable state cell with a single owner.
///
/// The owner keeps the `MutableState` and hands out [`State`] views. Writes
/// that change the value notify subscribers and request a frame.
pub struct MutableState<T: 'static> {
    inner: Rc<StateInner<T>>,
}

/// Read-only view of a [`MutableState`].
pub struct State<T: 'static> {
    inner: Rc<StateInner<T>>,
}

impl<T: 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(1),
                runtime,
            }),
        }
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn value(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value`; returns whether it differed from the previous value.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, changed) = {
            let mut current = self.inner.value.borrow_mut();
            let before = current.clone();
            let result = f(&mut current);
            let changed = *current != before;
            (result, changed)
        };
        if changed {
            self.notify();
        }
        result
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        subscribe(&self.inner, listener)
    }

    fn notify(&self) {
        self.inner.runtime.schedule();
        let value = self.value();
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            // A listener that writes back into this state re-enters `notify`
            // through `set`; a busy listener is skipped for that nested round.
            if let Ok(mut listener) = listener.try_borrow_mut() {
                listener(&value);
            }
        }
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn value(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        subscribe(&self.inner, listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

fn subscribe<T: 'static>(inner: &Rc<StateInner<T>>, listener: impl FnMut(&T) + 'static) -> Subscription {
    let id = inner.next_listener_id.get();
    inner.next_listener_id.set(id + 1);
    let listener: Listener<T> = Rc::new(RefCell::new(listener));
    inner.listeners.borrow_mut().push((id, listener));
    let weak: Weak<StateInner<T>> = Rc::downgrade(inner);
    Subscription {
        cancel: Some(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.remove_listener(id);
            }
        })),
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableState")
            .field(&*self.inner.value.borrow())
            .finish()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&*self.inner.value.borrow()).finish()
    }
}

/// Listener registration; unsubscribes when cancelled or dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
