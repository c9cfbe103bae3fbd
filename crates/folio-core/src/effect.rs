//! Scoped teardown.
//!
//! Components collect everything they register while mounting into a
//! [`DisposerList`] and run it when they unmount.

/// Single teardown action.
pub struct Disposer {
    label: &'static str,
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Disposer {
    pub fn new(label: &'static str, cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            label,
            cleanup: Some(Box::new(cleanup)),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.run();
    }
}

/// Ordered collection of disposers.
///
/// Disposers run last-in-first-out, so a registration that depends on an
/// earlier one is torn down before it. Dropping the list disposes it.
#[derive(Default)]
pub struct DisposerList {
    disposers: Vec<Disposer>,
}

impl DisposerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, disposer: Disposer) {
        self.disposers.push(disposer);
    }

    pub fn on_dispose(&mut self, label: &'static str, cleanup: impl FnOnce() + 'static) {
        self.push(Disposer::new(label, cleanup));
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    pub fn dispose(&mut self) {
        while let Some(disposer) = self.disposers.pop() {
            log::trace!("disposing {}", disposer.label());
            disposer.dispose();
        }
    }
}

impl Drop for DisposerList {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn disposers_run_in_reverse_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = DisposerList::new();
        for label in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            list.on_dispose(label, move || log.borrow_mut().push(label));
        }
        assert_eq!(list.len(), 3);
        list.dispose();
        assert!(list.is_empty());
        assert_eq!(*log.borrow(), vec!["third", "second", "first"]);
    }

    #[test]
    fn dropping_the_list_disposes_once() {
        let count = Rc::new(RefCell::new(0));
        {
            let mut list = DisposerList::new();
            let count = Rc::clone(&count);
            list.on_dispose("counter", move || *count.borrow_mut() += 1);
        }
        assert_eq!(*count.borrow(), 1);
    }
}
