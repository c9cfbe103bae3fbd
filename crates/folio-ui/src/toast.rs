//! Transient notifications.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_animation::{Animation, Animator, Position, Timeline};
use folio_core::{DocumentError, ElementId, Layout};

use crate::markup::{text_leaf, Element};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToasterConfig {
    /// Most toasts visible at once; showing another evicts the oldest.
    pub limit: usize,
    /// Auto-dismiss delay. `0` keeps toasts until dismissed.
    pub dismiss_after_millis: u64,
}

impl ToasterConfig {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_dismiss_after(mut self, millis: u64) -> Self {
        self.dismiss_after_millis = millis;
        self
    }
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            limit: 1,
            dismiss_after_millis: 5000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
}

struct Entry {
    toast: Toast,
    element: Option<ElementId>,
    timer: Option<Animation>,
}

struct ToasterInner {
    config: ToasterConfig,
    animator: Animator,
    region: Option<ElementId>,
    entries: Vec<Entry>,
    next_id: u64,
}

/// Shows toasts into an optional on-page region and dismisses them after
/// [`ToasterConfig::dismiss_after_millis`].
#[derive(Clone)]
pub struct Toaster {
    inner: Rc<RefCell<ToasterInner>>,
}

impl Toaster {
    pub fn new(animator: Animator, config: ToasterConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ToasterInner {
                config,
                animator,
                region: None,
                entries: Vec::new(),
                next_id: 1,
            })),
        }
    }

    pub fn config(&self) -> ToasterConfig {
        self.inner.borrow().config
    }

    /// Creates the region toasts are rendered into. Without one, toasts are
    /// still tracked but leave no markup.
    pub fn mount(&self, parent: ElementId) -> Result<ElementId, DocumentError> {
        let document = self.inner.borrow().animator.document().clone();
        let region = Element::new("ol", Layout::Overlay)
            .class("toast-viewport")
            .mount(&document, parent)?;
        self.inner.borrow_mut().region = Some(region);
        Ok(region)
    }

    pub fn show(&self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        let (id, evicted) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let keep = inner.config.limit.max(1) - 1;
            let excess = inner.entries.len().saturating_sub(keep);
            let evicted: Vec<Entry> = inner.entries.drain(..excess).collect();
            (id, evicted)
        };
        for entry in evicted {
            self.release(entry);
        }

        let toast = Toast {
            id,
            title: title.into(),
            description: description.into(),
        };
        log::debug!("toast {id}: {}", toast.title);
        let element = match self.render(&toast) {
            Ok(element) => element,
            Err(err) => {
                log::warn!("toast {id} could not be rendered: {err}");
                None
            }
        };
        let timer = self.schedule_dismiss(id);
        self.inner.borrow_mut().entries.push(Entry { toast, element, timer });
        id
    }

    /// Returns whether the toast was still visible.
    pub fn dismiss(&self, id: u64) -> bool {
        let entry = {
            let mut inner = self.inner.borrow_mut();
            let Some(index) = inner.entries.iter().position(|entry| entry.toast.id == id) else {
                return false;
            };
            inner.entries.remove(index)
        };
        log::debug!("toast {id} dismissed");
        self.release(entry);
        true
    }

    pub fn clear(&self) {
        let entries: Vec<Entry> = self.inner.borrow_mut().entries.drain(..).collect();
        for entry in entries {
            self.release(entry);
        }
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.toast.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn render(&self, toast: &Toast) -> Result<Option<ElementId>, DocumentError> {
        let (document, region) = {
            let inner = self.inner.borrow();
            (inner.animator.document().clone(), inner.region)
        };
        let Some(region) = region else {
            return Ok(None);
        };
        let item = Element::new("li", Layout::stack(4.0, 16.0))
            .class("toast")
            .mount(&document, region)?;
        text_leaf("div", 20.0, toast.title.as_str())
            .class("toast-title")
            .mount(&document, item)?;
        text_leaf("div", 20.0, toast.description.as_str())
            .class("toast-description")
            .mount(&document, item)?;
        Ok(Some(item))
    }

    fn schedule_dismiss(&self, id: u64) -> Option<Animation> {
        let (animator, delay) = {
            let inner = self.inner.borrow();
            (inner.animator.clone(), inner.config.dismiss_after_millis)
        };
        if delay == 0 {
            return None;
        }
        let weak: Weak<RefCell<ToasterInner>> = Rc::downgrade(&self.inner);
        let timeline = Timeline::new().call(
            move || {
                if let Some(inner) = weak.upgrade() {
                    Toaster { inner }.dismiss(id);
                }
            },
            Position::At(delay),
        );
        Some(animator.play_timeline(timeline, "toast"))
    }

    fn release(&self, entry: Entry) {
        if let Some(timer) = entry.timer {
            timer.kill();
        }
        if let Some(element) = entry.element {
            let document = self.inner.borrow().animator.document().clone();
            if document.remove(element).is_err() {
                log::debug!("toast {}: element already removed", entry.toast.id);
            }
        }
    }
}
