use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::{Document, ElementId, Subscription, Viewport};

pub type TriggerId = u64;

/// Scroll position at which a trigger fires: when the trigger element's top
/// edge reaches `viewport_fraction` of the viewport height (`"top 80%"`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerStart {
    pub viewport_fraction: f32,
}

impl TriggerStart {
    /// `top <percent>%`.
    pub fn top(percent: f32) -> Self {
        Self {
            viewport_fraction: percent / 100.0,
        }
    }

    /// Parses the `"top 80%"` form.
    #[cfg(test)]
    pub(crate) fn parse(source: &str) -> Option<Self> {
        let mut parts = source.split_whitespace();
        if parts.next()? != "top" {
            return None;
        }
        let percent = parts.next()?.strip_suffix('%')?.parse::<f32>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::top(percent))
    }

    /// Whether an element whose top edge is at page offset `element_top` has
    /// crossed the start line.
    pub fn is_crossed(&self, element_top: f32, scroll_y: f32, viewport_height: f32) -> bool {
        element_top - scroll_y <= self.viewport_fraction * viewport_height
    }
}

impl Default for TriggerStart {
    fn default() -> Self {
        Self::top(80.0)
    }
}

struct TriggerEntry {
    id: TriggerId,
    element: ElementId,
    start: TriggerStart,
    on_enter: Box<dyn FnOnce()>,
}

struct TriggersInner {
    document: Document,
    viewport: Viewport,
    entries: Vec<TriggerEntry>,
    next_id: TriggerId,
    subscription: Option<Subscription>,
}

/// Registry of one-shot scroll triggers.
///
/// Every trigger is checked when it is registered and again on each
/// viewport change; it fires at most once and is then dropped.
#[derive(Clone)]
pub struct ScrollTriggers {
    inner: Rc<RefCell<TriggersInner>>,
}

impl ScrollTriggers {
    pub fn new(document: Document, viewport: Viewport) -> Self {
        let inner = Rc::new(RefCell::new(TriggersInner {
            document,
            viewport: viewport.clone(),
            entries: Vec::new(),
            next_id: 1,
            subscription: None,
        }));
        let weak: Weak<RefCell<TriggersInner>> = Rc::downgrade(&inner);
        let subscription = viewport.subscribe(move |_| {
            if let Some(inner) = weak.upgrade() {
                ScrollTriggers { inner }.refresh();
            }
        });
        inner.borrow_mut().subscription = Some(subscription);
        Self { inner }
    }

    /// Registers `on_enter` to run once `element` crosses `start`.
    ///
    /// Runs it right away when the element is already past the line.
    pub fn register(
        &self,
        element: ElementId,
        start: TriggerStart,
        on_enter: impl FnOnce() + 'static,
    ) -> TriggerId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(TriggerEntry {
                id,
                element,
                start,
                on_enter: Box::new(on_enter),
            });
            id
        };
        self.refresh();
        id
    }

    /// Removes a pending trigger. Returns `false` if it already fired.
    pub fn remove(&self, id: TriggerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.id != id);
        inner.entries.len() != before
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_active(&self, id: TriggerId) -> bool {
        self.inner.borrow().entries.iter().any(|entry| entry.id == id)
    }

    /// Fires every trigger whose start line has been crossed, in
    /// registration order.
    pub fn refresh(&self) {
        let fired = {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                return;
            };
            let metrics = inner.viewport.metrics();
            let entries = std::mem::take(&mut inner.entries);
            let mut fired = Vec::new();
            for entry in entries {
                match inner.document.frame(entry.element) {
                    Ok(frame) => {
                        if entry.start.is_crossed(frame.top(), metrics.scroll_y, metrics.height) {
                            fired.push(entry);
                        } else {
                            inner.entries.push(entry);
                        }
                    }
                    Err(err) => log::debug!("scroll trigger {} dropped: {err}", entry.id),
                }
            }
            fired
        };
        for entry in fired {
            log::trace!("scroll trigger {} entered", entry.id);
            (entry.on_enter)();
        }
    }
}

impl fmt::Debug for ScrollTriggers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollTriggers")
            .field("active", &self.active_count())
            .finish()
    }
}
