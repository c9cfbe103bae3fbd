//! Element tree standing in for the page DOM.
//!
//! Elements live in a slot table addressed by [`ElementId`]; freed slots are
//! reused. The tree is owned by the UI thread and shared through the cheap
//! [`Document`] handle.

use std::cell::RefCell;
use std::rc::Rc;

use folio_ui_graphics::{Rect, Size, VisualState};
use indexmap::{IndexMap, IndexSet};

use crate::collections::map::HashMap;
use crate::layout::{self, Layout};

pub type ElementId = usize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("element {id} missing")]
    Missing { id: ElementId },
    #[error("element {id} already has a parent")]
    AlreadyAttached { id: ElementId },
    #[error("element {child} cannot be placed inside {parent}")]
    Cycle { parent: ElementId, child: ElementId },
}

pub(crate) struct ElementData {
    pub(crate) tag: &'static str,
    pub(crate) anchor: Option<String>,
    pub(crate) classes: IndexSet<String>,
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) layout: Layout,
    pub(crate) frame: Rect,
    pub(crate) visual: VisualState,
    pub(crate) hidden: bool,
}

impl ElementData {
    fn new(tag: &'static str, layout: Layout) -> Self {
        Self {
            tag,
            anchor: None,
            classes: IndexSet::new(),
            attributes: IndexMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
            layout,
            frame: Rect::default(),
            visual: VisualState::IDENTITY,
            hidden: false,
        }
    }
}

pub(crate) struct DocumentInner {
    pub(crate) slots: Vec<Option<ElementData>>,
    free: Vec<ElementId>,
    anchors: HashMap<String, ElementId>,
    pub(crate) root: ElementId,
    pub(crate) viewport: Size,
}

impl DocumentInner {
    pub(crate) fn get(&self, id: ElementId) -> Result<&ElementData, DocumentError> {
        self.slots
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(DocumentError::Missing { id })
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Result<&mut ElementData, DocumentError> {
        self.slots
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or(DocumentError::Missing { id })
    }

    fn insert(&mut self, data: ElementData) -> ElementId {
        if let Some(id) = self.free.pop() {
            self.slots[id] = Some(data);
            id
        } else {
            self.slots.push(Some(data));
            self.slots.len() - 1
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.get(id).ok().and_then(|data| data.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn collect_subtree(&self, id: ElementId, out: &mut Vec<ElementId>) {
        if let Ok(data) = self.get(id) {
            out.push(id);
            for child in &data.children {
                self.collect_subtree(*child, out);
            }
        }
    }
}

/// Shared handle to the element tree.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only the `body` element.
    pub fn new() -> Self {
        let mut inner = DocumentInner {
            slots: Vec::new(),
            free: Vec::new(),
            anchors: HashMap::default(),
            root: 0,
            viewport: Size::ZERO,
        };
        inner.root = inner.insert(ElementData::new("body", Layout::column()));
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn root(&self) -> ElementId {
        self.inner.borrow().root
    }

    /// Creates a detached element.
    pub fn create(&self, tag: &'static str, layout: Layout) -> ElementId {
        self.inner.borrow_mut().insert(ElementData::new(tag, layout))
    }

    pub fn append_child(&self, parent: ElementId, child: ElementId) -> Result<(), DocumentError> {
        let mut inner = self.inner.borrow_mut();
        inner.get(parent)?;
        if inner.get(child)?.parent.is_some() {
            return Err(DocumentError::AlreadyAttached { id: child });
        }
        if inner.is_ancestor(child, parent) {
            return Err(DocumentError::Cycle { parent, child });
        }
        inner.get_mut(child)?.parent = Some(parent);
        inner.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Removes `id` and its whole subtree, releasing their slots.
    pub fn remove(&self, id: ElementId) -> Result<(), DocumentError> {
        let mut inner = self.inner.borrow_mut();
        let parent = inner.get(id)?.parent;
        if let Some(parent) = parent {
            if let Ok(parent) = inner.get_mut(parent) {
                parent.children.retain(|child| *child != id);
            }
        }
        let mut doomed = Vec::new();
        inner.collect_subtree(id, &mut doomed);
        for element in doomed {
            if let Some(data) = inner.slots[element].take() {
                if let Some(anchor) = data.anchor {
                    if inner.anchors.get(&anchor) == Some(&element) {
                        inner.anchors.remove(&anchor);
                    }
                }
                inner.free.push(element);
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.borrow().get(id).is_ok()
    }

    pub fn element_count(&self) -> usize {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    pub fn tag(&self, id: ElementId) -> Result<&'static str, DocumentError> {
        Ok(self.inner.borrow().get(id)?.tag)
    }

    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>, DocumentError> {
        Ok(self.inner.borrow().get(id)?.parent)
    }

    pub fn children(&self, id: ElementId) -> Result<Vec<ElementId>, DocumentError> {
        Ok(self.inner.borrow().get(id)?.children.clone())
    }

    /// Registers `anchor` (without the leading `#`) as the element's id attribute.
    pub fn set_anchor(&self, id: ElementId, anchor: &str) -> Result<(), DocumentError> {
        let mut inner = self.inner.borrow_mut();
        let anchor = anchor.trim_start_matches('#').to_string();
        let previous = inner.get_mut(id)?.anchor.replace(anchor.clone());
        if let Some(previous) = previous {
            inner.anchors.remove(&previous);
        }
        inner.anchors.insert(anchor, id);
        Ok(())
    }

    pub fn anchor(&self, id: ElementId) -> Result<Option<String>, DocumentError> {
        Ok(self.inner.borrow().get(id)?.anchor.clone())
    }

    /// Resolves `#name` (or `name`) to the element carrying that anchor.
    pub fn query_anchor(&self, href: &str) -> Option<ElementId> {
        let inner = self.inner.borrow();
        inner.anchors.get(href.trim_start_matches('#')).copied()
    }

    pub fn add_class(&self, id: ElementId, class: &str) -> Result<(), DocumentError> {
        self.inner
            .borrow_mut()
            .get_mut(id)?
            .classes
            .insert(class.to_string());
        Ok(())
    }

    pub fn remove_class(&self, id: ElementId, class: &str) -> Result<(), DocumentError> {
        self.inner
            .borrow_mut()
            .get_mut(id)?
            .classes
            .shift_remove(class);
        Ok(())
    }

    pub fn toggle_class(&self, id: ElementId, class: &str, on: bool) -> Result<(), DocumentError> {
        if on {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.inner
            .borrow()
            .get(id)
            .map(|data| data.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn classes(&self, id: ElementId) -> Result<Vec<String>, DocumentError> {
        Ok(self.inner.borrow().get(id)?.classes.iter().cloned().collect())
    }

    /// Descendants of `scope` carrying `class`, in document order.
    pub fn query_class(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let mut subtree = Vec::new();
        inner.collect_subtree(scope, &mut subtree);
        subtree
            .into_iter()
            .skip(1)
            .filter(|id| {
                inner
                    .get(*id)
                    .map(|data| data.classes.contains(class))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn set_attribute(&self, id: ElementId, name: &str, value: &str) -> Result<(), DocumentError> {
        self.inner
            .borrow_mut()
            .get_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .get(id)
            .ok()
            .and_then(|data| data.attributes.get(name).cloned())
    }

    pub fn set_text(&self, id: ElementId, text: impl Into<String>) -> Result<(), DocumentError> {
        self.inner.borrow_mut().get_mut(id)?.text = Some(text.into());
        Ok(())
    }

    pub fn text(&self, id: ElementId) -> Option<String> {
        self.inner
            .borrow()
            .get(id)
            .ok()
            .and_then(|data| data.text.clone())
    }

    pub fn visual(&self, id: ElementId) -> Result<VisualState, DocumentError> {
        Ok(self.inner.borrow().get(id)?.visual)
    }

    pub fn set_visual(&self, id: ElementId, visual: VisualState) -> Result<(), DocumentError> {
        self.inner.borrow_mut().get_mut(id)?.visual = visual;
        Ok(())
    }

    pub fn update_visual(
        &self,
        id: ElementId,
        f: impl FnOnce(&mut VisualState),
    ) -> Result<(), DocumentError> {
        f(&mut self.inner.borrow_mut().get_mut(id)?.visual);
        Ok(())
    }

    pub fn set_hidden(&self, id: ElementId, hidden: bool) -> Result<(), DocumentError> {
        self.inner.borrow_mut().get_mut(id)?.hidden = hidden;
        Ok(())
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.inner
            .borrow()
            .get(id)
            .map(|data| data.hidden)
            .unwrap_or(true)
    }

    pub fn set_layout(&self, id: ElementId, layout: Layout) -> Result<(), DocumentError> {
        self.inner.borrow_mut().get_mut(id)?.layout = layout;
        Ok(())
    }

    /// Page-coordinate frame from the most recent [`layout`](Self::layout) pass.
    pub fn frame(&self, id: ElementId) -> Result<Rect, DocumentError> {
        Ok(self.inner.borrow().get(id)?.frame)
    }

    /// Lays the tree out for the given viewport and returns the page height.
    pub fn layout(&self, viewport_width: f32, viewport_height: f32) -> f32 {
        let mut inner = self.inner.borrow_mut();
        inner.viewport = Size::new(viewport_width, viewport_height);
        layout::compute(&mut inner)
    }

    pub fn page_height(&self) -> f32 {
        let inner = self.inner.borrow();
        inner
            .get(inner.root)
            .map(|root| root.frame.height)
            .unwrap_or(0.0)
    }
}
