use folio_core::{Document, DocumentError, ElementId, Layout};
use folio_ui_graphics::VisualState;

/// Chainable description of one element, appended with [`mount`].
///
/// [`mount`]: Element::mount
#[must_use = "an element is only created by `mount`"]
pub(crate) struct Element<'a> {
    tag: &'static str,
    layout: Layout,
    anchor: Option<&'a str>,
    classes: Vec<&'a str>,
    attributes: Vec<(&'a str, &'a str)>,
    text: Option<String>,
    visual: Option<VisualState>,
    hidden: bool,
}

impl<'a> Element<'a> {
    pub(crate) fn new(tag: &'static str, layout: Layout) -> Self {
        Self {
            tag,
            layout,
            anchor: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            visual: None,
            hidden: false,
        }
    }

    pub(crate) fn anchor(mut self, anchor: &'a str) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub(crate) fn class(mut self, class: &'a str) -> Self {
        self.classes.push(class);
        self
    }

    pub(crate) fn attr(mut self, name: &'a str, value: &'a str) -> Self {
        self.attributes.push((name, value));
        self
    }

    pub(crate) fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub(crate) fn visual(mut self, visual: VisualState) -> Self {
        self.visual = Some(visual);
        self
    }

    pub(crate) fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Creates the element under `parent`. On error nothing is left behind.
    pub(crate) fn mount(self, document: &Document, parent: ElementId) -> Result<ElementId, DocumentError> {
        let id = document.create(self.tag, self.layout);
        match self.fill(document, id, parent) {
            Ok(()) => Ok(id),
            Err(err) => {
                if document.remove(id).is_err() {
                    log::debug!("element {id} vanished while mounting");
                }
                Err(err)
            }
        }
    }

    fn fill(self, document: &Document, id: ElementId, parent: ElementId) -> Result<(), DocumentError> {
        if let Some(anchor) = self.anchor {
            document.set_anchor(id, anchor)?;
        }
        for class in self.classes {
            document.add_class(id, class)?;
        }
        for (name, value) in self.attributes {
            document.set_attribute(id, name, value)?;
        }
        if let Some(text) = self.text {
            document.set_text(id, text)?;
        }
        if let Some(visual) = self.visual {
            document.set_visual(id, visual)?;
        }
        if self.hidden {
            document.set_hidden(id, true)?;
        }
        document.append_child(parent, id)
    }
}

/// Shorthand for a fixed-height text leaf.
pub(crate) fn text_leaf<'a>(tag: &'static str, height: f32, text: impl Into<String>) -> Element<'a> {
    Element::new(tag, Layout::fixed(height)).text(text)
}
