use std::rc::Rc;

use folio_animation::{Animator, ScrollTriggers};
use folio_core::{DisposerList, Document, ElementId, RuntimeHandle, State, Viewport};
use folio_scroll::{scroll_to_anchor, ScrollController};

use crate::content::SiteContent;
use crate::toast::{Toaster, ToasterConfig};

/// Everything a section needs from the page it is mounted into.
#[derive(Clone)]
pub struct PageEnv {
    runtime: RuntimeHandle,
    document: Document,
    viewport: Viewport,
    animator: Animator,
    scroller: Rc<dyn ScrollController>,
    toaster: Toaster,
    loading: State<bool>,
    content: Rc<SiteContent>,
}

impl PageEnv {
    /// `loading` is the page's read-only loading flag; interactions are
    /// ignored while it is `true`.
    pub fn new(
        runtime: RuntimeHandle,
        document: Document,
        viewport: Viewport,
        scroller: Rc<dyn ScrollController>,
        loading: State<bool>,
    ) -> Self {
        let triggers = ScrollTriggers::new(document.clone(), viewport.clone());
        let animator = Animator::new(runtime.clone(), document.clone(), triggers);
        let toaster = Toaster::new(animator.clone(), ToasterConfig::default());
        Self {
            runtime,
            document,
            viewport,
            animator,
            scroller,
            toaster,
            loading,
            content: Rc::new(SiteContent::default()),
        }
    }

    pub fn with_content(mut self, content: SiteContent) -> Self {
        self.content = Rc::new(content);
        self
    }

    pub fn with_toaster_config(mut self, config: ToasterConfig) -> Self {
        self.toaster = Toaster::new(self.animator.clone(), config);
        self
    }

    pub fn runtime(&self) -> &RuntimeHandle {
        &self.runtime
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn triggers(&self) -> &ScrollTriggers {
        self.animator.triggers()
    }

    pub fn scroller(&self) -> &dyn ScrollController {
        self.scroller.as_ref()
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn loading(&self) -> &State<bool> {
        &self.loading
    }

    pub fn is_interactive(&self) -> bool {
        !self.loading.value()
    }

    /// Smooth-scrolls to `href`. Returns `false` when nothing was scrolled,
    /// either because the page is still loading or the anchor is unknown.
    pub fn navigate(&self, href: &str) -> bool {
        if !self.is_interactive() {
            log::debug!("navigation to {href} ignored while loading");
            return false;
        }
        scroll_to_anchor(&self.document, self.scroller.as_ref(), href)
    }

    /// Lays the document out for the current viewport and re-evaluates the
    /// scroll triggers against the new frames.
    pub fn relayout(&self) -> f32 {
        let metrics = self.viewport.metrics();
        let height = self.document.layout(metrics.width, metrics.height);
        self.triggers().refresh();
        height
    }
}

/// A mounted page section.
///
/// Markup is built by each section's constructor; `setup` registers the
/// section's animations and listeners once the page has been laid out.
pub trait Section {
    fn name(&self) -> &'static str;

    fn root(&self) -> ElementId;

    /// Registers everything the section animates or listens to. Disposing
    /// the returned list undoes all of it, newest first.
    fn setup(&self, env: &PageEnv) -> DisposerList;
}

/// A section together with the cleanup of its `setup`.
pub struct Mounted<S: Section> {
    section: S,
    disposers: DisposerList,
}

impl<S: Section> Mounted<S> {
    pub fn new(section: S, env: &PageEnv) -> Self {
        let disposers = section.setup(env);
        log::debug!("{} mounted with {} registrations", section.name(), disposers.len());
        Self { section, disposers }
    }

    pub fn section(&self) -> &S {
        &self.section
    }

    /// Registrations still waiting to be undone.
    pub fn registrations(&self) -> usize {
        self.disposers.len()
    }

    /// Reverts every registration and removes the section's markup.
    pub fn unmount(mut self, document: &Document) {
        self.disposers.dispose();
        if let Err(err) = document.remove(self.section.root()) {
            log::debug!("{}: markup already gone ({err})", self.section.name());
        }
        log::debug!("{} unmounted", self.section.name());
    }
}
