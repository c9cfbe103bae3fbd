//! The whole page: preloader first, then the composed sections.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use folio_animation::{Animation, Animator, Easing, Tween};
use folio_core::{
    completion, Document, DocumentError, ElementId, Layout, MutableState, RuntimeHandle, State, Viewport,
};
use folio_scroll::{ScrollBehavior, ScrollController, SmoothScrollConfig, SmoothScroller};
use folio_ui_graphics::{VisualProps, VisualState};

use crate::content::SiteContent;
use crate::markup::Element;
use crate::preloader::Preloader;
use crate::section::{Mounted, PageEnv};
use crate::sections::{About, Contact, Footer, Hero, Navbar, Projects};
use crate::toast::ToasterConfig;

/// Class the body carries until the preloader has finished.
pub const LOADING_CLASS: &str = "loading";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    pub scroll: SmoothScrollConfig,
    pub toaster: ToasterConfig,
    /// Fade-in of the content once loading is over.
    pub reveal_millis: u64,
}

impl PageConfig {
    pub fn with_scroll(mut self, scroll: SmoothScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_toaster(mut self, toaster: ToasterConfig) -> Self {
        self.toaster = toaster;
        self
    }

    pub fn with_reveal_millis(mut self, millis: u64) -> Self {
        self.reveal_millis = millis;
        self
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll: SmoothScrollConfig::default(),
            toaster: ToasterConfig::default(),
            reveal_millis: 500,
        }
    }
}

/// Owns the loading flag and every mounted part of the page.
///
/// Sections are mounted up front under a transparent content wrapper so
/// their layout (and scroll triggers) are real while the preloader runs.
/// When the preloader signals completion the loading flag flips, the
/// wrapper fades in and smooth scrolling starts.
pub struct PageComposer {
    env: PageEnv,
    loading: Rc<MutableState<bool>>,
    scroller: SmoothScroller,
    content: ElementId,
    preloader: Rc<RefCell<Preloader>>,
    reveal: Rc<RefCell<Option<Animation>>>,
    navbar: Mounted<Navbar>,
    hero: Mounted<Hero>,
    about: Mounted<About>,
    projects: Mounted<Projects>,
    contact: Mounted<Contact>,
    footer: Mounted<Footer>,
}

impl PageComposer {
    pub fn mount(
        runtime: RuntimeHandle,
        viewport: Viewport,
        site: SiteContent,
        config: PageConfig,
    ) -> Result<Self, DocumentError> {
        let document = Document::new();
        let loading = Rc::new(MutableState::with_runtime(true, runtime.clone()));
        let scroller = SmoothScroller::new(runtime.clone(), document.clone(), viewport.clone(), config.scroll);
        let env = PageEnv::new(
            runtime.clone(),
            document.clone(),
            viewport,
            Rc::new(scroller.clone()),
            loading.as_state(),
        )
        .with_content(site)
        .with_toaster_config(config.toaster);

        let body = document.root();
        document.add_class(body, LOADING_CLASS)?;

        let (on_complete, completed) = completion();
        let mut preloader = Preloader::new(&env, Some(on_complete));
        preloader.mount(&env, body)?;

        let content = Element::new("div", Layout::column())
            .class("page-content")
            .visual(VisualState {
                opacity: 0.0,
                ..VisualState::IDENTITY
            })
            .mount(&document, body)?;
        let navbar = Navbar::build(&env, content)?;
        let main = Element::new("main", Layout::column()).mount(&document, content)?;
        let hero = Hero::build(&env, main)?;
        let about = About::build(&env, main)?;
        let projects = Projects::build(&env, main)?;
        let contact = Contact::build(&env, main)?;
        let footer = Footer::build(&env, content)?;
        env.toaster().mount(body)?;

        let page_height = env.relayout();
        log::debug!("page laid out, {page_height:.0} px tall");

        let navbar = Mounted::new(navbar, &env);
        let hero = Mounted::new(hero, &env);
        let about = Mounted::new(about, &env);
        let projects = Mounted::new(projects, &env);
        let contact = Mounted::new(contact, &env);
        let footer = Mounted::new(footer, &env);

        let preloader = Rc::new(RefCell::new(preloader));
        let reveal = Rc::new(RefCell::new(None));
        let pending = Reveal {
            loading: Rc::clone(&loading),
            document,
            animator: env.animator().clone(),
            scroller: scroller.clone(),
            preloader: Rc::downgrade(&preloader),
            reveal: Rc::clone(&reveal),
            content,
            reveal_millis: config.reveal_millis,
        };
        runtime.spawn_local(async move {
            match completed.await {
                Ok(()) => pending.run(),
                Err(canceled) => log::debug!("page reveal abandoned: {canceled}"),
            }
        });

        Ok(Self {
            env,
            loading,
            scroller,
            content,
            preloader,
            reveal,
            navbar,
            hero,
            about,
            projects,
            contact,
            footer,
        })
    }

    pub fn env(&self) -> &PageEnv {
        &self.env
    }

    pub fn document(&self) -> &Document {
        self.env.document()
    }

    pub fn viewport(&self) -> &Viewport {
        self.env.viewport()
    }

    pub fn scroller(&self) -> &SmoothScroller {
        &self.scroller
    }

    pub fn is_loading(&self) -> bool {
        self.loading.value()
    }

    pub fn loading_state(&self) -> State<bool> {
        self.loading.as_state()
    }

    pub fn preloader(&self) -> Ref<'_, Preloader> {
        self.preloader.borrow()
    }

    /// The wrapper that fades in once loading is over.
    pub fn content_element(&self) -> ElementId {
        self.content
    }

    pub fn navbar(&self) -> &Navbar {
        self.navbar.section()
    }

    pub fn hero(&self) -> &Hero {
        self.hero.section()
    }

    pub fn about(&self) -> &About {
        self.about.section()
    }

    pub fn projects(&self) -> &Projects {
        self.projects.section()
    }

    pub fn contact(&self) -> &Contact {
        self.contact.section()
    }

    pub fn footer(&self) -> &Footer {
        self.footer.section()
    }

    /// Live registrations across all sections.
    pub fn registrations(&self) -> usize {
        self.navbar.registrations()
            + self.hero.registrations()
            + self.about.registrations()
            + self.projects.registrations()
            + self.contact.registrations()
            + self.footer.registrations()
    }

    /// Wheel input. Ignored while the preloader covers the page.
    pub fn wheel(&self, delta: f32) -> bool {
        if self.is_loading() {
            return false;
        }
        self.scroller.scroll_by(delta);
        true
    }

    /// Lays the page out for the new size before the viewport announces it,
    /// so scroll triggers re-evaluate against fresh frames.
    pub fn resize(&self, width: f32, height: f32) {
        self.document().layout(width, height);
        self.viewport().resize(width, height);
        let limit = self.scroller.limit();
        if self.viewport().scroll_y() > limit {
            self.scroller.scroll_to(limit, ScrollBehavior::Instant);
        }
    }

    /// Routes a click on any interactive element of the page.
    pub fn click(&self, element: ElementId) -> bool {
        let navbar = self.navbar();
        if element == navbar.menu_toggle() || navbar.links().iter().any(|(link, _)| *link == element) {
            return navbar.click(&self.env, element);
        }
        if element == self.hero().cta() {
            return self.hero().click_cta(&self.env);
        }
        if let Some((_, href)) = self.footer().links().iter().find(|(link, _)| *link == element) {
            return self.footer().navigate(&self.env, href);
        }
        if element == self.contact().submit_button() {
            return match self.contact().submit(&self.env) {
                Ok(_) => true,
                Err(err) => {
                    log::debug!("contact form not sent: {err}");
                    false
                }
            };
        }
        false
    }

    /// The clickable element under a viewport point, fixed layers first.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        let document = self.document();
        let navbar = self.navbar();
        let fixed = std::iter::once(navbar.menu_toggle()).chain(navbar.links().iter().rev().map(|(link, _)| *link));
        let flow = [self.hero().cta(), self.contact().submit_button()]
            .into_iter()
            .chain(self.footer().links().iter().map(|(link, _)| *link));
        let page_y = y + self.viewport().scroll_y();
        let under = |element: &ElementId, y: f32| {
            is_shown(document, *element)
                && document
                    .frame(*element)
                    .map(|frame| frame.contains(x, y))
                    .unwrap_or(false)
        };
        fixed
            .into_iter()
            .find(|element| under(element, y))
            .or_else(|| flow.into_iter().find(|element| under(element, page_y)))
    }

    /// Tears everything down, newest section first.
    pub fn unmount(self) {
        let document = self.env.document().clone();
        self.footer.unmount(&document);
        self.contact.unmount(&document);
        self.projects.unmount(&document);
        self.about.unmount(&document);
        self.hero.unmount(&document);
        self.navbar.unmount(&document);
        if let Some(reveal) = self.reveal.borrow_mut().take() {
            reveal.kill();
        }
        self.preloader.borrow_mut().unmount();
        self.env.toaster().clear();
        self.scroller.set_enabled(false);
        log::debug!("page unmounted, {} scroll triggers left", self.env.triggers().active_count());
    }
}

/// Whether neither `element` nor any ancestor is hidden.
fn is_shown(document: &Document, element: ElementId) -> bool {
    let mut current = Some(element);
    while let Some(id) = current {
        if document.is_hidden(id) {
            return false;
        }
        current = document.parent(id).ok().flatten();
    }
    true
}

/// What happens once the preloader is done.
struct Reveal {
    loading: Rc<MutableState<bool>>,
    document: Document,
    animator: Animator,
    scroller: SmoothScroller,
    preloader: Weak<RefCell<Preloader>>,
    reveal: Rc<RefCell<Option<Animation>>>,
    content: ElementId,
    reveal_millis: u64,
}

impl Reveal {
    fn run(self) {
        if !self.loading.set(false) {
            return;
        }
        log::debug!("loading finished, revealing page");
        if self.document.remove_class(self.document.root(), LOADING_CLASS).is_err() {
            log::debug!("body gone before reveal");
        }
        let fade = self.animator.animate(
            Tween::to(self.content, VisualProps::new().opacity(1.0))
                .duration(self.reveal_millis)
                .ease(Easing::FastOutSlowInEasing),
        );
        *self.reveal.borrow_mut() = fade;
        self.scroller.set_enabled(true);
        if let Some(preloader) = self.preloader.upgrade() {
            preloader.borrow_mut().unmount();
        }
    }
}
