use std::cell::RefCell;
use std::rc::Rc;

use folio_animation::{Animation, Easing, Tween};
use folio_core::{Columns, DisposerList, DocumentError, ElementId, Layout, MutableState, State};
use folio_ui_graphics::VisualProps;

use crate::markup::{text_leaf, Element};
use crate::section::{PageEnv, Section};

/// Scroll offset above which the header gets its solid background.
pub const SCROLLED_THRESHOLD: f32 = 50.0;

pub fn is_scrolled(scroll_y: f32) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// Fixed header with anchor links and the mobile menu overlay.
pub struct Navbar {
    root: ElementId,
    toggle: ElementId,
    menu: ElementId,
    menu_items: Vec<ElementId>,
    links: Vec<(ElementId, String)>,
    open: Rc<MutableState<bool>>,
    scrolled: Rc<MutableState<bool>>,
    menu_animation: Rc<RefCell<Option<Animation>>>,
}

impl Navbar {
    pub fn build(env: &PageEnv, parent: ElementId) -> Result<Self, DocumentError> {
        let document = env.document();
        let site = env.content();
        let mut links = Vec::new();

        let root = Element::new("nav", Layout::Overlay)
            .class("navbar")
            .mount(document, parent)?;
        let bar = Element::new("div", Layout::grid(Columns::responsive(2, 2, 4), 24.0))
            .class("navbar-inner")
            .mount(document, root)?;
        let logo = text_leaf("a", 40.0, site.owner.name.as_str())
            .class("logo")
            .attr("href", "#hero")
            .mount(document, bar)?;
        links.push((logo, "#hero".to_string()));

        let desktop = Element::new("div", Layout::grid(Columns::uniform(site.nav.len().max(1)), 32.0))
            .class("nav-links")
            .mount(document, bar)?;
        for item in &site.nav {
            let link = text_leaf("button", 40.0, item.label.as_str())
                .class("nav-link")
                .attr("data-href", &item.href)
                .mount(document, desktop)?;
            links.push((link, item.href.clone()));
        }
        let actions = Element::new("div", Layout::grid(Columns::uniform(3), 16.0))
            .class("nav-actions")
            .mount(document, bar)?;
        for social in site.socials.iter().take(2) {
            Element::new("a", Layout::fixed(40.0))
                .attr("href", &social.href)
                .attr("aria-label", &social.label)
                .mount(document, actions)?;
        }
        let hire = text_leaf("button", 40.0, "Hire Me")
            .class("nav-cta")
            .class("glow-button")
            .attr("data-href", &site.hire_href)
            .mount(document, actions)?;
        links.push((hire, site.hire_href.clone()));
        let toggle = Element::new("button", Layout::fixed(40.0))
            .class("menu-toggle")
            .attr("aria-label", "Toggle menu")
            .mount(document, bar)?;

        let menu = Element::new("div", Layout::Overlay)
            .class("mobile-menu")
            .hidden(true)
            .mount(document, root)?;
        let column = Element::new("div", Layout::stack(32.0, 160.0))
            .mount(document, menu)?;
        let mut menu_items = Vec::new();
        for item in &site.nav {
            let button = text_leaf("button", 40.0, item.label.as_str())
                .class("mobile-nav-item")
                .attr("data-href", &item.href)
                .mount(document, column)?;
            links.push((button, item.href.clone()));
            menu_items.push(button);
        }
        let social_row = Element::new("div", Layout::grid(Columns::uniform(site.socials.len().max(1)), 24.0))
            .class("mobile-nav-item")
            .mount(document, column)?;
        for social in &site.socials {
            Element::new("a", Layout::fixed(24.0))
                .attr("href", &social.href)
                .attr("aria-label", &social.label)
                .mount(document, social_row)?;
        }
        menu_items.push(social_row);
        let menu_hire = text_leaf("button", 48.0, "Hire Me")
            .class("mobile-nav-item")
            .class("glow-button")
            .attr("data-href", &site.hire_href)
            .mount(document, column)?;
        links.push((menu_hire, site.hire_href.clone()));
        menu_items.push(menu_hire);

        let runtime = env.runtime().clone();
        Ok(Self {
            root,
            toggle,
            menu,
            menu_items,
            links,
            open: Rc::new(MutableState::with_runtime(false, runtime.clone())),
            scrolled: Rc::new(MutableState::with_runtime(false, runtime)),
            menu_animation: Rc::new(RefCell::new(None)),
        })
    }

    pub fn menu(&self) -> ElementId {
        self.menu
    }

    pub fn menu_toggle(&self) -> ElementId {
        self.toggle
    }

    pub fn menu_items(&self) -> &[ElementId] {
        &self.menu_items
    }

    /// Every clickable element that navigates, with its anchor.
    pub fn links(&self) -> &[(ElementId, String)] {
        &self.links
    }

    pub fn open_state(&self) -> State<bool> {
        self.open.as_state()
    }

    pub fn scrolled_state(&self) -> State<bool> {
        self.scrolled.as_state()
    }

    pub fn is_open(&self) -> bool {
        self.open.value()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.value()
    }

    /// The menu button. Returns the new open flag.
    pub fn toggle_menu(&self, env: &PageEnv) -> bool {
        if env.is_interactive() {
            self.open.update(|open| *open = !*open);
        }
        self.open.value()
    }

    /// Scrolls to `href` and closes the menu.
    pub fn navigate(&self, env: &PageEnv, href: &str) -> bool {
        if !env.is_interactive() {
            return false;
        }
        let scrolled = env.navigate(href);
        self.open.set(false);
        scrolled
    }

    /// Dispatches a click on one of the navbar's elements.
    pub fn click(&self, env: &PageEnv, element: ElementId) -> bool {
        if element == self.toggle {
            self.toggle_menu(env);
            return true;
        }
        match self.links.iter().find(|(link, _)| *link == element) {
            Some((_, href)) => self.navigate(env, href),
            None => false,
        }
    }
}

impl Section for Navbar {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn setup(&self, env: &PageEnv) -> DisposerList {
        let mut disposers = DisposerList::new();

        let scrolled = Rc::clone(&self.scrolled);
        let document = env.document().clone();
        let root = self.root;
        let apply_offset = move |scroll_y: f32| {
            let on = is_scrolled(scroll_y);
            if scrolled.set(on) && document.toggle_class(root, "scrolled", on).is_err() {
                log::debug!("navbar gone while scrolling");
            }
        };
        apply_offset(env.viewport().scroll_y());
        let scroll_listener = env.viewport().subscribe(move |metrics| apply_offset(metrics.scroll_y));
        disposers.on_dispose("navbar-scroll", move || drop(scroll_listener));

        let document = env.document().clone();
        let animator = env.animator().clone();
        let menu = self.menu;
        let items = self.menu_items.clone();
        let menu_animation = Rc::clone(&self.menu_animation);
        let menu_listener = self.open.subscribe(move |open| {
            let open = *open;
            if document.set_hidden(menu, !open).is_err() || document.toggle_class(menu, "open", open).is_err() {
                log::debug!("mobile menu gone");
                return;
            }
            if !open {
                return;
            }
            if let Some(previous) = menu_animation.borrow_mut().take() {
                previous.kill();
            }
            let entrance = animator.animate(
                Tween::from_to(
                    items.clone(),
                    VisualProps::new().x(-50.0).opacity(0.0),
                    VisualProps::new().x(0.0).opacity(1.0),
                )
                .duration(400)
                .stagger(100)
                .ease(Easing::Power3Out),
            );
            *menu_animation.borrow_mut() = entrance;
        });
        disposers.on_dispose("menu-listener", move || drop(menu_listener));

        let menu_animation = Rc::clone(&self.menu_animation);
        disposers.on_dispose("menu-animation", move || {
            if let Some(animation) = menu_animation.borrow_mut().take() {
                animation.revert();
            }
        });
        disposers
    }
}
