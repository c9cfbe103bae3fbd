use folio_animation::{Easing, Target, TriggerStart, Tween};
use folio_core::{Columns, DisposerList, DocumentError, ElementId, Layout};
use folio_ui_graphics::VisualProps;

use crate::markup::{text_leaf, Element};
use crate::section::{PageEnv, Section};

pub struct Footer {
    root: ElementId,
    links: Vec<(ElementId, String)>,
}

impl Footer {
    pub fn build(env: &PageEnv, parent: ElementId) -> Result<Self, DocumentError> {
        let document = env.document();
        let site = env.content();
        let root = Element::new("footer", Layout::stack(32.0, 48.0))
            .class("site-footer")
            .mount(document, parent)?;
        let content = Element::new("div", Layout::stack(24.0, 0.0))
            .class("footer-content")
            .mount(document, root)?;

        let brand = Element::new("div", Layout::stack(4.0, 0.0))
            .class("footer-brand")
            .mount(document, content)?;
        text_leaf("span", 32.0, site.owner.name.as_str()).mount(document, brand)?;
        text_leaf("p", 20.0, site.owner.role.as_str()).mount(document, brand)?;

        let nav = Element::new("nav", Layout::grid(Columns::uniform(site.nav.len().max(1)), 24.0))
            .class("footer-nav")
            .mount(document, content)?;
        let mut links = Vec::with_capacity(site.nav.len());
        for item in &site.nav {
            let link = text_leaf("button", 24.0, item.label.as_str())
                .attr("data-href", &item.href)
                .mount(document, nav)?;
            links.push((link, item.href.clone()));
        }

        let social = Element::new("div", Layout::grid(Columns::uniform(site.socials.len().max(1)), 16.0))
            .class("footer-social")
            .mount(document, content)?;
        for link in &site.socials {
            Element::new("a", Layout::fixed(24.0))
                .attr("href", &link.href)
                .attr("aria-label", &link.label)
                .mount(document, social)?;
        }

        text_leaf("p", 40.0, format!("© 2025 Made with ♥ by {}", site.owner.name))
            .class("footer-copyright")
            .mount(document, root)?;

        Ok(Self { root, links })
    }

    /// Footer navigation buttons with their anchors.
    pub fn links(&self) -> &[(ElementId, String)] {
        &self.links
    }

    pub fn navigate(&self, env: &PageEnv, href: &str) -> bool {
        env.navigate(href)
    }
}

impl Section for Footer {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn setup(&self, env: &PageEnv) -> DisposerList {
        let mut context = env.animator().context(self.root, "footer");
        context.animate_on_scroll(
            Tween::from_to(
                Target::class("footer-content"),
                VisualProps::new().y(60.0).opacity(0.0).blur(5.0),
                VisualProps::new().y(0.0).opacity(1.0).blur(0.0),
            )
            .duration(800)
            .ease(Easing::Power3Out),
            self.root,
            TriggerStart::top(95.0),
        );

        let mut disposers = DisposerList::new();
        disposers.push(context.into_disposer());
        disposers
    }
}
