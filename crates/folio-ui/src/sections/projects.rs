use folio_animation::{Easing, Target, TriggerStart, Tween};
use folio_core::{Columns, DisposerList, DocumentError, ElementId, Layout};
use folio_ui_graphics::VisualProps;

use crate::markup::{text_leaf, Element};
use crate::section::{PageEnv, Section};

pub struct Projects {
    root: ElementId,
    cards: Vec<ElementId>,
}

impl Projects {
    pub fn build(env: &PageEnv, parent: ElementId) -> Result<Self, DocumentError> {
        let document = env.document();
        let root = Element::new("section", Layout::stack(48.0, 96.0))
            .anchor("projects")
            .class("projects")
            .mount(document, parent)?;
        let title = Element::new("div", Layout::stack(16.0, 0.0))
            .class("projects-title")
            .mount(document, root)?;
        text_leaf("p", 20.0, "My Work").mount(document, title)?;
        text_leaf("h2", 84.0, "Featured Projects")
            .class("section-title")
            .mount(document, title)?;

        let grid = Element::new("div", Layout::grid(Columns::responsive(1, 2, 3), 24.0))
            .class("projects-grid")
            .mount(document, root)?;
        let mut cards = Vec::with_capacity(env.content().projects.len());
        for project in &env.content().projects {
            let card = Element::new("div", Layout::stack(12.0, 0.0))
                .class("project-card")
                .attr("data-title", &project.title)
                .mount(document, grid)?;
            Element::new("img", Layout::fixed(224.0))
                .class("project-image")
                .attr("alt", &project.title)
                .mount(document, card)?;
            text_leaf("h3", 28.0, project.title.as_str()).mount(document, card)?;
            text_leaf("p", 40.0, project.description.as_str()).mount(document, card)?;
            let tags = Element::new("div", Layout::grid(Columns::uniform(project.tags.len().max(1)), 8.0))
                .class("project-tags")
                .mount(document, card)?;
            for tag in &project.tags {
                text_leaf("span", 24.0, tag.as_str())
                    .class("project-tag")
                    .mount(document, tags)?;
            }
            cards.push(card);
        }
        Ok(Self { root, cards })
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }
}

impl Section for Projects {
    fn name(&self) -> &'static str {
        "projects"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn setup(&self, env: &PageEnv) -> DisposerList {
        let mut context = env.animator().context(self.root, "projects");

        context.animate_on_scroll(
            Tween::from_to(
                Target::class("projects-title"),
                VisualProps::new().y(50.0).opacity(0.0),
                VisualProps::new().y(0.0).opacity(1.0),
            )
            .duration(800)
            .ease(Easing::Power3Out),
            self.root,
            TriggerStart::top(80.0),
        );
        context.animate_on_scroll(
            Tween::from_to(
                Target::class("project-card"),
                VisualProps::new().y(60.0).opacity(0.0).scale(0.95),
                VisualProps::new().y(0.0).opacity(1.0).scale(1.0),
            )
            .duration(600)
            .stagger(150)
            .ease(Easing::Power3Out),
            Target::class("projects-grid"),
            TriggerStart::top(80.0),
        );

        let mut disposers = DisposerList::new();
        disposers.push(context.into_disposer());
        disposers
    }
}
