use folio_animation::{Easing, Target, TriggerStart, Tween};
use folio_core::{Columns, DisposerList, DocumentError, ElementId, Layout};
use folio_ui_graphics::VisualProps;

use crate::markup::{text_leaf, Element};
use crate::section::{PageEnv, Section};

pub struct About {
    root: ElementId,
    image: ElementId,
    content: ElementId,
    skills: Vec<ElementId>,
}

impl About {
    pub fn build(env: &PageEnv, parent: ElementId) -> Result<Self, DocumentError> {
        let document = env.document();
        let site = env.content();
        let root = Element::new("section", Layout::stack(48.0, 96.0))
            .anchor("about")
            .class("about")
            .mount(document, parent)?;
        let heading = Element::new("div", Layout::stack(16.0, 0.0))
            .class("section-heading")
            .mount(document, root)?;
        text_leaf("p", 20.0, "Get to know me").mount(document, heading)?;
        text_leaf("h2", 84.0, "About Me")
            .class("section-title")
            .mount(document, heading)?;

        let grid = Element::new("div", Layout::grid(Columns::responsive(1, 1, 2), 48.0))
            .class("about-grid")
            .mount(document, root)?;
        let image = Element::new("div", Layout::fixed(320.0))
            .class("about-image")
            .mount(document, grid)?;
        let alt = format!("{} - {}", site.owner.name, site.owner.role);
        Element::new("img", Layout::fixed(320.0))
            .attr("alt", &alt)
            .mount(document, image)?;

        let content = Element::new("div", Layout::stack(16.0, 0.0))
            .class("about-content")
            .mount(document, grid)?;
        text_leaf("h3", 40.0, format!("Hi There, I'm {}", site.owner.name)).mount(document, content)?;
        for paragraph in &site.owner.about {
            text_leaf("p", 120.0, paragraph.as_str()).mount(document, content)?;
        }
        let skills_grid = Element::new("div", Layout::grid(Columns::uniform(4), 16.0))
            .class("skills-grid")
            .mount(document, content)?;
        let skills = site
            .skills
            .iter()
            .map(|skill| {
                text_leaf("div", 72.0, format!("{} {}", skill.icon, skill.name))
                    .class("skill-item")
                    .class("skill-icon")
                    .mount(document, skills_grid)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root,
            image,
            content,
            skills,
        })
    }

    pub fn skill_items(&self) -> &[ElementId] {
        &self.skills
    }
}

impl Section for About {
    fn name(&self) -> &'static str {
        "about"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn setup(&self, env: &PageEnv) -> DisposerList {
        let mut context = env.animator().context(self.root, "about");

        context.animate_on_scroll(
            Tween::from_to(self.root, VisualProps::new().opacity(0.0), VisualProps::new().opacity(1.0))
                .duration(500)
                .ease(Easing::Power1Out),
            self.root,
            TriggerStart::top(80.0),
        );
        context.animate_on_scroll(
            Tween::from_to(
                self.image,
                VisualProps::new().x(-100.0).opacity(0.0).blur(10.0),
                VisualProps::new().x(0.0).opacity(1.0).blur(0.0),
            )
            .duration(1000)
            .ease(Easing::Power3Out),
            self.root,
            TriggerStart::top(70.0),
        );
        context.animate_on_scroll(
            Tween::from_to(
                self.content,
                VisualProps::new().x(100.0).opacity(0.0),
                VisualProps::new().x(0.0).opacity(1.0),
            )
            .duration(1000)
            .ease(Easing::Power3Out),
            self.root,
            TriggerStart::top(70.0),
        );
        context.animate_on_scroll(
            Tween::from_to(
                Target::class("skill-item"),
                VisualProps::new().y(30.0).opacity(0.0),
                VisualProps::new().y(0.0).opacity(1.0),
            )
            .duration(500)
            .stagger(100)
            .ease(Easing::Power3Out),
            Target::class("skills-grid"),
            TriggerStart::top(80.0),
        );

        let mut disposers = DisposerList::new();
        disposers.push(context.into_disposer());
        disposers
    }
}
