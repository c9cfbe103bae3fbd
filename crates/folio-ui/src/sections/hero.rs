use folio_animation::{Easing, Position, Repeat, Target, Timeline, Tween};
use folio_core::{DisposerList, DocumentError, ElementId, Layout};
use folio_ui_graphics::VisualProps;

use crate::markup::{text_leaf, Element};
use crate::section::{PageEnv, Section};

pub const ORB_COUNT: usize = 3;

/// Full-screen intro: headline, subtitle, call to action and floating orbs
/// in front of the embedded 3D scene.
pub struct Hero {
    root: ElementId,
    headline: ElementId,
    subtitle: ElementId,
    cta: ElementId,
}

impl Hero {
    pub fn build(env: &PageEnv, parent: ElementId) -> Result<Self, DocumentError> {
        let document = env.document();
        let content = env.content();
        let root = Element::new("section", Layout::screen())
            .anchor("hero")
            .class("hero")
            .mount(document, parent)?;
        Element::new("iframe", Layout::Overlay)
            .class("hero-scene")
            .attr("src", &content.scene_url)
            .attr("title", "3D Orb Scene")
            .mount(document, root)?;
        for _ in 0..ORB_COUNT {
            Element::new("div", Layout::Overlay)
                .class("hero-orb")
                .class("floating-orb")
                .mount(document, root)?;
        }
        let column = Element::new("div", Layout::stack(24.0, 160.0))
            .class("hero-content")
            .mount(document, root)?;
        text_leaf("p", 24.0, content.owner.role.as_str())
            .class("hero-role")
            .mount(document, column)?;
        let headline = text_leaf(
            "h1",
            160.0,
            format!("Hi, I'm {}\n{}", content.owner.name, content.owner.role),
        )
        .class("hero-headline")
        .mount(document, column)?;
        let subtitle = text_leaf("p", 60.0, content.owner.tagline.as_str())
            .class("hero-subtitle")
            .mount(document, column)?;
        let cta = text_leaf("button", 56.0, "Hire Me")
            .class("hero-cta")
            .class("glow-button")
            .attr("data-href", &content.hire_href)
            .mount(document, column)?;
        Ok(Self {
            root,
            headline,
            subtitle,
            cta,
        })
    }

    pub fn cta(&self) -> ElementId {
        self.cta
    }

    /// "Hire Me": scrolls to the contact section.
    pub fn click_cta(&self, env: &PageEnv) -> bool {
        env.navigate(&env.content().hire_href)
    }
}

impl Section for Hero {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn setup(&self, env: &PageEnv) -> DisposerList {
        let mut context = env.animator().context(self.root, "hero");

        context.timeline(
            Timeline::new()
                .delay(200)
                .then(
                    Tween::from_to(
                        self.headline,
                        VisualProps::new().y(50.0).opacity(0.0).blur(10.0),
                        VisualProps::new().y(0.0).opacity(1.0).blur(0.0),
                    )
                    .duration(1000)
                    .ease(Easing::Power3Out),
                )
                .add(
                    Tween::from_to(
                        self.subtitle,
                        VisualProps::new().y(30.0).opacity(0.0),
                        VisualProps::new().y(0.0).opacity(1.0),
                    )
                    .duration(800)
                    .ease(Easing::Power3Out),
                    Position::Offset(-500),
                )
                .add(
                    Tween::from_to(
                        self.cta,
                        VisualProps::new().y(20.0).opacity(0.0).scale(0.9),
                        VisualProps::new().y(0.0).opacity(1.0).scale(1.0),
                    )
                    .duration(600)
                    .ease(Easing::BackOut(1.7)),
                    Position::Offset(-300),
                ),
        );

        context.animate(
            Tween::to(Target::class("hero-orb"), VisualProps::new().y(-20.0))
                .duration(3000)
                .ease(Easing::Power1InOut)
                .repeat(Repeat::Infinite)
                .yoyo(true)
                .stagger(500),
        );

        let mut disposers = DisposerList::new();
        disposers.push(context.into_disposer());
        disposers
    }
}
