use std::cell::RefCell;
use std::rc::Rc;

use folio_animation::{Animation, Easing, Repeat, Target, TriggerStart, Tween};
use folio_core::{Columns, DisposerList, DocumentError, ElementId, Layout, MutableState, State};
use folio_ui_graphics::VisualProps;

use crate::form::{ContactFields, FormError, FormField};
use crate::markup::{text_leaf, Element};
use crate::section::{PageEnv, Section};

pub const TOAST_TITLE: &str = "Message sent!";
pub const TOAST_DESCRIPTION: &str = "Thanks for reaching out. I'll get back to you soon!";

pub struct Contact {
    root: ElementId,
    form: ElementId,
    submit: ElementId,
    inputs: [ElementId; 3],
    fields: Rc<MutableState<ContactFields>>,
    pulse: Rc<RefCell<Option<Animation>>>,
}

impl Contact {
    pub fn build(env: &PageEnv, parent: ElementId) -> Result<Self, DocumentError> {
        let document = env.document();
        let site = env.content();
        let root = Element::new("section", Layout::stack(48.0, 96.0))
            .anchor("contact")
            .class("contact")
            .mount(document, parent)?;
        let title = Element::new("div", Layout::stack(16.0, 0.0))
            .class("contact-title")
            .mount(document, root)?;
        text_leaf("p", 20.0, "Get In Touch").mount(document, title)?;
        text_leaf("h2", 84.0, "Let's Connect")
            .class("section-title")
            .mount(document, title)?;
        text_leaf("p", 24.0, "Have a project in mind or just want to say hello? Drop me a message!")
            .mount(document, title)?;

        let grid = Element::new("div", Layout::grid(Columns::responsive(1, 1, 2), 48.0))
            .class("contact-grid")
            .mount(document, root)?;

        let form = Element::new("form", Layout::stack(24.0, 0.0))
            .class("contact-form")
            .mount(document, grid)?;
        let mut inputs = [0; 3];
        for (slot, field) in inputs.iter_mut().zip(FormField::ALL) {
            let (height, tag, kind) = match field {
                FormField::Name => (88.0, "input", "text"),
                FormField::Email => (88.0, "input", "email"),
                FormField::Message => (160.0, "textarea", "text"),
            };
            let wrapper = Element::new("div", Layout::stack(8.0, 0.0))
                .class("form-field")
                .mount(document, form)?;
            text_leaf("label", 20.0, field.label()).mount(document, wrapper)?;
            *slot = Element::new(tag, Layout::fixed(height - 28.0))
                .attr("name", field.key())
                .attr("type", kind)
                .attr("required", "true")
                .attr("placeholder", field.placeholder())
                .attr("value", "")
                .mount(document, wrapper)?;
        }
        let submit = text_leaf("button", 56.0, "Send Message")
            .class("submit-btn")
            .class("glow-button")
            .attr("type", "submit")
            .mount(document, form)?;

        let info = Element::new("div", Layout::stack(24.0, 0.0))
            .class("contact-info")
            .mount(document, grid)?;
        for (heading, value) in [
            ("Email", &site.contact.email),
            ("Phone", &site.contact.phone),
            ("Location", &site.contact.location),
        ] {
            let item = Element::new("div", Layout::stack(4.0, 16.0))
                .class("contact-info-item")
                .mount(document, info)?;
            text_leaf("h4", 24.0, heading).mount(document, item)?;
            text_leaf("p", 32.0, value.as_str()).mount(document, item)?;
        }
        let socials = Element::new("div", Layout::stack(16.0, 0.0))
            .class("social-icons")
            .mount(document, info)?;
        text_leaf("p", 20.0, "Connect with me").mount(document, socials)?;
        let row = Element::new("div", Layout::grid(Columns::uniform(site.socials.len().max(1)), 16.0))
            .mount(document, socials)?;
        for social in &site.socials {
            Element::new("a", Layout::fixed(48.0))
                .class("social-icon")
                .attr("href", &social.href)
                .attr("aria-label", &social.label)
                .mount(document, row)?;
        }

        Ok(Self {
            root,
            form,
            submit,
            inputs,
            fields: Rc::new(MutableState::with_runtime(
                ContactFields::default(),
                env.runtime().clone(),
            )),
            pulse: Rc::new(RefCell::new(None)),
        })
    }

    pub fn fields(&self) -> State<ContactFields> {
        self.fields.as_state()
    }

    pub fn input(&self, field: FormField) -> ElementId {
        match field {
            FormField::Name => self.inputs[0],
            FormField::Email => self.inputs[1],
            FormField::Message => self.inputs[2],
        }
    }

    pub fn submit_button(&self) -> ElementId {
        self.submit
    }

    /// Types `value` into `field`. Ignored while the page is loading.
    pub fn set_field(&self, env: &PageEnv, field: FormField, value: &str) -> bool {
        if !env.is_interactive() {
            return false;
        }
        self.fields.update(|fields| fields.set(field, value));
        if env.document().set_attribute(self.input(field), "value", value).is_err() {
            log::debug!("contact input {field} gone");
        }
        true
    }

    /// Handles the form's submit event without any network request: pulses
    /// the button, shows a confirmation toast and clears the form. Returns
    /// the toast id.
    pub fn submit(&self, env: &PageEnv) -> Result<u64, FormError> {
        if !env.is_interactive() {
            return Err(FormError::NotReady);
        }
        self.fields.with(ContactFields::validate)?;

        if let Some(previous) = self.pulse.borrow_mut().take() {
            previous.kill();
        }
        let pulse = env.animator().animate(
            Tween::from_to(self.submit, VisualProps::new().scale(1.0), VisualProps::new().scale(0.95))
                .duration(100)
                .repeat(Repeat::Count(1))
                .yoyo(true)
                .ease(Easing::Power2InOut),
        );
        *self.pulse.borrow_mut() = pulse;

        let toast = env.toaster().show(TOAST_TITLE, TOAST_DESCRIPTION);
        self.fields.set(ContactFields::default());
        for field in FormField::ALL {
            if env.document().set_attribute(self.input(field), "value", "").is_err() {
                log::debug!("contact input {field} gone");
            }
        }
        log::debug!("contact form submitted, toast {toast}");
        Ok(toast)
    }
}

impl Section for Contact {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn root(&self) -> ElementId {
        self.root
    }

    fn setup(&self, env: &PageEnv) -> DisposerList {
        let mut context = env.animator().context(self.root, "contact");

        context.animate_on_scroll(
            Tween::from_to(
                Target::class("contact-title"),
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
                Target::class("form-field"),
                VisualProps::new().x(-50.0).opacity(0.0),
                VisualProps::new().x(0.0).opacity(1.0),
            )
            .duration(600)
            .stagger(150)
            .ease(Easing::Power3Out),
            self.form,
            TriggerStart::top(80.0),
        );
        context.animate_on_scroll(
            Tween::from_to(
                Target::class("contact-info-item"),
                VisualProps::new().x(50.0).opacity(0.0),
                VisualProps::new().x(0.0).opacity(1.0),
            )
            .duration(600)
            .stagger(100)
            .ease(Easing::Power3Out),
            Target::class("contact-info"),
            TriggerStart::top(80.0),
        );
        context.animate_on_scroll(
            Tween::from_to(
                Target::class("social-icon"),
                VisualProps::new().y(20.0).opacity(0.0),
                VisualProps::new().y(0.0).opacity(1.0),
            )
            .duration(400)
            .stagger(100)
            .ease(Easing::Power3Out),
            Target::class("social-icons"),
            TriggerStart::top(90.0),
        );

        let mut disposers = DisposerList::new();
        let pulse = Rc::clone(&self.pulse);
        disposers.on_dispose("submit-pulse", move || {
            if let Some(pulse) = pulse.borrow_mut().take() {
                pulse.revert();
            }
        });
        disposers.push(context.into_disposer());
        disposers
    }
}
