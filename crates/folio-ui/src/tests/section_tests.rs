use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{DocumentError, ElementId, Layout, MutableState, Viewport, ViewportMetrics};
use folio_scroll::{ScrollBehavior, ScrollController};
use folio_testing::FrameDriver;
use folio_ui_graphics::VisualState;

use crate::sections::{About, Contact, Footer, Hero, Navbar, Projects, ORB_COUNT, TOAST_TITLE};

#[derive(Default)]
struct RecordingController {
    calls: RefCell<Vec<(f32, ScrollBehavior)>>,
}

impl ScrollController for RecordingController {
    fn scroll_to(&self, y: f32, behavior: ScrollBehavior) {
        self.calls.borrow_mut().push((y, behavior));
    }

    fn scroll_by(&self, _delta: f32) {}

    fn set_enabled(&self, _enabled: bool) {}

    fn is_enabled(&self) -> bool {
        true
    }
}

struct Harness {
    driver: FrameDriver,
    viewport: Viewport,
    recorder: Rc<RecordingController>,
    loading: MutableState<bool>,
    env: PageEnv,
}

impl Harness {
    /// A 2000 px spacer sits above every section, so nothing is in view
    /// until the test scrolls.
    fn new(width: f32) -> Self {
        let driver = FrameDriver::new();
        let document = folio_core::Document::new();
        let spacer = document.create("div", Layout::fixed(2000.0));
        document.append_child(document.root(), spacer).unwrap();
        let viewport = Viewport::new(
            ViewportMetrics {
                width,
                ..ViewportMetrics::default()
            },
            driver.handle(),
        );
        let recorder = Rc::new(RecordingController::default());
        let loading = MutableState::with_runtime(false, driver.handle());
        let env = PageEnv::new(
            driver.handle(),
            document,
            viewport.clone(),
            recorder.clone(),
            loading.as_state(),
        );
        Self {
            driver,
            viewport,
            recorder,
            loading,
            env,
        }
    }

    fn mount<S: Section>(
        &self,
        build: impl FnOnce(&PageEnv, ElementId) -> Result<S, DocumentError>,
    ) -> Mounted<S> {
        let section = build(&self.env, self.env.document().root()).unwrap();
        self.env.relayout();
        Mounted::new(section, &self.env)
    }

    /// Scrolls so `element`'s top sits just above `percent` of the viewport.
    fn scroll_into_view(&self, element: ElementId, percent: f32) {
        let top = self.env.document().frame(element).unwrap().top();
        let line = self.viewport.height() * percent / 100.0;
        self.viewport.set_scroll_y(top - line + 1.0);
    }

    fn visual(&self, element: ElementId) -> VisualState {
        self.env.document().visual(element).unwrap()
    }
}

fn active_triggers_during_and_after<S: Section>(
    build: impl FnOnce(&PageEnv, ElementId) -> Result<S, DocumentError>,
) -> (usize, usize) {
    let harness = Harness::new(1280.0);
    let mounted = harness.mount(build);
    let during = harness.env.triggers().active_count();
    assert!(mounted.registrations() > 0);
    mounted.unmount(harness.env.document());
    (during, harness.env.triggers().active_count())
}

#[test]
fn unmounting_any_section_leaves_no_scroll_observers() {
    assert_eq!(active_triggers_during_and_after(About::build), (4, 0));
    assert_eq!(active_triggers_during_and_after(Projects::build), (2, 0));
    assert_eq!(active_triggers_during_and_after(Contact::build), (4, 0));
    assert_eq!(active_triggers_during_and_after(Footer::build), (1, 0));
    assert_eq!(active_triggers_during_and_after(Hero::build), (0, 0));
    assert_eq!(active_triggers_during_and_after(Navbar::build), (0, 0));
}

#[test]
fn unmount_removes_markup() {
    let harness = Harness::new(1280.0);
    let about = harness.mount(About::build);
    let root = about.section().root();
    let skills = about.section().skill_items().to_vec();
    about.unmount(harness.env.document());
    assert!(!harness.env.document().contains(root));
    assert!(skills.iter().all(|skill| !harness.env.document().contains(*skill)));
}

#[test]
fn unmounting_the_navbar_takes_an_open_mobile_menu_with_it() {
    let mut harness = Harness::new(375.0);
    let document = harness.env.document().clone();
    let before = document.element_count();
    let navbar = harness.mount(Navbar::build);
    let menu = navbar.section().menu();
    let items = navbar.section().menu_items().to_vec();

    assert!(navbar.section().toggle_menu(&harness.env));
    harness.driver.frame();
    navbar.unmount(&document);

    assert!(!document.contains(menu));
    assert!(items.iter().all(|item| !document.contains(*item)));
    assert_eq!(document.element_count(), before);
}

#[test]
fn skill_reveal_staggers_every_item_to_the_same_end_state() {
    let mut harness = Harness::new(1280.0);
    let about = harness.mount(About::build);
    let skills = about.section().skill_items().to_vec();
    assert_eq!(skills.len(), 8);
    for skill in &skills {
        let visual = harness.visual(*skill);
        assert_eq!((visual.y, visual.opacity), (30.0, 0.0));
    }

    let grid = harness.env.document().query_class(about.section().root(), "skills-grid")[0];
    harness.scroll_into_view(grid, 80.0);

    let document = harness.env.document().clone();
    let mut frame = 0u32;
    let mut started: Vec<Option<u32>> = vec![None; skills.len()];
    let settled = harness.driver.advance_until(3_000, || {
        frame += 1;
        for (index, skill) in skills.iter().enumerate() {
            if started[index].is_none() && document.visual(*skill).unwrap().y < 30.0 {
                started[index] = Some(frame);
            }
        }
        skills
            .iter()
            .all(|skill| document.visual(*skill).unwrap().is_at_rest())
    });
    assert!(settled);

    let started: Vec<u32> = started.into_iter().map(|at| at.expect("every item moved")).collect();
    assert!(started.windows(2).all(|pair| pair[0] < pair[1]), "starts {started:?}");
    for skill in &skills {
        let visual = harness.visual(*skill);
        assert_eq!((visual.y, visual.opacity), (0.0, 1.0));
    }
}

#[test]
fn section_fades_in_only_once_scrolled_into_view() {
    let mut harness = Harness::new(1280.0);
    let projects = harness.mount(Projects::build);
    let root = projects.section().root();
    let title = harness.env.document().query_class(root, "projects-title")[0];
    harness.driver.advance_by(1_000);
    assert_eq!(harness.visual(title).opacity, 0.0);

    harness.scroll_into_view(root, 80.0);
    harness.driver.advance_by(1_000);
    assert!(harness.visual(title).is_at_rest());
    assert_eq!(harness.env.triggers().active_count(), 1);
}

#[test]
fn hero_plays_on_mount_and_orbs_float_forever() {
    let mut harness = Harness::new(1280.0);
    let hero = harness.mount(Hero::build);
    let document = harness.env.document().clone();
    let headline = document.query_class(hero.section().root(), "hero-headline")[0];
    let orbs = document.query_class(hero.section().root(), "hero-orb");
    assert_eq!(orbs.len(), ORB_COUNT);
    assert_eq!(harness.visual(headline).opacity, 0.0);
    assert_eq!(harness.visual(hero.section().cta()).scale, 0.9);

    harness.driver.advance_by(3_000);
    assert!(harness.visual(headline).is_at_rest());
    assert!(harness.visual(hero.section().cta()).is_at_rest());
    assert!(orbs.iter().any(|orb| harness.visual(*orb).y < 0.0));
    assert!(orbs.iter().all(|orb| (-20.0..=0.0).contains(&harness.visual(*orb).y)));
    assert!(harness.driver.handle().has_frame_callbacks());

    hero.unmount(&document);
    harness.driver.advance_by(100);
    assert!(!harness.driver.handle().has_frame_callbacks());
}

#[test]
fn hero_cta_navigates_to_contact() {
    let harness = Harness::new(1280.0);
    let contact = harness.mount(Contact::build);
    let hero = harness.mount(Hero::build);
    assert!(hero.section().click_cta(&harness.env));
    let contact_top = harness.env.document().frame(contact.section().root()).unwrap().top();
    assert_eq!(*harness.recorder.calls.borrow(), vec![(contact_top, ScrollBehavior::Smooth)]);
}

#[test]
fn navbar_background_follows_the_scroll_threshold() {
    let harness = Harness::new(1280.0);
    let navbar = harness.mount(Navbar::build);
    let root = navbar.section().root();
    assert!(!navbar.section().is_scrolled());

    harness.viewport.set_scroll_y(50.0);
    assert!(!navbar.section().is_scrolled());
    assert!(!harness.env.document().has_class(root, "scrolled"));

    harness.viewport.set_scroll_y(51.0);
    assert!(navbar.section().is_scrolled());
    assert!(harness.env.document().has_class(root, "scrolled"));

    harness.viewport.set_scroll_y(12.0);
    assert!(!navbar.section().is_scrolled());
    assert!(!harness.env.document().has_class(root, "scrolled"));
}

#[test]
fn navbar_picks_up_an_initial_offset() {
    let harness = Harness::new(1280.0);
    harness.viewport.set_scroll_y(400.0);
    let navbar = harness.mount(Navbar::build);
    assert!(navbar.section().is_scrolled());
}

#[test]
fn contact_link_scrolls_once_and_closes_the_mobile_menu() {
    let mut harness = Harness::new(375.0);
    assert!(harness.viewport.is_mobile());
    let contact = harness.mount(Contact::build);
    let navbar = harness.mount(Navbar::build);
    let nav = navbar.section();

    assert!(nav.toggle_menu(&harness.env));
    assert!(!harness.env.document().is_hidden(nav.menu()));
    assert_eq!(nav.menu_items().len(), 6);
    harness.driver.advance_by(100);

    let (button, _) = nav
        .links()
        .iter()
        .find(|(element, href)| href == "#contact" && nav.menu_items().contains(element))
        .cloned()
        .unwrap();
    assert!(nav.click(&harness.env, button));

    let contact_top = harness.env.document().frame(contact.section().root()).unwrap().top();
    assert_eq!(*harness.recorder.calls.borrow(), vec![(contact_top, ScrollBehavior::Smooth)]);
    assert!(!nav.is_open());
    assert!(harness.env.document().is_hidden(nav.menu()));
}

#[test]
fn every_menu_open_replays_the_entrance() {
    let mut harness = Harness::new(375.0);
    let navbar = harness.mount(Navbar::build);
    let nav = navbar.section();
    let first = nav.menu_items()[0];
    let last = *nav.menu_items().last().unwrap();

    nav.toggle_menu(&harness.env);
    assert_eq!(harness.visual(first).x, -50.0);
    harness.driver.advance_by(1_200);
    assert!(harness.visual(last).is_at_rest());

    assert!(!nav.toggle_menu(&harness.env));
    assert!(nav.toggle_menu(&harness.env));
    let visual = harness.visual(first);
    assert_eq!((visual.x, visual.opacity), (-50.0, 0.0));
    harness.driver.advance_by(1_200);
    assert!(harness.visual(last).is_at_rest());
}

#[test]
fn unknown_anchor_is_a_silent_no_op_that_still_closes_the_menu() {
    let harness = Harness::new(375.0);
    let navbar = harness.mount(Navbar::build);
    let nav = navbar.section();
    nav.toggle_menu(&harness.env);
    assert!(!nav.navigate(&harness.env, "#blog"));
    assert!(harness.recorder.calls.borrow().is_empty());
    assert!(!nav.is_open());
}

#[test]
fn interactions_wait_for_loading_to_finish() {
    let harness = Harness::new(375.0);
    let _contact = harness.mount(Contact::build);
    let navbar = harness.mount(Navbar::build);
    harness.loading.set(true);

    assert!(!navbar.section().toggle_menu(&harness.env));
    assert!(!navbar.section().navigate(&harness.env, "#contact"));
    assert!(harness.recorder.calls.borrow().is_empty());

    harness.loading.set(false);
    assert!(navbar.section().navigate(&harness.env, "#contact"));
    assert_eq!(harness.recorder.calls.borrow().len(), 1);
}

#[test]
fn footer_links_navigate_without_a_menu() {
    let harness = Harness::new(1280.0);
    let _contact = harness.mount(Contact::build);
    let footer = harness.mount(Footer::build);
    let links = footer.section().links().to_vec();
    assert_eq!(links.len(), 4);
    assert!(footer.section().navigate(&harness.env, &links[3].1));
    assert!(!footer.section().navigate(&harness.env, &links[0].1));
    assert_eq!(harness.recorder.calls.borrow().len(), 1);
}

#[test]
fn submitting_the_form_resets_fields_and_shows_one_toast() {
    let mut harness = Harness::new(1280.0);
    let contact = harness.mount(Contact::build);
    let form = contact.section();
    form.set_field(&harness.env, FormField::Name, "Jane");
    form.set_field(&harness.env, FormField::Email, "jane@x.com");
    form.set_field(&harness.env, FormField::Message, "Hi");
    assert_eq!(form.fields().value(), ContactFields::new("Jane", "jane@x.com", "Hi"));
    assert_eq!(
        harness.env.document().attribute(form.input(FormField::Email), "value").as_deref(),
        Some("jane@x.com")
    );

    assert!(form.submit(&harness.env).is_ok());
    assert_eq!(form.fields().value(), ContactFields::new("", "", ""));
    for field in FormField::ALL {
        assert_eq!(
            harness.env.document().attribute(form.input(field), "value").as_deref(),
            Some("")
        );
    }
    let toasts = harness.env.toaster().visible();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, TOAST_TITLE);

    harness.driver.advance_by(50);
    assert!(harness.visual(form.submit_button()).scale < 1.0);
    harness.driver.advance_by(300);
    assert_eq!(harness.visual(form.submit_button()).scale, 1.0);
}

#[test]
fn resubmitting_mid_pulse_still_settles_at_full_scale() {
    let mut harness = Harness::new(1280.0);
    let contact = harness.mount(Contact::build);
    let form = contact.section();
    let fill = || {
        form.set_field(&harness.env, FormField::Name, "Jane");
        form.set_field(&harness.env, FormField::Email, "jane@x.com");
        form.set_field(&harness.env, FormField::Message, "Hi");
    };

    fill();
    assert!(form.submit(&harness.env).is_ok());
    harness.driver.advance_by(80);
    assert!(harness.visual(form.submit_button()).scale < 1.0);

    fill();
    assert!(form.submit(&harness.env).is_ok());
    assert_eq!(harness.visual(form.submit_button()).scale, 1.0);
    harness.driver.advance_by(400);
    assert_eq!(harness.visual(form.submit_button()).scale, 1.0);
    assert_eq!(harness.env.toaster().len(), 1);
}

#[test]
fn invalid_submission_keeps_what_was_typed() {
    let harness = Harness::new(1280.0);
    let contact = harness.mount(Contact::build);
    let form = contact.section();
    form.set_field(&harness.env, FormField::Name, "Jane");
    form.set_field(&harness.env, FormField::Email, "jane");
    form.set_field(&harness.env, FormField::Message, "Hi");

    assert_eq!(
        form.submit(&harness.env),
        Err(FormError::InvalidEmail("jane".to_string()))
    );
    assert_eq!(form.fields().value().email, "jane");
    assert!(harness.env.toaster().is_empty());
}

#[test]
fn toasts_replace_each_other_and_dismiss_themselves() {
    let mut harness = Harness::new(1280.0);
    let toaster = harness.env.toaster().clone();
    let region = toaster.mount(harness.env.document().root()).unwrap();

    let first = toaster.show("One", "first");
    harness.driver.advance_by(1_000);
    let second = toaster.show("Two", "second");
    assert_eq!(toaster.len(), 1);
    assert_eq!(toaster.visible()[0].id, second);
    assert!(!toaster.dismiss(first));
    assert_eq!(harness.env.document().children(region).unwrap().len(), 1);

    harness.driver.advance_by(4_900);
    assert_eq!(toaster.len(), 1);
    harness.driver.advance_by(200);
    assert!(toaster.is_empty());
    assert!(harness.env.document().children(region).unwrap().is_empty());
}
