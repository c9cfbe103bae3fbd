use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Viewport, ViewportMetrics};
use folio_scroll::{ScrollBehavior, ScrollController};
use folio_testing::FrameDriver;

fn mount_page(driver: &FrameDriver) -> PageComposer {
    let viewport = Viewport::new(ViewportMetrics::default(), driver.handle());
    PageComposer::mount(driver.handle(), viewport, SiteContent::default(), PageConfig::default())
        .expect("page mounts")
}

fn finish_loading(driver: &mut FrameDriver, page: &PageComposer) {
    let loading = page.loading_state();
    assert!(
        driver.advance_until(PRELOADER_MILLIS + 1_000, || !loading.value()),
        "preloader never finished"
    );
}

fn settle_scroll(driver: &mut FrameDriver, page: &PageComposer) {
    let scroller = page.scroller().clone();
    assert!(driver.advance_until(5_000, || !scroller.is_scrolling()));
}

#[test]
fn starts_loading_behind_the_preloader() {
    let driver = FrameDriver::new();
    let page = mount_page(&driver);
    let body = page.document().root();
    assert!(page.is_loading());
    assert!(page.document().has_class(body, LOADING_CLASS));
    assert!(page.preloader().is_mounted());
    assert!(!page.scroller().is_enabled());
    assert_eq!(page.document().visual(page.content_element()).unwrap().opacity, 0.0);
    assert!(page.registrations() > 0);
}

#[test]
fn loading_flips_exactly_once_when_the_preloader_completes() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let recorded = Rc::clone(&transitions);
    let _subscription = page
        .loading_state()
        .subscribe(move |loading| recorded.borrow_mut().push(*loading));

    driver.advance_by(PRELOADER_MILLIS - 200);
    assert!(page.is_loading());
    finish_loading(&mut driver, &page);
    assert!(driver.now_millis() >= PRELOADER_MILLIS);

    driver.advance_by(6_000);
    assert_eq!(*transitions.borrow(), vec![false]);
}

#[test]
fn completion_reveals_the_page() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    let body = page.document().root();
    assert!(!page.document().has_class(body, LOADING_CLASS));
    assert!(!page.preloader().is_mounted());
    assert!(page.preloader().has_completed());
    assert!(page.scroller().is_enabled());
    assert!(page.document().query_class(body, "preloader").is_empty());

    driver.advance_by(600);
    assert_eq!(page.document().visual(page.content_element()).unwrap().opacity, 1.0);
}

#[test]
fn input_is_ignored_while_loading() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    driver.advance_by(1_000);

    assert!(!page.wheel(400.0));
    assert!(!page.click(page.hero().cta()));
    assert!(!page.click(page.contact().submit_button()));
    page.click(page.navbar().menu_toggle());
    assert!(!page.navbar().is_open());
    driver.advance_by(500);
    assert_eq!(page.viewport().scroll_y(), 0.0);
    assert!(page.env().toaster().is_empty());
}

#[test]
fn wheel_scrolls_smoothly_once_loaded() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    assert!(page.wheel(400.0));
    driver.frame();
    let mid = page.viewport().scroll_y();
    assert!(mid > 0.0 && mid < 400.0, "offset {mid}");
    settle_scroll(&mut driver, &page);
    assert!((page.viewport().scroll_y() - 400.0).abs() < 0.5);
}

#[test]
fn hire_me_scrolls_to_the_contact_section() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    let contact_top = page.document().frame(page.contact().root()).unwrap().top();
    let expected = contact_top.min(page.scroller().limit());
    assert!(page.click(page.hero().cta()));
    settle_scroll(&mut driver, &page);
    assert!((page.viewport().scroll_y() - expected).abs() < 0.5);
    assert!(page.navbar().is_scrolled());
}

#[test]
fn scrolling_down_fires_section_triggers() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    let triggers = page.env().triggers().clone();
    let pending = triggers.active_count();
    assert!(pending > 0);
    let about = page.about().root();
    assert_eq!(page.document().visual(about).unwrap().opacity, 0.0);

    page.scroller().scroll_to(page.scroller().limit(), ScrollBehavior::Instant);
    assert_eq!(triggers.active_count(), 0);
    driver.advance_by(2_000);
    assert!(page.document().visual(about).unwrap().is_at_rest());
}

#[test]
fn submitting_through_the_page_shows_a_toast() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    let contact = page.contact();
    contact.set_field(page.env(), FormField::Name, "Jane");
    contact.set_field(page.env(), FormField::Email, "jane@example.com");
    contact.set_field(page.env(), FormField::Message, "Let's build something.");
    assert!(page.click(contact.submit_button()));
    assert_eq!(page.env().toaster().len(), 1);
    assert!(contact.fields().value().is_empty());

    assert!(!page.click(contact.submit_button()));
    assert_eq!(page.env().toaster().len(), 1);
}

#[test]
fn resize_relays_out_and_clamps_the_offset() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    let desktop_height = page.document().page_height();
    page.resize(375.0, 800.0);
    assert!(page.viewport().is_mobile());
    assert!(page.document().page_height() > desktop_height);

    page.scroller().scroll_to(page.scroller().limit(), ScrollBehavior::Instant);
    page.resize(1280.0, 1600.0);
    let limit = page.scroller().limit();
    assert!(page.viewport().scroll_y() <= limit);
    assert_eq!(page.viewport().scroll_y(), limit);
}

#[test]
fn unmount_releases_every_registration() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);
    let triggers = page.env().triggers().clone();
    let document = page.document().clone();
    assert!(triggers.active_count() > 0);

    page.unmount();
    assert_eq!(triggers.active_count(), 0);
    assert!(document.query_class(document.root(), "hero").is_empty());
    driver.advance_by(100);
    assert!(!driver.handle().has_frame_callbacks());
}

#[test]
fn unmount_while_loading_never_reveals() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    let loading = page.loading_state();
    driver.advance_by(1_000);
    page.unmount();
    driver.advance_by(PRELOADER_MILLIS);
    assert!(loading.value());
    assert!(!driver.handle().has_frame_callbacks());
}

#[test]
fn hit_test_finds_buttons_under_the_pointer() {
    let mut driver = FrameDriver::new();
    let page = mount_page(&driver);
    finish_loading(&mut driver, &page);

    let cta = page.hero().cta();
    let frame = page.document().frame(cta).unwrap();
    let (x, y) = (frame.x + frame.width / 2.0, frame.y + frame.height / 2.0);
    assert_eq!(page.hit_test(x, y), Some(cta));

    page.scroller().scroll_to(200.0, ScrollBehavior::Instant);
    assert_eq!(page.hit_test(x, y - 200.0), Some(cta));

    let hidden_item = page.navbar().menu_items()[0];
    if let Ok(item) = page.document().frame(hidden_item) {
        assert_ne!(page.hit_test(item.x + 1.0, item.y + 1.0), Some(hidden_item));
    }
}
