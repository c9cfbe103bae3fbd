use super::*;
use std::cell::Cell;
use std::rc::Rc;

use folio_core::{Document, ElementId, Layout, Viewport, ViewportMetrics};
use folio_testing::FrameDriver;
use folio_ui_graphics::VisualProps;

struct Page {
    driver: FrameDriver,
    document: Document,
    viewport: Viewport,
    triggers: ScrollTriggers,
    target: ElementId,
}

/// A 1000 px spacer followed by a 100 px block, in an 800 px tall viewport.
fn page() -> Page {
    let driver = FrameDriver::new();
    let document = Document::new();
    let spacer = document.create("section", Layout::fixed(1000.0));
    document.append_child(document.root(), spacer).unwrap();
    let target = document.create("section", Layout::fixed(100.0));
    document.add_class(target, "skills-grid").unwrap();
    document.append_child(document.root(), target).unwrap();
    document.layout(1280.0, 800.0);
    let viewport = Viewport::new(ViewportMetrics::default(), driver.handle());
    let triggers = ScrollTriggers::new(document.clone(), viewport.clone());
    Page {
        driver,
        document,
        viewport,
        triggers,
        target,
    }
}

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let count_cb = Rc::clone(&count);
    (count, move || count_cb.set(count_cb.get() + 1))
}

#[test]
fn trigger_start_parses_top_percent() {
    assert_eq!(TriggerStart::parse("top 80%"), Some(TriggerStart::top(80.0)));
    assert_eq!(TriggerStart::parse("top 95%"), Some(TriggerStart::top(95.0)));
    assert_eq!(TriggerStart::parse("bottom 80%"), None);
    assert_eq!(TriggerStart::parse("top 80"), None);
    assert_eq!(TriggerStart::default(), TriggerStart::top(80.0));
}

#[test]
fn fires_once_when_the_start_line_is_crossed() {
    let page = page();
    let (count, on_enter) = counter();
    page.triggers.register(page.target, TriggerStart::top(80.0), on_enter);
    assert_eq!(count.get(), 0);
    assert_eq!(page.triggers.active_count(), 1);

    page.viewport.set_scroll_y(300.0);
    assert_eq!(count.get(), 0);
    page.viewport.set_scroll_y(360.0);
    assert_eq!(count.get(), 1);
    assert_eq!(page.triggers.active_count(), 0);

    page.viewport.set_scroll_y(0.0);
    page.viewport.set_scroll_y(900.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn already_visible_elements_fire_at_registration() {
    let page = page();
    page.viewport.set_scroll_y(600.0);
    let (count, on_enter) = counter();
    page.triggers.register(page.target, TriggerStart::top(80.0), on_enter);
    assert_eq!(count.get(), 1);
    assert_eq!(page.triggers.active_count(), 0);
}

#[test]
fn removed_triggers_never_fire() {
    let page = page();
    let (count, on_enter) = counter();
    let id = page.triggers.register(page.target, TriggerStart::top(80.0), on_enter);
    assert!(page.triggers.is_active(id));
    assert!(page.triggers.remove(id));
    assert!(!page.triggers.remove(id));
    page.viewport.set_scroll_y(1000.0);
    assert_eq!(count.get(), 0);
}

#[test]
fn triggers_on_removed_elements_are_dropped() {
    let page = page();
    let (count, on_enter) = counter();
    page.triggers.register(page.target, TriggerStart::top(80.0), on_enter);
    page.document.remove(page.target).unwrap();
    page.viewport.set_scroll_y(1000.0);
    assert_eq!(count.get(), 0);
    assert_eq!(page.triggers.active_count(), 0);
}

#[test]
fn resize_reevaluates_with_the_new_height() {
    let page = page();
    let (count, on_enter) = counter();
    page.triggers.register(page.target, TriggerStart::top(90.0), on_enter);
    page.viewport.set_scroll_y(200.0);
    assert_eq!(count.get(), 0);
    page.viewport.resize(1280.0, 1000.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn scroll_animation_waits_for_its_trigger() {
    let mut page = page();
    let animator = Animator::new(page.driver.handle(), page.document.clone(), page.triggers.clone());
    let mut context = animator.context(page.document.root(), "about");
    let animation = context
        .animate_on_scroll(
            Tween::from_to(page.target, VisualProps::new().y(30.0).opacity(0.0), VisualProps::new().y(0.0).opacity(1.0))
                .duration(500),
            Target::class("skills-grid"),
            TriggerStart::top(80.0),
        )
        .unwrap();
    assert_eq!(page.document.visual(page.target).unwrap().opacity, 0.0);

    page.driver.advance_by(1_000);
    assert_eq!(animation.status(), PlaybackStatus::Idle);

    page.viewport.set_scroll_y(400.0);
    assert_eq!(animation.status(), PlaybackStatus::Running);
    assert!(page
        .driver
        .advance_until(1_000, || animation.status() == PlaybackStatus::Completed));
    assert_eq!(page.document.visual(page.target).unwrap().opacity, 1.0);

    context.revert();
    assert_eq!(page.triggers.active_count(), 0);
}

#[test]
fn reverting_before_the_trigger_fires_removes_the_observer() {
    let page = page();
    let animator = Animator::new(page.driver.handle(), page.document.clone(), page.triggers.clone());
    let mut context = animator.context(page.document.root(), "footer");
    let animation = context
        .animate_on_scroll(
            Tween::from(page.target, VisualProps::new().y(60.0).blur(5.0)).duration(800),
            page.target,
            TriggerStart::top(95.0),
        )
        .unwrap();
    assert_eq!(page.triggers.active_count(), 1);
    assert_eq!(page.document.visual(page.target).unwrap().blur, 5.0);

    context.revert();
    assert_eq!(page.triggers.active_count(), 0);
    assert_eq!(animation.status(), PlaybackStatus::Killed);
    assert_eq!(page.document.visual(page.target).unwrap().blur, 0.0);

    page.viewport.set_scroll_y(1000.0);
    assert_eq!(animation.status(), PlaybackStatus::Killed);
}
