//! Startup overlay.
//!
//! Runs one 4.1 s timeline: the owner's name rises in, the progress bar
//! fills while the percentage counts up, the overlay fades out and the
//! completion signal fires.

use std::cell::RefCell;
use std::rc::Rc;

use folio_animation::{Animation, Easing, Position, Timeline, Tween};
use folio_core::{CompletionSender, Document, DocumentError, ElementId, Layout, MutableState, State};
use folio_ui_graphics::VisualProps;

use crate::markup::{text_leaf, Element};
use crate::section::PageEnv;

pub const NAME_REVEAL_MILLIS: u64 = 800;
pub const PROGRESS_MILLIS: u64 = 2500;
/// The bar starts this long before the name has finished revealing.
pub const PROGRESS_OVERLAP_MILLIS: i64 = 300;
pub const HOLD_MILLIS: i64 = 300;
pub const FADE_OUT_MILLIS: u64 = 800;
pub const TOTAL_MILLIS: u64 = 4100;

struct PreloaderMarkup {
    root: ElementId,
    percent: ElementId,
}

/// Owns the progress value and the page's completion sender.
///
/// The sender sits in a shared slot and is taken when it fires, so no
/// number of remounts can deliver completion twice.
pub struct Preloader {
    progress: Rc<MutableState<u8>>,
    on_complete: Rc<RefCell<Option<CompletionSender>>>,
    markup: Option<PreloaderMarkup>,
    timeline: Option<Animation>,
    document: Option<Document>,
}

impl Preloader {
    pub fn new(env: &PageEnv, on_complete: Option<CompletionSender>) -> Self {
        Self {
            progress: Rc::new(MutableState::with_runtime(0, env.runtime().clone())),
            on_complete: Rc::new(RefCell::new(on_complete)),
            markup: None,
            timeline: None,
            document: None,
        }
    }

    /// Displayed percentage, 0 to 100.
    pub fn progress(&self) -> State<u8> {
        self.progress.as_state()
    }

    pub fn is_mounted(&self) -> bool {
        self.markup.is_some()
    }

    /// Whether completion has been delivered (or there was nobody to deliver it to).
    pub fn has_completed(&self) -> bool {
        self.on_complete.borrow().is_none()
    }

    pub fn root(&self) -> Option<ElementId> {
        self.markup.as_ref().map(|markup| markup.root)
    }

    /// The `NN%` label.
    pub fn percent_element(&self) -> Option<ElementId> {
        self.markup.as_ref().map(|markup| markup.percent)
    }

    pub fn timeline(&self) -> Option<&Animation> {
        self.timeline.as_ref()
    }

    /// Builds the overlay under `parent` and starts the timeline.
    pub fn mount(&mut self, env: &PageEnv, parent: ElementId) -> Result<ElementId, DocumentError> {
        if let Some(root) = self.root() {
            return Ok(root);
        }
        let document = env.document();
        let root = Element::new("div", Layout::Overlay)
            .class("preloader")
            .mount(document, parent)?;
        let column = Element::new("div", Layout::stack(24.0, 0.0))
            .class("preloader-content")
            .mount(document, root)?;
        let name = text_leaf("h1", 96.0, env.content().owner.name.as_str())
            .class("preloader-name")
            .mount(document, column)?;
        let track = Element::new("div", Layout::fixed(4.0))
            .class("progress-track")
            .mount(document, column)?;
        let bar = Element::new("div", Layout::fixed(4.0))
            .class("progress-bar")
            .mount(document, track)?;
        let percent = text_leaf("span", 20.0, "0%")
            .class("preloader-percent")
            .mount(document, column)?;

        let progress = Rc::clone(&self.progress);
        let counter = document.clone();
        let report_progress = move |fraction: f32| {
            let percent_value = (fraction * 100.0).round().clamp(0.0, 100.0) as u8;
            progress.update(|current| {
                if percent_value > *current {
                    *current = percent_value;
                }
            });
            let shown = progress.value();
            if counter.set_text(percent, format!("{shown}%")).is_err() {
                log::debug!("preloader percentage element gone");
            }
        };

        let on_complete = Rc::clone(&self.on_complete);
        let overlay = document.clone();
        let finish = move || {
            if overlay.set_hidden(root, true).is_err() {
                log::debug!("preloader overlay gone before completion");
            }
            match on_complete.borrow_mut().take() {
                Some(sender) => {
                    log::debug!("preloader complete");
                    sender.fire();
                }
                None => log::debug!("preloader complete, nobody waiting"),
            }
        };

        let timeline = Timeline::new()
            .then(
                Tween::from(name, VisualProps::new().y(50.0).opacity(0.0))
                    .duration(NAME_REVEAL_MILLIS)
                    .ease(Easing::Power3Out),
            )
            .add(
                Tween::from_to(bar, VisualProps::new().width_percent(0.0), VisualProps::new().width_percent(100.0))
                    .duration(PROGRESS_MILLIS)
                    .ease(Easing::Power2Out)
                    .on_update(report_progress),
                Position::Offset(-PROGRESS_OVERLAP_MILLIS),
            )
            .add(
                Tween::to(root, VisualProps::new().opacity(0.0).scale(0.95))
                    .duration(FADE_OUT_MILLIS)
                    .ease(Easing::Power3InOut),
                Position::Offset(HOLD_MILLIS),
            )
            .call(finish, Position::Sequential);

        self.timeline = Some(env.animator().play_timeline(timeline, "preloader"));
        self.markup = Some(PreloaderMarkup { root, percent });
        self.document = Some(document.clone());
        log::debug!("preloader mounted");
        Ok(root)
    }

    /// Kills the timeline, resets the progress and removes the overlay.
    pub fn unmount(&mut self) {
        if let Some(timeline) = self.timeline.take() {
            timeline.kill();
        }
        self.progress.set(0);
        if let (Some(markup), Some(document)) = (self.markup.take(), self.document.take()) {
            if document.remove(markup.root).is_err() {
                log::debug!("preloader markup already gone");
            }
        }
        log::debug!("preloader unmounted");
    }
}

impl Drop for Preloader {
    fn drop(&mut self) {
        if let Some(timeline) = self.timeline.take() {
            timeline.kill();
        }
    }
}
