use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use folio_core::{Document, ElementId};
use folio_ui_graphics::VisualProps;

use crate::easing::Easing;
use crate::spec::{AnimationSpec, Lerp, Repeat};

pub(crate) type UpdateCallback = Rc<RefCell<dyn FnMut(f32)>>;

/// What a tween animates.
///
/// Class and anchor targets are looked up when the tween is registered, class
/// lookups only within the registering context's scope.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Element(ElementId),
    Elements(Vec<ElementId>),
    Class(String),
    Anchor(String),
}

impl Target {
    pub fn class(name: impl Into<String>) -> Self {
        Target::Class(name.into())
    }

    pub fn anchor(href: impl Into<String>) -> Self {
        Target::Anchor(href.into())
    }

    /// Resolves to live elements in document order.
    pub fn resolve(&self, document: &Document, scope: ElementId) -> Vec<ElementId> {
        match self {
            Target::Element(id) => {
                if document.contains(*id) {
                    vec![*id]
                } else {
                    Vec::new()
                }
            }
            Target::Elements(ids) => ids.iter().copied().filter(|id| document.contains(*id)).collect(),
            Target::Class(class) => document.query_class(scope, class),
            Target::Anchor(href) => document.query_anchor(href).into_iter().collect(),
        }
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}

impl From<Vec<ElementId>> for Target {
    fn from(ids: Vec<ElementId>) -> Self {
        Target::Elements(ids)
    }
}

impl From<&[ElementId]> for Target {
    fn from(ids: &[ElementId]) -> Self {
        Target::Elements(ids.to_vec())
    }
}

/// Declarative description of a property animation on one or more elements.
///
/// `from` properties are applied as soon as the tween is registered; missing
/// end values default to what the element showed at registration time.
pub struct Tween {
    pub(crate) target: Target,
    pub(crate) from: Option<VisualProps>,
    pub(crate) to: VisualProps,
    pub(crate) spec: AnimationSpec,
    pub(crate) stagger_millis: u64,
    pub(crate) repeat: Repeat,
    pub(crate) yoyo: bool,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_complete: Option<Box<dyn FnOnce()>>,
}

impl Tween {
    /// Animates from the element's current values to `to`.
    pub fn to(target: impl Into<Target>, to: VisualProps) -> Self {
        Self::build(target.into(), None, to)
    }

    /// Animates from `from` back to the element's current values.
    pub fn from(target: impl Into<Target>, from: VisualProps) -> Self {
        Self::build(target.into(), Some(from), VisualProps::new())
    }

    pub fn from_to(target: impl Into<Target>, from: VisualProps, to: VisualProps) -> Self {
        Self::build(target.into(), Some(from), to)
    }

    fn build(target: Target, from: Option<VisualProps>, to: VisualProps) -> Self {
        Self {
            target,
            from,
            to,
            spec: AnimationSpec::default(),
            stagger_millis: 0,
            repeat: Repeat::Once,
            yoyo: false,
            on_update: None,
            on_complete: None,
        }
    }

    pub fn duration(mut self, millis: u64) -> Self {
        self.spec.duration_millis = millis;
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.spec.easing = easing;
        self
    }

    pub fn delay(mut self, millis: u64) -> Self {
        self.spec.delay_millis = millis;
        self
    }

    pub fn spec(mut self, spec: AnimationSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Offsets the start of each successive target by `millis`.
    pub fn stagger(mut self, millis: u64) -> Self {
        self.stagger_millis = millis;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Plays every other cycle backwards.
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Called each frame the tween renders, with its linear progress in `[0, 1]`.
    pub fn on_update(mut self, callback: impl FnMut(f32) + 'static) -> Self {
        self.on_update = Some(Rc::new(RefCell::new(callback)));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Length of one pass over all targets, counting a single cycle.
    pub(crate) fn cycle_span(&self, targets: usize) -> f64 {
        let cycles = self.repeat.cycles().unwrap_or(1) as f64;
        self.spec.delay_millis as f64
            + self.stagger_millis as f64 * targets.saturating_sub(1) as f64
            + self.spec.duration_millis as f64 * cycles
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("target", &self.target)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("spec", &self.spec)
            .field("stagger_millis", &self.stagger_millis)
            .field("repeat", &self.repeat)
            .field("yoyo", &self.yoyo)
            .finish()
    }
}

/// Deferred user callback collected while sampling.
///
/// Callbacks run after the player has released its borrows so they are free
/// to touch the document, other animations or the player itself.
pub(crate) enum Event {
    Update(UpdateCallback, f32),
    Complete(Box<dyn FnOnce()>),
    Call(Box<dyn FnOnce()>),
}

impl Event {
    pub(crate) fn fire(self) {
        match self {
            Event::Update(callback, progress) => {
                if let Ok(mut callback) = callback.try_borrow_mut() {
                    (&mut *callback)(progress);
                }
            }
            Event::Complete(callback) | Event::Call(callback) => callback(),
        }
    }
}

pub(crate) struct Track {
    pub(crate) element: ElementId,
    pub(crate) offset: f64,
    explicit_from: Option<VisualProps>,
    from: Option<VisualProps>,
    to: VisualProps,
    pub(crate) started_at: Option<f64>,
    finished: bool,
}

#[derive(Clone, Copy)]
struct Timing {
    duration: f64,
    cycles: Option<u32>,
    yoyo: bool,
    easing: Easing,
}

impl Timing {
    /// Linear progress of the current cycle and whether the track is done.
    fn progress_at(&self, local: f64) -> (f32, bool) {
        if self.duration <= 0.0 {
            return (self.end_progress(), true);
        }
        if let Some(cycles) = self.cycles {
            if local >= self.duration * cycles as f64 {
                return (self.end_progress(), true);
            }
        }
        let cycle = (local / self.duration).floor();
        let within = ((local - cycle * self.duration) / self.duration) as f32;
        let backwards = self.yoyo && (cycle as u64) % 2 == 1;
        (if backwards { 1.0 - within } else { within }, false)
    }

    fn end_progress(&self) -> f32 {
        match self.cycles {
            Some(cycles) if self.yoyo && cycles % 2 == 0 => 0.0,
            _ => 1.0,
        }
    }
}

/// A tween bound to concrete elements, sampled by its owning timeline.
pub(crate) struct TweenRun {
    pub(crate) tracks: Vec<Track>,
    timing: Timing,
    delay: f64,
    on_update: Option<UpdateCallback>,
    on_complete: Option<Box<dyn FnOnce()>>,
    completed: bool,
}

impl TweenRun {
    pub(crate) fn resolve(tween: Tween, elements: Vec<ElementId>, document: &Document) -> Self {
        let delay = tween.spec.delay_millis as f64;
        let stagger = tween.stagger_millis as f64;
        let from_mask = tween.from.unwrap_or_default();
        let tracks = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let base = document.visual(element).unwrap_or_default();
                Track {
                    element,
                    offset: delay + stagger * index as f64,
                    explicit_from: tween.from,
                    from: None,
                    to: VisualProps::capture(&base, &from_mask).merge(&tween.to),
                    started_at: None,
                    finished: false,
                }
            })
            .collect();
        Self {
            tracks,
            timing: Timing {
                duration: tween.spec.duration_millis as f64,
                cycles: tween.repeat.cycles(),
                yoyo: tween.yoyo,
                easing: tween.spec.easing,
            },
            delay,
            on_update: tween.on_update,
            on_complete: tween.on_complete,
            completed: false,
        }
    }

    /// Writes explicit start values before the first frame.
    pub(crate) fn render_from(&self, document: &Document) {
        for track in &self.tracks {
            if let Some(from) = track.explicit_from {
                if let Err(err) = document.update_visual(track.element, |visual| *visual = from.resolve(*visual)) {
                    log::debug!("tween start values skipped: {err}");
                }
            }
        }
    }

    pub(crate) fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.tracks.iter().map(|track| track.element)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.completed
    }

    /// Total length including delay and stagger, `None` for endless tweens.
    pub(crate) fn total_duration(&self) -> Option<f64> {
        let cycles = self.timing.cycles? as f64;
        let last_offset = self.tracks.last().map(|track| track.offset).unwrap_or(self.delay);
        Some(last_offset + self.timing.duration * cycles)
    }

    /// Renders the tween at `time` milliseconds after its start.
    pub(crate) fn sample(&mut self, time: f64, document: &Document, events: &mut Vec<Event>) {
        if self.completed || time < 0.0 {
            return;
        }
        let timing = self.timing;
        let mut rendered = false;
        let mut first_progress = None;
        for track in &mut self.tracks {
            if track.finished {
                continue;
            }
            let local = time - track.offset;
            if local < 0.0 {
                continue;
            }
            if track.started_at.is_none() {
                let current = match document.visual(track.element) {
                    Ok(current) => current,
                    Err(err) => {
                        log::debug!("tween track dropped: {err}");
                        track.finished = true;
                        continue;
                    }
                };
                let captured = VisualProps::capture(&current, &track.to);
                track.from = Some(match track.explicit_from {
                    Some(explicit) => captured.merge(&explicit.masked_by(&track.to)),
                    None => captured,
                });
                track.started_at = Some(time);
            }
            let (progress, finished) = timing.progress_at(local);
            let from = track.from.unwrap_or_default();
            let value = from.lerp(&track.to, timing.easing.transform(progress));
            if let Err(err) = document.update_visual(track.element, |visual| *visual = value.resolve(*visual)) {
                log::debug!("tween track dropped: {err}");
                track.finished = true;
                continue;
            }
            track.finished = finished;
            first_progress.get_or_insert(progress);
            rendered = true;
        }

        let done = self.tracks.iter().all(|track| track.finished);
        if rendered {
            if let Some(callback) = &self.on_update {
                let progress = match self.total_duration() {
                    Some(total) if total > self.delay => ((time - self.delay) / (total - self.delay)).clamp(0.0, 1.0) as f32,
                    Some(_) => 1.0,
                    None => first_progress.unwrap_or(0.0),
                };
                events.push(Event::Update(Rc::clone(callback), progress));
            }
        }
        if done {
            self.completed = true;
            if let Some(callback) = self.on_complete.take() {
                events.push(Event::Complete(callback));
            }
        }
    }
}
