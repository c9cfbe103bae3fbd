use std::cell::Cell;
use std::rc::Rc;

use folio_core::{Disposer, DisposerList, Document, ElementId, RuntimeHandle};

use crate::player::Animation;
use crate::scroll_trigger::{ScrollTriggers, TriggerStart};
use crate::timeline::{Position, Timeline, TimelineRun};
use crate::tween::{Target, Tween, TweenRun};

/// Creates animations bound to one runtime, document and trigger registry.
#[derive(Clone)]
pub struct Animator {
    runtime: RuntimeHandle,
    document: Document,
    triggers: ScrollTriggers,
    created: Rc<Cell<u64>>,
}

impl Animator {
    pub fn new(runtime: RuntimeHandle, document: Document, triggers: ScrollTriggers) -> Self {
        Self {
            runtime,
            document,
            triggers,
            created: Rc::new(Cell::new(0)),
        }
    }

    pub fn runtime(&self) -> &RuntimeHandle {
        &self.runtime
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn triggers(&self) -> &ScrollTriggers {
        &self.triggers
    }

    /// Number of animations created so far.
    #[cfg(test)]
    pub(crate) fn created_count(&self) -> u64 {
        self.created.get()
    }

    /// Opens a registration scope rooted at `scope`; class targets only match
    /// inside it.
    pub fn context(&self, scope: ElementId, label: &'static str) -> AnimationContext {
        AnimationContext {
            animator: self.clone(),
            scope,
            label,
            disposers: DisposerList::new(),
        }
    }

    /// Builds and starts an unscoped tween. The caller owns the handle.
    pub fn animate(&self, tween: Tween) -> Option<Animation> {
        let animation = self.prepare_tween(tween, self.document.root(), "tween")?;
        animation.play();
        Some(animation)
    }

    /// Builds and starts an unscoped timeline. The caller owns the handle.
    pub fn play_timeline(&self, timeline: Timeline, label: &'static str) -> Animation {
        let animation = self.prepare_timeline(timeline, self.document.root(), label);
        animation.play();
        animation
    }

    pub(crate) fn prepare_tween(
        &self,
        tween: Tween,
        scope: ElementId,
        label: &'static str,
    ) -> Option<Animation> {
        let elements = tween.target.resolve(&self.document, scope);
        if elements.is_empty() {
            log::warn!("{label}: no element matches {:?}, animation skipped", tween.target);
            return None;
        }
        let run = TweenRun::resolve(tween, elements, &self.document);
        Some(self.bind(label, TimelineRun::single(run)))
    }

    pub(crate) fn prepare_timeline(
        &self,
        timeline: Timeline,
        scope: ElementId,
        label: &'static str,
    ) -> Animation {
        let document = self.document.clone();
        let run = timeline.resolve(&self.document, |target| target.resolve(&document, scope));
        self.bind(label, run)
    }

    fn bind(&self, label: &'static str, run: TimelineRun) -> Animation {
        self.created.set(self.created.get() + 1);
        Animation::new(label, self.runtime.clone(), self.document.clone(), run)
    }
}

/// A registration scope: everything created through it is reverted together.
///
/// Dropping the context reverts as well, so a section's animations never
/// outlive the section.
pub struct AnimationContext {
    animator: Animator,
    scope: ElementId,
    label: &'static str,
    disposers: DisposerList,
}

impl AnimationContext {
    pub fn scope(&self) -> ElementId {
        self.scope
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Live registrations (animations and pending triggers).
    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Starts a tween right away.
    pub fn animate(&mut self, tween: Tween) -> Option<Animation> {
        let animation = self.animator.prepare_tween(tween, self.scope, self.label)?;
        self.track(&animation);
        animation.play();
        Some(animation)
    }

    /// Registers a tween that plays once `trigger` crosses `start`.
    ///
    /// Start values are rendered immediately; the tween waits idle until the
    /// trigger fires.
    pub fn animate_on_scroll(
        &mut self,
        tween: Tween,
        trigger: impl Into<Target>,
        start: TriggerStart,
    ) -> Option<Animation> {
        let trigger = trigger.into();
        let Some(element) = trigger.resolve(self.animator.document(), self.scope).first().copied() else {
            log::warn!("{}: scroll trigger {:?} not found, animation skipped", self.label, trigger);
            return None;
        };
        let animation = self.animator.prepare_tween(tween, self.scope, self.label)?;
        self.track(&animation);

        let pending = animation.downgrade();
        let triggers = self.animator.triggers().clone();
        let id = triggers.register(element, start, move || {
            if let Some(animation) = pending.upgrade() {
                animation.play();
            }
        });
        self.disposers.on_dispose("scroll-trigger", move || {
            triggers.remove(id);
        });
        Some(animation)
    }

    /// Starts a timeline right away.
    pub fn timeline(&mut self, timeline: Timeline) -> Animation {
        let animation = self.animator.prepare_timeline(timeline, self.scope, self.label);
        self.track(&animation);
        animation.play();
        animation
    }

    /// Runs `callback` after `delay_millis`, unless the context is reverted first.
    pub fn delayed_call(&mut self, delay_millis: u64, callback: impl FnOnce() + 'static) -> Animation {
        let timeline = Timeline::new().call(callback, Position::At(delay_millis));
        self.timeline(timeline)
    }

    /// Reverts every animation and removes every pending trigger, newest first.
    pub fn revert(&mut self) {
        if !self.disposers.is_empty() {
            log::debug!("{}: reverting {} registrations", self.label, self.disposers.len());
        }
        self.disposers.dispose();
    }

    /// Hands the context's cleanup to a section's disposer list.
    pub fn into_disposer(self) -> Disposer {
        let mut context = self;
        Disposer::new(context.label, move || context.revert())
    }

    fn track(&mut self, animation: &Animation) {
        let animation = animation.clone();
        self.disposers.on_dispose("animation", move || animation.revert());
    }
}
