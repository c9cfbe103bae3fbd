use std::fmt;

use folio_core::{Document, ElementId};

use crate::tween::{Event, Target, Tween, TweenRun};

/// Where a timeline child starts, relative to what was added before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Position {
    /// At the current end of the timeline.
    #[default]
    Sequential,
    /// Relative to the current end; negative values overlap (`"-=300"`).
    Offset(i64),
    /// At an absolute time from the timeline's start.
    At(u64),
    /// Together with the previously added child.
    WithPrevious,
}

enum TimelineItem {
    Tween(Tween),
    Call(Box<dyn FnOnce()>),
}

/// Ordered composition of tweens and callbacks.
///
/// Endless children count one cycle towards the timeline's end when
/// positioning later children.
#[derive(Default)]
pub struct Timeline {
    delay_millis: u64,
    items: Vec<(Position, TimelineItem)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every child by `millis`.
    pub fn delay(mut self, millis: u64) -> Self {
        self.delay_millis = millis;
        self
    }

    pub fn add(mut self, tween: Tween, position: Position) -> Self {
        self.items.push((position, TimelineItem::Tween(tween)));
        self
    }

    /// Appends a tween at the current end.
    pub fn then(self, tween: Tween) -> Self {
        self.add(tween, Position::Sequential)
    }

    pub fn call(mut self, callback: impl FnOnce() + 'static, position: Position) -> Self {
        self.items.push((position, TimelineItem::Call(Box::new(callback))));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Binds every child to elements and lays the children out in time.
    ///
    /// Children whose targets resolve to nothing are skipped with a warning
    /// but still occupy their slot, so the remaining children keep their
    /// timing.
    pub(crate) fn resolve(
        self,
        document: &Document,
        mut lookup: impl FnMut(&Target) -> Vec<ElementId>,
    ) -> TimelineRun {
        let mut children = Vec::with_capacity(self.items.len());
        let mut end = 0.0f64;
        let mut previous_start = 0.0f64;
        for (position, item) in self.items {
            let start = match position {
                Position::Sequential => end,
                Position::Offset(offset) => (end + offset as f64).max(0.0),
                Position::At(at) => at as f64,
                Position::WithPrevious => previous_start,
            };
            previous_start = start;
            match item {
                TimelineItem::Tween(tween) => {
                    let elements = lookup(&tween.target);
                    end = end.max(start + tween.cycle_span(elements.len()));
                    if elements.is_empty() {
                        log::warn!("timeline child skipped: no element matches {:?}", tween.target);
                        continue;
                    }
                    children.push(Child {
                        start,
                        kind: ChildKind::Tween(TweenRun::resolve(tween, elements, document)),
                    });
                }
                TimelineItem::Call(callback) => {
                    end = end.max(start);
                    children.push(Child {
                        start,
                        kind: ChildKind::Call(Some(callback)),
                    });
                }
            }
        }
        let delay = self.delay_millis as f64;
        for child in &mut children {
            child.start += delay;
        }
        children.sort_by(|a, b| a.start.total_cmp(&b.start));
        TimelineRun { children }
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("delay_millis", &self.delay_millis)
            .field("children", &self.items.len())
            .finish()
    }
}

enum ChildKind {
    Tween(TweenRun),
    Call(Option<Box<dyn FnOnce()>>),
}

struct Child {
    start: f64,
    kind: ChildKind,
}

/// A timeline whose children are bound to elements.
pub(crate) struct TimelineRun {
    children: Vec<Child>,
}

impl TimelineRun {
    pub(crate) fn single(run: TweenRun) -> Self {
        Self {
            children: vec![Child {
                start: 0.0,
                kind: ChildKind::Tween(run),
            }],
        }
    }

    pub(crate) fn render_from(&self, document: &Document) {
        for child in &self.children {
            if let ChildKind::Tween(run) = &child.kind {
                run.render_from(document);
            }
        }
    }

    pub(crate) fn elements(&self) -> Vec<ElementId> {
        let mut elements = Vec::new();
        for child in &self.children {
            if let ChildKind::Tween(run) = &child.kind {
                for element in run.elements() {
                    if !elements.contains(&element) {
                        elements.push(element);
                    }
                }
            }
        }
        elements
    }

    /// Observed first-render times of every animated element, in timeline order.
    pub(crate) fn track_starts(&self) -> Vec<(ElementId, Option<f64>)> {
        self.children
            .iter()
            .filter_map(|child| match &child.kind {
                ChildKind::Tween(run) => Some(
                    run.tracks
                        .iter()
                        .map(move |track| (track.element, track.started_at.map(|at| at + child.start))),
                ),
                ChildKind::Call(_) => None,
            })
            .flatten()
            .collect()
    }

    /// End of the last child, `None` if any child repeats forever.
    pub(crate) fn duration(&self) -> Option<f64> {
        self.children.iter().try_fold(0.0f64, |end, child| {
            let length = match &child.kind {
                ChildKind::Tween(run) => run.total_duration()?,
                ChildKind::Call(_) => 0.0,
            };
            Some(end.max(child.start + length))
        })
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.children.iter().all(|child| match &child.kind {
            ChildKind::Tween(run) => run.is_complete(),
            ChildKind::Call(callback) => callback.is_none(),
        })
    }

    /// Renders every child at `time` milliseconds into the timeline.
    pub(crate) fn sample(&mut self, time: f64, document: &Document) -> Vec<Event> {
        let mut events = Vec::new();
        for child in &mut self.children {
            match &mut child.kind {
                ChildKind::Tween(run) => run.sample(time - child.start, document, &mut events),
                ChildKind::Call(callback) => {
                    if time >= child.start {
                        if let Some(callback) = callback.take() {
                            events.push(Event::Call(callback));
                        }
                    }
                }
            }
        }
        events
    }
}
