#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// The steps of a planner search that show up in a trace.
///
/// Each kind fixes what the two counters of its [`TraceEvent`] mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum SearchEvent {
    /// Emitted once before the first dequeue. `a`: registered actions, `b`: tracked resources.
    PlanStart,
    /// A goal-satisfying node beat the best plan so far. `a`: plan length, `b`: cost, rounded.
    Candidate,
    /// A node was dropped because its state hit the visit cap. `a`: earlier dequeues of that state.
    CycleSkip,
    /// A node's successors are about to be generated. `a`: node depth, `b`: frontier size.
    Expand,
    /// A successor could not beat the best plan. `a`: index of the action that produced it.
    Prune,
    /// Emitted once when the search stops. `a`: 1 if a plan was found, `b`: its length.
    PlanFinish,
}

impl SearchEvent {
    pub const ALL: [SearchEvent; 6] = [
        SearchEvent::PlanStart,
        SearchEvent::Candidate,
        SearchEvent::CycleSkip,
        SearchEvent::Expand,
        SearchEvent::Prune,
        SearchEvent::PlanFinish,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            SearchEvent::PlanStart => "goap.plan.start",
            SearchEvent::Candidate => "goap.candidate",
            SearchEvent::CycleSkip => "goap.cycle_skip",
            SearchEvent::Expand => "goap.expand",
            SearchEvent::Prune => "goap.prune",
            SearchEvent::PlanFinish => "goap.plan.finish",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Starts an event of this kind, recorded at the given dequeue count.
    pub fn at(self, iteration: u64) -> TraceEvent {
        TraceEvent::new(iteration, self.tag())
    }
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One recorded step of a search.
///
/// The tag is free-form so callers can mix their own events into a planner trace; events the
/// planner emits always carry a [`SearchEvent`] tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub iteration: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(iteration: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            iteration,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }

    /// `None` for events not emitted by the planner.
    pub fn kind(&self) -> Option<SearchEvent> {
        SearchEvent::from_tag(&self.tag)
    }

    pub fn is(&self, kind: SearchEvent) -> bool {
        self.tag == kind.tag()
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Discards everything. Used by untraced searches.
#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn emit(&mut self, event: TraceEvent) {
        (**self).emit(event);
    }
}

/// In-memory record of one or more searches, in emission order.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn of_kind(&self, kind: SearchEvent) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.is(kind))
    }

    pub fn count(&self, kind: SearchEvent) -> usize {
        self.of_kind(kind).count()
    }

    pub fn last(&self, kind: SearchEvent) -> Option<&TraceEvent> {
        self.events.iter().rev().find(|e| e.is(kind))
    }

    /// Splits the log at each `PlanStart`, one slice per traced search.
    pub fn searches(&self) -> impl Iterator<Item = &[TraceEvent]> + '_ {
        let starts: Vec<usize> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is(SearchEvent::PlanStart))
            .map(|(i, _)| i)
            .collect();
        let ends = starts
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(self.events.len()))
            .collect::<Vec<_>>();
        starts
            .into_iter()
            .zip(ends)
            .map(move |(from, to)| &self.events[from..to])
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
