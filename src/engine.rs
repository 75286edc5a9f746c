//! Top-level driver: turn a goal into an iterator of reified answers.
//!
//! A query applies a goal to an initial state and walks the resulting
//! stream. Each `next` realizes the stream to a settled form: a mature
//! head yields its substitution, reified; an empty stream ends iteration.
//! Consumers bound non-terminating programs with `Iterator::take`.

use crate::goal::Goal;
use crate::state::State;
use crate::stream::Stream;
use crate::subst::Subst;
use std::mem;

#[cfg(feature = "tracing")]
use crate::trace::trace;

/// An in-flight query: an iterator over reified answer substitutions.
pub struct Query {
    stream: Stream,
}

impl Query {
    fn new(goal: Goal, state: State) -> Self {
        Query {
            stream: goal.apply(state),
        }
    }
}

impl Iterator for Query {
    type Item = Subst;

    fn next(&mut self) -> Option<Subst> {
        match mem::replace(&mut self.stream, Stream::Empty).realize() {
            Stream::Empty => {
                #[cfg(feature = "tracing")]
                trace!("query_exhausted");
                None
            }
            Stream::Mature(state, tail) => {
                self.stream = *tail;
                #[cfg(feature = "tracing")]
                trace!(bindings = state.substitution().len(), "answer_yielded");
                Some(state.substitution().reified())
            }
            // realize only ever returns a settled stream.
            Stream::Immature(_) => unreachable!("realize returned a suspension"),
        }
    }
}

/// Run a goal against the initial state.
pub fn run(goal: Goal) -> Query {
    Query::new(goal, State::new())
}

/// Run a goal against a caller-supplied state.
pub fn run_with_state(goal: Goal, state: State) -> Query {
    Query::new(goal, state)
}

/// Collect every answer of a finite program.
pub fn query(goal: Goal) -> Vec<Subst> {
    run(goal).collect()
}

/// The first answer, if any.
pub fn query_first(goal: Goal) -> Option<Subst> {
    run(goal).next()
}
