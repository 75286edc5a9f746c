//! Lazy answer streams and the interleaving search operators.
//!
//! A stream is either exhausted, an answer plus a (possibly lazy) tail, or
//! a suspension that yields another stream when forced. `mplus` and `bind`
//! implement the interleaving discipline that keeps the search complete in
//! the presence of divergent branches: when `mplus` meets a suspension it
//! swaps the operands inside the new thunk, so a diverging left branch
//! cannot starve answers available on the right.

use crate::goal::Goal;
use crate::state::State;
use std::fmt;

/// A lazy, possibly infinite stream of answer states.
pub enum Stream {
    /// No more answers.
    Empty,
    /// A head answer plus the rest of the stream.
    Mature(State, Box<Stream>),
    /// A suspension; forcing it yields another stream.
    Immature(Box<dyn FnOnce() -> Stream>),
}

impl Stream {
    /// The empty stream.
    pub fn empty() -> Self {
        Stream::Empty
    }

    /// A stream holding exactly one answer.
    pub fn unit(state: State) -> Self {
        Stream::Mature(state, Box::new(Stream::Empty))
    }

    /// Prepend an answer to a stream.
    pub fn mature(state: State, tail: Stream) -> Self {
        Stream::Mature(state, Box::new(tail))
    }

    /// A suspended stream.
    pub fn immature(thunk: impl FnOnce() -> Stream + 'static) -> Self {
        Stream::Immature(Box::new(thunk))
    }

    /// Force suspensions until the stream is `Empty` or `Mature`.
    ///
    /// Idempotent on those two forms. Termination is up to the program:
    /// a goal that suspends forever keeps this loop running.
    pub fn realize(self) -> Stream {
        let mut stream = self;
        loop {
            match stream {
                Stream::Immature(thunk) => stream = thunk(),
                settled => return settled,
            }
        }
    }

    /// Merge two streams, interleaving at suspension points.
    ///
    /// An eager head on the left is passed through; a suspension on the
    /// left defers itself and promotes the right operand, which is the
    /// swap that makes disjunction fair.
    pub fn mplus(self, other: Stream) -> Stream {
        match self {
            Stream::Empty => other,
            Stream::Mature(head, tail) => Stream::Mature(head, Box::new(tail.mplus(other))),
            Stream::Immature(thunk) => Stream::immature(move || other.mplus(thunk())),
        }
    }

    /// Apply a goal to every answer in the stream, merging the resulting
    /// streams with `mplus`.
    pub fn bind(self, goal: Goal) -> Stream {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Mature(head, tail) => {
                let first = goal.apply(head);
                first.mplus(tail.bind(goal))
            }
            Stream::Immature(thunk) => Stream::immature(move || thunk().bind(goal)),
        }
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stream::Empty => write!(f, "()"),
            Stream::Mature(head, tail) => write!(f, "({:?} . {:?})", head, tail),
            Stream::Immature(_) => write!(f, "(...)"),
        }
    }
}

impl IntoIterator for Stream {
    type Item = State;
    type IntoIter = StreamIter;

    fn into_iter(self) -> Self::IntoIter {
        StreamIter(self)
    }
}

/// Iterator over a stream's answers, realizing suspensions as it goes.
pub struct StreamIter(Stream);

impl Iterator for StreamIter {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        match std::mem::replace(&mut self.0, Stream::Empty).realize() {
            Stream::Empty => None,
            Stream::Mature(head, tail) => {
                self.0 = *tail;
                Some(head)
            }
            Stream::Immature(_) => unreachable!("realize returned a suspension"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{eq, fail};
    use crate::subst::Subst;
    use crate::term::Term;
    use crate::var::Var;

    fn state_with(var: &Var, term: Term) -> State {
        State::new().with_new_substitution(Subst::new().extended(var.clone(), term))
    }

    fn walked(states: &[State], var: &Var) -> Vec<Term> {
        states
            .iter()
            .map(|s| s.substitution().walk(&Term::from(var)))
            .collect()
    }

    // ========== REALIZE ==========

    #[test]
    fn realize_empty_is_empty() {
        assert!(matches!(Stream::empty().realize(), Stream::Empty));
    }

    #[test]
    fn realize_mature_is_identity() {
        let s = Stream::unit(State::new()).realize();
        assert!(matches!(s, Stream::Mature(_, _)));
    }

    #[test]
    fn realize_forces_nested_suspensions() {
        let s = Stream::immature(|| Stream::immature(|| Stream::unit(State::new())));
        assert!(matches!(s.realize(), Stream::Mature(_, _)));
    }

    // ========== MPLUS ==========

    #[test]
    fn mplus_empty_left_yields_right() {
        let x = Var::new("x");
        let right = Stream::unit(state_with(&x, Term::from(1)));
        let merged = Stream::empty().mplus(right);
        let states: Vec<State> = merged.into_iter().collect();
        assert_eq!(walked(&states, &x), vec![Term::from(1)]);
    }

    #[test]
    fn mplus_keeps_left_head_first() {
        let x = Var::new("x");
        let left = Stream::unit(state_with(&x, Term::from(1)));
        let right = Stream::unit(state_with(&x, Term::from(2)));
        let states: Vec<State> = left.mplus(right).into_iter().collect();
        assert_eq!(walked(&states, &x), vec![Term::from(1), Term::from(2)]);
    }

    #[test]
    fn mplus_swaps_on_suspension() {
        let x = Var::new("x");
        let left = Stream::immature({
            let x = x.clone();
            move || Stream::unit(state_with(&x, Term::from(1)))
        });
        let right = Stream::unit(state_with(&x, Term::from(2)));
        // The suspended left defers; the right answer comes out first.
        let states: Vec<State> = left.mplus(right).into_iter().collect();
        assert_eq!(walked(&states, &x), vec![Term::from(2), Term::from(1)]);
    }

    #[test]
    fn mplus_with_divergent_left_still_yields_right() {
        fn never() -> Stream {
            Stream::immature(never)
        }
        let x = Var::new("x");
        let right = Stream::unit(state_with(&x, Term::from(42)));
        let mut iter = never().mplus(right).into_iter();
        let first = iter.next().expect("the right answer must surface");
        assert_eq!(
            first.substitution().walk(&Term::from(&x)),
            Term::from(42)
        );
    }

    // ========== BIND ==========

    #[test]
    fn bind_empty_is_empty() {
        let g = eq(1, 1);
        assert!(matches!(Stream::empty().bind(g), Stream::Empty));
    }

    #[test]
    fn bind_applies_goal_to_each_answer() {
        let x = Var::new("x");
        let y = Var::new("y");
        let s1 = state_with(&x, Term::from(1));
        let s2 = state_with(&x, Term::from(2));
        let stream = Stream::mature(s1, Stream::unit(s2));
        let states: Vec<State> = stream
            .bind(eq(Term::from(&y), Term::from(10)))
            .into_iter()
            .collect();
        assert_eq!(walked(&states, &x), vec![Term::from(1), Term::from(2)]);
        assert_eq!(walked(&states, &y), vec![Term::from(10), Term::from(10)]);
    }

    #[test]
    fn bind_drops_answers_the_goal_rejects() {
        let x = Var::new("x");
        let s1 = state_with(&x, Term::from(1));
        let s2 = state_with(&x, Term::from(2));
        let stream = Stream::mature(s1, Stream::unit(s2));
        let states: Vec<State> = stream
            .bind(eq(Term::from(&x), Term::from(2)))
            .into_iter()
            .collect();
        assert_eq!(walked(&states, &x), vec![Term::from(2)]);
    }

    #[test]
    fn bind_over_suspension_stays_suspended() {
        let stream = Stream::immature(|| Stream::unit(State::new()));
        let bound = stream.bind(fail());
        assert!(matches!(bound, Stream::Immature(_)));
        assert!(matches!(bound.realize(), Stream::Empty));
    }

    // ========== ITERATION ==========

    #[test]
    fn iterator_realizes_as_it_goes() {
        let x = Var::new("x");
        let stream = Stream::immature({
            let x = x.clone();
            move || {
                Stream::mature(
                    state_with(&x, Term::from(1)),
                    Stream::immature(move || Stream::unit(state_with(&x, Term::from(2)))),
                )
            }
        });
        let states: Vec<State> = stream.into_iter().collect();
        assert_eq!(walked(&states, &x), vec![Term::from(1), Term::from(2)]);
    }

    #[test]
    fn iterator_over_empty_stream() {
        assert_eq!(Stream::empty().into_iter().count(), 0);
    }
}
