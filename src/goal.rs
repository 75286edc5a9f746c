//! Goals and their combinators.
//!
//! A goal is a pure function from a state to a stream of states. All
//! combinators thread the fresh-name counter through the state parameter;
//! there is no hidden mutable state anywhere in the search.

use crate::atom::Atomic;
use crate::state::State;
use crate::stream::Stream;
use crate::subst::Subst;
use crate::term::Term;
use crate::var::Var;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A relational program: applied to a state, yields a stream of answer
/// states. Cloning is cheap (goals are shared behind `Arc`).
#[derive(Clone)]
pub struct Goal(Arc<dyn Fn(State) -> Stream>);

impl Goal {
    /// Wrap a state-to-stream function as a goal.
    pub fn new(f: impl Fn(State) -> Stream + 'static) -> Self {
        Goal(Arc::new(f))
    }

    /// Apply the goal to a state.
    pub fn apply(&self, state: State) -> Stream {
        (self.0)(state)
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<goal>")
    }
}

/// Term equality: succeeds with the extended substitution when the two
/// terms unify, fails (empty stream) otherwise.
pub fn eq(u: impl Into<Term>, v: impl Into<Term>) -> Goal {
    let u = u.into();
    let v = v.into();
    Goal::new(move |state| match state.substitution().unifying(&u, &v) {
        Some(sub) => Stream::unit(state.with_new_substitution(sub)),
        None => Stream::Empty,
    })
}

/// The goal that always succeeds.
pub fn succeed() -> Goal {
    eq(true, true)
}

/// The goal that always fails.
pub fn fail() -> Goal {
    eq(false, true)
}

/// Disjunction: answers from either branch, interleaved fairly.
pub fn disj(g: Goal, h: Goal) -> Goal {
    Goal::new(move |state| g.apply(state.clone()).mplus(h.apply(state)))
}

/// Conjunction: `h` applied to every answer of `g`.
pub fn conj(g: Goal, h: Goal) -> Goal {
    Goal::new(move |state| g.apply(state).bind(h.clone()))
}

/// Variadic disjunction. No branches fails; one branch is itself.
pub fn any(goals: impl IntoIterator<Item = Goal>) -> Goal {
    let goals: SmallVec<[Goal; 4]> = goals.into_iter().collect();
    let mut iter = goals.into_iter().rev();
    match iter.next() {
        None => fail(),
        Some(last) => iter.fold(last, |acc, g| disj(g, acc)),
    }
}

/// Variadic conjunction. No goals succeeds; one goal is itself.
pub fn all(goals: impl IntoIterator<Item = Goal>) -> Goal {
    let goals: SmallVec<[Goal; 4]> = goals.into_iter().collect();
    let mut iter = goals.into_iter().rev();
    match iter.next() {
        None => succeed(),
        Some(last) => iter.fold(last, |acc, g| conj(g, acc)),
    }
}

/// Introduce one fresh variable, named from the state's counter.
pub fn fresh(f: impl Fn(Var) -> Goal + 'static) -> Goal {
    Goal::new(move |state| {
        let var = Var::new(state.next_unused_name());
        f(var).apply(state.with_next_name())
    })
}

/// Introduce two fresh variables. Each allocation advances the counter.
pub fn fresh2(f: impl Fn(Var, Var) -> Goal + 'static) -> Goal {
    Goal::new(move |state| {
        let a = Var::new(state.next_unused_name());
        let state = state.with_next_name();
        let b = Var::new(state.next_unused_name());
        f(a, b).apply(state.with_next_name())
    })
}

/// Introduce three fresh variables.
pub fn fresh3(f: impl Fn(Var, Var, Var) -> Goal + 'static) -> Goal {
    Goal::new(move |state| {
        let a = Var::new(state.next_unused_name());
        let state = state.with_next_name();
        let b = Var::new(state.next_unused_name());
        let state = state.with_next_name();
        let c = Var::new(state.next_unused_name());
        f(a, b, c).apply(state.with_next_name())
    })
}

/// Defer a goal: construction and application both happen inside an
/// immature thunk, forced only when the search schedules it. Recursive
/// relations wrap their self-call in this to stay productive.
pub fn delayed(f: impl Fn() -> Goal + 'static) -> Goal {
    let f = Arc::new(f);
    Goal::new(move |state| {
        let f = Arc::clone(&f);
        Stream::immature(move || f().apply(state))
    })
}

/// Hand the current substitution to a goal constructor.
pub fn in_environment(f: impl Fn(&Subst) -> Goal + 'static) -> Goal {
    Goal::new(move |state| {
        let goal = f(state.substitution());
        goal.apply(state)
    })
}

/// Succeeds when the term walks to an unbound variable.
pub fn is_var(t: impl Into<Term>) -> Goal {
    let t = t.into();
    in_environment(move |sub| match sub.walk(&t) {
        Term::Var(_) => succeed(),
        _ => fail(),
    })
}

/// Succeeds when the term walks to an atom whose payload type is `T`.
pub fn is_atom<T: Atomic>(t: impl Into<Term>) -> Goal {
    let t = t.into();
    in_environment(move |sub| match sub.walk(&t) {
        Term::Atom(a) if a.is::<T>() => succeed(),
        _ => fail(),
    })
}

/// Succeeds when the term walks to a list cell (empty or cons).
pub fn is_list(t: impl Into<Term>) -> Goal {
    let t = t.into();
    in_environment(move |sub| match sub.walk(&t) {
        Term::Nil | Term::Cons(_, _) => succeed(),
        _ => fail(),
    })
}

/// Succeeds when the term walks to a map.
pub fn is_map(t: impl Into<Term>) -> Goal {
    let t = t.into();
    in_environment(move |sub| match sub.walk(&t) {
        Term::Map(_) => succeed(),
        _ => fail(),
    })
}

/// Soft cut: if `question` has any answer, behave as `question` then
/// `answer`; otherwise behave as `alternative`.
pub fn ifte(question: Goal, answer: Goal, alternative: Goal) -> Goal {
    Goal::new(move |state| {
        let mut stream = question.apply(state.clone());
        loop {
            match stream {
                Stream::Empty => return alternative.apply(state),
                Stream::Mature(_, _) => return stream.bind(answer.clone()),
                Stream::Immature(thunk) => stream = thunk(),
            }
        }
    })
}

/// Keep at most the first answer of a goal.
pub fn once(goal: Goal) -> Goal {
    Goal::new(move |state| match goal.apply(state).realize() {
        Stream::Mature(head, _) => Stream::unit(head),
        _ => Stream::Empty,
    })
}
