//! Search benchmarks using Criterion.
//!
//! Run with: `cargo bench`
//!
//! Covers the hot paths of the engine: structural unification over deep
//! terms, interleaved consumption of an infinite relation, and deep
//! reification of answers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rellog::engine::run;
use rellog::goal::{delayed, disj, eq, Goal};
use rellog::subst::Subst;
use rellog::term::Term;
use rellog::var::Var;

/// A proper list [0, 1, .., n-1].
fn ground_list(n: i32) -> Term {
    Term::list(0..n)
}

/// The same list with a variable in the final position.
fn open_list(n: i32, last: &Var) -> Term {
    let mut items: Vec<Term> = (0..n - 1).map(Term::from).collect();
    items.push(Term::from(last));
    Term::list(items)
}

fn bench_unify_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("unify_list");
    for n in [8i32, 64, 256] {
        let last = Var::new("last");
        let left = open_list(n, &last);
        let right = ground_list(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let sub = Subst::new();
            b.iter(|| black_box(sub.unifying(&left, &right)));
        });
    }
    group.finish();
}

fn bench_take_from_infinite(c: &mut Criterion) {
    fn repeat(x: Var) -> Goal {
        let again = x.clone();
        disj(
            eq(Term::from(&x), Term::from(1)),
            delayed(move || repeat(again.clone())),
        )
    }

    let mut group = c.benchmark_group("take_from_infinite");
    for n in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let x = Var::new("x");
                black_box(run(repeat(x)).take(n).count())
            });
        });
    }
    group.finish();
}

fn bench_reify_deep_answer(c: &mut Criterion) {
    let mut group = c.benchmark_group("reify_deep");
    for n in [8i32, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let x = Var::new("x");
                let g = eq(Term::from(&x), ground_list(n));
                black_box(run(g).next())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_unify_lists,
    bench_take_from_infinite,
    bench_reify_deep_answer
);
criterion_main!(benches);
