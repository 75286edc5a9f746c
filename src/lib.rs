//! rellog - embedded relational programming with interleaving search.
//!
//! Programs are built from term equality ([`goal::eq`]), disjunction,
//! conjunction and fresh-variable introduction, then driven by
//! [`engine::run`], which enumerates every substitution under which the
//! program holds. Search is complete: a divergent branch wrapped in
//! [`goal::delayed`] cannot starve answers available elsewhere.

pub mod atom;
pub mod engine;
pub mod goal;
pub mod state;
pub mod stream;
pub mod subst;
pub mod term;
pub mod trace;
mod unify;
pub mod var;
