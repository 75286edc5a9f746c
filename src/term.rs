use crate::atom::Atomic;
use crate::var::Var;
use downcast_rs::{impl_downcast, Downcast};
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;

/// Extension hook for user-defined composite terms.
///
/// A composite participates in unification and deep-walking through three
/// capabilities: structural equality against another composite, a
/// `children` accessor yielding subterms in canonical order, and a
/// `rebuild` constructor that reassembles the composite from replacement
/// children. Two composites unify only when they are the same concrete
/// type with the same arity; their children then unify pointwise.
pub trait Structure: Downcast + fmt::Debug {
    /// Structural equality against another composite.
    fn eqv(&self, other: &dyn Structure) -> bool;

    /// Subterms in canonical order.
    fn children(&self) -> Vec<Term>;

    /// Reassemble from replacement children, in the same canonical order.
    fn rebuild(&self, children: Vec<Term>) -> Term;
}

impl_downcast!(Structure);

/// A logic term.
///
/// Equality is structural at the term level and never consults a
/// substitution (walking is `Subst`'s job). `Reified` markers are the one
/// exception: they are presentation-only sentinels and equal nothing,
/// including themselves, which is why `Term` is `PartialEq` but not `Eq`.
#[derive(Clone)]
pub enum Term {
    /// A variable, equal only to itself.
    Var(Var),
    /// A ground host value; see [`Atomic`].
    Atom(Arc<dyn Atomic>),
    /// The empty list.
    Nil,
    /// A head/tail pair (the classical cons cell).
    Cons(Arc<Term>, Arc<Term>),
    /// An unordered string-keyed mapping.
    Map(Arc<HashMap<String, Term>>),
    /// A user-defined composite; see [`Structure`].
    Structure(Arc<dyn Structure>),
    /// Unassigned marker `_ᵢ`. Appears only in reified output.
    Reified(usize),
}

impl Term {
    /// Wrap a host value as an atom.
    pub fn atom(value: impl Atomic) -> Term {
        Term::Atom(Arc::new(value))
    }

    /// The empty list.
    pub fn nil() -> Term {
        Term::Nil
    }

    /// Prepend `head` to `tail`.
    pub fn cons(head: impl Into<Term>, tail: impl Into<Term>) -> Term {
        Term::Cons(Arc::new(head.into()), Arc::new(tail.into()))
    }

    /// Build a proper list from the given items.
    pub fn list<T: Into<Term>>(items: impl IntoIterator<Item = T>) -> Term {
        let items: Vec<Term> = items.into_iter().map(Into::into).collect();
        let mut out = Term::Nil;
        for item in items.into_iter().rev() {
            out = Term::cons(item, out);
        }
        out
    }

    /// Build a map term from key/value entries.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Term
    where
        K: Into<String>,
        V: Into<Term>,
    {
        let entries: HashMap<String, Term> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Term::Map(Arc::new(entries))
    }

    /// Wrap a user composite.
    pub fn structure(s: impl Structure) -> Term {
        Term::Structure(Arc::new(s))
    }

    /// The variable inside, if this term is one.
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Term::Var(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Var(a), Term::Var(b)) => a == b,
            (Term::Atom(a), Term::Atom(b)) => a.eq_atom(&**b),
            (Term::Nil, Term::Nil) => true,
            (Term::Cons(ah, at), Term::Cons(bh, bt)) => ah == bh && at == bt,
            // HashMap equality is key-set coincidence plus pointwise value
            // equality, which is exactly the map contract.
            (Term::Map(a), Term::Map(b)) => a == b,
            (Term::Structure(a), Term::Structure(b)) => a.eqv(&**b),
            // Reified markers equal nothing, themselves included.
            _ => false,
        }
    }
}

impl From<Var> for Term {
    fn from(v: Var) -> Self {
        Term::Var(v)
    }
}

impl From<&Var> for Term {
    fn from(v: &Var) -> Self {
        Term::Var(v.clone())
    }
}

macro_rules! impl_from_atomic {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Term {
                fn from(value: $t) -> Self {
                    Term::atom(value)
                }
            }
        )*
    };
}

impl_from_atomic!(bool, char, i32, i64, u32, u64, f64, String, &'static str);

impl<T: Into<Term>> From<Vec<T>> for Term {
    fn from(items: Vec<T>) -> Self {
        Term::list(items)
    }
}

/// Append `n` in Unicode subscript digits, the rendering used for
/// unassigned markers (`_₀`, `_₁`, …).
fn write_subscript(n: usize, f: &mut fmt::Formatter) -> fmt::Result {
    for digit in n.to_string().chars() {
        let d = digit.to_digit(10).unwrap_or(0);
        let sub = char::from_u32(0x2080 + d).unwrap_or(digit);
        write!(f, "{}", sub)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Var(v) => write!(f, "{}", v),
            Term::Atom(a) => write!(f, "{}", a),
            Term::Nil => write!(f, "[]"),
            Term::Cons(head, tail) => {
                write!(f, "[{}", head)?;
                let mut rest: &Term = tail;
                loop {
                    match rest {
                        Term::Nil => break,
                        Term::Cons(h, t) => {
                            write!(f, ", {}", h)?;
                            rest = t;
                        }
                        // Improper tail (usually an unbound variable).
                        other => {
                            write!(f, " | {}", other)?;
                            break;
                        }
                    }
                }
                write!(f, "]")
            }
            Term::Map(entries) => {
                let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                keys.sort_unstable();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, entries[*key])?;
                }
                write!(f, "}}")
            }
            Term::Structure(s) => write!(f, "{:?}", s),
            Term::Reified(i) => {
                write!(f, "_")?;
                write_subscript(*i, f)
            }
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
