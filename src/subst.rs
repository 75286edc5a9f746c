use crate::term::Term;
use crate::var::Var;
use hashbrown::HashMap;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

/// Variable-keyed hash map. Var keys hash a single u64, so FxHasher wins.
pub(crate) type VarMap<V> = HashMap<Var, V, BuildHasherDefault<FxHasher>>;

/// A substitution maps variables to terms.
///
/// Substitutions are persistent values: `extended` returns a new
/// substitution and never mutates the receiver, so states sharing a common
/// prefix of bindings are safe to hold concurrently along different search
/// branches. The binding graph is expected to be acyclic; no occurs check
/// is performed, and `walk` bounds itself with a visited set so an
/// accidentally cyclic chain terminates at the revisited variable.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Subst {
    bindings: VarMap<Term>,
}

impl Subst {
    /// Create an empty substitution.
    pub fn new() -> Self {
        Self {
            bindings: VarMap::default(),
        }
    }

    /// The binding for a variable, if any.
    pub fn get(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Check if a variable is bound.
    pub fn is_bound(&self, var: &Var) -> bool {
        self.bindings.contains_key(var)
    }

    /// Check if the substitution has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Iterator over `(variable, term)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.bindings.iter()
    }

    /// The representative term for `term` under this substitution.
    ///
    /// Follows top-level variable bindings until an unbound variable or a
    /// non-variable term is reached. Does not recurse into the children of
    /// composite terms; that is `deep_walk`'s job.
    pub fn walk(&self, term: &Term) -> Term {
        let mut current = term;
        let mut visited: SmallVec<[&Var; 8]> = SmallVec::new();
        while let Term::Var(var) = current {
            if visited.contains(&var) {
                // Cycle in the binding chain; stop at the revisited variable.
                break;
            }
            match self.bindings.get(var) {
                Some(next) => {
                    visited.push(var);
                    current = next;
                }
                None => break,
            }
        }
        current.clone()
    }

    /// A new substitution with the additional binding `var → term`.
    ///
    /// An existing binding for `var` is overwritten; the trivial identity
    /// `var → var` is dropped.
    pub fn extended(&self, var: Var, term: Term) -> Subst {
        if let Term::Var(w) = &term {
            if *w == var {
                return self.clone();
            }
        }
        let mut bindings = self.bindings.clone();
        bindings.insert(var, term);
        Subst { bindings }
    }

    /// Like `walk`, but also resolves the children of composite terms,
    /// producing a term with no remaining indirections.
    pub fn deep_walk(&self, term: &Term) -> Term {
        match self.walk(term) {
            Term::Cons(head, tail) => Term::cons(self.deep_walk(&head), self.deep_walk(&tail)),
            Term::Map(entries) => {
                let walked: HashMap<String, Term> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.deep_walk(v)))
                    .collect();
                Term::Map(Arc::new(walked))
            }
            Term::Structure(s) => {
                let children = s.children().iter().map(|c| self.deep_walk(c)).collect();
                s.rebuild(children)
            }
            resolved => resolved,
        }
    }

    /// A fresh substitution in which every binding is fully resolved and
    /// every remaining free variable is replaced by an unassigned marker.
    ///
    /// Keys are processed in variable-creation order, and marker indices
    /// are assigned on first encounter, so numbering is deterministic for
    /// a given substitution. Each free variable discovered along the way
    /// also receives its own `var → marker` entry; aliased variables
    /// therefore share one marker index.
    pub fn reified(&self) -> Subst {
        // The index table is local to this call.
        let mut indices: VarMap<usize> = VarMap::default();
        let mut bindings: VarMap<Term> = VarMap::default();

        let mut vars: Vec<Var> = self.bindings.keys().cloned().collect();
        vars.sort_unstable_by_key(Var::id);

        for var in vars {
            let resolved = self.deep_walk(&Term::Var(var.clone()));
            let marked = mark_unassigned(&resolved, &mut indices, &mut bindings);
            bindings.insert(var, marked);
        }
        Subst { bindings }
    }
}

/// Replace every free variable in `term` with its unassigned marker,
/// minting indices on first encounter and recording a binding for the
/// variable itself.
fn mark_unassigned(
    term: &Term,
    indices: &mut VarMap<usize>,
    bindings: &mut VarMap<Term>,
) -> Term {
    match term {
        Term::Var(var) => {
            let next = indices.len();
            let index = *indices.entry(var.clone()).or_insert(next);
            bindings.insert(var.clone(), Term::Reified(index));
            Term::Reified(index)
        }
        Term::Cons(head, tail) => Term::cons(
            mark_unassigned(head, indices, bindings),
            mark_unassigned(tail, indices, bindings),
        ),
        Term::Map(entries) => {
            let marked: HashMap<String, Term> = entries
                .iter()
                .map(|(k, v)| (k.clone(), mark_unassigned(v, indices, bindings)))
                .collect();
            Term::Map(Arc::new(marked))
        }
        Term::Structure(s) => {
            let children = s
                .children()
                .iter()
                .map(|c| mark_unassigned(c, indices, bindings))
                .collect();
            s.rebuild(children)
        }
        ground => ground.clone(),
    }
}

impl fmt::Display for Subst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut entries: Vec<(&Var, &Term)> = self.bindings.iter().collect();
        entries.sort_unstable_by_key(|(var, _)| var.id());
        write!(f, "{{")?;
        for (i, (var, term)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", var, term)?;
        }
        write!(f, "}}")
    }
}
