use crate::subst::Subst;
use crate::term::Term;
use downcast_rs::Downcast;
use smallvec::SmallVec;

#[cfg(feature = "tracing")]
use crate::trace::trace;

impl Subst {
    /// Unify two terms under this substitution, returning the extended
    /// substitution on success.
    ///
    /// Both terms are walked first; terms that are already equal leave the
    /// substitution unchanged. A variable on either side is bound to the
    /// other term without an occurs check. Lists unify structurally, maps
    /// unify when their key sets coincide (values are visited in sorted
    /// key order so the first failing suboperation is deterministic), and
    /// user composites unify pointwise over their children when they share
    /// a concrete type and arity. Failure is `None`, never a panic.
    pub fn unifying(&self, u: &Term, v: &Term) -> Option<Subst> {
        let u = self.walk(u);
        let v = self.walk(v);

        if u == v {
            return Some(self.clone());
        }

        match (u, v) {
            (Term::Var(var), term) | (term, Term::Var(var)) => Some(self.extended(var, term)),
            (Term::Cons(uh, ut), Term::Cons(vh, vt)) => {
                let sub = self.unifying(&uh, &vh)?;
                sub.unifying(&ut, &vt)
            }
            (Term::Map(left), Term::Map(right)) => {
                if left.len() != right.len() {
                    #[cfg(feature = "tracing")]
                    trace!("unify_map_key_count_mismatch");
                    return None;
                }
                let mut keys: SmallVec<[&str; 8]> = left.keys().map(String::as_str).collect();
                keys.sort_unstable();
                let mut sub = self.clone();
                for key in keys {
                    let counterpart = right.get(key)?;
                    sub = sub.unifying(&left[key], counterpart)?;
                }
                Some(sub)
            }
            (Term::Structure(a), Term::Structure(b)) => {
                if a.as_any().type_id() != b.as_any().type_id() {
                    return None;
                }
                let left = a.children();
                let right = b.children();
                if left.len() != right.len() {
                    return None;
                }
                let mut sub = self.clone();
                for (x, y) in left.iter().zip(right.iter()) {
                    sub = sub.unifying(x, y)?;
                }
                Some(sub)
            }
            _ => {
                // Distinct atoms, mixed composite kinds, or a reified
                // marker; nothing unifies.
                #[cfg(feature = "tracing")]
                trace!("unify_mismatch");
                None
            }
        }
    }
}
