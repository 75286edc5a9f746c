use crate::subst::Subst;

/// Execution state: a substitution paired with a fresh-name counter.
///
/// States are immutable; "updates" produce a successor. The counter
/// increases monotonically along every derivation path and is never reset
/// across disjunctive branches, so fresh variables that are concurrently
/// alive always carry distinct names.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct State {
    sub: Subst,
    next_id: u64,
}

impl State {
    /// Initial state: empty substitution, counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// A state with a caller-supplied substitution and counter.
    pub fn with(sub: Subst, next_id: u64) -> Self {
        Self { sub, next_id }
    }

    /// The current substitution.
    pub fn substitution(&self) -> &Subst {
        &self.sub
    }

    /// The fresh-name counter.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// A freshly minted variable name derived from the counter.
    pub fn next_unused_name(&self) -> String {
        format!("${}", self.next_id)
    }

    /// Successor with a new substitution, same counter.
    pub fn with_new_substitution(&self, sub: Subst) -> State {
        State {
            sub,
            next_id: self.next_id,
        }
    }

    /// Successor with the counter advanced by one.
    pub fn with_next_name(&self) -> State {
        State {
            sub: self.sub.clone(),
            next_id: self.next_id + 1,
        }
    }
}
