use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

/// A logic variable: a unique identity plus a descriptive display name.
///
/// The name is purely presentational. Two variables are equal iff they
/// share identity; creating a second variable with the same name yields a
/// distinct variable. Copies preserve identity.
#[derive(Clone)]
pub struct Var {
    id: u64,
    name: Arc<str>,
}

impl Var {
    /// Create a new variable with a fresh identity.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        // Relaxed is enough for a monotone id counter.
        let id = NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed);
        Var {
            id,
            name: name.into(),
        }
    }

    /// The variable's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw identity (for deterministic orderings and debugging).
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_var_keeps_name() {
        let x = Var::new("x");
        assert_eq!(x.name(), "x");
    }

    #[test]
    fn same_name_is_not_same_variable() {
        let a = Var::new("x");
        let b = Var::new("x");
        assert_ne!(a, b, "identity is per-creation, not per-name");
    }

    #[test]
    fn copies_preserve_identity() {
        let a = Var::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let a = Var::new("a");
        let b = Var::new("b");
        assert!(b.id() > a.id());
    }

    #[test]
    fn owned_names_are_accepted() {
        let name = String::from("$17");
        let v = Var::new(name);
        assert_eq!(v.name(), "$17");
    }

    #[test]
    fn hash_follows_identity() {
        use std::collections::HashSet;
        let a = Var::new("x");
        let b = a.clone();
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
