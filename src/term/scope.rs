//! Term scopes
//!
//! Every factory (and therefore every graph and dataset) carries a scope.
//! Blank nodes are only meaningful inside the scope that minted them.

use std::fmt;

use uuid::Uuid;

/// A process-unique tag identifying the factory a term came from
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope(Uuid);

impl Scope {
    /// Create a new, never before used scope
    pub(crate) fn fresh() -> Self {
        Scope(Uuid::new_v4())
    }

    /// Derive a stable identifier for `name` within this scope
    pub(crate) fn derive(&self, name: &str) -> Uuid {
        Uuid::new_v5(&self.0, name.as_bytes())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope({})", self.0.simple())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_scopes_are_unique() {
        assert_ne!(Scope::fresh(), Scope::fresh());
    }

    #[test]
    fn test_derive_is_stable_per_scope() {
        let a = Scope::fresh();
        let b = Scope::fresh();
        assert_eq!(a.derive("x"), a.derive("x"));
        assert_ne!(a.derive("x"), a.derive("y"));
        assert_ne!(a.derive("x"), b.derive("x"));
    }
}
