//! Blank node representation

use std::fmt;

use uuid::Uuid;

use super::Scope;

/// A blank node (anonymous node)
///
/// Identity is the pair of the minting scope and an internal identifier.
/// Two blank nodes from different scopes never compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlankNode {
    scope: Scope,
    id: Uuid,
}

impl BlankNode {
    /// Mint a fresh blank node in `scope`
    pub(crate) fn fresh(scope: Scope) -> Self {
        BlankNode { scope, id: Uuid::new_v4() }
    }

    /// The blank node that `name` resolves to in `scope`
    pub(crate) fn named(scope: Scope, name: &str) -> Self {
        BlankNode { scope, id: scope.derive(name) }
    }

    /// The scope that minted this blank node
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// The internal identifier, unique across scopes
    pub fn internal_identifier(&self) -> String {
        self.id.simple().to_string()
    }

    /// The label used in the N-Triples form (without the `_:` prefix)
    pub fn label(&self) -> String {
        format!("b{}", self.id.simple())
    }
}

impl fmt::Debug for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.id.simple())
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.id.simple())
    }
}
