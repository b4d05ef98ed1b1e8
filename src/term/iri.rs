//! IRI representation

use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};

use super::Scope;

/// An IRI reference
///
/// Equality and hashing look at the IRI string only. The scope records which
/// factory produced the value and is used when deciding whether a store can
/// adopt it as-is.
#[derive(Clone)]
pub struct Iri {
    value: String,
    scope: Scope,
}

impl Iri {
    pub(crate) fn new(value: String, scope: Scope) -> Self {
        Iri { value, scope }
    }

    /// Get the IRI as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The scope of the factory that created this IRI
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Get the namespace (everything up to and including the last # or /)
    pub fn namespace(&self) -> &str {
        if let Some(pos) = self.value.rfind('#') {
            &self.value[..=pos]
        } else if let Some(pos) = self.value.rfind('/') {
            &self.value[..=pos]
        } else {
            &self.value
        }
    }

    /// Get the local name (fragment or last path segment)
    pub fn local_name(&self) -> &str {
        if let Some(pos) = self.value.rfind('#') {
            &self.value[pos + 1..]
        } else if let Some(pos) = self.value.rfind('/') {
            &self.value[pos + 1..]
        } else {
            &self.value
        }
    }
}

impl PartialEq for Iri {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Iri {}

impl Hash for Iri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.value)
    }
}

/// N-Triples form; characters an IRI reference cannot hold are written as `\uXXXX`
impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        for c in self.value.chars() {
            if is_forbidden(c) {
                // Every forbidden character lies in the BMP.
                write!(f, "\\u{:04X}", c as u32)?;
            } else {
                f.write_char(c)?;
            }
        }
        f.write_char('>')
    }
}

/// Characters never allowed inside an IRI reference
const FORBIDDEN: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

fn is_forbidden(c: char) -> bool {
    c.is_whitespace() || c.is_control() || FORBIDDEN.contains(&c)
}

/// Check the characters of an IRI under strict validation
pub(crate) fn first_invalid_char(value: &str) -> Option<char> {
    value.chars().find(|&c| is_forbidden(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace() {
        let iri = Iri::new("http://example.org/foo#bar".into(), Scope::fresh());
        assert_eq!(iri.namespace(), "http://example.org/foo#");
        assert_eq!(iri.local_name(), "bar");

        let iri2 = Iri::new("http://example.org/path/name".into(), Scope::fresh());
        assert_eq!(iri2.namespace(), "http://example.org/path/");
        assert_eq!(iri2.local_name(), "name");
    }

    #[test]
    fn test_equality_ignores_scope() {
        let a = Iri::new("http://example.org/a".into(), Scope::fresh());
        let b = Iri::new("http://example.org/a".into(), Scope::fresh());
        assert_ne!(a.scope(), b.scope());
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_normalization() {
        let a = Iri::new("http://example.org/a".into(), Scope::fresh());
        let b = Iri::new("HTTP://example.org/a".into(), Scope::fresh());
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_chars() {
        assert_eq!(first_invalid_char("http://example.org/a"), None);
        assert_eq!(first_invalid_char("http://example.org/a b"), Some(' '));
        assert_eq!(first_invalid_char("http://ex>"), Some('>'));
    }

    #[test]
    fn test_display_escapes_forbidden_chars() {
        let iri = Iri::new("http://ex/a>b c\\d".into(), Scope::fresh());
        assert_eq!(iri.to_string(), r"<http://ex/a\u003Eb\u0020c\u005Cd>");
        assert_eq!(format!("{:?}", iri), "<http://ex/a>b c\\d>");

        let plain = Iri::new("http://example.org/caf\u{e9}#x".into(), Scope::fresh());
        assert_eq!(plain.to_string(), "<http://example.org/caf\u{e9}#x>");
    }
}
