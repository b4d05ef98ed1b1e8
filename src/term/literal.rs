//! Literal value representation

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Iri, Scope};
use crate::core::ns;

/// An RDF literal value
///
/// A literal always has a datatype. Plain literals carry `xsd:string`,
/// language-tagged ones `rdf:langString`. The language tag is kept as given
/// but compared case-insensitively.
#[derive(Clone)]
pub struct Literal {
    lexical: String,
    datatype: Iri,
    language: Option<String>,
    scope: Scope,
}

impl Literal {
    pub(crate) fn new(lexical: String, datatype: Iri, language: Option<String>, scope: Scope) -> Self {
        Literal { lexical, datatype, language, scope }
    }

    /// Get the lexical form
    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    /// Get the datatype IRI
    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Check if this is a plain `xsd:string` literal
    pub fn is_plain(&self) -> bool {
        self.language.is_none() && self.datatype.as_str() == ns::XSD_STRING
    }

    /// The scope of the factory that created this literal
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.lexical == other.lexical
            && self.datatype == other.datatype
            && match (&self.language, &other.language) {
                (None, None) => true,
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lexical.hash(state);
        self.datatype.hash(state);
        match &self.language {
            Some(lang) => {
                state.write_u8(1);
                for b in lang.bytes() {
                    state.write_u8(b.to_ascii_lowercase());
                }
            }
            None => state.write_u8(0),
        }
    }
}

/// Escape a lexical form for the N-Triples string syntax
pub(crate) fn escape_lexical(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_lexical(&self.lexical))?;
        match &self.language {
            Some(lang) => write!(f, "@{}", lang),
            None if self.datatype.as_str() == ns::XSD_STRING => Ok(()),
            None => write!(f, "^^{}", self.datatype),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Iri {
        Iri::new(s.to_string(), Scope::fresh())
    }

    fn lit(value: &str, dt: &str, lang: Option<&str>) -> Literal {
        Literal::new(value.into(), iri(dt), lang.map(String::from), Scope::fresh())
    }

    #[test]
    fn test_plain_literal() {
        let l = lit("hello", ns::XSD_STRING, None);
        assert_eq!(l.lexical_form(), "hello");
        assert!(l.is_plain());
        assert_eq!(format!("{}", l), "\"hello\"");
    }

    #[test]
    fn test_typed_literal() {
        let l = lit("42", &format!("{}integer", ns::XSD), None);
        assert!(!l.is_plain());
        assert_eq!(
            format!("{}", l),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn test_lang_literal() {
        let l = lit("hello", ns::RDF_LANG_STRING, Some("en-GB"));
        assert_eq!(l.language(), Some("en-GB"));
        assert_eq!(format!("{}", l), "\"hello\"@en-GB");
    }

    #[test]
    fn test_language_tag_case_insensitive() {
        use std::collections::hash_map::DefaultHasher;

        let a = lit("chat", ns::RDF_LANG_STRING, Some("FR"));
        let b = lit("chat", ns::RDF_LANG_STRING, Some("fr"));
        assert_eq!(a, b);

        let hash = |l: &Literal| {
            let mut h = DefaultHasher::new();
            l.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_datatype_distinguishes() {
        let a = lit("1", &format!("{}integer", ns::XSD), None);
        let b = lit("1", ns::XSD_STRING, None);
        assert_ne!(a, b);
        assert_ne!(
            lit("x", ns::RDF_LANG_STRING, Some("en")),
            lit("x", ns::XSD_STRING, None)
        );
    }

    #[test]
    fn test_escaping() {
        let l = lit("say \"hi\"\n\\", ns::XSD_STRING, None);
        assert_eq!(format!("{}", l), r#""say \"hi\"\n\\""#);
    }
}
