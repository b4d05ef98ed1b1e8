//! Standard RDF namespace IRI constants

/// Standard namespace IRI constants
pub mod ns {
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDF Schema namespace
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XML Schema Datatypes namespace
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// Datatype of plain literals
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// Datatype of language-tagged literals
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// Helper to construct a full IRI from namespace and local name
    #[inline]
    pub fn iri(namespace: &str, local: &str) -> String {
        format!("{}{}", namespace, local)
    }
}
