//! N-Triples term reader
//!
//! Reads single terms and single statement lines in the form produced by the
//! `Display` impls of [`Term`], [`Triple`] and [`Quad`], so anything printed
//! can be read back through a [`TermFactory`]. Blank node labels resolve with
//! [`TermFactory::create_named_blank_node`]: reading the same label twice
//! through one factory gives the same node.
//!
//! Whole documents (comments, multiple lines) are not handled here.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, anychar, char, multispace0, space0},
    combinator::{all_consuming, map, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult, Offset,
};

use crate::error::RdfError;
use crate::term::{Quad, Term, TermFactory, Triple};

/// N-Triples reader error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error(transparent)]
    Term(#[from] RdfError),
}

/// A term as written, before the factory builds it
#[derive(Debug, Clone, Copy, PartialEq)]
enum RawTerm<'a> {
    Iri(&'a str),
    Blank(&'a str),
    Literal { body: &'a str, suffix: Option<Suffix<'a>> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Suffix<'a> {
    Lang(&'a str),
    Datatype(&'a str),
}

type RawTriple<'a> = (RawTerm<'a>, RawTerm<'a>, RawTerm<'a>);

// ============================================================================
// Grammar
// ============================================================================

/// Parse an IRI reference <...>
fn iri_ref(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_while(|c| c != '>' && c != '\n' && c != '\r'), char('>'))(input)
}

/// Parse a blank node _:label
fn blank_label(input: &str) -> IResult<&str, &str> {
    preceded(tag("_:"), take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-'))(input)
}

/// Parse the escaped body of a "..." string
fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        recognize(many0(alt((
            take_while1(|c| c != '"' && c != '\\' && c != '\n' && c != '\r'),
            recognize(pair(char('\\'), anychar)),
        )))),
        char('"'),
    )(input)
}

/// Parse a language tag (without the @)
fn language(input: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, many0(pair(char('-'), alphanumeric1))))(input)
}

fn literal(input: &str) -> IResult<&str, RawTerm<'_>> {
    let (input, body) = quoted(input)?;
    let (input, suffix) = opt(alt((
        map(preceded(char('@'), language), Suffix::Lang),
        map(preceded(tag("^^"), iri_ref), Suffix::Datatype),
    )))(input)?;
    Ok((input, RawTerm::Literal { body, suffix }))
}

fn term(input: &str) -> IResult<&str, RawTerm<'_>> {
    alt((map(iri_ref, RawTerm::Iri), map(blank_label, RawTerm::Blank), literal))(input)
}

fn triple_terms(input: &str) -> IResult<&str, RawTriple<'_>> {
    tuple((
        preceded(multispace0, term),
        preceded(space0, term),
        preceded(space0, term),
    ))(input)
}

fn end_of_statement(input: &str) -> IResult<&str, char> {
    delimited(space0, char('.'), multispace0)(input)
}

fn triple_line(input: &str) -> IResult<&str, RawTriple<'_>> {
    let (input, terms) = triple_terms(input)?;
    let (input, _) = end_of_statement(input)?;
    Ok((input, terms))
}

fn quad_line(input: &str) -> IResult<&str, (RawTriple<'_>, Option<RawTerm<'_>>)> {
    let (input, terms) = triple_terms(input)?;
    let (input, graph) = opt(preceded(space0, term))(input)?;
    let (input, _) = end_of_statement(input)?;
    Ok((input, (terms, graph)))
}

// ============================================================================
// Public API
// ============================================================================

/// Read one term, e.g. `<http://example.org/a>`, `"chat"@fr` or `_:b0`
pub fn parse_term(factory: &TermFactory, input: &str) -> Result<Term, ParseError> {
    let (_, raw) = all_consuming(delimited(multispace0, term, multispace0))(input)
        .map_err(|e| syntax_error(input, e))?;
    build_term(factory, input, raw)
}

/// Read one `subject predicate object .` line
pub fn parse_triple(factory: &TermFactory, input: &str) -> Result<Triple, ParseError> {
    let (_, (s, p, o)) = all_consuming(triple_line)(input).map_err(|e| syntax_error(input, e))?;
    build_triple(factory, input, s, p, o)
}

/// Read one `subject predicate object [graph] .` line
pub fn parse_quad(factory: &TermFactory, input: &str) -> Result<Quad, ParseError> {
    let (_, ((s, p, o), g)) = all_consuming(quad_line)(input).map_err(|e| syntax_error(input, e))?;
    let triple = build_triple(factory, input, s, p, o)?;
    let graph_name = g.map(|g| build_term(factory, input, g)).transpose()?;
    Ok(Quad::from_triple(triple, graph_name)?)
}

fn build_triple(
    factory: &TermFactory,
    source: &str,
    subject: RawTerm<'_>,
    predicate: RawTerm<'_>,
    object: RawTerm<'_>,
) -> Result<Triple, ParseError> {
    Ok(factory.create_triple(
        build_term(factory, source, subject)?,
        build_term(factory, source, predicate)?,
        build_term(factory, source, object)?,
    )?)
}

fn build_term(factory: &TermFactory, source: &str, raw: RawTerm<'_>) -> Result<Term, ParseError> {
    let term = match raw {
        RawTerm::Iri(iri) => factory.create_iri(&decode(source, iri, unescape_iri)?)?,
        RawTerm::Blank(label) => factory.create_named_blank_node(label),
        RawTerm::Literal { body, suffix } => {
            let lexical = decode(source, body, unescape)?;
            match suffix {
                None => factory.create_literal(&lexical),
                Some(Suffix::Lang(tag)) => factory.create_lang_literal(&lexical, tag)?,
                Some(Suffix::Datatype(datatype)) => {
                    factory.create_typed_literal(&lexical, &decode(source, datatype, unescape_iri)?)?
                }
            }
        }
    };
    Ok(term)
}

/// Run a decoder over a slice of `source`, placing its errors in `source`
fn decode(
    source: &str,
    body: &str,
    decoder: fn(&str) -> Result<String, (usize, String)>,
) -> Result<String, ParseError> {
    decoder(body).map_err(|(at, message)| ParseError::Syntax {
        position: source.offset(body) + at,
        message,
    })
}

/// Decode string escapes; errors carry the byte offset of the backslash
fn unescape(body: &str) -> Result<String, (usize, String)> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some((_, 't')) => '\t',
            Some((_, 'b')) => '\u{8}',
            Some((_, 'n')) => '\n',
            Some((_, 'r')) => '\r',
            Some((_, 'f')) => '\u{c}',
            Some((_, '"')) => '"',
            Some((_, '\'')) => '\'',
            Some((_, '\\')) => '\\',
            Some((_, 'u')) => hex_escape(&mut chars, 4).ok_or_else(|| (i, "invalid \\u escape".to_string()))?,
            Some((_, 'U')) => hex_escape(&mut chars, 8).ok_or_else(|| (i, "invalid \\U escape".to_string()))?,
            Some((_, other)) => return Err((i, format!("unknown escape \\{}", other))),
            None => return Err((i, "dangling backslash".to_string())),
        };
        out.push(decoded);
    }
    Ok(out)
}

/// Decode the `\u` and `\U` escapes allowed inside an IRI reference
fn unescape_iri(body: &str) -> Result<String, (usize, String)> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some((_, 'u')) => hex_escape(&mut chars, 4),
            Some((_, 'U')) => hex_escape(&mut chars, 8),
            _ => None,
        };
        out.push(decoded.ok_or_else(|| (i, "invalid escape in IRI".to_string()))?);
    }
    Ok(out)
}

fn hex_escape(chars: &mut std::str::CharIndices<'_>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    char::from_u32(code)
}

fn syntax_error(source: &str, err: nom::Err<nom::error::Error<&str>>) -> ParseError {
    match err {
        nom::Err::Incomplete(_) => ParseError::UnexpectedEof,
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if e.input.trim().is_empty() {
                ParseError::UnexpectedEof
            } else {
                let near: String = e.input.chars().take(16).collect();
                ParseError::Syntax {
                    position: source.offset(e.input),
                    message: format!("unexpected input near {:?}", near),
                }
            }
        }
    }
}
