//! Structured Error Handling for memrdf
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Serializable error values
//! - Key-value context and resolution hints
//!
//! # Error Categories
//!
//! - Invalid term (1xxx) - malformed IRI/literal input or a term in the wrong position
//! - Illegal state (2xxx) - an operation the target cannot perform, such as
//!   writing through the read-only union graph
//! - Syntax (3xxx) - unreadable N-Triples term or statement text
//! - Config (4xxx) - configuration file and environment issues
//!
//! # Example
//!
//! ```rust
//! use memrdf::error::{RdfError, ErrorCode};
//!
//! fn check(iri: &str) -> Result<(), RdfError> {
//!     if iri.is_empty() {
//!         return Err(RdfError::invalid_iri("IRI cannot be empty")
//!             .with_context("iri", iri));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(check("").unwrap_err().code, ErrorCode::InvalidIri);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::ntriples::ParseError;

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Invalid term errors (1xxx)
    /// Empty or malformed IRI
    InvalidIri = 1001,
    /// Malformed language tag
    InvalidLanguageTag = 1003,
    /// Term kind not allowed in this triple/quad position
    InvalidPosition = 1004,

    // Illegal state errors (2xxx)
    /// Write attempted through a read-only view
    ReadOnlyView = 2001,

    // Syntax errors (3xxx)
    /// Unreadable N-Triples text
    InvalidSyntax = 3000,
    /// Unexpected end of input
    UnexpectedEof = 3001,

    // Config errors (4xxx)
    /// Generic config error
    ConfigError = 4000,
    /// Invalid config syntax
    InvalidConfigSyntax = 4002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidIri => "Invalid IRI",
            ErrorCode::InvalidLanguageTag => "Invalid language tag",
            ErrorCode::InvalidPosition => "Term not allowed in this position",

            ErrorCode::ReadOnlyView => "View is read-only",

            ErrorCode::InvalidSyntax => "Invalid N-Triples syntax",
            ErrorCode::UnexpectedEof => "Unexpected end of input",

            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
        }
    }

    /// Check if this code belongs to the invalid term category
    pub fn is_invalid_term(&self) -> bool {
        (1000..2000).contains(&self.code())
    }

    /// Check if this code belongs to the illegal state category
    pub fn is_illegal_state(&self) -> bool {
        (2000..3000).contains(&self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
}

impl ErrorContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for memrdf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdfError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl RdfError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create an invalid IRI error
    pub fn invalid_iri(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidIri, message)
    }

    /// Create an invalid language tag error
    pub fn invalid_language_tag(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidLanguageTag, message)
    }

    /// Create an error for a term in a position it may not occupy
    pub fn invalid_position(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPosition, message)
    }

    /// Create an error for a write through a read-only view
    pub fn read_only(view: &str) -> Self {
        Self::new(ErrorCode::ReadOnlyView, format!("{} is read-only", view))
    }

    /// Create a syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSyntax, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if this is an invalid term error
    pub fn is_invalid_term(&self) -> bool {
        self.code.is_invalid_term()
    }

    /// Check if this is an illegal state error
    pub fn is_illegal_state(&self) -> bool {
        self.code.is_illegal_state()
    }
}

impl fmt::Display for RdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for RdfError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<ConfigError> for RdfError {
    fn from(err: ConfigError) -> Self {
        let code = match err {
            ConfigError::ParseError(..) => ErrorCode::InvalidConfigSyntax,
            _ => ErrorCode::ConfigError,
        };
        RdfError::new(code, err.to_string())
    }
}

impl From<ParseError> for RdfError {
    fn from(err: ParseError) -> Self {
        let message = err.to_string();
        match err {
            ParseError::Term(inner) => inner,
            ParseError::UnexpectedEof => RdfError::new(ErrorCode::UnexpectedEof, message),
            ParseError::Syntax { position, .. } => {
                RdfError::syntax(message).with_context("position", position.to_string())
            }
        }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using RdfError
pub type RdfResult<T> = Result<T, RdfError>;

// ============================================================================
// Tests
// ============================================================================
