//! Error handling and diagnostics for the PQEK language
//!
//! Every stage of the pipeline reports its problems as a `PqekError`. The
//! stages differ in how they propagate them: lexical errors are collected,
//! a parse error is fatal, semantic errors are aggregated and runtime
//! errors are logged per statement.

use std::fmt;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for PQEK operations
pub type PqekResult<T> = Result<T, PqekError>;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Character offset from the start of the source (0-based)
    pub offset: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Create a source location when the offset is not relevant
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Main error type for the PQEK language
#[derive(Debug, Clone, PartialEq)]
pub enum PqekError {
    /// Lexical analysis error (never fatal to tokenization)
    LexerError {
        message: String,
        location: SourceLocation,
    },
    /// Parsing error; `location` is `None` when the input ended early
    ParseError {
        message: String,
        location: Option<SourceLocation>,
    },
    /// A single semantic defect
    SemanticError {
        message: String,
        location: SourceLocation,
    },
    /// Every semantic defect found in one analysis pass, in discovery order
    SemanticErrors(Vec<PqekError>),
    /// Runtime error raised while executing one statement
    RuntimeError {
        message: String,
        location: Option<SourceLocation>,
    },
}

impl PqekError {
    /// Create a new lexer error
    pub fn lexer_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::LexerError {
            message: message.into(),
            location,
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }

    /// Create a new semantic error
    pub fn semantic_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::SemanticError {
            message: message.into(),
            location,
        }
    }

    /// Create a new runtime error
    pub fn runtime_error(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self::RuntimeError {
            message: message.into(),
            location,
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::LexerError { .. } => "Lexer Error",
            Self::ParseError { .. } => "Parse Error",
            Self::SemanticError { .. } | Self::SemanticErrors(_) => "Semantic Error",
            Self::RuntimeError { .. } => "Runtime Error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::LexerError { message, .. }
            | Self::ParseError { message, .. }
            | Self::SemanticError { message, .. }
            | Self::RuntimeError { message, .. } => message.clone(),
            Self::SemanticErrors(errors) => {
                let mut message = format!("{} problem(s) found:", errors.len());
                for error in errors {
                    message.push_str("\n   ➤ ");
                    message.push_str(&error.message());
                    if let Some(location) = error.location() {
                        message.push_str(&format!(" at {}", location));
                    }
                }
                message
            }
        }
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::LexerError { location, .. } | Self::SemanticError { location, .. } => {
                Some(location)
            }
            Self::ParseError { location, .. } | Self::RuntimeError { location, .. } => {
                location.as_ref()
            }
            Self::SemanticErrors(_) => None,
        }
    }

    /// The individual errors carried by this error: the members of an
    /// aggregate, or the error itself.
    pub fn errors(&self) -> Vec<&PqekError> {
        match self {
            Self::SemanticErrors(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }
}

impl fmt::Display for PqekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(f, "{}: {} at {}", self.kind(), self.message(), location)
        } else {
            write!(f, "{}: {}", self.kind(), self.message())
        }
    }
}

impl std::error::Error for PqekError {}
