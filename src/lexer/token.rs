//! Token definitions for the PQEK language
//!
//! This module defines all token types used in lexical analysis.

use crate::error::SourceLocation;
use crate::types::TypeInfo;
use std::fmt;

/// A token in the PQEK language
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Exact source text, quotes included for strings
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: String, location: SourceLocation) -> Self {
        Self {
            token_type,
            lexeme,
            location,
        }
    }
}

/// Token types in the PQEK language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Literals
    String,     // "..."
    Real,       // 12,5
    Integer,    // 12

    // Identifiers and keywords
    Identifier,
    Keyword(Keyword),

    // Arithmetic
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /

    Assign,     // =

    // Punctuation
    Dot,        // .
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;
}

impl TokenType {
    /// Grammar-kind name, as shown in token dumps and parse errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Real => "REAL",
            Self::Integer => "INTEGER",
            Self::Identifier => "IDENT",
            Self::Keyword(kw) if kw.is_type() => "TYPE",
            Self::Keyword(_) => "FUNCTION",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "TIMES",
            Self::Slash => "DIVIDE",
            Self::Assign => "ASSIGN",
            Self::Dot => "DOT",
            Self::LeftParen => "LPAREN",
            Self::RightParen => "RPAREN",
            Self::Semicolon => "SEMICOLON",
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Keyword(kw) if kw.is_type())
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Keyword(kw) if !kw.is_type())
    }
}

/// Reserved words in the PQEK language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Types
    Entero,
    Real,
    Texto,

    // Functions
    Captura,
    Mensaje,
}

impl Keyword {
    /// Get keyword from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Entero" => Some(Self::Entero),
            "Real" => Some(Self::Real),
            "Texto" => Some(Self::Texto),
            "Captura" => Some(Self::Captura),
            "Mensaje" => Some(Self::Mensaje),
            _ => None,
        }
    }

    /// Get string representation of keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entero => "Entero",
            Self::Real => "Real",
            Self::Texto => "Texto",
            Self::Captura => "Captura",
            Self::Mensaje => "Mensaje",
        }
    }

    pub fn is_type(&self) -> bool {
        self.type_info().is_some()
    }

    /// The type a type keyword names
    pub fn type_info(&self) -> Option<TypeInfo> {
        match self {
            Self::Entero => Some(TypeInfo::Entero),
            Self::Real => Some(TypeInfo::Real),
            Self::Texto => Some(TypeInfo::Texto),
            Self::Captura | Self::Mensaje => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(TOKEN {}, '{}')", self.token_type, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("Entero"), Some(Keyword::Entero));
        assert_eq!(Keyword::from_str("Captura"), Some(Keyword::Captura));
        assert_eq!(Keyword::from_str("Mensaje"), Some(Keyword::Mensaje));
        assert_eq!(Keyword::from_str("invalid"), None);
        // Advertised control-flow words are plain identifiers
        assert_eq!(Keyword::from_str("Si"), None);
        assert_eq!(Keyword::from_str("Mientras"), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenType::Keyword(Keyword::Real).name(), "TYPE");
        assert_eq!(TokenType::Keyword(Keyword::Mensaje).name(), "FUNCTION");
        assert_eq!(TokenType::Identifier.name(), "IDENT");
        assert!(TokenType::Keyword(Keyword::Texto).is_type());
        assert!(TokenType::Keyword(Keyword::Captura).is_function());
        assert!(!TokenType::Identifier.is_function());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenType::Real, "12,5".to_string(), SourceLocation::at(1, 5));
        assert_eq!(token.to_string(), "(TOKEN REAL, '12,5')");
    }
}
