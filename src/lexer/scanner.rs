//! Lexer/Scanner implementation for the PQEK language
//!
//! The lexer is a lazy iterator over tokens. Invalid characters never stop
//! it: each one is recorded as a diagnostic and skipped.

use log::trace;

use super::token::{Keyword, Token, TokenType};
use crate::error::{PqekError, SourceLocation};

/// Lexer for PQEK source code
#[derive(Debug, Clone)]
pub struct Lexer {
    source: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    zero_based_error_lines: bool,
    diagnostics: Vec<PqekError>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            zero_based_error_lines: false,
            diagnostics: Vec::new(),
        }
    }

    /// Report lexical errors one line lower than the line they occur on,
    /// the legacy line-numbering convention.
    pub fn zero_based_error_lines(mut self, enabled: bool) -> Self {
        self.zero_based_error_lines = enabled;
        self
    }

    /// Lexical errors recorded so far
    pub fn diagnostics(&self) -> &[PqekError] {
        &self.diagnostics
    }

    /// Take the recorded lexical errors, leaving the list empty
    pub fn take_diagnostics(&mut self) -> Vec<PqekError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Rewind to the beginning of the source and clear the diagnostics
    pub fn reset(&mut self) {
        self.start = 0;
        self.current = 0;
        self.line = 1;
        self.column = 1;
        self.diagnostics.clear();
    }

    /// Tokenize the rest of the source
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Scan a single token; `None` when the characters produced no token
    fn scan_token(&mut self) -> Option<Token> {
        let c = self.advance();

        match c {
            // Whitespace (skip)
            ' ' | '\t' | '\r' => None,

            '\n' => {
                self.line += 1;
                self.column = 1;
                None
            }

            '+' => self.make_token(TokenType::Plus),
            '-' => self.make_token(TokenType::Minus),
            '*' => self.make_token(TokenType::Star),
            '/' => self.make_token(TokenType::Slash),
            '=' => self.make_token(TokenType::Assign),
            '.' => self.make_token(TokenType::Dot),
            '(' => self.make_token(TokenType::LeftParen),
            ')' => self.make_token(TokenType::RightParen),
            ';' => self.make_token(TokenType::Semicolon),

            '"' => self.scan_string(),

            c if c.is_ascii_digit() => self.scan_number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

            _ => {
                self.report_unexpected(c);
                None
            }
        }
    }

    /// Scan a string literal. Without a closing quote the opening quote is
    /// reported as an invalid character and lexing resumes right after it.
    fn scan_string(&mut self) -> Option<Token> {
        let closing = self.source[self.current..].iter().position(|&c| c == '"');
        let Some(length) = closing else {
            self.report_unexpected('"');
            return None;
        };

        let location = self.token_location();
        for _ in 0..=length {
            if self.advance() == '\n' {
                self.line += 1;
                self.column = 1;
            }
        }

        Some(Token::new(TokenType::String, self.lexeme(), location))
    }

    /// Scan a number literal: `digits ',' digits` is real, `digits` is integer
    fn scan_number(&mut self) -> Option<Token> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == ',' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume ','
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            self.make_token(TokenType::Real)
        } else {
            self.make_token(TokenType::Integer)
        }
    }

    /// Scan an identifier or reserved word
    fn scan_identifier(&mut self) -> Option<Token> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme = self.lexeme();
        let token_type = match Keyword::from_str(&lexeme) {
            Some(keyword) => TokenType::Keyword(keyword),
            None => TokenType::Identifier,
        };

        self.make_token(token_type)
    }

    fn report_unexpected(&mut self, c: char) {
        let mut location = self.token_location();
        if self.zero_based_error_lines {
            location.line -= 1;
        }
        let message = format!("Unexpected character '{}'", c);
        trace!("lexical error: {}", message);
        self.diagnostics.push(PqekError::lexer_error(message, location));

        // Skip exactly the offending character
        self.current = self.start + 1;
        self.column = location.column + 1;
    }

    fn make_token(&self, token_type: TokenType) -> Option<Token> {
        Some(Token::new(token_type, self.lexeme(), self.token_location()))
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    /// Location of the character at `start`
    fn token_location(&self) -> SourceLocation {
        SourceLocation::new(
            self.line,
            self.column - (self.current - self.start),
            self.start,
        )
    }

    /// Advance to the next character
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    /// Peek at the next character without consuming it
    fn peek_next(&self) -> char {
        self.source.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            if let Some(token) = self.scan_token() {
                trace!("token {}", token);
                return Some(token);
            }
        }
        None
    }
}
