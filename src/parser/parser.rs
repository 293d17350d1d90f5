//! Parser implementation
//!
//! Recursive-descent parser for the PQEK grammar:
//!
//! ```text
//! program     := statement*
//! statement   := (declaration | assignment | read | write) ';'
//! declaration := IDENT TYPE
//! assignment  := IDENT '=' expr
//! read        := IDENT '=' FUNCTION '.' TYPE '(' ')'
//! write       := FUNCTION '.' TYPE '(' STRING ')'
//! expr        := term (('+' | '-') term)*
//! term        := factor (('*' | '/') factor)*
//! factor      := '(' expr ')' | INTEGER | REAL | STRING | IDENT
//! ```
//!
//! The first token that cannot continue a production aborts parsing.

use std::iter::Peekable;

use log::debug;

use super::ast::*;
use crate::error::{PqekError, PqekResult};
use crate::lexer::{Token, TokenType};
use crate::types::TypeInfo;

/// Parser for PQEK source code
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Create a new parser pulling tokens from `tokens` on demand
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter().peekable(),
        }
    }

    /// Parse tokens into a program
    pub fn parse(&mut self) -> PqekResult<Program> {
        let mut statements = Vec::new();

        while self.tokens.peek().is_some() {
            statements.push(self.statement()?);
        }

        debug!("parsed {} statement(s)", statements.len());
        Ok(Program { statements })
    }

    // ===== Statements =====

    fn statement(&mut self) -> PqekResult<Stmt> {
        let token = self.advance()?;

        let stmt = match token.token_type {
            TokenType::Identifier => {
                let next = self.advance()?;
                match next.token_type {
                    TokenType::Keyword(keyword) if keyword.is_type() => Stmt::VarDecl {
                        name: token.lexeme,
                        declared_type: self.type_of(&next)?,
                        location: token.location,
                    },
                    TokenType::Assign => {
                        let value = if self.check_function() {
                            self.read_expression()?
                        } else {
                            self.expression()?
                        };
                        Stmt::Assign {
                            name: token.lexeme,
                            value,
                            location: token.location,
                        }
                    }
                    _ => return Err(Self::unexpected(&next)),
                }
            }
            TokenType::Keyword(keyword) if !keyword.is_type() => self.write_statement(token)?,
            _ => return Err(Self::unexpected(&token)),
        };

        self.consume(TokenType::Semicolon)?;
        Ok(stmt)
    }

    /// FUNCTION '.' TYPE '(' ')' on the right-hand side of an assignment
    fn read_expression(&mut self) -> PqekResult<Expr> {
        let function = self.advance()?;
        self.consume(TokenType::Dot)?;
        let requested_type = self.consume_type()?;
        self.consume(TokenType::LeftParen)?;
        self.consume(TokenType::RightParen)?;

        Ok(Expr::Captura {
            requested_type,
            location: function.location,
        })
    }

    /// FUNCTION '.' TYPE '(' STRING ')', the function token already consumed
    fn write_statement(&mut self, function: Token) -> PqekResult<Stmt> {
        self.consume(TokenType::Dot)?;
        self.consume_type()?;
        self.consume(TokenType::LeftParen)?;
        let text = self.consume(TokenType::String)?;
        self.consume(TokenType::RightParen)?;

        Ok(Stmt::Mensaje {
            text: strip_quotes(&text.lexeme),
            location: function.location,
        })
    }

    // ===== Expressions =====

    fn expression(&mut self) -> PqekResult<Expr> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_operator(&[TokenType::Plus, TokenType::Minus]) {
            let location = operator.location;
            let right = self.term()?;
            expr = Expr::BinaryOp {
                left: Box::new(expr),
                operator: Self::operator_of(&operator),
                right: Box::new(right),
                location,
            };
        }

        Ok(expr)
    }

    fn term(&mut self) -> PqekResult<Expr> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_operator(&[TokenType::Star, TokenType::Slash]) {
            let location = operator.location;
            let right = self.factor()?;
            expr = Expr::BinaryOp {
                left: Box::new(expr),
                operator: Self::operator_of(&operator),
                right: Box::new(right),
                location,
            };
        }

        Ok(expr)
    }

    fn factor(&mut self) -> PqekResult<Expr> {
        let token = self.advance()?;
        let location = token.location;

        match token.token_type {
            TokenType::LeftParen => {
                let expr = self.expression()?;
                self.consume(TokenType::RightParen)?;
                Ok(expr)
            }
            TokenType::Integer => Ok(Expr::Number {
                raw: token.lexeme,
                kind: NumberKind::Entero,
                location,
            }),
            TokenType::Real => Ok(Expr::Number {
                raw: token.lexeme,
                kind: NumberKind::Real,
                location,
            }),
            TokenType::String => Ok(Expr::String {
                value: strip_quotes(&token.lexeme),
                location,
            }),
            TokenType::Identifier => Ok(Expr::VarRef {
                name: token.lexeme,
                location,
            }),
            _ => Err(Self::unexpected(&token)),
        }
    }

    // ===== Helper Methods =====

    fn advance(&mut self) -> PqekResult<Token> {
        self.tokens.next().ok_or_else(|| {
            PqekError::parse_error("Unexpected end of input: the program is incomplete", None)
        })
    }

    fn check_function(&mut self) -> bool {
        matches!(self.tokens.peek(), Some(token) if token.token_type.is_function())
    }

    fn match_operator(&mut self, types: &[TokenType]) -> Option<Token> {
        let matched = matches!(self.tokens.peek(), Some(token) if types.contains(&token.token_type));
        if matched {
            self.tokens.next()
        } else {
            None
        }
    }

    fn consume(&mut self, token_type: TokenType) -> PqekResult<Token> {
        let token = self.advance()?;
        if token.token_type == token_type {
            Ok(token)
        } else {
            Err(Self::unexpected(&token))
        }
    }

    fn consume_type(&mut self) -> PqekResult<TypeInfo> {
        let token = self.advance()?;
        self.type_of(&token)
    }

    fn type_of(&self, token: &Token) -> PqekResult<TypeInfo> {
        match token.token_type {
            TokenType::Keyword(keyword) => keyword.type_info().ok_or_else(|| Self::unexpected(token)),
            _ => Err(Self::unexpected(token)),
        }
    }

    fn operator_of(token: &Token) -> Operator {
        match token.token_type {
            TokenType::Plus => Operator::Add,
            TokenType::Minus => Operator::Subtract,
            TokenType::Star => Operator::Multiply,
            TokenType::Slash => Operator::Divide,
            _ => unreachable!("match_operator only yields arithmetic tokens"),
        }
    }

    fn unexpected(token: &Token) -> PqekError {
        PqekError::parse_error(
            format!(
                "Unexpected token '{}' (kind={}) at line {}",
                token.lexeme,
                token.token_type.name(),
                token.location.line
            ),
            Some(token.location),
        )
    }
}

fn strip_quotes(lexeme: &str) -> String {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
        .to_string()
}
