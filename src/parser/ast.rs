//! Abstract Syntax Tree definitions
//!
//! This module defines the AST node types for the PQEK language.

use std::fmt;

use crate::error::SourceLocation;
use crate::types::TypeInfo;

/// Root AST node representing a complete program
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Variable declaration: x Entero;
    VarDecl {
        name: String,
        declared_type: TypeInfo,
        location: SourceLocation,
    },

    /// Assignment: x = expr; (also the target of `x = Captura.T();`)
    Assign {
        name: String,
        value: Expr,
        location: SourceLocation,
    },

    /// Print statement: Mensaje.Texto("...");
    Mensaje {
        text: String,
        location: SourceLocation,
    },
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Read a value of the requested type from the user
    Captura {
        requested_type: TypeInfo,
        location: SourceLocation,
    },

    /// Binary arithmetic operation
    BinaryOp {
        left: Box<Expr>,
        operator: Operator,
        right: Box<Expr>,
        location: SourceLocation,
    },

    /// Number literal; real literals keep their comma-decimal text
    Number {
        raw: String,
        kind: NumberKind,
        location: SourceLocation,
    },

    /// String literal, quotes stripped
    String {
        value: String,
        location: SourceLocation,
    },

    /// Variable reference
    VarRef {
        name: String,
        location: SourceLocation,
    },
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Kind of a number literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Entero,
    Real,
}

impl NumberKind {
    pub fn type_info(&self) -> TypeInfo {
        match self {
            Self::Entero => TypeInfo::Entero,
            Self::Real => TypeInfo::Real,
        }
    }
}

impl Stmt {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::VarDecl { location, .. }
            | Stmt::Assign { location, .. }
            | Stmt::Mensaje { location, .. } => location,
        }
    }

    /// Node-kind name used in execution logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::VarDecl { .. } => "VarDecl",
            Stmt::Assign { .. } => "Assign",
            Stmt::Mensaje { .. } => "Mensaje",
        }
    }
}
