//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST).

pub mod ast;
pub mod parser;

pub use ast::{Expr, NumberKind, Operator, Program, Stmt};
pub use parser::Parser;
