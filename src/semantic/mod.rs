//! Semantic analysis module
//!
//! This module checks declarations and types before a program runs.

pub mod analyzer;
pub mod symbols;

pub use analyzer::SemanticAnalyzer;
pub use symbols::{Symbol, SymbolTable};
