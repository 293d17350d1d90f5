//! Type system module
//!
//! This module defines the three value types of the language and the rules
//! for combining them.

pub mod type_def;

pub use type_def::TypeInfo;
