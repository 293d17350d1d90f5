//! Symbol table for semantic analysis
//!
//! One global table: no nested scopes and no shadowing.

use std::collections::HashMap;

use crate::types::TypeInfo;

/// A declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub declared_type: TypeInfo,
    /// Symbolic value of the last accepted assignment
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with no value. Returns `false` if it already exists;
    /// the existing entry is left untouched.
    pub fn declare(&mut self, name: &str, declared_type: TypeInfo) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                declared_type,
                value: None,
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Store a value for a declared name; undeclared names are ignored.
    pub fn assign(&mut self, name: &str, value: Option<String>) {
        if let Some(symbol) = self.symbols.get_mut(name) {
            symbol.value = value;
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_once() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", TypeInfo::Entero));
        assert!(!table.declare("x", TypeInfo::Real));
        assert_eq!(table.get("x").map(|s| s.declared_type), Some(TypeInfo::Entero));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_assign_only_declared() {
        let mut table = SymbolTable::new();
        table.declare("x", TypeInfo::Texto);
        table.assign("x", Some("hola".to_string()));
        table.assign("y", Some("1".to_string()));

        assert_eq!(table.get("x").and_then(|s| s.value.as_deref()), Some("hola"));
        assert!(!table.contains("y"));
    }
}
