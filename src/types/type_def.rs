//! Type definitions
//!
//! This module defines the type system for PQEK.

use std::fmt;

/// Type information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeInfo {
    Entero,
    Real,
    Texto,
}

impl TypeInfo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entero => "Entero",
            Self::Real => "Real",
            Self::Texto => "Texto",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Entero | Self::Real)
    }

    /// Whether a value of type `actual` may be stored in a variable of this type.
    ///
    /// `Entero` and `Real` accept each other; `Texto` only accepts itself.
    pub fn accepts(&self, actual: TypeInfo) -> bool {
        *self == actual || (self.is_numeric() && actual.is_numeric())
    }

    /// Result type of an arithmetic operation, or `None` if either operand
    /// is not numeric.
    pub fn promote(left: TypeInfo, right: TypeInfo) -> Option<TypeInfo> {
        match (left, right) {
            (Self::Texto, _) | (_, Self::Texto) => None,
            (Self::Real, _) | (_, Self::Real) => Some(Self::Real),
            _ => Some(Self::Entero),
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_reserved_word() {
        assert_eq!(TypeInfo::Entero.to_string(), "Entero");
        assert_eq!(TypeInfo::Texto.to_string(), "Texto");
    }

    #[test]
    fn test_numeric_types_accept_each_other() {
        assert!(TypeInfo::Entero.accepts(TypeInfo::Real));
        assert!(TypeInfo::Real.accepts(TypeInfo::Entero));
        assert!(TypeInfo::Texto.accepts(TypeInfo::Texto));
        assert!(!TypeInfo::Entero.accepts(TypeInfo::Texto));
        assert!(!TypeInfo::Texto.accepts(TypeInfo::Real));
    }

    #[test]
    fn test_promotion() {
        assert_eq!(TypeInfo::promote(TypeInfo::Entero, TypeInfo::Entero), Some(TypeInfo::Entero));
        assert_eq!(TypeInfo::promote(TypeInfo::Entero, TypeInfo::Real), Some(TypeInfo::Real));
        assert_eq!(TypeInfo::promote(TypeInfo::Real, TypeInfo::Real), Some(TypeInfo::Real));
        assert_eq!(TypeInfo::promote(TypeInfo::Texto, TypeInfo::Entero), None);
    }
}
