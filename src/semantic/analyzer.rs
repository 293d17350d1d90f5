//! Semantic analyzer implementation
//!
//! A single pass over the program that enforces declare-before-use and the
//! type-compatibility rules. Defects are collected, not raised, so one run
//! reports every problem in the program. An expression that failed to type
//! is untyped, and every check it reaches afterwards fails again: the
//! operator using it and the assignment storing it each record a defect.
//! Alongside the types the analyzer tracks a symbolic value for each
//! variable, e.g. `(x + 3)`.

use log::debug;

use super::symbols::SymbolTable;
use crate::error::{PqekError, PqekResult, SourceLocation};
use crate::parser::ast::{Expr, Program, Stmt};
use crate::types::TypeInfo;

/// Static view of an expression. A `None` type means the expression could
/// not be typed.
#[derive(Debug, Clone, PartialEq)]
struct Checked {
    value: Option<String>,
    ty: Option<TypeInfo>,
}

impl Checked {
    fn typed(value: Option<String>, ty: TypeInfo) -> Self {
        Self { value, ty: Some(ty) }
    }

    fn untyped() -> Self {
        Self { value: None, ty: None }
    }
}

/// Semantic analyzer
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    errors: Vec<PqekError>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a whole program. Fails with `PqekError::SemanticErrors`
    /// listing every defect when at least one was found.
    pub fn analyze(&mut self, program: &Program) -> PqekResult<()> {
        for stmt in &program.statements {
            self.check_stmt(stmt);
        }

        debug!(
            "semantic analysis: {} symbol(s), {} defect(s)",
            self.symbols.len(),
            self.errors.len()
        );

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(PqekError::SemanticErrors(std::mem::take(&mut self.errors)))
        }
    }

    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, declared_type, location } => {
                if !self.symbols.declare(name, *declared_type) {
                    self.error(
                        format!("duplicate declaration of '{}': it is already declared", name),
                        location,
                    );
                }
            }

            Stmt::Assign { name, value, location } => {
                let declared_type = match self.symbols.get(name) {
                    Some(symbol) => symbol.declared_type,
                    None => {
                        self.error(format!("assignment to undeclared target '{}'", name), location);
                        return;
                    }
                };

                let checked = self.check_expr(value);
                match checked.ty {
                    Some(actual) if declared_type.accepts(actual) => {
                        self.symbols.assign(name, checked.value);
                    }
                    actual => {
                        self.error(
                            format!(
                                "incompatible type: cannot assign {} to '{}' declared as {}",
                                type_name(actual),
                                name,
                                declared_type
                            ),
                            location,
                        );
                    }
                }
            }

            // Untyped print
            Stmt::Mensaje { .. } => {}
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Checked {
        match expr {
            Expr::Captura { requested_type, .. } => {
                Checked::typed(Some(format!("Captura({})", requested_type)), *requested_type)
            }

            Expr::Number { raw, kind, .. } => Checked::typed(Some(raw.clone()), kind.type_info()),

            Expr::String { value, .. } => Checked::typed(Some(value.clone()), TypeInfo::Texto),

            Expr::VarRef { name, location } => match self.symbols.get(name) {
                // Unassigned variables carry no value but keep their type
                Some(symbol) => Checked::typed(symbol.value.clone(), symbol.declared_type),
                None => {
                    self.error(format!("reference to undeclared variable '{}'", name), location);
                    Checked::untyped()
                }
            },

            Expr::BinaryOp { left, operator, right, location } => {
                let left = self.check_expr(left);
                let right = self.check_expr(right);

                let promoted = match (left.ty, right.ty) {
                    (Some(left_ty), Some(right_ty)) => TypeInfo::promote(left_ty, right_ty),
                    _ => None,
                };

                match promoted {
                    Some(ty) => {
                        let value = format!(
                            "({} {} {})",
                            left.value.as_deref().unwrap_or("?"),
                            operator,
                            right.value.as_deref().unwrap_or("?")
                        );
                        Checked::typed(Some(value), ty)
                    }
                    None => {
                        self.error(
                            format!(
                                "cannot apply '{}' to {} and {}: both operands must be Entero or Real",
                                operator,
                                type_name(left.ty),
                                type_name(right.ty)
                            ),
                            location,
                        );
                        Checked::untyped()
                    }
                }
            }
        }
    }

    fn error(&mut self, message: String, location: &SourceLocation) {
        self.errors.push(PqekError::semantic_error(message, *location));
    }
}

fn type_name(ty: Option<TypeInfo>) -> String {
    match ty {
        Some(ty) => ty.to_string(),
        None => "an untyped value".to_string(),
    }
}
