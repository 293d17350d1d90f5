//! Interpreter implementation
//!
//! This module implements the tree-walking interpreter for PQEK. A failing
//! statement is logged as an error and execution moves on to the next one.

use std::collections::HashMap;

use log::{debug, trace};

use super::console::{Console, Severity};
use super::value::{self, Value};
use crate::error::{PqekError, PqekResult};
use crate::parser::ast::{Expr, NumberKind, Program, Stmt};

/// Interpreter
pub struct Interpreter<C: Console> {
    console: C,
    /// Declared variables; `None` until first assigned
    memory: HashMap<String, Option<Value>>,
    failures: Vec<PqekError>,
}

impl<C: Console> Interpreter<C> {
    pub fn new(console: C) -> Self {
        Self {
            console,
            memory: HashMap::new(),
            failures: Vec::new(),
        }
    }

    /// Execute every statement in order with a fresh variable store.
    pub fn interpret(&mut self, program: &Program) {
        self.memory.clear();
        self.failures.clear();

        for stmt in &program.statements {
            trace!("executing {} at line {}", stmt.kind_name(), stmt.location().line);
            if let Err(error) = self.execute_stmt(stmt) {
                self.console.write(
                    &format!("Execution error ({}): {}", stmt.kind_name(), error.message()),
                    Severity::Error,
                );
                self.console.mark_error_line(stmt.location().line);
                self.failures.push(error);
            }
        }

        debug!(
            "executed {} statement(s), {} failed",
            program.statements.len(),
            self.failures.len()
        );
    }

    /// Runtime errors of the last run, one per failed statement
    pub fn failures(&self) -> &[PqekError] {
        &self.failures
    }

    /// Current value of a variable, if declared and assigned
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.memory.get(name).and_then(Option::as_ref)
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    fn execute_stmt(&mut self, stmt: &Stmt) -> PqekResult<()> {
        match stmt {
            Stmt::VarDecl { name, declared_type, .. } => {
                self.memory.insert(name.clone(), None);
                self.console.write(
                    &format!("Variable declared: {} ({})", name, declared_type),
                    Severity::Info,
                );
                Ok(())
            }

            Stmt::Assign { name, value, .. } => {
                let value = self.eval_expr(value)?;
                self.console.write(&format!("{} = {}", name, value), Severity::Info);
                self.memory.insert(name.clone(), Some(value));
                Ok(())
            }

            Stmt::Mensaje { text, .. } => {
                self.console.write(text, Severity::Info);
                Ok(())
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> PqekResult<Value> {
        match expr {
            Expr::Number { raw, kind: NumberKind::Entero, location } => {
                raw.parse::<i64>().map(Value::Integer).map_err(|_| {
                    PqekError::runtime_error(
                        format!("Integer literal {} is out of range", raw),
                        Some(*location),
                    )
                })
            }

            Expr::Number { raw, kind: NumberKind::Real, .. } => Ok(Value::Real(raw.clone())),

            Expr::String { value, .. } => Ok(Value::Text(value.clone())),

            Expr::VarRef { name, location } => match self.memory.get(name) {
                None => Err(PqekError::runtime_error(
                    format!("Variable '{}' does not exist", name),
                    Some(*location),
                )),
                Some(None) => Err(PqekError::runtime_error(
                    format!("unassigned variable '{}' has no value", name),
                    Some(*location),
                )),
                Some(Some(value)) => Ok(value.clone()),
            },

            Expr::Captura { requested_type, location } => {
                self.console.write(
                    &format!("Enter a value of type {}:", requested_type),
                    Severity::Info,
                );
                let input = self.console.read_blocking(*requested_type).map_err(|error| {
                    PqekError::runtime_error(error.message(), Some(*location))
                })?;
                Ok(Value::Text(input))
            }

            Expr::BinaryOp { left, operator, right, location } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;

                let runtime_error = |message: String| PqekError::runtime_error(message, Some(*location));
                let left = left.to_number().map_err(runtime_error)?;
                let right = right.to_number().map_err(runtime_error)?;

                value::apply(*operator, left, right).map_err(runtime_error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::runtime::console::MemoryConsole;
    use pretty_assertions::assert_eq;

    fn run(source: &str, inputs: &[&str]) -> Interpreter<MemoryConsole> {
        let program = Parser::new(Lexer::new(source)).parse().unwrap();
        let mut interpreter = Interpreter::new(MemoryConsole::with_inputs(inputs.iter().copied()));
        interpreter.interpret(&program);
        interpreter
    }

    #[test]
    fn test_declare_assign_and_print() {
        let interpreter = run("x Entero; x = 5; Mensaje.Texto(\"ok\");", &[]);

        assert_eq!(
            interpreter.console().texts(Severity::Info),
            vec!["Variable declared: x (Entero)", "x = 5", "ok"]
        );
        assert_eq!(interpreter.value_of("x"), Some(&Value::Integer(5)));
        assert!(interpreter.failures().is_empty());
    }

    #[test]
    fn test_real_arithmetic_uses_decimal_comma() {
        let interpreter = run("x Real; x = 3,5; y Real; y = x * 2;", &[]);

        assert_eq!(interpreter.value_of("y"), Some(&Value::Real("7,0".to_string())));
        assert!(interpreter.console().texts(Severity::Info).contains(&"y = 7,0"));
    }

    #[test]
    fn test_literals_are_kept_unchanged() {
        let interpreter = run("r Real; r = 12,50; t Texto; t = \"a b\";", &[]);
        assert_eq!(interpreter.value_of("r"), Some(&Value::Real("12,50".to_string())));
        assert_eq!(interpreter.value_of("t"), Some(&Value::Text("a b".to_string())));
    }

    #[test]
    fn test_unassigned_reference_fails_the_statement() {
        let interpreter = run("x Entero; y Entero; y = x + 1;", &[]);

        assert_eq!(interpreter.failures().len(), 1);
        assert!(interpreter.failures()[0].message().contains("unassigned variable 'x'"));
        assert_eq!(interpreter.value_of("y"), None);
    }

    #[test]
    fn test_failure_does_not_stop_the_program() {
        let source = "z Entero; z = 0; a Real; a = 10 / z; b Entero; b = 2 + 2;";
        let interpreter = run(source, &[]);

        let errors = interpreter.console().texts(Severity::Error);
        assert_eq!(errors, vec!["Execution error (Assign): Division by zero"]);
        assert_eq!(interpreter.value_of("a"), None);
        assert_eq!(interpreter.value_of("b"), Some(&Value::Integer(4)));
        assert!(interpreter.console().texts(Severity::Info).contains(&"b = 4"));
    }

    #[test]
    fn test_failing_statement_line_is_marked() {
        let interpreter = run("z Entero;\nz = 0;\nz = 1 / z;", &[]);
        assert_eq!(interpreter.console().error_lines(), &[3]);
    }

    #[test]
    fn test_captura_returns_raw_text() {
        let interpreter = run("n Entero; n = Captura.Entero(); m Entero; m = n * 2;", &["21"]);

        assert_eq!(interpreter.value_of("n"), Some(&Value::Text("21".to_string())));
        assert_eq!(interpreter.value_of("m"), Some(&Value::Integer(42)));
        assert!(interpreter
            .console()
            .texts(Severity::Info)
            .contains(&"Enter a value of type Entero:"));
    }

    #[test]
    fn test_captured_text_is_not_validated_until_used() {
        let interpreter = run("n Entero; n = Captura.Entero(); m Entero; m = n + 1;", &["abc"]);

        assert_eq!(interpreter.value_of("n"), Some(&Value::Text("abc".to_string())));
        assert_eq!(interpreter.failures().len(), 1);
        assert!(interpreter.failures()[0].message().contains("cannot use 'abc' as a number"));
    }

    #[test]
    fn test_captured_real_with_comma() {
        let interpreter = run("r Real; r = Captura.Real(); r = r + 1;", &["2,5"]);
        assert_eq!(interpreter.value_of("r"), Some(&Value::Real("3,5".to_string())));
    }

    #[test]
    fn test_store_is_fresh_for_each_run() {
        let program = Parser::new(Lexer::new("x Entero; x = 1;")).parse().unwrap();
        let mut interpreter = Interpreter::new(MemoryConsole::new());
        interpreter.interpret(&program);
        assert!(interpreter.value_of("x").is_some());

        interpreter.interpret(&Program { statements: vec![] });
        assert_eq!(interpreter.value_of("x"), None);
    }
}
