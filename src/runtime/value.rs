//! Runtime value representation
//!
//! Real numbers live in their comma-decimal text form (`12,5`). They are
//! converted to `f64` only for arithmetic and converted back afterwards.

use std::fmt;

use crate::parser::ast::Operator;

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    /// Comma-decimal text, e.g. `7,0`
    Real(String),
    /// String literals and raw captured input
    Text(String),
}

/// Numeric operand of an arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

impl Value {
    /// Coerce into a number: text containing a comma is a real, text made
    /// only of digits is an integer, anything else is an error.
    pub fn to_number(&self) -> Result<Number, String> {
        match self {
            Value::Integer(n) => Ok(Number::Int(*n)),
            Value::Real(text) => parse_real(text)
                .map(Number::Float)
                .ok_or_else(|| format!("'{}' is not a valid real number", text)),
            Value::Text(text) if text.contains(',') => parse_real(text)
                .map(Number::Float)
                .ok_or_else(|| format!("'{}' is not a valid real number", text)),
            Value::Text(text) if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) => text
                .parse::<i64>()
                .map(Number::Int)
                .map_err(|_| format!("integer '{}' is out of range", text)),
            Value::Text(text) => Err(format!("cannot use '{}' as a number", text)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(text) | Value::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Parse a comma-decimal real (`12,5`)
pub fn parse_real(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}

/// Format a real in comma-decimal form; integral values keep one decimal (`7,0`).
///
/// Magnitudes below `1e-4` or from `1e16` up use an exponent with an explicit
/// sign and at least two digits (`1e+16`, `2,5e-05`).
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = format!("{:?}", value).replace('.', ",");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Apply an arithmetic operator. Integer operands stay integers except for
/// division, which always produces a real.
pub fn apply(operator: Operator, left: Number, right: Number) -> Result<Value, String> {
    if let (Number::Int(a), Number::Int(b)) = (left, right) {
        let result = match operator {
            Operator::Add => a.checked_add(b),
            Operator::Subtract => a.checked_sub(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Divide => {
                if b == 0 {
                    return Err("Division by zero".to_string());
                }
                return Ok(Value::Real(format_real(a as f64 / b as f64)));
            }
        };
        return result
            .map(Value::Integer)
            .ok_or_else(|| format!("Integer overflow in {} {} {}", a, operator, b));
    }

    let (a, b) = (left.as_f64(), right.as_f64());
    let result = match operator {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0.0 {
                return Err("Division by zero".to_string());
            }
            a / b
        }
    };
    Ok(Value::Real(format_real(result)))
}
