//! Expression-tree resolution into language-neutral [`Value`]s.
//!
//! Exhaustive over the closed [`ExprKind`] union: every node kind either has a
//! defined resolution or is an explicit [`ParseError`]. Arithmetic is
//! evaluated only over numeric literals — the source implementation ran a
//! general evaluator here, which could execute arbitrary expressions; that
//! capability is intentionally not carried over.

use indexmap::IndexMap;

use super::expr::{BinOpKind, Expr, ExprKind};
use super::ParseError;
use crate::types::{CallRecord, Value};

/// Resolve any supported argument expression.
pub(crate) fn resolve_expr(expr: &Expr, src: &str) -> Result<Value, ParseError> {
    match &expr.kind {
        ExprKind::Int(n) => Ok(Value::Int(*n)),
        ExprKind::Float(f) => Ok(Value::Float(*f)),
        ExprKind::Str(s) => Ok(Value::Str(s.clone())),
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::NoneLit => Ok(Value::Null),
        ExprKind::Ellipsis => Ok(Value::Str("...".to_string())),
        ExprKind::Name(id) => Ok(Value::Str(id.clone())),
        ExprKind::List(items) => Ok(Value::List(resolve_all(items, src)?)),
        ExprKind::Tuple(items) => Ok(Value::Tuple(resolve_all(items, src)?)),
        ExprKind::Dict(entries) => {
            let mut resolved = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                resolved.push((resolve_expr(key, src)?, resolve_expr(value, src)?));
            }
            Ok(Value::Dict(resolved))
        }
        ExprKind::UnaryNeg(inner) => match &inner.kind {
            ExprKind::Int(n) => Ok(Value::Int(-n)),
            ExprKind::Float(f) => Ok(Value::Float(-f)),
            _ => Err(ParseError::UnsupportedExpression {
                kind: "unary negation of a non-numeric value",
                position: expr.span.start,
            }),
        },
        ExprKind::Call { kwargs, .. } => {
            if kwargs.is_empty() {
                // A positional-only nested call cannot become a CallRecord
                // without losing positional semantics; keep its source text.
                Ok(Value::Str(expr.span.slice(src).to_string()))
            } else {
                Ok(Value::Call(resolve_call(expr, src)?))
            }
        }
        ExprKind::BinOp { .. } => numeric_eval(expr).map(Num::into_value),
        ExprKind::Lambda { body } => resolve_expr(body, src),
        ExprKind::Subscript { base, index } => Ok(Value::Str(format!(
            "{}[{}]",
            base.span.slice(src),
            index.span.slice(src)
        ))),
        ExprKind::Attribute { .. } => Err(ParseError::UnsupportedExpression {
            kind: "bare attribute access",
            position: expr.span.start,
        }),
    }
}

/// Resolve a call expression into a [`CallRecord`].
///
/// The callee is flattened by walking attribute accesses down to the base
/// identifier, joining segments with `.` in source order. Only keyword
/// arguments are recognized; positional arguments are not part of the record.
pub(crate) fn resolve_call(expr: &Expr, src: &str) -> Result<CallRecord, ParseError> {
    let ExprKind::Call { func, kwargs, .. } = &expr.kind else {
        return Err(ParseError::UnsupportedExpression {
            kind: "non-call expression where a call was expected",
            position: expr.span.start,
        });
    };

    let function_name = callee_name(func)?;
    let mut arguments: IndexMap<String, Value> = IndexMap::with_capacity(kwargs.len());
    for (name, value) in kwargs {
        arguments.insert(name.clone(), resolve_expr(value, src)?);
    }
    Ok(CallRecord {
        function_name,
        arguments,
    })
}

/// Resolve a literal-only expression (the restricted grammar used when
/// coercing raw text): constants, containers, and negated numbers. Names,
/// calls, and arithmetic are rejected here even though `resolve_expr` would
/// accept them.
pub(crate) fn resolve_literal(expr: &Expr) -> Result<Value, ParseError> {
    match &expr.kind {
        ExprKind::Int(n) => Ok(Value::Int(*n)),
        ExprKind::Float(f) => Ok(Value::Float(*f)),
        ExprKind::Str(s) => Ok(Value::Str(s.clone())),
        ExprKind::Bool(b) => Ok(Value::Bool(*b)),
        ExprKind::NoneLit => Ok(Value::Null),
        ExprKind::List(items) => Ok(Value::List(
            items.iter().map(resolve_literal).collect::<Result<_, _>>()?,
        )),
        ExprKind::Tuple(items) => Ok(Value::Tuple(
            items.iter().map(resolve_literal).collect::<Result<_, _>>()?,
        )),
        ExprKind::Dict(entries) => {
            let mut resolved = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                resolved.push((resolve_literal(key)?, resolve_literal(value)?));
            }
            Ok(Value::Dict(resolved))
        }
        ExprKind::UnaryNeg(inner) => match &inner.kind {
            ExprKind::Int(n) => Ok(Value::Int(-n)),
            ExprKind::Float(f) => Ok(Value::Float(-f)),
            _ => Err(ParseError::UnsupportedExpression {
                kind: "unary negation of a non-numeric literal",
                position: expr.span.start,
            }),
        },
        _ => Err(ParseError::UnsupportedExpression {
            kind: "non-literal expression",
            position: expr.span.start,
        }),
    }
}

fn resolve_all(items: &[Expr], src: &str) -> Result<Vec<Value>, ParseError> {
    items.iter().map(|item| resolve_expr(item, src)).collect()
}

fn callee_name(func: &Expr) -> Result<String, ParseError> {
    let mut parts = Vec::new();
    let mut current = func;
    loop {
        match &current.kind {
            ExprKind::Attribute { base, attr } => {
                parts.push(attr.as_str());
                current = base;
            }
            ExprKind::Name(id) => {
                parts.push(id.as_str());
                break;
            }
            _ => {
                return Err(ParseError::UnsupportedExpression {
                    kind: "callee that is not a dotted identifier path",
                    position: current.span.start,
                })
            }
        }
    }
    parts.reverse();
    Ok(parts.join("."))
}

enum Num {
    I(i64),
    F(f64),
}

impl Num {
    fn into_value(self) -> Value {
        match self {
            Num::I(n) => Value::Int(n),
            Num::F(f) => Value::Float(f),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Num::I(n) => *n as f64,
            Num::F(f) => *f,
        }
    }
}

// Safe arithmetic over numeric literals only. Integer overflow degrades to
// float rather than wrapping.
fn numeric_eval(expr: &Expr) -> Result<Num, ParseError> {
    match &expr.kind {
        ExprKind::Int(n) => Ok(Num::I(*n)),
        ExprKind::Float(f) => Ok(Num::F(*f)),
        ExprKind::UnaryNeg(inner) => Ok(match numeric_eval(inner)? {
            Num::I(n) => Num::I(-n),
            Num::F(f) => Num::F(-f),
        }),
        ExprKind::BinOp { left, op, right } => {
            let lhs = numeric_eval(left)?;
            let rhs = numeric_eval(right)?;
            apply_binop(&lhs, *op, &rhs, expr.span.start)
        }
        _ => Err(ParseError::UnsupportedExpression {
            kind: "arithmetic over a non-numeric operand",
            position: expr.span.start,
        }),
    }
}

fn apply_binop(lhs: &Num, op: BinOpKind, rhs: &Num, position: usize) -> Result<Num, ParseError> {
    use BinOpKind::*;
    if let (Num::I(a), Num::I(b)) = (lhs, rhs) {
        let (a, b) = (*a, *b);
        match op {
            Add => {
                return Ok(a
                    .checked_add(b)
                    .map(Num::I)
                    .unwrap_or(Num::F(a as f64 + b as f64)))
            }
            Sub => {
                return Ok(a
                    .checked_sub(b)
                    .map(Num::I)
                    .unwrap_or(Num::F(a as f64 - b as f64)))
            }
            Mul => {
                return Ok(a
                    .checked_mul(b)
                    .map(Num::I)
                    .unwrap_or(Num::F(a as f64 * b as f64)))
            }
            Mod => {
                if b == 0 {
                    return Err(ParseError::Syntax {
                        position,
                        message: "modulo by zero in constant expression".to_string(),
                    });
                }
                // Sign follows the divisor, as in the source language.
                return Ok(Num::I(((a % b) + b) % b));
            }
            Pow => {
                if b >= 0 {
                    if let Ok(exp) = u32::try_from(b) {
                        if let Some(result) = a.checked_pow(exp) {
                            return Ok(Num::I(result));
                        }
                    }
                }
                return Ok(Num::F((a as f64).powf(b as f64)));
            }
            Div => {} // true division always produces a float
        }
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    let result = match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => {
            if b == 0.0 {
                return Err(ParseError::Syntax {
                    position,
                    message: "division by zero in constant expression".to_string(),
                });
            }
            a / b
        }
        Mod => {
            if b == 0.0 {
                return Err(ParseError::Syntax {
                    position,
                    message: "modulo by zero in constant expression".to_string(),
                });
            }
            // Floored modulo: the result takes the sign of the divisor.
            a - (a / b).floor() * b
        }
        Pow => a.powf(b),
    };
    Ok(Num::F(result))
}

#[cfg(test)]
mod tests {
    use super::super::expr::parse_expression;
    use super::*;

    fn resolve(src: &str) -> Result<Value, ParseError> {
        let expr = parse_expression(src)?;
        resolve_expr(&expr, src)
    }

    #[test]
    fn test_resolve_scalars() {
        assert_eq!(resolve("42").unwrap(), Value::Int(42));
        assert_eq!(resolve("-7").unwrap(), Value::Int(-7));
        assert_eq!(resolve("3.5").unwrap(), Value::Float(3.5));
        assert_eq!(resolve("True").unwrap(), Value::Bool(true));
        assert_eq!(resolve("None").unwrap(), Value::Null);
        assert_eq!(resolve("'hi'").unwrap(), Value::Str("hi".into()));
        assert_eq!(resolve("...").unwrap(), Value::Str("...".into()));
    }

    #[test]
    fn test_resolve_bare_identifier_is_opaque_string() {
        assert_eq!(resolve("pending").unwrap(), Value::Str("pending".into()));
    }

    #[test]
    fn test_resolve_containers_preserve_order() {
        let value = resolve("{'b': 1, 'a': [2, (3, 4)]}").unwrap();
        assert_eq!(
            value,
            Value::Dict(vec![
                (Value::Str("b".into()), Value::Int(1)),
                (
                    Value::Str("a".into()),
                    Value::List(vec![
                        Value::Int(2),
                        Value::Tuple(vec![Value::Int(3), Value::Int(4)]),
                    ]),
                ),
            ])
        );
    }

    #[test]
    fn test_resolve_nested_call_without_keywords_keeps_source() {
        assert_eq!(
            resolve("max(1, 2)").unwrap(),
            Value::Str("max(1, 2)".into())
        );
    }

    #[test]
    fn test_resolve_nested_call_with_keywords_is_record() {
        let value = resolve("convert(amount=3, unit='km')").unwrap();
        let Value::Call(record) = value else {
            panic!("expected nested call record");
        };
        assert_eq!(record.function_name, "convert");
        assert_eq!(record.arguments["amount"], Value::Int(3));
        assert_eq!(record.arguments["unit"], Value::Str("km".into()));
    }

    #[test]
    fn test_resolve_arithmetic_literals() {
        assert_eq!(resolve("2 + 3 * 4").unwrap(), Value::Int(14));
        assert_eq!(resolve("7 / 2").unwrap(), Value::Float(3.5));
        assert_eq!(resolve("2 ** 10").unwrap(), Value::Int(1024));
        assert_eq!(resolve("-7 % 3").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_resolve_arithmetic_over_names_is_error() {
        assert!(matches!(
            resolve("x + 1"),
            Err(ParseError::UnsupportedExpression { .. })
        ));
    }

    #[test]
    fn test_resolve_lambda_body() {
        assert_eq!(resolve("lambda x: 5 + 1").unwrap(), Value::Int(6));
    }

    #[test]
    fn test_resolve_subscript_reconstructs_source() {
        assert_eq!(
            resolve("row['price']").unwrap(),
            Value::Str("row['price']".into())
        );
    }

    #[test]
    fn test_resolve_literal_rejects_names_and_calls() {
        let expr = parse_expression("[1, x]").unwrap();
        assert!(resolve_literal(&expr).is_err());
        let expr = parse_expression("f(a=1)").unwrap();
        assert!(resolve_literal(&expr).is_err());
        let expr = parse_expression("[1, -2.5, {'k': None}]").unwrap();
        assert!(resolve_literal(&expr).is_ok());
    }

    #[test]
    fn test_callee_name_joins_innermost_first() {
        let src = "a.b.c(x=1)";
        let expr = parse_expression(src).unwrap();
        let record = resolve_call(&expr, src).unwrap();
        assert_eq!(record.function_name, "a.b.c");
    }
}
