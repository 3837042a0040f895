//! Coercion-based operator semantics over [`Memory`].
//!
//! Every function here is total over the kind space: either it produces a
//! value through the coercion rules, or it returns an [`OperatorError`] for the
//! kind pairs that have no meaning (arithmetic on arrays or objects).

use std::cmp::Ordering;
use std::rc::Rc;

use super::array::ArrayMemory;
use super::config::DivisionByZero;
use super::error::OperatorError;
use super::memory::{Kind, Memory, Numeric};

fn numeric_operands(op: &'static str, a: &Memory, b: &Memory) -> Result<(Numeric, Numeric), OperatorError> {
    let (lhs, rhs) = (a.value_kind(), b.value_kind());
    if matches!(lhs, Kind::Array | Kind::Object) || matches!(rhs, Kind::Array | Kind::Object) {
        return Err(OperatorError::UnsupportedOperands { op, lhs, rhs });
    }
    Ok((a.to_numeric(), b.to_numeric()))
}

fn int_or_float(checked: Option<i64>, fallback: impl FnOnce() -> f64) -> Memory {
    match checked {
        Some(n) => Memory::Int(n),
        None => Memory::Float(fallback()),
    }
}

pub fn add(a: &Memory, b: &Memory) -> Result<Memory, OperatorError> {
    if let (Some(x), Some(y)) = (a.to_array(), b.to_array()) {
        return Ok(Memory::Array(Rc::new(x.union(&y))));
    }
    let (x, y) = numeric_operands("+", a, b)?;
    Ok(match (x, y) {
        (Numeric::Int(x), Numeric::Int(y)) => int_or_float(x.checked_add(y), || x as f64 + y as f64),
        _ => Memory::Float(x.to_f64() + y.to_f64()),
    })
}

pub fn sub(a: &Memory, b: &Memory) -> Result<Memory, OperatorError> {
    let (x, y) = numeric_operands("-", a, b)?;
    Ok(match (x, y) {
        (Numeric::Int(x), Numeric::Int(y)) => int_or_float(x.checked_sub(y), || x as f64 - y as f64),
        _ => Memory::Float(x.to_f64() - y.to_f64()),
    })
}

pub fn mul(a: &Memory, b: &Memory) -> Result<Memory, OperatorError> {
    let (x, y) = numeric_operands("*", a, b)?;
    Ok(match (x, y) {
        (Numeric::Int(x), Numeric::Int(y)) => int_or_float(x.checked_mul(y), || x as f64 * y as f64),
        _ => Memory::Float(x.to_f64() * y.to_f64()),
    })
}

/// Int when both operands are integers and the division is exact, Float otherwise.
/// A zero divisor follows `policy`.
pub fn div(a: &Memory, b: &Memory, policy: DivisionByZero) -> Result<Memory, OperatorError> {
    let (x, y) = numeric_operands("/", a, b)?;
    if y.is_zero() {
        return match policy {
            DivisionByZero::Error => Err(OperatorError::DivisionByZero),
            DivisionByZero::Sentinel => {
                let result = x.to_f64() / y.to_f64();
                tracing::warn!(dividend = %Memory::from(x), %result, "division by zero");
                Ok(Memory::Float(result))
            }
        };
    }
    Ok(match (x, y) {
        (Numeric::Int(x), Numeric::Int(y)) => match (x.checked_rem(y), x.checked_div(y)) {
            (Some(0), Some(q)) => Memory::Int(q),
            _ => Memory::Float(x as f64 / y as f64),
        },
        _ => Memory::Float(x.to_f64() / y.to_f64()),
    })
}

/// Integer remainder; the sign follows the dividend.
pub fn modulo(a: &Memory, b: &Memory, policy: DivisionByZero) -> Result<Memory, OperatorError> {
    numeric_operands("%", a, b)?;
    let (x, y) = (a.to_integer(), b.to_integer());
    if y == 0 {
        return match policy {
            DivisionByZero::Error => Err(OperatorError::ModuloByZero),
            DivisionByZero::Sentinel => {
                tracing::warn!(dividend = x, "modulo by zero");
                Ok(Memory::Float(f64::NAN))
            }
        };
    }
    Ok(Memory::Int(x.checked_rem(y).unwrap_or(0)))
}

pub fn pow(a: &Memory, b: &Memory) -> Result<Memory, OperatorError> {
    let (x, y) = numeric_operands("**", a, b)?;
    Ok(match (x, y) {
        (Numeric::Int(base), Numeric::Int(exp)) if exp >= 0 => {
            let checked = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e));
            int_or_float(checked, || (base as f64).powf(exp as f64))
        }
        _ => Memory::Float(x.to_f64().powf(y.to_f64())),
    })
}

pub fn concat(a: &Memory, b: &Memory) -> Result<Memory, OperatorError> {
    let (lhs, rhs) = (a.value_kind(), b.value_kind());
    if lhs == Kind::Object || rhs == Kind::Object {
        return Err(OperatorError::UnsupportedOperands { op: ".", lhs, rhs });
    }
    if lhs == Kind::Binary || rhs == Kind::Binary {
        let mut bytes = a.to_binary_string();
        bytes.extend(b.to_binary_string());
        return Ok(Memory::Binary(bytes));
    }
    Ok(Memory::String(format!("{a}{b}")))
}

pub fn and(a: &Memory, b: &Memory) -> Memory {
    Memory::bool(a.to_boolean() && b.to_boolean())
}

pub fn or(a: &Memory, b: &Memory) -> Memory {
    Memory::bool(a.to_boolean() || b.to_boolean())
}

pub fn negate(a: &Memory) -> Result<Memory, OperatorError> {
    let operand = a.value_kind();
    if matches!(operand, Kind::Array | Kind::Object) {
        return Err(OperatorError::UnsupportedOperand { op: "-", operand });
    }
    Ok(match a.to_numeric() {
        Numeric::Int(n) => int_or_float(n.checked_neg(), || -(n as f64)),
        Numeric::Float(f) => Memory::Float(-f),
    })
}

pub fn plus(a: &Memory) -> Result<Memory, OperatorError> {
    let operand = a.value_kind();
    if matches!(operand, Kind::Array | Kind::Object) {
        return Err(OperatorError::UnsupportedOperand { op: "+", operand });
    }
    Ok(Memory::from(a.to_numeric()))
}

pub fn not(a: &Memory) -> Memory {
    Memory::bool(!a.to_boolean())
}

/// `===`: same kind and same value; arrays compare entries in order, objects by instance.
pub fn identical(a: &Memory, b: &Memory) -> bool {
    a.with_value(|a| {
        b.with_value(|b| match (a, b) {
            (Memory::Null, Memory::Null) => true,
            (Memory::Bool(x), Memory::Bool(y)) => x == y,
            (Memory::Int(x), Memory::Int(y)) => x == y,
            (Memory::Float(x), Memory::Float(y)) => x == y,
            (Memory::String(x), Memory::String(y)) => x == y,
            (Memory::Binary(x), Memory::Binary(y)) => x == y,
            (Memory::Array(x), Memory::Array(y)) => Rc::ptr_eq(x, y) || x == y,
            (Memory::Object(x), Memory::Object(y)) => Rc::ptr_eq(x, y),
            _ => false,
        })
    })
}

/// `==` with type juggling.
pub fn loose_equals(a: &Memory, b: &Memory) -> bool {
    a.with_value(|a| {
        b.with_value(|b| match (a, b) {
            (Memory::Object(x), Memory::Object(y)) => {
                if Rc::ptr_eq(x, y) {
                    return true;
                }
                let (x, y) = (x.borrow(), y.borrow());
                x.class_name == y.class_name && arrays_loose_equal(&x.properties, &y.properties)
            }
            (Memory::Object(_), Memory::Null | Memory::Bool(_)) | (Memory::Null | Memory::Bool(_), Memory::Object(_)) => {
                a.to_boolean() == b.to_boolean()
            }
            (Memory::Object(_), _) | (_, Memory::Object(_)) => false,
            (Memory::Array(x), Memory::Array(y)) => arrays_loose_equal(x, y),
            _ => matches!(compare_scalars(a, b), Some(Ordering::Equal)),
        })
    })
}

fn arrays_loose_equal(x: &ArrayMemory, y: &ArrayMemory) -> bool {
    x.len() == y.len() && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| loose_equals(v, w)))
}

/// Ordering used by `< > <= >=`. `Ok(None)` means the values are not ordered
/// (NaN, or arrays with mismatched keys) and every relational test is false.
pub fn compare(a: &Memory, b: &Memory) -> Result<Option<Ordering>, OperatorError> {
    let (lhs, rhs) = (a.value_kind(), b.value_kind());
    if lhs == Kind::Object || rhs == Kind::Object {
        return Err(OperatorError::UnsupportedOperands { op: "<=>", lhs, rhs });
    }
    a.with_value(|a| {
        b.with_value(|b| match (a, b) {
            (Memory::Array(x), Memory::Array(y)) => compare_arrays(x, y),
            _ => Ok(compare_scalars(a, b)),
        })
    })
}

fn compare_arrays(x: &ArrayMemory, y: &ArrayMemory) -> Result<Option<Ordering>, OperatorError> {
    match x.len().cmp(&y.len()) {
        Ordering::Equal => {}
        other => return Ok(Some(other)),
    }
    for (key, left) in x.iter() {
        let Some(right) = y.get(key) else {
            return Ok(None);
        };
        match compare(left, right)? {
            Some(Ordering::Equal) => {}
            other => return Ok(other),
        }
    }
    Ok(Some(Ordering::Equal))
}

/// Comparison for every pair that doesn't involve an object or two arrays.
fn compare_scalars(a: &Memory, b: &Memory) -> Option<Ordering> {
    match (a, b) {
        (Memory::Null, Memory::Null) => Some(Ordering::Equal),
        (Memory::Null, Memory::String(_) | Memory::Binary(_)) | (Memory::String(_) | Memory::Binary(_), Memory::Null) => {
            Some(a.to_binary_string().cmp(&b.to_binary_string()))
        }
        (Memory::Null | Memory::Bool(_), _) | (_, Memory::Null | Memory::Bool(_)) => {
            Some(a.to_boolean().cmp(&b.to_boolean()))
        }
        // An array is greater than any remaining scalar.
        (Memory::Array(_), _) => Some(Ordering::Greater),
        (_, Memory::Array(_)) => Some(Ordering::Less),
        (Memory::Int(_) | Memory::Float(_), Memory::Int(_) | Memory::Float(_)) => {
            compare_numeric(a.to_numeric(), b.to_numeric())
        }
        _ => {
            // At least one side is a string.
            if a.is_numeric() && b.is_numeric() {
                compare_numeric(a.to_numeric(), b.to_numeric())
            } else {
                Some(a.to_binary_string().cmp(&b.to_binary_string()))
            }
        }
    }
}

fn compare_numeric(x: Numeric, y: Numeric) -> Option<Ordering> {
    match (x, y) {
        (Numeric::Int(x), Numeric::Int(y)) => Some(x.cmp(&y)),
        _ => x.to_f64().partial_cmp(&y.to_f64()),
    }
}
