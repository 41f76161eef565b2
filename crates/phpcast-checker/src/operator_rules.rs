//! Result types of operators, computed purely from operand types.
//!
//! Operands are passed as `Some(type)` when their inference is certain and
//! `None` otherwise. Every rule is conservative: when the result depends on a
//! runtime value (overflow aside) or on an operand we know nothing about,
//! the answer is `None`.

use phpcast_syntax::{BinaryOperator, UnaryOperator};
use phpcast_types::Type;

/// Result type of `left op right`.
pub fn binary_result_type(
    op: BinaryOperator,
    left: Option<&Type>,
    right: Option<&Type>,
) -> Option<Type> {
    use BinaryOperator::*;

    match op {
        Concat => Some(Type::String),
        Spaceship => Some(Type::Int),
        _ if op.is_boolean_valued() => Some(Type::Bool),
        Add if matches!((left, right), (Some(Type::Array), Some(Type::Array))) => {
            Some(Type::Array)
        }
        Add | Sub | Mul => numeric_promotion(left, right),
        Div | Pow => match numeric_promotion(left, right)? {
            // `4 / 2` is an int, `3 / 2` a float.
            Type::Int => Some(Type::union2(Type::Int, Type::Float)),
            other => Some(other),
        },
        Mod => match (left, right) {
            (Some(l), Some(r)) if l.is_numeric() && r.is_numeric() => Some(Type::Int),
            _ => None,
        },
        _ if op.is_bitwise() => match (left, right) {
            (Some(Type::Int), Some(Type::Int)) => Some(Type::Int),
            _ => None,
        },
        _ => None,
    }
}

/// `+ - *` promotion: a float on either side makes a float, two ints make
/// an int.
fn numeric_promotion(left: Option<&Type>, right: Option<&Type>) -> Option<Type> {
    match (left, right) {
        (Some(Type::Float), _) | (_, Some(Type::Float)) => Some(Type::Float),
        (Some(Type::Int), Some(Type::Int)) => Some(Type::Int),
        _ => None,
    }
}

/// Result type of `op operand`.
pub fn unary_result_type(op: UnaryOperator, operand: Option<&Type>) -> Option<Type> {
    match (op, operand) {
        (UnaryOperator::Not, _) => Some(Type::Bool),
        (UnaryOperator::Minus | UnaryOperator::Plus, Some(ty)) if ty.is_numeric() => {
            Some(ty.clone())
        }
        (UnaryOperator::BitNot, Some(Type::Int)) => Some(Type::Int),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/operator_rules_tests.rs"]
mod tests;
