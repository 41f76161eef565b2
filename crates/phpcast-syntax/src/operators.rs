//! Binary and unary operators.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // String
    Concat,
    // Comparison
    Equal,
    Identical,
    NotEqual,
    NotIdentical,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Spaceship,
    InstanceOf,
    // Logical
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    // Null coalescing
    Coalesce,
}

impl BinaryOperator {
    pub fn from_token(token: &str) -> Option<BinaryOperator> {
        Some(match token.to_ascii_lowercase().as_str() {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            "**" => BinaryOperator::Pow,
            "." => BinaryOperator::Concat,
            "==" => BinaryOperator::Equal,
            "===" => BinaryOperator::Identical,
            "!=" | "<>" => BinaryOperator::NotEqual,
            "!==" => BinaryOperator::NotIdentical,
            "<" => BinaryOperator::Less,
            ">" => BinaryOperator::Greater,
            "<=" => BinaryOperator::LessEqual,
            ">=" => BinaryOperator::GreaterEqual,
            "<=>" => BinaryOperator::Spaceship,
            "instanceof" => BinaryOperator::InstanceOf,
            "&&" | "and" => BinaryOperator::LogicalAnd,
            "||" | "or" => BinaryOperator::LogicalOr,
            "xor" => BinaryOperator::LogicalXor,
            "&" => BinaryOperator::BitAnd,
            "|" => BinaryOperator::BitOr,
            "^" => BinaryOperator::BitXor,
            "<<" => BinaryOperator::ShiftLeft,
            ">>" => BinaryOperator::ShiftRight,
            "??" => BinaryOperator::Coalesce,
            _ => return None,
        })
    }

    /// Operators whose result is always a boolean, whatever the operands.
    #[inline]
    pub const fn is_boolean_valued(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::Identical
                | BinaryOperator::NotEqual
                | BinaryOperator::NotIdentical
                | BinaryOperator::Less
                | BinaryOperator::Greater
                | BinaryOperator::LessEqual
                | BinaryOperator::GreaterEqual
                | BinaryOperator::InstanceOf
                | BinaryOperator::LogicalAnd
                | BinaryOperator::LogicalOr
                | BinaryOperator::LogicalXor
        )
    }

    #[inline]
    pub const fn is_bitwise(self) -> bool {
        matches!(
            self,
            BinaryOperator::BitAnd
                | BinaryOperator::BitOr
                | BinaryOperator::BitXor
                | BinaryOperator::ShiftLeft
                | BinaryOperator::ShiftRight
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    BitNot,
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<UnaryOperator> {
        Some(match token {
            "!" => UnaryOperator::Not,
            "-" => UnaryOperator::Minus,
            "+" => UnaryOperator::Plus,
            "~" => UnaryOperator::BitNot,
            _ => return None,
        })
    }
}
