//! Node kinds and cast keywords.

use serde::Serialize;

/// Kind tag of a node in the [`NodeArena`](crate::NodeArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    SourceFile,
    // Scopes
    FunctionDeclaration,
    MethodDeclaration,
    Closure,
    ArrowFunction,
    ClassDeclaration,
    // Statements
    ReturnStatement,
    ExpressionStatement,
    // Expressions
    Variable,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    InterpolatedString,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ArrayLiteral,
    NewExpression,
    PropertyAccess,
    StaticPropertyAccess,
    FunctionCall,
    MethodCall,
    StaticMethodCall,
    CastExpression,
    BinaryExpression,
    UnaryExpression,
    ParenthesizedExpression,
    Assignment,
    /// Any construct the inspection has no dedicated rule for. Its children
    /// are still traversed so casts nested inside are found.
    Other,
}

impl SyntaxKind {
    /// Nodes that open a lexical variable scope.
    #[inline]
    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::Closure
                | SyntaxKind::ArrowFunction
        )
    }

    #[inline]
    pub const fn is_scope(self) -> bool {
        matches!(self, SyntaxKind::SourceFile) || self.is_function_like()
    }

    #[inline]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntegerLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::InterpolatedString
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
        )
    }
}

/// Target of a `(type) $expr` cast, as spelled in source.
///
/// Several keywords map onto one kind: `(int)`/`(integer)`,
/// `(bool)`/`(boolean)`, `(float)`/`(double)`/`(real)`, `(string)`/`(binary)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CastKind {
    Int,
    Bool,
    Float,
    String,
    Array,
    Object,
    Unset,
    /// A keyword the engine does not know. Never reported.
    Unrecognized,
}

impl CastKind {
    /// Classify a cast keyword. Matching is case-insensitive and ignores
    /// whitespace inside the parentheses, as the language does.
    pub fn from_keyword(keyword: &str) -> CastKind {
        let trimmed = keyword.trim().trim_start_matches('(').trim_end_matches(')').trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "int" | "integer" => CastKind::Int,
            "bool" | "boolean" => CastKind::Bool,
            "float" | "double" | "real" => CastKind::Float,
            "string" | "binary" => CastKind::String,
            "array" => CastKind::Array,
            "object" => CastKind::Object,
            "unset" => CastKind::Unset,
            _ => CastKind::Unrecognized,
        }
    }
}
