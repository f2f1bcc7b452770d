//! Operator descriptor tables.
//!
//! Each legal (operator token, operand types) combination has exactly one
//! static descriptor. Binding selects the descriptor once, so the evaluator
//! dispatches on the operator kind alone and never inspects runtime types.

use crate::types::Type;
use vnscript_syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Exponentiation,
    LogicalAnd,
    LogicalOr,
    BitwiseAndInt,
    BitwiseOrInt,
    BitwiseXorInt,
    BitwiseAndBool,
    BitwiseOrBool,
    BitwiseXorBool,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

/// A prefix operator applicable to one operand type.
#[derive(Debug, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: Type,
    pub ty: Type,
}

impl BoundUnaryOperator {
    const fn new(syntax_kind: SyntaxKind, kind: BoundUnaryOperatorKind, operand_type: Type) -> Self {
        Self {
            syntax_kind,
            kind,
            operand_type,
            ty: operand_type,
        }
    }

    /// Look up the descriptor for `syntax_kind` applied to `operand_type`.
    pub fn bind(syntax_kind: SyntaxKind, operand_type: Type) -> Option<&'static BoundUnaryOperator> {
        use SyntaxKind as S;
        use Type::{Bool, Int};

        let op = match (syntax_kind, operand_type) {
            (S::BangToken, Bool) => &BOOL_LOGICAL_NEGATION,
            (S::PlusToken, Int) => &INT_IDENTITY,
            (S::MinusToken, Int) => &INT_NEGATION,
            (S::TildeToken, Int) => &INT_ONES_COMPLEMENT,
            _ => return None,
        };
        Some(op)
    }

    /// Every unary descriptor.
    pub fn all() -> &'static [&'static BoundUnaryOperator] {
        &UNARY_OPERATORS
    }
}

/// An infix operator applicable to one pair of operand types.
#[derive(Debug, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: Type,
    pub right_type: Type,
    pub ty: Type,
}

impl BoundBinaryOperator {
    const fn new(
        syntax_kind: SyntaxKind,
        kind: BoundBinaryOperatorKind,
        operand_type: Type,
        ty: Type,
    ) -> Self {
        Self {
            syntax_kind,
            kind,
            left_type: operand_type,
            right_type: operand_type,
            ty,
        }
    }

    /// Look up the descriptor for `syntax_kind` applied to `left` and `right`.
    pub fn bind(
        syntax_kind: SyntaxKind,
        left: Type,
        right: Type,
    ) -> Option<&'static BoundBinaryOperator> {
        use SyntaxKind as S;
        use Type::{Bool, Int};

        let op = match (syntax_kind, left, right) {
            (S::PlusToken, Int, Int) => &INT_ADDITION,
            (S::MinusToken, Int, Int) => &INT_SUBTRACTION,
            (S::AsteriskToken, Int, Int) => &INT_MULTIPLICATION,
            (S::SlashToken, Int, Int) => &INT_DIVISION,
            (S::AsteriskAsteriskToken, Int, Int) => &INT_EXPONENTIATION,
            (S::AmpersandToken, Int, Int) => &INT_BITWISE_AND,
            (S::PipeToken, Int, Int) => &INT_BITWISE_OR,
            (S::HatToken, Int, Int) => &INT_BITWISE_XOR,
            (S::EqualsEqualsToken, Int, Int) => &INT_EQUALS,
            (S::BangEqualsToken, Int, Int) => &INT_NOT_EQUALS,
            (S::LessToken, Int, Int) => &INT_LESS,
            (S::LessOrEqualsToken, Int, Int) => &INT_LESS_OR_EQUALS,
            (S::GreaterToken, Int, Int) => &INT_GREATER,
            (S::GreaterOrEqualsToken, Int, Int) => &INT_GREATER_OR_EQUALS,

            (S::AmpersandToken, Bool, Bool) => &BOOL_BITWISE_AND,
            (S::PipeToken, Bool, Bool) => &BOOL_BITWISE_OR,
            (S::HatToken, Bool, Bool) => &BOOL_BITWISE_XOR,
            (S::AmpersandAmpersandToken, Bool, Bool) => &BOOL_LOGICAL_AND,
            (S::PipePipeToken, Bool, Bool) => &BOOL_LOGICAL_OR,
            (S::EqualsEqualsToken, Bool, Bool) => &BOOL_EQUALS,
            (S::BangEqualsToken, Bool, Bool) => &BOOL_NOT_EQUALS,
            _ => return None,
        };
        Some(op)
    }

    /// Every binary descriptor.
    pub fn all() -> &'static [&'static BoundBinaryOperator] {
        &BINARY_OPERATORS
    }
}

// ============================================================================
// Unary descriptors
// ============================================================================

use BoundUnaryOperatorKind as U;

pub static BOOL_LOGICAL_NEGATION: BoundUnaryOperator =
    BoundUnaryOperator::new(SyntaxKind::BangToken, U::LogicalNegation, Type::Bool);
pub static INT_IDENTITY: BoundUnaryOperator =
    BoundUnaryOperator::new(SyntaxKind::PlusToken, U::Identity, Type::Int);
pub static INT_NEGATION: BoundUnaryOperator =
    BoundUnaryOperator::new(SyntaxKind::MinusToken, U::Negation, Type::Int);
pub static INT_ONES_COMPLEMENT: BoundUnaryOperator =
    BoundUnaryOperator::new(SyntaxKind::TildeToken, U::OnesComplement, Type::Int);

static UNARY_OPERATORS: [&BoundUnaryOperator; 4] = [
    &BOOL_LOGICAL_NEGATION,
    &INT_IDENTITY,
    &INT_NEGATION,
    &INT_ONES_COMPLEMENT,
];

// ============================================================================
// Binary descriptors
// ============================================================================

use BoundBinaryOperatorKind as B;

pub static INT_ADDITION: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::PlusToken, B::Addition, Type::Int, Type::Int);
pub static INT_SUBTRACTION: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::MinusToken, B::Subtraction, Type::Int, Type::Int);
pub static INT_MULTIPLICATION: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::AsteriskToken, B::Multiplication, Type::Int, Type::Int);
pub static INT_DIVISION: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::SlashToken, B::Division, Type::Int, Type::Int);
pub static INT_EXPONENTIATION: BoundBinaryOperator = BoundBinaryOperator::new(
    SyntaxKind::AsteriskAsteriskToken,
    B::Exponentiation,
    Type::Int,
    Type::Int,
);
pub static INT_BITWISE_AND: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::AmpersandToken, B::BitwiseAndInt, Type::Int, Type::Int);
pub static INT_BITWISE_OR: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::PipeToken, B::BitwiseOrInt, Type::Int, Type::Int);
pub static INT_BITWISE_XOR: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::HatToken, B::BitwiseXorInt, Type::Int, Type::Int);
pub static INT_EQUALS: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::EqualsEqualsToken, B::Equals, Type::Int, Type::Bool);
pub static INT_NOT_EQUALS: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::BangEqualsToken, B::NotEquals, Type::Int, Type::Bool);
pub static INT_LESS: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::LessToken, B::Less, Type::Int, Type::Bool);
pub static INT_LESS_OR_EQUALS: BoundBinaryOperator = BoundBinaryOperator::new(
    SyntaxKind::LessOrEqualsToken,
    B::LessOrEquals,
    Type::Int,
    Type::Bool,
);
pub static INT_GREATER: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::GreaterToken, B::Greater, Type::Int, Type::Bool);
pub static INT_GREATER_OR_EQUALS: BoundBinaryOperator = BoundBinaryOperator::new(
    SyntaxKind::GreaterOrEqualsToken,
    B::GreaterOrEquals,
    Type::Int,
    Type::Bool,
);

pub static BOOL_BITWISE_AND: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::AmpersandToken, B::BitwiseAndBool, Type::Bool, Type::Bool);
pub static BOOL_BITWISE_OR: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::PipeToken, B::BitwiseOrBool, Type::Bool, Type::Bool);
pub static BOOL_BITWISE_XOR: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::HatToken, B::BitwiseXorBool, Type::Bool, Type::Bool);
pub static BOOL_LOGICAL_AND: BoundBinaryOperator = BoundBinaryOperator::new(
    SyntaxKind::AmpersandAmpersandToken,
    B::LogicalAnd,
    Type::Bool,
    Type::Bool,
);
pub static BOOL_LOGICAL_OR: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::PipePipeToken, B::LogicalOr, Type::Bool, Type::Bool);
pub static BOOL_EQUALS: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::EqualsEqualsToken, B::Equals, Type::Bool, Type::Bool);
pub static BOOL_NOT_EQUALS: BoundBinaryOperator =
    BoundBinaryOperator::new(SyntaxKind::BangEqualsToken, B::NotEquals, Type::Bool, Type::Bool);

static BINARY_OPERATORS: [&BoundBinaryOperator; 21] = [
    &INT_ADDITION,
    &INT_SUBTRACTION,
    &INT_MULTIPLICATION,
    &INT_DIVISION,
    &INT_EXPONENTIATION,
    &INT_BITWISE_AND,
    &INT_BITWISE_OR,
    &INT_BITWISE_XOR,
    &INT_EQUALS,
    &INT_NOT_EQUALS,
    &INT_LESS,
    &INT_LESS_OR_EQUALS,
    &INT_GREATER,
    &INT_GREATER_OR_EQUALS,
    &BOOL_BITWISE_AND,
    &BOOL_BITWISE_OR,
    &BOOL_BITWISE_XOR,
    &BOOL_LOGICAL_AND,
    &BOOL_LOGICAL_OR,
    &BOOL_EQUALS,
    &BOOL_NOT_EQUALS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_unary_descriptor_is_found_by_its_key() {
        for op in BoundUnaryOperator::all() {
            let found = BoundUnaryOperator::bind(op.syntax_kind, op.operand_type).unwrap();
            assert!(std::ptr::eq(found, *op), "{:?}", op);
        }
    }

    #[test]
    fn test_every_binary_descriptor_is_found_by_its_key() {
        for op in BoundBinaryOperator::all() {
            let found =
                BoundBinaryOperator::bind(op.syntax_kind, op.left_type, op.right_type).unwrap();
            assert!(std::ptr::eq(found, *op), "{:?}", op);
        }
    }

    #[test]
    fn test_binary_keys_are_unique() {
        let keys: HashSet<_> = BoundBinaryOperator::all()
            .iter()
            .map(|op| (op.syntax_kind, op.left_type, op.right_type))
            .collect();
        assert_eq!(keys.len(), BoundBinaryOperator::all().len());
    }

    #[test]
    fn test_mixed_operand_types_have_no_operator() {
        assert!(BoundBinaryOperator::bind(SyntaxKind::PlusToken, Type::Bool, Type::Int).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxKind::EqualsEqualsToken, Type::Int, Type::Bool)
            .is_none());
        assert!(BoundUnaryOperator::bind(SyntaxKind::MinusToken, Type::Bool).is_none());
        assert!(BoundUnaryOperator::bind(SyntaxKind::BangToken, Type::Int).is_none());
    }

    #[test]
    fn test_bitwise_kinds_are_decided_by_operand_type() {
        let int_and = BoundBinaryOperator::bind(SyntaxKind::AmpersandToken, Type::Int, Type::Int);
        let bool_and =
            BoundBinaryOperator::bind(SyntaxKind::AmpersandToken, Type::Bool, Type::Bool);
        assert_eq!(int_and.map(|op| op.kind), Some(BoundBinaryOperatorKind::BitwiseAndInt));
        assert_eq!(bool_and.map(|op| op.kind), Some(BoundBinaryOperatorKind::BitwiseAndBool));
    }

    #[test]
    fn test_comparisons_produce_bool() {
        for op in BoundBinaryOperator::all() {
            let is_comparison = matches!(
                op.kind,
                BoundBinaryOperatorKind::Equals
                    | BoundBinaryOperatorKind::NotEquals
                    | BoundBinaryOperatorKind::Less
                    | BoundBinaryOperatorKind::LessOrEquals
                    | BoundBinaryOperatorKind::Greater
                    | BoundBinaryOperatorKind::GreaterOrEquals
            );
            if is_comparison {
                assert_eq!(op.ty, Type::Bool, "{:?}", op);
            }
        }
    }
}
