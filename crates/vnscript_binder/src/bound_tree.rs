//! The bound tree.
//!
//! Nodes are immutable. Children are shared through `Arc`, so a rewrite that
//! changes nothing can hand back the very same reference, and a rewrite that
//! changes one child reuses every sibling.

use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbol::{LabelSymbol, VariableSymbol};
use crate::types::{Type, Value};
use std::sync::Arc;

/// The kind of a bound node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundNodeKind {
    // Expressions
    LiteralExpression,
    VariableExpression,
    AssignmentExpression,
    UnaryExpression,
    BinaryExpression,

    // Statements
    BlockStatement,
    ExpressionStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    ForStatement,
    LabelStatement,
    GotoStatement,
    ConditionalGotoStatement,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundLiteralExpression {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundVariableExpression {
    pub variable: VariableSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAssignmentExpression {
    pub variable: VariableSymbol,
    pub expression: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundUnaryExpression {
    pub op: &'static BoundUnaryOperator,
    pub operand: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundBinaryExpression {
    pub left: Arc<BoundExpression>,
    pub op: &'static BoundBinaryOperator,
    pub right: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundExpression {
    Literal(BoundLiteralExpression),
    Variable(BoundVariableExpression),
    Assignment(BoundAssignmentExpression),
    Unary(BoundUnaryExpression),
    Binary(BoundBinaryExpression),
}

impl BoundExpression {
    pub fn literal(value: impl Into<Value>) -> Arc<Self> {
        Arc::new(BoundExpression::Literal(BoundLiteralExpression {
            value: value.into(),
        }))
    }

    pub fn variable(variable: VariableSymbol) -> Arc<Self> {
        Arc::new(BoundExpression::Variable(BoundVariableExpression { variable }))
    }

    pub fn assignment(variable: VariableSymbol, expression: Arc<BoundExpression>) -> Arc<Self> {
        Arc::new(BoundExpression::Assignment(BoundAssignmentExpression {
            variable,
            expression,
        }))
    }

    pub fn unary(op: &'static BoundUnaryOperator, operand: Arc<BoundExpression>) -> Arc<Self> {
        Arc::new(BoundExpression::Unary(BoundUnaryExpression { op, operand }))
    }

    pub fn binary(
        left: Arc<BoundExpression>,
        op: &'static BoundBinaryOperator,
        right: Arc<BoundExpression>,
    ) -> Arc<Self> {
        Arc::new(BoundExpression::Binary(BoundBinaryExpression { left, op, right }))
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::Assignment(_) => BoundNodeKind::AssignmentExpression,
            BoundExpression::Unary(_) => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary(_) => BoundNodeKind::BinaryExpression,
        }
    }

    /// The static type of this expression.
    pub fn ty(&self) -> Type {
        match self {
            BoundExpression::Literal(node) => node.value.ty(),
            BoundExpression::Variable(node) => node.variable.ty(),
            BoundExpression::Assignment(node) => node.expression.ty(),
            BoundExpression::Unary(node) => node.op.ty,
            BoundExpression::Binary(node) => node.op.ty,
        }
    }

    pub fn children(&self) -> Vec<BoundNodeRef<'_>> {
        match self {
            BoundExpression::Literal(_) | BoundExpression::Variable(_) => Vec::new(),
            BoundExpression::Assignment(node) => vec![BoundNodeRef::Expression(&node.expression)],
            BoundExpression::Unary(node) => vec![BoundNodeRef::Expression(&node.operand)],
            BoundExpression::Binary(node) => vec![
                BoundNodeRef::Expression(&node.left),
                BoundNodeRef::Expression(&node.right),
            ],
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundBlockStatement {
    pub statements: Vec<Arc<BoundStatement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundExpressionStatement {
    pub expression: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundVariableDeclaration {
    pub variable: VariableSymbol,
    pub initializer: Arc<BoundExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundIfStatement {
    pub condition: Arc<BoundExpression>,
    pub then_statement: Arc<BoundStatement>,
    pub else_statement: Option<Arc<BoundStatement>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundWhileStatement {
    pub condition: Arc<BoundExpression>,
    pub body: Arc<BoundStatement>,
}

/// `for variable = lower_bound to upper_bound body`, both bounds inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundForStatement {
    pub variable: VariableSymbol,
    pub lower_bound: Arc<BoundExpression>,
    pub upper_bound: Arc<BoundExpression>,
    pub body: Arc<BoundStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundLabelStatement {
    pub label: LabelSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundGotoStatement {
    pub label: LabelSymbol,
}

/// Jumps to `label` when `condition` evaluates to `!jump_if_false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundConditionalGotoStatement {
    pub label: LabelSymbol,
    pub condition: Arc<BoundExpression>,
    pub jump_if_false: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundStatement {
    Block(BoundBlockStatement),
    Expression(BoundExpressionStatement),
    VariableDeclaration(BoundVariableDeclaration),
    If(BoundIfStatement),
    While(BoundWhileStatement),
    For(BoundForStatement),
    Label(BoundLabelStatement),
    Goto(BoundGotoStatement),
    ConditionalGoto(BoundConditionalGotoStatement),
}

impl BoundStatement {
    pub fn block(statements: Vec<Arc<BoundStatement>>) -> Arc<Self> {
        Arc::new(BoundStatement::Block(BoundBlockStatement { statements }))
    }

    pub fn expression(expression: Arc<BoundExpression>) -> Arc<Self> {
        Arc::new(BoundStatement::Expression(BoundExpressionStatement { expression }))
    }

    pub fn variable_declaration(
        variable: VariableSymbol,
        initializer: Arc<BoundExpression>,
    ) -> Arc<Self> {
        Arc::new(BoundStatement::VariableDeclaration(BoundVariableDeclaration {
            variable,
            initializer,
        }))
    }

    pub fn if_statement(
        condition: Arc<BoundExpression>,
        then_statement: Arc<BoundStatement>,
        else_statement: Option<Arc<BoundStatement>>,
    ) -> Arc<Self> {
        Arc::new(BoundStatement::If(BoundIfStatement {
            condition,
            then_statement,
            else_statement,
        }))
    }

    pub fn while_statement(condition: Arc<BoundExpression>, body: Arc<BoundStatement>) -> Arc<Self> {
        Arc::new(BoundStatement::While(BoundWhileStatement { condition, body }))
    }

    pub fn for_statement(
        variable: VariableSymbol,
        lower_bound: Arc<BoundExpression>,
        upper_bound: Arc<BoundExpression>,
        body: Arc<BoundStatement>,
    ) -> Arc<Self> {
        Arc::new(BoundStatement::For(BoundForStatement {
            variable,
            lower_bound,
            upper_bound,
            body,
        }))
    }

    pub fn label(label: LabelSymbol) -> Arc<Self> {
        Arc::new(BoundStatement::Label(BoundLabelStatement { label }))
    }

    pub fn goto(label: LabelSymbol) -> Arc<Self> {
        Arc::new(BoundStatement::Goto(BoundGotoStatement { label }))
    }

    pub fn conditional_goto(
        label: LabelSymbol,
        condition: Arc<BoundExpression>,
        jump_if_false: bool,
    ) -> Arc<Self> {
        Arc::new(BoundStatement::ConditionalGoto(BoundConditionalGotoStatement {
            label,
            condition,
            jump_if_false,
        }))
    }

    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundStatement::Block(_) => BoundNodeKind::BlockStatement,
            BoundStatement::Expression(_) => BoundNodeKind::ExpressionStatement,
            BoundStatement::VariableDeclaration(_) => BoundNodeKind::VariableDeclaration,
            BoundStatement::If(_) => BoundNodeKind::IfStatement,
            BoundStatement::While(_) => BoundNodeKind::WhileStatement,
            BoundStatement::For(_) => BoundNodeKind::ForStatement,
            BoundStatement::Label(_) => BoundNodeKind::LabelStatement,
            BoundStatement::Goto(_) => BoundNodeKind::GotoStatement,
            BoundStatement::ConditionalGoto(_) => BoundNodeKind::ConditionalGotoStatement,
        }
    }

    pub fn children(&self) -> Vec<BoundNodeRef<'_>> {
        use BoundNodeRef::{Expression, Statement};
        match self {
            BoundStatement::Block(node) => node.statements.iter().map(|s| Statement(s)).collect(),
            BoundStatement::Expression(node) => vec![Expression(&node.expression)],
            BoundStatement::VariableDeclaration(node) => vec![Expression(&node.initializer)],
            BoundStatement::If(node) => {
                let mut children = vec![
                    Expression(&node.condition),
                    Statement(&node.then_statement),
                ];
                if let Some(else_statement) = &node.else_statement {
                    children.push(Statement(else_statement));
                }
                children
            }
            BoundStatement::While(node) => {
                vec![Expression(&node.condition), Statement(&node.body)]
            }
            BoundStatement::For(node) => vec![
                Expression(&node.lower_bound),
                Expression(&node.upper_bound),
                Statement(&node.body),
            ],
            BoundStatement::Label(_) | BoundStatement::Goto(_) => Vec::new(),
            BoundStatement::ConditionalGoto(node) => vec![Expression(&node.condition)],
        }
    }

    /// Whether this statement may appear in a lowered, flat program.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            BoundStatement::Expression(_)
                | BoundStatement::VariableDeclaration(_)
                | BoundStatement::Label(_)
                | BoundStatement::Goto(_)
                | BoundStatement::ConditionalGoto(_)
        )
    }
}

/// A borrowed view of any bound node.
#[derive(Debug, Clone, Copy)]
pub enum BoundNodeRef<'a> {
    Expression(&'a BoundExpression),
    Statement(&'a BoundStatement),
}

impl<'a> BoundNodeRef<'a> {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundNodeRef::Expression(node) => node.kind(),
            BoundNodeRef::Statement(node) => node.kind(),
        }
    }

    pub fn children(&self) -> Vec<BoundNodeRef<'a>> {
        match *self {
            BoundNodeRef::Expression(node) => node.children(),
            BoundNodeRef::Statement(node) => node.children(),
        }
    }
}
