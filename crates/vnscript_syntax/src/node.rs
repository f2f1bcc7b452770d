//! Syntax tree node types.
//!
//! Nodes own their tokens and children. Every node reports its kind, its
//! source span and an ordered list of children through [`SyntaxNodeRef`],
//! which lets printers and tools walk the tree without knowing each shape.

use crate::syntax_kind::SyntaxKind;
use crate::token::{LiteralValue, SyntaxToken};
use vnscript_core::text::TextSpan;

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExpressionSyntax {
    pub literal_token: SyntaxToken,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameExpressionSyntax {
    pub identifier_token: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpressionSyntax {
    pub identifier_token: SyntaxToken,
    pub equals_token: SyntaxToken,
    pub expression: Box<ExpressionSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpressionSyntax {
    pub operator_token: SyntaxToken,
    pub operand: Box<ExpressionSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpressionSyntax {
    pub left: Box<ExpressionSyntax>,
    pub operator_token: SyntaxToken,
    pub right: Box<ExpressionSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesizedExpressionSyntax {
    pub open_parenthesis_token: SyntaxToken,
    pub expression: Box<ExpressionSyntax>,
    pub close_parenthesis_token: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionSyntax {
    Literal(LiteralExpressionSyntax),
    Name(NameExpressionSyntax),
    Assignment(AssignmentExpressionSyntax),
    Unary(UnaryExpressionSyntax),
    Binary(BinaryExpressionSyntax),
    Parenthesized(ParenthesizedExpressionSyntax),
}

impl ExpressionSyntax {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            ExpressionSyntax::Literal(_) => SyntaxKind::LiteralExpression,
            ExpressionSyntax::Name(_) => SyntaxKind::NameExpression,
            ExpressionSyntax::Assignment(_) => SyntaxKind::AssignmentExpression,
            ExpressionSyntax::Unary(_) => SyntaxKind::UnaryExpression,
            ExpressionSyntax::Binary(_) => SyntaxKind::BinaryExpression,
            ExpressionSyntax::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
        }
    }

    pub fn span(&self) -> TextSpan {
        SyntaxNodeRef::Expression(self).span()
    }

    pub fn children(&self) -> Vec<SyntaxNodeRef<'_>> {
        use SyntaxNodeRef::{Expression, Token};
        match self {
            ExpressionSyntax::Literal(node) => vec![Token(&node.literal_token)],
            ExpressionSyntax::Name(node) => vec![Token(&node.identifier_token)],
            ExpressionSyntax::Assignment(node) => vec![
                Token(&node.identifier_token),
                Token(&node.equals_token),
                Expression(&node.expression),
            ],
            ExpressionSyntax::Unary(node) => {
                vec![Token(&node.operator_token), Expression(&node.operand)]
            }
            ExpressionSyntax::Binary(node) => vec![
                Expression(&node.left),
                Token(&node.operator_token),
                Expression(&node.right),
            ],
            ExpressionSyntax::Parenthesized(node) => vec![
                Token(&node.open_parenthesis_token),
                Expression(&node.expression),
                Token(&node.close_parenthesis_token),
            ],
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatementSyntax {
    pub open_brace_token: SyntaxToken,
    pub statements: Vec<StatementSyntax>,
    pub close_brace_token: SyntaxToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatementSyntax {
    pub expression: ExpressionSyntax,
}

/// `var name = init` or `let name = init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarationSyntax {
    pub keyword: SyntaxToken,
    pub identifier: SyntaxToken,
    pub equals_token: SyntaxToken,
    pub initializer: ExpressionSyntax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatementSyntax {
    pub if_keyword: SyntaxToken,
    pub condition: ExpressionSyntax,
    pub then_statement: Box<StatementSyntax>,
    pub else_clause: Option<ElseClauseSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseClauseSyntax {
    pub else_keyword: SyntaxToken,
    pub else_statement: Box<StatementSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatementSyntax {
    pub while_keyword: SyntaxToken,
    pub condition: ExpressionSyntax,
    pub body: Box<StatementSyntax>,
}

/// `for name = lower to upper body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStatementSyntax {
    pub for_keyword: SyntaxToken,
    pub identifier: SyntaxToken,
    pub equals_token: SyntaxToken,
    pub lower_bound: ExpressionSyntax,
    pub to_keyword: SyntaxToken,
    pub upper_bound: ExpressionSyntax,
    pub body: Box<StatementSyntax>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSyntax {
    Block(BlockStatementSyntax),
    Expression(ExpressionStatementSyntax),
    VariableDeclaration(VariableDeclarationSyntax),
    If(IfStatementSyntax),
    While(WhileStatementSyntax),
    For(ForStatementSyntax),
}

impl StatementSyntax {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            StatementSyntax::Block(_) => SyntaxKind::BlockStatement,
            StatementSyntax::Expression(_) => SyntaxKind::ExpressionStatement,
            StatementSyntax::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            StatementSyntax::If(_) => SyntaxKind::IfStatement,
            StatementSyntax::While(_) => SyntaxKind::WhileStatement,
            StatementSyntax::For(_) => SyntaxKind::ForStatement,
        }
    }

    pub fn span(&self) -> TextSpan {
        SyntaxNodeRef::Statement(self).span()
    }

    pub fn children(&self) -> Vec<SyntaxNodeRef<'_>> {
        use SyntaxNodeRef::{ElseClause, Expression, Statement, Token};
        match self {
            StatementSyntax::Block(node) => {
                let mut children = Vec::with_capacity(node.statements.len() + 2);
                children.push(Token(&node.open_brace_token));
                children.extend(node.statements.iter().map(Statement));
                children.push(Token(&node.close_brace_token));
                children
            }
            StatementSyntax::Expression(node) => vec![Expression(&node.expression)],
            StatementSyntax::VariableDeclaration(node) => vec![
                Token(&node.keyword),
                Token(&node.identifier),
                Token(&node.equals_token),
                Expression(&node.initializer),
            ],
            StatementSyntax::If(node) => {
                let mut children = vec![
                    Token(&node.if_keyword),
                    Expression(&node.condition),
                    Statement(&node.then_statement),
                ];
                if let Some(else_clause) = &node.else_clause {
                    children.push(ElseClause(else_clause));
                }
                children
            }
            StatementSyntax::While(node) => vec![
                Token(&node.while_keyword),
                Expression(&node.condition),
                Statement(&node.body),
            ],
            StatementSyntax::For(node) => vec![
                Token(&node.for_keyword),
                Token(&node.identifier),
                Token(&node.equals_token),
                Expression(&node.lower_bound),
                Token(&node.to_keyword),
                Expression(&node.upper_bound),
                Statement(&node.body),
            ],
        }
    }

    /// The last token of this statement, used to decide whether an
    /// interactive submission is complete.
    pub fn last_token(&self) -> &SyntaxToken {
        SyntaxNodeRef::Statement(self).last_token()
    }
}

/// The root of a parsed submission: one statement followed by end of file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnitSyntax {
    pub statement: StatementSyntax,
    pub end_of_file_token: SyntaxToken,
}

impl CompilationUnitSyntax {
    pub fn span(&self) -> TextSpan {
        SyntaxNodeRef::CompilationUnit(self).span()
    }

    pub fn children(&self) -> Vec<SyntaxNodeRef<'_>> {
        vec![
            SyntaxNodeRef::Statement(&self.statement),
            SyntaxNodeRef::Token(&self.end_of_file_token),
        ]
    }
}

// ============================================================================
// Uniform node view
// ============================================================================

/// A borrowed view of any syntax node or token.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNodeRef<'a> {
    Token(&'a SyntaxToken),
    Expression(&'a ExpressionSyntax),
    Statement(&'a StatementSyntax),
    ElseClause(&'a ElseClauseSyntax),
    CompilationUnit(&'a CompilationUnitSyntax),
}

impl<'a> SyntaxNodeRef<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNodeRef::Token(token) => token.kind,
            SyntaxNodeRef::Expression(node) => node.kind(),
            SyntaxNodeRef::Statement(node) => node.kind(),
            SyntaxNodeRef::ElseClause(_) => SyntaxKind::ElseClause,
            SyntaxNodeRef::CompilationUnit(_) => SyntaxKind::CompilationUnit,
        }
    }

    pub fn children(&self) -> Vec<SyntaxNodeRef<'a>> {
        match *self {
            SyntaxNodeRef::Token(_) => Vec::new(),
            SyntaxNodeRef::Expression(node) => node.children(),
            SyntaxNodeRef::Statement(node) => node.children(),
            SyntaxNodeRef::ElseClause(node) => vec![
                SyntaxNodeRef::Token(&node.else_keyword),
                SyntaxNodeRef::Statement(&node.else_statement),
            ],
            SyntaxNodeRef::CompilationUnit(node) => node.children(),
        }
    }

    /// The span from the first child's start to the last child's end.
    pub fn span(&self) -> TextSpan {
        if let SyntaxNodeRef::Token(token) = self {
            return token.span();
        }
        let children = self.children();
        match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span().union(&last.span()),
            _ => TextSpan::default(),
        }
    }

    /// The rightmost token under this node.
    pub fn last_token(&self) -> &'a SyntaxToken {
        let mut node = *self;
        loop {
            if let SyntaxNodeRef::Token(token) = node {
                return token;
            }
            // Every composite node ends in a token or another node.
            match node.children().last() {
                Some(last) => node = *last,
                None => unreachable!("composite syntax nodes always have children"),
            }
        }
    }
}
