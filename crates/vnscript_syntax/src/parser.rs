//! Recursive descent parser for VNScript.
//!
//! The parser never fails. When the input does not contain a token the grammar
//! requires, it reports `Unexpected token` and synthesizes a zero-width missing
//! token in its place, so a tree is always produced.

use crate::facts::{binary_operator_precedence, unary_operator_precedence};
use crate::lexer::Lexer;
use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::token::{LiteralValue, SyntaxToken};
use vnscript_diagnostics::{messages, DiagnosticCollection};

/// Parses a token stream into a [`CompilationUnitSyntax`].
pub struct Parser {
    /// Significant tokens; always terminated by an `EndOfFileToken`.
    tokens: Vec<SyntaxToken>,
    /// Index of the current token.
    position: usize,
    /// Accumulated diagnostics, including the lexer's.
    diagnostics: DiagnosticCollection,
}

impl Parser {
    /// Lex `text` eagerly, dropping whitespace and bad tokens.
    pub fn new(text: &str) -> Self {
        let mut lexer = Lexer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.lex();
            let kind = token.kind;
            if kind != SyntaxKind::WhitespaceToken && kind != SyntaxKind::BadToken {
                tokens.push(token);
            }
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
        }

        Self {
            tokens,
            position: 0,
            diagnostics: lexer.take_diagnostics(),
        }
    }

    /// Take the diagnostics reported so far.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn peek(&self, offset: usize) -> &SyntaxToken {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + offset).min(last)]
    }

    #[inline]
    fn current(&self) -> &SyntaxToken {
        self.peek(0)
    }

    #[inline]
    fn current_kind(&self) -> SyntaxKind {
        self.current().kind
    }

    fn next_token(&mut self) -> SyntaxToken {
        let token = self.current().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn match_token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.current_kind() == kind {
            return self.next_token();
        }

        let current = self.current();
        let span = current.span();
        let position = current.position;
        let actual = current.kind.to_string();
        let expected = kind.to_string();
        self.diagnostics.report(
            span,
            &messages::UNEXPECTED_TOKEN_0_EXPECTED_1,
            &[actual.as_str(), expected.as_str()],
        );
        SyntaxToken::missing(kind, position)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn parse_compilation_unit(&mut self) -> CompilationUnitSyntax {
        let statement = self.parse_statement();
        let end_of_file_token = self.match_token(SyntaxKind::EndOfFileToken);
        CompilationUnitSyntax {
            statement,
            end_of_file_token,
        }
    }

    fn parse_statement(&mut self) -> StatementSyntax {
        match self.current_kind() {
            SyntaxKind::OpenBraceToken => StatementSyntax::Block(self.parse_block_statement()),
            SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => {
                StatementSyntax::VariableDeclaration(self.parse_variable_declaration())
            }
            SyntaxKind::IfKeyword => StatementSyntax::If(self.parse_if_statement()),
            SyntaxKind::WhileKeyword => StatementSyntax::While(self.parse_while_statement()),
            SyntaxKind::ForKeyword => StatementSyntax::For(self.parse_for_statement()),
            _ => StatementSyntax::Expression(ExpressionStatementSyntax {
                expression: self.parse_expression(),
            }),
        }
    }

    fn parse_block_statement(&mut self) -> BlockStatementSyntax {
        let open_brace_token = self.match_token(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();

        while !matches!(
            self.current_kind(),
            SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken
        ) {
            let start = self.position;
            statements.push(self.parse_statement());

            // A statement that consumed nothing would loop forever; skip the
            // offending token. Its error has already been reported.
            if self.position == start {
                self.next_token();
            }
        }

        let close_brace_token = self.match_token(SyntaxKind::CloseBraceToken);
        BlockStatementSyntax {
            open_brace_token,
            statements,
            close_brace_token,
        }
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclarationSyntax {
        let expected = if self.current_kind() == SyntaxKind::LetKeyword {
            SyntaxKind::LetKeyword
        } else {
            SyntaxKind::VarKeyword
        };
        let keyword = self.match_token(expected);
        let identifier = self.match_token(SyntaxKind::IdentifierToken);
        let equals_token = self.match_token(SyntaxKind::EqualsToken);
        let initializer = self.parse_expression();
        VariableDeclarationSyntax {
            keyword,
            identifier,
            equals_token,
            initializer,
        }
    }

    fn parse_if_statement(&mut self) -> IfStatementSyntax {
        let if_keyword = self.match_token(SyntaxKind::IfKeyword);
        let condition = self.parse_expression();
        let then_statement = Box::new(self.parse_statement());
        let else_clause = self.parse_else_clause();
        IfStatementSyntax {
            if_keyword,
            condition,
            then_statement,
            else_clause,
        }
    }

    fn parse_else_clause(&mut self) -> Option<ElseClauseSyntax> {
        if self.current_kind() != SyntaxKind::ElseKeyword {
            return None;
        }
        let else_keyword = self.next_token();
        let else_statement = Box::new(self.parse_statement());
        Some(ElseClauseSyntax {
            else_keyword,
            else_statement,
        })
    }

    fn parse_while_statement(&mut self) -> WhileStatementSyntax {
        let while_keyword = self.match_token(SyntaxKind::WhileKeyword);
        let condition = self.parse_expression();
        let body = Box::new(self.parse_statement());
        WhileStatementSyntax {
            while_keyword,
            condition,
            body,
        }
    }

    fn parse_for_statement(&mut self) -> ForStatementSyntax {
        let for_keyword = self.match_token(SyntaxKind::ForKeyword);
        let identifier = self.match_token(SyntaxKind::IdentifierToken);
        let equals_token = self.match_token(SyntaxKind::EqualsToken);
        let lower_bound = self.parse_expression();
        let to_keyword = self.match_token(SyntaxKind::ToKeyword);
        let upper_bound = self.parse_expression();
        let body = Box::new(self.parse_statement());
        ForStatementSyntax {
            for_keyword,
            identifier,
            equals_token,
            lower_bound,
            to_keyword,
            upper_bound,
            body,
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ExpressionSyntax {
        self.parse_assignment_expression()
    }

    /// `name = expr` is right-associative and binds loosest.
    fn parse_assignment_expression(&mut self) -> ExpressionSyntax {
        if self.peek(0).kind == SyntaxKind::IdentifierToken
            && self.peek(1).kind == SyntaxKind::EqualsToken
        {
            let identifier_token = self.next_token();
            let equals_token = self.next_token();
            let expression = Box::new(self.parse_assignment_expression());
            return ExpressionSyntax::Assignment(AssignmentExpressionSyntax {
                identifier_token,
                equals_token,
                expression,
            });
        }

        self.parse_binary_expression(0)
    }

    /// Precedence climbing. Operators of equal precedence associate left.
    fn parse_binary_expression(&mut self, parent_precedence: u8) -> ExpressionSyntax {
        let unary_precedence = unary_operator_precedence(self.current_kind());
        let mut left = if unary_precedence != 0 && unary_precedence >= parent_precedence {
            let operator_token = self.next_token();
            let operand = Box::new(self.parse_binary_expression(unary_precedence));
            ExpressionSyntax::Unary(UnaryExpressionSyntax {
                operator_token,
                operand,
            })
        } else {
            self.parse_primary_expression()
        };

        loop {
            let precedence = binary_operator_precedence(self.current_kind());
            if precedence == 0 || precedence <= parent_precedence {
                break;
            }

            let operator_token = self.next_token();
            let right = Box::new(self.parse_binary_expression(precedence));
            left = ExpressionSyntax::Binary(BinaryExpressionSyntax {
                left: Box::new(left),
                operator_token,
                right,
            });
        }

        left
    }

    fn parse_primary_expression(&mut self) -> ExpressionSyntax {
        match self.current_kind() {
            SyntaxKind::OpenParenthesisToken => self.parse_parenthesized_expression(),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let is_true = self.current_kind() == SyntaxKind::TrueKeyword;
                let literal_token = self.next_token();
                ExpressionSyntax::Literal(LiteralExpressionSyntax {
                    literal_token,
                    value: LiteralValue::Bool(is_true),
                })
            }
            SyntaxKind::NumberToken | SyntaxKind::StringToken => self.parse_literal_expression(),
            _ => {
                let identifier_token = self.match_token(SyntaxKind::IdentifierToken);
                ExpressionSyntax::Name(NameExpressionSyntax { identifier_token })
            }
        }
    }

    fn parse_parenthesized_expression(&mut self) -> ExpressionSyntax {
        let open_parenthesis_token = self.match_token(SyntaxKind::OpenParenthesisToken);
        let expression = Box::new(self.parse_expression());
        let close_parenthesis_token = self.match_token(SyntaxKind::CloseParenthesisToken);
        ExpressionSyntax::Parenthesized(ParenthesizedExpressionSyntax {
            open_parenthesis_token,
            expression,
            close_parenthesis_token,
        })
    }

    fn parse_literal_expression(&mut self) -> ExpressionSyntax {
        let literal_token = self.next_token();
        let value = literal_token
            .value
            .clone()
            .unwrap_or(LiteralValue::Int(0));
        ExpressionSyntax::Literal(LiteralExpressionSyntax {
            literal_token,
            value,
        })
    }
}
