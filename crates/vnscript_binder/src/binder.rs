//! The binder: syntax tree to bound tree.

use crate::bound_tree::{BoundExpression, BoundStatement};
use crate::global_scope::BoundGlobalScope;
use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::scope::ScopeStack;
use crate::symbol::VariableSymbol;
use crate::types::Type;
use std::sync::Arc;
use vnscript_core::text::TextSpan;
use vnscript_diagnostics::{messages, DiagnosticCollection};
use vnscript_syntax::{
    AssignmentExpressionSyntax, BinaryExpressionSyntax, BlockStatementSyntax,
    CompilationUnitSyntax, ExpressionSyntax, ForStatementSyntax, IfStatementSyntax,
    LiteralExpressionSyntax, LiteralValue, NameExpressionSyntax, StatementSyntax, SyntaxKind,
    SyntaxToken, UnaryExpressionSyntax, VariableDeclarationSyntax, WhileStatementSyntax,
};

/// Resolves names and types for one submission.
///
/// A binder is single-use: [`Binder::bind_global_scope`] creates one, binds the
/// submission's statement and consumes it.
pub struct Binder {
    /// Scopes opened by this submission.
    scopes: ScopeStack,
    /// Top-level variables of earlier submissions.
    previous: Option<Arc<BoundGlobalScope>>,
    /// Diagnostics reported by this submission.
    diagnostics: DiagnosticCollection,
}

impl Binder {
    fn new(previous: Option<Arc<BoundGlobalScope>>) -> Self {
        Self {
            scopes: ScopeStack::new(),
            previous,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Bind `unit` against the variables of `previous` and everything before it.
    #[tracing::instrument(level = "debug", skip_all, fields(chained = previous.is_some()))]
    pub fn bind_global_scope(
        previous: Option<Arc<BoundGlobalScope>>,
        unit: &CompilationUnitSyntax,
    ) -> BoundGlobalScope {
        let mut binder = Binder::new(previous);
        let statement = binder.bind_statement(&unit.statement);

        let Binder {
            scopes,
            previous,
            diagnostics,
        } = binder;

        let mut all_diagnostics = previous
            .as_ref()
            .map(|p| p.diagnostics.clone())
            .unwrap_or_default();
        all_diagnostics.extend(diagnostics.into_diagnostics());

        let variables = scopes.into_globals();
        tracing::debug!(
            variables = variables.len(),
            diagnostics = all_diagnostics.len(),
            "bound global scope"
        );

        BoundGlobalScope {
            previous,
            diagnostics: all_diagnostics,
            variables,
            statement,
        }
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    /// Run `f` inside a fresh scope that is popped when `f` returns.
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn lookup(&self, name: &str) -> Option<VariableSymbol> {
        if let Some(variable) = self.scopes.lookup(name) {
            return Some(variable.clone());
        }
        self.previous
            .as_ref()
            .and_then(|previous| previous.lookup_variable(name))
            .cloned()
    }

    /// Declare a variable in the innermost scope, reporting a conflict at
    /// `identifier`. A top-level declaration also conflicts with the
    /// top-level variables of earlier submissions.
    fn declare(&mut self, identifier: &SyntaxToken, variable: VariableSymbol) {
        // The parser already reported the missing name.
        if identifier.is_missing {
            return;
        }

        let conflicts_with_previous = self.scopes.is_global()
            && self
                .previous
                .as_ref()
                .is_some_and(|previous| previous.lookup_variable(variable.name()).is_some());

        if conflicts_with_previous || !self.scopes.try_declare(variable) {
            self.diagnostics.report(
                identifier.span(),
                &messages::VARIABLE_0_IS_ALREADY_DECLARED,
                &[identifier.text.as_str()],
            );
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn bind_statement(&mut self, syntax: &StatementSyntax) -> Arc<BoundStatement> {
        match syntax {
            StatementSyntax::Block(block) => self.bind_block_statement(block),
            StatementSyntax::Expression(statement) => {
                let expression = self.bind_expression(&statement.expression);
                BoundStatement::expression(expression)
            }
            StatementSyntax::VariableDeclaration(declaration) => {
                self.bind_variable_declaration(declaration)
            }
            StatementSyntax::If(statement) => self.bind_if_statement(statement),
            StatementSyntax::While(statement) => self.bind_while_statement(statement),
            StatementSyntax::For(statement) => self.bind_for_statement(statement),
        }
    }

    fn bind_block_statement(&mut self, syntax: &BlockStatementSyntax) -> Arc<BoundStatement> {
        let statements: Vec<_> = self.with_scope(|binder| {
            syntax
                .statements
                .iter()
                .map(|statement| binder.bind_statement(statement))
                .collect()
        });
        BoundStatement::block(statements)
    }

    fn bind_variable_declaration(
        &mut self,
        syntax: &VariableDeclarationSyntax,
    ) -> Arc<BoundStatement> {
        let is_read_only = syntax.keyword.kind == SyntaxKind::LetKeyword;
        // The initializer cannot see the variable it initializes.
        let initializer = self.bind_expression(&syntax.initializer);
        let variable = VariableSymbol::new(&syntax.identifier.text, is_read_only, initializer.ty());
        self.declare(&syntax.identifier, variable.clone());
        BoundStatement::variable_declaration(variable, initializer)
    }

    fn bind_if_statement(&mut self, syntax: &IfStatementSyntax) -> Arc<BoundStatement> {
        let condition = self.bind_expression_of_type(&syntax.condition, Type::Bool);
        let then_statement = self.bind_statement(&syntax.then_statement);
        let else_statement = syntax
            .else_clause
            .as_ref()
            .map(|clause| self.bind_statement(&clause.else_statement));
        BoundStatement::if_statement(condition, then_statement, else_statement)
    }

    fn bind_while_statement(&mut self, syntax: &WhileStatementSyntax) -> Arc<BoundStatement> {
        let condition = self.bind_expression_of_type(&syntax.condition, Type::Bool);
        let body = self.bind_statement(&syntax.body);
        BoundStatement::while_statement(condition, body)
    }

    fn bind_for_statement(&mut self, syntax: &ForStatementSyntax) -> Arc<BoundStatement> {
        let lower_bound = self.bind_expression_of_type(&syntax.lower_bound, Type::Int);
        let upper_bound = self.bind_expression_of_type(&syntax.upper_bound, Type::Int);

        let (variable, body) = self.with_scope(|binder| {
            let variable = VariableSymbol::new(&syntax.identifier.text, true, Type::Int);
            binder.declare(&syntax.identifier, variable.clone());
            let body = binder.bind_statement(&syntax.body);
            (variable, body)
        });

        BoundStatement::for_statement(variable, lower_bound, upper_bound, body)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Bind `syntax` and report if its type is not `target`. The expression is
    /// returned as bound either way.
    fn bind_expression_of_type(
        &mut self,
        syntax: &ExpressionSyntax,
        target: Type,
    ) -> Arc<BoundExpression> {
        let result = self.bind_expression(syntax);
        if result.ty() != target {
            self.report_cannot_convert(syntax.span(), result.ty(), target);
        }
        result
    }

    fn bind_expression(&mut self, syntax: &ExpressionSyntax) -> Arc<BoundExpression> {
        match syntax {
            ExpressionSyntax::Parenthesized(node) => self.bind_expression(&node.expression),
            ExpressionSyntax::Literal(node) => self.bind_literal_expression(node),
            ExpressionSyntax::Name(node) => self.bind_name_expression(node),
            ExpressionSyntax::Assignment(node) => self.bind_assignment_expression(node),
            ExpressionSyntax::Unary(node) => self.bind_unary_expression(node),
            ExpressionSyntax::Binary(node) => self.bind_binary_expression(node),
        }
    }

    fn bind_literal_expression(&mut self, syntax: &LiteralExpressionSyntax) -> Arc<BoundExpression> {
        match &syntax.value {
            LiteralValue::Int(value) => BoundExpression::literal(*value),
            LiteralValue::Bool(value) => BoundExpression::literal(*value),
            LiteralValue::String(_) => {
                self.diagnostics.report(
                    syntax.literal_token.span(),
                    &messages::STRING_LITERALS_ARE_NOT_SUPPORTED,
                    &[],
                );
                BoundExpression::literal(0)
            }
        }
    }

    fn bind_name_expression(&mut self, syntax: &NameExpressionSyntax) -> Arc<BoundExpression> {
        let token = &syntax.identifier_token;
        if token.is_missing {
            return BoundExpression::literal(0);
        }

        match self.lookup(&token.text) {
            Some(variable) => BoundExpression::variable(variable),
            None => {
                self.report_undefined_name(token);
                BoundExpression::literal(0)
            }
        }
    }

    fn bind_assignment_expression(
        &mut self,
        syntax: &AssignmentExpressionSyntax,
    ) -> Arc<BoundExpression> {
        let expression = self.bind_expression(&syntax.expression);

        let Some(variable) = self.lookup(&syntax.identifier_token.text) else {
            self.report_undefined_name(&syntax.identifier_token);
            return expression;
        };

        if variable.is_read_only() {
            self.diagnostics.report(
                syntax.equals_token.span(),
                &messages::VARIABLE_0_IS_READ_ONLY,
                &[variable.name()],
            );
        }

        if expression.ty() != variable.ty() {
            self.report_cannot_convert(syntax.expression.span(), expression.ty(), variable.ty());
            return expression;
        }

        BoundExpression::assignment(variable, expression)
    }

    fn bind_unary_expression(&mut self, syntax: &UnaryExpressionSyntax) -> Arc<BoundExpression> {
        let operand = self.bind_expression(&syntax.operand);
        let operator_token = &syntax.operator_token;

        match BoundUnaryOperator::bind(operator_token.kind, operand.ty()) {
            Some(op) => BoundExpression::unary(op, operand),
            None => {
                self.diagnostics.report(
                    operator_token.span(),
                    &messages::UNARY_OPERATOR_0_NOT_DEFINED_FOR_TYPE_1,
                    &[operator_token.text.as_str(), operand.ty().name()],
                );
                operand
            }
        }
    }

    fn bind_binary_expression(&mut self, syntax: &BinaryExpressionSyntax) -> Arc<BoundExpression> {
        let left = self.bind_expression(&syntax.left);
        let right = self.bind_expression(&syntax.right);
        let operator_token = &syntax.operator_token;

        match BoundBinaryOperator::bind(operator_token.kind, left.ty(), right.ty()) {
            Some(op) => BoundExpression::binary(left, op, right),
            None => {
                self.diagnostics.report(
                    operator_token.span(),
                    &messages::BINARY_OPERATOR_0_NOT_DEFINED_FOR_TYPES_1_AND_2,
                    &[operator_token.text.as_str(), left.ty().name(), right.ty().name()],
                );
                left
            }
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn report_undefined_name(&mut self, identifier: &SyntaxToken) {
        self.diagnostics.report(
            identifier.span(),
            &messages::VARIABLE_0_DOESNT_EXIST,
            &[identifier.text.as_str()],
        );
    }

    fn report_cannot_convert(&mut self, span: TextSpan, from: Type, to: Type) {
        self.diagnostics.report(
            span,
            &messages::CANNOT_CONVERT_TYPE_0_TO_1,
            &[from.name(), to.name()],
        );
    }
}
