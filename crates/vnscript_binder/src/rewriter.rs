//! Bottom-up rewriting of bound trees.
//!
//! Every default method rebuilds a node only when one of its children came
//! back as a different reference. An implementor that overrides a method must
//! keep that property: return `Arc::clone(node)` when nothing changed.

use crate::bound_tree::*;
use std::sync::Arc;

/// A transformation over bound trees with identity-preserving defaults.
pub trait BoundTreeRewriter {
    fn rewrite_statement(&mut self, node: &Arc<BoundStatement>) -> Arc<BoundStatement> {
        match node.as_ref() {
            BoundStatement::Block(block) => self.rewrite_block_statement(node, block),
            BoundStatement::Expression(statement) => self.rewrite_expression_statement(node, statement),
            BoundStatement::VariableDeclaration(declaration) => {
                self.rewrite_variable_declaration(node, declaration)
            }
            BoundStatement::If(statement) => self.rewrite_if_statement(node, statement),
            BoundStatement::While(statement) => self.rewrite_while_statement(node, statement),
            BoundStatement::For(statement) => self.rewrite_for_statement(node, statement),
            BoundStatement::Label(statement) => self.rewrite_label_statement(node, statement),
            BoundStatement::Goto(statement) => self.rewrite_goto_statement(node, statement),
            BoundStatement::ConditionalGoto(statement) => {
                self.rewrite_conditional_goto_statement(node, statement)
            }
        }
    }

    fn rewrite_block_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        block: &BoundBlockStatement,
    ) -> Arc<BoundStatement> {
        // Allocated lazily, on the first child that changes.
        let mut rewritten: Option<Vec<Arc<BoundStatement>>> = None;

        for (i, statement) in block.statements.iter().enumerate() {
            let new_statement = self.rewrite_statement(statement);
            if let Some(statements) = rewritten.as_mut() {
                statements.push(new_statement);
            } else if !Arc::ptr_eq(&new_statement, statement) {
                let mut statements = Vec::with_capacity(block.statements.len());
                statements.extend(block.statements[..i].iter().cloned());
                statements.push(new_statement);
                rewritten = Some(statements);
            }
        }

        match rewritten {
            Some(statements) => BoundStatement::block(statements),
            None => Arc::clone(node),
        }
    }

    fn rewrite_expression_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundExpressionStatement,
    ) -> Arc<BoundStatement> {
        let expression = self.rewrite_expression(&statement.expression);
        if Arc::ptr_eq(&expression, &statement.expression) {
            return Arc::clone(node);
        }
        BoundStatement::expression(expression)
    }

    fn rewrite_variable_declaration(
        &mut self,
        node: &Arc<BoundStatement>,
        declaration: &BoundVariableDeclaration,
    ) -> Arc<BoundStatement> {
        let initializer = self.rewrite_expression(&declaration.initializer);
        if Arc::ptr_eq(&initializer, &declaration.initializer) {
            return Arc::clone(node);
        }
        BoundStatement::variable_declaration(declaration.variable.clone(), initializer)
    }

    fn rewrite_if_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundIfStatement,
    ) -> Arc<BoundStatement> {
        let condition = self.rewrite_expression(&statement.condition);
        let then_statement = self.rewrite_statement(&statement.then_statement);
        let else_statement = statement
            .else_statement
            .as_ref()
            .map(|else_statement| self.rewrite_statement(else_statement));

        let else_unchanged = match (&else_statement, &statement.else_statement) {
            (Some(new), Some(old)) => Arc::ptr_eq(new, old),
            (None, None) => true,
            _ => false,
        };
        if Arc::ptr_eq(&condition, &statement.condition)
            && Arc::ptr_eq(&then_statement, &statement.then_statement)
            && else_unchanged
        {
            return Arc::clone(node);
        }
        BoundStatement::if_statement(condition, then_statement, else_statement)
    }

    fn rewrite_while_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundWhileStatement,
    ) -> Arc<BoundStatement> {
        let condition = self.rewrite_expression(&statement.condition);
        let body = self.rewrite_statement(&statement.body);
        if Arc::ptr_eq(&condition, &statement.condition) && Arc::ptr_eq(&body, &statement.body) {
            return Arc::clone(node);
        }
        BoundStatement::while_statement(condition, body)
    }

    fn rewrite_for_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundForStatement,
    ) -> Arc<BoundStatement> {
        let lower_bound = self.rewrite_expression(&statement.lower_bound);
        let upper_bound = self.rewrite_expression(&statement.upper_bound);
        let body = self.rewrite_statement(&statement.body);
        if Arc::ptr_eq(&lower_bound, &statement.lower_bound)
            && Arc::ptr_eq(&upper_bound, &statement.upper_bound)
            && Arc::ptr_eq(&body, &statement.body)
        {
            return Arc::clone(node);
        }
        BoundStatement::for_statement(statement.variable.clone(), lower_bound, upper_bound, body)
    }

    fn rewrite_label_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        _statement: &BoundLabelStatement,
    ) -> Arc<BoundStatement> {
        Arc::clone(node)
    }

    fn rewrite_goto_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        _statement: &BoundGotoStatement,
    ) -> Arc<BoundStatement> {
        Arc::clone(node)
    }

    fn rewrite_conditional_goto_statement(
        &mut self,
        node: &Arc<BoundStatement>,
        statement: &BoundConditionalGotoStatement,
    ) -> Arc<BoundStatement> {
        let condition = self.rewrite_expression(&statement.condition);
        if Arc::ptr_eq(&condition, &statement.condition) {
            return Arc::clone(node);
        }
        BoundStatement::conditional_goto(
            statement.label.clone(),
            condition,
            statement.jump_if_false,
        )
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn rewrite_expression(&mut self, node: &Arc<BoundExpression>) -> Arc<BoundExpression> {
        match node.as_ref() {
            BoundExpression::Literal(_) | BoundExpression::Variable(_) => Arc::clone(node),
            BoundExpression::Assignment(assignment) => {
                self.rewrite_assignment_expression(node, assignment)
            }
            BoundExpression::Unary(unary) => self.rewrite_unary_expression(node, unary),
            BoundExpression::Binary(binary) => self.rewrite_binary_expression(node, binary),
        }
    }

    fn rewrite_assignment_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        assignment: &BoundAssignmentExpression,
    ) -> Arc<BoundExpression> {
        let expression = self.rewrite_expression(&assignment.expression);
        if Arc::ptr_eq(&expression, &assignment.expression) {
            return Arc::clone(node);
        }
        BoundExpression::assignment(assignment.variable.clone(), expression)
    }

    fn rewrite_unary_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        unary: &BoundUnaryExpression,
    ) -> Arc<BoundExpression> {
        let operand = self.rewrite_expression(&unary.operand);
        if Arc::ptr_eq(&operand, &unary.operand) {
            return Arc::clone(node);
        }
        BoundExpression::unary(unary.op, operand)
    }

    fn rewrite_binary_expression(
        &mut self,
        node: &Arc<BoundExpression>,
        binary: &BoundBinaryExpression,
    ) -> Arc<BoundExpression> {
        let left = self.rewrite_expression(&binary.left);
        let right = self.rewrite_expression(&binary.right);
        if Arc::ptr_eq(&left, &binary.left) && Arc::ptr_eq(&right, &binary.right) {
            return Arc::clone(node);
        }
        BoundExpression::binary(left, binary.op, right)
    }
}
