//! The lowerer.

use std::sync::Arc;
use vnscript_binder::{
    BoundBlockStatement, BoundExpression, BoundForStatement, BoundIfStatement, BoundStatement,
    BoundTreeRewriter, BoundWhileStatement, LabelSymbol, Type, VariableSymbol, INT_ADDITION,
    INT_LESS_OR_EQUALS,
};

/// Rewrites a bound statement into primitive control flow.
///
/// Each desugared construct produces a block that is rewritten again, so
/// control flow nested anywhere inside it is lowered as well. Label names are
/// `Label1`, `Label2`, ... numbered per [`Lowerer::lower`] call.
pub struct Lowerer {
    label_count: u32,
}

impl Lowerer {
    /// Lower `statement` and flatten it into one sequence of primitive
    /// statements.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn lower(statement: &Arc<BoundStatement>) -> BoundBlockStatement {
        let mut lowerer = Lowerer { label_count: 0 };
        let result = lowerer.rewrite_statement(statement);
        let flat = flatten(&result);
        tracing::debug!(
            statements = flat.statements.len(),
            labels = lowerer.label_count,
            "lowered program"
        );
        flat
    }

    fn generate_label(&mut self) -> LabelSymbol {
        self.label_count += 1;
        LabelSymbol::new(format!("Label{}", self.label_count))
    }
}

/// Collapse nested blocks into one sequence, preserving order.
///
/// Uses an explicit stack so deeply nested input cannot exhaust the call stack.
fn flatten(statement: &Arc<BoundStatement>) -> BoundBlockStatement {
    let mut statements = Vec::new();
    let mut stack = vec![Arc::clone(statement)];

    while let Some(current) = stack.pop() {
        match current.as_ref() {
            BoundStatement::Block(block) => stack.extend(block.statements.iter().rev().cloned()),
            _ => statements.push(current),
        }
    }

    BoundBlockStatement { statements }
}

impl BoundTreeRewriter for Lowerer {
    fn rewrite_if_statement(
        &mut self,
        _node: &Arc<BoundStatement>,
        statement: &BoundIfStatement,
    ) -> Arc<BoundStatement> {
        let result = match &statement.else_statement {
            // gotoFalse <condition> end
            // <then>
            // end:
            None => {
                let end_label = self.generate_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(
                        end_label.clone(),
                        Arc::clone(&statement.condition),
                        true,
                    ),
                    Arc::clone(&statement.then_statement),
                    BoundStatement::label(end_label),
                ])
            }
            // gotoFalse <condition> else
            // <then>
            // goto end
            // else:
            // <else>
            // end:
            Some(else_statement) => {
                let else_label = self.generate_label();
                let end_label = self.generate_label();
                BoundStatement::block(vec![
                    BoundStatement::conditional_goto(
                        else_label.clone(),
                        Arc::clone(&statement.condition),
                        true,
                    ),
                    Arc::clone(&statement.then_statement),
                    BoundStatement::goto(end_label.clone()),
                    BoundStatement::label(else_label),
                    Arc::clone(else_statement),
                    BoundStatement::label(end_label),
                ])
            }
        };

        self.rewrite_statement(&result)
    }

    fn rewrite_while_statement(
        &mut self,
        _node: &Arc<BoundStatement>,
        statement: &BoundWhileStatement,
    ) -> Arc<BoundStatement> {
        // goto check
        // continue:
        // <body>
        // check:
        // gotoTrue <condition> continue
        // end:
        let continue_label = self.generate_label();
        let check_label = self.generate_label();
        // Never jumped to; marks the loop exit.
        let end_label = self.generate_label();

        let result = BoundStatement::block(vec![
            BoundStatement::goto(check_label.clone()),
            BoundStatement::label(continue_label.clone()),
            Arc::clone(&statement.body),
            BoundStatement::label(check_label),
            BoundStatement::conditional_goto(
                continue_label,
                Arc::clone(&statement.condition),
                false,
            ),
            BoundStatement::label(end_label),
        ]);

        self.rewrite_statement(&result)
    }

    fn rewrite_for_statement(
        &mut self,
        _node: &Arc<BoundStatement>,
        statement: &BoundForStatement,
    ) -> Arc<BoundStatement> {
        // var <variable> = <lower>
        // let upperBound = <upper>
        // while <variable> <= upperBound
        // {
        //     <body>
        //     <variable> = <variable> + 1
        // }
        let variable = &statement.variable;
        let variable_declaration =
            BoundStatement::variable_declaration(variable.clone(), Arc::clone(&statement.lower_bound));

        let upper_bound = VariableSymbol::new("upperBound", true, Type::Int);
        let upper_bound_declaration = BoundStatement::variable_declaration(
            upper_bound.clone(),
            Arc::clone(&statement.upper_bound),
        );

        let condition = BoundExpression::binary(
            BoundExpression::variable(variable.clone()),
            &INT_LESS_OR_EQUALS,
            BoundExpression::variable(upper_bound),
        );
        let increment = BoundStatement::expression(BoundExpression::assignment(
            variable.clone(),
            BoundExpression::binary(
                BoundExpression::variable(variable.clone()),
                &INT_ADDITION,
                BoundExpression::literal(1),
            ),
        ));

        let body = BoundStatement::block(vec![Arc::clone(&statement.body), increment]);
        let result = BoundStatement::block(vec![
            variable_declaration,
            upper_bound_declaration,
            BoundStatement::while_statement(condition, body),
        ]);

        self.rewrite_statement(&result)
    }
}
