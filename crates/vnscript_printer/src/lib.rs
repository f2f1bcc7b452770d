//! vnscript_printer: Debug dumps of syntax and bound trees.
//!
//! Trees are drawn one node per line with box-drawing guides:
//!
//! ```text
//! └──BlockStatement
//!     ├──VariableDeclaration variable = a
//!     │   └──LiteralExpression value = 1, type = Int
//!     └──ExpressionStatement
//!         └──VariableExpression variable = a, type = Int
//! ```

use std::io::{self, Write};
use vnscript_binder::{BoundBlockStatement, BoundExpression, BoundNodeRef, BoundStatement};
use vnscript_syntax::SyntaxNodeRef;

/// Write a syntax node and everything under it.
pub fn write_syntax_tree(out: &mut dyn Write, node: SyntaxNodeRef<'_>) -> io::Result<()> {
    pretty_print(out, node, "", true, &syntax_text, &syntax_children)
}

/// Write a bound node and everything under it.
pub fn write_bound_tree(out: &mut dyn Write, node: BoundNodeRef<'_>) -> io::Result<()> {
    pretty_print(out, node, "", true, &bound_text, &bound_children)
}

/// Write a lowered program as a block of its statements.
pub fn write_bound_program(out: &mut dyn Write, program: &BoundBlockStatement) -> io::Result<()> {
    writeln!(out, "└──BlockStatement")?;
    let count = program.statements.len();
    for (i, statement) in program.statements.iter().enumerate() {
        pretty_print(
            out,
            BoundNodeRef::Statement(statement),
            "    ",
            i + 1 == count,
            &bound_text,
            &bound_children,
        )?;
    }
    Ok(())
}

fn pretty_print<N: Copy>(
    out: &mut dyn Write,
    node: N,
    indent: &str,
    is_last: bool,
    text: &dyn Fn(N) -> String,
    children: &dyn Fn(N) -> Vec<N>,
) -> io::Result<()> {
    let marker = if is_last { "└──" } else { "├──" };
    writeln!(out, "{}{}{}", indent, marker, text(node))?;

    let child_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
    let nodes = children(node);
    let count = nodes.len();
    for (i, child) in nodes.into_iter().enumerate() {
        pretty_print(out, child, &child_indent, i + 1 == count, text, children)?;
    }
    Ok(())
}

fn syntax_children<'a>(node: SyntaxNodeRef<'a>) -> Vec<SyntaxNodeRef<'a>> {
    node.children()
}

fn bound_children<'a>(node: BoundNodeRef<'a>) -> Vec<BoundNodeRef<'a>> {
    node.children()
}

fn syntax_text(node: SyntaxNodeRef<'_>) -> String {
    match node {
        SyntaxNodeRef::Token(token) => match (&token.value, token.is_missing) {
            (_, true) => format!("{} (missing)", token.kind),
            (Some(value), false) => format!("{} {}", token.kind, value),
            (None, false) => token.kind.to_string(),
        },
        _ => node.kind().to_string(),
    }
}

fn bound_text(node: BoundNodeRef<'_>) -> String {
    match node {
        BoundNodeRef::Expression(expression) => {
            let ty = expression.ty();
            match expression {
                BoundExpression::Literal(literal) => {
                    format!("LiteralExpression value = {}, type = {}", literal.value, ty)
                }
                BoundExpression::Variable(variable) => {
                    format!("VariableExpression variable = {}, type = {}", variable.variable, ty)
                }
                BoundExpression::Assignment(assignment) => format!(
                    "AssignmentExpression variable = {}, type = {}",
                    assignment.variable, ty
                ),
                BoundExpression::Unary(unary) => format!("{:?}Expression type = {}", unary.op.kind, ty),
                BoundExpression::Binary(binary) => {
                    format!("{:?}Expression type = {}", binary.op.kind, ty)
                }
            }
        }
        BoundNodeRef::Statement(statement) => match statement {
            BoundStatement::VariableDeclaration(declaration) => {
                format!("VariableDeclaration variable = {}", declaration.variable)
            }
            BoundStatement::For(node) => format!("ForStatement variable = {}", node.variable),
            BoundStatement::Label(node) => format!("LabelStatement label = {}", node.label),
            BoundStatement::Goto(node) => format!("GotoStatement label = {}", node.label),
            BoundStatement::ConditionalGoto(node) => format!(
                "ConditionalGotoStatement label = {}, jump_if_false = {}",
                node.label, node.jump_if_false
            ),
            _ => format!("{:?}", statement.kind()),
        },
    }
}
