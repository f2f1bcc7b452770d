//! Binder integration tests.
//!
//! Tests the parse -> bind pipeline: name resolution, type checking, recovery
//! values and chaining across submissions.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use vnscript_binder::{
    Binder, BoundExpression, BoundGlobalScope, BoundStatement, Type, Value,
};
use vnscript_core::TextSpan;
use vnscript_syntax::SyntaxTree;

/// Helper: parse and bind a fresh submission.
fn bind(source: &str) -> BoundGlobalScope {
    bind_after(None, source)
}

/// Helper: parse and bind a submission chained after `previous`.
fn bind_after(previous: Option<Arc<BoundGlobalScope>>, source: &str) -> BoundGlobalScope {
    let tree = SyntaxTree::parse(source);
    assert!(tree.diagnostics().is_empty(), "syntax errors in: {}", source);
    Binder::bind_global_scope(previous, tree.root())
}

fn messages(scope: &BoundGlobalScope) -> Vec<&str> {
    scope.diagnostics.iter().map(|d| d.message.as_str()).collect()
}

/// Helper: the expression of a top-level expression statement.
fn top_expression(scope: &BoundGlobalScope) -> &BoundExpression {
    match scope.statement.as_ref() {
        BoundStatement::Expression(statement) => &statement.expression,
        other => panic!("expected expression statement, got {:?}", other.kind()),
    }
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_undefined_name_reported_at_identifier() {
    let scope = bind("x * 10");
    assert_eq!(
        messages(&scope),
        vec!["Variable 'x' doesn't exist in the current context."]
    );
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(0, 1));
}

#[test]
fn test_undefined_name_recovers_with_int_literal() {
    let scope = bind("x");
    match top_expression(&scope) {
        BoundExpression::Literal(literal) => assert_eq!(literal.value, Value::Int(0)),
        other => panic!("expected literal, got {:?}", other.kind()),
    }
}

#[test]
fn test_initializer_cannot_see_its_own_variable() {
    let scope = bind("var x = x");
    assert_eq!(
        messages(&scope),
        vec!["Variable 'x' doesn't exist in the current context."]
    );
}

#[test]
fn test_initializer_sees_outer_variable_of_same_name() {
    let scope = bind("{ var x = 1 { var x = x + 1 } }");
    assert!(scope.diagnostics.is_empty());
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_redeclaration_in_same_scope_reported_once() {
    let source = "{ var x = 1 var x = 2 }";
    let scope = bind(source);
    assert_eq!(messages(&scope), vec!["Variable 'x' is already declared."]);
    // The second declaration's identifier.
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(16, 1));
}

#[test]
fn test_redeclaration_in_nested_scope_not_reported() {
    let scope = bind("{ var x = 1 { var x = true } }");
    assert!(scope.diagnostics.is_empty());
}

#[test]
fn test_declaration_type_comes_from_initializer() {
    let scope = bind("let flag = 1 < 2");
    let variable = &scope.variables["flag"];
    assert_eq!(variable.ty(), Type::Bool);
    assert!(variable.is_read_only());
}

#[test]
fn test_block_variables_are_not_global() {
    let scope = bind("{ var a = 1 }");
    assert!(scope.variables.is_empty());

    let scope = bind("var a = 1");
    assert_eq!(scope.variables.keys().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_for_variable_is_read_only_int() {
    let scope = bind("for i = 1 to 3 i = 5");
    assert_eq!(
        messages(&scope),
        vec!["Variable 'i' is read-only and cannot be assigned to."]
    );
}

#[test]
fn test_for_variable_shadows_outer_variable() {
    let scope = bind("{ var i = true for i = 1 to 3 i + 1 }");
    assert!(scope.diagnostics.is_empty());
}

#[test]
fn test_for_variable_not_visible_after_loop() {
    let scope = bind("{ for i = 1 to 3 { } i }");
    assert_eq!(
        messages(&scope),
        vec!["Variable 'i' doesn't exist in the current context."]
    );
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assignment_to_read_only_reported_at_equals() {
    let scope = bind("{ let x = 10 x = 20 }");
    assert_eq!(
        messages(&scope),
        vec!["Variable 'x' is read-only and cannot be assigned to."]
    );
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(15, 1));
}

#[test]
fn test_assignment_to_read_only_with_wrong_type_reports_both() {
    let scope = bind("{ let x = 10 x = true }");
    assert_eq!(
        messages(&scope),
        vec![
            "Variable 'x' is read-only and cannot be assigned to.",
            "Cannot convert type 'Bool' to 'Int'.",
        ]
    );
    assert_eq!(scope.diagnostics[1].span, TextSpan::new(17, 4));
}

#[test]
fn test_assignment_to_undefined_returns_right_hand_side() {
    let scope = bind("x = true");
    assert_eq!(
        messages(&scope),
        vec!["Variable 'x' doesn't exist in the current context."]
    );
    assert_eq!(top_expression(&scope).ty(), Type::Bool);
    assert!(matches!(top_expression(&scope), BoundExpression::Literal(_)));
}

// ============================================================================
// Operators and conditions
// ============================================================================

#[test]
fn test_undefined_binary_operator() {
    let scope = bind("false + 1");
    assert_eq!(
        messages(&scope),
        vec!["Binary operator '+' is not defined for types 'Bool' and 'Int'."]
    );
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(6, 1));
    assert_eq!(top_expression(&scope).ty(), Type::Bool);
}

#[test]
fn test_undefined_unary_operator() {
    let scope = bind("-true");
    assert_eq!(
        messages(&scope),
        vec!["Unary operator '-' is not defined for type 'Bool'."]
    );
    assert_eq!(top_expression(&scope).ty(), Type::Bool);
}

#[test]
fn test_condition_must_be_bool() {
    let scope = bind("if 10 1");
    assert_eq!(messages(&scope), vec!["Cannot convert type 'Int' to 'Bool'."]);
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(3, 2));

    let scope = bind("while 1 + 1 { }");
    assert_eq!(messages(&scope), vec!["Cannot convert type 'Int' to 'Bool'."]);
}

#[test]
fn test_for_bounds_must_be_int() {
    let scope = bind("for i = false to true { }");
    assert_eq!(
        messages(&scope),
        vec![
            "Cannot convert type 'Bool' to 'Int'.",
            "Cannot convert type 'Bool' to 'Int'.",
        ]
    );
}

#[test]
fn test_binding_continues_after_errors() {
    let scope = bind("{ a + 1 b = 2 var c = true + 1 }");
    assert_eq!(
        messages(&scope),
        vec![
            "Variable 'a' doesn't exist in the current context.",
            "Variable 'b' doesn't exist in the current context.",
            "Binary operator '+' is not defined for types 'Bool' and 'Int'.",
        ]
    );
}

#[test]
fn test_string_literal_rejected() {
    let scope = bind("\"hello\"");
    assert_eq!(messages(&scope), vec!["String literals are not supported."]);
    assert_eq!(scope.diagnostics[0].span, TextSpan::new(0, 7));
    assert_eq!(top_expression(&scope).ty(), Type::Int);
}

// ============================================================================
// Chaining
// ============================================================================

#[test]
fn test_chained_variable_is_visible() {
    let first = Arc::new(bind("var x = 10"));
    let second = bind_after(Some(first.clone()), "x * 2");
    assert!(second.diagnostics.is_empty());

    match top_expression(&second) {
        BoundExpression::Binary(binary) => match binary.left.as_ref() {
            BoundExpression::Variable(variable) => {
                assert_eq!(&variable.variable, &first.variables["x"]);
            }
            other => panic!("expected variable, got {:?}", other.kind()),
        },
        other => panic!("expected binary, got {:?}", other.kind()),
    }
}

#[test]
fn test_chained_lookup_walks_all_frames() {
    let first = Arc::new(bind("var a = 1"));
    let second = Arc::new(bind_after(Some(first), "var b = 2"));
    let third = bind_after(Some(second), "a + b");
    assert!(third.diagnostics.is_empty());
    assert_eq!(third.frames().count(), 3);
}

#[test]
fn test_top_level_redeclaration_of_chained_variable_reported() {
    let first = Arc::new(bind("var x = 10"));
    let second = bind_after(Some(first), "var x = 20");
    assert_eq!(messages(&second), vec!["Variable 'x' is already declared."]);
    assert!(second.variables.is_empty());
}

#[test]
fn test_nested_redeclaration_of_chained_variable_allowed() {
    let first = Arc::new(bind("var x = 10"));
    let second = bind_after(Some(first), "{ var x = true x }");
    assert!(second.diagnostics.is_empty());
}

#[test]
fn test_previous_diagnostics_come_first() {
    let first = Arc::new(bind("y"));
    let second = bind_after(Some(first), "z");
    assert_eq!(
        messages(&second),
        vec![
            "Variable 'y' doesn't exist in the current context.",
            "Variable 'z' doesn't exist in the current context.",
        ]
    );
}
