//! End-to-end tests: parse, bind, lower and evaluate through `Compilation`.
//!
//! Diagnostic tests mark expected spans with `[` and `]` in the source text;
//! neither character is part of the language.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use vnscript_binder::Value;
use vnscript_compiler::{Compilation, EvaluationResult};
use vnscript_core::TextSpan;
use vnscript_evaluator::{EvaluationError, EvaluatorOptions, Variables};
use vnscript_syntax::SyntaxTree;

fn evaluate(text: &str) -> EvaluationResult {
    let compilation = Compilation::new(SyntaxTree::parse(text));
    let mut variables = Variables::default();
    compilation.evaluate(&mut variables).unwrap()
}

fn assert_value(text: &str, expected: impl Into<Value>) {
    let result = evaluate(text);
    assert!(result.diagnostics.is_empty(), "{}: {:?}", text, result.diagnostics);
    assert_eq!(result.value, Some(expected.into()), "{}", text);
}

/// Strip `[` `]` markers from `text`, returning the clean text and the
/// marked spans in order.
fn parse_annotated(text: &str) -> (String, Vec<TextSpan>) {
    let mut clean = String::new();
    let mut spans = Vec::new();
    let mut starts = Vec::new();

    for c in text.chars() {
        match c {
            '[' => starts.push(clean.len() as u32),
            ']' => {
                let start = starts.pop().expect("unbalanced ']'");
                spans.push(TextSpan::from_bounds(start, clean.len() as u32));
            }
            _ => clean.push(c),
        }
    }

    assert!(starts.is_empty(), "unbalanced '['");
    (clean, spans)
}

fn assert_diagnostics(annotated: &str, expected: &[&str]) {
    let (text, spans) = parse_annotated(annotated);
    let result = evaluate(&text);

    assert_eq!(spans.len(), expected.len(), "each message needs one marked span");
    let actual: Vec<(&str, TextSpan)> = result
        .diagnostics
        .iter()
        .map(|d| (d.message.as_str(), d.span))
        .collect();
    let expected: Vec<(&str, TextSpan)> = expected.iter().copied().zip(spans).collect();
    assert_eq!(actual, expected);
    assert_eq!(result.value, None);
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_literals_and_unary() {
    assert_value("1", 1);
    assert_value("+1", 1);
    assert_value("-1", -1);
    assert_value("~1", -2);
    assert_value("true", true);
    assert_value("false", false);
    assert_value("!true", false);
    assert_value("!false", true);
    assert_value("(10)", 10);
}

#[test]
fn test_arithmetic() {
    assert_value("14 + 12", 26);
    assert_value("12 - 3", 9);
    assert_value("4 * 2", 8);
    assert_value("9 / 3", 3);
    assert_value("7 / 2", 3);
    assert_value("-7 / 2", -3);
    assert_value("2 ** 3", 8);
    assert_value("2 ** 0", 1);
    assert_value("-2 ** 2", 4);
    assert_value("1 + 2 * 3", 7);
    assert_value("(1 + 2) * 3", 9);
    assert_value("2 * 3 ** 2", 18);
}

#[test]
fn test_integer_arithmetic_wraps() {
    assert_value("2147483647 + 1", i32::MIN);
    assert_value("2 ** 31", i32::MIN);
}

#[test]
fn test_comparisons() {
    assert_value("12 == 3", false);
    assert_value("3 == 3", true);
    assert_value("12 != 3", true);
    assert_value("3 != 3", false);
    assert_value("3 < 4", true);
    assert_value("5 < 4", false);
    assert_value("4 <= 4", true);
    assert_value("4 <= 5", true);
    assert_value("5 <= 4", false);
    assert_value("4 > 3", true);
    assert_value("4 > 5", false);
    assert_value("4 >= 4", true);
    assert_value("5 >= 4", true);
    assert_value("4 >= 5", false);
    assert_value("false == false", true);
    assert_value("true == false", false);
    assert_value("false != false", false);
    assert_value("true != false", true);
}

#[test]
fn test_int_bitwise() {
    assert_value("1 | 2", 3);
    assert_value("1 | 0", 1);
    assert_value("1 & 3", 1);
    assert_value("1 & 0", 0);
    assert_value("1 ^ 0", 1);
    assert_value("0 ^ 1", 1);
    assert_value("1 ^ 3", 2);
}

#[test]
fn test_bool_logic() {
    assert_value("true && true", true);
    assert_value("true && false", false);
    assert_value("false || false", false);
    assert_value("false || true", true);
    assert_value("false | false", false);
    assert_value("false | true", true);
    assert_value("true & true", true);
    assert_value("false & false", false);
    assert_value("true ^ false", true);
    assert_value("true ^ true", false);
    // Both operands run even when the left one decides the result.
    assert_value("{ var a = 0 var b = false && (a = 1) == 1 a }", 1);
    assert_value("{ var a = 0 var b = true || (a = 1) == 1 a }", 1);
}

#[test]
fn test_statements() {
    assert_value("{ var a = 0 (a = 10) * a }", 100);
    assert_value("{ var a = 0 if a == 0 a = 10 a }", 10);
    assert_value("{ var a = 0 if a == 4 a = 10 a }", 0);
    assert_value("{ var a = 0 if a == 0 a = 10 else a = 5 a }", 10);
    assert_value("{ var a = 0 if a == 4 a = 10 else a = 5 a }", 5);
    assert_value(
        "{ var i = 10 var result = 0 while i > 0 { result = result + i i = i - 1 } result }",
        55,
    );
    assert_value("{ var result = 0 for i = 1 to 10 { result = result + i } result }", 55);
    assert_value("{ var a = 10 for i = 1 to (a = a - 1) { } a }", 9);
}

#[test]
fn test_declaration_is_the_last_value() {
    assert_value("var a = 42", 42);
    assert_value("{ let b = true }", true);
}

#[test]
fn test_nested_control_flow() {
    assert_value(
        "{ var n = 0 for i = 1 to 3 for j = 1 to 3 if i != j n = n + 1 n }",
        6,
    );
    assert_value(
        "{ var i = 0 var odd = 0 while i < 10 { i = i + 1 if i / 2 * 2 != i odd = odd + 1 } odd }",
        5,
    );
}

#[test]
fn test_empty_for_range_runs_no_iterations() {
    assert_value("{ var n = 0 for i = 5 to 1 n = n + 1 n }", 0);
}

#[test]
fn test_shadowing_in_nested_scope() {
    assert_value("{ var x = 1 { var x = 2 } x }", 1);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_reports_undefined_name() {
    assert_diagnostics(
        "[x] * 10",
        &["Variable 'x' doesn't exist in the current context."],
    );
}

#[test]
fn test_reports_redeclaration() {
    assert_diagnostics(
        "{ var x = 10 var y = 100 { var x = 10 } var [x] = 5 }",
        &["Variable 'x' is already declared."],
    );
}

#[test]
fn test_reports_undefined_assignment_target() {
    assert_diagnostics(
        "[x] = 10",
        &["Variable 'x' doesn't exist in the current context."],
    );
}

#[test]
fn test_reports_read_only_assignment() {
    assert_diagnostics(
        "{ let x = 10 x [=] 20 }",
        &["Variable 'x' is read-only and cannot be assigned to."],
    );
}

#[test]
fn test_reports_read_only_loop_variable() {
    assert_diagnostics(
        "for i = 1 to 2 i [=] 5",
        &["Variable 'i' is read-only and cannot be assigned to."],
    );
}

#[test]
fn test_reports_assignment_conversion() {
    assert_diagnostics(
        "{ var x = 10 x = [true] }",
        &["Cannot convert type 'Bool' to 'Int'."],
    );
}

#[test]
fn test_reports_condition_conversion() {
    assert_diagnostics(
        "{ var x = 0 if [10] x = 10 }",
        &["Cannot convert type 'Int' to 'Bool'."],
    );
    assert_diagnostics(
        "{ var x = 0 while [10] x = 10 }",
        &["Cannot convert type 'Int' to 'Bool'."],
    );
}

#[test]
fn test_reports_bound_conversion() {
    assert_diagnostics(
        "{ var result = 0 for i = [false] to 10 result = result + i }",
        &["Cannot convert type 'Bool' to 'Int'."],
    );
    assert_diagnostics(
        "{ var result = 0 for i = 1 to [true] result = result + i }",
        &["Cannot convert type 'Bool' to 'Int'."],
    );
}

#[test]
fn test_reports_undefined_unary_operator() {
    assert_diagnostics(
        "[+]true",
        &["Unary operator '+' is not defined for type 'Bool'."],
    );
}

#[test]
fn test_reports_undefined_binary_operator() {
    assert_diagnostics(
        "10 [*] false",
        &["Binary operator '*' is not defined for types 'Int' and 'Bool'."],
    );
    assert_diagnostics(
        "false [+] 1",
        &["Binary operator '+' is not defined for types 'Bool' and 'Int'."],
    );
}

#[test]
fn test_reports_string_literal() {
    assert_diagnostics("[\"hi\"]", &["String literals are not supported."]);
}

#[test]
fn test_block_recovery_terminates() {
    assert_diagnostics(
        "{\n[)][]",
        &[
            "Unexpected token: <CloseParenthesisToken>, expected <IdentifierToken>.",
            "Unexpected token: <EndOfFileToken>, expected <CloseBraceToken>.",
        ],
    );
}

#[test]
fn test_syntax_diagnostics_precede_binding_diagnostics() {
    let (text, spans) = parse_annotated("{ [x] } [}]");
    let result = evaluate(&text);

    let actual: Vec<_> = result.diagnostics.iter().map(|d| (d.message.as_str(), d.span)).collect();
    assert_eq!(
        actual,
        vec![
            ("Unexpected token: <CloseBraceToken>, expected <EndOfFileToken>.", spans[1]),
            ("Variable 'x' doesn't exist in the current context.", spans[0]),
        ]
    );
}

#[test]
fn test_reports_every_error_in_one_pass() {
    assert_diagnostics(
        "{ [a] = 1 [b] + 2 let c = 1 c [=] 2 }",
        &[
            "Variable 'a' doesn't exist in the current context.",
            "Variable 'b' doesn't exist in the current context.",
            "Variable 'c' is read-only and cannot be assigned to.",
        ],
    );
}

// ============================================================================
// Execution gating
// ============================================================================

#[test]
fn test_diagnostics_suppress_all_execution() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var a = 1 a = 5 x }"));
    let mut variables = Variables::default();

    let result = compilation.evaluate(&mut variables).unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.value, None);
    assert!(variables.is_empty());
}

#[test]
fn test_successful_evaluation_fills_the_store() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var a = 1 let b = a + 1 }"));
    let mut variables = Variables::default();

    let result = compilation.evaluate(&mut variables).unwrap();
    assert_eq!(result.value, Some(Value::Int(2)));

    let mut stored: Vec<(String, Value)> = variables
        .iter()
        .map(|(symbol, value)| (symbol.name().to_string(), *value))
        .collect();
    stored.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        stored,
        vec![("a".to_string(), Value::Int(1)), ("b".to_string(), Value::Int(2))]
    );
}

#[test]
fn test_runtime_fault_is_an_error_not_a_diagnostic() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var a = 0 10 / a }"));
    let mut variables = Variables::default();
    assert_eq!(
        compilation.evaluate(&mut variables),
        Err(EvaluationError::DivideByZero)
    );
}

#[test]
fn test_step_limit_stops_infinite_loop() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var a = 0 while true a = a + 1 }"));
    let mut variables = Variables::default();
    let options = EvaluatorOptions {
        max_steps: Some(1_000),
    };
    assert_eq!(
        compilation.evaluate_with_options(&mut variables, options),
        Err(EvaluationError::StepLimitExceeded(1_000))
    );
}

#[test]
fn test_for_loop_up_to_int_max_never_ends() {
    // The counter wraps past the upper bound, so only the step limit stops it.
    let compilation = Compilation::new(SyntaxTree::parse(
        "{ var n = 0 for i = 2147483646 to 2147483647 n = n + 1 }",
    ));
    let mut variables = Variables::default();
    let options = EvaluatorOptions {
        max_steps: Some(1_000),
    };
    assert_eq!(
        compilation.evaluate_with_options(&mut variables, options),
        Err(EvaluationError::StepLimitExceeded(1_000))
    );
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_continue_with_sees_previous_variables() {
    let mut variables = Variables::default();
    let first = Compilation::new(SyntaxTree::parse("var x = 10"));
    assert_eq!(first.evaluate(&mut variables).unwrap().value, Some(Value::Int(10)));

    let second = first.continue_with(SyntaxTree::parse("x = x * 2"));
    assert_eq!(second.evaluate(&mut variables).unwrap().value, Some(Value::Int(20)));

    let third = second.continue_with(SyntaxTree::parse("x + 1"));
    assert_eq!(third.evaluate(&mut variables).unwrap().value, Some(Value::Int(21)));
}

#[test]
fn test_continue_with_links_previous() {
    let first = Compilation::new(SyntaxTree::parse("var x = 10"));
    let second = first.continue_with(SyntaxTree::parse("x"));
    assert!(second.previous().is_some_and(|previous| Arc::ptr_eq(previous, &first)));
    assert!(first.previous().is_none());
}

#[test]
fn test_top_level_redeclaration_across_submissions() {
    let first = Compilation::new(SyntaxTree::parse("var x = 10"));
    let (text, spans) = parse_annotated("var [x] = 5");
    let second = first.continue_with(SyntaxTree::parse(&text));

    let mut variables = Variables::default();
    let result = second.evaluate(&mut variables).unwrap();
    let actual: Vec<_> = result.diagnostics.iter().map(|d| (d.message.as_str(), d.span)).collect();
    assert_eq!(actual, vec![("Variable 'x' is already declared.", spans[0])]);
}

#[test]
fn test_nested_redeclaration_across_submissions_is_allowed() {
    let mut variables = Variables::default();
    let first = Compilation::new(SyntaxTree::parse("var x = 10"));
    first.evaluate(&mut variables).unwrap();

    let second = first.continue_with(SyntaxTree::parse("{ var x = true x }"));
    let result = second.evaluate(&mut variables).unwrap();
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.value, Some(Value::Bool(true)));
}

#[test]
fn test_previous_diagnostics_are_carried_forward() {
    let first = Compilation::new(SyntaxTree::parse("y"));
    let second = first.continue_with(SyntaxTree::parse("z"));

    let mut variables = Variables::default();
    let result = second.evaluate(&mut variables).unwrap();
    let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Variable 'y' doesn't exist in the current context.",
            "Variable 'z' doesn't exist in the current context.",
        ]
    );
}

#[test]
fn test_previous_syntax_diagnostics_block_evaluation() {
    let first = Compilation::new(SyntaxTree::parse("var x ="));
    let second = first.continue_with(SyntaxTree::parse("x + 1"));

    let mut variables = Variables::default();
    let result = second.evaluate(&mut variables).unwrap();
    let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Unexpected token: <EndOfFileToken>, expected <IdentifierToken>."]
    );
    assert_eq!(result.value, None);
    assert!(variables.is_empty());
}

#[test]
fn test_previous_binding_diagnostics_precede_current_syntax_diagnostics() {
    let first = Compilation::new(SyntaxTree::parse("y"));
    let second = first.continue_with(SyntaxTree::parse("1 )"));

    let messages: Vec<_> = second
        .diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Variable 'y' doesn't exist in the current context.",
            "Unexpected token: <CloseParenthesisToken>, expected <EndOfFileToken>.",
        ]
    );
}

#[test]
fn test_global_scope_is_computed_once() {
    let compilation = Compilation::new(SyntaxTree::parse("var x = 1"));
    let first = Arc::clone(compilation.global_scope());
    let second = Arc::clone(compilation.global_scope());
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_global_scope_is_shared_across_threads() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var x = 1 x + 1 }"));
    let scopes: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| Arc::clone(compilation.global_scope())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(scopes.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

// ============================================================================
// Tree output
// ============================================================================

#[test]
fn test_emit_tree_prints_lowered_program() {
    let compilation = Compilation::new(SyntaxTree::parse("{ var a = 1 if a == 1 a = 2 }"));
    let mut out = Vec::new();
    compilation.emit_tree(&mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\
└──BlockStatement
    ├──VariableDeclaration variable = a
    │   └──LiteralExpression value = 1, type = Int
    ├──ConditionalGotoStatement label = Label1, jump_if_false = true
    │   └──EqualsExpression type = Bool
    │       ├──VariableExpression variable = a, type = Int
    │       └──LiteralExpression value = 1, type = Int
    ├──ExpressionStatement
    │   └──AssignmentExpression variable = a, type = Int
    │       └──LiteralExpression value = 2, type = Int
    └──LabelStatement label = Label1
"
    );
}
