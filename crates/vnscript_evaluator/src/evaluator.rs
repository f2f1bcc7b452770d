//! Program-counter driven evaluation.

use crate::error::EvaluationError;
use rustc_hash::FxHashMap;
use vnscript_binder::{
    BoundBinaryOperatorKind, BoundBlockStatement, BoundExpression, BoundStatement,
    BoundUnaryOperatorKind, LabelSymbol, Type, Value, VariableSymbol,
};

/// The variable store. Keys are symbol identities, so same-named variables
/// from different scopes never collide. Owned by the caller and reused across
/// evaluations of chained submissions.
pub type Variables = FxHashMap<VariableSymbol, Value>;

/// Evaluation limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum number of statements to execute. `None` runs until the
    /// program ends, however long that takes.
    pub max_steps: Option<u64>,
}

/// Executes lowered programs against a variable store.
pub struct Evaluator<'v> {
    variables: &'v mut Variables,
    options: EvaluatorOptions,
}

impl<'v> Evaluator<'v> {
    pub fn new(variables: &'v mut Variables) -> Self {
        Self::with_options(variables, EvaluatorOptions::default())
    }

    pub fn with_options(variables: &'v mut Variables, options: EvaluatorOptions) -> Self {
        Self { variables, options }
    }

    /// Run a flat program and return the value of the last expression
    /// statement or declaration executed, if any.
    ///
    /// The program must contain only primitive statements: expression
    /// statements, declarations, labels, gotos and conditional gotos.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn evaluate(
        &mut self,
        program: &BoundBlockStatement,
    ) -> Result<Option<Value>, EvaluationError> {
        let labels = label_table(program);
        let statements = &program.statements;

        let mut last_value = None;
        let mut pc = 0;
        let mut steps: u64 = 0;

        while pc < statements.len() {
            if let Some(max_steps) = self.options.max_steps {
                if steps >= max_steps {
                    return Err(EvaluationError::StepLimitExceeded(max_steps));
                }
            }
            steps += 1;

            match statements[pc].as_ref() {
                BoundStatement::Expression(statement) => {
                    last_value = Some(self.evaluate_expression(&statement.expression)?);
                    pc += 1;
                }
                BoundStatement::VariableDeclaration(declaration) => {
                    let value = self.evaluate_expression(&declaration.initializer)?;
                    self.variables.insert(declaration.variable.clone(), value);
                    last_value = Some(value);
                    pc += 1;
                }
                BoundStatement::Label(_) => pc += 1,
                BoundStatement::Goto(goto) => pc = jump_target(&labels, &goto.label)?,
                BoundStatement::ConditionalGoto(goto) => {
                    let condition = as_bool(self.evaluate_expression(&goto.condition)?)?;
                    if condition != goto.jump_if_false {
                        pc = jump_target(&labels, &goto.label)?;
                    } else {
                        pc += 1;
                    }
                }
                other => return Err(EvaluationError::UnexpectedStatement(other.kind())),
            }
        }

        tracing::debug!(steps, "evaluation finished");
        Ok(last_value)
    }

    /// Evaluate a single expression tree.
    pub fn evaluate_expression(&mut self, node: &BoundExpression) -> Result<Value, EvaluationError> {
        match node {
            BoundExpression::Literal(literal) => Ok(literal.value),
            BoundExpression::Variable(variable) => self
                .variables
                .get(&variable.variable)
                .copied()
                .ok_or_else(|| {
                    EvaluationError::UndefinedVariable(variable.variable.name().to_string())
                }),
            BoundExpression::Assignment(assignment) => {
                let value = self.evaluate_expression(&assignment.expression)?;
                self.variables.insert(assignment.variable.clone(), value);
                Ok(value)
            }
            BoundExpression::Unary(unary) => {
                let operand = self.evaluate_expression(&unary.operand)?;
                apply_unary(unary.op.kind, operand)
            }
            BoundExpression::Binary(binary) => {
                // Both sides are always evaluated, including for `&&` and `||`.
                let left = self.evaluate_expression(&binary.left)?;
                let right = self.evaluate_expression(&binary.right)?;
                apply_binary(binary.op.kind, left, right)
            }
        }
    }
}

/// Map each label to the index of the statement following it.
fn label_table(program: &BoundBlockStatement) -> FxHashMap<LabelSymbol, usize> {
    program
        .statements
        .iter()
        .enumerate()
        .filter_map(|(i, statement)| match statement.as_ref() {
            BoundStatement::Label(label) => Some((label.label.clone(), i + 1)),
            _ => None,
        })
        .collect()
}

fn jump_target(
    labels: &FxHashMap<LabelSymbol, usize>,
    label: &LabelSymbol,
) -> Result<usize, EvaluationError> {
    labels
        .get(label)
        .copied()
        .ok_or_else(|| EvaluationError::UndefinedLabel(label.name().to_string()))
}

fn as_int(value: Value) -> Result<i32, EvaluationError> {
    value.as_int().ok_or(EvaluationError::TypeMismatch {
        expected: Type::Int,
        actual: value.ty(),
    })
}

fn as_bool(value: Value) -> Result<bool, EvaluationError> {
    value.as_bool().ok_or(EvaluationError::TypeMismatch {
        expected: Type::Bool,
        actual: value.ty(),
    })
}

fn apply_unary(kind: BoundUnaryOperatorKind, operand: Value) -> Result<Value, EvaluationError> {
    let value = match kind {
        BoundUnaryOperatorKind::Identity => Value::Int(as_int(operand)?),
        BoundUnaryOperatorKind::Negation => Value::Int(as_int(operand)?.wrapping_neg()),
        BoundUnaryOperatorKind::OnesComplement => Value::Int(!as_int(operand)?),
        BoundUnaryOperatorKind::LogicalNegation => Value::Bool(!as_bool(operand)?),
    };
    Ok(value)
}

fn apply_binary(
    kind: BoundBinaryOperatorKind,
    left: Value,
    right: Value,
) -> Result<Value, EvaluationError> {
    use BoundBinaryOperatorKind as K;

    let value = match kind {
        K::Addition => Value::Int(as_int(left)?.wrapping_add(as_int(right)?)),
        K::Subtraction => Value::Int(as_int(left)?.wrapping_sub(as_int(right)?)),
        K::Multiplication => Value::Int(as_int(left)?.wrapping_mul(as_int(right)?)),
        K::Division => {
            let divisor = as_int(right)?;
            if divisor == 0 {
                return Err(EvaluationError::DivideByZero);
            }
            Value::Int(as_int(left)?.wrapping_div(divisor))
        }
        K::Exponentiation => Value::Int(power(as_int(left)?, as_int(right)?)?),

        K::LogicalAnd => Value::Bool(as_bool(left)? && as_bool(right)?),
        K::LogicalOr => Value::Bool(as_bool(left)? || as_bool(right)?),

        K::BitwiseAndInt => Value::Int(as_int(left)? & as_int(right)?),
        K::BitwiseOrInt => Value::Int(as_int(left)? | as_int(right)?),
        K::BitwiseXorInt => Value::Int(as_int(left)? ^ as_int(right)?),
        K::BitwiseAndBool => Value::Bool(as_bool(left)? & as_bool(right)?),
        K::BitwiseOrBool => Value::Bool(as_bool(left)? | as_bool(right)?),
        K::BitwiseXorBool => Value::Bool(as_bool(left)? ^ as_bool(right)?),

        K::Equals => Value::Bool(left == right),
        K::NotEquals => Value::Bool(left != right),
        K::Less => Value::Bool(as_int(left)? < as_int(right)?),
        K::LessOrEquals => Value::Bool(as_int(left)? <= as_int(right)?),
        K::Greater => Value::Bool(as_int(left)? > as_int(right)?),
        K::GreaterOrEquals => Value::Bool(as_int(left)? >= as_int(right)?),
    };
    Ok(value)
}

/// Integer exponentiation, wrapping on overflow. Negative exponents truncate
/// the exact result toward zero.
fn power(base: i32, exponent: i32) -> Result<i32, EvaluationError> {
    if exponent >= 0 {
        return Ok(base.wrapping_pow(exponent.unsigned_abs()));
    }
    match base {
        0 => Err(EvaluationError::DivideByZero),
        1 => Ok(1),
        -1 if exponent % 2 == 0 => Ok(1),
        -1 => Ok(-1),
        _ => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power() {
        assert_eq!(power(2, 10), Ok(1024));
        assert_eq!(power(-3, 3), Ok(-27));
        assert_eq!(power(7, 0), Ok(1));
        assert_eq!(power(0, 0), Ok(1));
        assert_eq!(power(2, 31), Ok(i32::MIN));
    }

    #[test]
    fn test_power_negative_exponent() {
        assert_eq!(power(1, -5), Ok(1));
        assert_eq!(power(-1, -2), Ok(1));
        assert_eq!(power(-1, -3), Ok(-1));
        assert_eq!(power(2, -1), Ok(0));
        assert_eq!(power(-7, -2), Ok(0));
        assert_eq!(power(0, -1), Err(EvaluationError::DivideByZero));
    }

    #[test]
    fn test_arithmetic_wraps() {
        let sum = apply_binary(
            BoundBinaryOperatorKind::Addition,
            Value::Int(i32::MAX),
            Value::Int(1),
        );
        assert_eq!(sum, Ok(Value::Int(i32::MIN)));

        let quotient = apply_binary(
            BoundBinaryOperatorKind::Division,
            Value::Int(i32::MIN),
            Value::Int(-1),
        );
        assert_eq!(quotient, Ok(Value::Int(i32::MIN)));

        let negated = apply_unary(BoundUnaryOperatorKind::Negation, Value::Int(i32::MIN));
        assert_eq!(negated, Ok(Value::Int(i32::MIN)));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let quotient =
            apply_binary(BoundBinaryOperatorKind::Division, Value::Int(-7), Value::Int(2));
        assert_eq!(quotient, Ok(Value::Int(-3)));
    }

    #[test]
    fn test_operand_type_mismatch() {
        let result = apply_binary(
            BoundBinaryOperatorKind::Addition,
            Value::Bool(true),
            Value::Int(1),
        );
        assert_eq!(
            result,
            Err(EvaluationError::TypeMismatch {
                expected: Type::Int,
                actual: Type::Bool,
            })
        );
    }
}
