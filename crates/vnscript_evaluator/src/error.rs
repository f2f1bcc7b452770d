//! Runtime errors.
//!
//! These are internal faults, not user diagnostics. A program that bound
//! without diagnostics can still divide by zero, and a host that feeds the
//! evaluator something other than lowered code gets a structural error.

use thiserror::Error;
use vnscript_binder::{BoundNodeKind, Type};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("variable '{0}' has no value in the variable store")]
    UndefinedVariable(String),

    #[error("jump to undefined label '{0}'")]
    UndefinedLabel(String),

    #[error("{0:?} cannot be executed; the program must be lowered first")]
    UnexpectedStatement(BoundNodeKind),

    #[error("expected a value of type {expected}, found {actual}")]
    TypeMismatch { expected: Type, actual: Type },

    #[error("division by zero")]
    DivideByZero,

    #[error("evaluation exceeded the limit of {0} steps")]
    StepLimitExceeded(u64),
}
