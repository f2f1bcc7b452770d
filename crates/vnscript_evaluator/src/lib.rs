//! vnscript_evaluator: Execution of lowered programs.
//!
//! The evaluator runs a flat statement sequence with a program counter,
//! resolving jumps through a label table built before execution starts.

mod error;
mod evaluator;

pub use error::EvaluationError;
pub use evaluator::{Evaluator, EvaluatorOptions, Variables};
