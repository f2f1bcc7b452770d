//! vnscript_lowering: Desugaring of structured control flow.
//!
//! `if`, `while` and `for` are rewritten into labels, gotos and conditional
//! gotos, and the resulting block tree is flattened into the single statement
//! sequence the evaluator executes.

mod lowerer;

pub use lowerer::Lowerer;
