//! Errors that stop the runner.
//!
//! Problems in the script itself are diagnostics and never reach here.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use vnscript_evaluator::EvaluationError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("cannot read '{}'", .path.display())]
    #[diagnostic(code(vns::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("evaluation failed: {source}")]
    #[diagnostic(code(vns::evaluation))]
    Evaluation {
        #[from]
        source: EvaluationError,
    },

    #[error("I/O error: {source}")]
    #[diagnostic(code(vns::io))]
    Io {
        #[from]
        source: std::io::Error,
    },
}
