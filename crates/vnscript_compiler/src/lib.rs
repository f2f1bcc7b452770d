//! vnscript_compiler: Compilation sessions.
//!
//! A [`Compilation`] owns one parsed submission and, optionally, the
//! compilation it continues. Binding happens lazily on first use; lowering
//! and evaluation only run when the submission and its predecessors bound
//! without diagnostics.

use std::io;
use std::sync::{Arc, OnceLock};
use vnscript_binder::{Binder, BoundGlobalScope, Value};
use vnscript_diagnostics::Diagnostic;
use vnscript_evaluator::{EvaluationError, Evaluator, EvaluatorOptions, Variables};
use vnscript_lowering::Lowerer;
use vnscript_syntax::SyntaxTree;

/// The outcome of evaluating a compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Each submission's syntax then binding diagnostics, earliest
    /// submission first. Non-empty means nothing was executed.
    pub diagnostics: Vec<Diagnostic>,
    /// Value of the last expression statement or declaration executed.
    pub value: Option<Value>,
}

/// One submission in a session.
#[derive(Debug)]
pub struct Compilation {
    previous: Option<Arc<Compilation>>,
    syntax_tree: SyntaxTree,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
}

impl Compilation {
    pub fn new(syntax_tree: SyntaxTree) -> Arc<Self> {
        Self::with_previous(None, syntax_tree)
    }

    fn with_previous(previous: Option<Arc<Compilation>>, syntax_tree: SyntaxTree) -> Arc<Self> {
        Arc::new(Self {
            previous,
            syntax_tree,
            global_scope: OnceLock::new(),
        })
    }

    /// Start a new submission that sees every top-level variable declared
    /// by this one and its predecessors.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Arc<Self> {
        Self::with_previous(Some(Arc::clone(self)), syntax_tree)
    }

    pub fn previous(&self) -> Option<&Arc<Compilation>> {
        self.previous.as_ref()
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    /// The bound global scope, computed on first access.
    ///
    /// Binding runs outside the lock; when two threads race, both compute
    /// the same scope and the first one to publish wins.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        if let Some(scope) = self.global_scope.get() {
            return scope;
        }

        let previous = self
            .previous
            .as_ref()
            .map(|compilation| Arc::clone(compilation.global_scope()));
        let scope = Arc::new(Binder::bind_global_scope(previous, self.syntax_tree.root()));
        tracing::debug!(
            diagnostics = scope.diagnostics.len(),
            variables = scope.variables.len(),
            "bound global scope"
        );
        self.global_scope.get_or_init(|| scope)
    }

    /// Every diagnostic that gates evaluation, in report order: each
    /// submission's syntax diagnostics then its binding diagnostics, oldest
    /// submission first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut chain: Vec<&Compilation> =
            std::iter::successors(Some(self), |compilation| compilation.previous.as_deref())
                .collect();
        chain.reverse();

        let mut diagnostics = Vec::new();
        let mut inherited = 0;
        for compilation in chain {
            // A bound scope repeats its predecessors' binding diagnostics first.
            let binding = &compilation.global_scope().diagnostics;
            diagnostics.extend_from_slice(compilation.syntax_tree.diagnostics());
            diagnostics.extend_from_slice(&binding[inherited..]);
            inherited = binding.len();
        }
        diagnostics
    }

    pub fn evaluate(&self, variables: &mut Variables) -> Result<EvaluationResult, EvaluationError> {
        self.evaluate_with_options(variables, EvaluatorOptions::default())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_with_options(
        &self,
        variables: &mut Variables,
        options: EvaluatorOptions,
    ) -> Result<EvaluationResult, EvaluationError> {
        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "skipping evaluation");
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let program = Lowerer::lower(&self.global_scope().statement);
        let value = Evaluator::with_options(variables, options).evaluate(&program)?;
        Ok(EvaluationResult {
            diagnostics,
            value,
        })
    }

    /// Write the lowered program for this submission.
    pub fn emit_tree(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let program = Lowerer::lower(&self.global_scope().statement);
        vnscript_printer::write_bound_program(out, &program)
    }
}
