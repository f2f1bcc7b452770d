//! The bound result of one submission, chained to earlier submissions.

use crate::bound_tree::BoundStatement;
use crate::symbol::VariableSymbol;
use indexmap::IndexMap;
use std::sync::Arc;
use vnscript_diagnostics::Diagnostic;

/// One frame of a session: the variables declared at the top level of a
/// submission, its bound statement, and a link to the previous frame.
///
/// Frames are immutable once built, so later submissions share earlier ones
/// by reference instead of replaying their declarations.
#[derive(Debug)]
pub struct BoundGlobalScope {
    pub previous: Option<Arc<BoundGlobalScope>>,
    /// Diagnostics of every earlier frame followed by this frame's own.
    pub diagnostics: Vec<Diagnostic>,
    pub variables: IndexMap<String, VariableSymbol>,
    pub statement: Arc<BoundStatement>,
}

impl BoundGlobalScope {
    /// Look up a top-level variable, newest frame first.
    pub fn lookup_variable(&self, name: &str) -> Option<&VariableSymbol> {
        self.frames().find_map(|frame| frame.variables.get(name))
    }

    /// This frame and all earlier ones, newest first.
    pub fn frames(&self) -> impl Iterator<Item = &BoundGlobalScope> {
        std::iter::successors(Some(self), |frame| frame.previous.as_deref())
    }
}
