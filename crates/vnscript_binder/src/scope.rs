//! Scope management for the binder.

use crate::symbol::VariableSymbol;
use indexmap::IndexMap;

/// One lexical scope. Declarations keep their insertion order.
#[derive(Debug, Default)]
pub struct Scope {
    declarations: IndexMap<String, VariableSymbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `variable`, failing if its name is already taken in this scope.
    pub fn try_declare(&mut self, variable: VariableSymbol) -> bool {
        if self.declarations.contains_key(variable.name()) {
            return false;
        }
        self.declarations.insert(variable.name().to_string(), variable);
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&VariableSymbol> {
        self.declarations.get(name)
    }

    pub fn into_declarations(self) -> IndexMap<String, VariableSymbol> {
        self.declarations
    }
}

/// The stack of scopes open during binding, innermost last.
///
/// The bottom frame is the submission's global scope. The binder opens every
/// other frame through a closure that pops it on return, so a block's
/// declarations can never be seen after the block.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Scope::new()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(Scope::new());
    }

    pub fn pop(&mut self) {
        debug_assert!(self.frames.len() > 1, "cannot pop the global scope");
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Whether the innermost scope is the global scope.
    pub fn is_global(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn try_declare(&mut self, variable: VariableSymbol) -> bool {
        match self.frames.last_mut() {
            Some(scope) => scope.try_declare(variable),
            None => false,
        }
    }

    /// Look up `name` from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&VariableSymbol> {
        self.frames.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// Consume the stack, returning the global scope's declarations.
    pub fn into_globals(mut self) -> IndexMap<String, VariableSymbol> {
        self.frames.truncate(1);
        self.frames
            .pop()
            .map(Scope::into_declarations)
            .unwrap_or_default()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
