//! vnscript_binder: Name resolution and type checking.
//!
//! The binder walks a syntax tree and produces the bound tree: every name is
//! resolved to a [`VariableSymbol`], every operator to a static descriptor, and
//! every expression carries its static [`Type`]. Errors become diagnostics and
//! binding continues with recovery values, so one pass reports as much as it can.

mod binder;
mod bound_tree;
mod global_scope;
mod operators;
mod rewriter;
mod scope;
mod symbol;
mod types;

pub use binder::Binder;
pub use bound_tree::*;
pub use global_scope::BoundGlobalScope;
pub use operators::*;
pub use rewriter::BoundTreeRewriter;
pub use symbol::{LabelSymbol, VariableSymbol};
pub use types::{Type, Value};
