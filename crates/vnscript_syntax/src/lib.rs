//! vnscript_syntax: Tokens, syntax nodes and the reference parser.
//!
//! The binder consumes syntax only through the node types defined here: a
//! [`CompilationUnitSyntax`] holding one top-level statement, with every node
//! carrying a source span. The lexer and recursive descent parser produce that
//! tree from source text together with lexical and syntax diagnostics.

mod facts;
mod lexer;
mod node;
mod parser;
mod syntax_kind;
mod token;
mod tree;

pub use facts::{
    binary_operator_precedence, fixed_text, keyword_kind, unary_operator_precedence,
};
pub use lexer::Lexer;
pub use node::*;
pub use parser::Parser;
pub use syntax_kind::SyntaxKind;
pub use token::{LiteralValue, SyntaxToken};
pub use tree::SyntaxTree;
