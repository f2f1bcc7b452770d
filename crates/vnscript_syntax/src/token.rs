//! Tokens produced by the lexer.

use crate::syntax_kind::SyntaxKind;
use std::fmt;
use vnscript_core::text::{TextPos, TextSpan};

/// The decoded value of a literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Int(i32),
    Bool(bool),
    String(String),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(value) => write!(f, "{}", value),
            LiteralValue::Bool(value) => write!(f, "{}", value),
            LiteralValue::String(value) => write!(f, "{:?}", value),
        }
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Start position in the source text.
    pub position: TextPos,
    /// The source text of the token. Empty for missing and end-of-file tokens.
    pub text: String,
    /// The literal value for number, string and boolean tokens.
    pub value: Option<LiteralValue>,
    /// Whether the parser synthesized this token because the input lacked it.
    pub is_missing: bool,
}

impl SyntaxToken {
    pub fn new(kind: SyntaxKind, position: TextPos, text: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            text: text.into(),
            value: None,
            is_missing: false,
        }
    }

    pub fn with_value(mut self, value: Option<LiteralValue>) -> Self {
        self.value = value;
        self
    }

    /// A zero-width token standing in for one the input should have contained.
    pub fn missing(kind: SyntaxKind, position: TextPos) -> Self {
        Self {
            kind,
            position,
            text: String::new(),
            value: None,
            is_missing: true,
        }
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.position, self.text.len() as TextPos)
    }
}
