//! vnscript_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every user-facing problem found by the lexer, parser or binder is a
//! [`Diagnostic`]: a source span, a stable numeric code and a resolved message.
//! Diagnostics are kept in insertion order; callers report them positionally.

use std::fmt;
use vnscript_core::text::TextSpan;

/// A diagnostic message template with a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 2001).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source text span where this diagnostic occurred.
    pub span: TextSpan,
    /// The resolved message text.
    pub message: String,
    /// The diagnostic code.
    pub code: u32,
}

impl Diagnostic {
    /// Create a diagnostic at `span` by filling in the message template.
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span,
            message: format_message(message.message, args),
            code: message.code,
        }
    }

    /// The code rendered the way hosts display it, e.g. `VN2001`.
    pub fn code_name(&self) -> String {
        format!("VN{:04}", self.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered collection of diagnostics accumulated during one pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Build a diagnostic from a template and append it.
    pub fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(span, message, args));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Lexical errors (1000-1099)
    // ========================================================================
    pub const BAD_CHARACTER_0: DiagnosticMessage = diag!(1001, "Bad character in input: '{0}'.");
    pub const THE_NUMBER_0_ISNT_A_VALID_1: DiagnosticMessage = diag!(1002, "The number {0} isn't a valid {1}.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1003, "Unterminated string literal.");
    pub const UNRECOGNIZED_ESCAPE_SEQUENCE_0: DiagnosticMessage = diag!(1004, "Unrecognized escape sequence '{0}'.");

    // ========================================================================
    // Syntax errors (1100-1199)
    // ========================================================================
    pub const UNEXPECTED_TOKEN_0_EXPECTED_1: DiagnosticMessage = diag!(1101, "Unexpected token: <{0}>, expected <{1}>.");

    // ========================================================================
    // Binding errors (2000-2099)
    // ========================================================================
    pub const VARIABLE_0_DOESNT_EXIST: DiagnosticMessage = diag!(2001, "Variable '{0}' doesn't exist in the current context.");
    pub const VARIABLE_0_IS_ALREADY_DECLARED: DiagnosticMessage = diag!(2002, "Variable '{0}' is already declared.");
    pub const VARIABLE_0_IS_READ_ONLY: DiagnosticMessage = diag!(2003, "Variable '{0}' is read-only and cannot be assigned to.");
    pub const CANNOT_CONVERT_TYPE_0_TO_1: DiagnosticMessage = diag!(2004, "Cannot convert type '{0}' to '{1}'.");
    pub const UNARY_OPERATOR_0_NOT_DEFINED_FOR_TYPE_1: DiagnosticMessage = diag!(2005, "Unary operator '{0}' is not defined for type '{1}'.");
    pub const BINARY_OPERATOR_0_NOT_DEFINED_FOR_TYPES_1_AND_2: DiagnosticMessage = diag!(2006, "Binary operator '{0}' is not defined for types '{1}' and '{2}'.");
    pub const STRING_LITERALS_ARE_NOT_SUPPORTED: DiagnosticMessage = diag!(2007, "String literals are not supported.");
}
