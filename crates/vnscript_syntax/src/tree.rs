//! Parsed source text together with its syntax diagnostics.

use crate::lexer::Lexer;
use crate::node::CompilationUnitSyntax;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;
use crate::token::SyntaxToken;
use vnscript_diagnostics::Diagnostic;

/// The result of parsing one submission.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: String,
    diagnostics: Vec<Diagnostic>,
    root: CompilationUnitSyntax,
}

impl SyntaxTree {
    #[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn parse(text: &str) -> Self {
        let mut parser = Parser::new(text);
        let root = parser.parse_compilation_unit();
        let diagnostics = parser.take_diagnostics().into_diagnostics();
        tracing::debug!(diagnostics = diagnostics.len(), "parsed syntax tree");
        Self {
            text: text.to_string(),
            diagnostics,
            root,
        }
    }

    /// Lex `text` into its significant tokens, excluding end of file.
    pub fn parse_tokens(text: &str) -> (Vec<SyntaxToken>, Vec<Diagnostic>) {
        let mut lexer = Lexer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.lex();
            match token.kind {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::WhitespaceToken => {}
                _ => tokens.push(token),
            }
        }
        (tokens, lexer.take_diagnostics().into_diagnostics())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lexical and syntax diagnostics in source order of discovery.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn root(&self) -> &CompilationUnitSyntax {
        &self.root
    }
}
