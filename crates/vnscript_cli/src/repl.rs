//! Interactive sessions.
//!
//! Each submission is compiled as a continuation of the last successful one,
//! so top-level variables stay visible. Submissions with diagnostics or
//! runtime errors are reported and then forgotten, along with any stores
//! they made before failing.

use crate::error::CliError;
use crate::render;
use std::io::{BufRead, Write};
use std::sync::Arc;
use vnscript_compiler::Compilation;
use vnscript_evaluator::{EvaluatorOptions, Variables};
use vnscript_printer::write_syntax_tree;
use vnscript_syntax::{SyntaxNodeRef, SyntaxTree};

const PROMPT: &str = "> ";
const CONTINUATION_PROMPT: &str = "| ";

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    previous: Option<Arc<Compilation>>,
    variables: Variables,
    options: EvaluatorOptions,
    pub show_tree: bool,
    pub show_program: bool,
}

impl Repl {
    pub fn new(options: EvaluatorOptions) -> Self {
        Self {
            previous: None,
            variables: Variables::default(),
            options,
            show_tree: false,
            show_program: false,
        }
    }

    /// Read submissions from `input` until `#quit` or end of input.
    pub fn run(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), CliError> {
        let mut text = String::new();
        let mut line = String::new();

        loop {
            write!(out, "{}", if text.is_empty() { PROMPT } else { CONTINUATION_PROMPT })?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim_end_matches(['\r', '\n']);

            if text.is_empty() {
                if line.trim().is_empty() {
                    continue;
                }
                if line.starts_with('#') {
                    if self.execute_command(line.trim(), out)? == Flow::Quit {
                        return Ok(());
                    }
                    continue;
                }
            }

            text.push_str(line);
            text.push('\n');

            if is_complete(&text) {
                self.evaluate_submission(&text, out)?;
                text.clear();
            }
        }
    }

    fn execute_command(&mut self, command: &str, out: &mut dyn Write) -> Result<Flow, CliError> {
        match command {
            "#showTree" => {
                self.show_tree = !self.show_tree;
                let state = if self.show_tree { "Showing" } else { "Not showing" };
                writeln!(out, "{} parse trees.", state)?;
            }
            "#showProgram" => {
                self.show_program = !self.show_program;
                let state = if self.show_program { "Showing" } else { "Not showing" };
                writeln!(out, "{} bound trees.", state)?;
            }
            "#reset" => {
                self.previous = None;
                self.variables.clear();
                tracing::debug!("session reset");
            }
            "#quit" => return Ok(Flow::Quit),
            _ => writeln!(out, "Invalid command {}.", command)?,
        }
        Ok(Flow::Continue)
    }

    fn evaluate_submission(&mut self, text: &str, out: &mut dyn Write) -> Result<(), CliError> {
        let tree = SyntaxTree::parse(text);
        let compilation = match &self.previous {
            Some(previous) => previous.continue_with(tree),
            None => Compilation::new(tree),
        };

        if self.show_tree {
            write_syntax_tree(
                out,
                SyntaxNodeRef::CompilationUnit(compilation.syntax_tree().root()),
            )?;
        }
        if self.show_program && compilation.diagnostics().is_empty() {
            compilation.emit_tree(out)?;
        }

        let snapshot = self.variables.clone();
        match compilation.evaluate_with_options(&mut self.variables, self.options) {
            Ok(result) if result.diagnostics.is_empty() => {
                if let Some(value) = result.value {
                    writeln!(out, "{}", value)?;
                }
                self.previous = Some(compilation);
            }
            Ok(result) => {
                // Earlier submissions are always clean, so only the current
                // text can be blamed.
                for diagnostic in &result.diagnostics {
                    writeln!(out, "{:?}", render::to_report("<repl>", text, diagnostic))?;
                }
            }
            Err(error) => {
                self.variables = snapshot;
                writeln!(out, "{:?}", miette::Report::new(CliError::from(error)))?;
            }
        }
        Ok(())
    }
}

/// Whether `text` should be submitted: the statement ends in a real token,
/// or the user entered two blank lines to force it through.
fn is_complete(text: &str) -> bool {
    if text.ends_with("\n\n\n") {
        return true;
    }
    let tree = SyntaxTree::parse(text);
    !tree.root().statement.last_token().is_missing
}
