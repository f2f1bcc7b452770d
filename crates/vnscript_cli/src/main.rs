//! vns: the vnscript command-line runner.
//!
//! Usage:
//!   vns [options] [FILE]
//!
//! With a file, evaluates it once and prints the result. Without one, starts
//! an interactive session.

mod error;
mod render;
mod repl;

use clap::Parser as ClapParser;
use error::CliError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use vnscript_compiler::Compilation;
use vnscript_evaluator::{EvaluatorOptions, Variables};
use vnscript_printer::write_syntax_tree;
use vnscript_syntax::{SyntaxNodeRef, SyntaxTree};

#[derive(ClapParser, Debug)]
#[command(name = "vns", about = "vnscript - a small scripting language", version)]
struct Cli {
    /// Script to evaluate. Starts an interactive session when omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the syntax tree before evaluating.
    #[arg(long = "show-tree")]
    show_tree: bool,

    /// Print the lowered program before evaluating.
    #[arg(long = "show-program")]
    show_program: bool,

    /// Abort evaluation after this many statements.
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<u64>,

    /// Log pipeline stages at debug level.
    #[arg(short, long)]
    verbose: bool,
}

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// `--verbose` forces `debug`; otherwise logging follows `RUST_LOG` and stays
/// off when it is unset.
fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = if verbose {
            EnvFilter::new("debug")
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = EvaluatorOptions {
        max_steps: cli.max_steps,
    };

    let result = match &cli.file {
        Some(path) => run_file(&cli, path, options),
        None => {
            let mut repl = repl::Repl::new(options);
            repl.show_tree = cli.show_tree;
            repl.show_program = cli.show_program;
            let stdin = io::stdin();
            repl.run(&mut stdin.lock(), &mut io::stdout())
                .map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            ExitCode::from(2)
        }
    }
}

/// Evaluate a script once. Exits with 1 when it has diagnostics.
fn run_file(cli: &Cli, path: &Path, options: EvaluatorOptions) -> Result<ExitCode, CliError> {
    tracing::debug!(path = %path.display(), "running script");

    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = SyntaxTree::parse(&text);
    let compilation = Compilation::new(tree);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.show_tree {
        write_syntax_tree(&mut out, SyntaxNodeRef::CompilationUnit(compilation.syntax_tree().root()))?;
    }
    if cli.show_program && compilation.diagnostics().is_empty() {
        compilation.emit_tree(&mut out)?;
    }

    let mut variables = Variables::default();
    let result = compilation.evaluate_with_options(&mut variables, options)?;

    if !result.diagnostics.is_empty() {
        let name = path.display().to_string();
        for diagnostic in &result.diagnostics {
            eprintln!("{:?}", render::to_report(&name, &text, diagnostic));
        }
        return Ok(ExitCode::from(1));
    }

    if let Some(value) = result.value {
        writeln!(out, "{}", value)?;
    }
    Ok(ExitCode::SUCCESS)
}
