//! Diagnostic display through miette.

use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use vnscript_diagnostics::Diagnostic;

/// Build a report for `diagnostic` anchored in `text`.
pub fn to_report(name: &str, text: &str, diagnostic: &Diagnostic) -> Report {
    let span = diagnostic.span.to_range();
    let label = LabeledSpan::at(span, "here");
    let inner = MietteDiagnostic::new(diagnostic.message.clone())
        .with_code(diagnostic.code_name())
        .with_label(label);
    Report::new(inner).with_source_code(NamedSource::new(name, text.to_string()))
}
