//! Render compilation failures for the terminal.
//!
//! Every positioned error becomes a `miette` report with its source line attached. Errors without
//! a position (unreadable files) render as a single line.

use miette::{GraphicalReportHandler, GraphicalTheme};

use crate::backend::EmitError;
use crate::frontend::diagnostics::{CompileError, SourceDiagnostic};
use crate::frontend::module::{LoadError, ModuleGraph};
use crate::pipeline::{CheckFailure, CompileFailure, EmitFailure};

/// Render `failure` as one block of text, one report per error.
pub fn render_failure(failure: &CompileFailure, color: bool) -> String {
    let reports = match failure {
        CompileFailure::Load(err) => render_load_error(err, color),
        CompileFailure::Check(failure) => render_check_failure(failure, color),
        CompileFailure::Emit(failure) => vec![render_emit_failure(failure, color)],
    };
    reports.join("\n").trim_end().to_string()
}

/// Render lex or parse errors for a single file that never made it into a graph.
pub fn render_compile_errors(file_name: &str, source: &str, errors: &[CompileError], color: bool) -> String {
    errors
        .iter()
        .map(|err| render_diagnostic(err.to_diagnostic(file_name, source), color))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn render_load_error(err: &LoadError, color: bool) -> Vec<String> {
    match err {
        LoadError::Read { .. } => vec![format!("error: {}", err)],
        LoadError::Syntax { path, text, errors } => {
            let name = path.display().to_string();
            errors
                .iter()
                .map(|e| render_diagnostic(e.to_diagnostic(&name, text), color))
                .collect()
        }
    }
}

fn render_check_failure(failure: &CheckFailure, color: bool) -> Vec<String> {
    failure
        .errors
        .iter()
        .map(|check| {
            let unit = failure.graph.unit(check.file);
            render_diagnostic(check.error.to_diagnostic(&unit.display_name(), &unit.source), color)
        })
        .collect()
}

fn render_emit_failure(failure: &EmitFailure, color: bool) -> String {
    let EmitFailure { graph, error } = failure;
    match emit_diagnostic(graph, error) {
        Some(diagnostic) => render_diagnostic(diagnostic, color),
        None => format!("error: {}", error),
    }
}

fn emit_diagnostic(graph: &ModuleGraph, error: &EmitError) -> Option<SourceDiagnostic> {
    let location = error.location();
    let unit = graph.lookup(&location.path)?;
    Some(SourceDiagnostic::new(
        format!("emit error: {}", error.message()),
        &unit.display_name(),
        &unit.source,
        location.span,
    ))
}

fn render_diagnostic(diagnostic: SourceDiagnostic, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);
    let mut out = String::new();
    if handler.render_report(&mut out, &diagnostic).is_err() {
        // Rendering into a String only fails on a formatter error; keep the message.
        return diagnostic.message;
    }
    out
}
