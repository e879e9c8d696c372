//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use ts2go_core::lang::target;

use crate::backend::EmitOptions;
use crate::frontend::lexer;
use crate::frontend::module::{FsSources, SourceProvider, parse_source};
use crate::pipeline::{self, CompileFailure};

use super::report::{render_compile_errors, render_failure};
use super::{CliError, CliResult, ExitCode};

/// Output directory used by `build` when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "ts2go_output";

fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

fn failure(err: &CompileFailure) -> CliError {
    CliError::failure(render_failure(err, use_color()))
}

/// Read source file contents through the same reader the module loader uses.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or exceeds
/// [`MAX_SOURCE_SIZE`](crate::frontend::module::MAX_SOURCE_SIZE).
pub fn read_source(file_path: &Path) -> CliResult<String> {
    FsSources
        .read(file_path)
        .map_err(|e| CliError::failure(format!("Cannot read file '{}': {}", file_path.display(), e)))
}

/// Lex and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source).map_err(|errs| {
        CliError::failure(render_compile_errors(
            &file_path.display().to_string(),
            &source,
            &errs,
            use_color(),
        ))
    })?;

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    match parse_source(&source) {
        Ok(ast) => {
            println!("{:#?}", ast);
            Ok(ExitCode::SUCCESS)
        }
        Err(errs) => Err(CliError::failure(render_compile_errors(
            &file_path.display().to_string(),
            &source,
            &errs,
            use_color(),
        ))),
    }
}

/// Type check a file and everything it imports.
pub fn check_file(file_path: &Path) -> CliResult<ExitCode> {
    let checked = pipeline::check_with(FsSources, file_path).map_err(|e| failure(&e))?;
    println!("✓ Type check passed! ({} module(s))", checked.graph.len());
    Ok(ExitCode::SUCCESS)
}

/// Print the generated Go translation unit to stdout.
pub fn emit_file(file_path: &Path, options: &EmitOptions) -> CliResult<ExitCode> {
    let go = pipeline::compile(file_path, options).map_err(|e| failure(&e))?;
    print!("{}", go);
    Ok(ExitCode::SUCCESS)
}

/// Compile a file and write `main.go` into `output_dir`, creating it when needed.
pub fn build_file(file_path: &Path, output_dir: Option<&Path>, options: &EmitOptions) -> CliResult<ExitCode> {
    let out_dir = output_dir.map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), Path::to_path_buf);

    let go = pipeline::compile(file_path, options).map_err(|e| failure(&e))?;

    fs::create_dir_all(&out_dir).map_err(|e| {
        CliError::failure(format!("Cannot create output directory '{}': {}", out_dir.display(), e))
    })?;
    let out_file = out_dir.join(target::OUTPUT_FILE_NAME);
    fs::write(&out_file, go)
        .map_err(|e| CliError::failure(format!("Cannot write '{}': {}", out_file.display(), e)))?;

    tracing::info!(path = %out_file.display(), "wrote translation unit");
    println!("✓ Generated {}", out_file.display());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("definitely/not/here.ts")).unwrap_err();
        assert!(err.message.starts_with("Cannot read file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_build_writes_main_go() {
        let dir = std::env::temp_dir().join(format!("ts2go_cli_build_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let entry = dir.join("main.ts");
        fs::write(&entry, "function main(): void {\n  let n = 2;\n}\n").unwrap();

        let out_dir = dir.join("out");
        let options = EmitOptions::default().with_prune_unused_imports(true);
        build_file(&entry, Some(&out_dir), &options).unwrap();

        let written = fs::read_to_string(out_dir.join("main.go")).unwrap();
        assert_eq!(written, "package main\n\nfunc main() {\n\tn := int(2)\n}\n");

        let parent_relative = dir.join("nested").join("..").join("up");
        build_file(&entry, Some(&parent_relative), &options).unwrap();
        assert!(dir.join("up").join("main.go").is_file());
        fs::remove_dir_all(&dir).unwrap();
    }
}
