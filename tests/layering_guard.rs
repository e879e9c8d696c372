//! Layering guardrails between the frontend, the backend and the shared crates.
//!
//! - The frontend (`src/frontend/**`) never reaches into the backend: the backend consumes checked
//!   ASTs, not the other way around.
//! - The shared crates (`ts2go_core`, `ts2go_syntax`) never depend on the root `ts2go` crate.

use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

#[test]
fn frontend_does_not_import_backend() {
    let root = repo_root();
    let mut files = Vec::new();
    rust_files(&root.join("src/frontend"), &mut files);
    assert!(!files.is_empty(), "no frontend sources found");

    let mut offenders = Vec::new();
    for path in files {
        let Ok(contents) = fs::read_to_string(&path) else { continue };
        for (idx, line) in contents.lines().enumerate() {
            let code = line.trim_start();
            if code.starts_with("//") {
                continue;
            }
            if code.contains("crate::backend") || code.contains("ts2go::backend") {
                offenders.push(format!(
                    "{}:{}: {}",
                    path.strip_prefix(&root).unwrap_or(&path).display(),
                    idx + 1,
                    code
                ));
            }
        }
    }

    assert!(offenders.is_empty(), "frontend imports backend:\n{}", offenders.join("\n"));
}

#[test]
fn shared_crates_do_not_depend_on_root_crate() {
    for manifest in [
        include_str!("../crates/ts2go_core/Cargo.toml"),
        include_str!("../crates/ts2go_syntax/Cargo.toml"),
    ] {
        let mut in_dependencies = false;
        for raw_line in manifest.lines() {
            let line = raw_line.trim();
            if line.starts_with('[') {
                in_dependencies = line.ends_with("dependencies]");
                continue;
            }
            if !in_dependencies || line.is_empty() || line.starts_with('#') {
                continue;
            }
            let name = line.split(['=', ' ']).next().unwrap_or("");
            assert_ne!(name, "ts2go", "shared crates must not depend on the root crate");
        }
    }
}
