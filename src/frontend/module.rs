//! Module graph loading for multi-file programs.
//!
//! Starting from an entry file, [`ModuleGraphLoader`] follows static `import` declarations, reads and
//! parses every reachable file exactly once, and produces a [`ModuleGraph`] that later stages (type
//! checking and emission) share.
//!
//! ## Notes
//!
//! - Traversal is a pre-order depth-first walk; units are numbered in discovery order.
//! - A path already in the graph short-circuits, so diamond imports parse the shared file once and import
//!   cycles terminate at the already-visited node.
//! - Only static top-level `import` declarations are followed. Anything else is invisible to the loader.
//! - File access goes through [`SourceProvider`] so tests can load graphs from memory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use super::ast::Program;
use super::diagnostics::CompileError;
use super::{lexer, parser};

/// Extension appended to module specifiers that do not carry one.
pub const SOURCE_EXTENSION: &str = "ts";

/// Largest source file [`FsSources`] reads (100 MB).
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

// ============================================================================
// Graph data
// ============================================================================

/// Index of a [`SourceUnit`] within its [`ModuleGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

impl FileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One parsed input file.
#[derive(Debug)]
pub struct SourceUnit {
    pub id: FileId,
    /// Resolved path; unique within a graph.
    pub path: PathBuf,
    pub source: String,
    pub program: Program,
    /// Resolved paths of this unit's static imports, in declaration order.
    pub imports: Vec<PathBuf>,
}

impl SourceUnit {
    /// Display name used in diagnostics.
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Every [`SourceUnit`] reachable from an entry file.
#[derive(Debug)]
pub struct ModuleGraph {
    units: Vec<SourceUnit>,
    by_path: HashMap<PathBuf, FileId>,
    entry: FileId,
}

impl ModuleGraph {
    pub fn entry(&self) -> &SourceUnit {
        self.unit(self.entry)
    }

    pub fn entry_id(&self) -> FileId {
        self.entry
    }

    /// Return the unit for an id minted by this graph.
    ///
    /// ## Panics
    /// - If `id` belongs to a different graph.
    pub fn unit(&self, id: FileId) -> &SourceUnit {
        &self.units[id.0]
    }

    pub fn get(&self, id: FileId) -> Option<&SourceUnit> {
        self.units.get(id.0)
    }

    /// Look up a unit by its resolved path.
    pub fn lookup(&self, path: &Path) -> Option<&SourceUnit> {
        self.by_path.get(path).map(|id| self.unit(*id))
    }

    /// Resolve `specifier` as written in unit `from` to the loaded unit it names.
    pub fn resolve_import(&self, from: FileId, specifier: &str) -> Option<&SourceUnit> {
        let from = self.get(from)?;
        self.lookup(&resolve_module_path(&from.path, specifier))
    }

    /// Units in discovery order (entry first).
    pub fn units(&self) -> impl Iterator<Item = &SourceUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
impl ModuleGraph {
    /// Drop the path index entry for `path`; the unit itself stays in place.
    pub(crate) fn forget_path(&mut self, path: &Path) {
        self.by_path.remove(path);
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure to build a [`ModuleGraph`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' has {} syntax error(s)", .path.display(), .errors.len())]
    Syntax {
        path: PathBuf,
        /// File text, kept so the errors can be rendered with context.
        text: String,
        errors: Vec<CompileError>,
    },
}

// ============================================================================
// Source providers
// ============================================================================

/// Where the loader reads file text from.
pub trait SourceProvider {
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Map a path to the key that identifies it in the graph.
    fn canonicalize(&self, path: &Path) -> PathBuf {
        normalize_path(path)
    }
}

/// Reads from the file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSources;

impl SourceProvider for FsSources {
    fn read(&self, path: &Path) -> io::Result<String> {
        read_capped(path, MAX_SOURCE_SIZE)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| {
            let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            normalize_path(&absolute)
        })
    }
}

/// Read `path` as text, refusing files larger than `max_bytes`.
fn read_capped(path: &Path, max_bytes: u64) -> io::Result<String> {
    let len = fs::metadata(path)?.len();
    if len > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file is too large ({} bytes, max {} bytes)", len, max_bytes),
        ));
    }
    fs::read_to_string(path)
}

/// Serves files from an in-memory map; used by tests and embedders.
#[derive(Debug, Default, Clone)]
pub struct MemorySources {
    files: HashMap<PathBuf, String>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), source.into());
    }
}

impl SourceProvider for MemorySources {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file in memory sources"))
    }
}

// ============================================================================
// Path resolution
// ============================================================================

/// Resolve a module specifier against the directory of the importing file.
///
/// The result is lexically normalized and gets a `.ts` extension when the specifier has none.
pub fn resolve_module_path(importer: &Path, specifier: &str) -> PathBuf {
    let base = importer.parent().unwrap_or_else(|| Path::new(""));
    let mut path = normalize_path(&base.join(specifier));
    if path.extension().is_none() {
        path.set_extension(SOURCE_EXTENSION);
    }
    path
}

/// Remove `.` components and fold `..` into its parent without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Lex and parse one file's text.
pub fn parse_source(source: &str) -> Result<Program, Vec<CompileError>> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens)
}

// ============================================================================
// Loader
// ============================================================================

/// Builds a [`ModuleGraph`] by following imports from an entry file.
pub struct ModuleGraphLoader<P: SourceProvider> {
    provider: P,
    units: Vec<SourceUnit>,
    by_path: HashMap<PathBuf, FileId>,
}

impl<P: SourceProvider> ModuleGraphLoader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            units: Vec::new(),
            by_path: HashMap::new(),
        }
    }

    /// Load `entry` and everything it transitively imports.
    #[tracing::instrument(skip_all, fields(entry = %entry.display()))]
    pub fn load(mut self, entry: &Path) -> Result<ModuleGraph, LoadError> {
        let entry = self.provider.canonicalize(entry);
        let entry_id = self.visit(&entry)?;
        tracing::debug!(modules = self.units.len(), "module graph loaded");
        Ok(ModuleGraph {
            units: self.units,
            by_path: self.by_path,
            entry: entry_id,
        })
    }

    fn visit(&mut self, path: &Path) -> Result<FileId, LoadError> {
        if let Some(&id) = self.by_path.get(path) {
            tracing::debug!(path = %path.display(), "module already loaded, skipping");
            return Ok(id);
        }

        let source = self.provider.read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let program = parse_source(&source).map_err(|errors| LoadError::Syntax {
            path: path.to_path_buf(),
            text: source.clone(),
            errors,
        })?;

        let lexical: Vec<PathBuf> = program
            .imports()
            .map(|import| resolve_module_path(path, &import.specifier.node))
            .collect();
        let imports: Vec<PathBuf> = lexical.iter().map(|p| self.provider.canonicalize(p)).collect();

        // Register before recursing so cycles stop here.
        let id = FileId(self.units.len());
        self.by_path.insert(path.to_path_buf(), id);
        self.units.push(SourceUnit {
            id,
            path: path.to_path_buf(),
            source,
            program,
            imports: imports.clone(),
        });
        tracing::debug!(path = %path.display(), id = id.0, "module loaded");

        for (lexical, canonical) in lexical.into_iter().zip(imports) {
            let target = self.visit(&canonical)?;
            // Keep the spelling importers use resolvable even when the provider rewrites it.
            self.by_path.entry(lexical).or_insert(target);
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(sources: MemorySources, entry: &str) -> Result<ModuleGraph, LoadError> {
        ModuleGraphLoader::new(sources).load(Path::new(entry))
    }

    fn names(graph: &ModuleGraph) -> Vec<String> {
        graph.units().map(|u| u.path.display().to_string()).collect()
    }

    #[test]
    fn test_single_file_graph() {
        let sources = MemorySources::new().with_file("/app/main.ts", "function main(): void {}");
        let graph = load(sources, "/app/main.ts").unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.entry().path, PathBuf::from("/app/main.ts"));
        assert_eq!(graph.entry_id().index(), 0);
        assert!(graph.entry().imports.is_empty());
    }

    #[test]
    fn test_diamond_imports_load_shared_file_once_in_preorder() {
        let sources = MemorySources::new()
            .with_file("/app/main.ts", "import \"./a\"\nimport \"./b\"")
            .with_file("/app/a.ts", "import \"./lib/shared\"")
            .with_file("/app/b.ts", "import \"./lib/shared.ts\"")
            .with_file("/app/lib/shared.ts", "function shared(): void {}");
        let graph = load(sources, "/app/main.ts").unwrap();
        assert_eq!(
            names(&graph),
            vec!["/app/main.ts", "/app/a.ts", "/app/lib/shared.ts", "/app/b.ts"]
        );
    }

    #[test]
    fn test_import_cycle_terminates() {
        let sources = MemorySources::new()
            .with_file("/app/a.ts", "import \"./b\"")
            .with_file("/app/b.ts", "import \"./a\"");
        let graph = load(sources, "/app/a.ts").unwrap();
        assert_eq!(names(&graph), vec!["/app/a.ts", "/app/b.ts"]);
        assert_eq!(graph.unit(FileId(1)).imports, vec![PathBuf::from("/app/a.ts")]);
    }

    #[test]
    fn test_resolve_import_from_unit() {
        let sources = MemorySources::new()
            .with_file("/app/src/main.ts", "import { greet } from \"../shared/greet\"")
            .with_file("/app/shared/greet.ts", "export function greet(): void {}");
        let graph = load(sources, "/app/src/main.ts").unwrap();
        let target = graph.resolve_import(graph.entry_id(), "../shared/greet").unwrap();
        assert_eq!(target.path, PathBuf::from("/app/shared/greet.ts"));
        assert!(graph.resolve_import(graph.entry_id(), "./missing").is_none());
    }

    #[test]
    fn test_relative_entry_path() {
        let sources = MemorySources::new()
            .with_file("main.ts", "import \"./util\"")
            .with_file("util.ts", "");
        let graph = load(sources, "./main.ts").unwrap();
        assert_eq!(names(&graph), vec!["main.ts", "util.ts"]);
    }

    #[test]
    fn test_missing_import_is_read_error() {
        let sources = MemorySources::new().with_file("/app/main.ts", "import \"./nope\"");
        let err = load(sources, "/app/main.ts").unwrap_err();
        match err {
            LoadError::Read { path, .. } => assert_eq!(path, PathBuf::from("/app/nope.ts")),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_keeps_text_and_errors() {
        let sources = MemorySources::new().with_file("/app/main.ts", "function (");
        let err = load(sources, "/app/main.ts").unwrap_err();
        let LoadError::Syntax { path, text, errors } = err else {
            panic!("expected syntax error");
        };
        assert_eq!(path, PathBuf::from("/app/main.ts"));
        assert_eq!(text, "function (");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_resolve_module_path() {
        let importer = Path::new("/app/src/main.ts");
        assert_eq!(resolve_module_path(importer, "./a"), PathBuf::from("/app/src/a.ts"));
        assert_eq!(resolve_module_path(importer, "../b.ts"), PathBuf::from("/app/b.ts"));
        assert_eq!(resolve_module_path(importer, "/abs/c"), PathBuf::from("/abs/c.ts"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_file_reads_are_size_capped() {
        let path = std::env::temp_dir().join(format!("ts2go_read_capped_{}.ts", std::process::id()));
        fs::write(&path, "function main(): void {}\n").unwrap();

        assert!(read_capped(&path, 1024).is_ok());
        let err = read_capped(&path, 8).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "file is too large (25 bytes, max 8 bytes)");
        fs::remove_file(&path).unwrap();
    }
}
