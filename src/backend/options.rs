//! Emission configuration.

use ts2go_core::lang::target;

use super::text::DEFAULT_INDENT_UNIT;

/// Options for one emission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Name written in the `package` clause.
    pub package_name: String,
    /// Import paths written in the preamble, in order.
    pub runtime_imports: Vec<String>,
    /// Text written once per indentation level.
    pub indent_unit: String,
    /// Drop preamble imports the emitted code never references.
    pub prune_unused_imports: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            package_name: target::DEFAULT_PACKAGE.to_string(),
            runtime_imports: target::DEFAULT_RUNTIME_IMPORTS.iter().map(|s| s.to_string()).collect(),
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            prune_unused_imports: false,
        }
    }
}

impl EmitOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn with_runtime_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtime_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Indent with `width` spaces instead of tabs.
    pub fn with_indent_width(self, width: usize) -> Self {
        self.with_indent_unit(" ".repeat(width))
    }

    pub fn with_prune_unused_imports(mut self, prune: bool) -> Self {
        self.prune_unused_imports = prune;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EmitOptions::default();
        assert_eq!(options.package_name, "main");
        assert_eq!(options.runtime_imports, vec!["fmt".to_string(), "ts2go/console".to_string()]);
        assert_eq!(options.indent_unit, "\t");
        assert!(!options.prune_unused_imports);
    }

    #[test]
    fn test_builder_chain() {
        let options = EmitOptions::new()
            .with_package_name("app")
            .with_runtime_imports(["fmt"])
            .with_indent_width(4)
            .with_prune_unused_imports(true);
        assert_eq!(options.package_name, "app");
        assert_eq!(options.runtime_imports, vec!["fmt".to_string()]);
        assert_eq!(options.indent_unit, "    ");
        assert!(options.prune_unused_imports);
    }

    #[test]
    fn test_builder_override() {
        let options = EmitOptions::new().with_indent_width(2).with_indent_unit("\t");
        assert_eq!(options.indent_unit, "\t"); // Last value wins
    }
}
