//! Target-language (Go) spellings written by the emitter.
//!
//! Everything the backend writes that is not copied from the source program comes from here:
//! canonical type names, builtin calls, format verbs, and the preamble defaults.
//!
//! ## Notes
//! - Two integer spellings coexist on purpose. [`DEFAULT_INT`] is what a numeric literal or plain
//!   `number` resolves to when the checker hands over a type object; [`INT32`] is what the textual
//!   normalization table produces for free-form type text spelled `number`.

/// Target string type.
pub const STRING: &str = "string";

/// Default signed integer for `number` and numeric literal types.
pub const DEFAULT_INT: &str = "int";

/// Sized 32-bit integer produced by textual normalization.
pub const INT32: &str = "i32";

/// Default floating type produced by textual normalization of fractional literals.
pub const FLOAT: &str = "f64";

/// Canonical boolean type.
pub const BOOL: &str = "bool";

/// Return type spelling that is omitted from function signatures.
pub const VOID: &str = "void";

/// Prefix for slice (array) types: `[]T`.
pub const ARRAY_PREFIX: &str = "[]";

/// Builtin length function.
pub const LEN: &str = "len";

/// Formatting call used for string coercion and template literals.
pub const SPRINTF: &str = "fmt.Sprintf";

/// Module that provides [`SPRINTF`].
pub const FMT_MODULE: &str = "fmt";

/// Uniform format verb used for every interpolated value.
pub const FORMAT_VERB: &str = "%v";

/// Keyword introducing a function.
pub const FUNC: &str = "func";

/// Keyword introducing an explicitly typed variable.
pub const VAR: &str = "var";

/// Short variable declaration operator.
pub const SHORT_DECL: &str = ":=";

/// Default package name of the generated translation unit.
pub const DEFAULT_PACKAGE: &str = "main";

/// Runtime imports written in the preamble by default.
pub const DEFAULT_RUNTIME_IMPORTS: &[&str] = &[FMT_MODULE, "ts2go/console"];

/// Default output file name for `build`.
pub const OUTPUT_FILE_NAME: &str = "main.go";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_imports_include_fmt() {
        assert!(DEFAULT_RUNTIME_IMPORTS.contains(&FMT_MODULE));
        assert!(SPRINTF.starts_with(FMT_MODULE));
    }

    #[test]
    fn test_default_and_sized_ints_differ() {
        assert_ne!(DEFAULT_INT, INT32);
    }
}
