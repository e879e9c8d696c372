//! Builtin source-language type vocabulary.
//!
//! This registry names the types the type checker knows without any declaration:
//! - the primitive keywords-as-types (`number`, `string`, ...),
//! - the runtime's numeric aliases (`int`, `int32`, ...), which behave as `number` but keep their
//!   spelling so the emitter can use them as sized target types,
//! - the runtime's opaque generic wrappers (`Pointer<T>`, also spelled `ptr<T>`),
//! - the runtime globals and the target module that backs each of them.
//!
//! ## Examples
//! ```rust
//! use ts2go_core::lang::types::{self, PrimitiveId};
//!
//! assert_eq!(types::primitive_from_str("boolean"), Some(PrimitiveId::Boolean));
//! assert!(types::is_numeric_alias("int32"));
//! assert_eq!(types::pointer_from_str("ptr"), Some(types::POINTER));
//! ```

/// Stable identifier for primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    Number,
    String,
    Boolean,
    Void,
    Any,
}

/// Metadata for a primitive type name.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub id: PrimitiveId,
    pub canonical: &'static str,
}

/// Registry of primitive type names.
pub const PRIMITIVES: &[PrimitiveInfo] = &[
    PrimitiveInfo { id: PrimitiveId::Number, canonical: "number" },
    PrimitiveInfo { id: PrimitiveId::String, canonical: "string" },
    PrimitiveInfo { id: PrimitiveId::Boolean, canonical: "boolean" },
    PrimitiveInfo { id: PrimitiveId::Void, canonical: "void" },
    PrimitiveInfo { id: PrimitiveId::Any, canonical: "any" },
];

/// Resolve a primitive type spelling.
pub fn primitive_from_str(name: &str) -> Option<PrimitiveId> {
    PRIMITIVES.iter().find(|p| p.canonical == name).map(|p| p.id)
}

/// Return the canonical spelling of a primitive type.
pub fn primitive_as_str(id: PrimitiveId) -> &'static str {
    PRIMITIVES
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.canonical)
        .expect("INVARIANT: every PrimitiveId has a registry entry")
}

/// The generic array wrapper spelling (`Array<T>`).
pub const ARRAY: &str = "Array";

/// The runtime pointer wrapper spelling.
pub const POINTER: &str = "Pointer";

/// Short alias accepted for [`POINTER`].
pub const POINTER_SHORT: &str = "ptr";

/// Resolve a pointer wrapper spelling (either form) to the canonical one.
pub fn pointer_from_str(name: &str) -> Option<&'static str> {
    (name == POINTER || name == POINTER_SHORT).then_some(POINTER)
}

/// Numeric aliases declared by the runtime: `number` at check time, sized target types at emit time.
pub const NUMERIC_ALIASES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64", "float32", "float64",
];

/// Return `true` if `name` is a runtime numeric alias.
pub fn is_numeric_alias(name: &str) -> bool {
    NUMERIC_ALIASES.contains(&name)
}

/// A global value provided by the runtime and the target module that implements it.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeGlobal {
    pub name: &'static str,
    /// Type name reported by the checker for the global.
    pub type_name: &'static str,
    /// Methods available on the global (all return `void`).
    pub methods: &'static [&'static str],
    /// Target import path the emitted code needs when the global is referenced.
    pub import_path: &'static str,
}

/// Registry of runtime globals.
pub const RUNTIME_GLOBALS: &[RuntimeGlobal] = &[RuntimeGlobal {
    name: "console",
    type_name: "Console",
    methods: &["info", "log", "warn", "error"],
    import_path: "ts2go/console",
}];

/// Look up a runtime global by name.
pub fn runtime_global(name: &str) -> Option<&'static RuntimeGlobal> {
    RUNTIME_GLOBALS.iter().find(|g| g.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        for p in PRIMITIVES {
            assert_eq!(primitive_from_str(primitive_as_str(p.id)), Some(p.id));
        }
    }

    #[test]
    fn test_aliases_are_not_primitives() {
        for alias in NUMERIC_ALIASES {
            assert_eq!(primitive_from_str(alias), None);
        }
    }

    #[test]
    fn test_console_global() {
        let console = runtime_global("console").unwrap();
        assert!(console.methods.contains(&"info"));
        assert_eq!(console.import_path, "ts2go/console");
        assert!(runtime_global("window").is_none());
    }
}
