//! Define the reserved keyword vocabulary of the source language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings and
//! categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - A few words (`from`, `as`, `type`) are contextual in the full source language; the supported
//!   subset reserves them unconditionally.
//!
//! ## Examples
//! ```rust
//! use ts2go_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("return"), Some(KeywordId::Return));
//! assert_eq!(keywords::as_str(KeywordId::Return), "return");
//! assert_eq!(keywords::from_str("Return"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    For,
    While,
    Do,
    Return,

    // Declarations
    Function,
    Interface,
    Type,
    Const,
    Let,
    Var,

    // Modules
    Import,
    Export,
    Default,
    From,
    As,

    // Literals
    True,
    False,
    Null,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Module,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    // Declarations
    info(KeywordId::Function, "function", KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration),
    info(KeywordId::Type, "type", KeywordCategory::Declaration),
    info(KeywordId::Const, "const", KeywordCategory::Declaration),
    info(KeywordId::Let, "let", KeywordCategory::Declaration),
    info(KeywordId::Var, "var", KeywordCategory::Declaration),
    // Modules
    info(KeywordId::Import, "import", KeywordCategory::Module),
    info(KeywordId::Export, "export", KeywordCategory::Module),
    info(KeywordId::Default, "default", KeywordCategory::Module),
    info(KeywordId::From, "from", KeywordCategory::Module),
    info(KeywordId::As, "as", KeywordCategory::Module),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
];

/// Resolve a spelling to a keyword id.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == spelling).map(|k| k.id)
}

/// Return the metadata for a keyword id.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (a registry bug, covered by the guardrail tests).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("INVARIANT: every KeywordId has a registry entry")
}

/// Return the canonical spelling of a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("const"), Some(KeywordId::Const));
        assert_eq!(from_str("Const"), None);
    }

    #[test]
    fn test_literal_keywords_are_categorized() {
        assert_eq!(info_for(KeywordId::True).category, KeywordCategory::Literal);
        assert_eq!(info_for(KeywordId::Null).category, KeywordCategory::Literal);
    }

    #[test]
    fn test_identifiers_are_not_keywords() {
        assert_eq!(from_str("console"), None);
        assert_eq!(from_str("number"), None);
    }
}
