//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the parser and the
//! emitter share: precedence, associativity, fixity, and the token-kind name used in diagnostics
//! (`PlusToken`, `AsteriskEqualsToken`, ...).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact (`"=="` is not `"==="`).
//! - `precedence` is relative: higher binds tighter. Assignment operators share the lowest level.
//!
//! ## Examples
//! ```rust
//! use ts2go_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("+="), Some(OperatorId::PlusEq));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! assert_eq!(operators::token_name(OperatorId::Percent), "PercentToken");
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define whether an operator is infix, prefix, or usable in both positions (`-`, `++`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    InfixOrPrefix,
    Update,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison / equality
    Lt,
    LtEq,
    Gt,
    GtEq,
    EqEq,
    EqEqEq,
    NotEq,
    NotEqEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,

    // Update
    PlusPlus,
    MinusMinus,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    /// Token-kind name used in diagnostics.
    pub token_name: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
}

const fn op(
    id: OperatorId,
    spelling: &'static str,
    token_name: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        token_name,
        precedence,
        associativity,
        fixity,
    }
}

use Associativity::{Left, Right};

/// Registry of all operators.
///
/// ## Notes
/// - Longer spellings must be tried first by the lexer (`===` before `==` before `=`); see [`BY_LENGTH`].
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", "PlusToken", 60, Left, Fixity::InfixOrPrefix),
    op(OperatorId::Minus, "-", "MinusToken", 60, Left, Fixity::InfixOrPrefix),
    op(OperatorId::Star, "*", "AsteriskToken", 70, Left, Fixity::Infix),
    op(OperatorId::Slash, "/", "SlashToken", 70, Left, Fixity::Infix),
    op(OperatorId::Percent, "%", "PercentToken", 70, Left, Fixity::Infix),
    // Comparison / equality
    op(OperatorId::Lt, "<", "LessThanToken", 50, Left, Fixity::Infix),
    op(OperatorId::LtEq, "<=", "LessThanEqualsToken", 50, Left, Fixity::Infix),
    op(OperatorId::Gt, ">", "GreaterThanToken", 50, Left, Fixity::Infix),
    op(OperatorId::GtEq, ">=", "GreaterThanEqualsToken", 50, Left, Fixity::Infix),
    op(OperatorId::EqEq, "==", "EqualsEqualsToken", 40, Left, Fixity::Infix),
    op(OperatorId::EqEqEq, "===", "EqualsEqualsEqualsToken", 40, Left, Fixity::Infix),
    op(OperatorId::NotEq, "!=", "ExclamationEqualsToken", 40, Left, Fixity::Infix),
    op(OperatorId::NotEqEq, "!==", "ExclamationEqualsEqualsToken", 40, Left, Fixity::Infix),
    // Logical
    op(OperatorId::AndAnd, "&&", "AmpersandAmpersandToken", 30, Left, Fixity::Infix),
    op(OperatorId::OrOr, "||", "BarBarToken", 20, Left, Fixity::Infix),
    op(OperatorId::Bang, "!", "ExclamationToken", 80, Right, Fixity::Prefix),
    // Assignment
    op(OperatorId::Eq, "=", "EqualsToken", 10, Right, Fixity::Infix),
    op(OperatorId::PlusEq, "+=", "PlusEqualsToken", 10, Right, Fixity::Infix),
    op(OperatorId::MinusEq, "-=", "MinusEqualsToken", 10, Right, Fixity::Infix),
    op(OperatorId::StarEq, "*=", "AsteriskEqualsToken", 10, Right, Fixity::Infix),
    op(OperatorId::SlashEq, "/=", "SlashEqualsToken", 10, Right, Fixity::Infix),
    op(OperatorId::PercentEq, "%=", "PercentEqualsToken", 10, Right, Fixity::Infix),
    // Update
    op(OperatorId::PlusPlus, "++", "PlusPlusToken", 90, Left, Fixity::Update),
    op(OperatorId::MinusMinus, "--", "MinusMinusToken", 90, Left, Fixity::Update),
];

/// Operator spellings ordered longest-first, for maximal-munch lexing.
pub const BY_LENGTH: &[OperatorId] = &[
    OperatorId::EqEqEq,
    OperatorId::NotEqEq,
    OperatorId::EqEq,
    OperatorId::NotEq,
    OperatorId::LtEq,
    OperatorId::GtEq,
    OperatorId::AndAnd,
    OperatorId::OrOr,
    OperatorId::PlusEq,
    OperatorId::MinusEq,
    OperatorId::StarEq,
    OperatorId::SlashEq,
    OperatorId::PercentEq,
    OperatorId::PlusPlus,
    OperatorId::MinusMinus,
    OperatorId::Plus,
    OperatorId::Minus,
    OperatorId::Star,
    OperatorId::Slash,
    OperatorId::Percent,
    OperatorId::Lt,
    OperatorId::Gt,
    OperatorId::Bang,
    OperatorId::Eq,
];

/// Resolve a spelling to an operator id.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Return the metadata for an operator id.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (a registry bug, covered by the guardrail tests).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("INVARIANT: every OperatorId has a registry entry")
}

/// Return the source spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the diagnostic token-kind name of an operator.
pub fn token_name(id: OperatorId) -> &'static str {
    info_for(id).token_name
}

/// Return `true` for `=`, `+=`, `-=`, `*=`, `/=`, `%=`.
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).precedence == info_for(OperatorId::Eq).precedence
}
