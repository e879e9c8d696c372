//! Define error types for AST → target emission.
//!
//! These errors represent *backend emission* failures (as opposed to parsing or typechecking). Every
//! one is positioned in the file whose node could not be emitted and aborts the run.

use std::fmt;
use std::path::PathBuf;

use crate::frontend::ast::Span;

/// Position of a node in its originating source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: PathBuf,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub column: usize,
    pub span: Span,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}

/// Dispatch function names reported in emission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatcher {
    TopLevelStatement,
    BlockLevelStatement,
    Expression,
    BinaryExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    ObjectLiteralExpression,
}

impl Dispatcher {
    pub fn as_str(self) -> &'static str {
        match self {
            Dispatcher::TopLevelStatement => "emit_top_level_statement",
            Dispatcher::BlockLevelStatement => "emit_block_level_statement",
            Dispatcher::Expression => "emit_expression",
            Dispatcher::BinaryExpression => "emit_binary_expression",
            Dispatcher::PrefixUnaryExpression => "emit_prefix_unary_expression",
            Dispatcher::PostfixUnaryExpression => "emit_postfix_unary_expression",
            Dispatcher::ObjectLiteralExpression => "emit_object_literal_expression",
        }
    }
}

impl fmt::Display for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error during emission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// A node kind has no rendering rule at this dispatch level.
    #[error("{location}: Failed to emit {kind} in {dispatcher}.")]
    DispatchMiss {
        location: SourceLocation,
        kind: &'static str,
        dispatcher: Dispatcher,
    },
    /// An operator token has no rendering rule. `owner` names the node kind holding the token, when
    /// the message should mention it.
    #[error("{location}: {}", operator_message(.operator, .owner, .dispatcher))]
    UnsupportedOperator {
        location: SourceLocation,
        operator: &'static str,
        owner: Option<&'static str>,
        dispatcher: Dispatcher,
    },
    /// A node is missing something emission requires (name, declared type, body, inferable type).
    #[error("{location}: {message}")]
    Precondition { location: SourceLocation, message: String },
    /// An import specifier names no loaded module.
    #[error("{location}: Cannot resolve module '{specifier}'.")]
    UnresolvedModule { location: SourceLocation, specifier: String },
}

impl EmitError {
    pub fn location(&self) -> &SourceLocation {
        match self {
            EmitError::DispatchMiss { location, .. }
            | EmitError::UnsupportedOperator { location, .. }
            | EmitError::Precondition { location, .. }
            | EmitError::UnresolvedModule { location, .. } => location,
        }
    }

    /// Short message without the location prefix, for diagnostics that show the position separately.
    pub fn message(&self) -> String {
        match self {
            EmitError::DispatchMiss { kind, dispatcher, .. } => format!("Failed to emit {} in {}.", kind, dispatcher),
            EmitError::UnsupportedOperator {
                operator,
                owner,
                dispatcher,
                ..
            } => operator_message(operator, owner, dispatcher),
            EmitError::Precondition { message, .. } => message.clone(),
            EmitError::UnresolvedModule { specifier, .. } => format!("Cannot resolve module '{}'.", specifier),
        }
    }
}

fn operator_message(operator: &str, owner: &Option<&'static str>, dispatcher: &Dispatcher) -> String {
    match owner {
        Some(owner) => format!("Failed to emit {} for {} in {}.", operator, owner, dispatcher),
        None => format!("Failed to emit {} in {}.", operator, dispatcher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> SourceLocation {
        SourceLocation {
            path: PathBuf::from("src/main.ts"),
            line: 3,
            column: 5,
            span: Span::new(20, 30),
        }
    }

    #[test]
    fn test_dispatch_miss_message() {
        let err = EmitError::DispatchMiss {
            location: location(),
            kind: "IfStatement",
            dispatcher: Dispatcher::BlockLevelStatement,
        };
        assert_eq!(
            err.to_string(),
            "src/main.ts:3:5: Failed to emit IfStatement in emit_block_level_statement."
        );
        assert_eq!(err.message(), "Failed to emit IfStatement in emit_block_level_statement.");
        assert_eq!(err.location().span, Span::new(20, 30));
    }

    #[test]
    fn test_operator_message() {
        let err = EmitError::UnsupportedOperator {
            location: location(),
            operator: "PercentToken",
            owner: Some("BinaryExpression"),
            dispatcher: Dispatcher::BinaryExpression,
        };
        assert_eq!(
            err.to_string(),
            "src/main.ts:3:5: Failed to emit PercentToken for BinaryExpression in emit_binary_expression."
        );

        let err = EmitError::UnsupportedOperator {
            location: location(),
            operator: "PlusToken",
            owner: None,
            dispatcher: Dispatcher::PrefixUnaryExpression,
        };
        assert_eq!(err.message(), "Failed to emit PlusToken in emit_prefix_unary_expression.");
    }

    #[test]
    fn test_unresolved_module_message() {
        let err = EmitError::UnresolvedModule {
            location: location(),
            specifier: "./missing".to_string(),
        };
        assert_eq!(err.to_string(), "src/main.ts:3:5: Cannot resolve module './missing'.");
    }
}
