//! Emit target source text from checked ASTs.
//!
//! This module defines [`NodeEmitter`] and wires together the submodules that implement AST → Go
//! emission. Emission is one depth-first walk with closed dispatch tables per level; a node kind
//! without a rule fails the run with a positioned [`EmitError`].
//!
//! ## See also
//! - [`program`]: translation-unit preamble and entry point
//! - [`decls`]: top-level dispatch (functions, inlined imports)
//! - [`statements`]: block-level dispatch
//! - [`expressions`]: expression dispatch, operators, literals

mod decls;
mod errors;
mod expressions;
mod program;
mod statements;

pub use errors::{Dispatcher, EmitError, SourceLocation};
pub use program::emit_program;

use crate::frontend::ast::Span;

use super::session::EmitSession;
use super::text::TextAccumulator;

/// Recursive-descent renderer over one emit session.
///
/// ## Notes
/// - The public API is [`emit_program`]; the dispatch methods are implemented across submodules.
/// - Every write goes through [`EmitSession::output`] so imported modules and placeholders can
///   redirect it.
pub struct NodeEmitter<'a> {
    session: EmitSession<'a>,
}

impl<'a> NodeEmitter<'a> {
    pub fn new(session: EmitSession<'a>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &EmitSession<'a> {
        &self.session
    }

    pub fn into_session(self) -> EmitSession<'a> {
        self.session
    }

    fn out(&mut self) -> &mut TextAccumulator {
        self.session.output()
    }

    fn dispatch_miss(&self, kind: &'static str, dispatcher: Dispatcher, span: Span) -> EmitError {
        EmitError::DispatchMiss {
            location: self.session.location(span),
            kind,
            dispatcher,
        }
    }

    fn unsupported_operator(
        &self,
        operator: &'static str,
        owner: Option<&'static str>,
        dispatcher: Dispatcher,
        span: Span,
    ) -> EmitError {
        EmitError::UnsupportedOperator {
            location: self.session.location(span),
            operator,
            owner,
            dispatcher,
        }
    }

    /// `name` as written, when Go can spell it. Source identifiers may contain `$`, Go ones may not.
    fn identifier<'n>(&self, name: &'n str, span: Span) -> Result<&'n str, EmitError> {
        if name.contains('$') {
            return Err(self.precondition(
                format!("Cannot emit identifier '{}': '$' is not allowed in Go identifiers.", name),
                span,
            ));
        }
        Ok(name)
    }

    fn precondition(&self, message: impl Into<String>, span: Span) -> EmitError {
        EmitError::Precondition {
            location: self.session.location(span),
            message: message.into(),
        }
    }
}
