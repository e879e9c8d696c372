//! Type name resolution: checked source types to target-language type names.
//!
//! [`TypeNameResolver::resolve`] handles the structured cases directly (arrays, literal types, the
//! generic numeric type, object and function types) and falls back to the frontend's textual
//! rendering for everything else. That text goes through [`normalize_type_text`], which parses it
//! into a small [`TypeExpr`] tree, rewrites it structurally, and renders it back.
//!
//! ## Normalization table
//!
//! | Source text            | Target text     |
//! |------------------------|-----------------|
//! | `number`               | `i32`           |
//! | `number[]`, `Array<number>` | `[]i32`    |
//! | `42`, `-1`             | `i32`           |
//! | `1.5`                  | `f64`           |
//! | `true`, `false`, `boolean` | `bool`      |
//! | `"abc"`                | `string`        |
//! | `ptr<T>`               | `Pointer<T>`    |
//! | `Pointer<T[]>`         | `Pointer<T>`    |
//!
//! Normalization is idempotent: target spellings (`[]T`, `i32`, `Pointer<T>`) parse back to the
//! same tree.

use std::fmt;

use ts2go_core::lang::keywords::{self, KeywordId};
use ts2go_core::lang::types::PrimitiveId;
use ts2go_core::lang::{target, types as source_types};
use ts2go_core::strings::{first_letter_to_upper, is_quoted, starts_with_digit};

use crate::frontend::ast::Span;
use crate::frontend::module::FileId;
use crate::frontend::types::{Type, TypeSystem};

// ============================================================================
// Errors
// ============================================================================

/// Why a node's type has no target spelling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeNameError {
    /// `any` or an unresolved type reached the emitter.
    #[error("type '{0}' could not be inferred")]
    Unresolved(String),
    /// The checker recorded no type for the node.
    #[error("no type was recorded for this node")]
    Missing,
}

// ============================================================================
// Typed intermediate representation
// ============================================================================

/// Structural form of a type name, used by normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare name or literal spelling (`number`, `Point`, `"abc"`, `1.5`).
    Named(String),
    /// Array of the element type; both `T[]` and `[]T` parse to this.
    Array(Box<TypeExpr>),
    /// Generic application (`Pointer<T>`, `Array<T>` before normalization).
    Generic { name: String, args: Vec<TypeExpr> },
}

impl TypeExpr {
    /// Parse type text. Text that does not fit the grammar becomes a single [`TypeExpr::Named`].
    pub fn parse(text: &str) -> TypeExpr {
        let text = text.trim();
        let mut parser = TypeTextParser { text, pos: 0 };
        match parser.parse_type() {
            Some(expr) if parser.at_end() => expr,
            _ => TypeExpr::Named(text.to_string()),
        }
    }

    /// Apply the normalization rewrites bottom-up.
    pub fn normalize(self) -> TypeExpr {
        match self {
            TypeExpr::Named(name) => TypeExpr::Named(normalize_name(&name)),
            TypeExpr::Array(element) => TypeExpr::Array(Box::new(element.normalize())),
            TypeExpr::Generic { name, args } => {
                let mut args: Vec<TypeExpr> = args.into_iter().map(TypeExpr::normalize).collect();
                if name == source_types::ARRAY && args.len() == 1 {
                    return TypeExpr::Array(Box::new(args.remove(0)));
                }
                let name = match source_types::pointer_from_str(&name) {
                    Some(pointer) => pointer.to_string(),
                    None => name,
                };
                if name == source_types::POINTER {
                    // Pointer-to-array degrades to pointer-to-element.
                    args = args.into_iter().map(strip_arrays).collect();
                }
                TypeExpr::Generic { name, args }
            }
        }
    }
}

fn strip_arrays(expr: TypeExpr) -> TypeExpr {
    match expr {
        TypeExpr::Array(element) => strip_arrays(*element),
        other => other,
    }
}

fn normalize_name(name: &str) -> String {
    let numeric = name.strip_prefix('-').unwrap_or(name);
    if starts_with_digit(numeric) {
        return if numeric.contains('.') {
            target::FLOAT.to_string()
        } else {
            target::INT32.to_string()
        };
    }
    if is_quoted(name) {
        return target::STRING.to_string();
    }
    if matches!(keywords::from_str(name), Some(KeywordId::True | KeywordId::False)) {
        return target::BOOL.to_string();
    }
    match source_types::primitive_from_str(name) {
        Some(PrimitiveId::Number) => target::INT32.to_string(),
        Some(PrimitiveId::Boolean) => target::BOOL.to_string(),
        _ => source_types::pointer_from_str(name).unwrap_or(name).to_string(),
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Array(element) => write!(f, "{}{}", target::ARRAY_PREFIX, element),
            TypeExpr::Generic { name, args } => {
                let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}<{}>", name, args.join(", "))
            }
        }
    }
}

/// Normalize free-form type text into its target spelling.
///
/// ## Examples
/// ```rust
/// use ts2go::backend::type_names::normalize_type_text;
///
/// assert_eq!(normalize_type_text("number[]"), "[]i32");
/// assert_eq!(normalize_type_text("Pointer<boolean[]>"), "Pointer<bool>");
/// assert_eq!(normalize_type_text(&normalize_type_text("Array<1.5>")), "[]f64");
/// ```
pub fn normalize_type_text(text: &str) -> String {
    TypeExpr::parse(text).normalize().to_string()
}

/// Recursive-descent reader for type text.
///
/// Grammar: `type := ("[]" type | atom) ("[]")*`, `atom := name ("<" type ("," type)* ">")?`.
struct TypeTextParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TypeTextParser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos == self.text.len()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Option<TypeExpr> {
        let mut expr = if self.eat(target::ARRAY_PREFIX) {
            TypeExpr::Array(Box::new(self.parse_type()?))
        } else {
            self.parse_atom()?
        };
        while self.eat("[]") {
            expr = TypeExpr::Array(Box::new(expr));
        }
        Some(expr)
    }

    fn parse_atom(&mut self) -> Option<TypeExpr> {
        let name = self.parse_name()?;
        if !self.eat("<") {
            return Some(TypeExpr::Named(name));
        }
        let mut args = vec![self.parse_type()?];
        while self.eat(",") {
            args.push(self.parse_type()?);
        }
        if !self.eat(">") {
            return None;
        }
        Some(TypeExpr::Generic { name, args })
    }

    fn parse_name(&mut self) -> Option<String> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = match rest.chars().next()? {
            quote @ ('"' | '\'') => {
                let close = rest[1..].find(quote)?;
                close + 2
            }
            _ => rest
                .find(|c: char| matches!(c, '<' | '>' | ',' | '[' | ']') || c.is_whitespace())
                .unwrap_or(rest.len()),
        };
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(rest[..len].to_string())
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Maps checked types to target type names through a [`TypeSystem`].
#[derive(Clone, Copy)]
pub struct TypeNameResolver<'t> {
    types: &'t dyn TypeSystem,
}

impl<'t> TypeNameResolver<'t> {
    pub fn new(types: &'t dyn TypeSystem) -> Self {
        Self { types }
    }

    pub fn type_at(&self, file: FileId, span: Span) -> Option<&'t Type> {
        self.types.type_at(file, span)
    }

    /// Resolve the type recorded for the node at `span`.
    pub fn resolve_at(&self, file: FileId, span: Span) -> Result<String, TypeNameError> {
        let ty = self.type_at(file, span).ok_or(TypeNameError::Missing)?;
        self.resolve(ty)
    }

    pub fn is_array_at(&self, file: FileId, span: Span) -> bool {
        self.type_at(file, span).is_some_and(|ty| self.types.is_array_type(ty))
    }

    pub fn is_number_at(&self, file: FileId, span: Span) -> bool {
        self.type_at(file, span)
            .is_some_and(|ty| self.types.is_assignable_to_number(ty))
    }

    /// Target type name for `ty`.
    ///
    /// ## Errors
    /// - [`TypeNameError::Unresolved`] for `any` and unresolved types, including array elements.
    pub fn resolve(&self, ty: &Type) -> Result<String, TypeNameError> {
        if self.types.is_array_type(ty) {
            let element = self
                .types
                .array_element_type(ty)
                .expect("INVARIANT: array-like types have an element type");
            return Ok(format!("{}{}", target::ARRAY_PREFIX, self.resolve(element)?));
        }

        let name = match ty {
            Type::StringLiteral(_) => target::STRING.to_string(),
            Type::Number | Type::NumberLiteral(_) => target::DEFAULT_INT.to_string(),
            Type::Any | Type::Unknown => return Err(TypeNameError::Unresolved(self.types.type_to_string(ty))),
            // User aliases are never emitted, so they resolve through their target.
            Type::Alias { name, target } if !source_types::is_numeric_alias(name) => return self.resolve(target),
            Type::Object(fields) => self.struct_type(fields)?,
            Type::Function(sig) => {
                let params = sig
                    .params
                    .iter()
                    .map(|(_, ty)| self.resolve(ty))
                    .collect::<Result<Vec<_>, _>>()?;
                let ret = self.resolve(&sig.return_type)?;
                if ret == target::VOID {
                    format!("{}({})", target::FUNC, params.join(", "))
                } else {
                    format!("{}({}) {}", target::FUNC, params.join(", "), ret)
                }
            }
            _ => normalize_type_text(&self.types.type_to_string(ty)),
        };
        tracing::trace!(ty = %ty, name = %name, "resolved type name");
        Ok(name)
    }

    /// Anonymous struct type for an object type: `struct{ A int; B string }`.
    fn struct_type(&self, fields: &[(String, Type)]) -> Result<String, TypeNameError> {
        if fields.is_empty() {
            return Ok("struct{}".to_string());
        }
        let fields = fields
            .iter()
            .map(|(name, ty)| Ok(format!("{} {}", first_letter_to_upper(name), self.resolve(ty)?)))
            .collect::<Result<Vec<_>, TypeNameError>>()?;
        Ok(format!("struct{{ {} }}", fields.join("; ")))
    }
}
