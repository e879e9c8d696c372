//! Semantic types for the ts2go source language, and the query surface later stages use.
//!
//! [`Type`] is what the checker assigns to expressions, declarations and annotations. Its `Display`
//! output follows the source language's own spelling (`number[]`, `"abc"`, `Pointer<number[]>`,
//! `{ a: number; }`), which is the text the backend normalizes into target type names.
//!
//! [`TypeSystem`] is the read-only view the backend consumes: type-at-node plus the few structural
//! predicates it needs. The backend never looks at the AST to infer types itself.

use std::fmt;

use ts2go_core::lang::types as source_types;

use super::ast::Span;
use super::module::FileId;

/// A checked type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Number,
    /// Numeric literal type, spelled as in source (`42`, `1.5`, `-1`).
    NumberLiteral(String),
    String,
    /// String literal type; the body is kept escaped.
    StringLiteral(String),
    Boolean,
    BooleanLiteral(bool),
    Void,
    Null,
    /// Explicit or implicit `any`.
    Any,
    /// Error recovery: the checker could not determine a type.
    Unknown,
    Array(Box<Type>),
    /// Named alias (`type N = ...` or a runtime alias such as `int32`); displays as its name.
    Alias { name: String, target: Box<Type> },
    /// Interface or opaque generic reference (`Point`, `Pointer<T>`).
    Reference { name: String, args: Vec<Type> },
    /// Anonymous object type, fields in declaration order.
    Object(Vec<(String, Type)>),
    Function(FunctionSig),
}

/// Signature of a callable value.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSig {
    pub params: Vec<(String, Type)>,
    pub return_type: Box<Type>,
}

impl FunctionSig {
    pub fn new(params: Vec<(String, Type)>, return_type: Type) -> Self {
        Self {
            params,
            return_type: Box::new(return_type),
        }
    }
}

impl Type {
    pub fn array_of(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    /// Strip aliases down to the underlying type.
    pub fn resolved(&self) -> &Type {
        match self {
            Type::Alias { target, .. } => target.resolved(),
            other => other,
        }
    }

    /// Widen literal types to their base type (`let` bindings, array elements, object fields).
    pub fn widened(&self) -> Type {
        match self {
            Type::NumberLiteral(_) => Type::Number,
            Type::StringLiteral(_) => Type::String,
            Type::BooleanLiteral(_) => Type::Boolean,
            Type::Array(element) => Type::array_of(element.widened()),
            Type::Object(fields) => Type::Object(
                fields
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.widened()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    pub fn is_array_like(&self) -> bool {
        matches!(self.resolved(), Type::Array(_))
    }

    pub fn array_element(&self) -> Option<&Type> {
        match self.resolved() {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_number_like(&self) -> bool {
        matches!(self.resolved(), Type::Number | Type::NumberLiteral(_))
    }

    pub fn is_string_like(&self) -> bool {
        matches!(self.resolved(), Type::String | Type::StringLiteral(_))
    }

    /// `any` or an unresolved type; both suppress follow-on errors.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.resolved(), Type::Any | Type::Unknown)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number => write!(f, "{}", source_types::primitive_as_str(source_types::PrimitiveId::Number)),
            Type::NumberLiteral(text) => write!(f, "{}", text),
            Type::String => write!(f, "{}", source_types::primitive_as_str(source_types::PrimitiveId::String)),
            Type::StringLiteral(body) => write!(f, "\"{}\"", body),
            Type::Boolean => write!(f, "{}", source_types::primitive_as_str(source_types::PrimitiveId::Boolean)),
            Type::BooleanLiteral(value) => write!(f, "{}", value),
            Type::Void => write!(f, "{}", source_types::primitive_as_str(source_types::PrimitiveId::Void)),
            Type::Null => write!(f, "null"),
            Type::Any => write!(f, "{}", source_types::primitive_as_str(source_types::PrimitiveId::Any)),
            Type::Unknown => write!(f, "unknown"),
            Type::Array(element) => match element.as_ref() {
                Type::Function(_) => write!(f, "({})[]", element),
                _ => write!(f, "{}[]", element),
            },
            Type::Alias { name, .. } => write!(f, "{}", name),
            Type::Reference { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            Type::Object(fields) => {
                if fields.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (name, ty) in fields {
                    write!(f, "{}: {}; ", name, ty)?;
                }
                write!(f, "}}")
            }
            Type::Function(sig) => {
                let params: Vec<String> = sig
                    .params
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty))
                    .collect();
                write!(f, "({}) => {}", params.join(", "), sig.return_type)
            }
        }
    }
}

/// Read-only type queries over a checked module graph.
///
/// Nodes are addressed by the file they live in and their byte span.
pub trait TypeSystem {
    /// Type recorded for the node at `span` in `file`.
    fn type_at(&self, file: FileId, span: Span) -> Option<&Type>;

    fn is_array_type(&self, ty: &Type) -> bool {
        ty.is_array_like()
    }

    /// Element type of an array-like type.
    fn array_element_type<'t>(&self, ty: &'t Type) -> Option<&'t Type> {
        ty.array_element()
    }

    fn is_assignable_to_number(&self, ty: &Type) -> bool {
        ty.is_number_like()
    }

    /// Source-language spelling of a type.
    fn type_to_string(&self, ty: &Type) -> String {
        ty.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_source_spelling() {
        assert_eq!(Type::array_of(Type::Number).to_string(), "number[]");
        assert_eq!(Type::StringLiteral("abc".to_string()).to_string(), "\"abc\"");
        assert_eq!(Type::NumberLiteral("42".to_string()).to_string(), "42");
        assert_eq!(Type::BooleanLiteral(false).to_string(), "false");
        assert_eq!(
            Type::Reference {
                name: "Pointer".to_string(),
                args: vec![Type::array_of(Type::Number)],
            }
            .to_string(),
            "Pointer<number[]>"
        );
        assert_eq!(
            Type::Object(vec![("a".to_string(), Type::Number), ("b".to_string(), Type::String)]).to_string(),
            "{ a: number; b: string; }"
        );
        assert_eq!(Type::Object(vec![]).to_string(), "{}");
        assert_eq!(
            Type::Function(FunctionSig::new(vec![("x".to_string(), Type::Number)], Type::Void)).to_string(),
            "(x: number) => void"
        );
    }

    #[test]
    fn test_alias_displays_name_but_behaves_like_target() {
        let alias = Type::Alias {
            name: "int32".to_string(),
            target: Box::new(Type::Number),
        };
        assert_eq!(alias.to_string(), "int32");
        assert!(alias.is_number_like());

        let nums = Type::Alias {
            name: "Nums".to_string(),
            target: Box::new(Type::array_of(Type::Number)),
        };
        assert!(nums.is_array_like());
        assert_eq!(nums.array_element(), Some(&Type::Number));
    }

    #[test]
    fn test_widening() {
        assert_eq!(Type::NumberLiteral("1".to_string()).widened(), Type::Number);
        assert_eq!(
            Type::array_of(Type::StringLiteral("x".to_string())).widened(),
            Type::array_of(Type::String)
        );
        assert_eq!(
            Type::Object(vec![("ok".to_string(), Type::BooleanLiteral(true))]).widened(),
            Type::Object(vec![("ok".to_string(), Type::Boolean)])
        );
    }
}
