//! Abstract Syntax Tree definitions for the ts2go source language.
//!
//! Every node carries a byte [`Span`] through [`Spanned`]. Node kinds expose a stable
//! `kind_name()` spelling (`FunctionDeclaration`, `IfStatement`, `PlusToken`, ...) that the
//! emitter uses in its diagnostics.

use std::fmt;

use ts2go_core::lang::operators::{self, OperatorId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A program is an ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Spanned<Statement>>,
}

impl Program {
    /// Iterate over the import declarations of this program, in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.statements.iter().filter_map(|s| match &s.node {
            Statement::Import(import) => Some(import),
            _ => None,
        })
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Function(FunctionDecl),
    Import(ImportDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Block(Block),
    Expression(Spanned<Expr>),
    For(ForStmt),
    /// `return` with an optional value.
    Return(Option<Spanned<Expr>>),
    Variable(VariableDeclList),
    If(IfStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    /// A stray `;`.
    Empty,
}

impl Statement {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Function(_) => "FunctionDeclaration",
            Statement::Import(_) => "ImportDeclaration",
            Statement::Interface(_) => "InterfaceDeclaration",
            Statement::TypeAlias(_) => "TypeAliasDeclaration",
            Statement::Block(_) => "Block",
            Statement::Expression(_) => "ExpressionStatement",
            Statement::For(_) => "ForStatement",
            Statement::Return(_) => "ReturnStatement",
            Statement::Variable(_) => "VariableStatement",
            Statement::If(_) => "IfStatement",
            Statement::While(_) => "WhileStatement",
            Statement::DoWhile(_) => "DoStatement",
            Statement::Empty => "EmptyStatement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub exported: bool,
    pub is_default: bool,
    /// Absent only for `export default function (...)`.
    pub name: Option<Spanned<Ident>>,
    pub params: Vec<Spanned<Param>>,
    pub return_type: Option<Spanned<TypeAnnotation>>,
    /// Absent for overload signatures (`function f(): void;`).
    pub body: Option<Spanned<Block>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Spanned<Ident>,
    pub ty: Option<Spanned<TypeAnnotation>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// `import x from "m"`
    pub default: Option<Spanned<Ident>>,
    /// `import { a, b as c } from "m"`
    pub named: Vec<Spanned<ImportSpecifier>>,
    /// `import * as ns from "m"`
    pub namespace: Option<Spanned<Ident>>,
    /// The module specifier with quotes removed.
    pub specifier: Spanned<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub imported: Ident,
    pub local: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub exported: bool,
    pub name: Spanned<Ident>,
    pub members: Vec<Spanned<PropertySignature>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub name: Ident,
    pub optional: bool,
    pub ty: Spanned<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDecl {
    pub exported: bool,
    pub name: Spanned<Ident>,
    pub ty: Spanned<TypeAnnotation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclList {
    pub kind: DeclarationKind,
    pub declarations: Vec<Spanned<VariableDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: Spanned<Ident>,
    pub ty: Option<Spanned<TypeAnnotation>>,
    pub initializer: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub initializer: Option<ForInit>,
    pub condition: Option<Spanned<Expr>>,
    pub incrementor: Option<Spanned<Expr>>,
    pub body: Box<Spanned<Statement>>,
}

/// The first clause of a counted `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Variables(Spanned<VariableDeclList>),
    Expression(Spanned<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_branch: Box<Spanned<Statement>>,
    pub else_branch: Option<Box<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Box<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStmt {
    pub body: Box<Spanned<Statement>>,
    pub condition: Spanned<Expr>,
}

// ============================================================================
// Type annotations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// `number`, `Point`, `Array<string>`, `Pointer<int>`
    Named {
        name: Ident,
        args: Vec<Spanned<TypeAnnotation>>,
    },
    /// `T[]`
    Array(Box<Spanned<TypeAnnotation>>),
    /// `"abc"` as a type
    StringLiteral(String),
    /// `42` as a type
    NumberLiteral(String),
    /// `true` / `false` as a type
    BooleanLiteral(bool),
    /// `null` as a type
    Null,
    /// `{ a: number; b?: string }`
    Object(Vec<Spanned<PropertySignature>>),
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Named { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg.node)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeAnnotation::Array(elem) => write!(f, "{}[]", elem.node),
            TypeAnnotation::StringLiteral(text) => write!(f, "\"{}\"", text),
            TypeAnnotation::NumberLiteral(text) => write!(f, "{}", text),
            TypeAnnotation::BooleanLiteral(value) => write!(f, "{}", value),
            TypeAnnotation::Null => write!(f, "null"),
            TypeAnnotation::Object(members) => {
                write!(f, "{{")?;
                for member in members {
                    let optional = if member.node.optional { "?" } else { "" };
                    write!(f, " {}{}: {};", member.node.name, optional, member.node.ty.node)?;
                }
                write!(f, " }}")
            }
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `[a, b, c]`
    Array(Vec<Spanned<Expr>>),
    /// `expr as T`
    As(Box<Spanned<Expr>>, Spanned<TypeAnnotation>),
    Binary(Box<Spanned<Expr>>, Spanned<BinaryOp>, Box<Spanned<Expr>>),
    /// `callee(args...)`
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    /// `cond ? a : b`
    Conditional(Box<Spanned<Expr>>, Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `expr[index]`
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Ident(Ident),
    /// Numeric literal, verbatim source text.
    Number(String),
    Object(Vec<Spanned<ObjectProperty>>),
    Paren(Box<Spanned<Expr>>),
    Prefix(Spanned<UnaryOp>, Box<Spanned<Expr>>),
    Postfix(Box<Spanned<Expr>>, Spanned<UnaryOp>),
    /// `expr.name`
    Member(Box<Spanned<Expr>>, Spanned<Ident>),
    /// String literal body, escaped for a double-quoted target literal.
    String(String),
    Template(TemplateLiteral),
    Bool(bool),
    Null,
}

impl Expr {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Array(_) => "ArrayLiteralExpression",
            Expr::As(..) => "AsExpression",
            Expr::Binary(..) => "BinaryExpression",
            Expr::Call(..) => "CallExpression",
            Expr::Conditional(..) => "ConditionalExpression",
            Expr::Index(..) => "ElementAccessExpression",
            Expr::Ident(_) => "Identifier",
            Expr::Number(_) => "NumericLiteral",
            Expr::Object(_) => "ObjectLiteralExpression",
            Expr::Paren(_) => "ParenthesizedExpression",
            Expr::Prefix(..) => "PrefixUnaryExpression",
            Expr::Postfix(..) => "PostfixUnaryExpression",
            Expr::Member(..) => "PropertyAccessExpression",
            Expr::String(_) => "StringLiteral",
            Expr::Template(_) => "TemplateExpression",
            Expr::Bool(true) => "TrueKeyword",
            Expr::Bool(false) => "FalseKeyword",
            Expr::Null => "NullKeyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectProperty {
    /// `name: value`
    Assignment { name: Spanned<Ident>, value: Spanned<Expr> },
    /// `name`
    Shorthand(Spanned<Ident>),
    /// `...expr`
    Spread(Spanned<Expr>),
}

impl ObjectProperty {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ObjectProperty::Assignment { .. } => "PropertyAssignment",
            ObjectProperty::Shorthand(_) => "ShorthandPropertyAssignment",
            ObjectProperty::Spread(_) => "SpreadAssignment",
        }
    }
}

/// A template literal: `` `head${expr}literal${expr}literal` ``.
///
/// Static text is stored with the same escaping rules as string literal bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub head: String,
    pub spans: Vec<TemplateSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSpan {
    pub expr: Spanned<Expr>,
    /// Static text following `expr`.
    pub literal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    StrictEq,
    NotEq,
    StrictNotEq,
    And,
    Or,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl BinaryOp {
    /// Map an infix operator token to its binary operator, if it is one.
    pub fn from_operator(id: OperatorId) -> Option<BinaryOp> {
        Some(match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Percent => BinaryOp::Mod,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::EqEqEq => BinaryOp::StrictEq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::NotEqEq => BinaryOp::StrictNotEq,
            OperatorId::AndAnd => BinaryOp::And,
            OperatorId::OrOr => BinaryOp::Or,
            OperatorId::Eq => BinaryOp::Assign,
            OperatorId::PlusEq => BinaryOp::AddAssign,
            OperatorId::MinusEq => BinaryOp::SubAssign,
            OperatorId::StarEq => BinaryOp::MulAssign,
            OperatorId::SlashEq => BinaryOp::DivAssign,
            OperatorId::PercentEq => BinaryOp::ModAssign,
            OperatorId::Bang | OperatorId::PlusPlus | OperatorId::MinusMinus => return None,
        })
    }

    pub fn operator_id(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Mod => OperatorId::Percent,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::StrictEq => OperatorId::EqEqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::StrictNotEq => OperatorId::NotEqEq,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::Or => OperatorId::OrOr,
            BinaryOp::Assign => OperatorId::Eq,
            BinaryOp::AddAssign => OperatorId::PlusEq,
            BinaryOp::SubAssign => OperatorId::MinusEq,
            BinaryOp::MulAssign => OperatorId::StarEq,
            BinaryOp::DivAssign => OperatorId::SlashEq,
            BinaryOp::ModAssign => OperatorId::PercentEq,
        }
    }

    /// Token-kind name of the operator (`PlusToken`, `EqualsToken`, ...).
    pub fn kind_name(self) -> &'static str {
        operators::token_name(self.operator_id())
    }

    pub fn is_assignment(self) -> bool {
        operators::is_assignment(self.operator_id())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", operators::as_str(self.operator_id()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            UnaryOp::Not => OperatorId::Bang,
            UnaryOp::Neg => OperatorId::Minus,
            UnaryOp::Plus => OperatorId::Plus,
            UnaryOp::Increment => OperatorId::PlusPlus,
            UnaryOp::Decrement => OperatorId::MinusMinus,
        }
    }

    /// Token-kind name of the operator (`ExclamationToken`, `PlusPlusToken`, ...).
    pub fn kind_name(self) -> &'static str {
        operators::token_name(self.operator_id())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", operators::as_str(self.operator_id()))
    }
}
