//! Abstract syntax tree.
//!
//! Covers the statement/expression grammar SPEC_FULL.md §4.5 lowers from:
//! let/mut bindings, if/elif*/else, while, for (numeric and iterator forms),
//! fn/proc declarations, return, break/continue, try/catch, throw,
//! import...as, expression statements and blocks.

use crate::span::Span;
use crate::token::Literal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,
    BAnd,
    BOr,
    BXor,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogicalOp {
    Or,
    And,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
    BNot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollectionKind {
    Array,
    List,
    Dict,
    Record,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal {
        value: Literal,
        span: Span,
    },
    Ident {
        name: String,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
        span: Span,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    Member {
        object: Box<Expr>,
        name: String,
        span: Span,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    Collection {
        kind: CollectionKind,
        /// Record/dict entries carry a key name; array/list entries leave it `None`.
        elements: Vec<(Option<String>, Expr)>,
        span: Span,
    },
    Is {
        value: Box<Expr>,
        type_name: String,
        span: Span,
    },
    Lambda {
        params: Vec<String>,
        body: Vec<Stmt>,
        is_proc: bool,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Ident { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Assign { span, .. }
            | Expr::Call { span, .. }
            | Expr::Member { span, .. }
            | Expr::Index { span, .. }
            | Expr::Collection { span, .. }
            | Expr::Is { span, .. }
            | Expr::Lambda { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForNumeric {
    pub var: String,
    pub from: Expr,
    pub to: Expr,
    pub step: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForIterator {
    pub var: String,
    pub iterable: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForHead {
    Numeric(ForNumeric),
    Iterator(ForIterator),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub is_proc: bool,
    pub is_public: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Let {
        name: String,
        mutable: bool,
        value: Option<Expr>,
        span: Span,
    },
    Expr(Expr),
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        elifs: Vec<(Expr, Vec<Stmt>)>,
        else_branch: Option<Vec<Stmt>>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    For {
        head: ForHead,
        body: Vec<Stmt>,
        span: Span,
    },
    FnDecl(FnDecl),
    Return {
        value: Option<Expr>,
        span: Span,
    },
    Break(Span),
    Continue(Span),
    Try {
        body: Vec<Stmt>,
        catch_name: Option<String>,
        catch_body: Vec<Stmt>,
        span: Span,
    },
    Throw {
        value: Expr,
        span: Span,
    },
    Import {
        path: String,
        alias: Option<String>,
        span: Span,
    },
}
