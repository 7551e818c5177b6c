use dqlc_util::FieldType;

use crate::value::FieldValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringMethod {
    Contains,
    StartsWith,
    EndsWith,
}

/// The output AST: a language-neutral tree of operator/literal/
/// member-access/method-call/indexer nodes bound to "the current record".
/// The core never executes this; `dqlc-eval` is a reference host adapter
/// that does.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedExpr {
    Constant(FieldValue),
    /// A public property of the record, by name.
    PropertyAccess { name: String },
    /// A built-in static call (`MAX`/`MIN`).
    Call { name: String, args: Vec<TypedExpr> },
    /// `CONTAINS`/`STARTSWITH`/`ENDSWITH`, which compile to a string method
    /// call on the left operand.
    MethodCall {
        method: StringMethod,
        receiver: Box<TypedExpr>,
        argument: Box<TypedExpr>,
    },
    /// String character indexing (`x[i]`).
    Index {
        receiver: Box<TypedExpr>,
        index: Box<TypedExpr>,
    },
    /// An int operand promoted to double, e.g. for mixed-type arithmetic or
    /// `^`'s unconditional promotion.
    Convert { to: FieldType, expr: Box<TypedExpr> },
    Unary { op: UnaryOp, operand: Box<TypedExpr> },
    Binary {
        op: BinaryOp,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
    },
}
