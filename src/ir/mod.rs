//! Intermediate representation consumed by the dataflow analyses.
//!
//! The IR is deliberately small: a procedure is a set of statements wired
//! into a CFG (see [`crate::cfg`]), and each statement is either a
//! definition (`target = expression`) or an opaque statement kind that the
//! analyses treat as a no-op on their facts.
//!
//! Expressions form a closed tagged union. Anything the constant evaluator
//! does not model (calls, field loads, casts, ...) is represented by the
//! [`Exp::Call`] and [`Exp::Unknown`] variants, which evaluate to the
//! conservative "not a constant" result.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Types and Variables
// =============================================================================

/// Primitive type kinds, mirroring a JVM-like source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

/// Declared type of a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Primitive type kind.
    Primitive(PrimitiveType),
    /// Reference type, identified by its class name.
    Reference(String),
}

impl Type {
    /// Shorthand for the 32-bit integer type.
    #[must_use]
    pub fn int() -> Self {
        Type::Primitive(PrimitiveType::Int)
    }
}

/// A local variable or formal parameter.
///
/// Identity is structural: two `Var`s with the same name and declared type
/// are the same variable. Facts are keyed by `Var`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Var {
    name: String,
    ty: Type,
}

impl Var {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Shorthand for an `int`-typed variable, the common case in tests.
    #[must_use]
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, Type::int())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Shift operators. `Ushr` is the logical (zero-fill) right shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftOp {
    Shl,
    Shr,
    Ushr,
}

/// Bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
}

/// Relational and equality operators, producing `1`/`0` on integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CondOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Binary operator, partitioned into its operator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Arith(ArithOp),
    Shift(ShiftOp),
    Bitwise(BitwiseOp),
    Cond(CondOp),
}

impl BinaryOp {
    /// Display symbol for this operator.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Arith(ArithOp::Add) => "+",
            BinaryOp::Arith(ArithOp::Sub) => "-",
            BinaryOp::Arith(ArithOp::Mul) => "*",
            BinaryOp::Arith(ArithOp::Div) => "/",
            BinaryOp::Arith(ArithOp::Rem) => "%",
            BinaryOp::Shift(ShiftOp::Shl) => "<<",
            BinaryOp::Shift(ShiftOp::Shr) => ">>",
            BinaryOp::Shift(ShiftOp::Ushr) => ">>>",
            BinaryOp::Bitwise(BitwiseOp::And) => "&",
            BinaryOp::Bitwise(BitwiseOp::Or) => "|",
            BinaryOp::Bitwise(BitwiseOp::Xor) => "^",
            BinaryOp::Cond(CondOp::Eq) => "==",
            BinaryOp::Cond(CondOp::Ne) => "!=",
            BinaryOp::Cond(CondOp::Lt) => "<",
            BinaryOp::Cond(CondOp::Le) => "<=",
            BinaryOp::Cond(CondOp::Gt) => ">",
            BinaryOp::Cond(CondOp::Ge) => ">=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// Expressions
// =============================================================================

/// An expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exp {
    /// Variable reference.
    Var(Var),
    /// 32-bit integer literal.
    IntLiteral(i32),
    /// Binary expression; operands evaluate left then right.
    Binary {
        op: BinaryOp,
        lhs: Box<Exp>,
        rhs: Box<Exp>,
    },
    /// Call expression. The callee's effect is not modeled.
    Call { callee: String, args: Vec<Exp> },
    /// Unmodeled expression shape (field load, cast, allocation, ...),
    /// kept as display text.
    Unknown(String),
}

impl Exp {
    /// Build a binary expression without spelling out the boxes.
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Exp, rhs: Exp) -> Self {
        Exp::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LValue {
    /// Assignment to a local variable.
    Var(Var),
    /// Assignment to an unmodeled target (field store, array element, ...),
    /// kept as display text.
    Opaque(String),
}

/// A statement, one per CFG node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// Definition statement: `target = value`.
    Assign { target: LValue, value: Exp },
    /// Conditional branch on `condition`; outgoing true/false edges carry
    /// the control flow.
    If { condition: Exp },
    /// Return, with an optional returned expression.
    Return { value: Option<Exp> },
    /// No-op. Also used for the virtual entry node.
    Nop,
}

impl Stmt {
    /// The (target, value) pair of a definition statement, `None` for every
    /// other statement kind.
    #[must_use]
    pub fn def(&self) -> Option<(&LValue, &Exp)> {
        match self {
            Stmt::Assign { target, value } => Some((target, value)),
            _ => None,
        }
    }
}
