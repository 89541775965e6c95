//! Constant Propagation Dataflow Analysis.
//!
//! Forward analysis tracking which integer-typed variables hold a known
//! constant value at each program point.
//!
//! # Lattice Structure
//!
//! Each variable carries a three-level abstract value:
//! ```text
//!          NAC (not a constant)
//!         /   |   \
//!   Constant(c1) ... Constant(cn)
//!         \   |   /
//!          Undef (no information yet)
//! ```
//!
//! The meet operation (at join points) is:
//! - `Constant(c) meet Constant(c) = Constant(c)`
//! - `Constant(c1) meet Constant(c2) = NAC` (if c1 != c2)
//! - `NAC meet anything = NAC`
//! - `Undef meet v = v`
//!
//! Each variable moves upward at most twice (`Undef -> Constant -> NAC`),
//! which bounds the fixpoint iteration.
//!
//! # Arithmetic
//!
//! Concrete evaluation follows 32-bit two's-complement integer semantics:
//! wraparound on overflow, truncating division and remainder, shift
//! distances masked to the low five bits, `>>>` zero-filling. Division or
//! remainder by a provably-zero constant evaluates to `Undef` rather than
//! `NAC`: a statically zero divisor means the statement can never produce
//! a value. Tests pin this case explicitly.
//!
//! # Limitations
//!
//! - Intraprocedural only (call expressions evaluate to `NAC`)
//! - Only 8/16/32-bit integer, char and boolean variables are tracked
//! - Computes facts only; no folding or rewriting of the program

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cfg::ControlFlowGraph;
use crate::dataflow::framework::DataflowAnalysis;
use crate::ir::{ArithOp, BinaryOp, BitwiseOp, CondOp, Exp, LValue, PrimitiveType, ShiftOp, Stmt,
    Type, Var};

// =============================================================================
// Lattice Value
// =============================================================================

/// Abstract value of an integer variable at a program point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// No information yet. Bottom of the lattice; the analysis-start state
    /// and the implicit value of every unmapped variable.
    Undef,
    /// The variable provably holds exactly this constant.
    Constant(i32),
    /// Not a constant: the value cannot be statically determined. Top of
    /// the lattice.
    Nac,
}

impl Value {
    #[must_use]
    pub fn is_undef(self) -> bool {
        matches!(self, Value::Undef)
    }

    #[must_use]
    pub fn is_constant(self) -> bool {
        matches!(self, Value::Constant(_))
    }

    #[must_use]
    pub fn is_nac(self) -> bool {
        matches!(self, Value::Nac)
    }

    /// The constant carried by a `Constant` value.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `Constant`. Calling this on `Undef` or
    /// `Nac` is a caller bug, not a recoverable condition.
    #[must_use]
    pub fn get_constant(self) -> i32 {
        match self {
            Value::Constant(c) => c,
            other => panic!("get_constant on non-constant value {other}"),
        }
    }

    /// Meet operation for combining values at join points.
    ///
    /// - `Undef` is the identity element
    /// - `Nac` absorbs
    /// - equal constants stay constant, unequal constants go to `Nac`
    #[must_use]
    pub fn meet(self, other: Value) -> Value {
        match (self, other) {
            (Value::Undef, v) | (v, Value::Undef) => v,
            (Value::Nac, _) | (_, Value::Nac) => Value::Nac,
            (Value::Constant(c1), Value::Constant(c2)) => {
                if c1 == c2 {
                    Value::Constant(c1)
                } else {
                    Value::Nac
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => write!(f, "undef"),
            Value::Constant(c) => write!(f, "{c}"),
            Value::Nac => write!(f, "NAC"),
        }
    }
}

// =============================================================================
// Flow Fact
// =============================================================================

/// Map from variable to abstract [`Value`]: the flow fact at one program
/// point.
///
/// The representation is canonical: `Undef` is never stored, so an absent
/// key and `Undef` are the same thing (as the lattice defines). All
/// mutators report whether the stored state actually changed; the fixpoint
/// termination test depends on those flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpFact {
    values: FxHashMap<Var, Value>,
}

impl CpFact {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Abstract value of `var`, `Undef` if unmapped.
    #[must_use]
    pub fn get(&self, var: &Var) -> Value {
        self.values.get(var).copied().unwrap_or(Value::Undef)
    }

    /// Bind `var` to `value`; returns true iff the binding changed.
    ///
    /// Binding to `Undef` removes the entry (canonical representation).
    pub fn update(&mut self, var: Var, value: Value) -> bool {
        if value.is_undef() {
            return self.values.remove(&var).is_some();
        }
        match self.values.insert(var, value) {
            Some(old) => old != value,
            None => true,
        }
    }

    /// Remove `var`'s binding, returning its prior value (`Undef` if it
    /// had none).
    pub fn remove(&mut self, var: &Var) -> Value {
        self.values.remove(var).unwrap_or(Value::Undef)
    }

    /// Iterate over the explicit (non-`Undef`) bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&Var, Value)> {
        self.values.iter().map(|(var, value)| (var, *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for CpFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<String> = self
            .values
            .iter()
            .map(|(var, value)| format!("{var}={value}"))
            .collect();
        entries.sort_unstable();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// Whether a variable's declared type can hold a tracked integer value.
///
/// True for the 8/16/32-bit integer kinds, char and boolean. Long, float,
/// double and reference types are never tracked.
#[must_use]
pub fn can_hold_int(var: &Var) -> bool {
    matches!(
        var.ty(),
        Type::Primitive(
            PrimitiveType::Boolean
                | PrimitiveType::Byte
                | PrimitiveType::Short
                | PrimitiveType::Char
                | PrimitiveType::Int
        )
    )
}

/// The constant propagation analysis.
///
/// Stateless; all state lives in the [`CpFact`]s owned by the solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantPropagation;

impl ConstantPropagation {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DataflowAnalysis for ConstantPropagation {
    type Fact = CpFact;

    /// Entry fact: every tracked formal parameter is caller-controlled,
    /// hence `Nac`. Untracked parameters get no entry.
    fn new_boundary_fact(&self, cfg: &ControlFlowGraph) -> CpFact {
        let mut fact = CpFact::new();
        for param in cfg.params() {
            if can_hold_int(param) {
                fact.update(param.clone(), Value::Nac);
            }
        }
        fact
    }

    fn new_initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) {
        for (var, value) in fact.iter() {
            let merged = value.meet(target.get(var));
            target.update(var.clone(), merged);
        }
    }

    /// Copy `in` into `out`, then re-bind the assigned variable (if any)
    /// to its evaluated right-hand side.
    ///
    /// The old binding is killed before evaluation so a self-referential
    /// right-hand side reads the IN state, never a half-updated OUT.
    fn transfer_node(&self, stmt: &Stmt, in_fact: &CpFact, out_fact: &mut CpFact) -> bool {
        let mut changed = false;
        for (var, value) in in_fact.iter() {
            changed |= out_fact.update(var.clone(), value);
        }

        if let Some((LValue::Var(lhs), rhs)) = stmt.def() {
            if can_hold_int(lhs) {
                let prior = out_fact.remove(lhs);
                let value = evaluate(rhs, in_fact);
                out_fact.update(lhs.clone(), value);
                return value != prior || changed;
            }
        }
        changed
    }
}

// =============================================================================
// Expression Evaluation
// =============================================================================

/// Abstractly evaluate `exp` against the IN fact of its statement.
///
/// Operands evaluate left then right. Unmodeled expression shapes (calls,
/// field loads, ...) evaluate to `Nac`.
#[must_use]
pub fn evaluate(exp: &Exp, in_fact: &CpFact) -> Value {
    match exp {
        Exp::Var(var) => in_fact.get(var),
        Exp::IntLiteral(c) => Value::Constant(*c),
        Exp::Binary { op, lhs, rhs } => {
            let v1 = evaluate(lhs, in_fact);
            let v2 = evaluate(rhs, in_fact);

            // Provably-zero divisor: Undef, checked before the NAC/Undef
            // rules (so even NAC / 0 is Undef).
            if matches!(op, BinaryOp::Arith(ArithOp::Div | ArithOp::Rem))
                && v2 == Value::Constant(0)
            {
                return Value::Undef;
            }
            if v1.is_nac() || v2.is_nac() {
                return Value::Nac;
            }
            if v1.is_undef() || v2.is_undef() {
                return Value::Undef;
            }

            let int1 = v1.get_constant();
            let int2 = v2.get_constant();
            Value::Constant(fold_binary(*op, int1, int2))
        }
        Exp::Call { .. } | Exp::Unknown(_) => Value::Nac,
    }
}

/// Concrete 32-bit folding of `int1 op int2`.
///
/// Divisor is non-zero here; the caller filters zero divisors first.
fn fold_binary(op: BinaryOp, int1: i32, int2: i32) -> i32 {
    match op {
        BinaryOp::Arith(op) => match op {
            ArithOp::Add => int1.wrapping_add(int2),
            ArithOp::Sub => int1.wrapping_sub(int2),
            ArithOp::Mul => int1.wrapping_mul(int2),
            ArithOp::Div => int1.wrapping_div(int2),
            ArithOp::Rem => int1.wrapping_rem(int2),
        },
        // wrapping_sh* mask the distance to the low five bits, matching
        // native 32-bit shift semantics for any distance including
        // negative ones.
        BinaryOp::Shift(op) => match op {
            ShiftOp::Shl => int1.wrapping_shl(int2 as u32),
            ShiftOp::Shr => int1.wrapping_shr(int2 as u32),
            ShiftOp::Ushr => ((int1 as u32).wrapping_shr(int2 as u32)) as i32,
        },
        BinaryOp::Bitwise(op) => match op {
            BitwiseOp::And => int1 & int2,
            BitwiseOp::Or => int1 | int2,
            BitwiseOp::Xor => int1 ^ int2,
        },
        BinaryOp::Cond(op) => match op {
            CondOp::Eq => (int1 == int2) as i32,
            CondOp::Ne => (int1 != int2) as i32,
            CondOp::Lt => (int1 < int2) as i32,
            CondOp::Le => (int1 <= int2) as i32,
            CondOp::Gt => (int1 > int2) as i32,
            CondOp::Ge => (int1 >= int2) as i32,
        },
    }
}
