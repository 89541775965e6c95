//! constprop - intraprocedural constant propagation.
//!
//! This library computes, for every program point of a procedure and every
//! integer-typed variable, whether the variable provably holds a single
//! constant, is provably not a constant (NAC), or is not yet determined
//! (undef). It computes facts only; it does not rewrite the program.
//!
//! # Architecture
//!
//! - **IR Layer** ([`ir`]): variables, types, expressions and statements
//! - **CFG Layer** ([`cfg`]): statement-level control flow graph with O(1)
//!   successor/predecessor queries
//! - **Dataflow Layer** ([`dataflow`]): the generic analysis trait, the
//!   worklist fixpoint solver, and the constant propagation analysis
//!
//! # Quick Start
//!
//! ```
//! use constprop::{ConstantPropagation, Solver, Value};
//! use constprop::cfg::{CfgEdge, ControlFlowGraph, NodeId};
//! use constprop::ir::{ArithOp, BinaryOp, Exp, LValue, Stmt, Var};
//! use rustc_hash::FxHashMap;
//!
//! // entry; x = 1; y = x + 2; return y
//! let x = Var::int("x");
//! let y = Var::int("y");
//! let mut nodes = FxHashMap::default();
//! nodes.insert(NodeId(0), Stmt::Nop);
//! nodes.insert(NodeId(1), Stmt::Assign {
//!     target: LValue::Var(x.clone()),
//!     value: Exp::IntLiteral(1),
//! });
//! nodes.insert(NodeId(2), Stmt::Assign {
//!     target: LValue::Var(y.clone()),
//!     value: Exp::binary(
//!         BinaryOp::Arith(ArithOp::Add),
//!         Exp::Var(x.clone()),
//!         Exp::IntLiteral(2),
//!     ),
//! });
//! nodes.insert(NodeId(3), Stmt::Return { value: Some(Exp::Var(y.clone())) });
//!
//! let cfg = ControlFlowGraph::new(
//!     "f".to_string(),
//!     nodes,
//!     vec![
//!         CfgEdge::unconditional(NodeId(0), NodeId(1)),
//!         CfgEdge::unconditional(NodeId(1), NodeId(2)),
//!         CfgEdge::unconditional(NodeId(2), NodeId(3)),
//!     ],
//!     NodeId(0),
//!     vec![NodeId(3)],
//!     vec![],
//! );
//!
//! let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);
//! assert!(result.converged);
//! let fact = result.out_fact(NodeId(2)).unwrap();
//! assert_eq!(fact.get(&y), Value::Constant(3));
//! ```

pub mod cfg;
pub mod dataflow;
pub mod ir;

pub use cfg::{CfgEdge, CfgError, ControlFlowGraph, EdgeType, NodeId};
pub use dataflow::{
    can_hold_int, evaluate, ConstantPropagation, CpFact, DataflowAnalysis, DataflowResult,
    Solver, Value,
};
