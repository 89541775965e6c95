//! Data Flow Analysis Framework.
//!
//! Classical forward dataflow analysis over the statement-level CFG in
//! [`crate::cfg`]. The framework splits responsibilities the standard way:
//!
//! - An analysis ([`DataflowAnalysis`]) supplies the lattice operations:
//!   boundary/initial fact construction, the meet operator, and the
//!   per-statement transfer function with its change flag.
//! - The worklist solver ([`solver::Solver`]) owns CFG traversal,
//!   predecessor merging and convergence detection.
//!
//! # Analyses
//!
//! - **Constant Propagation** (forward): track which integer-typed
//!   variables hold a known constant value at each program point.
//!
//! # Example
//!
//! ```
//! use constprop::dataflow::constant_propagation::{ConstantPropagation, Value};
//! use constprop::dataflow::solver::Solver;
//! use constprop::cfg::{CfgEdge, ControlFlowGraph, NodeId};
//! use constprop::ir::{Exp, LValue, Stmt, Var};
//! use rustc_hash::FxHashMap;
//!
//! // entry; x = 7; return x
//! let x = Var::int("x");
//! let mut nodes = FxHashMap::default();
//! nodes.insert(NodeId(0), Stmt::Nop);
//! nodes.insert(NodeId(1), Stmt::Assign {
//!     target: LValue::Var(x.clone()),
//!     value: Exp::IntLiteral(7),
//! });
//! nodes.insert(NodeId(2), Stmt::Return { value: Some(Exp::Var(x.clone())) });
//! let cfg = ControlFlowGraph::new(
//!     "f".to_string(),
//!     nodes,
//!     vec![
//!         CfgEdge::unconditional(NodeId(0), NodeId(1)),
//!         CfgEdge::unconditional(NodeId(1), NodeId(2)),
//!     ],
//!     NodeId(0),
//!     vec![NodeId(2)],
//!     vec![],
//! );
//!
//! let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);
//! let at_return = result.out_fact(NodeId(2)).unwrap();
//! assert_eq!(at_return.get(&x), Value::Constant(7));
//! ```

pub mod common;
pub mod constant_propagation;
pub mod framework;
pub mod solver;

pub use constant_propagation::{can_hold_int, evaluate, ConstantPropagation, CpFact, Value};
pub use framework::DataflowAnalysis;
pub use solver::{DataflowResult, Solver};
