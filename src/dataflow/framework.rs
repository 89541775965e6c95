//! Generic forward dataflow analysis interface.
//!
//! An analysis supplies four operations; the worklist solver in
//! [`crate::dataflow::solver`] owns all CFG traversal and convergence
//! detection. The boolean returned by [`DataflowAnalysis::transfer_node`]
//! is the solver's only change signal: `true` means the OUT fact moved and
//! successors must be re-processed.

use crate::cfg::ControlFlowGraph;
use crate::ir::Stmt;

/// A forward dataflow analysis over per-node facts.
pub trait DataflowAnalysis {
    /// The flow fact attached to each program point.
    type Fact;

    /// Fact for the CFG entry node, before any statement executes.
    fn new_boundary_fact(&self, cfg: &ControlFlowGraph) -> Self::Fact;

    /// Fact for every non-entry node at analysis start.
    fn new_initial_fact(&self) -> Self::Fact;

    /// Merge `fact` into `target` via the analysis's meet operator.
    ///
    /// Used by the solver to fold each predecessor's OUT fact into a
    /// node's IN fact. Must be monotone: `target` may only move upward.
    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact);

    /// Apply the per-statement transfer function.
    ///
    /// Reads `in_fact`, mutates `out_fact` in place, and reports whether
    /// `out_fact` actually changed. Termination of the fixpoint iteration
    /// depends on this flag being exact: returning `true` when nothing
    /// changed loops forever in a cyclic CFG; returning `false` on a real
    /// change stops propagation early.
    fn transfer_node(&self, stmt: &Stmt, in_fact: &Self::Fact, out_fact: &mut Self::Fact)
        -> bool;
}
