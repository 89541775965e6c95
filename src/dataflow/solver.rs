//! Worklist fixpoint solver for forward dataflow analyses.
//!
//! The solver owns all control flow: it seeds the entry node's IN fact
//! with the analysis's boundary fact, every other fact with the initial
//! fact, then iterates a worklist until no transfer function reports a
//! change. Facts are mutated in place across iterations; each node owns
//! exactly one IN and one OUT fact for the duration of the run.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::cfg::{ControlFlowGraph, NodeId};
use crate::dataflow::framework::DataflowAnalysis;

/// Default iteration cap. Far above what the lattice height bound allows
/// a well-formed analysis to need; a guard against a broken change flag.
const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Result of a dataflow analysis run: IN/OUT facts per CFG node.
#[derive(Debug, Clone, Serialize)]
pub struct DataflowResult<F> {
    in_facts: FxHashMap<NodeId, F>,
    out_facts: FxHashMap<NodeId, F>,
    /// Number of worklist iterations until fixpoint.
    pub iterations: usize,
    /// Whether the run reached fixpoint (false only if the iteration cap
    /// was hit).
    pub converged: bool,
}

impl<F> DataflowResult<F> {
    /// Fact entering the given node.
    #[must_use]
    pub fn in_fact(&self, node: NodeId) -> Option<&F> {
        self.in_facts.get(&node)
    }

    /// Fact leaving the given node.
    #[must_use]
    pub fn out_fact(&self, node: NodeId) -> Option<&F> {
        self.out_facts.get(&node)
    }
}

/// Iterative worklist solver.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    max_iterations: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run `analysis` over `cfg` to fixpoint.
    ///
    /// Every node starts on the worklist. Per visit: merge all
    /// predecessors' OUT facts into the node's IN fact, apply the
    /// transfer function, and re-enqueue successors if the OUT fact
    /// changed.
    pub fn solve<A: DataflowAnalysis>(
        &self,
        analysis: &A,
        cfg: &ControlFlowGraph,
    ) -> DataflowResult<A::Fact> {
        let mut in_facts: FxHashMap<NodeId, A::Fact> = FxHashMap::default();
        let mut out_facts: FxHashMap<NodeId, A::Fact> = FxHashMap::default();

        let node_ids = cfg.node_ids();
        for &node in &node_ids {
            let in_fact = if node == cfg.entry {
                analysis.new_boundary_fact(cfg)
            } else {
                analysis.new_initial_fact()
            };
            in_facts.insert(node, in_fact);
            out_facts.insert(node, analysis.new_initial_fact());
        }

        let mut worklist: VecDeque<NodeId> = node_ids.into_iter().collect();
        let mut iterations = 0;
        let mut converged = true;

        while let Some(node) = worklist.pop_front() {
            iterations += 1;
            if iterations > self.max_iterations {
                debug!(
                    "dataflow solver hit iteration cap ({}) on {}",
                    self.max_iterations, cfg.function_name
                );
                converged = false;
                break;
            }

            // IN[node] := meet over OUT[pred] for all predecessors.
            for pred in cfg.predecessors(node) {
                if let Some(pred_out) = out_facts.get(pred) {
                    if let Some(in_fact) = in_facts.get_mut(&node) {
                        analysis.meet_into(pred_out, in_fact);
                    }
                }
            }

            let Some(stmt) = cfg.stmt(node) else { continue };
            let changed = match (in_facts.get(&node), out_facts.get_mut(&node)) {
                (Some(in_fact), Some(out_fact)) => {
                    analysis.transfer_node(stmt, in_fact, out_fact)
                }
                _ => false,
            };
            trace!("node {:?}: transfer changed={}", node, changed);

            if changed {
                for succ in cfg.successors(node) {
                    if !worklist.contains(succ) {
                        worklist.push_back(*succ);
                    }
                }
            }
        }

        debug!(
            "dataflow solve of {} finished: {} iterations, converged={}",
            cfg.function_name, iterations, converged
        );

        DataflowResult {
            in_facts,
            out_facts,
            iterations,
            converged,
        }
    }
}
