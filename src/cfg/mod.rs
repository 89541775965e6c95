//! Control Flow Graph types.
//!
//! A [`ControlFlowGraph`] holds one statement per node, an explicit edge
//! list, the procedure's entry/exit nodes and its ordered formal
//! parameters. Successor/predecessor lookups are O(1) after a lazily
//! built adjacency cache.
//!
//! This crate does not construct CFGs from source; a frontend (or a test
//! fixture) assembles them from [`crate::ir`] statements.

pub mod types;

pub use types::{AdjacencyCache, CfgEdge, CfgError, ControlFlowGraph, EdgeType, NodeId};
