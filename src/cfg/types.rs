//! CFG type definitions.

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ir::{Stmt, Var};

/// Cached adjacency lists for O(1) successor/predecessor lookups.
///
/// Built lazily on first access to avoid overhead when not needed.
/// NOTE: public only because it appears in `ControlFlowGraph`; it is an
/// internal implementation detail.
#[derive(Debug)]
pub struct AdjacencyCache {
    /// NodeId -> list of successor NodeIds (outgoing edges)
    successors: FxHashMap<NodeId, Vec<NodeId>>,
    /// NodeId -> list of predecessor NodeIds (incoming edges)
    predecessors: FxHashMap<NodeId, Vec<NodeId>>,
}

/// Errors that can occur during CFG validation.
///
/// These errors indicate structural inconsistencies in the control flow
/// graph that would cause issues during analysis.
#[derive(Debug, thiserror::Error)]
pub enum CfgError {
    /// Entry node ID does not exist in the node map.
    #[error("Entry node {0:?} not found in nodes")]
    InvalidEntry(NodeId),

    /// An exit node ID does not exist in the node map.
    #[error("Exit node {0:?} not found in nodes")]
    InvalidExit(NodeId),

    /// An edge references a node that does not exist.
    #[error("Edge references non-existent node {0:?}")]
    InvalidEdgeNode(NodeId),
}

/// Unique identifier for a CFG node. Nodes are statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Semantic type of a CFG edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Unconditional edge (fallthrough, sequential)
    Unconditional,
    /// True branch of a conditional
    True,
    /// False branch of a conditional
    False,
    /// Back edge in a loop
    BackEdge,
}

impl EdgeType {
    /// Get the default display label for this edge type.
    #[must_use]
    pub fn default_label(&self) -> &'static str {
        match self {
            EdgeType::Unconditional => "",
            EdgeType::True => "true",
            EdgeType::False => "false",
            EdgeType::BackEdge => "back_edge",
        }
    }
}

/// A directed edge between two CFG nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub edge_type: EdgeType,
}

impl CfgEdge {
    #[must_use]
    pub fn new(from: NodeId, to: NodeId, edge_type: EdgeType) -> Self {
        Self {
            from,
            to,
            edge_type,
        }
    }

    /// Create an unconditional edge.
    #[must_use]
    pub fn unconditional(from: NodeId, to: NodeId) -> Self {
        Self::new(from, to, EdgeType::Unconditional)
    }
}

/// Statement-level control flow graph for a single procedure.
///
/// Each node holds exactly one [`Stmt`]; edges are possible execution
/// transitions. The entry node is a virtual [`Stmt::Nop`] preceding the
/// first real statement, so boundary facts attach to a node that defines
/// nothing.
#[derive(Debug)]
pub struct ControlFlowGraph {
    /// Name of the procedure this CFG represents
    pub function_name: String,
    /// Map of node IDs to statements
    pub nodes: FxHashMap<NodeId, Stmt>,
    /// Edges connecting nodes
    pub edges: Vec<CfgEdge>,
    /// Entry node ID
    pub entry: NodeId,
    /// Exit node IDs
    pub exits: Vec<NodeId>,
    /// Ordered formal parameters of the procedure
    params: Vec<Var>,
    /// Lazily built adjacency lists
    adjacency_cache: OnceCell<AdjacencyCache>,
}

impl ControlFlowGraph {
    /// Create a new CFG.
    ///
    /// This constructor handles the internal adjacency cache
    /// initialization. Use this instead of struct literal syntax.
    #[must_use]
    pub fn new(
        function_name: String,
        nodes: FxHashMap<NodeId, Stmt>,
        edges: Vec<CfgEdge>,
        entry: NodeId,
        exits: Vec<NodeId>,
        params: Vec<Var>,
    ) -> Self {
        Self {
            function_name,
            nodes,
            edges,
            entry,
            exits,
            params,
            adjacency_cache: OnceCell::new(),
        }
    }

    /// Ordered formal parameters of the procedure.
    #[must_use]
    pub fn params(&self) -> &[Var] {
        &self.params
    }

    /// Statement attached to a node, if the node exists.
    #[must_use]
    pub fn stmt(&self, node: NodeId) -> Option<&Stmt> {
        self.nodes.get(&node)
    }

    /// All node IDs, in ascending order for deterministic iteration.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Build adjacency cache from edges (called once, lazily).
    ///
    /// Scans all edges once to build both successor and predecessor maps.
    fn build_adjacency(&self) -> AdjacencyCache {
        let mut successors: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        let mut predecessors: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();

        for edge in &self.edges {
            successors.entry(edge.from).or_default().push(edge.to);
            predecessors.entry(edge.to).or_default().push(edge.from);
        }

        AdjacencyCache {
            successors,
            predecessors,
        }
    }

    /// Get the adjacency cache, building it if necessary.
    #[inline]
    fn adjacency(&self) -> &AdjacencyCache {
        self.adjacency_cache.get_or_init(|| self.build_adjacency())
    }

    /// Get successors of a node (outgoing edges).
    ///
    /// First call triggers O(E) cache construction; subsequent calls are
    /// O(1).
    #[must_use]
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency()
            .successors
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get predecessors of a node (incoming edges).
    ///
    /// First call triggers O(E) cache construction; subsequent calls are
    /// O(1).
    #[must_use]
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency()
            .predecessors
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Validate structural consistency.
    ///
    /// Checks that the entry node, every exit node, and both endpoints of
    /// every edge exist in the node map.
    pub fn validate(&self) -> Result<(), CfgError> {
        if !self.nodes.contains_key(&self.entry) {
            return Err(CfgError::InvalidEntry(self.entry));
        }
        for exit in &self.exits {
            if !self.nodes.contains_key(exit) {
                return Err(CfgError::InvalidExit(*exit));
            }
        }
        for edge in &self.edges {
            if !self.nodes.contains_key(&edge.from) {
                return Err(CfgError::InvalidEdgeNode(edge.from));
            }
            if !self.nodes.contains_key(&edge.to) {
                return Err(CfgError::InvalidEdgeNode(edge.to));
            }
        }
        Ok(())
    }
}
