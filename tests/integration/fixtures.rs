//! CFG fixtures shared by the integration test modules.

use rustc_hash::FxHashMap;

use constprop::cfg::{CfgEdge, ControlFlowGraph, EdgeType, NodeId};
use constprop::ir::{ArithOp, BinaryOp, CondOp, Exp, LValue, Stmt, Type, Var};

pub fn assign(var: &Var, value: Exp) -> Stmt {
    Stmt::Assign {
        target: LValue::Var(var.clone()),
        value,
    }
}

pub fn add(lhs: Exp, rhs: Exp) -> Exp {
    Exp::binary(BinaryOp::Arith(ArithOp::Add), lhs, rhs)
}

/// `entry; x = 1; y = 2; z = x + y; return z`
pub fn linear_cfg() -> ControlFlowGraph {
    let x = Var::int("x");
    let y = Var::int("y");
    let z = Var::int("z");

    let mut nodes = FxHashMap::default();
    nodes.insert(NodeId(0), Stmt::Nop);
    nodes.insert(NodeId(1), assign(&x, Exp::IntLiteral(1)));
    nodes.insert(NodeId(2), assign(&y, Exp::IntLiteral(2)));
    nodes.insert(
        NodeId(3),
        assign(&z, add(Exp::Var(x), Exp::Var(y))),
    );
    nodes.insert(
        NodeId(4),
        Stmt::Return {
            value: Some(Exp::Var(z)),
        },
    );

    ControlFlowGraph::new(
        "linear".to_string(),
        nodes,
        vec![
            CfgEdge::unconditional(NodeId(0), NodeId(1)),
            CfgEdge::unconditional(NodeId(1), NodeId(2)),
            CfgEdge::unconditional(NodeId(2), NodeId(3)),
            CfgEdge::unconditional(NodeId(3), NodeId(4)),
        ],
        NodeId(0),
        vec![NodeId(4)],
        vec![],
    )
}

/// `entry; if p > 0 { x = <then> } else { x = <els> }; return x`
///
/// Node 4 is the join/return node.
pub fn branch_cfg(then_value: i32, else_value: i32) -> ControlFlowGraph {
    let p = Var::int("p");
    let x = Var::int("x");

    let mut nodes = FxHashMap::default();
    nodes.insert(NodeId(0), Stmt::Nop);
    nodes.insert(
        NodeId(1),
        Stmt::If {
            condition: Exp::binary(
                BinaryOp::Cond(CondOp::Gt),
                Exp::Var(p.clone()),
                Exp::IntLiteral(0),
            ),
        },
    );
    nodes.insert(NodeId(2), assign(&x, Exp::IntLiteral(then_value)));
    nodes.insert(NodeId(3), assign(&x, Exp::IntLiteral(else_value)));
    nodes.insert(
        NodeId(4),
        Stmt::Return {
            value: Some(Exp::Var(x)),
        },
    );

    ControlFlowGraph::new(
        "branch".to_string(),
        nodes,
        vec![
            CfgEdge::unconditional(NodeId(0), NodeId(1)),
            CfgEdge::new(NodeId(1), NodeId(2), EdgeType::True),
            CfgEdge::new(NodeId(1), NodeId(3), EdgeType::False),
            CfgEdge::unconditional(NodeId(2), NodeId(4)),
            CfgEdge::unconditional(NodeId(3), NodeId(4)),
        ],
        NodeId(0),
        vec![NodeId(4)],
        vec![p],
    )
}

/// `entry; i = 0; while i < n { i = i + 1 }; return i`
///
/// Node 2 is the loop header, node 4 the return node.
pub fn loop_cfg() -> ControlFlowGraph {
    let n = Var::int("n");
    let i = Var::int("i");

    let mut nodes = FxHashMap::default();
    nodes.insert(NodeId(0), Stmt::Nop);
    nodes.insert(NodeId(1), assign(&i, Exp::IntLiteral(0)));
    nodes.insert(
        NodeId(2),
        Stmt::If {
            condition: Exp::binary(
                BinaryOp::Cond(CondOp::Lt),
                Exp::Var(i.clone()),
                Exp::Var(n.clone()),
            ),
        },
    );
    nodes.insert(
        NodeId(3),
        assign(&i, add(Exp::Var(i.clone()), Exp::IntLiteral(1))),
    );
    nodes.insert(
        NodeId(4),
        Stmt::Return {
            value: Some(Exp::Var(i)),
        },
    );

    ControlFlowGraph::new(
        "count".to_string(),
        nodes,
        vec![
            CfgEdge::unconditional(NodeId(0), NodeId(1)),
            CfgEdge::unconditional(NodeId(1), NodeId(2)),
            CfgEdge::new(NodeId(2), NodeId(3), EdgeType::True),
            CfgEdge::new(NodeId(3), NodeId(2), EdgeType::BackEdge),
            CfgEdge::new(NodeId(2), NodeId(4), EdgeType::False),
        ],
        NodeId(0),
        vec![NodeId(4)],
        vec![n],
    )
}

/// `entry; x = <value>; return x` with the given parameters.
pub fn single_assign_cfg(value: Exp, params: Vec<Var>) -> ControlFlowGraph {
    let x = Var::int("x");
    let mut nodes = FxHashMap::default();
    nodes.insert(NodeId(0), Stmt::Nop);
    nodes.insert(NodeId(1), assign(&x, value));
    nodes.insert(
        NodeId(2),
        Stmt::Return {
            value: Some(Exp::Var(x)),
        },
    );

    ControlFlowGraph::new(
        "single".to_string(),
        nodes,
        vec![
            CfgEdge::unconditional(NodeId(0), NodeId(1)),
            CfgEdge::unconditional(NodeId(1), NodeId(2)),
        ],
        NodeId(0),
        vec![NodeId(2)],
        params,
    )
}

/// A procedure with one tracked and one untracked parameter and an empty
/// body: `entry; return`.
pub fn mixed_params_cfg() -> ControlFlowGraph {
    let mut nodes = FxHashMap::default();
    nodes.insert(NodeId(0), Stmt::Nop);
    nodes.insert(NodeId(1), Stmt::Return { value: None });

    ControlFlowGraph::new(
        "mixed".to_string(),
        nodes,
        vec![CfgEdge::unconditional(NodeId(0), NodeId(1))],
        NodeId(0),
        vec![NodeId(1)],
        vec![
            Var::int("a"),
            Var::new("b", Type::Primitive(constprop::ir::PrimitiveType::Float)),
        ],
    )
}
