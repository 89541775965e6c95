//! End-to-end constant propagation scenarios over the worklist solver.

use constprop::cfg::NodeId;
use constprop::ir::{ArithOp, BinaryOp, Exp, PrimitiveType, ShiftOp, Type, Var};
use constprop::{ConstantPropagation, DataflowAnalysis, Solver, Value};

use crate::fixtures::{
    branch_cfg, linear_cfg, loop_cfg, mixed_params_cfg, single_assign_cfg,
};

#[test]
fn test_linear_program_folds_constants() {
    let cfg = linear_cfg();
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);
    assert!(result.converged);

    // after z = x + y
    let fact = result.out_fact(NodeId(3)).unwrap();
    assert_eq!(fact.get(&Var::int("x")), Value::Constant(1));
    assert_eq!(fact.get(&Var::int("y")), Value::Constant(2));
    assert_eq!(fact.get(&Var::int("z")), Value::Constant(3));
}

#[test]
fn test_branch_merge_conflicting_constants() {
    // one arm sets x = 1, the other x = 2: NAC at the join
    let cfg = branch_cfg(1, 2);
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);
    assert!(result.converged);

    let join_in = result.in_fact(NodeId(4)).unwrap();
    assert_eq!(join_in.get(&Var::int("x")), Value::Nac);
}

#[test]
fn test_branch_merge_same_constant_stays_constant() {
    let cfg = branch_cfg(7, 7);
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);

    let join_in = result.in_fact(NodeId(4)).unwrap();
    assert_eq!(join_in.get(&Var::int("x")), Value::Constant(7));
}

#[test]
fn test_loop_variable_becomes_nac() {
    let cfg = loop_cfg();
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);
    assert!(result.converged);

    // i is 0 on entry to the loop and incremented in the body; at the
    // header the two definitions merge to NAC, and that reaches the return.
    let at_return = result.out_fact(NodeId(4)).unwrap();
    assert_eq!(at_return.get(&Var::int("i")), Value::Nac);

    // the caller-controlled bound stays NAC throughout
    let header_in = result.in_fact(NodeId(2)).unwrap();
    assert_eq!(header_in.get(&Var::int("n")), Value::Nac);
}

#[test]
fn test_boundary_fact_marks_tracked_params_nac() {
    let cfg = mixed_params_cfg();
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);

    let entry_out = result.out_fact(NodeId(0)).unwrap();
    assert_eq!(entry_out.get(&Var::int("a")), Value::Nac);
    // the float parameter is never tracked
    assert_eq!(
        entry_out.get(&Var::new("b", Type::Primitive(PrimitiveType::Float))),
        Value::Undef
    );
    assert_eq!(entry_out.len(), 1);
}

#[test]
fn test_division_by_zero_yields_no_information() {
    // x = 10 / 0: the binding evaluates to Undef (absent), not NAC
    let cfg = single_assign_cfg(
        Exp::binary(
            BinaryOp::Arith(ArithOp::Div),
            Exp::IntLiteral(10),
            Exp::IntLiteral(0),
        ),
        vec![],
    );
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);

    let at_return = result.out_fact(NodeId(2)).unwrap();
    assert_eq!(at_return.get(&Var::int("x")), Value::Undef);
}

#[test]
fn test_shift_distance_wraps_end_to_end() {
    // x = 5 << 33 folds with the masked distance: 5 << 1 = 10
    let cfg = single_assign_cfg(
        Exp::binary(
            BinaryOp::Shift(ShiftOp::Shl),
            Exp::IntLiteral(5),
            Exp::IntLiteral(33),
        ),
        vec![],
    );
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);

    let at_return = result.out_fact(NodeId(2)).unwrap();
    assert_eq!(at_return.get(&Var::int("x")), Value::Constant(10));
}

#[test]
fn test_param_arithmetic_is_nac() {
    // x = p + 1 with caller-controlled p
    let p = Var::int("p");
    let cfg = single_assign_cfg(
        Exp::binary(
            BinaryOp::Arith(ArithOp::Add),
            Exp::Var(p.clone()),
            Exp::IntLiteral(1),
        ),
        vec![p],
    );
    let result = Solver::new().solve(&ConstantPropagation::new(), &cfg);

    let at_return = result.out_fact(NodeId(2)).unwrap();
    assert_eq!(at_return.get(&Var::int("x")), Value::Nac);
}

#[test]
fn test_transfer_idempotent_at_fixpoint() {
    // once the solver converges, re-running the transfer function on any
    // node with its stable IN fact must report no change
    let analysis = ConstantPropagation::new();
    for cfg in [linear_cfg(), branch_cfg(1, 2), loop_cfg()] {
        let result = Solver::new().solve(&analysis, &cfg);
        assert!(result.converged);

        for node in cfg.node_ids() {
            let stmt = cfg.stmt(node).unwrap();
            let in_fact = result.in_fact(node).unwrap();
            let mut out_fact = result.out_fact(node).unwrap().clone();
            let snapshot = out_fact.clone();

            assert!(
                !analysis.transfer_node(stmt, in_fact, &mut out_fact),
                "node {node:?} in {} not at fixpoint",
                cfg.function_name
            );
            assert_eq!(out_fact, snapshot);
        }
    }
}
