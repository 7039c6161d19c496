//! Intrinsic registration: the handful of callables whose type
//! signatures are pre-materialized rather than inferred from a
//! declaration body, since their implementation lives in the back-end.

use crate::solver::{FunctionSolver, PrimitiveSolver, Solver};
use crate::specializer::Specializer;
use crate::ty::PrimitiveKind;
use crate::typeable::Typeable;

/// Builds a `Function` typeable pinned to exactly `arg_kinds -> yield_kind`
/// and already solved (intrinsics never need re-inference).
fn signature(arg_kinds: &[PrimitiveKind], yield_kind: PrimitiveKind) -> Typeable {
    let solver = FunctionSolver::new(arg_kinds.len());
    for (arg_typeable, kind) in solver.args.iter().zip(arg_kinds) {
        let pinned = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(*kind)));
        arg_typeable.unify(&pinned).expect("primitive typeables always unify with a fresh root");
    }
    let pinned_yield = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(yield_kind)));
    solver.yields.unify(&pinned_yield).expect("primitive typeables always unify with a fresh root");
    Typeable::with_solver(Solver::Function(solver))
}

/// Registers `is`, `mod`, and `add` as external specializations on
/// `specializer`. `is` gets two signatures (int and bool equality); the
/// specializer's first-match-wins resolution handles dispatch between
/// them at each call site.
pub fn register_intrinsics(specializer: &mut Specializer) {
    let signatures = [
        ("is", signature(&[PrimitiveKind::Int64, PrimitiveKind::Int64], PrimitiveKind::Bool)),
        ("is", signature(&[PrimitiveKind::Bool, PrimitiveKind::Bool], PrimitiveKind::Bool)),
        ("mod", signature(&[PrimitiveKind::Int64, PrimitiveKind::Int64], PrimitiveKind::Int64)),
        ("add", signature(&[PrimitiveKind::Int64, PrimitiveKind::Int64], PrimitiveKind::Int64)),
    ];
    for (name, sig) in signatures {
        specializer.add_external(name, sig).expect("intrinsic signatures are always solvable Function typeables");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_solves_to_expected_function_type() {
        let add_sig = signature(&[PrimitiveKind::Int64, PrimitiveKind::Int64], PrimitiveKind::Int64);
        let ty = add_sig.solve().unwrap();
        assert_eq!(ty.hash(), "F2[i][i][i]");
    }

    #[test]
    fn is_registers_two_signatures() {
        let mut specializer = Specializer::new();
        register_intrinsics(&mut specializer);
        assert_eq!(specializer.external_count("is"), 2);
        assert_eq!(specializer.external_count("add"), 1);
    }
}
