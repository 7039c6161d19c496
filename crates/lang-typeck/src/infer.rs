//! Expression annotator: walks an AST subtree, producing a `Typeable`
//! per node and recording it in the active specialization's
//! `TypeableMap`.

use rustc_hash::FxHashMap;

use lang_ast::{Expr, NodeId};
use lang_common::{Location, Result};

use crate::env::Env;
use crate::solver::{DisjointSolver, PrimitiveSolver, Solver, TupleSolver};
use crate::specializer::Specializer;
use crate::ty::PrimitiveKind;
use crate::typeable::Typeable;

/// Annotates `expr`, recording every visited node's typeable into
/// `typeables`. Errors raised deep inside a solver carry a synthetic
/// location (solvers don't know about AST nodes); those are
/// reattributed to `expr`'s own location so the diagnostic points
/// somewhere useful.
pub fn annotate(
    expr: &Expr,
    env: &mut Env,
    specializer: &mut Specializer,
    typeables: &mut FxHashMap<NodeId, Typeable>,
) -> Result<Typeable> {
    let loc = expr.loc().clone();
    annotate_inner(expr, env, specializer, typeables)
        .map_err(|e| if e.location == Location::synthetic() { e.at(loc) } else { e })
}

fn annotate_inner(
    expr: &Expr,
    env: &mut Env,
    specializer: &mut Specializer,
    typeables: &mut FxHashMap<NodeId, Typeable>,
) -> Result<Typeable> {
    match expr {
        Expr::Id(e) => {
            let resolved = match env.lookup(&e.name) {
                Some(t) => t,
                None => specializer.specialize(&e.name, &[], &e.loc)?,
            };
            let fresh = Typeable::unconstrained();
            fresh.unify(&resolved)?;
            typeables.insert(e.id, fresh.clone());
            Ok(fresh)
        }

        Expr::IntLit(e) => {
            let t = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64)));
            typeables.insert(e.id, t.clone());
            Ok(t)
        }

        Expr::StrLit(e) => {
            let t = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::String)));
            typeables.insert(e.id, t.clone());
            Ok(t)
        }

        Expr::BoolLit(e) => {
            let t = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Bool)));
            typeables.insert(e.id, t.clone());
            Ok(t)
        }

        Expr::Invocation(e) => {
            let arg_typeables = e
                .args
                .iter()
                .map(|arg| annotate(arg, env, specializer, typeables))
                .collect::<Result<Vec<_>>>()?;
            let yield_typeable = specializer.specialize(&e.callee, &arg_typeables, &e.loc)?;
            typeables.insert(e.id, yield_typeable.clone());
            Ok(yield_typeable)
        }

        Expr::Guard(e) => {
            let mut case_typeables = Vec::with_capacity(e.cases.len());
            for case in &e.cases {
                if let Some(cond) = &case.condition {
                    let cond_typeable = annotate(cond, env, specializer, typeables)?;
                    let expect_bool =
                        Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Bool)));
                    cond_typeable.unify(&expect_bool)?;
                }
                case_typeables.push(annotate(&case.value, env, specializer, typeables)?);
            }
            let result = unify_into_groups(&case_typeables);
            typeables.insert(e.id, result.clone());
            Ok(result)
        }

        Expr::Bind(e) => {
            let value_typeable = annotate(&e.value, env, specializer, typeables)?;
            env.push_scope();
            env.bind(e.name.clone(), value_typeable);
            let body_typeable = annotate(&e.body, env, specializer, typeables);
            env.pop_scope();
            let body_typeable = body_typeable?;
            typeables.insert(e.id, body_typeable.clone());
            Ok(body_typeable)
        }

        Expr::Tuple(e) => {
            let mut solver = TupleSolver::new(e.items.len());
            for (i, item) in e.items.iter().enumerate() {
                if let Some(tag) = &item.tag {
                    solver.tag_item(i, tag)?;
                }
            }
            // Grab the solver's own item typeables before it moves into
            // a `Typeable` -- they're `Rc` clones of the same nodes the
            // solver holds, so unifying through them still reaches the
            // solver `result` is rooted at.
            let item_slots: Vec<Typeable> = solver.items.iter().map(|(_, t)| t.clone()).collect();
            let result = Typeable::with_solver(Solver::Tuple(solver));
            for (i, item) in e.items.iter().enumerate() {
                let item_typeable = annotate(&item.value, env, specializer, typeables)?;
                item_slots[i].unify(&item_typeable)?;
            }
            typeables.insert(e.id, result.clone());
            Ok(result)
        }
    }
}

/// Attempts to unify all of `cases` into a single equivalence class.
/// Where two cases are structurally incompatible, falls back to
/// partitioning them into maximal mutually-unifiable groups (first-seen
/// order), returning either the sole group's representative or a fresh
/// typeable backed by a `Disjoint` solver over one representative per
/// group.
fn unify_into_groups(cases: &[Typeable]) -> Typeable {
    for i in 0..cases.len() {
        for j in (i + 1)..cases.len() {
            let _ = cases[i].unify(&cases[j]);
        }
    }

    let mut representatives: Vec<Typeable> = Vec::new();
    for case in cases {
        if !representatives.iter().any(|r| r.same_class(case)) {
            representatives.push(case.clone());
        }
    }

    if representatives.len() == 1 {
        representatives.into_iter().next().unwrap()
    } else {
        let mut disjoint = DisjointSolver::new();
        for rep in representatives {
            disjoint.add(rep);
        }
        Typeable::with_solver(Solver::Disjoint(disjoint))
    }
}
