//! Module driver: builds the declaration/constant index, seeds
//! intrinsics, discovers roots, and drives each root through the
//! specializer, handing the result to a `Backend`.

use lang_ast::Module;
use lang_common::{Location, Result, TypeError};
use lang_typeck::solver::PrimitiveSolver;
use lang_typeck::{PrimitiveKind, Solver, Specializer, Typeable};

use crate::backend::Backend;

/// How to pick the roots to specialize (§4.5 step 3; §9b).
pub enum RootMode {
    /// A single root, `main`, called with zero arguments and required
    /// to yield `Int64`.
    Program,
    /// Every declaration flagged `polymorphic = false` is a root,
    /// specialized with zero externally-known argument types (its own
    /// parameter count, each argument typeable starting unconstrained).
    Library,
}

/// Runs the full pipeline against `module`, handing every resulting
/// specialization to `backend` in the order its root was processed.
/// The first `TypeError` encountered aborts the whole run (§4.7: no
/// partial-result mode).
pub fn run(module: &Module, mode: RootMode, backend: &mut dyn Backend) -> Result<()> {
    let mut specializer = Specializer::from_module(module);
    lang_typeck::builtins::register_intrinsics(&mut specializer);

    match mode {
        RootMode::Program => {
            let main_loc = module
                .declarations
                .iter()
                .find(|d| d.name == "main")
                .map(|d| d.loc.clone())
                .unwrap_or_else(Location::synthetic);
            let yield_typeable = specializer.specialize("main", &[], &main_loc)?;
            let expect_int = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64)));
            yield_typeable.unify(&expect_int).map_err(|_| {
                TypeError::incompatible("'main' must yield Int64", main_loc.clone())
            })?;
        }
        RootMode::Library => {
            for decl in &module.declarations {
                if decl.polymorphic {
                    continue;
                }
                specializer.specialize_root(&decl.name)?;
            }
        }
    }

    for (callee, spec) in specializer.all_specializations() {
        let decl = module.declarations.iter().find(|d| d.name == callee);
        backend.emit(callee, spec, decl)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ReportingBackend;
    use lang_ast::builder;

    fn loc() -> lang_common::Location {
        builder::loc("t", 1, 1)
    }

    #[test]
    fn program_mode_runs_main_and_reports_add() {
        let main = builder::declaration(
            "main",
            vec![],
            builder::call("add", vec![builder::int_lit(1, loc()), builder::int_lit(2, loc())], loc()),
            false,
            loc(),
        );
        let module = Module { declarations: vec![main], constants: vec![] };

        let mut backend = ReportingBackend::new();
        run(&module, RootMode::Program, &mut backend).unwrap();

        let main_entry = backend.entries.iter().find(|e| e.callee == "main").unwrap();
        assert_eq!(main_entry.hash, "F0[i]");
        assert!(!main_entry.recursive);
    }

    #[test]
    fn program_mode_fails_when_main_does_not_yield_int() {
        let main = builder::declaration("main", vec![], builder::bool_lit(true, loc()), false, loc());
        let module = Module { declarations: vec![main], constants: vec![] };

        let mut backend = ReportingBackend::new();
        assert!(run(&module, RootMode::Program, &mut backend).is_err());
    }

    #[test]
    fn library_mode_root_with_unconstrained_param_is_indeterminate() {
        // f(x) = x -- body never constrains x to anything concrete.
        let f = builder::declaration("f", vec!["x"], builder::id_expr("x", loc()), false, loc());
        let module = Module { declarations: vec![f], constants: vec![] };

        let mut backend = ReportingBackend::new();
        assert!(run(&module, RootMode::Library, &mut backend).is_err());
    }

    #[test]
    fn library_mode_skips_polymorphic_declarations() {
        let helper = builder::declaration("helper", vec!["x"], builder::id_expr("x", loc()), true, loc());
        let module = Module { declarations: vec![helper], constants: vec![] };

        let mut backend = ReportingBackend::new();
        run(&module, RootMode::Library, &mut backend).unwrap();
        assert!(backend.entries.iter().all(|e| e.callee != "helper"));
    }
}
