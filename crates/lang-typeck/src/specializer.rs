//! Monomorphizing specializer: one `Specialization` per distinct
//! argument-typeable shape seen for a given callee.
//!
//! `specialize` is the sole entry point the annotator calls for both
//! `Invocation` callees and `IdExpression` constant lookups (arity 0).
//! Resolution order for a name with no existing matching specialization
//! is: declaration index, then constant index; failing both, and with
//! no external specialization matching either, `ID_UNDECLARED`.

use rustc_hash::FxHashMap;

use lang_ast::{ConstantDecl, Declaration, Module, NodeId};
use lang_common::{Location, Result, TypeError};

use crate::env::Env;
use crate::solver::{FunctionSolver, Solver};
use crate::typeable::Typeable;

/// One monomorphized instance of a callee: the typeable recording its
/// argument/yield shape, and every AST node visited while body-typing
/// it, keyed by `NodeId` for the back-end.
pub struct Specialization {
    pub func_typeable: Typeable,
    pub typeables: FxHashMap<NodeId, Typeable>,
}

#[derive(Default)]
pub struct Specializer {
    declarations: FxHashMap<String, Declaration>,
    constants: FxHashMap<String, ConstantDecl>,
    specializations: FxHashMap<String, Vec<Specialization>>,
}

impl Specializer {
    pub fn new() -> Self {
        Specializer::default()
    }

    pub fn from_module(module: &Module) -> Self {
        let mut s = Specializer::new();
        for decl in &module.declarations {
            s.declarations.insert(decl.name.clone(), decl.clone());
        }
        for constant in &module.constants {
            s.constants.insert(constant.name.clone(), constant.clone());
        }
        s
    }

    /// Registers a pre-solved `Function` typeable as an existing
    /// specialization, with no declaration body to re-type. Used for
    /// intrinsics (`lang-typeck::builtins`) and any other `Backend`
    /// that needs to seed external specializations directly.
    ///
    /// `func_typeable` must already be rooted at a solvable `Function`
    /// solver -- this is public API, so an unsolvable or non-`Function`
    /// root is rejected rather than silently corrupting the
    /// specialization map's orthogonality invariant.
    pub fn add_external(&mut self, name: &str, func_typeable: Typeable) -> Result<()> {
        if !func_typeable.is_function() {
            return Err(TypeError::indeterminate(
                format!("external specialization for '{name}' is not rooted at a Function solver"),
                Location::synthetic(),
            ));
        }
        if !func_typeable.is_solvable() {
            return Err(TypeError::indeterminate(
                format!("external specialization for '{name}' is not solvable"),
                Location::synthetic(),
            ));
        }
        self.specializations
            .entry(name.to_string())
            .or_default()
            .push(Specialization { func_typeable, typeables: FxHashMap::default() });
        Ok(())
    }

    pub fn external_count(&self, name: &str) -> usize {
        self.specializations.get(name).map(Vec::len).unwrap_or(0)
    }

    pub fn specializations_for(&self, name: &str) -> &[Specialization] {
        self.specializations.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_specializations(&self) -> impl Iterator<Item = (&str, &Specialization)> {
        self.specializations.iter().flat_map(|(name, specs)| specs.iter().map(move |s| (name.as_str(), s)))
    }

    /// Resolves `callee` against `arg_typeables`, returning a yield
    /// typeable in the same equivalence class as whichever
    /// specialization ends up matching.
    pub fn specialize(&mut self, callee: &str, arg_typeables: &[Typeable], call_loc: &Location) -> Result<Typeable> {
        for arg in arg_typeables {
            if !arg.is_solvable() {
                return Err(TypeError::indeterminate(
                    format!("argument to '{callee}' has no determinable type at this call site"),
                    call_loc.clone(),
                ));
            }
        }

        let fresh_solver = FunctionSolver::new(arg_typeables.len());
        let fresh_args = fresh_solver.args.clone();
        let fresh_yield = fresh_solver.yields.clone();
        for (fresh_arg, caller_arg) in fresh_args.iter().zip(arg_typeables) {
            fresh_arg.unify(caller_arg)?;
        }
        let fresh_func = Typeable::with_solver(Solver::Function(fresh_solver));

        if let Some(existing) = self.specializations.get(callee) {
            for spec in existing {
                if fresh_func.unify(&spec.func_typeable).is_ok() {
                    return Ok(fresh_yield);
                }
            }
        }

        if let Some(decl) = self.declarations.get(callee).cloned() {
            if decl.params.len() != fresh_args.len() {
                return Err(TypeError::incompatible(
                    format!(
                        "'{callee}' takes {} argument(s), called with {}",
                        decl.params.len(),
                        fresh_args.len()
                    ),
                    call_loc.clone(),
                ));
            }
            let idx = self.push_in_progress(callee, fresh_func.clone());
            let mut node_typeables = FxHashMap::default();
            let mut env = Env::new();
            for (param, arg_typeable) in decl.params.iter().zip(fresh_args.iter()) {
                env.bind(param.clone(), arg_typeable.clone());
            }
            let body_typeable = crate::infer::annotate(&decl.body, &mut env, self, &mut node_typeables)?;
            fresh_yield.unify(&body_typeable)?;
            self.finish_in_progress(callee, idx, node_typeables);
            return Ok(fresh_yield);
        }

        if let Some(constant) = self.constants.get(callee).cloned() {
            if !fresh_args.is_empty() {
                return Err(TypeError::incompatible(
                    format!("'{callee}' is a constant and takes no arguments"),
                    call_loc.clone(),
                ));
            }
            let idx = self.push_in_progress(callee, fresh_func.clone());
            let mut node_typeables = FxHashMap::default();
            let mut env = Env::new();
            let value_typeable = crate::infer::annotate(&constant.value, &mut env, self, &mut node_typeables)?;
            fresh_yield.unify(&value_typeable)?;
            self.finish_in_progress(callee, idx, node_typeables);
            return Ok(fresh_yield);
        }

        Err(TypeError::undeclared(callee, call_loc.clone()))
    }

    /// Specializes a library-mode root (§9b): `name`'s parameter
    /// typeables start fully unconstrained rather than unified against
    /// caller-supplied types, since there is no call site. Unlike
    /// `specialize`, this never checks for an existing matching
    /// specialization (a root is only ever specialized once) and never
    /// pre-checks argument solvability (the whole point is to let the
    /// body constrain its own parameters, or fail `TYPE_INDETERMINATE`
    /// if it never does).
    pub fn specialize_root(&mut self, name: &str) -> Result<Typeable> {
        let decl = self
            .declarations
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::undeclared(name, Location::synthetic()))?;

        let fresh_solver = FunctionSolver::new(decl.params.len());
        let fresh_args = fresh_solver.args.clone();
        let fresh_yield = fresh_solver.yields.clone();
        let fresh_func = Typeable::with_solver(Solver::Function(fresh_solver));

        let idx = self.push_in_progress(name, fresh_func);
        let mut node_typeables = FxHashMap::default();
        let mut env = Env::new();
        for (param, arg_typeable) in decl.params.iter().zip(fresh_args.iter()) {
            env.bind(param.clone(), arg_typeable.clone());
        }
        let body_typeable = crate::infer::annotate(&decl.body, &mut env, self, &mut node_typeables)?;
        fresh_yield.unify(&body_typeable)?;
        self.finish_in_progress(name, idx, node_typeables);
        Ok(fresh_yield)
    }

    fn push_in_progress(&mut self, callee: &str, func_typeable: Typeable) -> usize {
        let list = self.specializations.entry(callee.to_string()).or_default();
        list.push(Specialization { func_typeable, typeables: FxHashMap::default() });
        list.len() - 1
    }

    fn finish_in_progress(&mut self, callee: &str, idx: usize, node_typeables: FxHashMap<NodeId, Typeable>) {
        self.specializations.get_mut(callee).expect("just pushed")[idx].typeables = node_typeables;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::PrimitiveSolver;
    use crate::ty::PrimitiveKind;
    use lang_ast::builder;

    fn int_typeable() -> Typeable {
        Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64)))
    }

    #[test]
    fn add_external_rejects_non_function_root() {
        let mut s = Specializer::new();
        let err = s.add_external("not_a_fn", int_typeable()).unwrap_err();
        assert_eq!(err.code, lang_common::ErrorCode::TypeIndeterminate);
        assert_eq!(s.external_count("not_a_fn"), 0);
    }

    #[test]
    fn add_external_rejects_unsolvable_function_root() {
        let solver = FunctionSolver::new(1);
        let func_typeable = Typeable::with_solver(Solver::Function(solver));
        let mut s = Specializer::new();
        let err = s.add_external("unsolved", func_typeable).unwrap_err();
        assert_eq!(err.code, lang_common::ErrorCode::TypeIndeterminate);
        assert_eq!(s.external_count("unsolved"), 0);
    }

    #[test]
    fn add_external_accepts_solved_function_root() {
        let solver = FunctionSolver::new(1);
        solver.args[0].unify(&int_typeable()).unwrap();
        solver.yields.unify(&int_typeable()).unwrap();
        let func_typeable = Typeable::with_solver(Solver::Function(solver));
        let mut s = Specializer::new();
        s.add_external("id", func_typeable).unwrap();
        assert_eq!(s.external_count("id"), 1);
    }

    #[test]
    fn undeclared_callee_fails() {
        let mut s = Specializer::new();
        let err = s.specialize("nope", &[], &Location::synthetic()).unwrap_err();
        assert_eq!(err.code, lang_common::ErrorCode::IdUndeclared);
    }

    #[test]
    fn repeated_call_with_same_shape_reuses_specialization() {
        let loc = builder::loc("t", 1, 1);
        let decl = builder::declaration("id", vec!["x"], builder::id_expr("x", loc.clone()), true, loc.clone());
        let module = lang_ast::Module { declarations: vec![decl], constants: vec![] };
        let mut s = Specializer::from_module(&module);

        let y1 = s.specialize("id", &[int_typeable()], &loc).unwrap();
        let y2 = s.specialize("id", &[int_typeable()], &loc).unwrap();
        assert!(y1.same_class(&y2));
        assert_eq!(s.specializations_for("id").len(), 1);
    }

    #[test]
    fn specialization_map_report_snapshot() {
        let loc = builder::loc("t", 1, 1);
        let id = builder::declaration("id", vec!["x"], builder::id_expr("x", loc.clone()), true, loc.clone());
        let wrap = builder::declaration(
            "wrap",
            vec!["y"],
            builder::call("id", vec![builder::id_expr("y", loc.clone())], loc.clone()),
            true,
            loc.clone(),
        );
        let module = lang_ast::Module { declarations: vec![id, wrap], constants: vec![] };
        let mut s = Specializer::from_module(&module);

        s.specialize("wrap", &[int_typeable()], &loc).unwrap();

        let mut report: Vec<String> = Vec::new();
        for callee in ["id", "wrap"] {
            for spec in s.specializations_for(callee) {
                report.push(format!("{callee}: {}", spec.func_typeable.solve().unwrap().hash()));
            }
        }
        insta::assert_snapshot!(report.join("\n"), @r"
        id: F1[i][i]
        wrap: F1[i][i]
        ");
    }
}
