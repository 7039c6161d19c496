//! The trait boundary between the type-inference core and a real
//! back-end (instruction selection, register allocation, object-file
//! emission) -- all of which remain external collaborators.

use lang_ast::Declaration;
use lang_common::Result;
use lang_typeck::Specialization;

/// Consumes one `Specialization` at a time as the driver finishes
/// typing each root's call graph.
///
/// `decl` is `None` for an intrinsic (no declaration body ever
/// existed) and for a module-level constant (see
/// `ConstantDecl` in `lang-ast`, which is not a `Declaration`).
pub trait Backend {
    fn emit(&mut self, callee: &str, spec: &Specialization, decl: Option<&Declaration>) -> Result<()>;
}

/// A reference `Backend` that performs no code generation: it just
/// records what it was told, for tests and for `langc`'s stdout
/// report.
#[derive(Default)]
pub struct ReportingBackend {
    pub entries: Vec<ReportEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ReportEntry {
    pub callee: String,
    pub hash: String,
    pub recursive: bool,
    pub has_declaration: bool,
}

impl ReportingBackend {
    pub fn new() -> Self {
        ReportingBackend::default()
    }

    /// Renders the recorded entries as pretty-printed JSON, the form
    /// `langc run` prints to stdout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

impl Backend for ReportingBackend {
    fn emit(&mut self, callee: &str, spec: &Specialization, decl: Option<&Declaration>) -> Result<()> {
        let ty = spec.func_typeable.solve()?;
        self.entries.push(ReportEntry {
            callee: callee.to_string(),
            hash: ty.hash(),
            recursive: ty.is_recursive(),
            has_declaration: decl.is_some(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lang_typeck::{PrimitiveKind, Solver};
    use lang_typeck::solver::{FunctionSolver, PrimitiveSolver};
    use lang_typeck::Typeable;
    use rustc_hash::FxHashMap;

    #[test]
    fn reporting_backend_records_hash_and_recursive_flag() {
        let mut solver = FunctionSolver::new(1);
        solver.args[0]
            .unify(&Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64))))
            .unwrap();
        solver
            .yields
            .unify(&Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64))))
            .unwrap();
        let func_typeable = Typeable::with_solver(Solver::Function(solver));
        let spec = Specialization { func_typeable, typeables: FxHashMap::default() };

        let mut backend = ReportingBackend::new();
        backend.emit("id", &spec, None).unwrap();

        assert_eq!(backend.entries[0].callee, "id");
        assert_eq!(backend.entries[0].hash, "F1[i][i]");
        assert!(!backend.entries[0].recursive);
    }
}
