//! The solver sum type: one variant per type shape a `Typeable` can be
//! pinned to. `merge`/`solve` dispatch with a flat match rather than
//! through a trait object -- there are exactly four shapes and they
//! never grow a fifth without a matching change to `ty::Type`, so the
//! indirection a `Box<dyn Solver>` would buy isn't worth its cost.

pub mod disjoint;
pub mod function;
pub mod primitive;
pub mod tuple;

use lang_common::{Location, Result, TypeError};

pub use disjoint::DisjointSolver;
pub use function::FunctionSolver;
pub use primitive::PrimitiveSolver;
pub use tuple::TupleSolver;

use crate::ty::Type;

#[derive(Clone, Debug)]
pub enum Solver {
    Primitive(PrimitiveSolver),
    Function(FunctionSolver),
    Tuple(TupleSolver),
    Disjoint(DisjointSolver),
}

impl Solver {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Solver::Primitive(_) => "primitive",
            Solver::Function(_) => "function",
            Solver::Tuple(_) => "tuple",
            Solver::Disjoint(_) => "disjoint union",
        }
    }

    /// Merges `other`'s constraints into `self`. Fails with
    /// `TYPE_INCOMPATIBLE` if the two solvers are different shapes, or
    /// if their own merge finds an incompatibility deeper down.
    pub fn merge(&mut self, other: &Solver) -> Result<()> {
        match (self, other) {
            (Solver::Primitive(a), Solver::Primitive(b)) => a.merge(b),
            (Solver::Function(a), Solver::Function(b)) => a.merge(b),
            (Solver::Tuple(a), Solver::Tuple(b)) => a.merge(b),
            (Solver::Disjoint(a), Solver::Disjoint(b)) => a.merge(b),
            (a, b) => Err(TypeError::incompatible(
                format!("cannot unify a {} with a {}", a.kind_name(), b.kind_name()),
                Location::synthetic(),
            )),
        }
    }

    pub fn solve(&self) -> Result<Type> {
        match self {
            Solver::Primitive(s) => s.solve(),
            Solver::Function(s) => s.solve(),
            Solver::Tuple(s) => s.solve(),
            Solver::Disjoint(s) => s.solve(),
        }
    }
}
