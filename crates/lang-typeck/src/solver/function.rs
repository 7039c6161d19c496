//! Solves a typeable pinned to a function shape: N argument typeables
//! plus one yield typeable, unified positionally against a callee's
//! other call sites.

use lang_common::{Location, Result, TypeError};

use crate::ty::Type;
use crate::typeable::Typeable;

#[derive(Clone, Debug)]
pub struct FunctionSolver {
    pub args: Vec<Typeable>,
    pub yields: Typeable,
}

impl FunctionSolver {
    pub fn new(arity: usize) -> Self {
        FunctionSolver {
            args: (0..arity).map(|_| Typeable::unconstrained()).collect(),
            yields: Typeable::unconstrained(),
        }
    }

    pub fn merge(&mut self, other: &FunctionSolver) -> Result<()> {
        if self.args.len() != other.args.len() {
            return Err(TypeError::incompatible(
                format!("function arity mismatch: {} vs {}", self.args.len(), other.args.len()),
                Location::synthetic(),
            ));
        }
        for (mine, theirs) in self.args.iter().zip(other.args.iter()) {
            mine.unify(theirs)?;
        }
        self.yields.unify(&other.yields)?;
        Ok(())
    }

    pub fn solve(&self) -> Result<Type> {
        let arg_types = self.args.iter().map(Typeable::solve).collect::<Result<Vec<_>>>()?;
        let yield_type = self.yields.solve()?;
        Ok(Type::function(arg_types, yield_type))
    }
}
