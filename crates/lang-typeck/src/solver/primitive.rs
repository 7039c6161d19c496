//! Solves a typeable already pinned to one of the four primitive kinds.

use lang_common::{Location, Result, TypeError};

use crate::ty::{PrimitiveKind, Type};

#[derive(Clone, Debug)]
pub struct PrimitiveSolver {
    pub kind: PrimitiveKind,
}

impl PrimitiveSolver {
    pub fn new(kind: PrimitiveKind) -> Self {
        PrimitiveSolver { kind }
    }

    pub fn merge(&mut self, other: &PrimitiveSolver) -> Result<()> {
        if self.kind == other.kind {
            Ok(())
        } else {
            Err(TypeError::incompatible(
                format!("cannot unify {} with {}", self.kind.name(), other.kind.name()),
                Location::synthetic(),
            ))
        }
    }

    pub fn solve(&self) -> Result<Type> {
        Ok(Type::primitive(self.kind))
    }
}
