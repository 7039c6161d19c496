//! Solves a typeable pinned to a disjoint union: the fallback shape a
//! `Guard` expression's branches collapse to when they are not all
//! mutually unifiable (see the annotator's guard handling).

use lang_common::{Location, Result, TypeError};

use crate::ty::Type;
use crate::typeable::Typeable;

#[derive(Clone, Debug, Default)]
pub struct DisjointSolver {
    pub variants: Vec<Typeable>,
}

impl DisjointSolver {
    pub fn new() -> Self {
        DisjointSolver::default()
    }

    pub fn add(&mut self, variant: Typeable) {
        self.variants.push(variant);
    }

    pub fn merge(&mut self, other: &DisjointSolver) -> Result<()> {
        if self.variants.len() != other.variants.len() {
            return Err(TypeError::incompatible(
                format!(
                    "disjoint union variant count mismatch: {} vs {}",
                    self.variants.len(),
                    other.variants.len()
                ),
                Location::synthetic(),
            ));
        }
        for (mine, theirs) in self.variants.iter().zip(other.variants.iter()) {
            mine.unify(theirs)?;
        }
        Ok(())
    }

    pub fn solve(&self) -> Result<Type> {
        if self.variants.is_empty() {
            return Err(TypeError::incompatible(
                "disjoint union has no variants to solve",
                Location::synthetic(),
            ));
        }
        let variant_types = self.variants.iter().map(Typeable::solve).collect::<Result<Vec<_>>>()?;
        Ok(Type::disjoint(variant_types))
    }
}
