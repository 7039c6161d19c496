//! Solves a typeable pinned to a tuple shape.
//!
//! Items are positional but may also carry a string tag (struct-like
//! field access); `item_with_tag` exposes a typeable keyed by tag so
//! `a.field` expressions can unify against whichever positional item
//! ends up carrying that tag, without knowing its index up front.

use rustc_hash::{FxHashMap, FxHashSet};

use lang_common::{Location, Result, TypeError};

use crate::ty::Type;
use crate::typeable::Typeable;

#[derive(Clone, Debug)]
pub struct TupleSolver {
    pub items: Vec<(Option<String>, Typeable)>,
    tagged: FxHashMap<String, Typeable>,
}

impl TupleSolver {
    pub fn new(arity: usize) -> Self {
        TupleSolver {
            items: (0..arity).map(|_| (None, Typeable::unconstrained())).collect(),
            tagged: FxHashMap::default(),
        }
    }

    /// Tags item `index` with `tag`. Fails if that item already carries
    /// a different tag.
    pub fn tag_item(&mut self, index: usize, tag: &str) -> Result<()> {
        let (existing, _) = &mut self.items[index];
        match existing {
            Some(t) if t != tag => Err(TypeError::incompatible(
                format!("conflicting tags at tuple index {index}: '{t}' vs '{tag}'"),
                Location::synthetic(),
            )),
            _ => {
                *existing = Some(tag.to_string());
                Ok(())
            }
        }
    }

    /// A typeable for whichever item ends up tagged `tag`, shared
    /// across every request for that tag on this solver.
    pub fn item_with_tag(&mut self, tag: &str) -> Typeable {
        self.tagged.entry(tag.to_string()).or_insert_with(Typeable::unconstrained).clone()
    }

    pub fn merge(&mut self, other: &TupleSolver) -> Result<()> {
        if self.items.len() != other.items.len() {
            return Err(TypeError::incompatible(
                format!("tuple cardinality mismatch: {} vs {}", self.items.len(), other.items.len()),
                Location::synthetic(),
            ));
        }
        for i in 0..self.items.len() {
            let (self_tag, self_typeable) = self.items[i].clone();
            let (other_tag, other_typeable) = other.items[i].clone();
            let merged_tag = match (&self_tag, &other_tag) {
                (Some(a), Some(b)) if a != b => {
                    return Err(TypeError::incompatible(
                        format!("tuple tags differ at index {i}: '{a}' vs '{b}'"),
                        Location::synthetic(),
                    ));
                }
                (Some(a), _) => Some(a.clone()),
                (None, other_tag) => other_tag.clone(),
            };
            self_typeable.unify(&other_typeable)?;
            self.items[i] = (merged_tag, self_typeable);
        }
        for (tag, typeable) in &other.tagged {
            self.tagged.entry(tag.clone()).or_insert_with(|| typeable.clone());
        }
        Ok(())
    }

    pub fn solve(&self) -> Result<Type> {
        let mut seen_tags = FxHashSet::default();
        let mut item_types = Vec::with_capacity(self.items.len());
        for (tag, typeable) in &self.items {
            if let Some(t) = tag {
                if !seen_tags.insert(t.clone()) {
                    return Err(TypeError::incompatible(
                        format!("duplicate tuple tag '{t}'"),
                        Location::synthetic(),
                    ));
                }
                if let Some(tagged_typeable) = self.tagged.get(t) {
                    typeable.unify(tagged_typeable)?;
                }
            }
            item_types.push((tag.clone(), typeable.solve()?));
        }
        for tag in self.tagged.keys() {
            if !seen_tags.contains(tag) {
                return Err(TypeError::incompatible(
                    format!("tag '{tag}' is not declared by any tuple item"),
                    Location::synthetic(),
                ));
            }
        }
        Ok(Type::tuple(item_types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{PrimitiveSolver, Solver};
    use crate::ty::PrimitiveKind;

    fn int_typeable() -> Typeable {
        Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64)))
    }

    #[test]
    fn merge_fails_when_tag_order_differs() {
        // `(~a x, ~b y)` vs `(~b y, ~a x)`: same positional shape, but the
        // tags at each index disagree, so the solvers must not merge even
        // though neither item's own type differs.
        let mut ab = TupleSolver::new(2);
        ab.tag_item(0, "a").unwrap();
        ab.tag_item(1, "b").unwrap();
        ab.items[0].1.unify(&int_typeable()).unwrap();
        ab.items[1].1.unify(&int_typeable()).unwrap();

        let mut ba = TupleSolver::new(2);
        ba.tag_item(0, "b").unwrap();
        ba.tag_item(1, "a").unwrap();
        ba.items[0].1.unify(&int_typeable()).unwrap();
        ba.items[1].1.unify(&int_typeable()).unwrap();

        assert!(ab.merge(&ba).is_err());
    }

    #[test]
    fn merge_succeeds_when_tags_match_positionally() {
        let mut a = TupleSolver::new(1);
        a.tag_item(0, "x").unwrap();
        a.items[0].1.unify(&int_typeable()).unwrap();

        let mut b = TupleSolver::new(1);
        b.tag_item(0, "x").unwrap();
        b.items[0].1.unify(&int_typeable()).unwrap();

        assert!(a.merge(&b).is_ok());
    }
}
