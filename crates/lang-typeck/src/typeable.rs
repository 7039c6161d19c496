//! `Typeable`: a union-find node carrying a constraint solver.
//!
//! Every AST expression gets its own `Typeable`. Unifying two
//! expressions' typeables merges their equivalence classes; solving a
//! typeable walks to its class's root and asks the root's solver to
//! materialize a `Type`.
//!
//! Nodes are `Rc<RefCell<..>>` rather than indices into a table: the
//! annotator, the specializer, and the solvers all hold `Typeable`
//! handles concurrently (in the single-threaded sense -- they alias),
//! and a shared-ownership graph lets a recursive type's back-edge be a
//! plain `Weak` into the same graph instead of a second indirection
//! layer.

use std::cell::RefCell;
use std::rc::Rc;

use lang_common::{Location, Result, TypeError};

use crate::solver::Solver;
use crate::ty::Type;

enum Link {
    /// This node is the root of its equivalence class. `Some(solver)`
    /// if the class is pinned to a shape; `None` if nothing has
    /// constrained it yet (an indeterminate type).
    Root(Option<Solver>),
    Child(Typeable),
}

struct Inner {
    link: Link,
    /// Set while this root's `solve` is on the call stack, so a
    /// reentrant call (the class's own shape refers back to itself)
    /// is detected instead of recursing forever.
    solve_active: bool,
    /// Recurrence stubs handed out during the active solve, to be
    /// patched once it produces a `Type`.
    recurrence_stubs: Vec<Type>,
}

/// A handle into the union-find graph. Cloning a `Typeable` clones the
/// `Rc`, so all clones observe the same equivalence class.
#[derive(Clone)]
pub struct Typeable(Rc<RefCell<Inner>>);

impl Typeable {
    pub fn new(solver: Option<Solver>) -> Self {
        Typeable(Rc::new(RefCell::new(Inner {
            link: Link::Root(solver),
            solve_active: false,
            recurrence_stubs: Vec::new(),
        })))
    }

    pub fn unconstrained() -> Self {
        Self::new(None)
    }

    pub fn with_solver(solver: Solver) -> Self {
        Self::new(Some(solver))
    }

    /// Walks to the root of this typeable's equivalence class.
    pub fn root(&self) -> Typeable {
        let mut current = self.clone();
        loop {
            let next = match &current.0.borrow().link {
                Link::Root(_) => None,
                Link::Child(parent) => Some(parent.clone()),
            };
            match next {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    pub fn same_class(&self, other: &Typeable) -> bool {
        Rc::ptr_eq(&self.root().0, &other.root().0)
    }

    /// Unifies this typeable's equivalence class with `other`'s.
    ///
    /// If neither root has a solver, one becomes an unconstrained
    /// child of the other. If exactly one has a solver, the
    /// unconstrained root becomes its child. If both have solvers,
    /// they are merged (which may recursively unify their own
    /// sub-typeables); on success the `other` root becomes a child of
    /// `self`'s root. The surviving root may therefore differ between
    /// `a.unify(b)` and `b.unify(a)`, though the resulting equivalence
    /// classes are the same.
    pub fn unify(&self, other: &Typeable) -> Result<()> {
        let root_self = self.root();
        let root_other = other.root();
        if Rc::ptr_eq(&root_self.0, &root_other.0) {
            return Ok(());
        }

        let self_has_solver = matches!(&root_self.0.borrow().link, Link::Root(Some(_)));
        let other_has_solver = matches!(&root_other.0.borrow().link, Link::Root(Some(_)));

        match (self_has_solver, other_has_solver) {
            (true, true) => {
                let mut self_inner = root_self.0.borrow_mut();
                let other_inner = root_other.0.borrow();
                let self_solver = match &mut self_inner.link {
                    Link::Root(Some(s)) => s,
                    _ => unreachable!(),
                };
                let other_solver = match &other_inner.link {
                    Link::Root(Some(s)) => s,
                    _ => unreachable!(),
                };
                self_solver.merge(other_solver)?;
                drop(self_inner);
                drop(other_inner);
                root_other.0.borrow_mut().link = Link::Child(root_self.clone());
            }
            (true, false) => {
                root_other.0.borrow_mut().link = Link::Child(root_self.clone());
            }
            (false, true) => {
                root_self.0.borrow_mut().link = Link::Child(root_other.clone());
            }
            (false, false) => {
                root_other.0.borrow_mut().link = Link::Child(root_self.clone());
            }
        }
        Ok(())
    }

    /// Materializes this typeable's equivalence class into a `Type`.
    ///
    /// Reentrant calls (reached while this same root's solve is
    /// already on the stack) return a `Recurrence` stub rather than
    /// looping; once the outer call's solver produces the real `Type`,
    /// every stub handed out during that call is patched to point at
    /// it and the produced `Type` is flagged `recursive`.
    pub fn solve(&self) -> Result<Type> {
        let root = self.root();

        {
            let mut inner = root.0.borrow_mut();
            if inner.solve_active {
                let stub = Type::recurrence_stub();
                inner.recurrence_stubs.push(stub.clone());
                return Ok(stub);
            }
            inner.solve_active = true;
        }

        let solver_snapshot = match &root.0.borrow().link {
            Link::Root(Some(s)) => Some(s.clone()),
            Link::Root(None) => None,
            Link::Child(_) => unreachable!("root() never returns a child"),
        };

        let result = match solver_snapshot {
            Some(solver) => solver.solve(),
            None => Err(TypeError::indeterminate(
                "type could not be determined from context",
                Location::synthetic(),
            )),
        };

        let mut inner = root.0.borrow_mut();
        inner.solve_active = false;
        let stubs = std::mem::take(&mut inner.recurrence_stubs);
        drop(inner);

        match result {
            Ok(ty) => {
                if !stubs.is_empty() {
                    ty.set_recursive(true);
                    for stub in &stubs {
                        stub.patch_recurrence(&ty);
                    }
                }
                Ok(ty)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_solvable(&self) -> bool {
        self.solve().is_ok()
    }

    /// Whether this typeable's equivalence class is currently rooted at a
    /// `Function` solver. Used to validate an externally-registered
    /// specialization without solving it.
    pub fn is_function(&self) -> bool {
        matches!(&self.root().0.borrow().link, Link::Root(Some(Solver::Function(_))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::primitive::PrimitiveSolver;
    use crate::solver::tuple::TupleSolver;
    use crate::ty::PrimitiveKind;

    fn int_typeable() -> Typeable {
        Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Int64)))
    }

    #[test]
    fn unify_unconstrained_with_constrained_solves() {
        let a = Typeable::unconstrained();
        let b = int_typeable();
        a.unify(&b).unwrap();
        assert_eq!(a.solve().unwrap(), Type::primitive(PrimitiveKind::Int64));
    }

    #[test]
    fn unify_same_primitive_succeeds() {
        let a = int_typeable();
        let b = int_typeable();
        assert!(a.unify(&b).is_ok());
    }

    #[test]
    fn unify_incompatible_primitives_fails() {
        let a = int_typeable();
        let b = Typeable::with_solver(Solver::Primitive(PrimitiveSolver::new(PrimitiveKind::Bool)));
        assert!(a.unify(&b).is_err());
    }

    #[test]
    fn unsolved_typeable_is_indeterminate() {
        let a = Typeable::unconstrained();
        assert!(a.solve().is_err());
        assert!(!a.is_solvable());
    }

    #[test]
    fn self_referential_tuple_solves_and_flags_recursive() {
        let item = Typeable::unconstrained();
        let mut solver = TupleSolver::new(1);
        solver.items[0].1 = item.clone();
        let tuple = Typeable::with_solver(Solver::Tuple(solver));
        item.unify(&tuple).unwrap();

        let ty = tuple.solve().unwrap();
        assert!(ty.is_recursive());
        assert_eq!(ty.hash(), "T1[self]");
    }

    #[test]
    fn unify_is_idempotent_under_repeated_calls() {
        let a = int_typeable();
        let b = int_typeable();
        a.unify(&b).unwrap();
        assert!(a.unify(&b).is_ok());
        assert!(b.unify(&a).is_ok());
    }
}
