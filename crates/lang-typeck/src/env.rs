//! Name environment: a scope stack mapping identifiers to typeables.
//!
//! Entering a `Bind` pushes a frame; leaving it pops. Lookup searches
//! from the innermost scope outward, so a `Bind` shadows any
//! outer binding of the same name for the extent of its body.

use rustc_hash::FxHashMap;

use crate::typeable::Typeable;

pub struct Env {
    scopes: Vec<FxHashMap<String, Typeable>>,
}

impl Env {
    pub fn new() -> Self {
        Env { scopes: vec![FxHashMap::default()] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// # Panics
    /// Panics if called when only the root scope remains.
    pub fn pop_scope(&mut self) {
        assert!(self.scopes.len() > 1, "cannot pop the root scope");
        self.scopes.pop();
    }

    pub fn bind(&mut self, name: impl Into<String>, typeable: Typeable) {
        self.scopes.last_mut().expect("scope stack is never empty").insert(name.into(), typeable);
    }

    pub fn lookup(&self, name: &str) -> Option<Typeable> {
        for scope in self.scopes.iter().rev() {
            if let Some(t) = scope.get(name) {
                return Some(t.clone());
            }
        }
        None
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_local_binding() {
        let mut env = Env::new();
        env.bind("x", Typeable::unconstrained());
        assert!(env.lookup("x").is_some());
        assert!(env.lookup("y").is_none());
    }

    #[test]
    fn nested_scope_sees_outer_bindings() {
        let mut env = Env::new();
        env.bind("x", Typeable::unconstrained());
        env.push_scope();
        assert!(env.lookup("x").is_some());
    }

    #[test]
    fn inner_binding_shadows_and_unwinds() {
        let mut env = Env::new();
        let outer = Typeable::unconstrained();
        env.bind("x", outer.clone());

        env.push_scope();
        let inner = Typeable::unconstrained();
        env.bind("x", inner.clone());
        assert!(env.lookup("x").unwrap().same_class(&inner));

        env.pop_scope();
        assert!(env.lookup("x").unwrap().same_class(&outer));
    }

    #[test]
    #[should_panic(expected = "cannot pop the root scope")]
    fn pop_root_scope_panics() {
        let mut env = Env::new();
        env.pop_scope();
    }
}
