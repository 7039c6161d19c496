//! Materialized types: the acyclic-on-the-surface values a `Typeable`
//! produces once its constraints are solved.
//!
//! A `Type` is reference-counted so a recursive type (one whose solve
//! re-entered its own `Typeable`) can hold a `Recurrence` node pointing
//! back at an ancestor without an owning cycle -- the back-edge is a
//! `Weak` reference, patched in once the ancestor's solve finishes
//! (see `typeable::Typeable::solve`).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// The four primitive kinds the core knows about natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int64,
    Float,
    Bool,
    String,
}

impl PrimitiveKind {
    /// The single-character code used in structural hashes and backend
    /// symbol names (`i`/`f`/`b`/`s`).
    pub fn code(self) -> char {
        match self {
            PrimitiveKind::Int64 => 'i',
            PrimitiveKind::Float => 'f',
            PrimitiveKind::Bool => 'b',
            PrimitiveKind::String => 's',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::String => "String",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

struct TypeData {
    kind: TypeKind,
    recursive: bool,
}

enum TypeKind {
    Primitive(PrimitiveKind),
    Tuple(Vec<(Option<String>, Type)>),
    Function(Vec<Type>, Type),
    Disjoint(Vec<Type>),
    /// A back-edge to an ancestor `Type` still being constructed. `None`
    /// until the ancestor's solve completes and patches it in.
    Recurrence(Option<Weak<RefCell<TypeData>>>),
}

/// A materialized, shareable type value.
///
/// Equality and hashing are structural (`Type::hash`), not pointer
/// identity: two `Type`s built from unrelated solves compare equal if
/// they have the same shape.
#[derive(Clone)]
pub struct Type(Rc<RefCell<TypeData>>);

impl Type {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Type(Rc::new(RefCell::new(TypeData { kind: TypeKind::Primitive(kind), recursive: false })))
    }

    pub fn tuple(items: Vec<(Option<String>, Type)>) -> Self {
        Type(Rc::new(RefCell::new(TypeData { kind: TypeKind::Tuple(items), recursive: false })))
    }

    pub fn function(args: Vec<Type>, yields: Type) -> Self {
        Type(Rc::new(RefCell::new(TypeData { kind: TypeKind::Function(args, yields), recursive: false })))
    }

    pub fn disjoint(variants: Vec<Type>) -> Self {
        Type(Rc::new(RefCell::new(TypeData { kind: TypeKind::Disjoint(variants), recursive: false })))
    }

    /// A recurrence stub with no target yet. `Typeable::solve` hands one
    /// of these out on reentry and patches it once the outer solve
    /// finishes.
    pub fn recurrence_stub() -> Self {
        Type(Rc::new(RefCell::new(TypeData { kind: TypeKind::Recurrence(None), recursive: false })))
    }

    pub(crate) fn patch_recurrence(&self, parent: &Type) {
        let mut data = self.0.borrow_mut();
        if let TypeKind::Recurrence(slot) = &mut data.kind {
            *slot = Some(Rc::downgrade(&parent.0));
        }
    }

    pub(crate) fn set_recursive(&self, value: bool) {
        self.0.borrow_mut().recursive = value;
    }

    pub fn is_recursive(&self) -> bool {
        self.0.borrow().recursive
    }

    pub fn is_primitive(&self, kind: PrimitiveKind) -> bool {
        matches!(&self.0.borrow().kind, TypeKind::Primitive(k) if *k == kind)
    }

    pub fn as_function(&self) -> Option<(Vec<Type>, Type)> {
        match &self.0.borrow().kind {
            TypeKind::Function(args, yields) => Some((args.clone(), yields.clone())),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.0.borrow().kind {
            TypeKind::Primitive(_) => "primitive",
            TypeKind::Tuple(_) => "tuple",
            TypeKind::Function(..) => "function",
            TypeKind::Disjoint(_) => "disjoint union",
            TypeKind::Recurrence(_) => "recurrence",
        }
    }

    /// The structural hash used for equality and as the basis of
    /// backend symbol names: `T<n>[item]...`, `F<n>[arg]...[yield]`,
    /// `D[variant]...`, a primitive code, or `self` for a recurrence
    /// (the back-edge target is never dereferenced, so this terminates
    /// even on a genuinely cyclic `Type`).
    pub fn hash(&self) -> String {
        match &self.0.borrow().kind {
            TypeKind::Primitive(kind) => kind.code().to_string(),
            TypeKind::Tuple(items) => {
                let mut s = format!("T{}", items.len());
                for (_, item) in items {
                    s.push_str(&format!("[{}]", item.hash()));
                }
                s
            }
            TypeKind::Function(args, yields) => {
                let mut s = format!("F{}", args.len());
                for arg in args {
                    s.push_str(&format!("[{}]", arg.hash()));
                }
                s.push_str(&format!("[{}]", yields.hash()));
                s
            }
            TypeKind::Disjoint(variants) => {
                let mut s = String::from("D");
                for v in variants {
                    s.push_str(&format!("[{}]", v.hash()));
                }
                s
            }
            TypeKind::Recurrence(_) => "self".to_string(),
        }
    }

    /// A human-readable rendering for diagnostics: type names rather
    /// than the single-character codes `hash` uses.
    pub fn display(&self) -> String {
        match &self.0.borrow().kind {
            TypeKind::Primitive(kind) => kind.name().to_string(),
            TypeKind::Tuple(items) => {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|(tag, item)| match tag {
                        Some(t) => format!("{t}: {}", item.display()),
                        None => item.display(),
                    })
                    .collect();
                format!("({})", rendered.join(", "))
            }
            TypeKind::Function(args, yields) => {
                let rendered: Vec<String> = args.iter().map(Type::display).collect();
                format!("({}) -> {}", rendered.join(", "), yields.display())
            }
            TypeKind::Disjoint(variants) => {
                let rendered: Vec<String> = variants.iter().map(Type::display).collect();
                rendered.join(" | ")
            }
            TypeKind::Recurrence(_) => "<recurrence>".to_string(),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.hash())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for Type {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_hash_is_single_char() {
        assert_eq!(Type::primitive(PrimitiveKind::Int64).hash(), "i");
        assert_eq!(Type::primitive(PrimitiveKind::Bool).hash(), "b");
    }

    #[test]
    fn structurally_equal_types_compare_equal() {
        let a = Type::tuple(vec![(None, Type::primitive(PrimitiveKind::Int64))]);
        let b = Type::tuple(vec![(None, Type::primitive(PrimitiveKind::Int64))]);
        assert_eq!(a, b);
    }

    #[test]
    fn tags_are_not_part_of_the_structural_hash() {
        // Tags drive merge/unification (a tagged item may only unify with a
        // compatibly-tagged or untagged one), but the hash -- and therefore
        // `Type` equality -- is purely positional, matching the symbol-naming
        // convention (`T<n><item-hashes>`, no tag).
        let a = Type::tuple(vec![(Some("x".into()), Type::primitive(PrimitiveKind::Int64))]);
        let b = Type::tuple(vec![(None, Type::primitive(PrimitiveKind::Int64))]);
        assert_eq!(a, b);
        assert_eq!(a.hash(), "T1[i]");
    }

    #[test]
    fn recurrence_hashes_as_self_regardless_of_target() {
        let stub = Type::recurrence_stub();
        let outer = Type::tuple(vec![(None, stub.clone())]);
        stub.patch_recurrence(&outer);
        assert_eq!(stub.hash(), "self");
        assert_eq!(outer.hash(), "T1[self]");
    }

    #[test]
    fn function_hash_orders_args_before_yield() {
        let f = Type::function(
            vec![Type::primitive(PrimitiveKind::Int64), Type::primitive(PrimitiveKind::Bool)],
            Type::primitive(PrimitiveKind::Int64),
        );
        assert_eq!(f.hash(), "F2[i][b][i]");
    }

    #[test]
    fn composite_type_hash_and_display_snapshot() {
        let point = Type::tuple(vec![
            (Some("x".into()), Type::primitive(PrimitiveKind::Int64)),
            (Some("y".into()), Type::primitive(PrimitiveKind::Int64)),
        ]);
        let picker = Type::function(
            vec![Type::primitive(PrimitiveKind::Bool)],
            Type::disjoint(vec![point.clone(), Type::primitive(PrimitiveKind::String)]),
        );
        insta::assert_snapshot!(
            format!("{} | {}", picker.hash(), picker.display()),
            @"F1[b][D[T2[i][i]][s]] | (Bool) -> (x: Int64, y: Int64) | String"
        );
    }
}
