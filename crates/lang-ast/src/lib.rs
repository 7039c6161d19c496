//! Syntax tree node shapes consumed by the type-inference core.
//!
//! The lexer and parser that would produce these values from source
//! text are external collaborators (spec.md section 1); this crate only
//! defines the shapes and a hand-written `builder` module that stands in
//! for a parser in tests and in `langc`'s fixtures.

pub mod builder;
pub mod node;

pub use node::{
    BindExpr, BoolLitExpr, ConstantDecl, Declaration, Expr, GuardCase, GuardExpr, IdExpr,
    IntLitExpr, InvocationExpr, Module, NodeId, StrLitExpr, TupleExpr, TupleItem,
};
