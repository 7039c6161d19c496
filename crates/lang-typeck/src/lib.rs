//! Union-find type inference and polymorphic call-graph specialization.
//!
//! The core pipeline: an `Env`-scoped `infer::annotate` walk produces a
//! `Typeable` per AST node; `Typeable::unify`/`solve` drive a
//! reference-counted union-find forest over four `Solver` shapes
//! (`ty`/`typeable`/`solver`); `Specializer` monomorphizes each distinct
//! argument shape a callee is invoked with into its own
//! `Specialization`. `builtins` registers the fixed intrinsic set as
//! pre-solved external specializations.

pub mod builtins;
pub mod env;
pub mod error;
pub mod infer;
pub mod solver;
pub mod specializer;
pub mod ty;
pub mod typeable;

pub use env::Env;
pub use solver::Solver;
pub use specializer::{Specialization, Specializer};
pub use ty::{PrimitiveKind, Type};
pub use typeable::Typeable;
