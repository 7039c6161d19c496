//! Module driver: wires `lang-ast` and `lang-typeck` together into a
//! runnable pipeline, and defines the trait boundary a real back-end
//! implements against.

pub mod backend;
pub mod driver;

pub use backend::{Backend, ReportEntry, ReportingBackend};
pub use driver::{run, RootMode};
