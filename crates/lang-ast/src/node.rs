//! Syntax tree node shapes the type-inference core walks.
//!
//! These are deliberately plain data -- there is no parser in this crate
//! to produce them from source text (see spec.md section 1: lexer and
//! parser are external collaborators). Tests and `langc`'s fixtures
//! construct `Module` values directly via `lang_ast::builder`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use lang_common::Location;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier, allocated once per constructed node.
/// Used as the key into a specialization's `TypeableMap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Allocates a fresh, process-unique id.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered list of top-level declarations and module-level constants.
#[derive(Clone, Debug)]
pub struct Module {
    pub declarations: Vec<Declaration>,
    pub constants: Vec<ConstantDecl>,
}

impl Module {
    pub fn new() -> Self {
        Module { declarations: Vec::new(), constants: Vec::new() }
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level named declaration: a name, ordered parameter names, and a
/// body expression. `polymorphic = false` marks a library export root
/// (spec.md section 4.5, step 3).
#[derive(Clone, Debug)]
pub struct Declaration {
    pub id: NodeId,
    pub name: String,
    pub params: Vec<String>,
    pub body: Expr,
    pub polymorphic: bool,
    pub loc: Location,
}

/// A module-level constant: a zero-argument, non-polymorphic binding
/// typed through the same specialization machinery as a `Declaration`
/// (SPEC_FULL.md section 3a).
#[derive(Clone, Debug)]
pub struct ConstantDecl {
    pub id: NodeId,
    pub name: String,
    pub value: Expr,
    pub loc: Location,
}

/// An expression node. Every variant carries its own `NodeId` and
/// `Location` so the annotator can key a `TypeableMap` by node and the
/// diagnostics sink can point at the right source position.
#[derive(Clone, Debug)]
pub enum Expr {
    Id(IdExpr),
    IntLit(IntLitExpr),
    StrLit(StrLitExpr),
    BoolLit(BoolLitExpr),
    Invocation(InvocationExpr),
    Guard(GuardExpr),
    Bind(BindExpr),
    Tuple(TupleExpr),
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Id(e) => e.id,
            Expr::IntLit(e) => e.id,
            Expr::StrLit(e) => e.id,
            Expr::BoolLit(e) => e.id,
            Expr::Invocation(e) => e.id,
            Expr::Guard(e) => e.id,
            Expr::Bind(e) => e.id,
            Expr::Tuple(e) => e.id,
        }
    }

    pub fn loc(&self) -> &Location {
        match self {
            Expr::Id(e) => &e.loc,
            Expr::IntLit(e) => &e.loc,
            Expr::StrLit(e) => &e.loc,
            Expr::BoolLit(e) => &e.loc,
            Expr::Invocation(e) => &e.loc,
            Expr::Guard(e) => &e.loc,
            Expr::Bind(e) => &e.loc,
            Expr::Tuple(e) => &e.loc,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IdExpr {
    pub id: NodeId,
    pub name: String,
    pub loc: Location,
}

#[derive(Clone, Debug)]
pub struct IntLitExpr {
    pub id: NodeId,
    pub value: i64,
    pub loc: Location,
}

#[derive(Clone, Debug)]
pub struct StrLitExpr {
    pub id: NodeId,
    pub value: Vec<u8>,
    pub loc: Location,
}

#[derive(Clone, Debug)]
pub struct BoolLitExpr {
    pub id: NodeId,
    pub value: bool,
    pub loc: Location,
}

#[derive(Clone, Debug)]
pub struct InvocationExpr {
    pub id: NodeId,
    pub callee: String,
    pub args: Vec<Expr>,
    pub loc: Location,
}

/// One `(condition, value)` case of a `Guard`. `condition` is `None` for
/// the mandatory wildcard fallthrough, which must be last.
#[derive(Clone, Debug)]
pub struct GuardCase {
    pub condition: Option<Expr>,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub struct GuardExpr {
    pub id: NodeId,
    pub cases: Vec<GuardCase>,
    pub loc: Location,
}

#[derive(Clone, Debug)]
pub struct BindExpr {
    pub id: NodeId,
    pub name: String,
    pub value: Box<Expr>,
    pub body: Box<Expr>,
    pub loc: Location,
}

/// One item of a `Tuple`: an optional tag string and an expression.
#[derive(Clone, Debug)]
pub struct TupleItem {
    pub tag: Option<String>,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub struct TupleExpr {
    pub id: NodeId,
    pub items: Vec<TupleItem>,
    pub loc: Location,
}
