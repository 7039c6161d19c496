//! Ergonomic constructors for `Expr`/`Declaration`/`Module` values.
//!
//! Stands in for a parser: every constructor allocates a fresh `NodeId`
//! and takes a `Location`, mirroring what a real parser would attach per
//! node. `loc(file, line, col)` is a small helper for terse call sites.

use lang_common::Location;

use crate::node::{
    BindExpr, BoolLitExpr, ConstantDecl, Declaration, Expr, GuardCase, GuardExpr, IdExpr,
    IntLitExpr, InvocationExpr, Module, NodeId, StrLitExpr, TupleExpr, TupleItem,
};

pub fn loc(file: &str, line: u32, column: u32) -> Location {
    Location::new(file, line, column)
}

pub fn id_expr(name: impl Into<String>, loc: Location) -> Expr {
    Expr::Id(IdExpr { id: NodeId::fresh(), name: name.into(), loc })
}

pub fn int_lit(value: i64, loc: Location) -> Expr {
    Expr::IntLit(IntLitExpr { id: NodeId::fresh(), value, loc })
}

pub fn str_lit(value: impl Into<Vec<u8>>, loc: Location) -> Expr {
    Expr::StrLit(StrLitExpr { id: NodeId::fresh(), value: value.into(), loc })
}

pub fn bool_lit(value: bool, loc: Location) -> Expr {
    Expr::BoolLit(BoolLitExpr { id: NodeId::fresh(), value, loc })
}

pub fn call(callee: impl Into<String>, args: Vec<Expr>, loc: Location) -> Expr {
    Expr::Invocation(InvocationExpr { id: NodeId::fresh(), callee: callee.into(), args, loc })
}

/// Builds a `Guard` expression. `cases` are the non-wildcard
/// `(condition, value)` pairs in source order; `wildcard` is the
/// mandatory fallthrough value.
pub fn guard(cases: Vec<(Expr, Expr)>, wildcard: Expr, loc: Location) -> Expr {
    let mut guard_cases: Vec<GuardCase> =
        cases.into_iter().map(|(cond, value)| GuardCase { condition: Some(cond), value }).collect();
    guard_cases.push(GuardCase { condition: None, value: wildcard });
    Expr::Guard(GuardExpr { id: NodeId::fresh(), cases: guard_cases, loc })
}

pub fn bind(name: impl Into<String>, value: Expr, body: Expr, loc: Location) -> Expr {
    Expr::Bind(BindExpr {
        id: NodeId::fresh(),
        name: name.into(),
        value: Box::new(value),
        body: Box::new(body),
        loc,
    })
}

/// Builds a `Tuple` expression from `(optional tag, value)` pairs.
pub fn tuple(items: Vec<(Option<&str>, Expr)>, loc: Location) -> Expr {
    let items = items
        .into_iter()
        .map(|(tag, value)| TupleItem { tag: tag.map(str::to_owned), value })
        .collect();
    Expr::Tuple(TupleExpr { id: NodeId::fresh(), items, loc })
}

pub fn declaration(
    name: impl Into<String>,
    params: Vec<&str>,
    body: Expr,
    polymorphic: bool,
    loc: Location,
) -> Declaration {
    Declaration {
        id: NodeId::fresh(),
        name: name.into(),
        params: params.into_iter().map(str::to_owned).collect(),
        body,
        polymorphic,
        loc,
    }
}

pub fn constant(name: impl Into<String>, value: Expr, loc: Location) -> ConstantDecl {
    ConstantDecl { id: NodeId::fresh(), name: name.into(), value, loc }
}

pub fn module(declarations: Vec<Declaration>, constants: Vec<ConstantDecl>) -> Module {
    Module { declarations, constants }
}
