//! Hand-built AST fixtures standing in for a parser's output (there is
//! no lexer/parser in this crate -- see spec.md section 1). Each
//! fixture is one of the scenarios this core's design is validated
//! against.

use lang_ast::{builder, Module};

fn l(line: u32) -> lang_common::Location {
    builder::loc("<fixture>", line, 1)
}

/// `main() = 42` -> `F0 i`.
pub fn integer_literal() -> Module {
    let main = builder::declaration("main", vec![], builder::int_lit(42, l(1)), false, l(1));
    Module { declarations: vec![main], constants: vec![] }
}

/// `main() = add(1, 2)` -> `F0 i`.
pub fn add_intrinsic() -> Module {
    let body = builder::call("add", vec![builder::int_lit(1, l(1)), builder::int_lit(2, l(1))], l(1));
    let main = builder::declaration("main", vec![], body, false, l(1));
    Module { declarations: vec![main], constants: vec![] }
}

/// `id(x) = x; main() = add(id(1), id(2))` -- `id` specialized once,
/// reused for both calls.
pub fn identity_reuse() -> Module {
    let id = builder::declaration("id", vec!["x"], builder::id_expr("x", l(1)), true, l(1));
    let body = builder::call(
        "add",
        vec![
            builder::call("id", vec![builder::int_lit(1, l(2))], l(2)),
            builder::call("id", vec![builder::int_lit(2, l(2))], l(2)),
        ],
        l(2),
    );
    let main = builder::declaration("main", vec![], body, false, l(2));
    Module { declarations: vec![id, main], constants: vec![] }
}

/// `id(x) = x; wrap(y) = id(y); main() = add(wrap(1), wrap(1))`.
pub fn transitive_reuse() -> Module {
    let id = builder::declaration("id", vec!["x"], builder::id_expr("x", l(1)), true, l(1));
    let wrap = builder::declaration(
        "wrap",
        vec!["y"],
        builder::call("id", vec![builder::id_expr("y", l(2))], l(2)),
        true,
        l(2),
    );
    let body = builder::call(
        "add",
        vec![
            builder::call("wrap", vec![builder::int_lit(1, l(3))], l(3)),
            builder::call("wrap", vec![builder::int_lit(1, l(3))], l(3)),
        ],
        l(3),
    );
    let main = builder::declaration("main", vec![], body, false, l(3));
    Module { declarations: vec![id, wrap, main], constants: vec![] }
}

/// `pick(b) = { b : 1 ; * : "x" }; main() = pick(true)` -- `pick`
/// types to `F1 b -> D[i][s]`; the root unification against `Int64`
/// then fails, so the driver reports `TYPE_INCOMPATIBLE`.
pub fn guard_disjoint_root_mismatch() -> Module {
    let pick_body = builder::guard(
        vec![(builder::id_expr("b", l(1)), builder::int_lit(1, l(1)))],
        builder::str_lit(b"x".to_vec(), l(1)),
        l(1),
    );
    let pick = builder::declaration("pick", vec!["b"], pick_body, true, l(1));
    let main = builder::declaration(
        "main",
        vec![],
        builder::call("pick", vec![builder::bool_lit(true, l(2))], l(2)),
        false,
        l(2),
    );
    Module { declarations: vec![pick, main], constants: vec![] }
}

/// `point(x, y) = (~a x, ~b y); point_swap(x, y) = (~b y, ~a x);
/// main() = bind _ = point(1, 1) in bind _ = point_swap(1, 1) in
/// add(0, 0)` -- two orthogonal tagged-tuple specializations, distinct
/// because their tag order differs structurally even though both are
/// `(Int64, Int64) -> (Int64, Int64)` untagged.
pub fn tagged_tuple_orthogonality() -> Module {
    let point = builder::declaration(
        "point",
        vec!["x", "y"],
        builder::tuple(
            vec![(Some("a"), builder::id_expr("x", l(1))), (Some("b"), builder::id_expr("y", l(1)))],
            l(1),
        ),
        true,
        l(1),
    );
    let point_swap = builder::declaration(
        "point_swap",
        vec!["x", "y"],
        builder::tuple(
            vec![(Some("b"), builder::id_expr("y", l(2))), (Some("a"), builder::id_expr("x", l(2)))],
            l(2),
        ),
        true,
        l(2),
    );
    let body = builder::bind(
        "_p",
        builder::call("point", vec![builder::int_lit(1, l(3)), builder::int_lit(1, l(3))], l(3)),
        builder::bind(
            "_q",
            builder::call("point_swap", vec![builder::int_lit(1, l(3)), builder::int_lit(1, l(3))], l(3)),
            builder::call("add", vec![builder::int_lit(0, l(3)), builder::int_lit(0, l(3))], l(3)),
            l(3),
        ),
        l(3),
    );
    let main = builder::declaration("main", vec![], body, false, l(3));
    Module { declarations: vec![point, point_swap, main], constants: vec![] }
}

/// `THE_ANSWER = 42; main() = add(THE_ANSWER, 0)` -- `THE_ANSWER`
/// receives exactly one arity-0 specialization, computed once.
pub fn module_constant() -> Module {
    let constant = builder::constant("THE_ANSWER", builder::int_lit(42, l(1)), l(1));
    let body = builder::call("add", vec![builder::id_expr("THE_ANSWER", l(2)), builder::int_lit(0, l(2))], l(2));
    let main = builder::declaration("main", vec![], body, false, l(2));
    Module { declarations: vec![main], constants: vec![constant] }
}

/// All fixtures keyed by the name `langc run`/`langc list-fixtures`
/// expose on the CLI, in a stable order.
pub fn registry() -> Vec<(&'static str, fn() -> Module)> {
    vec![
        ("integer-literal", integer_literal as fn() -> Module),
        ("add-intrinsic", add_intrinsic),
        ("identity-reuse", identity_reuse),
        ("transitive-reuse", transitive_reuse),
        ("guard-disjoint-root-mismatch", guard_disjoint_root_mismatch),
        ("tagged-tuple-orthogonality", tagged_tuple_orthogonality),
        ("module-constant", module_constant),
    ]
}

pub fn lookup(name: &str) -> Option<Module> {
    registry().into_iter().find(|(n, _)| *n == name).map(|(_, f)| f())
}
