use logic_ast::Expr;
use proptest::prelude::*;

pub const NAMES: [&str; 3] = ["A", "B", "C"];

pub fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop::sample::select(NAMES.to_vec()).prop_map(Expr::var);

    leaf.prop_recursive(
        4,  // levels deep
        32, // max size
        2,  // items per collection
        |inner| {
            prop_oneof![
                inner.clone().prop_map(Expr::not),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::and(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::or(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::implies(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::equivalent(l, r)),
            ]
        },
    )
}

/// Truth-table equivalence over NAMES, the slow reference.
pub fn same_truth_table(lhs: &Expr, rhs: &Expr) -> bool {
    (0u8..1 << NAMES.len()).all(|mask| {
        let value_of = |name: &str| {
            NAMES
                .iter()
                .position(|n| *n == name)
                .map_or(false, |bit| mask & (1 << bit) != 0)
        };
        lhs.evaluate(&value_of) == rhs.evaluate(&value_of)
    })
}
