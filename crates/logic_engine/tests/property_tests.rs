use logic_ast::{Expr, VariableSet};
use logic_engine::{are_equivalent, compare, equivalent};
use proptest::prelude::*;

mod strategies;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_reflexivity(e in strategies::arb_expr()) {
        prop_assert!(equivalent(&e, &e));
    }

    #[test]
    fn test_symmetry(l in strategies::arb_expr(), r in strategies::arb_expr()) {
        prop_assert_eq!(are_equivalent(&l, &r), are_equivalent(&r, &l));
    }

    #[test]
    fn test_agrees_with_truth_table(l in strategies::arb_expr(), r in strategies::arb_expr()) {
        prop_assert_eq!(equivalent(&l, &r), strategies::same_truth_table(&l, &r));
    }

    #[test]
    fn test_double_negation_preserved(e in strategies::arb_expr()) {
        prop_assert!(equivalent(&e, &Expr::not(Expr::not(e.clone()))));
    }

    #[test]
    fn test_canonical_display_reparses(e in strategies::arb_expr()) {
        let cmp = compare(&e, &e).unwrap();
        let shown = cmp.lhs.to_string();
        prop_assume!(!cmp.lhs.is_tautology() && !cmp.lhs.is_contradiction());
        let reparsed = logic_parser::parse(&shown, &VariableSet::default()).unwrap();
        prop_assert!(equivalent(&e, &reparsed), "{} vs {}", e, shown);
    }

    #[test]
    fn test_counterexample_distinguishes(l in strategies::arb_expr(), r in strategies::arb_expr()) {
        let cmp = compare(&l, &r).unwrap();
        match cmp.counterexample {
            Some(assignment) => {
                prop_assert!(!cmp.equivalent);
                let value_of = |name: &str| assignment.value(name).unwrap_or(false);
                prop_assert_ne!(l.evaluate(&value_of), r.evaluate(&value_of));
            }
            None => prop_assert!(cmp.equivalent),
        }
    }
}
