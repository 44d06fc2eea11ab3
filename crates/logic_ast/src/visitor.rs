use crate::expression::Expr;

pub trait Visitor {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Variable(name) => self.visit_variable(name),
            Expr::Not(e) => self.visit_not(e),
            Expr::And(l, r) => self.visit_and(l, r),
            Expr::Or(l, r) => self.visit_or(l, r),
            Expr::Equivalent(l, r) => self.visit_equivalent(l, r),
            Expr::Implies(l, r) => self.visit_implies(l, r),
        }
    }

    fn visit_variable(&mut self, _name: &str) {}

    fn visit_not(&mut self, expr: &Expr) {
        self.visit_expr(expr);
    }

    fn visit_and(&mut self, left: &Expr, right: &Expr) {
        self.visit_expr(left);
        self.visit_expr(right);
    }

    fn visit_or(&mut self, left: &Expr, right: &Expr) {
        self.visit_expr(left);
        self.visit_expr(right);
    }

    fn visit_equivalent(&mut self, left: &Expr, right: &Expr) {
        self.visit_expr(left);
        self.visit_expr(right);
    }

    fn visit_implies(&mut self, left: &Expr, right: &Expr) {
        self.visit_expr(left);
        self.visit_expr(right);
    }
}

/// Collects variable names in first-seen order, without duplicates.
#[derive(Debug, Default)]
pub struct VariableCollector {
    pub vars: Vec<String>,
}

impl VariableCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: names mentioned by `expr`.
    pub fn collect(expr: &Expr) -> Vec<String> {
        let mut collector = Self::new();
        collector.visit_expr(expr);
        collector.vars
    }
}

impl Visitor for VariableCollector {
    fn visit_variable(&mut self, name: &str) {
        if !self.vars.iter().any(|v| v == name) {
            self.vars.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_first_seen_order() {
        let e = Expr::implies(
            Expr::and(Expr::var("B"), Expr::var("A")),
            Expr::or(Expr::var("B"), Expr::not(Expr::var("C"))),
        );
        assert_eq!(VariableCollector::collect(&e), vec!["B", "A", "C"]);
    }

    #[derive(Default)]
    struct NegationCounter(usize);

    impl Visitor for NegationCounter {
        fn visit_not(&mut self, expr: &Expr) {
            self.0 += 1;
            self.visit_expr(expr);
        }
    }

    #[test]
    fn test_custom_visitor_overrides_one_node() {
        let e = Expr::not(Expr::equivalent(Expr::not(Expr::var("A")), Expr::var("B")));
        let mut counter = NegationCounter::default();
        counter.visit_expr(&e);
        assert_eq!(counter.0, 2);
    }
}
