use std::fmt;

/// Propositional formula over named variables.
///
/// Each operator node owns its operands. Trees are built once by the parser
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Variable(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Equivalent(Box<Expr>, Box<Expr>),
    Implies(Box<Expr>, Box<Expr>),
}

impl Expr {
    // Helper constructors for cleaner code
    pub fn var(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn equivalent(lhs: Expr, rhs: Expr) -> Self {
        Expr::Equivalent(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Expr, rhs: Expr) -> Self {
        Expr::Implies(Box::new(lhs), Box::new(rhs))
    }

    /// Truth value of the formula when each variable takes `value_of(name)`.
    pub fn evaluate<F>(&self, value_of: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Expr::Variable(name) => value_of(name),
            Expr::Not(e) => !e.evaluate(value_of),
            Expr::And(l, r) => l.evaluate(value_of) && r.evaluate(value_of),
            Expr::Or(l, r) => l.evaluate(value_of) || r.evaluate(value_of),
            Expr::Equivalent(l, r) => l.evaluate(value_of) == r.evaluate(value_of),
            Expr::Implies(l, r) => !l.evaluate(value_of) || r.evaluate(value_of),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::Variable(_) => 1,
            Expr::Not(e) => 1 + e.size(),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Equivalent(l, r) | Expr::Implies(l, r) => {
                1 + l.size() + r.size()
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Equivalent(_, _) => 1,
            Expr::Implies(_, _) => 2,
            Expr::Or(_, _) => 3,
            Expr::And(_, _) => 4,
            Expr::Not(_) => 5,
            Expr::Variable(_) => 6,
        }
    }
}

// Parenthesize when the child binds looser than the parent; `strict` also
// wraps equal precedence, which keeps the tree shape on re-parse.
fn write_operand(f: &mut fmt::Formatter<'_>, child: &Expr, parent: u8, strict: bool) -> fmt::Result {
    let prec = child.precedence();
    if prec < parent || (strict && prec == parent) {
        write!(f, "({})", child)
    } else {
        write!(f, "{}", child)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let my_prec = self.precedence();
        match self {
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Not(e) => {
                write!(f, "¬")?;
                write_operand(f, e, my_prec, false)
            }
            Expr::And(l, r) => {
                write_operand(f, l, my_prec, false)?;
                write!(f, " ∧ ")?;
                write_operand(f, r, my_prec, true)
            }
            Expr::Or(l, r) => {
                write_operand(f, l, my_prec, false)?;
                write!(f, " ∨ ")?;
                write_operand(f, r, my_prec, true)
            }
            // Right-associative: a → b → c is a → (b → c)
            Expr::Implies(l, r) => {
                write_operand(f, l, my_prec, true)?;
                write!(f, " → ")?;
                write_operand(f, r, my_prec, false)
            }
            Expr::Equivalent(l, r) => {
                write_operand(f, l, my_prec, false)?;
                write!(f, " ↔ ")?;
                write_operand(f, r, my_prec, true)
            }
        }
    }
}
