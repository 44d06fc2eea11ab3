use logic_ast::{Expr, VariableSet};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, satisfy},
    combinator::{map, not, opt},
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::error::ParseError;

/// Deepest nesting accepted, both while parsing and in the resulting tree.
pub const MAX_DEPTH: usize = 128;

// Intermediate AST for parsing. Variable names are checked against the
// active VariableSet only when lowering, so the grammar stays context-free.
#[derive(Debug, Clone)]
enum ParseNode {
    Variable(String),
    Not(Box<ParseNode>),
    And(Box<ParseNode>, Box<ParseNode>),
    Or(Box<ParseNode>, Box<ParseNode>),
    Implies(Box<ParseNode>, Box<ParseNode>),
    Equivalent(Box<ParseNode>, Box<ParseNode>),
    Call(String, Vec<ParseNode>),
}

impl ParseNode {
    fn height(&self) -> usize {
        match self {
            ParseNode::Variable(_) => 1,
            ParseNode::Not(e) => 1 + e.height(),
            ParseNode::And(l, r)
            | ParseNode::Or(l, r)
            | ParseNode::Implies(l, r)
            | ParseNode::Equivalent(l, r) => 1 + l.height().max(r.height()),
            ParseNode::Call(_, args) => 1 + args.iter().map(ParseNode::height).max().unwrap_or(0),
        }
    }

    /// `depth` is where this node lands in the lowered tree.
    fn lower(self, vars: &VariableSet, depth: usize) -> Result<Expr, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        let next = depth + 1;
        match self {
            ParseNode::Variable(name) => {
                if vars.contains(&name) {
                    Ok(Expr::Variable(name))
                } else {
                    Err(ParseError::UnboundVariable(name))
                }
            }
            ParseNode::Not(e) => Ok(Expr::not(e.lower(vars, next)?)),
            ParseNode::And(l, r) => Ok(Expr::and(l.lower(vars, next)?, r.lower(vars, next)?)),
            ParseNode::Or(l, r) => Ok(Expr::or(l.lower(vars, next)?, r.lower(vars, next)?)),
            ParseNode::Implies(l, r) => {
                Ok(Expr::implies(l.lower(vars, next)?, r.lower(vars, next)?))
            }
            ParseNode::Equivalent(l, r) => {
                Ok(Expr::equivalent(l.lower(vars, next)?, r.lower(vars, next)?))
            }
            ParseNode::Call(name, args) => lower_call(name, args, vars, depth),
        }
    }
}

// Prefix call form: Not, And, Or, Implies, Equivalent. n-ary forms become
// left-leaning chains, so their arguments sit up to `args.len()` levels down.
fn lower_call(
    name: String,
    args: Vec<ParseNode>,
    vars: &VariableSet,
    depth: usize,
) -> Result<Expr, ParseError> {
    let arity = |expected: &'static str, found: usize| ParseError::Arity {
        name: name.clone(),
        expected,
        found,
    };
    let next = depth + 1;
    let chained = depth + args.len();

    match name.as_str() {
        "Not" => {
            if args.len() != 1 {
                return Err(arity("1", args.len()));
            }
            let mut args = args;
            Ok(Expr::not(args.remove(0).lower(vars, next)?))
        }
        "And" | "Or" => {
            if args.is_empty() {
                return Err(arity("at least 1", 0));
            }
            let is_and = name == "And";
            let mut lowered = args.into_iter().map(|a| a.lower(vars, chained));
            // Non-empty checked above
            let first = lowered.next().ok_or_else(|| arity("at least 1", 0))??;
            lowered.try_fold(first, |acc, next: Result<Expr, ParseError>| {
                let next = next?;
                Ok(if is_and {
                    Expr::and(acc, next)
                } else {
                    Expr::or(acc, next)
                })
            })
        }
        "Implies" => {
            if args.len() != 2 {
                return Err(arity("2", args.len()));
            }
            let mut args = args.into_iter();
            match (args.next(), args.next()) {
                (Some(l), Some(r)) => Ok(Expr::implies(l.lower(vars, next)?, r.lower(vars, next)?)),
                _ => Err(arity("2", 0)),
            }
        }
        "Equivalent" => {
            // Equivalent(a, b, c) holds when all arguments agree: (a ↔ b) ∧ (b ↔ c)
            if args.len() < 2 {
                return Err(arity("at least 2", args.len()));
            }
            let lowered = args
                .into_iter()
                .map(|a| a.lower(vars, chained))
                .collect::<Result<Vec<_>, _>>()?;
            let mut links = lowered
                .windows(2)
                .map(|w| Expr::equivalent(w[0].clone(), w[1].clone()));
            let first = links.next().ok_or_else(|| arity("at least 2", 0))?;
            Ok(links.fold(first, Expr::and))
        }
        _ => Err(ParseError::UnknownFunction(name.clone())),
    }
}

fn too_deep(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))
}

// Fix the nesting level of a depth-aware parser.
fn at<'a>(
    parser: fn(&'a str, usize) -> IResult<&'a str, ParseNode>,
    depth: usize,
) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode> {
    move |input| parser(input, depth)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Identifiers start with letter or underscore, then allow letters, digits, underscores
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    let mut chars = input.chars();
    let first = chars.next();
    if !matches!(first, Some(c) if c.is_ascii_alphabetic() || c == '_') {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Alpha)));
    }

    let mut len = 1;
    for c in chars {
        if is_ident_char(c) {
            len += c.len_utf8();
        } else {
            break;
        }
    }

    Ok((&input[len..], &input[..len]))
}

fn parse_variable(input: &str) -> IResult<&str, ParseNode> {
    map(parse_identifier, |s: &str| ParseNode::Variable(s.to_string()))(input)
}

// Name immediately followed by '(' : Implies(A, B)
fn parse_call(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    let (input, name) = parse_identifier(input)?;
    let (input, _) = tag("(")(input)?;
    let (input, args) =
        separated_list0(preceded(multispace0, tag(",")), at(parse_expr, depth + 1))(input)?;
    let (input, _) = preceded(multispace0, tag(")"))(input)?;
    Ok((input, ParseNode::Call(name.to_string(), args)))
}

fn parse_parens(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    delimited(
        tag("("),
        at(parse_expr, depth + 1),
        preceded(multispace0, tag(")")),
    )(input)
}

fn parse_atom(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    preceded(
        multispace0,
        alt((at(parse_call, depth), parse_variable, at(parse_parens, depth))),
    )(input)
}

fn not_op(input: &str) -> IResult<&str, &str> {
    alt((tag("¬"), tag("~"), tag("!")))(input)
}

fn and_op(input: &str) -> IResult<&str, &str> {
    alt((tag("&&"), tag("&"), tag("∧"), tag("·")))(input)
}

// A bare `v` is OR only as a whole word in operator position, so `A v B`
// reads as a disjunction while `A vB` does not.
fn or_op(input: &str) -> IResult<&str, &str> {
    alt((
        tag("||"),
        tag("|"),
        tag("∨"),
        terminated(tag("v"), not(satisfy(is_ident_char))),
    ))(input)
}

fn implies_op(input: &str) -> IResult<&str, &str> {
    alt((tag("→"), tag("->"), tag("=>"), tag("⇒")))(input)
}

fn iff_op(input: &str) -> IResult<&str, &str> {
    alt((tag("↔"), tag("<->"), tag("<=>"), tag("⇔"), tag("≡")))(input)
}

// Unary: ¬¬A nests. Every nesting construct passes through here, so this is
// where the depth limit trips.
fn parse_unary(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    if depth > MAX_DEPTH {
        return Err(too_deep(input));
    }
    alt((
        map(
            preceded(preceded(multispace0, not_op), at(parse_unary, depth + 1)),
            |e| ParseNode::Not(Box::new(e)),
        ),
        at(parse_atom, depth),
    ))(input)
}

// Left fold of `operand (op operand)*`. The chain grows the tree without
// recursing, so its height is checked as it is built.
fn fold_left<'a>(
    input: &'a str,
    depth: usize,
    operand: fn(&'a str, usize) -> IResult<&'a str, ParseNode>,
    op: fn(&'a str) -> IResult<&'a str, &'a str>,
    build: fn(Box<ParseNode>, Box<ParseNode>) -> ParseNode,
) -> IResult<&'a str, ParseNode> {
    let (mut input, mut acc) = operand(input, depth)?;
    let mut height = acc.height();
    loop {
        let rest = match preceded(multispace0, op)(input) {
            Ok((rest, _)) => rest,
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        };
        let (rest, rhs) = match operand(rest, depth) {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(_)) => return Ok((input, acc)),
            Err(e) => return Err(e),
        };
        height = height.max(rhs.height()) + 1;
        if height > MAX_DEPTH {
            return Err(too_deep(input));
        }
        acc = build(Box::new(acc), Box::new(rhs));
        input = rest;
    }
}

fn parse_and(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    fold_left(input, depth, parse_unary, and_op, ParseNode::And)
}

fn parse_or(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    fold_left(input, depth, parse_and, or_op, ParseNode::Or)
}

// Implication - right associative: A → B → C = A → (B → C)
fn parse_implies(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    let (input, lhs) = parse_or(input, depth)?;
    let (input, rhs) = opt(preceded(
        preceded(multispace0, implies_op),
        at(parse_implies, depth + 1),
    ))(input)?;
    match rhs {
        Some(rhs) => Ok((input, ParseNode::Implies(Box::new(lhs), Box::new(rhs)))),
        None => Ok((input, lhs)),
    }
}

// Biconditional - loosest binding, chains fold left
fn parse_expr(input: &str, depth: usize) -> IResult<&str, ParseNode> {
    fold_left(input, depth, parse_implies, iff_op, ParseNode::Equivalent)
}

/// Report the first stray ')' or the last unclosed '('.
fn check_balanced(input: &str) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for (pos, c) in input.char_indices() {
        match c {
            '(' => open.push(pos),
            ')' => {
                if open.pop().is_none() {
                    return Err(ParseError::UnbalancedParentheses(pos));
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(pos) => Err(ParseError::UnbalancedParentheses(pos)),
        None => Ok(()),
    }
}

/// Parse logical notation into an expression over `vars`.
///
/// Accepts Unicode glyphs (`¬ ∧ ∨ → ↔`), their ASCII spellings
/// (`~ & | v -> <->`), and the prefix call form (`Implies(A, B)`).
/// Input nested deeper than [`MAX_DEPTH`] is rejected with
/// [`ParseError::TooDeep`].
pub fn parse(input: &str, vars: &VariableSet) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    check_balanced(input)?;

    let (remaining, node) = parse_expr(input, 0).map_err(|e| match e {
        nom::Err::Failure(err) if err.code == ErrorKind::TooLarge => {
            ParseError::TooDeep(MAX_DEPTH)
        }
        e => ParseError::NomError(format!("{}", e)),
    })?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }

    let expr = node.lower(vars, 1)?;
    tracing::trace!(input, parsed = %expr, "parsed expression");
    Ok(expr)
}
