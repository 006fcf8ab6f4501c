//! Abstract Syntax Tree (AST) for query expressions.

use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;
use crate::fields::FieldSpec;
use crate::lexer::OpToken;
use crate::value::Value;

/// A comparison operator after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equality (`:` or `=`).
    Eq,
    /// Inequality (`!=`).
    NotEq,
    /// Greater than (`>`).
    Gt,
    /// Less than (`<`).
    Lt,
}

impl Operator {
    /// Returns the canonical source text for the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => ":",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
        }
    }
}

impl From<OpToken> for Operator {
    fn from(token: OpToken) -> Self {
        match token {
            OpToken::Colon | OpToken::Equals => Operator::Eq,
            OpToken::NotEquals => Operator::NotEq,
            OpToken::Greater => Operator::Gt,
            OpToken::Less => Operator::Lt,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf comparison: `field op value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// The registry entry for the field.
    pub field: &'static FieldSpec,
    /// The comparison operator.
    pub op: Operator,
    /// The typed value.
    pub value: Value,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field.name, self.op, self.value)
    }
}

/// A parsed query expression.
///
/// The tree is built once by the parser and never edited. Each node owns its
/// children, so an `Expr` can be shared read-only across threads and
/// evaluated against any number of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Logical AND of two expressions.
    And(Box<Expr>, Box<Expr>),

    /// Logical OR of two expressions.
    Or(Box<Expr>, Box<Expr>),

    /// Logical NOT of an expression.
    Not(Box<Expr>),

    /// A field comparison.
    Comparison(Comparison),
}

impl Expr {
    /// Creates an AND expression from two expressions.
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR expression from two expressions.
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Creates a NOT expression.
    pub fn negate(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// Creates a comparison leaf.
    pub fn comparison(field: &'static FieldSpec, op: Operator, value: Value) -> Self {
        Expr::Comparison(Comparison { field, op, value })
    }

    /// Returns every comparison in the tree, left to right.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Expr::And(l, r) | Expr::Or(l, r) => {
                l.collect_comparisons(out);
                r.collect_comparisons(out);
            }
            Expr::Not(inner) => inner.collect_comparisons(out),
            Expr::Comparison(c) => out.push(c),
        }
    }
}

/// Prints the canonical form of the expression. Binary nodes are always
/// parenthesised, so the output parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::And(l, r) => write!(f, "({l} AND {r})"),
            Expr::Or(l, r) => write!(f, "({l} OR {r})"),
            Expr::Not(inner) => write!(f, "NOT {inner}"),
            Expr::Comparison(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for Expr {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::QueryParser::parse(s)
    }
}
