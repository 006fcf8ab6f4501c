//! Recursive descent parser for query expressions.

use crate::ast::{Expr, Operator};
use crate::error::{QueryError, QueryResult};
use crate::fields::{lookup, suggest, FieldSpec};
use crate::lexer::{tokenize, Token, TokenKind};

/// Deepest nesting the parser accepts.
///
/// Counts open parentheses and `NOT`s on the way down, and operator nodes
/// on any root-to-leaf path of the finished tree. Anything deeper is
/// rejected with [`QueryError::NestingTooDeep`].
pub const MAX_DEPTH: usize = 256;

/// An expression and the number of operator nodes on its longest path.
type Parsed = (Expr, usize);

/// Parser for task query expressions.
///
/// # Grammar
///
/// ```text
/// expression ::= or_expr
/// or_expr    ::= and_expr ("OR" and_expr)*
/// and_expr   ::= not_expr ("AND" not_expr)*
/// not_expr   ::= "NOT" not_expr | primary
/// primary    ::= "(" expression ")" | comparison
/// comparison ::= field operator value
/// operator   ::= ":" | "=" | "!=" | ">" | "<"
/// value      ::= word | quoted
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `NOT` - unary
/// 2. `AND` - binary, left-associative
/// 3. `OR` - binary, left-associative
///
/// Adjacent comparisons are not implicitly joined: `a:1 b:2` is an error.
/// Nesting is limited to [`MAX_DEPTH`] levels.
///
/// # Example
///
/// ```
/// use atask_query::{Expr, QueryParser};
///
/// let expr = QueryParser::parse("status:open AND NOT priority:p3").unwrap();
/// assert!(matches!(expr, Expr::And(_, _)));
/// assert_eq!(expr.to_string(), "(status:open AND NOT priority:p3)");
/// ```
pub struct QueryParser {
    tokens: Vec<Token>,
    position: usize,
    input_len: usize,
    nesting: usize,
}

impl QueryParser {
    /// Parses a query string into an expression tree.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::EmptyExpression` for blank input,
    /// `QueryError::Lex` when the input cannot be tokenized, and the
    /// matching syntax or field error otherwise. Every error except the
    /// empty case carries a byte offset into `input`.
    pub fn parse(input: &str) -> QueryResult<Expr> {
        if input.trim().is_empty() {
            return Err(QueryError::EmptyExpression);
        }

        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(QueryError::EmptyExpression);
        }
        check_balance(&tokens)?;

        let mut parser = Self {
            tokens,
            position: 0,
            input_len: input.len(),
            nesting: 0,
        };
        let (expr, _) = parser.parse_or_expr()?;

        if let Some(extra) = parser.peek() {
            return Err(QueryError::unexpected_token(&extra.text, extra.position));
        }

        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn check(&self, expected: &TokenKind) -> bool {
        self.peek().is_some_and(|t| &t.kind == expected)
    }

    fn end_of_input(&self) -> QueryError {
        QueryError::UnexpectedEndOfInput {
            position: self.input_len,
        }
    }

    /// Consumes the next token, failing at end of input.
    fn expect_token(&mut self) -> QueryResult<Token> {
        match self.advance() {
            Some(token) => Ok(token),
            None => Err(self.end_of_input()),
        }
    }

    /// Consumes the next token if it has the given kind.
    fn next_if(&mut self, expected: &TokenKind) -> Option<Token> {
        if self.check(expected) {
            self.advance()
        } else {
            None
        }
    }

    /// Steps into a `(` or `NOT` at `position`.
    fn enter(&mut self, position: usize) -> QueryResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(too_deep(position));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn parse_or_expr(&mut self) -> QueryResult<Parsed> {
        let (mut left, mut height) = self.parse_and_expr()?;

        while let Some(op) = self.next_if(&TokenKind::Or) {
            let (right, right_height) = self.parse_and_expr()?;
            height = grow(height.max(right_height), op.position)?;
            left = Expr::or(left, right);
        }

        Ok((left, height))
    }

    fn parse_and_expr(&mut self) -> QueryResult<Parsed> {
        let (mut left, mut height) = self.parse_not_expr()?;

        while let Some(op) = self.next_if(&TokenKind::And) {
            let (right, right_height) = self.parse_not_expr()?;
            height = grow(height.max(right_height), op.position)?;
            left = Expr::and(left, right);
        }

        Ok((left, height))
    }

    fn parse_not_expr(&mut self) -> QueryResult<Parsed> {
        if let Some(not) = self.next_if(&TokenKind::Not) {
            self.enter(not.position)?;
            let (inner, height) = self.parse_not_expr()?;
            self.leave();
            return Ok((Expr::negate(inner), grow(height, not.position)?));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> QueryResult<Parsed> {
        let token = self.expect_token()?;

        match token.kind {
            TokenKind::OpenParen => {
                self.enter(token.position)?;
                let inner = self.parse_or_expr()?;
                let close = self.expect_token()?;
                if close.kind != TokenKind::CloseParen {
                    return Err(QueryError::unexpected_token(close.text, close.position));
                }
                self.leave();
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                let expr = self.parse_comparison(name, token.position)?;
                Ok((expr, 0))
            }
            _ => Err(QueryError::unexpected_token(token.text, token.position)),
        }
    }

    /// Parses the rest of a comparison once its field name is consumed.
    fn parse_comparison(&mut self, name: String, name_position: usize) -> QueryResult<Expr> {
        let field = resolve_field(&name, name_position)?;

        let op_token = self.expect_token()?;
        let op = match op_token.kind {
            TokenKind::Op(op) => Operator::from(op),
            _ => return Err(QueryError::unexpected_token(op_token.text, op_token.position)),
        };
        if !field.kind.supports(op) {
            return Err(QueryError::OperatorNotSupported {
                field: name,
                operator: op_token.text,
                position: op_token.position,
            });
        }

        let value_token = self.expect_token()?;
        let (literal, quoted) = match value_token.kind {
            TokenKind::Ident(word) => (word, false),
            TokenKind::Quoted(text) => (text, true),
            _ => {
                return Err(QueryError::unexpected_token(
                    value_token.text,
                    value_token.position,
                ))
            }
        };

        let value = field
            .kind
            .parse_value(op, &literal, quoted)
            .map_err(|expected| QueryError::InvalidLiteral {
                field: name,
                value: literal,
                expected,
                position: value_token.position,
            })?;

        Ok(Expr::comparison(field, op, value))
    }
}

fn too_deep(position: usize) -> QueryError {
    QueryError::NestingTooDeep {
        position,
        limit: MAX_DEPTH,
    }
}

/// Adds one operator node above a subtree of the given height.
fn grow(height: usize, position: usize) -> QueryResult<usize> {
    let height = height + 1;
    if height > MAX_DEPTH {
        return Err(too_deep(position));
    }
    Ok(height)
}

fn resolve_field(name: &str, position: usize) -> QueryResult<&'static FieldSpec> {
    lookup(name).ok_or_else(|| QueryError::UnknownField {
        field: name.to_string(),
        position,
        suggestion: suggest(name),
    })
}

/// Reports the first parenthesis without a partner.
///
/// A stray `)` is reported where it appears; otherwise the outermost `(`
/// left open is reported.
fn check_balance(tokens: &[Token]) -> QueryResult<()> {
    let mut open = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::OpenParen => open.push(token.position),
            TokenKind::CloseParen => {
                if open.pop().is_none() {
                    return Err(QueryError::UnbalancedParens {
                        position: token.position,
                    });
                }
            }
            _ => {}
        }
    }

    match open.first() {
        Some(&position) => Err(QueryError::UnbalancedParens { position }),
        None => Ok(()),
    }
}

/// Parses a query string into an expression tree.
///
/// Shorthand for [`QueryParser::parse`].
pub fn parse(input: &str) -> QueryResult<Expr> {
    QueryParser::parse(input)
}
