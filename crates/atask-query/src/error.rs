//! Error types for the query lexer and parser.

use thiserror::Error;

/// A specialized Result type for query parsing operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// The reason a character could not be tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that cannot start any token (for example a lone `!`).
    IllegalCharacter,
    /// A quoted literal whose closing quote never appears.
    UnterminatedQuote,
}

/// Error encountered during lexical analysis.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} at position {position}", describe(.kind, .character))]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// The offending character (the opening quote for unterminated literals).
    pub character: char,
    /// The position (0-indexed byte offset) where the error occurred.
    pub position: usize,
}

impl LexError {
    pub(crate) fn illegal(character: char, position: usize) -> Self {
        Self {
            kind: LexErrorKind::IllegalCharacter,
            character,
            position,
        }
    }

    pub(crate) fn unterminated(quote: char, position: usize) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedQuote,
            character: quote,
            position,
        }
    }
}

fn describe(kind: &LexErrorKind, character: &char) -> String {
    match kind {
        LexErrorKind::IllegalCharacter => {
            format!("unexpected character '{}'", character.escape_debug())
        }
        LexErrorKind::UnterminatedQuote => {
            format!("unterminated quoted value starting with {character}")
        }
    }
}

/// Errors that can occur while parsing a query expression.
///
/// Every variant except [`QueryError::EmptyExpression`] carries the byte
/// offset of the offending input so callers can point at it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The input could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The query expression is empty.
    #[error("query expression is empty")]
    EmptyExpression,

    /// A comparison names a field that is not in the registry.
    #[error("unknown field '{field}' at position {position}{}", did_you_mean(.suggestion))]
    UnknownField {
        /// The field name as typed.
        field: String,
        /// Byte offset of the field name.
        position: usize,
        /// The closest known field name, if any is close enough.
        suggestion: Option<String>,
    },

    /// A comparison uses an operator the field does not accept.
    #[error("operator '{operator}' is not supported by field '{field}' at position {position}")]
    OperatorNotSupported {
        /// The field name as typed.
        field: String,
        /// The operator as typed.
        operator: String,
        /// Byte offset of the operator.
        position: usize,
    },

    /// A value does not fit the field's kind.
    #[error("invalid value '{value}' for field '{field}' at position {position} (expected {expected})")]
    InvalidLiteral {
        /// The field name as typed.
        field: String,
        /// The rejected value.
        value: String,
        /// Human-readable description of what the field accepts.
        expected: &'static str,
        /// Byte offset of the value.
        position: usize,
    },

    /// A parenthesis without a partner.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParens {
        /// Byte offset of the unmatched parenthesis.
        position: usize,
    },

    /// The input ended in the middle of an expression.
    #[error("unexpected end of query at position {position}")]
    UnexpectedEndOfInput {
        /// Byte length of the input.
        position: usize,
    },

    /// Parentheses, `NOT` or chained `AND`/`OR` nest past
    /// [`MAX_DEPTH`](crate::MAX_DEPTH) levels.
    #[error("query nests deeper than {limit} levels at position {position}")]
    NestingTooDeep {
        /// Byte offset of the token that opened the extra level.
        position: usize,
        /// The nesting limit.
        limit: usize,
    },

    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The raw token text.
        token: String,
        /// Byte offset of the token.
        position: usize,
    },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

impl QueryError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        QueryError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Returns the byte offset the error refers to, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::Lex(e) => Some(e.position),
            QueryError::EmptyExpression => None,
            QueryError::UnknownField { position, .. }
            | QueryError::OperatorNotSupported { position, .. }
            | QueryError::InvalidLiteral { position, .. }
            | QueryError::UnbalancedParens { position }
            | QueryError::UnexpectedEndOfInput { position }
            | QueryError::NestingTooDeep { position, .. }
            | QueryError::UnexpectedToken { position, .. } => Some(*position),
        }
    }

    /// Formats the error with the query echoed and a caret under the
    /// offending position.
    ///
    /// # Example
    ///
    /// ```
    /// use atask_query::parse;
    ///
    /// let query = "status:(open";
    /// let err = parse(query).unwrap_err();
    /// let rendered = err.render(query);
    /// assert!(rendered.contains("  status:(open"));
    /// assert!(rendered.ends_with("         ^"));
    /// ```
    pub fn render(&self, query: &str) -> String {
        let mut out = format!("query error: {self}\n  {query}");
        if let Some(position) = self.position() {
            let clamped = position.min(query.len());
            // Offsets are in bytes, the caret column is in characters.
            let column = query
                .get(..clamped)
                .map_or(clamped, |prefix| prefix.chars().count());
            out.push_str(&format!("\n  {}^", " ".repeat(column)));
        }
        out
    }
}
