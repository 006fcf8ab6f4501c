//! Boolean query language for filtering task records.
//!
//! A query is parsed once into an immutable [`Expr`] and then evaluated
//! against any number of records implementing [`RecordView`].
//!
//! # Syntax
//!
//! ## Comparisons
//! - `field:value` or `field=value` - Equality
//! - `field!=value` - Inequality
//! - `field>value`, `field<value` - Ordering (numeric fields only)
//!
//! Values containing spaces or operator characters are quoted with `"` or
//! `'`. Field names and the keywords below ignore case.
//!
//! ## Special Values
//! - `empty`, `set` - Whether a string, date or numeric field has a value
//! - `overdue`, `today`, `week`, `soon` - Relative dates (date fields only)
//!
//! ## Boolean Operators
//! - `NOT` - Negation (binds tightest)
//! - `AND` - Conjunction
//! - `OR` - Disjunction
//! - `()` - Grouping
//!
//! Parentheses, `NOT` and chained `AND`/`OR` may nest up to [`MAX_DEPTH`]
//! levels.
//!
//! # Example
//!
//! ```
//! use atask_query::{parse, EvalConfig, QueryEvaluator};
//!
//! let expr = parse("status:open AND (due:overdue OR priority:p1)").unwrap();
//! assert_eq!(
//!     expr.to_string(),
//!     "(status:open AND (due-date:overdue OR priority:p1))"
//! );
//!
//! let config = EvalConfig::default();
//! let evaluator = QueryEvaluator::new(&expr, &config);
//! # let _ = evaluator;
//! ```

mod ast;
mod error;
mod evaluator;
mod fields;
mod lexer;
mod parser;
mod record;
mod value;

pub use ast::{Comparison, Expr, Operator};
pub use error::{LexError, LexErrorKind, QueryError, QueryResult};
pub use evaluator::{evaluate, EvalConfig, QueryEvaluator, DEFAULT_SOON_HORIZON, PARALLEL_THRESHOLD};
pub use fields::{lookup, suggest, FieldKind, FieldSpec, FIELDS};
pub use lexer::{tokenize, Lexer, OpToken, Token, TokenKind};
pub use parser::{parse, QueryParser, MAX_DEPTH};
pub use record::{DateField, NumberField, RecordView, StringField};
pub use value::{parse_date_literal, parse_record_date, SpecialValue, Value, DATE_FORMAT};
