//! Query evaluation against records.
//!
//! This module provides the [`QueryEvaluator`] for testing parsed query
//! expressions against anything implementing [`RecordView`].
//!
//! # Example
//!
//! ```
//! use atask_query::{parse, EvalConfig, QueryEvaluator};
//! use chrono::NaiveDate;
//!
//! let expr = parse("due:overdue OR priority:p1").unwrap();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let config = EvalConfig::default().with_today(today);
//!
//! let evaluator = QueryEvaluator::new(&expr, &config);
//! # struct Empty;
//! # impl atask_query::RecordView for Empty {
//! #     fn string(&self, _: atask_query::StringField) -> &str { "" }
//! #     fn date(&self, _: atask_query::DateField) -> &str { "" }
//! #     fn number(&self, _: atask_query::NumberField) -> Option<i64> { None }
//! #     fn tags(&self) -> &[String] { &[] }
//! # }
//! let records: Vec<Empty> = vec![Empty];
//! assert!(evaluator.filter_records(&records).is_empty());
//! ```

use chrono::{Local, NaiveDate};
use rayon::prelude::*;

use crate::ast::Expr;
use crate::record::RecordView;

/// Default horizon, in days, for the `soon` date value.
pub const DEFAULT_SOON_HORIZON: u32 = 3;

/// Record count below which [`QueryEvaluator::par_filter_records`] stays
/// sequential.
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Inputs to evaluation that do not come from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Days ahead (inclusive) that count as `soon`.
    pub soon_horizon: u32,
    /// The calendar day relative dates are measured from.
    pub today: NaiveDate,
}

impl EvalConfig {
    /// Creates a config with the given horizon, measured from the local
    /// calendar day.
    pub fn new(soon_horizon: u32) -> Self {
        Self {
            soon_horizon,
            today: Local::now().date_naive(),
        }
    }

    /// Pins the reference day.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOON_HORIZON)
    }
}

/// Evaluates `expr` against a single record.
///
/// `AND` and `OR` short-circuit left to right. Evaluation never fails:
/// comparisons that cannot apply to a record simply do not match.
pub fn evaluate<R: RecordView + ?Sized>(expr: &Expr, record: &R, config: &EvalConfig) -> bool {
    match expr {
        Expr::And(left, right) => evaluate(left, record, config) && evaluate(right, record, config),
        Expr::Or(left, right) => evaluate(left, record, config) || evaluate(right, record, config),
        Expr::Not(inner) => !evaluate(inner, record, config),
        Expr::Comparison(c) => c.field.kind.matches(record, c.op, &c.value, config),
    }
}

impl Expr {
    /// Evaluates this expression against a single record.
    pub fn evaluate<R: RecordView + ?Sized>(&self, record: &R, config: &EvalConfig) -> bool {
        evaluate(self, record, config)
    }
}

/// Evaluates a parsed query against records.
#[derive(Debug, Clone, Copy)]
pub struct QueryEvaluator<'a> {
    expr: &'a Expr,
    config: &'a EvalConfig,
}

impl<'a> QueryEvaluator<'a> {
    /// Creates a new evaluator.
    pub fn new(expr: &'a Expr, config: &'a EvalConfig) -> Self {
        Self { expr, config }
    }

    /// Returns true if the record matches the query.
    pub fn matches<R: RecordView + ?Sized>(&self, record: &R) -> bool {
        evaluate(self.expr, record, self.config)
    }

    /// Filters a slice of records, returning only those that match, in
    /// their original order.
    pub fn filter_records<'b, R: RecordView>(&self, records: &'b [R]) -> Vec<&'b R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Like [`filter_records`](Self::filter_records), spread across the
    /// rayon thread pool for large inputs. Output order is preserved.
    pub fn par_filter_records<'b, R: RecordView + Sync>(&self, records: &'b [R]) -> Vec<&'b R> {
        if records.len() < PARALLEL_THRESHOLD {
            return self.filter_records(records);
        }
        records.par_iter().filter(|r| self.matches(*r)).collect()
    }
}
