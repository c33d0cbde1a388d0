//! Filter state driving chart aggregation
//!
//! A `FilterSet` is an immutable value derived from URL query state by
//! the serving layer and passed by parameter into the aggregator. It
//! holds no hidden state and is recomputed on every query change.

use crate::models::{Expense, ExpenseStatus};
use chrono::{Duration, NaiveDateTime};
use expenseweb_config::RangeWindow;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Status constraint applied to the transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No status restriction
    All,
    /// Only unsettled bills
    Pending,
    /// Only settled expenses
    Paid,
}

impl StatusFilter {
    /// Check whether a transaction status passes this constraint
    pub fn matches(&self, status: ExpenseStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == ExpenseStatus::Pending,
            StatusFilter::Paid => status == ExpenseStatus::Paid,
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "paid" => Ok(StatusFilter::Paid),
            _ => Err(format!("Invalid status filter: {}", s)),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Pending => write!(f, "pending"),
            StatusFilter::Paid => write!(f, "paid"),
        }
    }
}

/// The combined set of active query constraints
///
/// Invariant: when `max_amount` is `Some`, `min_amount <= max_amount`.
/// The query parser falls back to the unrestricted range for input that
/// would violate this.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    /// Status constraint
    pub status: StatusFilter,
    /// Lower amount bound in integer cents (inclusive)
    pub min_amount: i64,
    /// Upper amount bound in integer cents (inclusive); `None` means
    /// unbounded
    pub max_amount: Option<i64>,
    /// Selected categories; empty means no restriction
    pub categories: HashSet<String>,
    /// Lookback window from "now"
    pub window: RangeWindow,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            min_amount: 0,
            max_amount: None,
            categories: HashSet::new(),
            window: RangeWindow::default(),
        }
    }
}

impl FilterSet {
    /// Start of the lookback window, by calendar-day subtraction
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - Duration::days(self.window.days())
    }

    /// Check whether a transaction passes every active constraint
    pub fn matches(&self, expense: &Expense, cutoff: NaiveDateTime) -> bool {
        expense.created_at >= cutoff
            && self.status.matches(expense.status)
            && expense.amount >= self.min_amount
            && self.max_amount.map_or(true, |max| expense.amount <= max)
            && (self.categories.is_empty() || self.categories.contains(&expense.category))
    }
}
