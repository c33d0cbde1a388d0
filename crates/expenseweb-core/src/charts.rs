//! Chart aggregation
//!
//! Turns a flat transaction list plus a `FilterSet` into chart-ready
//! series: sum-by-day, count-by-day, and top-5 rankings by category or
//! vendor. Pure functions of their inputs; any caching of the
//! transaction list is the caller's responsibility.

use crate::error::CoreError;
use crate::filters::FilterSet;
use crate::models::Expense;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Number of entries kept by the ranking chart modes
pub const TOP_ENTRIES: usize = 5;

/// Chart grouping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Sum of amounts per calendar day
    Amount,
    /// Transaction count per calendar day
    Count,
    /// Top categories by summed amount
    Category,
    /// Top vendors by summed amount
    Vendor,
}

impl std::str::FromStr for ChartMode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amount" => Ok(ChartMode::Amount),
            "count" => Ok(ChartMode::Count),
            "category" => Ok(ChartMode::Category),
            "vendor" => Ok(ChartMode::Vendor),
            _ => Err(CoreError::UnknownChartMode {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ChartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartMode::Amount => write!(f, "amount"),
            ChartMode::Count => write!(f, "count"),
            ChartMode::Category => write!(f, "category"),
            ChartMode::Vendor => write!(f, "vendor"),
        }
    }
}

/// One chart bucket
///
/// `key` is an ISO date for the time-series modes and a category or
/// vendor name for the ranking modes. `value` is integer cents for the
/// amount-summing modes and a plain count for `ChartMode::Count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub key: String,
    pub value: i64,
}

/// Ordered chart buckets: ascending date for time series, descending
/// value for rankings
pub type ChartSeries = Vec<ChartPoint>;

/// Aggregate a transaction list into a chart series
///
/// Retains transactions passing every active filter constraint relative
/// to `now`, then groups them by the mode-specific key. The caller
/// supplies `now` so repeated calls with identical inputs yield
/// identical output.
pub fn aggregate(
    transactions: &[Expense],
    filters: &FilterSet,
    mode: ChartMode,
    now: NaiveDateTime,
) -> ChartSeries {
    let cutoff = filters.cutoff(now);
    let passing = transactions.iter().filter(|t| filters.matches(t, cutoff));

    match mode {
        ChartMode::Amount => daily(passing, |t| t.amount),
        ChartMode::Count => daily(passing, |_| 1),
        ChartMode::Category => ranked(passing, |t| t.category.as_str()),
        ChartMode::Vendor => ranked(passing, |t| t.vendor.as_str()),
    }
}

/// Sum of all values in a series
pub fn series_total(series: &ChartSeries) -> i64 {
    series.iter().map(|p| p.value).sum()
}

/// Bucket by calendar day, emitted in ascending date order
///
/// The day key is the timestamp's own encoded date component, not a
/// timezone-converted one.
fn daily<'a, F>(transactions: impl Iterator<Item = &'a Expense>, value: F) -> ChartSeries
where
    F: Fn(&Expense) -> i64,
{
    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for t in transactions {
        *buckets.entry(t.created_at.date()).or_insert(0) += value(t);
    }
    buckets
        .into_iter()
        .map(|(date, value)| ChartPoint {
            key: date.to_string(),
            value,
        })
        .collect()
}

/// Sum amounts per key, then keep the top entries by value
///
/// Buckets are built in first-encountered order so the stable
/// descending sort breaks ties by first appearance.
fn ranked<'a, F>(transactions: impl Iterator<Item = &'a Expense>, key: F) -> ChartSeries
where
    F: Fn(&Expense) -> &str,
{
    let mut order: Vec<ChartPoint> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in transactions {
        let k = key(t);
        match index.get(k) {
            Some(&i) => order[i].value += t.amount,
            None => {
                index.insert(k.to_string(), order.len());
                order.push(ChartPoint {
                    key: k.to_string(),
                    value: t.amount,
                });
            }
        }
    }

    order.sort_by(|a, b| b.value.cmp(&a.value));
    order.truncate(TOP_ENTRIES);
    order
}
