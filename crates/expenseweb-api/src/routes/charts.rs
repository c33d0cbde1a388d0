//! Chart endpoints - filter-state-driven aggregation
//!
//! The filter state arrives in the query string (sharable and
//! bookmarkable): `range` names a lookback window, `expense_status` a
//! status constraint, `amount_range` is `min-max` in whole currency
//! units with the literal `Infinity` as the unbounded sentinel, and
//! `categories` is a `+`-joined list. Each key independently falls
//! back to its default when malformed.

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use expenseweb_config::RangeWindow;
use expenseweb_core::{aggregate, series_total, ChartMode, ChartSeries, FilterSet};
use serde::Serialize;
use std::collections::HashMap;

/// Chart payload: the series plus its total for the headline figure
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub mode: ChartMode,
    pub total: i64,
    pub series: ChartSeries,
}

/// Get one chart series for the requested mode (JSON API)
///
/// The transaction list is refetched in full on every request; the
/// fetch completes before aggregation runs. An upstream failure logs
/// the detail and degrades to an empty series so the page still
/// renders its zero state.
pub async fn api_chart(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ChartResponse>> {
    let mode: ChartMode = mode.parse().map_err(ApiError::from)?;
    let filters = parse_filters(&params, state.config.charts.default_range);

    let transactions = match state
        .backend
        .filtered_expenses("", 1, state.config.charts.fetch_limit)
        .await
    {
        Ok(list) => list,
        Err(err) => {
            log::warn!("Transaction fetch failed, rendering empty series: {}", err);
            Vec::new()
        }
    };

    let series = aggregate(&transactions, &filters, mode, Utc::now().naive_utc());
    let total = series_total(&series);

    Ok(Json(ChartResponse {
        mode,
        total,
        series,
    }))
}

/// Build an immutable `FilterSet` from URL query state
fn parse_filters(params: &HashMap<String, String>, default_window: RangeWindow) -> FilterSet {
    let status = params
        .get("expense_status")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    let window = params
        .get("range")
        .and_then(|s| s.parse().ok())
        .unwrap_or(default_window);

    let categories = params
        .get("categories")
        .map(|v| {
            v.split('+')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let (min_amount, max_amount) = params
        .get("amount_range")
        .map(|v| parse_amount_range(v))
        .unwrap_or((0, None));

    FilterSet {
        status,
        min_amount,
        max_amount,
        categories,
        window,
    }
}

/// Parse the `min-max` amount range into cent bounds
///
/// Values are whole currency units on the wire; cents only exist
/// internally. Anything malformed, negative, or inverted falls back to
/// the unrestricted range.
fn parse_amount_range(raw: &str) -> (i64, Option<i64>) {
    let open = (0, None);
    let Some((min_raw, max_raw)) = raw.split_once('-') else {
        return open;
    };
    let Ok(min) = min_raw.parse::<i64>() else {
        return open;
    };
    if min < 0 {
        return open;
    }
    let max = if max_raw == "Infinity" {
        None
    } else {
        match max_raw.parse::<i64>() {
            Ok(v) if v >= min => Some(v * 100),
            _ => return open,
        }
    };
    (min * 100, max)
}
