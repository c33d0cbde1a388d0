//! Dashboard summary endpoints
//!
//! Card totals, the monthly revenue chart, and the latest settled
//! payments. All of these are read paths and fail open: an unreachable
//! backend logs the failure and yields the zero/empty shape.

use crate::AppState;
use axum::extract::State;
use axum::Json;
use expenseweb_core::{CardData, LatestPayment, MonthlyRevenue};
use serde::Serialize;

/// Everything the dashboard overview needs in one response
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub cards: CardData,
    pub revenue: Vec<MonthlyRevenue>,
    pub latest_payments: Vec<LatestPayment>,
}

/// Get the summary card totals (JSON API)
pub async fn api_cards(State(state): State<AppState>) -> Json<CardData> {
    match state.backend.card_data().await {
        Ok(cards) => Json(cards),
        Err(err) => {
            log::warn!("Card data fetch failed, rendering zero state: {}", err);
            Json(CardData::zeroed())
        }
    }
}

/// Get monthly revenue totals for the overview chart (JSON API)
pub async fn api_revenue(State(state): State<AppState>) -> Json<Vec<MonthlyRevenue>> {
    match state.backend.expenses_by_month().await {
        Ok(months) => Json(months),
        Err(err) => {
            log::warn!("Monthly revenue fetch failed, rendering empty chart: {}", err);
            Json(Vec::new())
        }
    }
}

/// Get the most recently settled payments (JSON API)
pub async fn api_latest_payments(State(state): State<AppState>) -> Json<Vec<LatestPayment>> {
    match state.backend.latest_payments().await {
        Ok(payments) => Json(payments),
        Err(err) => {
            log::warn!("Latest payments fetch failed, rendering empty list: {}", err);
            Json(Vec::new())
        }
    }
}

/// Get the full dashboard overview (JSON API)
///
/// The three fetches are independent, run concurrently, and are joined
/// before the response is assembled; nothing is emitted from a partial
/// join. Each degrades to its own zero state on failure.
pub async fn api_overview(State(state): State<AppState>) -> Json<DashboardOverview> {
    let (cards, revenue, latest_payments) = tokio::join!(
        state.backend.card_data(),
        state.backend.expenses_by_month(),
        state.backend.latest_payments(),
    );

    let cards = cards.unwrap_or_else(|err| {
        log::warn!("Card data fetch failed, rendering zero state: {}", err);
        CardData::zeroed()
    });
    let revenue = revenue.unwrap_or_else(|err| {
        log::warn!("Monthly revenue fetch failed, rendering empty chart: {}", err);
        Vec::new()
    });
    let latest_payments = latest_payments.unwrap_or_else(|err| {
        log::warn!("Latest payments fetch failed, rendering empty list: {}", err);
        Vec::new()
    });

    Json(DashboardOverview {
        cards,
        revenue,
        latest_payments,
    })
}
