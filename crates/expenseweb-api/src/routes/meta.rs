//! Form metadata endpoints - distinct vendor and category lists
//!
//! The create/edit form needs both lists at once; `api_form_meta`
//! fetches them concurrently and joins the results. Read paths fail
//! open to empty lists.

use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// Both autocomplete lists for the expense form
#[derive(Debug, Serialize)]
pub struct FormMeta {
    pub vendors: Vec<String>,
    pub categories: Vec<String>,
}

/// Get distinct vendor names (JSON API)
pub async fn api_vendors(State(state): State<AppState>) -> Json<Vec<String>> {
    match state.backend.vendors().await {
        Ok(vendors) => Json(vendors),
        Err(err) => {
            log::warn!("Vendor list fetch failed, rendering empty list: {}", err);
            Json(Vec::new())
        }
    }
}

/// Get distinct category names (JSON API)
pub async fn api_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    match state.backend.categories().await {
        Ok(categories) => Json(categories),
        Err(err) => {
            log::warn!("Category list fetch failed, rendering empty list: {}", err);
            Json(Vec::new())
        }
    }
}

/// Get both form lists, fetched concurrently and joined (JSON API)
pub async fn api_form_meta(State(state): State<AppState>) -> Json<FormMeta> {
    let (vendors, categories) = tokio::join!(state.backend.vendors(), state.backend.categories());

    let vendors = vendors.unwrap_or_else(|err| {
        log::warn!("Vendor list fetch failed, rendering empty list: {}", err);
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|err| {
        log::warn!("Category list fetch failed, rendering empty list: {}", err);
        Vec::new()
    });

    Json(FormMeta {
        vendors,
        categories,
    })
}
