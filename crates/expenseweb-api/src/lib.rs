//! HTTP API server for the expense dashboard
//!
//! Routes are organized into modules:
//! - routes::charts: filter-state-driven chart series
//! - routes::expenses: unified expense table, pagination, CRUD
//! - routes::dashboard: summary cards, revenue chart, latest payments
//! - routes::meta: vendor and category lists for form autocomplete
//!
//! The server speaks JSON only; rendering is the frontend's concern,
//! so every route lives under /api and CORS is open.

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use expenseweb_client::{BackendClient, ExpenseResolver};
use expenseweb_config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub resolver: ExpenseResolver,
    pub config: Config,
}

impl AppState {
    /// Build the shared state around one backend client
    pub fn new(backend: BackendClient, config: Config) -> Self {
        let backend = Arc::new(backend);
        let resolver = ExpenseResolver::new(backend.clone());
        Self {
            backend,
            resolver,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::charts::api_chart;
    use routes::dashboard::{api_cards, api_latest_payments, api_overview, api_revenue};
    use routes::expenses::{
        api_expense_create, api_expense_delete, api_expense_detail, api_expense_update,
        api_expenses, api_expenses_pages,
    };
    use routes::meta::{api_categories, api_form_meta, api_vendors};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/charts/:mode", get(api_chart))
        .route("/api/expenses", get(api_expenses).post(api_expense_create))
        .route("/api/expenses/pages", get(api_expenses_pages))
        .route(
            "/api/expenses/:id",
            get(api_expense_detail)
                .put(api_expense_update)
                .delete(api_expense_delete),
        )
        .route("/api/dashboard/overview", get(api_overview))
        .route("/api/dashboard/cards", get(api_cards))
        .route("/api/dashboard/revenue", get(api_revenue))
        .route("/api/dashboard/latest-payments", get(api_latest_payments))
        .route("/api/vendors", get(api_vendors))
        .route("/api/categories", get(api_categories))
        .route("/api/form-meta", get(api_form_meta))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// This is the main entry point for the expenseweb server. It creates
/// the router, binds to the configured address, and starts listening
/// for requests.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `backend` - The upstream backend client
pub async fn start_server(config: Config, backend: BackendClient) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(backend, config);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting expenseweb server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - /api/charts/:mode (Chart series)");
    eprintln!("[INFO]   - /api/expenses (Expense table and CRUD)");
    eprintln!("[INFO]   - /api/dashboard/* (Summary data)");
    eprintln!("[INFO]   - /api/vendors, /api/categories (Form lists)");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}
