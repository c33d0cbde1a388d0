//! HTTP client for the upstream expense backend
//!
//! The backend exposes a flat JSON REST surface: bills and payments as
//! two physically distinct collections, plus unified listing,
//! aggregate, and distinct-value endpoints. `BackendClient` is the
//! typed client; the per-collection operations are behind the
//! `ExpenseBackend` trait so the resolver can be exercised against an
//! in-memory backend in tests.

pub mod error;
pub mod resolver;

use async_trait::async_trait;
use expenseweb_core::{
    Bill, CardData, Expense, ExpenseDraft, ExpenseStatus, LatestPayment, MonthlyRevenue, Payment,
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub use error::{ClientError, ClientResult};
pub use resolver::{ExpenseResolver, ResolvedExpense};

/// Backend reference type
pub type BackendRef = Arc<dyn ExpenseBackend>;

// ==================== Backend Trait ====================

/// Per-collection operations against the bill and payment resources
#[async_trait]
pub trait ExpenseBackend: Send + Sync {
    async fn get_bill(&self, id: &str) -> ClientResult<Bill>;
    async fn get_payment(&self, id: &str) -> ClientResult<Payment>;
    async fn create_bill(&self, draft: &ExpenseDraft) -> ClientResult<Bill>;
    async fn create_payment(&self, draft: &ExpenseDraft) -> ClientResult<Payment>;
    async fn update_bill(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Bill>;
    async fn update_payment(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Payment>;
    async fn delete_bill(&self, id: &str) -> ClientResult<()>;
    async fn delete_payment(&self, id: &str) -> ClientResult<()>;
}

// ==================== Wire Payloads ====================

/// Create/update body for the bills collection
///
/// Bills carry an explicit status; the payments schema has none.
#[derive(Debug, Serialize)]
struct BillPayload<'a> {
    vendor: &'a str,
    category: &'a str,
    amount: i64,
    status: ExpenseStatus,
}

impl<'a> From<&'a ExpenseDraft> for BillPayload<'a> {
    fn from(draft: &'a ExpenseDraft) -> Self {
        Self {
            vendor: &draft.vendor,
            category: &draft.category,
            amount: draft.amount,
            status: draft.status,
        }
    }
}

/// Create/update body for the payments collection
#[derive(Debug, Serialize)]
struct PaymentPayload<'a> {
    vendor: &'a str,
    category: &'a str,
    amount: i64,
}

impl<'a> From<&'a ExpenseDraft> for PaymentPayload<'a> {
    fn from(draft: &'a ExpenseDraft) -> Self {
        Self {
            vendor: &draft.vendor,
            category: &draft.category,
            amount: draft.amount,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PagesResponse {
    total_pages: u64,
}

// ==================== Client ====================

/// Typed client for the expense REST backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Build a client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        // Endpoint paths are joined relative to the base; a trailing
        // slash keeps an existing path prefix intact.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::from)?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
            })
    }

    /// Classify the response status, then decode the JSON body
    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        Self::check_status(path, &response)?;
        response.json::<T>().await.map_err(|e| ClientError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Classify the response status, discarding the body
    fn check_status(path: &str, response: &reqwest::Response) -> ClientResult<()> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        log::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        log::debug!("POST {}", url);
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        log::debug!("PUT {}", url);
        let response = self.http.put(url).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.endpoint(path)?;
        log::debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        Self::check_status(path, &response)
    }

    // ==================== Listing & Dashboard Endpoints ====================

    /// Paginated unified expense listing with keyword search
    pub async fn filtered_expenses(
        &self,
        query: &str,
        page: u64,
        items_per_page: u64,
    ) -> ClientResult<Vec<Expense>> {
        let path = format!(
            "expenses/filtered?query={}&page={}&items_per_page={}",
            urlencoding::encode(query),
            page,
            items_per_page
        );
        self.get_json(&path).await
    }

    /// Page count for the unified expense listing
    pub async fn expenses_pages(&self, query: &str, items_per_page: u64) -> ClientResult<u64> {
        let path = format!(
            "expenses/pages?query={}&items_per_page={}",
            urlencoding::encode(query),
            items_per_page
        );
        let response: PagesResponse = self.get_json(&path).await?;
        Ok(response.total_pages)
    }

    /// Monthly revenue totals for the dashboard chart
    pub async fn expenses_by_month(&self) -> ClientResult<Vec<MonthlyRevenue>> {
        self.get_json("expenses/by-month").await
    }

    /// Summary totals for the dashboard cards
    pub async fn card_data(&self) -> ClientResult<CardData> {
        self.get_json("dashboard/card-data").await
    }

    /// Most recently settled payments
    pub async fn latest_payments(&self) -> ClientResult<Vec<LatestPayment>> {
        self.get_json("payments/latest").await
    }

    /// Distinct vendor names for form autocomplete
    pub async fn vendors(&self) -> ClientResult<Vec<String>> {
        self.get_json("vendors/").await
    }

    /// Distinct category names for form autocomplete
    pub async fn categories(&self) -> ClientResult<Vec<String>> {
        self.get_json("categories/").await
    }
}

#[async_trait]
impl ExpenseBackend for BackendClient {
    async fn get_bill(&self, id: &str) -> ClientResult<Bill> {
        self.get_json(&format!("bills/{}", id)).await
    }

    async fn get_payment(&self, id: &str) -> ClientResult<Payment> {
        self.get_json(&format!("payments/{}", id)).await
    }

    async fn create_bill(&self, draft: &ExpenseDraft) -> ClientResult<Bill> {
        self.post_json("bills/", &BillPayload::from(draft)).await
    }

    async fn create_payment(&self, draft: &ExpenseDraft) -> ClientResult<Payment> {
        self.post_json("payments/", &PaymentPayload::from(draft))
            .await
    }

    async fn update_bill(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Bill> {
        self.put_json(&format!("bills/{}", id), &BillPayload::from(draft))
            .await
    }

    async fn update_payment(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Payment> {
        self.put_json(&format!("payments/{}", id), &PaymentPayload::from(draft))
            .await
    }

    async fn delete_bill(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("bills/{}", id)).await
    }

    async fn delete_payment(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("payments/{}", id)).await
    }
}
