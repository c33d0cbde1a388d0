//! Core domain logic for expenseweb
//!
//! Pure data model, filter evaluation, chart aggregation, and form
//! validation. No I/O happens in this crate; talking to the upstream
//! backend lives in expenseweb-client and serving lives in
//! expenseweb-api.

pub mod charts;
pub mod error;
pub mod filters;
pub mod models;
pub mod validate;

pub use charts::{aggregate, series_total, ChartMode, ChartPoint, ChartSeries, TOP_ENTRIES};
pub use error::{CoreError, CoreResult};
pub use filters::{FilterSet, StatusFilter};
pub use models::{
    Bill, CardData, Expense, ExpenseDraft, ExpenseStatus, LatestPayment, MonthlyRevenue, Payment,
};
pub use validate::{validate_draft, FieldErrors};
