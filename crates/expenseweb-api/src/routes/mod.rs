//! Route modules for the API server
//!
//! All routes are organized into modules:
//! - charts: filter-state-driven chart series
//! - expenses: unified expense table, pagination, and CRUD
//! - dashboard: summary cards, revenue chart, latest payments
//! - meta: distinct vendor/category lists for form autocomplete

pub mod charts;
pub mod dashboard;
pub mod expenses;
pub mod meta;
