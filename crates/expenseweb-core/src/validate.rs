//! Form validation for expense drafts
//!
//! Validation failures are recovered locally and surfaced as per-field
//! messages next to the offending form field, never as a generic toast.

use crate::error::CoreError;
use crate::models::ExpenseDraft;
use serde::Serialize;

/// Per-field validation messages for a submitted expense form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vendor: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amount: Vec<String>,
}

impl FieldErrors {
    /// True when no field collected a message
    pub fn is_empty(&self) -> bool {
        self.vendor.is_empty() && self.category.is_empty() && self.amount.is_empty()
    }
}

/// Validate a draft before any write is issued
///
/// Returns the full set of field messages at once so the form can mark
/// every offending field in a single round trip.
pub fn validate_draft(draft: &ExpenseDraft) -> Result<(), CoreError> {
    let mut errors = FieldErrors::default();

    if draft.vendor.trim().is_empty() {
        errors.vendor.push("Please enter a vendor name.".to_string());
    }
    if draft.category.trim().is_empty() {
        errors.category.push("Please enter a category.".to_string());
    }
    if draft.amount <= 0 {
        errors
            .amount
            .push("Please enter an amount greater than $0.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation { errors })
    }
}
