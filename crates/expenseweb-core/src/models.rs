//! Domain models for the expense dashboard
//!
//! The upstream backend splits the domain into two collections: bills
//! (unsettled obligations with an explicit status) and payments
//! (settled records with no status field). `Expense` is the unified
//! read model presented to callers.
//!
//! Monetary amounts are integer cents everywhere; display formatting
//! divides by 100 at render time only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Settlement status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Obligation not yet settled
    Pending,
    /// Settled transaction
    Paid,
}

impl std::str::FromStr for ExpenseStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ExpenseStatus::Pending),
            "paid" => Ok(ExpenseStatus::Paid),
            _ => Err(format!("Invalid expense status: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseStatus::Pending => write!(f, "pending"),
            ExpenseStatus::Paid => write!(f, "paid"),
        }
    }
}

/// An unsettled expense obligation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub vendor: String,
    pub category: String,
    /// Amount in integer cents
    pub amount: i64,
    pub status: ExpenseStatus,
    pub created_at: NaiveDateTime,
}

/// A settled expense record; carries no status field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub vendor: String,
    pub category: String,
    /// Amount in integer cents
    pub amount: i64,
    pub created_at: NaiveDateTime,
}

/// Unified read model over bills and payments
///
/// Immutable once fetched; the aggregator never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub vendor: String,
    pub category: String,
    /// Amount in integer cents
    pub amount: i64,
    pub status: ExpenseStatus,
    pub created_at: NaiveDateTime,
}

impl From<Bill> for Expense {
    fn from(bill: Bill) -> Self {
        Expense {
            id: bill.id,
            vendor: bill.vendor,
            category: bill.category,
            amount: bill.amount,
            status: bill.status,
            created_at: bill.created_at,
        }
    }
}

impl From<Payment> for Expense {
    fn from(payment: Payment) -> Self {
        // Payments carry no status on the wire; paid is synthesized
        Expense {
            id: payment.id,
            vendor: payment.vendor,
            category: payment.category,
            amount: payment.amount,
            status: ExpenseStatus::Paid,
            created_at: payment.created_at,
        }
    }
}

/// Submitted create/update payload for an expense form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub vendor: String,
    pub category: String,
    /// Amount in integer cents
    pub amount: i64,
    pub status: ExpenseStatus,
}

// ==================== Dashboard Read Models ====================

/// Summary totals for the dashboard cards
///
/// The monetary fields arrive pre-formatted from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub total_payments: String,
    pub pending_bills: String,
    pub total_bills: i64,
    pub total_categories: i64,
}

impl CardData {
    /// Empty-state card data used when the backend is unreachable
    pub fn zeroed() -> Self {
        Self {
            total_payments: "$0.00".to_string(),
            pending_bills: "$0.00".to_string(),
            total_bills: 0,
            total_categories: 0,
        }
    }
}

/// One month of the revenue chart
///
/// The by-month endpoint is the one place amounts cross the boundary in
/// whole currency units rather than cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

/// A recently settled payment for the dashboard list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPayment {
    pub id: String,
    pub vendor: String,
    pub category: String,
    /// Pre-formatted amount string from the backend
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("pending".parse::<ExpenseStatus>().unwrap(), ExpenseStatus::Pending);
        assert_eq!("paid".parse::<ExpenseStatus>().unwrap(), ExpenseStatus::Paid);
        assert_eq!("PAID".parse::<ExpenseStatus>().unwrap(), ExpenseStatus::Paid);
        assert!("settled".parse::<ExpenseStatus>().is_err());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ExpenseStatus::Paid).unwrap(), "\"paid\"");
        let status: ExpenseStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, ExpenseStatus::Pending);
    }

    #[test]
    fn test_payment_unifies_as_paid() {
        let payment = Payment {
            id: "p1".to_string(),
            vendor: "Acme".to_string(),
            category: "Travel".to_string(),
            amount: 1200,
            created_at: timestamp(),
        };
        let expense = Expense::from(payment);
        assert_eq!(expense.status, ExpenseStatus::Paid);
        assert_eq!(expense.amount, 1200);
    }

    #[test]
    fn test_bill_unifies_with_own_status() {
        let bill = Bill {
            id: "b1".to_string(),
            vendor: "Acme".to_string(),
            category: "Utilities".to_string(),
            amount: 500,
            status: ExpenseStatus::Pending,
            created_at: timestamp(),
        };
        let expense = Expense::from(bill);
        assert_eq!(expense.status, ExpenseStatus::Pending);
    }

    #[test]
    fn test_expense_wire_format() {
        // Field names and the naive ISO timestamp must match the backend
        let json = r#"{
            "id": "e1",
            "vendor": "Acme",
            "category": "Travel",
            "amount": 1200,
            "status": "paid",
            "created_at": "2025-06-15T10:30:00"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.created_at, timestamp());
        assert_eq!(expense.amount, 1200);
    }

    #[test]
    fn test_card_data_wire_is_camel_case() {
        let json = r#"{
            "totalPayments": "$12.00",
            "pendingBills": "$3.50",
            "totalBills": 4,
            "totalCategories": 2
        }"#;
        let cards: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(cards.total_bills, 4);
        assert_eq!(cards.total_payments, "$12.00");
    }

    #[test]
    fn test_card_data_zeroed() {
        let cards = CardData::zeroed();
        assert_eq!(cards.total_payments, "$0.00");
        assert_eq!(cards.total_bills, 0);
    }
}
