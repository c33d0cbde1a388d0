//! Dual-resource resolution over bills and payments
//!
//! The two collections share one id namespace and an identifier alone
//! does not encode which collection it belongs to. Operations probe
//! the bills collection first (the common mutable case) and move to
//! payments only on a not-found response; any other failure surfaces
//! immediately rather than being masked as a false negative.

use crate::error::{ClientError, ClientResult};
use crate::BackendRef;
use expenseweb_core::{Bill, Expense, ExpenseDraft, ExpenseStatus, Payment};

/// Outcome of a lookup, tagged by the collection that answered
#[derive(Debug, Clone)]
pub enum ResolvedExpense {
    Bill(Bill),
    Payment(Payment),
}

impl ResolvedExpense {
    /// Collapse into the unified read model
    ///
    /// A payment synthesizes `status = paid`; the wire record carries
    /// no status field.
    pub fn into_expense(self) -> Expense {
        match self {
            ResolvedExpense::Bill(bill) => bill.into(),
            ResolvedExpense::Payment(payment) => payment.into(),
        }
    }
}

/// Unified operations over the bill/payment split
///
/// Holds no state between calls: every operation re-probes, so a bill
/// settled by another actor between calls can never leave a stale kind
/// cached here.
#[derive(Clone)]
pub struct ExpenseResolver {
    backend: BackendRef,
}

impl ExpenseResolver {
    pub fn new(backend: BackendRef) -> Self {
        Self { backend }
    }

    /// Look up an id, probing bills before payments
    pub async fn fetch(&self, id: &str) -> ClientResult<ResolvedExpense> {
        match self.backend.get_bill(id).await {
            Ok(bill) => Ok(ResolvedExpense::Bill(bill)),
            Err(err) if err.is_not_found() => {
                log::debug!("id {} not in bills, probing payments", id);
                match self.backend.get_payment(id).await {
                    Ok(payment) => Ok(ResolvedExpense::Payment(payment)),
                    Err(err) if err.is_not_found() => Err(ClientError::NotFound {
                        resource: id.to_string(),
                    }),
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Look up an id and collapse into the unified model
    pub async fn fetch_expense(&self, id: &str) -> ClientResult<Expense> {
        Ok(self.fetch(id).await?.into_expense())
    }

    /// Create a record, routed by the draft's status
    pub async fn create(&self, draft: &ExpenseDraft) -> ClientResult<Expense> {
        match draft.status {
            ExpenseStatus::Paid => Ok(self.backend.create_payment(draft).await?.into()),
            ExpenseStatus::Pending => Ok(self.backend.create_bill(draft).await?.into()),
        }
    }

    /// Update a record, routed by the draft's target status
    ///
    /// The target status decides the collection, not the collection the
    /// record currently lives in: settling a bill writes to payments,
    /// and the backend treats the write as upsert-by-id. No
    /// cross-collection move happens here.
    pub async fn update(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Expense> {
        match draft.status {
            ExpenseStatus::Paid => Ok(self.backend.update_payment(id, draft).await?.into()),
            ExpenseStatus::Pending => Ok(self.backend.update_bill(id, draft).await?.into()),
        }
    }

    /// Delete by id, probing bills before payments
    ///
    /// At most two requests are issued and the first success wins. Only
    /// a not-found response triggers the payments attempt.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        match self.backend.delete_bill(id).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => match self.backend.delete_payment(id).await {
                Ok(()) => Ok(()),
                Err(err) if err.is_not_found() => Err(ClientError::NotFound {
                    resource: id.to_string(),
                }),
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExpenseBackend;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn bill(id: &str) -> Bill {
        Bill {
            id: id.to_string(),
            vendor: "Acme".to_string(),
            category: "Utilities".to_string(),
            amount: 500,
            status: ExpenseStatus::Pending,
            created_at: timestamp(),
        }
    }

    fn payment(id: &str) -> Payment {
        Payment {
            id: id.to_string(),
            vendor: "Acme".to_string(),
            category: "Travel".to_string(),
            amount: 1200,
            created_at: timestamp(),
        }
    }

    fn draft(status: ExpenseStatus) -> ExpenseDraft {
        ExpenseDraft {
            vendor: "Acme".to_string(),
            category: "Travel".to_string(),
            amount: 1200,
            status,
        }
    }

    /// In-memory backend recording every call it receives
    #[derive(Default)]
    struct FakeBackend {
        bills: Mutex<HashMap<String, Bill>>,
        payments: Mutex<HashMap<String, Payment>>,
        calls: Mutex<Vec<&'static str>>,
        /// Simulate an outage of the bills collection
        bills_down: bool,
    }

    impl FakeBackend {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn bills_failure(&self) -> ClientError {
            ClientError::Upstream {
                status: 500,
                endpoint: "bills".to_string(),
            }
        }

        fn with_bill(self, bill: Bill) -> Self {
            self.bills.lock().unwrap().insert(bill.id.clone(), bill);
            self
        }

        fn with_payment(self, payment: Payment) -> Self {
            self.payments
                .lock()
                .unwrap()
                .insert(payment.id.clone(), payment);
            self
        }
    }

    #[async_trait]
    impl ExpenseBackend for FakeBackend {
        async fn get_bill(&self, id: &str) -> ClientResult<Bill> {
            self.record("get_bill");
            if self.bills_down {
                return Err(self.bills_failure());
            }
            self.bills
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound {
                    resource: id.to_string(),
                })
        }

        async fn get_payment(&self, id: &str) -> ClientResult<Payment> {
            self.record("get_payment");
            self.payments
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound {
                    resource: id.to_string(),
                })
        }

        async fn create_bill(&self, draft: &ExpenseDraft) -> ClientResult<Bill> {
            self.record("create_bill");
            let bill = Bill {
                id: "new-bill".to_string(),
                vendor: draft.vendor.clone(),
                category: draft.category.clone(),
                amount: draft.amount,
                status: draft.status,
                created_at: timestamp(),
            };
            self.bills
                .lock()
                .unwrap()
                .insert(bill.id.clone(), bill.clone());
            Ok(bill)
        }

        async fn create_payment(&self, draft: &ExpenseDraft) -> ClientResult<Payment> {
            self.record("create_payment");
            let payment = Payment {
                id: "new-payment".to_string(),
                vendor: draft.vendor.clone(),
                category: draft.category.clone(),
                amount: draft.amount,
                created_at: timestamp(),
            };
            self.payments
                .lock()
                .unwrap()
                .insert(payment.id.clone(), payment.clone());
            Ok(payment)
        }

        async fn update_bill(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Bill> {
            self.record("update_bill");
            let bill = Bill {
                id: id.to_string(),
                vendor: draft.vendor.clone(),
                category: draft.category.clone(),
                amount: draft.amount,
                status: draft.status,
                created_at: timestamp(),
            };
            self.bills
                .lock()
                .unwrap()
                .insert(id.to_string(), bill.clone());
            Ok(bill)
        }

        async fn update_payment(&self, id: &str, draft: &ExpenseDraft) -> ClientResult<Payment> {
            // Upsert-by-id: the record may currently live in bills
            self.record("update_payment");
            let payment = Payment {
                id: id.to_string(),
                vendor: draft.vendor.clone(),
                category: draft.category.clone(),
                amount: draft.amount,
                created_at: timestamp(),
            };
            self.payments
                .lock()
                .unwrap()
                .insert(id.to_string(), payment.clone());
            Ok(payment)
        }

        async fn delete_bill(&self, id: &str) -> ClientResult<()> {
            self.record("delete_bill");
            if self.bills_down {
                return Err(self.bills_failure());
            }
            self.bills
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| ClientError::NotFound {
                    resource: id.to_string(),
                })
        }

        async fn delete_payment(&self, id: &str) -> ClientResult<()> {
            self.record("delete_payment");
            self.payments
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| ClientError::NotFound {
                    resource: id.to_string(),
                })
        }
    }

    fn resolver(backend: FakeBackend) -> (ExpenseResolver, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        (ExpenseResolver::new(backend.clone()), backend)
    }

    #[tokio::test]
    async fn test_fetch_finds_bill_without_probing_payments() {
        let (resolver, backend) = resolver(FakeBackend::default().with_bill(bill("b1")));
        let resolved = resolver.fetch("b1").await.unwrap();
        assert!(matches!(resolved, ResolvedExpense::Bill(_)));
        assert_eq!(backend.calls(), vec!["get_bill"]);
    }

    #[tokio::test]
    async fn test_fetch_payment_synthesizes_paid_status() {
        let (resolver, backend) = resolver(FakeBackend::default().with_payment(payment("x")));
        let expense = resolver.fetch_expense("x").await.unwrap();
        assert_eq!(expense.id, "x");
        assert_eq!(expense.vendor, "Acme");
        assert_eq!(expense.amount, 1200);
        assert_eq!(expense.status, ExpenseStatus::Paid);
        assert_eq!(backend.calls(), vec!["get_bill", "get_payment"]);
    }

    #[tokio::test]
    async fn test_fetch_missing_in_both_is_not_found() {
        let (resolver, backend) = resolver(FakeBackend::default());
        let err = resolver.fetch("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.calls(), vec!["get_bill", "get_payment"]);
    }

    #[tokio::test]
    async fn test_fetch_upstream_failure_short_circuits() {
        let backend = FakeBackend {
            bills_down: true,
            ..FakeBackend::default()
        }
        .with_payment(payment("x"));
        let (resolver, backend) = resolver(backend);
        let err = resolver.fetch("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Upstream { status: 500, .. }));
        // The payments collection is never consulted
        assert_eq!(backend.calls(), vec!["get_bill"]);
    }

    #[tokio::test]
    async fn test_create_routes_by_status() {
        let (resolver, backend) = resolver(FakeBackend::default());
        resolver.create(&draft(ExpenseStatus::Pending)).await.unwrap();
        resolver.create(&draft(ExpenseStatus::Paid)).await.unwrap();
        assert_eq!(backend.calls(), vec!["create_bill", "create_payment"]);
    }

    #[tokio::test]
    async fn test_settling_a_bill_writes_to_payments() {
        // b1 currently exists only as a bill; the paid draft must still
        // go to the payments collection
        let (resolver, backend) = resolver(FakeBackend::default().with_bill(bill("b1")));
        let expense = resolver.update("b1", &draft(ExpenseStatus::Paid)).await.unwrap();
        assert_eq!(expense.status, ExpenseStatus::Paid);
        assert_eq!(backend.calls(), vec!["update_payment"]);
    }

    #[tokio::test]
    async fn test_pending_update_writes_to_bills() {
        let (resolver, backend) = resolver(FakeBackend::default().with_bill(bill("b1")));
        resolver.update("b1", &draft(ExpenseStatus::Pending)).await.unwrap();
        assert_eq!(backend.calls(), vec!["update_bill"]);
    }

    #[tokio::test]
    async fn test_delete_stops_at_first_success() {
        let (resolver, backend) = resolver(FakeBackend::default().with_bill(bill("b1")));
        resolver.delete("b1").await.unwrap();
        assert_eq!(backend.calls(), vec!["delete_bill"]);
    }

    #[tokio::test]
    async fn test_delete_falls_back_to_payments_on_not_found() {
        let (resolver, backend) = resolver(FakeBackend::default().with_payment(payment("p1")));
        resolver.delete("p1").await.unwrap();
        assert_eq!(backend.calls(), vec!["delete_bill", "delete_payment"]);
    }

    #[tokio::test]
    async fn test_delete_missing_in_both_is_not_found() {
        let (resolver, backend) = resolver(FakeBackend::default());
        let err = resolver.delete("ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.calls(), vec!["delete_bill", "delete_payment"]);
    }

    #[tokio::test]
    async fn test_delete_upstream_failure_short_circuits() {
        let backend = FakeBackend {
            bills_down: true,
            ..FakeBackend::default()
        }
        .with_payment(payment("p1"));
        let (resolver, backend) = resolver(backend);
        let err = resolver.delete("p1").await.unwrap_err();
        assert!(matches!(err, ClientError::Upstream { .. }));
        assert_eq!(backend.calls(), vec!["delete_bill"]);
    }
}
