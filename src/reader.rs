//! Ledger reader
//!
//! Pulls posted ledger lines and the two auxiliary fee feeds (invoices,
//! payments) up to a cutoff date and aggregates them into the shapes the
//! trial balance engine consumes. A posting dated exactly on the cutoff is
//! included; anything later is excluded entirely.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::traits::FinanceStore;
use crate::types::*;

/// Per-account debit and credit sums
#[derive(Debug, Clone, PartialEq)]
pub struct PostingSums {
    pub debit_total: BigDecimal,
    pub credit_total: BigDecimal,
}

impl PostingSums {
    /// Debit-signed net of the sums
    pub fn net(&self) -> BigDecimal {
        &self.debit_total - &self.credit_total
    }
}

impl Default for PostingSums {
    fn default() -> Self {
        Self {
            debit_total: BigDecimal::from(0),
            credit_total: BigDecimal::from(0),
        }
    }
}

/// Read-side aggregation over the external store
pub struct LedgerReader<S: FinanceStore> {
    storage: S,
}

impl<S: FinanceStore> LedgerReader<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Sum every posting dated on or before the cutoff, grouped by account.
    /// Each posting is counted exactly once.
    pub async fn posting_sums_as_of(
        &self,
        cutoff: NaiveDate,
    ) -> FinanceResult<HashMap<String, PostingSums>> {
        let postings = self.storage.postings_through(cutoff).await?;
        let mut sums: HashMap<String, PostingSums> = HashMap::new();
        for posting in postings {
            let entry = sums.entry(posting.account_id.clone()).or_default();
            entry.debit_total += &posting.debit;
            entry.credit_total += &posting.credit;
        }
        Ok(sums)
    }

    /// Invoices dated on or before the cutoff that still carry an
    /// outstanding balance, ascending by date
    pub async fn outstanding_invoices_as_of(
        &self,
        cutoff: NaiveDate,
    ) -> FinanceResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .storage
            .invoices_through(cutoff)
            .await?
            .into_iter()
            .filter(|invoice| invoice.balance_due > BigDecimal::from(0))
            .collect();
        invoices.sort_by_key(|invoice| invoice.invoice_date);
        Ok(invoices)
    }

    /// Total outstanding invoice balance as of the cutoff
    pub async fn receivables_total_as_of(&self, cutoff: NaiveDate) -> FinanceResult<BigDecimal> {
        let invoices = self.outstanding_invoices_as_of(cutoff).await?;
        Ok(invoices.iter().map(|invoice| &invoice.balance_due).sum())
    }

    /// Completed payments dated on or before the cutoff, ascending by date
    pub async fn completed_payments_as_of(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .storage
            .payments_through(cutoff)
            .await?
            .into_iter()
            .filter(|payment| payment.status == PaymentStatus::Completed)
            .collect();
        payments.sort_by_key(|payment| payment.payment_date);
        Ok(payments)
    }

    /// Total completed payment amount as of the cutoff
    pub async fn completed_payments_total_as_of(
        &self,
        cutoff: NaiveDate,
    ) -> FinanceResult<BigDecimal> {
        let payments = self.completed_payments_as_of(cutoff).await?;
        Ok(payments.iter().map(|payment| &payment.amount).sum())
    }

    /// Postings for one account up to the cutoff, ascending by date - the
    /// drill-down source
    pub async fn postings_for_account(
        &self,
        account_id: &str,
        cutoff: NaiveDate,
    ) -> FinanceResult<Vec<Posting>> {
        let mut postings = self
            .storage
            .account_postings_through(account_id, cutoff)
            .await?;
        postings.sort_by_key(|posting| posting.transaction_date);
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_store::MemoryStore;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn posting_on_cutoff_included_day_after_excluded() {
        let store = MemoryStore::new();
        store.add_posting(Posting::debit(
            "cash".to_string(),
            date(2024, 1, 31),
            BigDecimal::from(100),
            "je-1".to_string(),
        ));
        store.add_posting(Posting::debit(
            "cash".to_string(),
            date(2024, 2, 1),
            BigDecimal::from(50),
            "je-2".to_string(),
        ));

        let reader = LedgerReader::new(store);
        let sums = reader.posting_sums_as_of(date(2024, 1, 31)).await.unwrap();
        assert_eq!(sums["cash"].debit_total, BigDecimal::from(100));

        let sums = reader.posting_sums_as_of(date(2024, 2, 1)).await.unwrap();
        assert_eq!(sums["cash"].debit_total, BigDecimal::from(150));
    }

    #[tokio::test]
    async fn receivables_skip_settled_and_future_invoices() {
        let store = MemoryStore::new();
        store.add_invoice(Invoice {
            id: Uuid::new_v4(),
            invoice_date: date(2024, 1, 15),
            balance_due: BigDecimal::from(500),
            student_id: "s1".to_string(),
        });
        store.add_invoice(Invoice {
            id: Uuid::new_v4(),
            invoice_date: date(2024, 1, 20),
            balance_due: BigDecimal::from(0),
            student_id: "s2".to_string(),
        });
        store.add_invoice(Invoice {
            id: Uuid::new_v4(),
            invoice_date: date(2024, 2, 2),
            balance_due: BigDecimal::from(700),
            student_id: "s3".to_string(),
        });

        let reader = LedgerReader::new(store);
        let total = reader
            .receivables_total_as_of(date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(total, BigDecimal::from(500));
    }

    #[tokio::test]
    async fn only_completed_payments_count() {
        let store = MemoryStore::new();
        for (amount, status) in [
            (300, PaymentStatus::Completed),
            (200, PaymentStatus::Pending),
            (100, PaymentStatus::Failed),
        ] {
            store.add_payment(Payment {
                id: Uuid::new_v4(),
                payment_date: date(2024, 1, 20),
                amount: BigDecimal::from(amount),
                status,
                student_id: "s1".to_string(),
                receipt_number: None,
                reference_number: None,
            });
        }

        let reader = LedgerReader::new(store);
        let total = reader
            .completed_payments_total_as_of(date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(total, BigDecimal::from(300));
    }

    #[tokio::test]
    async fn account_postings_come_back_date_ordered() {
        let store = MemoryStore::new();
        store.add_posting(Posting::debit(
            "cash".to_string(),
            date(2024, 1, 20),
            BigDecimal::from(2),
            "je-2".to_string(),
        ));
        store.add_posting(Posting::debit(
            "cash".to_string(),
            date(2024, 1, 10),
            BigDecimal::from(1),
            "je-1".to_string(),
        ));
        store.add_posting(Posting::debit(
            "other".to_string(),
            date(2024, 1, 15),
            BigDecimal::from(9),
            "je-3".to_string(),
        ));

        let reader = LedgerReader::new(store);
        let postings = reader
            .postings_for_account("cash", date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].transaction_date, date(2024, 1, 10));
        assert_eq!(postings[1].transaction_date, date(2024, 1, 20));
    }
}
