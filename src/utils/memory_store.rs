//! In-memory store implementation for testing and development

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::FinanceStore;
use crate::types::*;

/// In-memory [`FinanceStore`] backed by shared maps. Clones share the same
/// underlying data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    groups: Arc<RwLock<HashMap<String, AccountGroup>>>,
    postings: Arc<RwLock<Vec<Posting>>>,
    invoices: Arc<RwLock<Vec<Invoice>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
            postings: Arc::new(RwLock::new(Vec::new())),
            invoices: Arc::new(RwLock::new(Vec::new())),
            payments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Seed a classification group
    pub fn add_group(&self, group: AccountGroup) {
        self.groups.write().unwrap().insert(group.id.clone(), group);
    }

    /// Seed a posted ledger line
    pub fn add_posting(&self, posting: Posting) {
        self.postings.write().unwrap().push(posting);
    }

    /// Seed a fee invoice
    pub fn add_invoice(&self, invoice: Invoice) {
        self.invoices.write().unwrap().push(invoice);
    }

    /// Seed a fee payment
    pub fn add_payment(&self, payment: Payment) {
        self.payments.write().unwrap().push(payment);
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        self.groups.write().unwrap().clear();
        self.postings.write().unwrap().clear();
        self.invoices.write().unwrap().clear();
        self.payments.write().unwrap().clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FinanceStore for MemoryStore {
    async fn save_account(&mut self, account: &Account) -> FinanceResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: &str) -> FinanceResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(account_id).cloned())
    }

    async fn update_account(&mut self, account: &Account) -> FinanceResult<()> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&account.id) {
            accounts.insert(account.id.clone(), account.clone());
            Ok(())
        } else {
            Err(FinanceError::AccountNotFound(account.id.clone()))
        }
    }

    async fn list_accounts(&self, account_type: Option<AccountType>) -> FinanceResult<Vec<Account>> {
        let accounts = self.accounts.read().unwrap();
        let mut filtered: Vec<Account> = accounts
            .values()
            .filter(|account| account_type.is_none_or(|t| account.account_type == t))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(filtered)
    }

    async fn get_group(&self, group_id: &str) -> FinanceResult<Option<AccountGroup>> {
        Ok(self.groups.read().unwrap().get(group_id).cloned())
    }

    async fn list_groups(
        &self,
        account_type: Option<AccountType>,
    ) -> FinanceResult<Vec<AccountGroup>> {
        let groups = self.groups.read().unwrap();
        let mut filtered: Vec<AccountGroup> = groups
            .values()
            .filter(|group| account_type.is_none_or(|t| group.account_type == t))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(filtered)
    }

    async fn postings_through(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Posting>> {
        let postings = self.postings.read().unwrap();
        Ok(postings
            .iter()
            .filter(|p| p.transaction_date <= cutoff)
            .cloned()
            .collect())
    }

    async fn account_postings_through(
        &self,
        account_id: &str,
        cutoff: NaiveDate,
    ) -> FinanceResult<Vec<Posting>> {
        let postings = self.postings.read().unwrap();
        Ok(postings
            .iter()
            .filter(|p| p.account_id == account_id && p.transaction_date <= cutoff)
            .cloned()
            .collect())
    }

    async fn invoices_through(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Invoice>> {
        let invoices = self.invoices.read().unwrap();
        Ok(invoices
            .iter()
            .filter(|i| i.invoice_date <= cutoff)
            .cloned()
            .collect())
    }

    async fn payments_through(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Payment>> {
        let payments = self.payments.read().unwrap();
        Ok(payments
            .iter()
            .filter(|p| p.payment_date <= cutoff)
            .cloned()
            .collect())
    }
}
