//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;
use crate::utils::validation;

/// Read access to the external data store.
///
/// The store owns durability, transactions, and access control; this crate
/// layers computation on top of its query results. Implementations map any
/// underlying failure to [`FinanceError::SourceUnavailable`] - callers abort
/// the whole report on such an error rather than rendering a misleadingly
/// balanced one.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    /// Save a new account
    async fn save_account(&mut self, account: &Account) -> FinanceResult<()>;

    /// Get an account by id
    async fn get_account(&self, account_id: &str) -> FinanceResult<Option<Account>>;

    /// Update an existing account
    async fn update_account(&mut self, account: &Account) -> FinanceResult<()>;

    /// List all accounts, optionally filtered by type. Includes inactive
    /// accounts; historical reports still need them.
    async fn list_accounts(&self, account_type: Option<AccountType>) -> FinanceResult<Vec<Account>>;

    /// Get a classification group by id
    async fn get_group(&self, group_id: &str) -> FinanceResult<Option<AccountGroup>>;

    /// List classification groups, optionally filtered by account type
    async fn list_groups(
        &self,
        account_type: Option<AccountType>,
    ) -> FinanceResult<Vec<AccountGroup>>;

    /// All ledger postings dated on or before the cutoff
    async fn postings_through(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Posting>>;

    /// Ledger postings for one account dated on or before the cutoff
    async fn account_postings_through(
        &self,
        account_id: &str,
        cutoff: NaiveDate,
    ) -> FinanceResult<Vec<Posting>>;

    /// Fee invoices dated on or before the cutoff
    async fn invoices_through(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Invoice>>;

    /// Fee payments dated on or before the cutoff, any status
    async fn payments_through(&self, cutoff: NaiveDate) -> FinanceResult<Vec<Payment>>;
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate an account before saving
    fn validate_account(&self, account: &Account) -> FinanceResult<()>;
}

/// Default account validator with the standard code and name rules
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_account(&self, account: &Account) -> FinanceResult<()> {
        validation::validate_account_code(&account.code)?;
        validation::validate_account_name(&account.name)?;
        Ok(())
    }
}
