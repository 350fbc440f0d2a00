//! Reporting service facade
//!
//! Wires the account registry, the ledger reader, and the report functions
//! together behind the read operations the UI layer calls. Every report call
//! fetches a fresh snapshot and computes deterministically from it; nothing
//! is cached and nothing shared is mutated, so concurrent calls cannot
//! interact.

use chrono::NaiveDate;

use crate::reader::LedgerReader;
use crate::registry::{AccountRegistry, NewAccount};
use crate::reports::{drilldown, statements, trial_balance};
use crate::reports::{BalanceSheet, DrilldownRow, IncomeStatement};
use crate::traits::{AccountValidator, FinanceStore};
use crate::types::*;

/// Main entry point for the reporting core
pub struct FinanceService<S: FinanceStore> {
    registry: AccountRegistry<S>,
    reader: LedgerReader<S>,
}

impl<S: FinanceStore + Clone> FinanceService<S> {
    /// Create a new service over the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            registry: AccountRegistry::new(storage.clone()),
            reader: LedgerReader::new(storage),
        }
    }

    /// Create a new service with a custom account validator
    pub fn with_validator(storage: S, validator: Box<dyn AccountValidator>) -> Self {
        Self {
            registry: AccountRegistry::with_validator(storage.clone(), validator),
            reader: LedgerReader::new(storage),
        }
    }

    // Account registry operations

    /// Create a new account
    pub async fn create_account(&mut self, spec: NewAccount) -> FinanceResult<Account> {
        self.registry.create_account(spec).await
    }

    /// Update an existing account
    pub async fn update_account(&mut self, account: &Account) -> FinanceResult<()> {
        self.registry.update_account(account).await
    }

    /// Toggle an account's active flag
    pub async fn set_active(&mut self, account_id: &str, active: bool) -> FinanceResult<Account> {
        self.registry.set_active(account_id, active).await
    }

    /// Get an account by id
    pub async fn get_account(&self, account_id: &str) -> FinanceResult<Option<Account>> {
        self.registry.get_account(account_id).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> FinanceResult<Vec<Account>> {
        self.registry.list_accounts().await
    }

    /// List accounts of one type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> FinanceResult<Vec<Account>> {
        self.registry.list_accounts_by_type(account_type).await
    }

    /// List direct children of an account
    pub async fn list_children(&self, parent_id: &str) -> FinanceResult<Vec<Account>> {
        self.registry.list_children(parent_id).await
    }

    /// Classification group picker options for the account form
    pub async fn group_options(
        &self,
        account_type: AccountType,
    ) -> FinanceResult<Vec<AccountGroup>> {
        self.registry.group_options(account_type).await
    }

    // Report operations

    /// Trial balance as of a date
    pub async fn get_trial_balance(&self, as_of_date: NaiveDate) -> FinanceResult<TrialBalance> {
        let accounts = self.registry.list_accounts().await?;
        let sums = self.reader.posting_sums_as_of(as_of_date).await?;
        let receivables = self.reader.receivables_total_as_of(as_of_date).await?;
        let payments = self
            .reader
            .completed_payments_total_as_of(as_of_date)
            .await?;

        Ok(trial_balance::compute_trial_balance(
            as_of_date,
            accounts,
            &sums,
            &receivables,
            &payments,
        ))
    }

    /// Income statement for a period, computed from the trial balance as of
    /// the period end
    pub async fn get_income_statement(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> FinanceResult<IncomeStatement> {
        let tb = self.get_trial_balance(end_date).await?;
        Ok(statements::income_statement(start_date, end_date, &tb))
    }

    /// Balance sheet as of a date
    pub async fn get_balance_sheet(&self, as_of_date: NaiveDate) -> FinanceResult<BalanceSheet> {
        let tb = self.get_trial_balance(as_of_date).await?;
        Ok(statements::balance_sheet(&tb))
    }

    /// Replay the postings behind a real account's balance, ascending by
    /// date
    pub async fn explain_account(
        &self,
        account_id: &str,
        as_of_date: NaiveDate,
    ) -> FinanceResult<Vec<DrilldownRow>> {
        self.registry.get_account_required(account_id).await?;
        let postings = self
            .reader
            .postings_for_account(account_id, as_of_date)
            .await?;
        Ok(drilldown::rows_from_postings(postings))
    }

    /// Replay the source rows behind a synthetic report balance
    pub async fn explain_synthetic(
        &self,
        kind: SyntheticKind,
        as_of_date: NaiveDate,
    ) -> FinanceResult<Vec<DrilldownRow>> {
        match kind {
            SyntheticKind::FeesReceivable => {
                let invoices = self.reader.outstanding_invoices_as_of(as_of_date).await?;
                Ok(drilldown::rows_from_invoices(invoices))
            }
            SyntheticKind::CashBank => {
                let payments = self.reader.completed_payments_as_of(as_of_date).await?;
                Ok(drilldown::rows_from_payments(payments, BalanceSide::Debit))
            }
            SyntheticKind::FeeIncome => {
                let payments = self.reader.completed_payments_as_of(as_of_date).await?;
                Ok(drilldown::rows_from_payments(payments, BalanceSide::Credit))
            }
            SyntheticKind::CurrentEarnings => Err(FinanceError::Validation(
                "Current period earnings is derived from income and expense accounts; \
                 drill into those accounts instead"
                    .to_string(),
            )),
        }
    }
}
