//! Core types and data structures for the reporting engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account types following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Assets - what the institution owns (Cash, Receivables, Equipment, etc.)
    Asset,
    /// Liabilities - what the institution owes (Loans, Accounts Payable, etc.)
    Liability,
    /// Equity - accumulated funds and reserves
    Equity,
    /// Income/Revenue - fees and other money earned
    Income,
    /// Expenses - costs incurred (Salaries, Utilities, etc.)
    Expense,
}

impl AccountType {
    /// Returns the conventional balance side for this account type.
    /// Assets and Expenses normally carry debit balances;
    /// Liabilities, Equity, and Income normally carry credit balances.
    ///
    /// Consulted when pre-filling a new account; never re-applied to an
    /// existing record, so an explicit user override survives edits.
    pub fn default_normal_balance(&self) -> BalanceSide {
        match self {
            AccountType::Asset | AccountType::Expense => BalanceSide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => {
                BalanceSide::Credit
            }
        }
    }
}

/// The two sides of a double-entry posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceSide {
    /// Debit side - increases Assets and Expenses
    Debit,
    /// Credit side - increases Liabilities, Equity, and Income
    Credit,
}

/// A ledger account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier
    pub id: String,
    /// Short unique sortable code, human-assigned (e.g. "10-00-001")
    pub code: String,
    /// Display label
    pub name: String,
    /// Account class - fixed, closed set
    pub account_type: AccountType,
    /// Stored explicitly; defaulted from the type at creation but an
    /// explicit override is never silently re-derived
    pub normal_balance: BalanceSide,
    /// Optional classification group of the same account type
    pub group_id: Option<String>,
    /// Optional sub-group within the classification hierarchy
    pub sub_group_id: Option<String>,
    /// Optional parent account of the same type (tree, no cycles)
    pub parent_id: Option<String>,
    /// Free-form notes
    pub description: Option<String>,
    /// Inactive accounts are hidden from new-posting pickers but still
    /// appear in historical reports
    pub is_active: bool,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new active account with the type's default normal balance
    pub fn new(id: String, code: String, name: String, account_type: AccountType) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            code,
            name,
            account_type,
            normal_balance: account_type.default_normal_balance(),
            group_id: None,
            sub_group_id: None,
            parent_id: None,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A row of the classification hierarchy (cash-flow categories and the like).
/// Sub-groups are groups with a parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountGroup {
    pub id: String,
    pub name: String,
    /// Groups classify accounts of exactly one type
    pub account_type: AccountType,
    pub parent_id: Option<String>,
}

/// One immutable debit-or-credit line of a posted journal entry.
///
/// Postings are append-only and created by other collaborators; this crate
/// only reads them. Within one `journal_entry_id` the debit and credit sums
/// are assumed equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub account_id: String,
    pub transaction_date: NaiveDate,
    pub description: String,
    pub reference_number: Option<String>,
    /// Debit amount, zero or positive
    pub debit: BigDecimal,
    /// Credit amount, zero or positive
    pub credit: BigDecimal,
    /// Groups the lines of one balanced transaction
    pub journal_entry_id: String,
}

impl Posting {
    /// Create a debit posting line
    pub fn debit(
        account_id: String,
        transaction_date: NaiveDate,
        amount: BigDecimal,
        journal_entry_id: String,
    ) -> Self {
        Self {
            account_id,
            transaction_date,
            description: String::new(),
            reference_number: None,
            debit: amount,
            credit: BigDecimal::from(0),
            journal_entry_id,
        }
    }

    /// Create a credit posting line
    pub fn credit(
        account_id: String,
        transaction_date: NaiveDate,
        amount: BigDecimal,
        journal_entry_id: String,
    ) -> Self {
        Self {
            account_id,
            transaction_date,
            description: String::new(),
            reference_number: None,
            debit: BigDecimal::from(0),
            credit: amount,
            journal_entry_id,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Set the reference number
    pub fn with_reference(mut self, reference: String) -> Self {
        self.reference_number = Some(reference);
        self
    }

    /// Debit-signed net amount of this line
    pub fn signed_amount(&self) -> BigDecimal {
        &self.debit - &self.credit
    }
}

/// Status of a fee payment in the source system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

/// Student fee invoice - an auxiliary feed, not a ledger posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_date: NaiveDate,
    /// Outstanding amount still owed on the invoice
    pub balance_due: BigDecimal,
    pub student_id: String,
}

/// Student fee payment - an auxiliary feed, not a ledger posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub payment_date: NaiveDate,
    pub amount: BigDecimal,
    pub status: PaymentStatus,
    pub student_id: String,
    pub receipt_number: Option<String>,
    pub reference_number: Option<String>,
}

/// Report-only accounts invented by the reconciliation step or the statement
/// roller. Never persisted and never mistakable for posted ledger truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntheticKind {
    /// Outstanding fee invoices with no receivables posting behind them
    FeesReceivable,
    /// Completed fee payments with no cash posting behind them
    CashBank,
    /// Income side of the same completed payments
    FeeIncome,
    /// Net income folded into equity on the balance sheet
    CurrentEarnings,
}

impl SyntheticKind {
    /// Display label used in report output
    pub fn display_name(&self) -> &'static str {
        match self {
            SyntheticKind::FeesReceivable => "Student Fees Receivable",
            SyntheticKind::CashBank => "Cash/Bank",
            SyntheticKind::FeeIncome => "Fee Income",
            SyntheticKind::CurrentEarnings => "Current Period Earnings",
        }
    }

    /// Account class the synthetic row reports under
    pub fn account_type(&self) -> AccountType {
        match self {
            SyntheticKind::FeesReceivable | SyntheticKind::CashBank => AccountType::Asset,
            SyntheticKind::FeeIncome => AccountType::Income,
            SyntheticKind::CurrentEarnings => AccountType::Equity,
        }
    }
}

/// An account as it appears on a report: either a real chart-of-accounts row
/// or a tagged synthetic row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportAccount {
    Posted(Account),
    Synthetic(SyntheticKind),
}

impl ReportAccount {
    pub fn name(&self) -> &str {
        match self {
            ReportAccount::Posted(account) => &account.name,
            ReportAccount::Synthetic(kind) => kind.display_name(),
        }
    }

    pub fn account_type(&self) -> AccountType {
        match self {
            ReportAccount::Posted(account) => account.account_type,
            ReportAccount::Synthetic(kind) => kind.account_type(),
        }
    }

    /// Account code for posted accounts; synthetic rows have none
    pub fn code(&self) -> Option<&str> {
        match self {
            ReportAccount::Posted(account) => Some(&account.code),
            ReportAccount::Synthetic(_) => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, ReportAccount::Synthetic(_))
    }
}

/// One line of the trial balance. A row carries a value on exactly one side;
/// a row with neither side set nets to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: ReportAccount,
    pub debit_balance: Option<BigDecimal>,
    pub credit_balance: Option<BigDecimal>,
}

impl TrialBalanceRow {
    /// Balance amount regardless of side
    pub fn balance_amount(&self) -> BigDecimal {
        self.debit_balance
            .clone()
            .or_else(|| self.credit_balance.clone())
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Debit-signed net balance
    pub fn net(&self) -> BigDecimal {
        let debit = self
            .debit_balance
            .clone()
            .unwrap_or_else(|| BigDecimal::from(0));
        let credit = self
            .credit_balance
            .clone()
            .unwrap_or_else(|| BigDecimal::from(0));
        debit - credit
    }

    /// True when both sides are zero
    pub fn is_zero(&self) -> bool {
        self.debit_balance.is_none() && self.credit_balance.is_none()
    }
}

/// Trial balance - every account's balance at a point in time, with the
/// debits-equal-credits check that is the primary correctness signal of the
/// whole subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub as_of_date: NaiveDate,
    /// Posted rows ordered by account code, synthetic rows after
    pub rows: Vec<TrialBalanceRow>,
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    /// Signed `total_debits - total_credits`
    pub difference: BigDecimal,
    /// Whether the difference is within tolerance. An unbalanced report is
    /// still a completed report; the flag surfaces a data-entry problem
    /// instead of hiding it behind a failure.
    pub is_balanced: bool,
}

/// Errors that can occur in the reporting core
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    /// Malformed account input; the caller keeps the form open and shows
    /// the message inline
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    /// An underlying read failed. The whole report call fails; a zero or
    /// empty report is never substituted, since that would be
    /// indistinguishable from "no activity".
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
}

/// Result type for reporting operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_normal_balance_follows_account_type() {
        assert_eq!(
            AccountType::Asset.default_normal_balance(),
            BalanceSide::Debit
        );
        assert_eq!(
            AccountType::Expense.default_normal_balance(),
            BalanceSide::Debit
        );
        assert_eq!(
            AccountType::Liability.default_normal_balance(),
            BalanceSide::Credit
        );
        assert_eq!(
            AccountType::Equity.default_normal_balance(),
            BalanceSide::Credit
        );
        assert_eq!(
            AccountType::Income.default_normal_balance(),
            BalanceSide::Credit
        );
    }

    #[test]
    fn posting_signed_amount_is_debit_minus_credit() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let debit = Posting::debit(
            "cash".to_string(),
            date,
            BigDecimal::from(1000),
            "je-1".to_string(),
        );
        let credit = Posting::credit(
            "fees".to_string(),
            date,
            BigDecimal::from(1000),
            "je-1".to_string(),
        );
        assert_eq!(debit.signed_amount(), BigDecimal::from(1000));
        assert_eq!(credit.signed_amount(), BigDecimal::from(-1000));
    }

    #[test]
    fn report_account_exposes_synthetic_tag() {
        let posted = ReportAccount::Posted(Account::new(
            "a1".to_string(),
            "10-00-001".to_string(),
            "Cash".to_string(),
            AccountType::Asset,
        ));
        let synthetic = ReportAccount::Synthetic(SyntheticKind::FeesReceivable);

        assert!(!posted.is_synthetic());
        assert_eq!(posted.code(), Some("10-00-001"));
        assert!(synthetic.is_synthetic());
        assert_eq!(synthetic.name(), "Student Fees Receivable");
        assert_eq!(synthetic.account_type(), AccountType::Asset);
        assert_eq!(synthetic.code(), None);
    }

    #[test]
    fn account_serializes_round_trip() {
        let account = Account::new(
            "a1".to_string(),
            "10-00-001".to_string(),
            "Cash".to_string(),
            AccountType::Asset,
        );
        let json = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }
}
