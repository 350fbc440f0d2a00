//! Statement roller
//!
//! Aggregates trial balance rows by account type into the Statement of
//! Financial Performance (income statement) and Statement of Financial
//! Position (balance sheet). Both are computed fresh from a trial balance
//! snapshot on every call.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reports::trial_balance::balance_epsilon;
use crate::types::*;

/// One statement line: an account and its signed amount under the section's
/// normal convention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub account: ReportAccount,
    pub amount: BigDecimal,
}

/// Statement of Financial Performance for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub income: Vec<StatementLine>,
    pub expenses: Vec<StatementLine>,
    pub total_income: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net_income: BigDecimal,
}

/// Statement of Financial Position as of a date, with the accounting
/// equation check Assets = Liabilities + Equity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of_date: NaiveDate,
    pub assets: Vec<StatementLine>,
    pub liabilities: Vec<StatementLine>,
    pub equity: Vec<StatementLine>,
    pub total_assets: BigDecimal,
    pub total_liabilities: BigDecimal,
    pub total_equity: BigDecimal,
    /// Signed `total_assets - (total_liabilities + total_equity)`
    pub difference: BigDecimal,
    pub is_balanced: bool,
}

/// Signed amount of a trial balance row under its section's convention:
/// debit-positive for Assets and Expenses, credit-positive for the rest.
/// A wrong-side balance comes through negative.
fn statement_amount(row: &TrialBalanceRow) -> BigDecimal {
    let net = row.net();
    match row.account.account_type() {
        AccountType::Asset | AccountType::Expense => net,
        AccountType::Liability | AccountType::Equity | AccountType::Income => -net,
    }
}

fn section(trial_balance: &TrialBalance, account_type: AccountType) -> Vec<StatementLine> {
    trial_balance
        .rows
        .iter()
        .filter(|row| row.account.account_type() == account_type)
        .map(|row| StatementLine {
            account: row.account.clone(),
            amount: statement_amount(row),
        })
        .collect()
}

fn section_total(lines: &[StatementLine]) -> BigDecimal {
    lines.iter().map(|line| &line.amount).sum()
}

/// Roll the Income and Expense rows of a trial balance into an income
/// statement. Rows of other types are ignored for this view.
pub fn income_statement(
    start_date: NaiveDate,
    end_date: NaiveDate,
    trial_balance: &TrialBalance,
) -> IncomeStatement {
    let income = section(trial_balance, AccountType::Income);
    let expenses = section(trial_balance, AccountType::Expense);

    let total_income = section_total(&income);
    let total_expenses = section_total(&expenses);
    let net_income = &total_income - &total_expenses;

    IncomeStatement {
        start_date,
        end_date,
        income,
        expenses,
        total_income,
        total_expenses,
        net_income,
    }
}

/// Roll the Asset, Liability, and Equity rows of a trial balance into a
/// balance sheet. The period's net income is folded into equity as a tagged
/// synthetic line, so the accounting equation holds exactly whenever the
/// underlying trial balance is balanced.
pub fn balance_sheet(trial_balance: &TrialBalance) -> BalanceSheet {
    let assets = section(trial_balance, AccountType::Asset);
    let liabilities = section(trial_balance, AccountType::Liability);
    let mut equity = section(trial_balance, AccountType::Equity);

    let income = section(trial_balance, AccountType::Income);
    let expenses = section(trial_balance, AccountType::Expense);
    let net_income = section_total(&income) - section_total(&expenses);
    if net_income != BigDecimal::from(0) {
        equity.push(StatementLine {
            account: ReportAccount::Synthetic(SyntheticKind::CurrentEarnings),
            amount: net_income,
        });
    }

    let total_assets = section_total(&assets);
    let total_liabilities = section_total(&liabilities);
    let total_equity = section_total(&equity);
    let difference = &total_assets - (&total_liabilities + &total_equity);
    let is_balanced = difference.abs() < balance_epsilon();

    BalanceSheet {
        as_of_date: trial_balance.as_of_date,
        assets,
        liabilities,
        equity,
        total_assets,
        total_liabilities,
        total_equity,
        difference,
        is_balanced,
    }
}
