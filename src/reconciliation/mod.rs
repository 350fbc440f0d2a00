//! Synthetic fee reconciliation
//!
//! The source system may record fee invoices and payments without posting
//! them through the formal ledger. This step bridges that gap at report time
//! by appending tagged synthetic rows, and suppresses each one when a real
//! account already covers the same ground (matched by name, case-insensitive)
//! so nothing is double counted.

use bigdecimal::BigDecimal;

use crate::types::*;

/// True when any account name contains the needle, case-insensitively.
/// The substring match mirrors the source system's linkage; it lives here so
/// a stricter rule can replace it in one place.
pub fn has_account_matching(accounts: &[Account], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    accounts
        .iter()
        .any(|account| account.name.to_lowercase().contains(&needle))
}

/// Build the synthetic rows for one report snapshot.
///
/// - Outstanding receivables with no "receivable" account produce a
///   Student Fees Receivable debit row.
/// - Completed payments with no "cash" account produce a Cash/Bank debit row
///   and a Fee Income credit row of equal amount.
pub fn synthetic_rows(
    accounts: &[Account],
    receivables_total: &BigDecimal,
    payments_total: &BigDecimal,
) -> Vec<TrialBalanceRow> {
    let zero = BigDecimal::from(0);
    let mut rows = Vec::new();

    if *receivables_total > zero {
        if has_account_matching(accounts, "receivable") {
            tracing::debug!(
                amount = %receivables_total,
                "synthetic receivable row suppressed, a receivables account exists"
            );
        } else {
            tracing::info!(
                amount = %receivables_total,
                "appending synthetic row for unposted invoice balances"
            );
            rows.push(TrialBalanceRow {
                account: ReportAccount::Synthetic(SyntheticKind::FeesReceivable),
                debit_balance: Some(receivables_total.clone()),
                credit_balance: None,
            });
        }
    }

    if *payments_total > zero {
        if has_account_matching(accounts, "cash") {
            tracing::debug!(
                amount = %payments_total,
                "synthetic cash and fee income rows suppressed, a cash account exists"
            );
        } else {
            tracing::info!(
                amount = %payments_total,
                "appending synthetic rows for unposted fee payments"
            );
            rows.push(TrialBalanceRow {
                account: ReportAccount::Synthetic(SyntheticKind::CashBank),
                debit_balance: Some(payments_total.clone()),
                credit_balance: None,
            });
            rows.push(TrialBalanceRow {
                account: ReportAccount::Synthetic(SyntheticKind::FeeIncome),
                debit_balance: None,
                credit_balance: Some(payments_total.clone()),
            });
        }
    }

    rows
}
