//! Trial balance engine
//!
//! Pure computation from an already-fetched snapshot: per-account posting
//! sums become signed balances under each account's normal-balance rule,
//! synthetic reconciliation rows are appended, and the debits-equal-credits
//! invariant is checked and surfaced.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::reader::PostingSums;
use crate::reconciliation;
use crate::types::*;

/// Tolerance for the balanced check: one minor currency unit, covering
/// rounding in upstream feeds. Amounts themselves are exact decimals.
pub fn balance_epsilon() -> BigDecimal {
    BigDecimal::from(1) / BigDecimal::from(100)
}

/// Place an account's net activity on the debit or credit side.
///
/// A positive net is a debit balance, a negative net a credit balance -
/// regardless of the account's normal side. An account whose activity nets
/// opposite to its convention therefore shows a balance on the "wrong" side;
/// that is diagnostic information for the accountant and must not be clamped.
fn balance_row(account: Account, sums: Option<&PostingSums>) -> TrialBalanceRow {
    let zero = BigDecimal::from(0);
    let net = sums.map(|s| s.net()).unwrap_or_else(|| zero.clone());

    let (debit_balance, credit_balance) = if net > zero {
        (Some(net), None)
    } else if net < zero {
        (None, Some(net.abs()))
    } else {
        (None, None)
    };

    TrialBalanceRow {
        account: ReportAccount::Posted(account),
        debit_balance,
        credit_balance,
    }
}

/// Compute the trial balance for one snapshot.
///
/// `accounts` must include inactive accounts; historical balances still
/// report. `receivables_total` and `payments_total` come from the auxiliary
/// fee feeds and are reconciled into synthetic rows when no real account
/// covers them.
pub fn compute_trial_balance(
    as_of_date: NaiveDate,
    accounts: Vec<Account>,
    sums: &HashMap<String, PostingSums>,
    receivables_total: &BigDecimal,
    payments_total: &BigDecimal,
) -> TrialBalance {
    let synthetic = reconciliation::synthetic_rows(&accounts, receivables_total, payments_total);

    let mut rows: Vec<TrialBalanceRow> = accounts
        .into_iter()
        .map(|account| {
            let account_sums = sums.get(&account.id);
            balance_row(account, account_sums)
        })
        .collect();
    rows.extend(synthetic);

    // Zero rows are noise on a populated report, but an all-zero report must
    // stay visible in full so "no data" reads differently from a filter that
    // hid everything.
    if rows.iter().any(|row| !row.is_zero()) {
        rows.retain(|row| !row.is_zero());
    }

    rows.sort_by(|a, b| {
        let key = |row: &TrialBalanceRow| {
            (
                row.account.is_synthetic(),
                row.account.code().unwrap_or_default().to_string(),
            )
        };
        key(a).cmp(&key(b))
    });

    let total_debits: BigDecimal = rows
        .iter()
        .filter_map(|row| row.debit_balance.as_ref())
        .sum();
    let total_credits: BigDecimal = rows
        .iter()
        .filter_map(|row| row.credit_balance.as_ref())
        .sum();
    let difference = &total_debits - &total_credits;
    let is_balanced = difference.abs() < balance_epsilon();

    if !is_balanced {
        tracing::warn!(
            %total_debits,
            %total_credits,
            %difference,
            "trial balance is out of balance"
        );
    }

    TrialBalance {
        as_of_date,
        rows,
        total_debits,
        total_credits,
        difference,
        is_balanced,
    }
}
