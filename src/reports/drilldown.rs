//! Drill-down resolver
//!
//! Replays, transaction by transaction, the source rows behind one report
//! balance: ledger postings for a real account, qualifying invoices or
//! payments for a synthetic one. The replayed rows sum to exactly the net
//! the trial balance attributed to that account - the system's internal
//! consistency check.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// One source transaction behind a report balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrilldownRow {
    pub date: NaiveDate,
    pub reference: Option<String>,
    pub description: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
}

impl DrilldownRow {
    /// Debit-signed net of this row
    pub fn signed_amount(&self) -> BigDecimal {
        &self.debit - &self.credit
    }
}

/// Replay ledger postings as drill-down rows. Input is expected already
/// ordered ascending by date.
pub fn rows_from_postings(postings: Vec<Posting>) -> Vec<DrilldownRow> {
    postings
        .into_iter()
        .map(|posting| DrilldownRow {
            date: posting.transaction_date,
            reference: posting.reference_number,
            description: posting.description,
            debit: posting.debit,
            credit: posting.credit,
        })
        .collect()
}

/// Replay outstanding invoices as the debit rows behind the synthetic
/// Student Fees Receivable balance
pub fn rows_from_invoices(invoices: Vec<Invoice>) -> Vec<DrilldownRow> {
    invoices
        .into_iter()
        .map(|invoice| DrilldownRow {
            date: invoice.invoice_date,
            reference: Some(invoice.id.to_string()),
            description: format!("Fee invoice for student {}", invoice.student_id),
            debit: invoice.balance_due,
            credit: BigDecimal::from(0),
        })
        .collect()
}

/// Replay completed payments behind a synthetic payment-backed balance.
/// Cash/Bank is explained from the debit side of each payment, Fee Income
/// from the credit side.
pub fn rows_from_payments(payments: Vec<Payment>, side: BalanceSide) -> Vec<DrilldownRow> {
    payments
        .into_iter()
        .map(|payment| {
            let (debit, credit) = match side {
                BalanceSide::Debit => (payment.amount, BigDecimal::from(0)),
                BalanceSide::Credit => (BigDecimal::from(0), payment.amount),
            };
            DrilldownRow {
                date: payment.payment_date,
                reference: payment.receipt_number.or(payment.reference_number),
                description: format!("Fee payment from student {}", payment.student_id),
                debit,
                credit,
            }
        })
        .collect()
}
