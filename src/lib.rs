//! # Campus Ledger
//!
//! The double-entry reporting core of an institutional management system:
//! chart of accounts, trial balance, financial statements, and per-account
//! drill-down, computed over an external data store the crate does not own.
//!
//! ## Features
//!
//! - **Chart of accounts**: typed, hierarchical accounts with classification
//!   groups and an explicit normal-balance convention
//! - **Trial balance**: per-account balances under the normal-balance sign
//!   rule, with the debits-equal-credits check surfaced on every report
//! - **Financial statements**: income statement and balance sheet with the
//!   accounting-equation check
//! - **Synthetic reconciliation**: fee invoices and payments that never
//!   reached the ledger appear as tagged report-only rows
//! - **Drill-down**: replay of the source transactions behind any balance
//! - **Storage abstraction**: database-agnostic design with a trait-based
//!   store
//!
//! ## Quick Start
//!
//! ```rust
//! use campus_ledger::{FinanceService, NewAccount, AccountType};
//! use campus_ledger::utils::MemoryStore;
//!
//! # async fn demo() -> campus_ledger::FinanceResult<()> {
//! let mut service = FinanceService::new(MemoryStore::new());
//! service
//!     .create_account(NewAccount::new(
//!         "10-00-001".to_string(),
//!         "Bank Account".to_string(),
//!         AccountType::Asset,
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod reconciliation;
pub mod registry;
pub mod reports;
pub mod service;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reader::*;
pub use registry::*;
pub use reports::*;
pub use service::*;
pub use traits::*;
pub use types::*;
