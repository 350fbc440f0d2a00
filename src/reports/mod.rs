//! Report computations: trial balance, financial statements, drill-down

pub mod drilldown;
pub mod statements;
pub mod trial_balance;

pub use drilldown::*;
pub use statements::*;
pub use trial_balance::*;
