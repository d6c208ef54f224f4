//! Reports module for gstr-ledger
//!
//! Provides the sale distribution report (entries, per-day totals and the
//! grand total) and the monthly profit summary.

pub mod distribution;
pub mod profit;

pub use distribution::{DistributionReport, DistributionRow, GRAND_TOTAL_LABEL};
pub use profit::{ProfitLine, ProfitReport, PROFIT_CSV_HEADER};
