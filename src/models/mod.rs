//! Core data models for gstr-ledger
//!
//! This module contains the data structures of the bookkeeping domain:
//! money amounts, date ranges, sale distributions, purchase invoices,
//! supplier firms and monthly profit rows.

pub mod date_range;
pub mod distribution;
pub mod firm;
pub mod ids;
pub mod money;
pub mod profit;
pub mod purchase;

pub use date_range::DateRange;
pub use distribution::{
    DayTotal, DistributionEntry, DistributionInput, DistributionRequest, DistributionResult,
    RangePolicy, ValidationError, ValidationKind,
};
pub use firm::{Firm, FirmDirectory, InMemoryFirmDirectory};
pub use ids::InvoiceId;
pub use money::{Money, Precision};
pub use profit::{ProfitRecord, ProfitRow};
pub use purchase::{
    PurchaseDraft, PurchaseField, PurchaseInvoice, PurchaseIssue, PurchaseValidationError,
};
