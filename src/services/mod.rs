//! Service layer for gstr-ledger
//!
//! The service layer holds the business logic: the sale amount distributor,
//! purchase invoice bookkeeping over an injected repository, and reading the
//! input files the command line works from.

pub mod distribution;
pub mod import;
pub mod purchase;

pub use distribution::{DistributionConfig, Distributor, FixedSource, PartSource, RandomSource};
pub use import::{read_firms, read_profit_csv, read_purchase_drafts, ProfitImport, SkippedRow};
pub use purchase::{InMemoryPurchaseRepository, PurchaseRepository, PurchaseService, PurchaseTotals};
