//! gstr-ledger - GST bookkeeping helpers for small traders
//!
//! This library provides the core functionality behind the `gstr` command:
//! splitting a month's sale total into dated daily entries that sum exactly
//! to the tax-adjusted amount, validating and totalling purchase invoices,
//! and summarizing monthly purchase, wholesale and retail figures.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, date ranges, distributions, invoices)
//! - `services`: Business logic layer (the distributor, the purchase register)
//! - `reports`: Distribution and profit report layouts
//! - `export`: CSV, JSON and YAML output
//! - `display`: Terminal formatting
//! - `journal`: Append-only log of past runs
//! - `cli`: Command handlers for the `gstr` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use gstr_ledger::models::DistributionInput;
//! use gstr_ledger::services::{Distributor, RandomSource};
//!
//! let request = DistributionInput::new("10000", "2024-01-01", "2024-01-30").validate()?;
//! let result = Distributor::default().distribute(&request, &mut RandomSource::seeded(7))?;
//! assert_eq!(result.entries.len(), 300);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod journal;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{LedgerError, LedgerResult};
