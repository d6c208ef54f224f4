//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.
//! Distribution and profit tables live with their reports.

pub mod purchase;
pub mod report;

pub use purchase::{format_purchase_list, format_rejected_draft};
pub use report::truncate;
