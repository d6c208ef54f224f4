//! Configuration module for gstr-ledger
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::GstrPaths;
pub use settings::Settings;
