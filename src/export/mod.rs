//! Export module for gstr-ledger
//!
//! Writes results to files in several formats:
//! - CSV: distributions, profit summaries and purchase invoices (spreadsheet-compatible)
//! - JSON: machine-readable distribution export with schema version
//! - YAML: human-readable distribution export

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

pub use csv::{export_distribution_csv, export_profit_csv, export_purchases_csv};
pub use json::{
    export_distribution_json, import_distribution_json, DistributionExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_distribution_yaml, import_distribution_yaml};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unknown format '{}'. Use csv, json, or yaml", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path(Path::new("out.yml")), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::from_path(Path::new("out")), None);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
