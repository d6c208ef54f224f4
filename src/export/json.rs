//! JSON Export functionality
//!
//! Exports a sale distribution to JSON with schema versioning, and reads it
//! back with the totals re-checked.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{DateRange, DayTotal, DistributionEntry, DistributionResult, Money, Precision};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full distribution export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Days holding buckets
    pub span: DateRange,

    /// Amount entered before adjustment
    pub total_amount: Money,

    /// Amount distributed
    pub adjusted_total: Money,

    pub precision: Precision,

    /// Every bucket in order
    pub entries: Vec<DistributionEntry>,

    /// Subtotal per day
    pub day_totals: Vec<DayTotal>,

    /// Sum of all entries
    pub grand_total: Money,
}

impl DistributionExport {
    /// Create an export from a distribution result
    pub fn from_result(result: &DistributionResult) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            span: result.span,
            total_amount: result.total_amount,
            adjusted_total: result.adjusted_total,
            precision: result.precision,
            entries: result.entries.clone(),
            day_totals: result.day_totals(),
            grand_total: result.grand_total(),
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let entry_sum = Money::checked_sum(self.entries.iter().map(|e| e.amount))
            .ok_or_else(|| "Entries sum out of range".to_string())?;
        if entry_sum != self.grand_total || entry_sum != self.adjusted_total {
            return Err(format!(
                "Entries sum to {} but the export records {} (adjusted {})",
                entry_sum, self.grand_total, self.adjusted_total
            ));
        }

        if let Some(entry) = self.entries.iter().find(|e| !self.span.contains(e.date)) {
            return Err(format!("Entry dated {} lies outside {}", entry.date, self.span));
        }

        let day_sum = Money::checked_sum(self.day_totals.iter().map(|d| d.amount))
            .ok_or_else(|| "Day totals sum out of range".to_string())?;
        if day_sum != self.grand_total {
            return Err(format!(
                "Day totals sum to {} but the grand total is {}",
                day_sum, self.grand_total
            ));
        }

        Ok(())
    }
}

/// Export a distribution to JSON
pub fn export_distribution_json<W: Write>(
    result: &DistributionResult,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = DistributionExport::from_result(result);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read a distribution back from a JSON export
pub fn import_distribution_json(json_str: &str) -> LedgerResult<DistributionExport> {
    let export: DistributionExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Import(e.to_string()))?;

    export.validate().map_err(LedgerError::Import)?;

    Ok(export)
}
